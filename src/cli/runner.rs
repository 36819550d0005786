//! Command execution
//!
//! The menu hands command text to a `CommandRunner` rather than spawning
//! processes itself, so tests can record invocations without touching a
//! real shell.

use anyhow::{Context, Result};
use std::process::Command;

/// Result of running one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` when the process was killed by a signal
    pub status: Option<i32>,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs command text in a subordinate shell
pub trait CommandRunner {
    fn run(&mut self, command: &str) -> Result<CommandOutcome>;
}

/// Real runner: hands the literal text to the system shell
///
/// stdio is inherited so the command's output and any prompts go straight
/// to the user's terminal. No quoting or argument splitting is done here;
/// the shell gets the text verbatim.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&mut self, command: &str) -> Result<CommandOutcome> {
        let status = shell_command(command)
            .status()
            .with_context(|| format!("Failed to run command: {}", command))?;

        Ok(CommandOutcome {
            status: status.code(),
        })
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_zero_exit() {
        let outcome = ShellRunner.run("exit 0").unwrap();
        assert_eq!(outcome.status, Some(0));
        assert!(outcome.success());
    }

    #[test]
    fn reports_nonzero_exit() {
        let outcome = ShellRunner.run("exit 3").unwrap();
        assert_eq!(outcome.status, Some(3));
        assert!(!outcome.success());
    }

    #[test]
    fn multiline_text_runs_as_one_invocation() {
        let outcome = ShellRunner.run("x=1\ntest \"$x\" = 1").unwrap();
        assert!(outcome.success());
    }
}
