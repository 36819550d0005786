//! Interactive execution menu
//!
//! After a reply is rendered, each detected command is offered in original
//! order: run it as-is, edit it first, skip it, or quit the menu. The loop
//! is an explicit state machine driven by discrete input events, so tests
//! can script a whole session without a terminal.
//!
//! Multi-line commands are presented and edited as one unit, and each one
//! is a single shell invocation with its internal line breaks preserved.

use std::io::Write;

use anyhow::Result;

use crate::domain::{ColorSpec, Segment, SegmentKind};

use super::render::Renderer;
use super::runner::CommandRunner;

/// User decision for the currently presented command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Execute the command as-is
    Run,
    /// Modify the command text, then decide again
    Edit,
    /// Discard this command and move to the next
    Skip,
    /// Stop offering all remaining commands
    Quit,
}

/// Source of menu decisions and edited command text
pub trait MenuInput {
    /// Blocks until the user picks a choice for the presented command
    fn choice(&mut self) -> Result<MenuChoice>;

    /// Lets the user rewrite the command, returning the new text
    ///
    /// Implementations must handle multi-line text as a whole; returning
    /// `current` unchanged is a valid outcome.
    fn edit(&mut self, current: &str) -> Result<String>;
}

/// What happened during one menu session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuSummary {
    pub executed: usize,
    pub skipped: usize,
    /// True when the user quit before reaching the last command
    pub aborted: bool,
}

/// Menu progression. `Presenting` shows one outstanding command,
/// `Deciding` waits for input on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    Presenting(usize),
    Deciding(usize),
    Idle,
}

/// The interactive per-command menu
pub struct ExecutionMenu<'a, R, I, W> {
    runner: &'a mut R,
    input: &'a mut I,
    writer: &'a mut W,
    command_color: ColorSpec,
    comment_color: ColorSpec,
}

impl<'a, R, I, W> ExecutionMenu<'a, R, I, W>
where
    R: CommandRunner,
    I: MenuInput,
    W: Write,
{
    pub fn new(renderer: &Renderer, runner: &'a mut R, input: &'a mut I, writer: &'a mut W) -> Self {
        Self {
            runner,
            input,
            writer,
            command_color: renderer.color_for(SegmentKind::Command),
            comment_color: renderer.color_for(SegmentKind::Comment),
        }
    }

    /// Offers every command segment in order
    ///
    /// A failing command is reported and does not block the rest; quitting
    /// abandons the remaining commands without undoing completed ones.
    pub fn run(&mut self, segments: &[Segment]) -> Result<MenuSummary> {
        let mut commands: Vec<String> = segments
            .iter()
            .filter(|s| s.is_command())
            .map(|s| s.text.clone())
            .collect();

        let mut summary = MenuSummary::default();
        if commands.is_empty() {
            return Ok(summary);
        }

        self.print_header(commands.len())?;

        let mut state = MenuState::Presenting(0);
        loop {
            state = match state {
                MenuState::Presenting(i) if i >= commands.len() => MenuState::Idle,
                MenuState::Presenting(i) => {
                    self.present(i, &commands)?;
                    MenuState::Deciding(i)
                }
                MenuState::Deciding(i) => match self.input.choice()? {
                    MenuChoice::Run => {
                        self.execute(&commands[i])?;
                        summary.executed += 1;
                        MenuState::Presenting(i + 1)
                    }
                    MenuChoice::Edit => {
                        commands[i] = self.input.edit(&commands[i])?;
                        // Re-present the edited text for confirmation
                        MenuState::Presenting(i)
                    }
                    MenuChoice::Skip => {
                        summary.skipped += 1;
                        MenuState::Presenting(i + 1)
                    }
                    MenuChoice::Quit => {
                        summary.aborted = true;
                        summary.skipped += commands.len() - i;
                        MenuState::Idle
                    }
                },
                MenuState::Idle => break,
            };
        }

        Ok(summary)
    }

    fn print_header(&mut self, count: usize) -> Result<()> {
        let label = if count == 1 {
            "1 command found".to_string()
        } else {
            format!("{} commands found", count)
        };
        writeln!(
            self.writer,
            "{}",
            self.comment_color.paint(&format!(
                "{}. [r]un  [e]dit  [s]kip  [q]uit",
                label
            ))
        )?;
        Ok(())
    }

    fn present(&mut self, index: usize, commands: &[String]) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} {}",
            self.comment_color
                .paint(&format!("({}/{})", index + 1, commands.len())),
            self.command_color.paint(&commands[index])
        )?;
        self.writer.flush()?;
        Ok(())
    }

    fn execute(&mut self, command: &str) -> Result<()> {
        writeln!(self.writer)?;
        self.writer.flush()?;

        let outcome = self.runner.run(command)?;

        if !outcome.success() {
            let report = match outcome.status {
                Some(code) => format!("command exited with status {}", code),
                None => "command was terminated by a signal".to_string(),
            };
            writeln!(self.writer, "{}", self.comment_color.paint(&report))?;
        }

        Ok(())
    }
}
