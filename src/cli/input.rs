//! Terminal-backed menu input
//!
//! Reads single-key decisions in raw mode and full replacement text for
//! edits in cooked mode. Raw mode is enabled only for the duration of one
//! keypress and restored even on error, so a crash never leaves the
//! terminal unusable.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use super::menu::{MenuChoice, MenuInput};

/// Restores cooked mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Menu input reading from the user's terminal
pub struct TerminalInput;

impl MenuInput for TerminalInput {
    fn choice(&mut self) -> Result<MenuChoice> {
        let _guard = RawModeGuard::enable()?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // Ctrl-C / Ctrl-D quit like 'q'
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                if let KeyCode::Char('c') | KeyCode::Char('d') = key.code {
                    return Ok(MenuChoice::Quit);
                }
                continue;
            }

            match key.code {
                KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') => {
                    return Ok(MenuChoice::Run)
                }
                KeyCode::Char('e') | KeyCode::Char('E') => return Ok(MenuChoice::Edit),
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('n') => {
                    return Ok(MenuChoice::Skip)
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuChoice::Quit)
                }
                _ => continue,
            }
        }
    }

    /// Reads replacement text, multi-line commands included
    ///
    /// The whole command is replaced in one editing turn: the user types the
    /// new text and finishes with an empty line. Entering nothing keeps the
    /// original.
    fn edit(&mut self, current: &str) -> Result<String> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "Current command:")?;
        writeln!(stdout, "{}", current)?;
        writeln!(
            stdout,
            "Enter replacement (finish with an empty line, leave empty to keep):"
        )?;
        stdout.flush()?;

        let stdin = io::stdin().lock();
        let mut lines = Vec::new();
        for line in stdin.lines() {
            let line = line?;
            if line.is_empty() {
                break;
            }
            lines.push(line);
        }

        if lines.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(lines.join("\n"))
        }
    }
}
