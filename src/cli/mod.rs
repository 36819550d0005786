//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `shellmate <question…>` | Ask, render the reply, offer to run commands |
//! | `shellmate login` | Store an auth token |
//! | `shellmate become <persona…>` | Change the answer persona |
//! | `shellmate config show/set` | Inspect and change settings |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Colorized, human-readable output
//! - `json` - Machine-parseable JSON (disables the execution menu)
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod ask;
mod input;
mod menu;
mod output;
mod render;
mod runner;

pub use app::{run, Cli, Commands};
pub use menu::{ExecutionMenu, MenuChoice, MenuInput, MenuSummary};
pub use output::{Output, OutputFormat};
pub use render::Renderer;
pub use runner::{CommandOutcome, CommandRunner, ShellRunner};
