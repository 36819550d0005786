//! # Storage Layer
//!
//! Persistence for Shellmate's user-local state.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `<config dir>/config.toml` |
//! | History | JSON | `<config dir>/history.json` |
//!
//! The config directory defaults to the platform location (via
//! `directories`) and can be overridden with `SHELLMATE_CONFIG_DIR`.

mod config;
mod history;

pub use config::{Config, ConfigError};
pub use history::{History, HistoryEntry};
