//! Shellmate - a terminal assistant for shell questions
//!
//! Ask a question from the terminal; the reply comes back as colorized
//! comment and command segments, and detected commands can be run, edited,
//! or skipped through an interactive menu.

pub mod api;
pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{parse_reply, ColorSpec, Segment, SegmentKind};
