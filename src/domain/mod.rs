//! Domain models for Shellmate
//!
//! Contains the reply segmentation and color logic without any I/O concerns.

mod color;
mod segment;

pub use color::{BaseColor, ColorError, ColorSpec};
pub use segment::{parse_reply, Segment, SegmentKind};
