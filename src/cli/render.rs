//! Reply rendering
//!
//! Walks the ordered segment sequence and writes each one with the color
//! configured for its kind. Text is emitted verbatim, one blank line between
//! segments for legibility. Escapes are reset per line so no color bleeds
//! past a segment boundary.

use std::io::{self, Write};

use crate::domain::{ColorSpec, Segment, SegmentKind};
use crate::storage::Config;

use super::output::Output;

/// Colorized segment renderer
///
/// Holds explicit color preferences; nothing is read from ambient state.
pub struct Renderer {
    command_color: ColorSpec,
    comment_color: ColorSpec,
}

impl Renderer {
    pub fn new(command_color: ColorSpec, comment_color: ColorSpec) -> Self {
        Self {
            command_color,
            comment_color,
        }
    }

    /// Builds a renderer from configured color specs
    ///
    /// An unrecognized spec degrades to the terminal default color for that
    /// kind with a warning; rendering itself never aborts.
    pub fn from_config(config: &Config, output: &Output) -> Self {
        let command_color = parse_or_default(&config.command_color, "command_color", output);
        let comment_color = parse_or_default(&config.comment_color, "comment_color", output);
        Self::new(command_color, comment_color)
    }

    pub fn color_for(&self, kind: SegmentKind) -> ColorSpec {
        match kind {
            SegmentKind::Command => self.command_color,
            SegmentKind::Comment => self.comment_color,
        }
    }

    /// Writes the segments, strictly in order
    pub fn render<W: Write>(&self, segments: &[Segment], writer: &mut W) -> io::Result<()> {
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                writeln!(writer)?;
            }
            writeln!(writer, "{}", self.color_for(segment.kind).paint(&segment.text))?;
        }
        Ok(())
    }
}

fn parse_or_default(spec: &str, key: &str, output: &Output) -> ColorSpec {
    match spec.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            output.warn(&format!(
                "Unknown color spec '{}' for {}, using the terminal default",
                spec, key
            ));
            ColorSpec::default()
        }
    }
}
