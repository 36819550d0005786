//! Reply segmentation
//!
//! The assistant API delimits shell commands with fenced blocks. A reply is
//! split into an ordered sequence of segments: plain explanatory text
//! (Comment) and runnable shell text (Command). A fenced block is one atomic
//! Command segment no matter how many lines it spans.

use serde::{Deserialize, Serialize};

/// Classification of a reply segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Comment,
    Command,
}

/// One classified unit of a parsed reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Comment,
            text: text.into(),
        }
    }

    pub fn command(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Command,
            text: text.into(),
        }
    }

    pub fn is_command(&self) -> bool {
        self.kind == SegmentKind::Command
    }
}

/// Returns true if a line opens or closes a fenced block
fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Parses a full reply into ordered comment/command segments
///
/// Text outside fences is Comment, the contents of each fenced block is one
/// Command segment with internal newlines retained verbatim. An opening fence
/// with no closing fence is treated fail-open: the remainder of the reply
/// becomes a single Command segment, on the assumption that the delimiter was
/// truncated rather than the command text.
///
/// Pure function, no I/O. Empty or whitespace-only replies produce an empty
/// sequence.
pub fn parse_reply(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut in_fence = false;

    let flush = |segments: &mut Vec<Segment>, buffer: &mut Vec<&str>, in_fence: bool| {
        let joined = buffer.join("\n");
        buffer.clear();

        // Blank edges around the fence markers belong to the delimiter,
        // not to the segment.
        let trimmed = joined.trim_matches(|c| c == '\n' || c == '\r' || c == ' ' || c == '\t');
        if trimmed.is_empty() {
            return;
        }

        if in_fence {
            segments.push(Segment::command(trimmed));
        } else {
            segments.push(Segment::comment(trimmed));
        }
    };

    for line in text.lines() {
        if is_fence(line) {
            flush(&mut segments, &mut buffer, in_fence);
            in_fence = !in_fence;
        } else {
            buffer.push(line);
        }
    }

    flush(&mut segments, &mut buffer, in_fence);

    segments
}
