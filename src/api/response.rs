//! Wire types for the assistant API
//!
//! The API answers a question with a list of typed lines. The client
//! assembles those lines into plain reply text, fencing runs of command
//! lines so the segment parser can recover them as atomic blocks.

use serde::{Deserialize, Serialize};

/// One line of an API reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplyLine {
    Comment { data: String },
    Command { data: String },
    EmptyLine,
}

/// A successful answer from the `/prompt/` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionResponse {
    #[serde(default)]
    pub response: Vec<ReplyLine>,

    /// Persona-flavored variant of the answer, preferred when present
    #[serde(default)]
    pub persona: Vec<ReplyLine>,

    #[serde(default)]
    pub latest_version: Option<String>,
}

/// Error payload the API returns in place of an answer
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: bool,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Response from the `/auth/` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub success: bool,

    #[serde(default)]
    pub error: Option<AuthError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthError {
    pub code: u32,
}

/// Assembles reply lines into plain text with fenced command blocks
///
/// Consecutive command lines become one fenced block so multi-line scripts
/// survive as a single segment. Comment text is stripped of any leading
/// `#` markers the backend may have left in.
pub fn assemble_reply(lines: &[ReplyLine]) -> String {
    let mut out = String::new();
    let mut fence_open = false;

    let close_fence = |out: &mut String, fence_open: &mut bool| {
        if *fence_open {
            out.push_str("```\n");
            *fence_open = false;
        }
    };

    for line in lines {
        match line {
            ReplyLine::Command { data } => {
                let data = data.trim();
                if data.is_empty() {
                    continue;
                }
                if !fence_open {
                    out.push_str("```\n");
                    fence_open = true;
                }
                out.push_str(data);
                out.push('\n');
            }
            ReplyLine::Comment { data } => {
                close_fence(&mut out, &mut fence_open);
                let data = data.trim().trim_start_matches('#').trim_start();
                out.push_str(data);
                out.push('\n');
            }
            ReplyLine::EmptyLine => {
                close_fence(&mut out, &mut fence_open);
                out.push('\n');
            }
        }
    }

    close_fence(&mut out, &mut fence_open);

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_reply, Segment};

    fn comment(data: &str) -> ReplyLine {
        ReplyLine::Comment {
            data: data.to_string(),
        }
    }

    fn command(data: &str) -> ReplyLine {
        ReplyLine::Command {
            data: data.to_string(),
        }
    }

    #[test]
    fn deserialize_reply_lines() {
        let json = r#"[
            {"type": "comment", "data": "List the files:"},
            {"type": "command", "data": "ls -la"},
            {"type": "empty_line"}
        ]"#;

        let lines: Vec<ReplyLine> = serde_json::from_str(json).unwrap();
        assert_eq!(
            lines,
            vec![
                comment("List the files:"),
                command("ls -la"),
                ReplyLine::EmptyLine,
            ]
        );
    }

    #[test]
    fn assemble_groups_consecutive_commands() {
        let text = assemble_reply(&[
            comment("Use this:"),
            command("ls -la"),
            command("pwd"),
            comment("Done."),
        ]);

        assert_eq!(text, "Use this:\n```\nls -la\npwd\n```\nDone.");
    }

    #[test]
    fn assemble_separates_command_runs() {
        let text = assemble_reply(&[
            command("ls"),
            comment("then"),
            command("pwd"),
        ]);

        assert_eq!(text, "```\nls\n```\nthen\n```\npwd\n```");
    }

    #[test]
    fn assemble_strips_comment_hash_markers() {
        let text = assemble_reply(&[comment("# already marked")]);
        assert_eq!(text, "already marked");
    }

    #[test]
    fn assemble_closes_trailing_fence() {
        let text = assemble_reply(&[comment("Run:"), command("uptime")]);
        assert!(text.ends_with("```"));
    }

    #[test]
    fn assembled_text_parses_back_into_segments() {
        let text = assemble_reply(&[
            comment("Use this:"),
            command("ls -la"),
            command("pwd"),
            ReplyLine::EmptyLine,
            comment("Done."),
        ]);

        assert_eq!(
            parse_reply(&text),
            vec![
                Segment::comment("Use this:"),
                Segment::command("ls -la\npwd"),
                Segment::comment("Done."),
            ]
        );
    }

    #[test]
    fn deserialize_error_response() {
        let json = r#"{"error": true, "type": "auth", "message": "You are not authenticated"}"#;
        let err: ErrorResponse = serde_json::from_str(json).unwrap();
        assert!(err.error);
        assert_eq!(err.kind.as_deref(), Some("auth"));
    }

    #[test]
    fn deserialize_auth_response() {
        let json = r#"{"success": false, "error": {"code": 2}}"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.unwrap().code, 2);
    }
}
