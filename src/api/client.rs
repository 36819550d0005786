//! HTTP client for the assistant API
//!
//! The whole tool is synchronous, so the client uses reqwest's blocking
//! mode: one POST per question, one per login. Transport failures surface
//! as typed errors distinct from a normal reply; no partial parsing of a
//! failed response is attempted.

use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::storage::{Config, HistoryEntry};

use super::metadata::Metadata;
use super::response::{AuthResponse, ErrorResponse, QuestionResponse, ReplyLine};

const DEFAULT_HOST: &str = "https://api.shellmate.dev";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("You are not authenticated. Run: shellmate login")]
    NotAuthenticated,

    #[error("Invalid auth token. Visit your dashboard to retrieve a valid one")]
    InvalidToken,

    #[error("Your account has no active subscription")]
    NoSubscription,

    #[error("The server took too long to answer. Try again a little later")]
    Timeout,

    #[error("Server error: {0}")]
    Server(String),

    #[error("Your history confused the assistant. Try again with --new")]
    History,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A completed answer, assembled into parseable reply text
#[derive(Debug, Clone)]
pub struct Answer {
    /// The plain answer text
    pub reply: String,

    /// The persona-flavored answer text, when one was produced
    pub persona_reply: Option<String>,

    /// Newest released version reported by the server
    pub latest_version: Option<String>,
}

/// History entry shape the API expects
#[derive(Debug, Serialize)]
struct WireHistoryEntry<'a> {
    question: &'a str,
    answer: &'a str,
    persona: Option<&'a str>,
}

/// Client for the assistant API
pub struct ApiClient {
    http: reqwest::blocking::Client,
    host: String,
}

impl ApiClient {
    /// Creates a client, honoring `SHELLMATE_API_HOST` for self-hosted or
    /// test servers
    pub fn new() -> Result<Self, ApiError> {
        let host =
            std::env::var("SHELLMATE_API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, host })
    }

    /// Sends a question and returns the assembled answer
    ///
    /// The token is checked before any network traffic so an unauthenticated
    /// user gets an immediate, actionable error.
    pub fn question(
        &self,
        config: &Config,
        question: &str,
        history: &[HistoryEntry],
        metadata: Option<&Metadata>,
    ) -> Result<Answer, ApiError> {
        let token = match config.token.as_deref() {
            Some(token) if !token.is_empty() => token,
            _ => return Err(ApiError::NotAuthenticated),
        };

        let wire_history: Vec<WireHistoryEntry> = history
            .iter()
            .map(|entry| WireHistoryEntry {
                question: &entry.question,
                answer: &entry.answer,
                persona: entry.persona.as_deref(),
            })
            .collect();

        let body = json!({
            "token": token,
            "version": env!("CARGO_PKG_VERSION"),
            "persona": config.persona,
            "question": question,
            "history": wire_history,
            "metadata": metadata,
        });

        let response = self
            .http
            .post(format!("{}/prompt/", self.host))
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout
                } else {
                    ApiError::Http(e)
                }
            })?;

        let payload: serde_json::Value = response.json()?;

        // The API signals failure in-band with an error object
        if payload.get("error").and_then(|v| v.as_bool()) == Some(true) {
            let err: ErrorResponse = serde_json::from_value(payload)
                .map_err(|e| ApiError::Server(e.to_string()))?;
            return Err(match err.kind.as_deref() {
                Some("auth") => ApiError::NotAuthenticated,
                Some("timeout") => ApiError::Timeout,
                Some("history") => ApiError::History,
                _ => ApiError::Server(
                    err.message
                        .unwrap_or_else(|| "unknown server error".to_string()),
                ),
            });
        }

        let parsed: QuestionResponse =
            serde_json::from_value(payload).map_err(|e| ApiError::Server(e.to_string()))?;

        Ok(Answer {
            reply: super::assemble_reply(&parsed.response),
            persona_reply: assemble_optional(&parsed.persona),
            latest_version: parsed.latest_version,
        })
    }

    /// Validates an auth token against the API
    pub fn login(&self, token: &str) -> Result<(), ApiError> {
        let response: AuthResponse = self
            .http
            .post(format!("{}/auth/", self.host))
            .json(&json!({ "token": token }))
            .send()?
            .json()?;

        if response.success {
            return Ok(());
        }

        match response.error.map(|e| e.code) {
            Some(1) => Err(ApiError::NotAuthenticated),
            Some(2) => Err(ApiError::InvalidToken),
            Some(3) => Err(ApiError::NoSubscription),
            _ => Err(ApiError::Server("unknown auth failure".to_string())),
        }
    }
}

fn assemble_optional(lines: &[ReplyLine]) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    let text = super::assemble_reply(lines);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_without_token_fails_before_network() {
        let config = Config::default();
        let client = ApiClient::new().unwrap();

        let result = client.question(&config, "how do I list files", &[], None);
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
    }

    #[test]
    fn empty_token_counts_as_unauthenticated() {
        let mut config = Config::default();
        config.token = Some(String::new());
        let client = ApiClient::new().unwrap();

        let result = client.question(&config, "anything", &[], None);
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
    }

    #[test]
    fn assemble_optional_skips_empty() {
        assert_eq!(assemble_optional(&[]), None);
        assert_eq!(
            assemble_optional(&[ReplyLine::Comment {
                data: "arr".to_string()
            }]),
            Some("arr".to_string())
        );
    }
}
