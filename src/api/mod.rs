//! Assistant API transport
//!
//! Narrow blocking HTTP client plus the wire types it speaks. The rest of
//! the tool only sees assembled reply text and typed errors.

mod client;
mod metadata;
mod response;

pub use client::{Answer, ApiClient, ApiError};
pub use metadata::Metadata;
pub use response::{assemble_reply, QuestionResponse, ReplyLine};
