//! Core types for structured-output extraction

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A chat message as returned by an upstream model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the message
    pub role: Role,
    /// Raw text content
    pub content: String,
}

impl Message {
    /// Create a new message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Which extraction path produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource<'a> {
    /// Inner content of the first fenced block. `language` is set when a
    /// recognized tag was stripped.
    Fenced { language: Option<&'a str> },
    /// First balanced `{...}` span
    BraceSpan,
    /// Trimmed full text (only when the policy does not require an object)
    WholeText,
}

/// Substring of a raw response that is expected to hold the JSON payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Candidate text, already trimmed
    pub text: &'a str,
    /// Path that produced it
    pub source: CandidateSource<'a>,
}

impl<'a> Candidate<'a> {
    pub fn new(text: &'a str, source: CandidateSource<'a>) -> Self {
        Self { text, source }
    }
}

/// Why a candidate failed to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeKind {
    /// Not valid JSON (malformed or truncated)
    Syntax,
    /// Valid JSON that does not fit the target type
    Shape,
}

impl From<serde_json::error::Category> for DecodeKind {
    fn from(category: serde_json::error::Category) -> Self {
        use serde_json::error::Category;
        match category {
            Category::Data => DecodeKind::Shape,
            Category::Syntax | Category::Eof | Category::Io => DecodeKind::Syntax,
        }
    }
}

/// Errors that can occur during extraction and decoding
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Response is empty")]
    EmptyInput,

    #[error("No fenced block or JSON object found in response")]
    NoCandidateFound,

    #[error("Unbalanced braces: '{{' at byte {start} is never closed")]
    UnbalancedBraces { start: usize },

    #[error("Failed to decode JSON candidate: {message}")]
    Decode {
        /// Underlying decoder message
        message: String,
        /// The text that was handed to the decoder
        candidate: String,
        kind: DecodeKind,
    },
}

impl ExtractError {
    /// Create a decode error from a serde_json failure
    pub fn decode(err: &serde_json::Error, candidate: &str) -> Self {
        Self::Decode {
            message: err.to_string(),
            candidate: candidate.to_string(),
            kind: err.classify().into(),
        }
    }

    /// True when extraction produced a candidate that failed to decode
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Result type for extraction operations
pub type ExtractionResult<T> = Result<T, ExtractError>;
