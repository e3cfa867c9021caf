//! Simple MCP - a hello-world MCP server and a tolerant extractor for LLM JSON output
//!
//! Language models asked for JSON often wrap it in markdown fences or chatty
//! prose. The extractor finds the payload and decodes it into a caller-chosen
//! type, reporting *why* it failed when it cannot.
//!
//! ## Extraction order
//!
//! 1. The first fenced block (```` ```json ... ``` ```` or an untagged fence)
//! 2. The first balanced `{...}` span
//! 3. The trimmed full text, only when the policy does not require an object
//!
//! Brace scanning is string-aware by default: braces inside JSON string
//! literals do not count. [`BraceScan::Naive`] restores plain counting.
//!
//! ## Features
//!
//! - **`mcp-server`** (default) - stdio MCP server (`rmcp`), env config and
//!   log subscriber setup
//!
//! ## Example
//!
//! ```
//! use serde::Deserialize;
//! use simple_mcp::{extract_and_decode, ExtractionPolicy};
//!
//! #[derive(Deserialize)]
//! struct Report {
//!     answer: String,
//! }
//!
//! let raw = "Here is the result:\n```json\n{\"answer\": \"ok\"}\n```\nThanks.";
//! let report: Report = extract_and_decode(raw, &ExtractionPolicy::default()).unwrap();
//! assert_eq!(report.answer, "ok");
//! ```

// Core modules (always available)
pub mod error;
pub mod extract;
pub mod ids;
pub mod policy;
pub mod types;

// Re-export core types
pub use error::{AppError, ErrorCode};
pub use extract::{JsonOutputParser, decode_candidate, extract_and_decode, extract_candidate};
pub use policy::{BraceScan, DEFAULT_FENCE_LANGUAGE, ExtractionPolicy};
pub use types::{
    Candidate, CandidateSource, DecodeKind, ExtractError, ExtractionResult, Message, Role,
};

// Server-side modules (only when mcp-server feature is enabled)
#[cfg(feature = "mcp-server")]
pub mod config;
#[cfg(feature = "mcp-server")]
pub mod logging;
#[cfg(feature = "mcp-server")]
pub mod mcp;

#[cfg(feature = "mcp-server")]
pub use mcp::SimpleMcpService;
