//! Candidate extraction and typed decoding of JSON embedded in model output

use std::fmt;
use std::marker::PhantomData;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::policy::{BraceScan, ExtractionPolicy};
use crate::types::{Candidate, CandidateSource, ExtractError, ExtractionResult, Message};

// Opening marker, optional tag glued to it, then the shortest body up to the
// next closing marker.
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([A-Za-z][A-Za-z0-9_+.\-]*)?(.*?)```").expect("fence pattern is valid")
});

// ============================================================================
// Extraction
// ============================================================================

/// Locate the JSON candidate in `raw`.
///
/// Tries the first fenced block, then the first balanced `{...}` span, then
/// (only when `policy.require_object` is false) the trimmed full text.
pub fn extract_candidate<'a>(
    raw: &'a str,
    policy: &ExtractionPolicy,
) -> ExtractionResult<Candidate<'a>> {
    if raw.trim().is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    if let Some(candidate) = find_fenced(raw, policy) {
        tracing::debug!(len = candidate.text.len(), "using fenced block as JSON candidate");
        return Ok(candidate);
    }

    match find_object_span(raw, policy.brace_scan) {
        Ok(span) => Ok(Candidate::new(span, CandidateSource::BraceSpan)),
        Err(err) if !policy.require_object => {
            tracing::debug!(error = %err, "no JSON object found, using whole text");
            Ok(Candidate::new(raw.trim(), CandidateSource::WholeText))
        }
        Err(err) => Err(err),
    }
}

/// Decode an extracted candidate into `T`
pub fn decode_candidate<T: DeserializeOwned>(candidate: &Candidate<'_>) -> ExtractionResult<T> {
    serde_json::from_str(candidate.text).map_err(|e| ExtractError::decode(&e, candidate.text))
}

/// Extract the JSON candidate from `raw` and decode it into `T`
pub fn extract_and_decode<T: DeserializeOwned>(
    raw: &str,
    policy: &ExtractionPolicy,
) -> ExtractionResult<T> {
    let candidate = extract_candidate(raw, policy)?;
    decode_candidate(&candidate)
}

fn find_fenced<'a>(raw: &'a str, policy: &ExtractionPolicy) -> Option<Candidate<'a>> {
    let caps = FENCE_RE.captures(raw)?;
    let body = caps.get(2)?;

    // Unknown tags stay in the candidate, so `json`-only policies do not
    // swallow the first word of an untagged one-liner.
    let (start, language) = match caps.get(1) {
        Some(tag) if policy.strips_language(tag.as_str()) => (body.start(), Some(tag.as_str())),
        Some(tag) => (tag.start(), None),
        None => (body.start(), None),
    };

    Some(Candidate::new(
        raw[start..body.end()].trim(),
        CandidateSource::Fenced { language },
    ))
}

/// Find the first `{` and the `}` that brings depth back to zero.
///
/// Braces, quotes and backslashes are ASCII, so byte offsets are always
/// valid char boundaries.
fn find_object_span(raw: &str, scan: BraceScan) -> ExtractionResult<&str> {
    let start = raw.find('{').ok_or(ExtractError::NoCandidateFound)?;

    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in raw.as_bytes()[start..].iter().enumerate() {
        if scan == BraceScan::StringAware {
            if escaped {
                escaped = false;
                continue;
            }
            if in_string {
                match byte {
                    b'\\' => escaped = true,
                    b'"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            if *byte == b'"' {
                in_string = true;
                continue;
            }
        }

        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset;
                    return Ok(&raw[start..=end]);
                }
            }
            _ => {}
        }
    }

    Err(ExtractError::UnbalancedBraces { start })
}

// ============================================================================
// JsonOutputParser
// ============================================================================

/// Reusable parser bound to a policy and a target type
pub struct JsonOutputParser<T> {
    policy: ExtractionPolicy,
    _target: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> JsonOutputParser<T> {
    /// Create a parser with the default policy
    pub fn new() -> Self {
        Self::with_policy(ExtractionPolicy::default())
    }

    /// Create a parser with a custom policy
    pub fn with_policy(policy: ExtractionPolicy) -> Self {
        Self {
            policy,
            _target: PhantomData,
        }
    }

    pub fn policy(&self) -> &ExtractionPolicy {
        &self.policy
    }

    /// Parse raw model output
    pub fn parse(&self, raw: &str) -> ExtractionResult<T> {
        extract_and_decode(raw, &self.policy)
    }

    /// Parse the content of a message. A missing message is empty input.
    pub fn parse_message(&self, message: Option<&Message>) -> ExtractionResult<T> {
        match message {
            Some(msg) => self.parse(&msg.content),
            None => Err(ExtractError::EmptyInput),
        }
    }
}

impl<T: DeserializeOwned> Default for JsonOutputParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonOutputParser<T> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            _target: PhantomData,
        }
    }
}

impl<T> fmt::Debug for JsonOutputParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonOutputParser")
            .field("policy", &self.policy)
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
