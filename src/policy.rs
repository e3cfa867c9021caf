//! Extraction policy: which fence tags to strip and how strictly to look for objects

use std::collections::BTreeSet;

/// Fence language tag stripped by default
pub const DEFAULT_FENCE_LANGUAGE: &str = "json";

/// How the brace scanner treats string literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BraceScan {
    /// Braces inside double-quoted strings are ignored; backslash escapes are honored
    #[default]
    StringAware,
    /// Every `{` and `}` counts toward depth, including those inside strings
    Naive,
}

/// Options controlling candidate extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPolicy {
    /// Fence tags removed from the start of a fenced block, matched
    /// ASCII case-insensitively
    pub fence_languages: BTreeSet<String>,
    /// A bare response must contain a balanced `{...}` span. When false the
    /// trimmed full text is used as a last resort.
    pub require_object: bool,
    /// Brace scanning mode
    pub brace_scan: BraceScan,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            fence_languages: BTreeSet::from([DEFAULT_FENCE_LANGUAGE.to_string()]),
            require_object: true,
            brace_scan: BraceScan::StringAware,
        }
    }
}

impl ExtractionPolicy {
    /// Create a policy with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain brace counting: braces inside strings count toward depth
    pub fn naive() -> Self {
        Self {
            brace_scan: BraceScan::Naive,
            ..Default::default()
        }
    }

    /// Accept anything: falls back to the whole text when no object is found
    pub fn lenient() -> Self {
        Self {
            require_object: false,
            ..Default::default()
        }
    }

    /// Builder: replace the set of stripped fence tags
    pub fn with_fence_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fence_languages = languages
            .into_iter()
            .map(|l| l.as_ref().trim().to_ascii_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        self
    }

    /// Builder: set whether a bare response needs a balanced object
    pub fn with_require_object(mut self, require: bool) -> Self {
        self.require_object = require;
        self
    }

    /// Builder: set brace scanning mode
    pub fn with_brace_scan(mut self, scan: BraceScan) -> Self {
        self.brace_scan = scan;
        self
    }

    /// Whether `tag` is stripped from a fence opener
    pub fn strips_language(&self, tag: &str) -> bool {
        self.fence_languages
            .iter()
            .any(|language| language.eq_ignore_ascii_case(tag))
    }
}
