//! Application error codes
//!
//! Codes are 4-digit strings aligned with HTTP status classes:
//! `04xx` for client errors and `05xx` for server errors.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ExtractError;

/// 4-digit application error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// No code attached (`0000`)
    Unknown,
    /// Bad request (`0400`)
    InvalidParameter,
    /// Not found (`0404`)
    NotFound,
    /// Conflict (`0409`)
    Constraint,
    /// Internal server error (`0500`)
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Unknown => "0000",
            ErrorCode::InvalidParameter => "0400",
            ErrorCode::NotFound => "0404",
            ErrorCode::Constraint => "0409",
            ErrorCode::Internal => "0500",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error carrying an application code
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    /// Create an error; with a source the message becomes `"{message}: {source}"`
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        source: Option<&dyn StdError>,
    ) -> Self {
        let message = message.into();
        let message = match source {
            Some(err) => format!("{message}: {err}"),
            None => message,
        };
        Self { code, message }
    }

    /// Wrap an error with context.
    ///
    /// An explicit `code` wins. Otherwise an `AppError` source keeps its own
    /// code and anything else becomes `Internal`.
    pub fn wrap<E>(err: &E, message: impl AsRef<str>, code: Option<ErrorCode>) -> Self
    where
        E: StdError + 'static,
    {
        let code = code.unwrap_or_else(|| match code_of(err) {
            ErrorCode::Unknown => ErrorCode::Internal,
            existing => existing,
        });
        Self {
            code,
            message: format!("{}: {}", message.as_ref(), err),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParameter, message, None)
    }

    /// Message prefixed with the code, e.g. `[0400] name is required`
    pub fn coded_message(&self) -> String {
        format!("[{}] {}", self.code, self.message)
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        Self::new(ErrorCode::InvalidParameter, err.to_string(), None)
    }
}

/// Code of the first `AppError` in `err`'s source chain, or `Unknown`
pub fn code_of(err: &(dyn StdError + 'static)) -> ErrorCode {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(app) = e.downcast_ref::<AppError>() {
            return app.code;
        }
        current = e.source();
    }
    ErrorCode::Unknown
}

pub fn has_code(err: &(dyn StdError + 'static), code: ErrorCode) -> bool {
    code_of(err) == code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_strings() {
        assert_eq!(ErrorCode::Unknown.as_str(), "0000");
        assert_eq!(ErrorCode::InvalidParameter.to_string(), "0400");
        assert_eq!(ErrorCode::NotFound.as_str(), "0404");
        assert_eq!(ErrorCode::Constraint.as_str(), "0409");
        assert_eq!(ErrorCode::Internal.as_str(), "0500");
    }

    #[test]
    fn test_new_with_and_without_source() {
        let plain = AppError::new(ErrorCode::NotFound, "user missing", None);
        assert_eq!(plain.to_string(), "user missing");

        let io = std::io::Error::other("disk gone");
        let with_source = AppError::new(ErrorCode::Internal, "save failed", Some(&io));
        assert_eq!(with_source.to_string(), "save failed: disk gone");
    }

    #[test]
    fn test_wrap_explicit_code_wins() {
        let inner = AppError::new(ErrorCode::NotFound, "missing", None);
        let wrapped = AppError::wrap(&inner, "lookup", Some(ErrorCode::Constraint));
        assert_eq!(wrapped.code, ErrorCode::Constraint);
        assert_eq!(wrapped.message, "lookup: missing");
    }

    #[test]
    fn test_wrap_preserves_existing_code() {
        let inner = AppError::new(ErrorCode::NotFound, "missing", None);
        let wrapped = AppError::wrap(&inner, "failed to ask", None);
        assert_eq!(wrapped.code, ErrorCode::NotFound);

        let twice = AppError::wrap(&wrapped, "outer", None);
        assert_eq!(twice.code, ErrorCode::NotFound);
        assert_eq!(twice.message, "outer: failed to ask: missing");
    }

    #[test]
    fn test_wrap_foreign_error_is_internal() {
        let io = std::io::Error::other("boom");
        let wrapped = AppError::wrap(&io, "failed to generate content", None);
        assert_eq!(wrapped.code, ErrorCode::Internal);
    }

    #[test]
    fn test_code_of_and_has_code() {
        let io = std::io::Error::other("boom");
        assert_eq!(code_of(&io), ErrorCode::Unknown);

        let app = AppError::invalid_parameter("bad");
        assert!(has_code(&app, ErrorCode::InvalidParameter));
        assert!(!has_code(&app, ErrorCode::Internal));
    }

    #[derive(Debug, Error)]
    #[error("request failed")]
    struct RequestError(#[source] AppError);

    #[test]
    fn test_code_of_walks_source_chain() {
        let outer = RequestError(AppError::new(ErrorCode::NotFound, "user missing", None));
        assert_eq!(code_of(&outer), ErrorCode::NotFound);
        assert!(has_code(&outer, ErrorCode::NotFound));

        let wrapped = AppError::wrap(&outer, "lookup", None);
        assert_eq!(wrapped.code, ErrorCode::NotFound);
        assert_eq!(wrapped.message, "lookup: request failed");
    }

    #[test]
    fn test_from_extract_error() {
        let app: AppError = ExtractError::NoCandidateFound.into();
        assert_eq!(app.code, ErrorCode::InvalidParameter);
        assert_eq!(
            app.coded_message(),
            "[0400] No fenced block or JSON object found in response"
        );
    }
}
