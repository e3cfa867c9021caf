//! Transaction and random ID helpers

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;

use crate::error::{AppError, ErrorCode};

/// Alphabet for base-36 IDs
pub const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Render a mix of `timestamp` and `counter` in base 36.
///
/// A mix of zero renders as the empty string.
pub fn format_id(timestamp: i64, counter: i64) -> String {
    let mut x = (timestamp.wrapping_shl(13) ^ (timestamp >> 7) ^ counter) as u64;
    let mut buf = Vec::with_capacity(13);
    while x > 0 {
        buf.push(ID_ALPHABET[(x % 36) as usize]);
        x /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

/// ID from the current wall-clock nanoseconds and `counter`
pub fn generate_id(counter: i64) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or_default();
    format_id(nanos, counter)
}

/// Random URL-safe ID of exactly `len` characters
pub fn random_id(len: usize) -> Result<String, AppError> {
    if len == 0 {
        return Err(AppError::invalid_parameter("length must be positive"));
    }

    let mut bytes = vec![0u8; len];
    getrandom::getrandom(&mut bytes).map_err(|e| {
        AppError::new(
            ErrorCode::Internal,
            "failed to generate random bytes",
            Some(&e),
        )
    })?;

    let mut encoded = URL_SAFE.encode(&bytes);
    encoded.truncate(len);
    Ok(encoded)
}

/// Shared-counter generator for per-request transaction IDs
#[derive(Debug, Clone, Default)]
pub struct TrIdGenerator {
    counter: Arc<AtomicI64>,
}

impl TrIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next transaction ID
    pub fn next_id(&self) -> String {
        let counter = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        generate_id(counter)
    }

    /// Number of IDs issued so far
    pub fn issued(&self) -> i64 {
        self.counter.load(Ordering::Relaxed)
    }
}
