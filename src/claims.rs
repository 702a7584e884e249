//! Claim evaluation: derived display timestamps and the expiration flag
//!
//! Pure functions over the decoded payload. The numeric temporal claims
//! (`exp`, `iat`, `nbf`) are interpreted as seconds since the Unix epoch;
//! each present claim gains a companion `*_formatted` field for display
//! while the numeric original stays untouched. The `nbf` claim is displayed
//! but never enforced.

use chrono::DateTime;
use serde_json::{Map, Value};

/// Expiration time claim name (RFC 7519 `exp`)
pub const EXPIRATION: &str = "exp";

/// Issued-at claim name (RFC 7519 `iat`)
pub const ISSUED_AT: &str = "iat";

/// Not-before claim name (RFC 7519 `nbf`)
pub const NOT_BEFORE: &str = "nbf";

const DISPLAY_CLAIMS: [(&str, &str); 3] = [
    (EXPIRATION, "exp_formatted"),
    (ISSUED_AT, "iat_formatted"),
    (NOT_BEFORE, "nbf_formatted"),
];

fn claim_seconds(payload: &Map<String, Value>, claim: &str) -> Option<f64> {
    payload.get(claim).and_then(Value::as_f64)
}

fn format_timestamp(seconds: f64) -> Option<String> {
    let utc = DateTime::from_timestamp(seconds.trunc() as i64, 0)?;
    Some(utc.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

/// Attach a human-readable `*_formatted` field for each numeric temporal
/// claim present in the payload
///
/// A claim whose value is not a JSON number, or falls outside the
/// representable timestamp range, gets no derived field.
pub fn annotate_timestamps(payload: &mut Map<String, Value>) {
    for (claim, derived) in DISPLAY_CLAIMS {
        let Some(seconds) = claim_seconds(payload, claim) else {
            continue;
        };
        if let Some(text) = format_timestamp(seconds) {
            payload.insert(derived.to_string(), Value::String(text));
        }
    }
}

/// Whether the payload's `exp` claim lies in the past
///
/// Absent or non-numeric `exp` means not expired. The flag is independent
/// of signature validity and never blocks verification.
pub fn payload_expired(payload: &Map<String, Value>, now_millis: i64) -> bool {
    match claim_seconds(payload, EXPIRATION) {
        Some(expiration) => now_millis as f64 > expiration * 1000.0,
        None => false,
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
