use serde_json::{Map, Value};
use tracing::debug;

use crate::claims;
use crate::error::{Error, Result};
use crate::utils::base64url;

/// A compact-serialization token that decoded successfully
///
/// Holds the parsed header and payload objects, the three raw segments as
/// received, and the expiration flag. The payload carries the derived
/// `*_formatted` display fields added by claim evaluation. Values are
/// immutable once created; decoding another token produces a new value.
///
/// The signature segment is retained verbatim and never decoded here; its
/// still-encoded text is what verification compares against.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    header: Map<String, Value>,
    payload: Map<String, Value>,
    header_b64: String,
    payload_b64: String,
    signature_b64: String,
    expired: bool,
}

fn decode_object(segment: &str) -> std::result::Result<Map<String, Value>, String> {
    let text = base64url::decode(segment).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

impl DecodedToken {
    /// Decode a token in compact serialization
    ///
    /// Splits on `.` and requires exactly three non-empty segments, then
    /// Base64URL-decodes and JSON-parses header and payload. Failures are
    /// atomic and name the failing segment. No secret is involved and no
    /// signature check happens here.
    pub fn from_compact(token: &str) -> Result<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
            return Err(Error::MalformedToken);
        }

        let header = decode_object(parts[0]).map_err(Error::HeaderDecode)?;
        let mut payload = decode_object(parts[1]).map_err(Error::PayloadDecode)?;

        claims::annotate_timestamps(&mut payload);
        let expired = claims::payload_expired(&payload, claims::now_millis());

        debug!(
            algorithm = header.get("alg").and_then(serde_json::Value::as_str),
            expired, "decoded compact token"
        );

        Ok(Self {
            header,
            payload,
            header_b64: parts[0].to_string(),
            payload_b64: parts[1].to_string(),
            signature_b64: parts[2].to_string(),
            expired,
        })
    }

    /// Parsed header object
    pub fn header(&self) -> &Map<String, Value> {
        &self.header
    }

    /// Parsed payload object, including the derived `*_formatted` fields
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// The `alg` header field, when present as a string
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// Raw header segment as received
    pub fn header_segment(&self) -> &str {
        &self.header_b64
    }

    /// Raw payload segment as received
    pub fn payload_segment(&self) -> &str {
        &self.payload_b64
    }

    /// Raw signature segment as received, still Base64URL-encoded
    pub fn signature_segment(&self) -> &str {
        &self.signature_b64
    }

    /// Whether the `exp` claim lies in the past
    ///
    /// Computed at decode time, independent of signature validity.
    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(header: &str, payload: &str, signature: &str) -> String {
        format!(
            "{}.{}.{}",
            base64url::encode(header),
            base64url::encode(payload),
            base64url::encode(signature)
        )
    }

    #[test]
    fn test_decode_valid_token() {
        let token = compact(
            r#"{"alg":"HS256","typ":"JWT"}"#,
            r#"{"sub":"1234567890","name":"John Doe"}"#,
            "sig",
        );
        let decoded = DecodedToken::from_compact(&token).unwrap();

        assert_eq!(decoded.algorithm(), Some("HS256"));
        assert_eq!(
            decoded.header().get("typ").and_then(Value::as_str),
            Some("JWT")
        );
        assert_eq!(
            decoded.payload().get("sub").and_then(Value::as_str),
            Some("1234567890")
        );
        assert_eq!(decoded.signature_segment(), base64url::encode("sig"));
        assert!(!decoded.is_expired());
    }

    #[test]
    fn test_wrong_segment_count_is_malformed() {
        assert!(matches!(
            DecodedToken::from_compact("only.two"),
            Err(Error::MalformedToken)
        ));
        assert!(matches!(
            DecodedToken::from_compact("one.two.three.four"),
            Err(Error::MalformedToken)
        ));
        assert!(matches!(
            DecodedToken::from_compact(""),
            Err(Error::MalformedToken)
        ));
    }

    #[test]
    fn test_empty_segment_is_malformed() {
        let token = compact(r#"{"alg":"HS256"}"#, r#"{"sub":"user"}"#, "sig");
        let trailing_dot = format!("{}.", token.rsplit_once('.').unwrap().0);
        assert!(matches!(
            DecodedToken::from_compact(&trailing_dot),
            Err(Error::MalformedToken)
        ));
    }

    #[test]
    fn test_bad_header_base64() {
        let payload = base64url::encode(r#"{"sub":"user"}"#);
        let token = format!("!!!.{payload}.sig");
        assert!(matches!(
            DecodedToken::from_compact(&token),
            Err(Error::HeaderDecode(_))
        ));
    }

    #[test]
    fn test_bad_header_json() {
        let token = compact("not json", r#"{"sub":"user"}"#, "sig");
        assert!(matches!(
            DecodedToken::from_compact(&token),
            Err(Error::HeaderDecode(_))
        ));
    }

    #[test]
    fn test_bad_payload_json_names_payload() {
        let token = compact(r#"{"alg":"HS256"}"#, "not json", "sig");
        assert!(matches!(
            DecodedToken::from_compact(&token),
            Err(Error::PayloadDecode(_))
        ));
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let token = compact(r#"{"alg":"HS256"}"#, r#"[1,2,3]"#, "sig");
        assert!(matches!(
            DecodedToken::from_compact(&token),
            Err(Error::PayloadDecode(_))
        ));
    }

    #[test]
    fn test_missing_alg_decodes_fine() {
        // The algorithm gap only matters at verification time
        let token = compact(r#"{"typ":"JWT"}"#, r#"{"sub":"user"}"#, "sig");
        let decoded = DecodedToken::from_compact(&token).unwrap();
        assert_eq!(decoded.algorithm(), None);
    }

    #[test]
    fn test_expired_flag_and_formatted_claims() {
        let now = claims::now_millis() / 1000;
        let token = compact(
            r#"{"alg":"HS256"}"#,
            &format!(r#"{{"exp":{},"iat":{}}}"#, now - 1, now - 60),
            "sig",
        );
        let decoded = DecodedToken::from_compact(&token).unwrap();

        assert!(decoded.is_expired());
        assert!(decoded.payload().contains_key("exp_formatted"));
        assert!(decoded.payload().contains_key("iat_formatted"));
        assert_eq!(
            decoded.payload().get("exp").and_then(Value::as_i64),
            Some(now - 1)
        );
    }

    #[test]
    fn test_future_expiration_not_expired() {
        let now = claims::now_millis() / 1000;
        let token = compact(
            r#"{"alg":"HS256"}"#,
            &format!(r#"{{"exp":{}}}"#, now + 3600),
            "sig",
        );
        assert!(!DecodedToken::from_compact(&token).unwrap().is_expired());
    }
}
