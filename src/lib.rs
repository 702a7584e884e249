//! # jwtlens - Decode and Verify Compact JWTs
//!
//! > Decode, inspect, and symmetrically verify JSON Web Tokens in compact
//! > serialization.
//!
//! **jwtlens** takes the three-segment `header.payload.signature` text form
//! of a JWT, decodes the Base64URL segments into JSON objects, annotates
//! temporal claims with human-readable timestamps, and recomputes the HS256
//! signature for byte-exact comparison against the token's signature
//! segment. Decoding and verification are deliberately separate phases:
//! decoding never needs a secret, and a signature mismatch is a legitimate
//! outcome rather than an error.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwtlens::TokenInspector;
//!
//! let mut inspector = TokenInspector::new();
//!
//! let decoded = inspector.decode(token_str)?;
//! println!("claims: {:?}", decoded.payload());
//! if decoded.is_expired() {
//!     println!("warning: this token has expired");
//! }
//!
//! let result = inspector.verify("my-secret").await?;
//! println!("{}", result.message());
//! ```
//!
//! ## Workflow
//!
//! ```text
//! Idle
//!     │ .decode(token)        never needs a secret
//!     ▼
//! Decoded (header/payload parsed, claims annotated, expiry flagged)
//!     │ .verify(secret)       the one cryptographic step
//!     ▼
//! Verified (result recorded; re-decode discards everything)
//! ```
//!
//! Calling `verify` before a successful `decode` fails with
//! [`Error::NotDecoded`]; decoding a new token discards the prior token and
//! its verification result.
//!
//! ## Security
//!
//! - **Default deny**: only `HS256` has an entry in the algorithm
//!   capability table. Any other algorithm — including `none` and the
//!   asymmetric families — yields
//!   [`Verdict::UnsupportedAlgorithm`] without any cryptographic work.
//! - **Constant-time comparison**: the recomputed signature is compared via
//!   the [`constant_time_eq`](https://crates.io/crates/constant_time_eq)
//!   crate, even though both operands are public once the token has been
//!   transmitted.
//! - **Secret hygiene**: the secret is borrowed for the duration of one
//!   verify call and is never retained, logged, or cached.
//!
//! The `nbf` (not-before) claim is formatted for display but deliberately
//! not enforced; the expiration flag derives from `exp` alone.

// Core modules
pub mod claims;
pub mod error;
pub mod utils;

// Algorithm capability table and keyed-hash provider
pub mod algorithm;

// Token types
pub mod token;

// Verification
pub mod inspector;
pub mod verifier;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use algorithm::{MacFuture, MacProvider, RustCryptoProvider};
pub use error::{Error, Result};
pub use inspector::TokenInspector;
pub use token::DecodedToken;
pub use verifier::{SignatureVerifier, Verdict, VerificationResult};

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn sign_hs256(signing_input: &str, secret: &[u8]) -> String {
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
        mac.update(signing_input.as_bytes());
        utils::base64url::encode_bytes(&mac.finalize().into_bytes())
    }

    #[tokio::test]
    async fn test_full_flow_hs256() {
        let now = claims::now_millis() / 1000;
        let header = r#"{"alg":"HS256","typ":"JWT"}"#;
        let payload = format!(
            r#"{{"sub":"user123","exp":{},"iat":{}}}"#,
            now + 3600,
            now
        );

        let signing_input = format!(
            "{}.{}",
            utils::base64url::encode(header),
            utils::base64url::encode(&payload)
        );
        let signature = sign_hs256(&signing_input, b"my-secret-key");
        let token = format!("{signing_input}.{signature}");

        let mut inspector = TokenInspector::new();
        let decoded = inspector.decode(&token).unwrap();

        assert_eq!(decoded.algorithm(), Some("HS256"));
        assert!(!decoded.is_expired());
        assert!(decoded.payload().contains_key("exp_formatted"));

        let result = inspector.verify("my-secret-key").await.unwrap();
        assert_eq!(result.verdict(), &Verdict::Valid);
    }

    #[tokio::test]
    async fn test_decode_failure_leaves_no_partial_token() {
        let mut inspector = TokenInspector::new();
        let garbage = format!("{}.{}.sig", utils::base64url::encode("no json"), "!!!");

        assert!(matches!(
            inspector.decode(&garbage),
            Err(Error::HeaderDecode(_))
        ));
        assert!(inspector.decoded().is_none());
    }

    #[tokio::test]
    async fn test_expired_token_still_verifies() {
        // Expiration is a display flag, never a verification gate
        let now = claims::now_millis() / 1000;
        let header = r#"{"alg":"HS256"}"#;
        let payload = format!(r#"{{"exp":{}}}"#, now - 3600);

        let signing_input = format!(
            "{}.{}",
            utils::base64url::encode(header),
            utils::base64url::encode(&payload)
        );
        let signature = sign_hs256(&signing_input, b"secret");
        let token = format!("{signing_input}.{signature}");

        let mut inspector = TokenInspector::new();
        assert!(inspector.decode(&token).unwrap().is_expired());

        let result = inspector.verify("secret").await.unwrap();
        assert_eq!(result.verdict(), &Verdict::Valid);
    }
}
