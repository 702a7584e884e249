//! Signature verification over raw compact segments
//!
//! The verifier recomputes the keyed-hash signature from the header and
//! payload segments exactly as received and compares it to the signature
//! segment. Checks run in a fixed order: algorithm allowlist first (unknown
//! algorithms are denied before any cryptographic work), then the secret
//! precondition, then the single provider invocation.

use tracing::debug;

use crate::algorithm::{scheme_for, MacProvider, RustCryptoProvider};
use crate::error::{Error, Result};

/// Outcome tag of one verification call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Recomputed signature matches the token's signature segment
    Valid,

    /// Signatures differ; a legitimate negative outcome, not an error
    Invalid,

    /// The token's algorithm is not in the allowlist; nothing was computed
    UnsupportedAlgorithm,
}

/// Caller-facing result of one verification call
///
/// Created fresh per call; carries the outcome tag and a human-readable
/// message suitable for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    verdict: Verdict,
    message: String,
}

impl VerificationResult {
    fn valid() -> Self {
        Self {
            verdict: Verdict::Valid,
            message: "Signature is valid.".to_string(),
        }
    }

    fn invalid() -> Self {
        Self {
            verdict: Verdict::Invalid,
            message: "Signature verification failed: the signature does not match.".to_string(),
        }
    }

    fn unsupported(algorithm: Option<&str>) -> Self {
        let message = match algorithm {
            Some(found) => {
                format!("Only HS256 signatures can be verified; the token uses {found}.")
            }
            None => "Only HS256 signatures can be verified; the token does not declare an algorithm."
                .to_string(),
        };
        Self {
            verdict: Verdict::UnsupportedAlgorithm,
            message,
        }
    }

    /// The outcome tag
    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    /// Whether the signature matched
    pub fn is_valid(&self) -> bool {
        self.verdict == Verdict::Valid
    }

    /// Human-readable outcome message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Recomputes and compares keyed-hash signatures
///
/// Generic over the [`MacProvider`] so platforms with an asynchronous
/// crypto backend can supply their own; defaults to the
/// `hmac`/`sha2`-backed [`RustCryptoProvider`].
pub struct SignatureVerifier<P = RustCryptoProvider> {
    provider: P,
}

impl SignatureVerifier {
    /// Verifier with the default provider
    pub fn new() -> Self {
        Self {
            provider: RustCryptoProvider,
        }
    }
}

impl Default for SignatureVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MacProvider> SignatureVerifier<P> {
    /// Verifier with a caller-supplied provider
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Verify a signature against the raw segments as received
    ///
    /// The signing input is the byte-exact `header_segment + "." +
    /// payload_segment`; the segments are never re-encoded. The secret is
    /// interpreted as raw UTF-8 key bytes and is not retained after the
    /// call. An unsupported or absent algorithm yields a successful
    /// [`UnsupportedAlgorithm`](Verdict::UnsupportedAlgorithm) result; an
    /// empty secret is the procedural error [`Error::MissingSecret`].
    pub async fn verify(
        &self,
        header_segment: &str,
        payload_segment: &str,
        signature_segment: &str,
        algorithm: Option<&str>,
        secret: &str,
    ) -> Result<VerificationResult> {
        let Some(scheme) = algorithm.and_then(scheme_for) else {
            debug!(algorithm, "verification refused: algorithm not in allowlist");
            return Ok(VerificationResult::unsupported(algorithm));
        };

        if secret.is_empty() {
            return Err(Error::MissingSecret);
        }

        let signing_input = format!("{header_segment}.{payload_segment}");
        let matched = scheme
            .matches(
                &self.provider,
                &signing_input,
                signature_segment,
                secret.as_bytes(),
            )
            .await?;

        debug!(
            algorithm = scheme.name(),
            valid = matched,
            "signature verification completed"
        );

        Ok(if matched {
            VerificationResult::valid()
        } else {
            VerificationResult::invalid()
        })
    }
}
