//! Two-phase decode/verify orchestrator
//!
//! [`TokenInspector`] sequences the parser and the signature verifier into
//! the Idle → Decoded → Verified workflow. Decoding never needs a secret;
//! verification is valid only once a token is held. Decoding again discards
//! the prior token and any prior verification result, so no verification
//! state ever carries over between tokens.

use crate::algorithm::{MacProvider, RustCryptoProvider};
use crate::error::{Error, Result};
use crate::token::DecodedToken;
use crate::verifier::{SignatureVerifier, VerificationResult};

/// Orchestrates compact-token decoding and signature verification
///
/// Holds at most one decoded token and the verification result produced
/// for it. Each inspector is independent; concurrent inspectors never
/// interact.
pub struct TokenInspector<P = RustCryptoProvider> {
    verifier: SignatureVerifier<P>,
    decoded: Option<DecodedToken>,
    verification: Option<VerificationResult>,
}

impl TokenInspector {
    /// Inspector with the default keyed-hash provider
    pub fn new() -> Self {
        Self {
            verifier: SignatureVerifier::new(),
            decoded: None,
            verification: None,
        }
    }
}

impl Default for TokenInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MacProvider> TokenInspector<P> {
    /// Inspector with a caller-supplied keyed-hash provider
    pub fn with_provider(provider: P) -> Self {
        Self {
            verifier: SignatureVerifier::with_provider(provider),
            decoded: None,
            verification: None,
        }
    }

    /// Decode a token, replacing any previously held token and result
    ///
    /// On failure the prior state is already discarded and the inspector
    /// is back to idle.
    pub fn decode(&mut self, token: &str) -> Result<&DecodedToken> {
        self.decoded = None;
        self.verification = None;

        let decoded = DecodedToken::from_compact(token)?;
        Ok(self.decoded.insert(decoded))
    }

    /// Verify the held token's signature with `secret`
    ///
    /// Fails with [`Error::NotDecoded`] when no token is held; nothing is
    /// computed in that case. May be called again to re-verify with a
    /// different secret; each call replaces the stored result.
    pub async fn verify(&mut self, secret: &str) -> Result<VerificationResult> {
        let decoded = self.decoded.as_ref().ok_or(Error::NotDecoded)?;

        let result = self
            .verifier
            .verify(
                decoded.header_segment(),
                decoded.payload_segment(),
                decoded.signature_segment(),
                decoded.algorithm(),
                secret,
            )
            .await?;

        self.verification = Some(result.clone());
        Ok(result)
    }

    /// The currently held decoded token, if any
    pub fn decoded(&self) -> Option<&DecodedToken> {
        self.decoded.as_ref()
    }

    /// The verification result for the currently held token, if any
    pub fn verification(&self) -> Option<&VerificationResult> {
        self.verification.as_ref()
    }
}
