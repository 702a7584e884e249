//! Algorithm capability table and verification strategies
//!
//! The table maps an algorithm name from the token header to its
//! verification strategy. Names without an entry are denied by default;
//! no cryptographic work is ever attempted for them. The table currently
//! holds a single entry, HS256, but new strategies slot in without
//! touching the deny path.

mod hmac;
pub mod provider;

pub use provider::{MacFuture, MacProvider, RustCryptoProvider};

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;

/// Boxed future returned by signature strategies
pub(crate) type VerifyFuture<'a> = Pin<Box<dyn Future<Output = Result<bool>> + Send + 'a>>;

/// A signature verification strategy for one algorithm
pub(crate) trait SignatureScheme: Send + Sync {
    /// Algorithm identifier as it appears in the token header
    fn name(&self) -> &'static str;

    /// Whether `signature` matches the keyed hash of `signing_input`
    ///
    /// Resolves to `Ok(false)` on mismatch; `Err` is reserved for provider
    /// failures.
    fn matches<'a>(
        &'a self,
        provider: &'a dyn MacProvider,
        signing_input: &'a str,
        signature: &'a str,
        secret: &'a [u8],
    ) -> VerifyFuture<'a>;
}

/// Look up the verification strategy for an algorithm name
pub(crate) fn scheme_for(name: &str) -> Option<&'static dyn SignatureScheme> {
    match name {
        "HS256" => Some(&hmac::HmacSha256),
        _ => None,
    }
}

/// Whether an algorithm name has a verification strategy
pub fn is_supported(name: &str) -> bool {
    scheme_for(name).is_some()
}
