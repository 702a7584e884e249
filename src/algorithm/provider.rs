//! Keyed-hash provider abstraction
//!
//! The cryptographic primitive is the single suspension point of the whole
//! pipeline, so it sits behind a trait returning a boxed future. Platforms
//! with an asynchronous crypto backend implement [`MacProvider`] over it;
//! the default [`RustCryptoProvider`] computes synchronously and resolves
//! immediately. Provider failures are terminal: there is no retry.

use std::future::Future;
use std::pin::Pin;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Error, Result};

/// Boxed future returned by provider invocations
pub type MacFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;

/// Provider of the keyed-hash primitive
///
/// The key is read-only for the duration of one call and must not be
/// retained, logged, or cached after the call returns.
pub trait MacProvider: Send + Sync {
    /// Compute HMAC-SHA-256 over `data` with `key`
    fn hmac_sha256<'a>(&'a self, key: &'a [u8], data: &'a [u8]) -> MacFuture<'a>;
}

/// Default provider backed by the `hmac` and `sha2` crates
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoProvider;

impl MacProvider for RustCryptoProvider {
    fn hmac_sha256<'a>(&'a self, key: &'a [u8], data: &'a [u8]) -> MacFuture<'a> {
        Box::pin(async move {
            let mut mac = Hmac::<Sha256>::new_from_slice(key)
                .map_err(|e| Error::CryptoProvider(e.to_string()))?;
            mac.update(data);
            Ok(mac.finalize().into_bytes().to_vec())
        })
    }
}
