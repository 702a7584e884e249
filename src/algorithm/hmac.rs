use constant_time_eq::constant_time_eq;

use crate::algorithm::provider::MacProvider;
use crate::algorithm::{SignatureScheme, VerifyFuture};
use crate::utils::base64url;

/// HS256 verification strategy (HMAC with SHA-256)
pub struct HmacSha256;

impl SignatureScheme for HmacSha256 {
    fn name(&self) -> &'static str {
        "HS256"
    }

    fn matches<'a>(
        &'a self,
        provider: &'a dyn MacProvider,
        signing_input: &'a str,
        signature: &'a str,
        secret: &'a [u8],
    ) -> VerifyFuture<'a> {
        Box::pin(async move {
            let mac = provider
                .hmac_sha256(secret, signing_input.as_bytes())
                .await?;
            let expected = base64url::encode_bytes(&mac);

            // Both operands are public once the token is on the wire, but
            // constant-time comparison costs nothing as defense-in-depth.
            Ok(constant_time_eq(
                expected.as_bytes(),
                signature.as_bytes(),
            ))
        })
    }
}
