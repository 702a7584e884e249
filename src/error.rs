//! Error types for compact token processing
//!
//! Every failure in the decode/verify pipeline is a tagged value, so callers
//! can compose the two phases and tests can assert on the error kind. A
//! signature mismatch is not represented here: it is a legitimate negative
//! outcome carried by [`VerificationResult`](crate::VerificationResult).

/// Errors that can occur while decoding or verifying a compact token
///
/// Decode-time variants identify the failing segment; verify-time variants
/// cover the procedural preconditions and the cryptographic provider. All
/// decode failures are atomic: no partially populated token is ever
/// returned alongside one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Token text is not exactly three non-empty dot-separated segments
    MalformedToken,

    /// Header segment failed Base64URL decoding or JSON object parsing
    HeaderDecode(String),

    /// Payload segment failed Base64URL decoding or JSON object parsing
    PayloadDecode(String),

    /// Input is not valid no-padding Base64URL
    InvalidEncoding(String),

    /// Verification was requested with an empty secret
    MissingSecret,

    /// Verification was requested before any successful decode
    NotDecoded,

    /// The keyed-hash primitive was unavailable or failed
    CryptoProvider(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedToken => write!(
                f,
                "Malformed token: expected three non-empty segments separated by '.'"
            ),
            Error::HeaderDecode(cause) => write!(f, "Error decoding header: {cause}"),
            Error::PayloadDecode(cause) => write!(f, "Error decoding payload: {cause}"),
            Error::InvalidEncoding(cause) => write!(f, "Invalid Base64URL data: {cause}"),
            Error::MissingSecret => {
                write!(f, "A secret is required to verify the signature")
            }
            Error::NotDecoded => {
                write!(f, "Decode a token before verifying its signature")
            }
            Error::CryptoProvider(cause) => {
                write!(f, "Keyed-hash provider failed: {cause}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for jwtlens operations
pub type Result<T> = std::result::Result<T, Error>;
