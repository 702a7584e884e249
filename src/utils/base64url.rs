/// Base64URL encoding/decoding per RFC 4648
/// URL-safe alphabet, no padding characters
use crate::error::{Error, Result};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Encode bytes to a Base64URL string, padding stripped
pub fn encode_bytes(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);

    for chunk in input.chunks(3) {
        let group = (u32::from(chunk[0]) << 16)
            | (u32::from(chunk.get(1).copied().unwrap_or(0)) << 8)
            | u32::from(chunk.get(2).copied().unwrap_or(0));

        out.push(ALPHABET[(group >> 18) as usize & 0x3f] as char);
        out.push(ALPHABET[(group >> 12) as usize & 0x3f] as char);
        if chunk.len() > 1 {
            out.push(ALPHABET[(group >> 6) as usize & 0x3f] as char);
        }
        if chunk.len() > 2 {
            out.push(ALPHABET[group as usize & 0x3f] as char);
        }
    }

    out
}

/// Encode a string's UTF-8 bytes to Base64URL
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

fn sextet(byte: u8) -> Result<u8> {
    match byte {
        b'A'..=b'Z' => Ok(byte - b'A'),
        b'a'..=b'z' => Ok(byte - b'a' + 26),
        b'0'..=b'9' => Ok(byte - b'0' + 52),
        b'-' => Ok(62),
        b'_' => Ok(63),
        _ => Err(Error::InvalidEncoding(format!(
            "invalid character '{}'",
            byte as char
        ))),
    }
}

/// Decode a Base64URL string to bytes
///
/// Accepts the unpadded form only: a length remainder of 2 or 3 is the
/// stripped-padding tail, a remainder of 1 can never come from a valid
/// encoding and is rejected. Empty input decodes to an empty byte sequence.
pub fn decode_bytes(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    if bytes.len() % 4 == 1 {
        return Err(Error::InvalidEncoding(
            "truncated input: length remainder of 1 is never valid".to_string(),
        ));
    }

    let mut out = Vec::with_capacity(bytes.len() / 4 * 3 + 2);
    for group in bytes.chunks(4) {
        let mut acc = 0u32;
        for &b in group {
            acc = (acc << 6) | u32::from(sextet(b)?);
        }

        match group.len() {
            4 => {
                out.push((acc >> 16) as u8);
                out.push((acc >> 8) as u8);
                out.push(acc as u8);
            }
            3 => {
                out.push((acc >> 10) as u8);
                out.push((acc >> 2) as u8);
            }
            2 => {
                out.push((acc >> 4) as u8);
            }
            _ => unreachable!("remainder of 1 rejected above"),
        }
    }

    Ok(out)
}

/// Decode a Base64URL string to a UTF-8 string
pub fn decode(input: &str) -> Result<String> {
    let bytes = decode_bytes(input)?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidEncoding(format!("invalid UTF-8: {e}")))
}
