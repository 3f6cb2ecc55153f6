//! Base64URL encoding/decoding per RFC 4648
//!
//! Encoding produces the URL-safe alphabet without padding. [`decode`] maps
//! the URL-safe characters back onto the standard alphabet and restores
//! padding before handing the input to the `base64` crate. [`decode_strict`]
//! accepts only the canonical form that [`encode`] produces.

use crate::error::{Error, Result};
use base64::alphabet;
use base64::engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes to a Base64URL string
pub fn encode(input: impl AsRef<[u8]>) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(input)
}

/// Encode a UTF-8 string to Base64URL
pub fn encode_str(input: &str) -> String {
    encode(input.as_bytes())
}

/// Decode a Base64URL string to bytes
///
/// Lenient: either alphabet, optional padding and non-zero trailing bits are
/// all accepted.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let mut standard: String = input
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let remainder = standard.len() % 4;
    if remainder != 0 {
        standard.extend(std::iter::repeat('=').take(4 - remainder));
    }

    STANDARD_LENIENT
        .decode(standard.as_bytes())
        .map_err(|e| Error::InvalidEncoding(format!("Base64URL decode failed: {e}")))
}

/// Decode a canonical Base64URL string to bytes
///
/// URL-safe alphabet only, no padding, trailing bits must be zero. Exactly one
/// string decodes to any given byte sequence.
pub fn decode_strict(input: &str) -> Result<Vec<u8>> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::InvalidEncoding(format!("Base64URL decode failed: {e}")))
}
