//! Base64URL encoding/decoding per RFC 4648 Section 5
//!
//! A thin wrapper around the `base64` crate. Encoding never emits padding;
//! decoding tolerates canonical `=` padding and derives the rest from the
//! input length, so `len % 4 == 1` is always rejected.

use crate::error::{Error, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Codec used by the encoder and decoder for every token segment
pub trait UrlEncoder {
    /// Encode bytes to an unpadded Base64URL string
    fn encode(&self, input: &[u8]) -> String;

    /// Decode a Base64URL string back to bytes
    fn decode(&self, input: &str) -> Result<Vec<u8>>;
}

impl<T: UrlEncoder + ?Sized> UrlEncoder for &T {
    fn encode(&self, input: &[u8]) -> String {
        (**self).encode(input)
    }

    fn decode(&self, input: &str) -> Result<Vec<u8>> {
        (**self).decode(input)
    }
}

/// The standard JWT segment codec
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Url;

impl UrlEncoder for Base64Url {
    fn encode(&self, input: &[u8]) -> String {
        encode_bytes(input)
    }

    fn decode(&self, input: &str) -> Result<Vec<u8>> {
        decode_bytes(input)
    }
}

/// Encode bytes to Base64URL string
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_LENIENT.encode(input)
}

/// Encode string to Base64URL
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode Base64URL string to bytes
pub fn decode_bytes(input: &str) -> Result<Vec<u8>> {
    URL_SAFE_LENIENT
        .decode(input)
        .map_err(|e| Error::Decode(e.to_string()))
}

/// Decode Base64URL string to UTF-8 string
pub fn decode(input: &str) -> Result<String> {
    let bytes = decode_bytes(input)?;
    String::from_utf8(bytes).map_err(|e| Error::Decode(format!("Invalid UTF-8: {e}")))
}
