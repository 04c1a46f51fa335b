use crate::algorithm::AlgorithmKey;
use crate::error::Result;
use crate::serialization::{JsonSerializer, MiniserdeSerializer};
use crate::token::Header;
use crate::utils::{Base64Url, UrlEncoder};
use miniserde::Serialize;
use tracing::{trace, warn};

/// Produces compact JWTs (`header.payload.signature`)
///
/// The encoder owns its serializer and segment codec; it never adds claims
/// of its own. Time claims such as `exp` are the caller's to set.
#[derive(Debug, Clone, Default)]
pub struct Encoder<S = MiniserdeSerializer, E = Base64Url> {
    serializer: S,
    url_encoder: E,
}

impl Encoder {
    /// Encoder with the stock JSON serializer and Base64URL codec
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: JsonSerializer, E: UrlEncoder> Encoder<S, E> {
    pub fn with_components(serializer: S, url_encoder: E) -> Self {
        Self {
            serializer,
            url_encoder,
        }
    }

    /// Encode and sign a payload
    ///
    /// The header's `alg` is filled in from `algorithm` when unset. An
    /// explicitly set `alg` is written as given.
    pub fn encode<T>(&self, payload: &T, header: &Header, algorithm: &AlgorithmKey) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        let mut header = header.clone();
        if header.algorithm().is_none() {
            header.set_algorithm(algorithm.name());
        } else if header.algorithm() != Some(algorithm.name()) {
            warn!(
                header_alg = ?header.algorithm(),
                signing_alg = algorithm.name(),
                "header alg does not match the signing algorithm"
            );
        }

        let header_json = self.serializer.serialize(&header.to_object())?;
        let payload_json = self.serializer.serialize(payload)?;

        let mut token = self.url_encoder.encode(header_json.as_bytes());
        token.push('.');
        token.push_str(&self.url_encoder.encode(payload_json.as_bytes()));

        let signature = algorithm.sign(token.as_bytes())?;
        token.push('.');
        token.push_str(&self.url_encoder.encode(&signature));

        trace!(alg = algorithm.name(), len = token.len(), "token encoded");
        Ok(token)
    }

    /// Encode with a default header (`typ: "JWT"`)
    pub fn encode_claims<T>(&self, payload: &T, algorithm: &AlgorithmKey) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        self.encode(payload, &Header::new(), algorithm)
    }
}
