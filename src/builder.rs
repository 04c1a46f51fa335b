//! Fluent facade over the encoder and decoder
//!
//! [`JwtBuilder`] accumulates an algorithm, key material, claims, header
//! fields, capabilities and validation parameters, then hands them to an
//! [`Encoder`] or [`Decoder`] when a terminal operation runs. It holds no
//! logic of its own: a builder call produces exactly what the direct
//! component call with the same inputs produces.
//!
//! Terminal operations borrow the builder, so one configured builder can
//! encode or decode any number of tokens.

use crate::algorithm::{AlgorithmId, AlgorithmKey};
use crate::claims::{ClaimSet, IntoClaim, ValidationParameters};
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::serialization::{JsonSerializer, MiniserdeSerializer};
use crate::time::{Clock, SystemClock};
use crate::token::{Decoder, Encoder, Header};
use crate::utils::{Base64Url, UrlEncoder};
use miniserde::Deserialize;

/// Chainable JWT configuration
///
/// # Example
///
/// ```
/// use jwtcraft::{AlgorithmId, JwtBuilder};
///
/// let token = JwtBuilder::new()
///     .with_algorithm(AlgorithmId::HS256)
///     .with_secret("secret")
///     .add_claim("sub", "user-42")
///     .encode()?;
///
/// let claims = JwtBuilder::new()
///     .with_algorithm(AlgorithmId::HS256)
///     .with_secret("secret")
///     .decode(&token)?;
///
/// assert_eq!(claims.subject(), Some("user-42"));
/// # Ok::<(), jwtcraft::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct JwtBuilder<S = MiniserdeSerializer, E = Base64Url, C = SystemClock> {
    algorithm: Option<AlgorithmId>,
    key: Option<Key>,
    serializer: S,
    url_encoder: E,
    clock: C,
    claims: ClaimSet,
    header: Header,
    parameters: ValidationParameters,
}

impl JwtBuilder {
    /// Builder with the stock serializer, codec and system clock
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, E, C> JwtBuilder<S, E, C> {
    /// Algorithm used to sign, and expected when verifying
    pub fn with_algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    /// Symmetric secret for the HMAC algorithms
    pub fn with_secret(self, secret: impl Into<Vec<u8>>) -> Self {
        self.with_key(Key::symmetric(secret))
    }

    /// Replace the JSON serializer
    pub fn with_serializer<S2: JsonSerializer>(self, serializer: S2) -> JwtBuilder<S2, E, C> {
        JwtBuilder {
            algorithm: self.algorithm,
            key: self.key,
            serializer,
            url_encoder: self.url_encoder,
            clock: self.clock,
            claims: self.claims,
            header: self.header,
            parameters: self.parameters,
        }
    }

    /// Replace the segment codec
    pub fn with_url_encoder<E2: UrlEncoder>(self, url_encoder: E2) -> JwtBuilder<S, E2, C> {
        JwtBuilder {
            algorithm: self.algorithm,
            key: self.key,
            serializer: self.serializer,
            url_encoder,
            clock: self.clock,
            claims: self.claims,
            header: self.header,
            parameters: self.parameters,
        }
    }

    /// Replace the time source used for claim validation
    pub fn with_clock<C2: Clock>(self, clock: C2) -> JwtBuilder<S, E, C2> {
        JwtBuilder {
            algorithm: self.algorithm,
            key: self.key,
            serializer: self.serializer,
            url_encoder: self.url_encoder,
            clock,
            claims: self.claims,
            header: self.header,
            parameters: self.parameters,
        }
    }

    /// Add a claim to encode; a repeated name replaces the earlier value
    pub fn add_claim(mut self, name: impl Into<String>, value: impl IntoClaim) -> Self {
        self.claims.insert(name, value);
        self
    }

    /// Add every claim of `claims`
    pub fn add_claims(mut self, claims: ClaimSet) -> Self {
        for (name, value) in claims.iter() {
            self.claims.insert(name.clone(), value.clone());
        }
        self
    }

    /// Add a header field
    pub fn add_header(mut self, name: impl Into<String>, value: impl IntoClaim) -> Self {
        self.header.insert(name, value);
        self
    }

    /// Set the `kid` header field
    pub fn key_id(mut self, key_id: impl Into<String>) -> Self {
        self.header.set_key_id(key_id);
        self
    }

    pub fn with_validation_parameters(mut self, parameters: ValidationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Verify signatures when decoding (the default)
    pub fn must_verify_signature(mut self) -> Self {
        self.parameters.validate_signature = true;
        self
    }

    /// Skip signature verification when decoding
    pub fn do_not_verify_signature(mut self) -> Self {
        self.parameters.validate_signature = false;
        self
    }

    /// Accept `alg: none` tokens when the configured algorithm is `none`
    pub fn allow_unsigned(mut self) -> Self {
        self.parameters.allow_unsigned = true;
        self
    }

    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn validation_parameters(&self) -> &ValidationParameters {
        &self.parameters
    }

    /// The configured algorithm paired with its key
    ///
    /// `none` needs no key; every other algorithm does.
    pub fn algorithm_key(&self) -> Result<AlgorithmKey> {
        let algorithm = self
            .algorithm
            .ok_or_else(|| Error::ConfigurationInvalid("no algorithm configured".to_string()))?;

        match (&self.key, algorithm) {
            (None, AlgorithmId::None) => Ok(AlgorithmKey::none()),
            (None, _) => Err(Error::ConfigurationInvalid(format!(
                "algorithm {algorithm} requires a key"
            ))),
            (Some(key), _) => AlgorithmKey::new(algorithm, key.clone()),
        }
    }

    /// Algorithm for decoding: required only when verifying signatures
    fn verification_key(&self) -> Result<Option<AlgorithmKey>> {
        if !self.parameters.validate_signature {
            return Ok(None);
        }
        self.algorithm_key().map(Some)
    }
}

impl<S: JsonSerializer, E: UrlEncoder, C: Clock> JwtBuilder<S, E, C> {
    pub fn encoder(&self) -> Encoder<&S, &E> {
        Encoder::with_components(&self.serializer, &self.url_encoder)
    }

    pub fn decoder(&self) -> Decoder<&S, &E, &C> {
        Decoder::with_components(
            &self.serializer,
            &self.url_encoder,
            &self.clock,
            self.parameters.clone(),
        )
    }

    /// Encode the accumulated claims and header
    pub fn encode(&self) -> Result<String> {
        self.encoder()
            .encode(&self.claims, &self.header, &self.algorithm_key()?)
    }

    /// Decode, verify and validate a token
    pub fn decode(&self, token: &str) -> Result<ClaimSet> {
        let algorithm = self.verification_key()?;
        self.decoder().decode(token, algorithm.as_ref())
    }

    /// Decode, verify and validate a token into `T`
    pub fn decode_to<T: Deserialize>(&self, token: &str) -> Result<T> {
        let algorithm = self.verification_key()?;
        self.decoder().decode_to(token, algorithm.as_ref())
    }

    /// Decode the header only; no signature or claim checks
    pub fn decode_header(&self, token: &str) -> Result<Header> {
        self.decoder().decode_header(token)
    }

    /// Decode the header only into `T`
    pub fn decode_header_as<T: Deserialize>(&self, token: &str) -> Result<T> {
        self.decoder().decode_header_as(token)
    }
}
