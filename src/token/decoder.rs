use crate::algorithm::AlgorithmKey;
use crate::claims::{ClaimSet, ClaimsValidator, ValidationParameters};
use crate::error::{Error, Result};
use crate::serialization::{JsonSerializer, MiniserdeSerializer};
use crate::time::{Clock, SystemClock};
use crate::token::Header;
use crate::utils::{Base64Url, UrlEncoder};
use miniserde::json::Object;
use miniserde::Deserialize;
use tracing::{debug, trace, warn};

/// The three segments of a compact JWT, borrowed from the token string
#[derive(Debug, Clone, Copy)]
pub(crate) struct Segments<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
    /// `header.payload` exactly as transmitted
    pub signing_input: &'a str,
}

impl<'a> Segments<'a> {
    /// Split on `.`; anything but exactly three segments is malformed
    pub(crate) fn split(token: &'a str) -> Result<Self> {
        let mut parts = token.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(payload), Some(signature), None) => Ok(Self {
                header,
                payload,
                signature,
                signing_input: &token[..header.len() + 1 + payload.len()],
            }),
            _ => Err(Error::MalformedToken(format!(
                "expected 3 segments, found {}",
                token.split('.').count()
            ))),
        }
    }
}

/// Parses and validates compact JWTs
///
/// Decoding runs in a fixed order: size limit, segment split, header and
/// payload decoding, signature verification, then claim validation. A
/// token with a forged signature is rejected before any claim is looked at.
///
/// The signature is checked with the [`AlgorithmKey`] the caller passes in.
/// The header's own `alg` is never consulted.
#[derive(Debug, Clone, Default)]
pub struct Decoder<S = MiniserdeSerializer, E = Base64Url, C = SystemClock> {
    serializer: S,
    url_encoder: E,
    clock: C,
    parameters: ValidationParameters,
}

impl Decoder {
    /// Decoder with the stock serializer, codec and the system clock
    pub fn new(parameters: ValidationParameters) -> Self {
        Self {
            parameters,
            ..Self::default()
        }
    }
}

impl<S: JsonSerializer, E: UrlEncoder, C: Clock> Decoder<S, E, C> {
    pub fn with_components(
        serializer: S,
        url_encoder: E,
        clock: C,
        parameters: ValidationParameters,
    ) -> Self {
        Self {
            serializer,
            url_encoder,
            clock,
            parameters,
        }
    }

    pub fn parameters(&self) -> &ValidationParameters {
        &self.parameters
    }

    /// Decode the header without touching the signature
    pub fn decode_header(&self, token: &str) -> Result<Header> {
        let segments = self.split(token)?;
        let object: Object = self.decode_segment(segments.header, "header")?;
        Header::from_object(object)
    }

    /// Decode the header into a caller-defined type
    pub fn decode_header_as<T: Deserialize>(&self, token: &str) -> Result<T> {
        let segments = self.split(token)?;
        self.decode_segment(segments.header, "header")
    }

    /// Decode, verify and validate a token, returning its claims
    ///
    /// `algorithm` may only be omitted when signature validation is turned
    /// off in the parameters.
    pub fn decode(&self, token: &str, algorithm: Option<&AlgorithmKey>) -> Result<ClaimSet> {
        self.decode_validated(token, algorithm)
            .map(|(claims, _)| claims)
    }

    /// Same as [`decode`](Self::decode), deserializing the payload into `T`
    pub fn decode_to<T: Deserialize>(
        &self,
        token: &str,
        algorithm: Option<&AlgorithmKey>,
    ) -> Result<T> {
        let (_, payload) = self.decode_validated(token, algorithm)?;
        self.serializer.deserialize(&payload).inspect_err(|e| {
            debug!(error = %e, "payload does not match the requested type");
        })
    }

    fn decode_validated(
        &self,
        token: &str,
        algorithm: Option<&AlgorithmKey>,
    ) -> Result<(ClaimSet, String)> {
        self.run(token, algorithm).inspect_err(|e| {
            debug!(error = %e, "token rejected");
        })
    }

    fn run(&self, token: &str, algorithm: Option<&AlgorithmKey>) -> Result<(ClaimSet, String)> {
        let segments = self.split(token)?;

        let header: Object = self.decode_segment(segments.header, "header")?;
        let header = Header::from_object(header)?;
        let payload = self.decode_text(segments.payload, "payload")?;
        let claims: Object = self
            .serializer
            .deserialize(&payload)
            .map_err(|e| Error::MalformedToken(format!("payload: {e}")))?;
        let claims = ClaimSet::from_object(claims);

        if self.parameters.validate_signature {
            let algorithm = algorithm.ok_or_else(|| {
                Error::ConfigurationInvalid(
                    "signature validation requires an algorithm and key".to_string(),
                )
            })?;
            self.verify_signature(&segments, &header, algorithm)?;
        } else {
            warn!("signature verification skipped");
        }

        claims.check_reserved()?;
        ClaimsValidator::validate(&claims, &self.parameters, self.clock.unix_timestamp())?;

        trace!(alg = ?header.algorithm(), "token decoded");
        Ok((claims, payload))
    }

    fn verify_signature(
        &self,
        segments: &Segments<'_>,
        header: &Header,
        algorithm: &AlgorithmKey,
    ) -> Result<()> {
        if algorithm.id().is_none() && !self.parameters.allow_unsigned {
            return Err(Error::AlgorithmNoneRejected);
        }

        if header.algorithm() != Some(algorithm.name()) {
            debug!(
                header_alg = ?header.algorithm(),
                expected_alg = algorithm.name(),
                "header alg differs from the expected algorithm"
            );
        }

        let signature = self
            .url_encoder
            .decode(segments.signature)
            .map_err(|_| Error::SignatureInvalid)?;

        algorithm.verify_with(
            segments.signing_input.as_bytes(),
            &signature,
            self.parameters.allow_unsigned,
        )
    }

    fn split<'a>(&self, token: &'a str) -> Result<Segments<'a>> {
        if let Some(max) = self.parameters.max_token_length {
            if token.len() > max {
                return Err(Error::TokenTooLarge {
                    size: token.len(),
                    max,
                });
            }
        }
        Segments::split(token)
    }

    fn decode_text(&self, segment: &str, what: &str) -> Result<String> {
        let bytes = self
            .url_encoder
            .decode(segment)
            .map_err(|e| Error::MalformedToken(format!("{what}: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|_| Error::MalformedToken(format!("{what}: invalid UTF-8")))
    }

    fn decode_segment<T: Deserialize>(&self, segment: &str, what: &str) -> Result<T> {
        let text = self.decode_text(segment, what)?;
        self.serializer
            .deserialize(&text)
            .map_err(|e| Error::MalformedToken(format!("{what}: {e}")))
    }
}
