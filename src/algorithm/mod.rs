mod traits;

pub mod ecdsa;
pub mod hmac;
pub mod none;
pub mod rsa;

pub use traits::{get_algorithm, Algorithm, SignatureAlgorithm};

use crate::error::{Error, Result};
use crate::keys::{EcdsaCurve, Key};

/// Algorithm identifier (the `alg` header value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// Unsigned token
    None,

    /// HMAC with SHA-256
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,

    /// RSA PKCS#1 v1.5 with SHA-256
    RS256,

    /// RSA PKCS#1 v1.5 with SHA-384
    RS384,

    /// RSA PKCS#1 v1.5 with SHA-512
    RS512,

    /// RSA-PSS with SHA-256
    PS256,

    /// RSA-PSS with SHA-384
    PS384,

    /// RSA-PSS with SHA-512
    PS512,

    /// ECDSA with P-256 and SHA-256
    ES256,

    /// ECDSA with P-384 and SHA-384
    ES384,

    /// ECDSA with P-521 and SHA-512
    ES512,
}

impl AlgorithmId {
    /// Every supported identifier
    pub const ALL: [AlgorithmId; 13] = [
        AlgorithmId::None,
        AlgorithmId::HS256,
        AlgorithmId::HS384,
        AlgorithmId::HS512,
        AlgorithmId::RS256,
        AlgorithmId::RS384,
        AlgorithmId::RS512,
        AlgorithmId::PS256,
        AlgorithmId::PS384,
        AlgorithmId::PS512,
        AlgorithmId::ES256,
        AlgorithmId::ES384,
        AlgorithmId::ES512,
    ];

    /// Parse algorithm string from a JWT header
    ///
    /// Parsing `none` succeeds; whether unsigned tokens are accepted is a
    /// decoder decision.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::AlgorithmUnsupported(s.to_string()))
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::None => "none",

            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",

            AlgorithmId::RS256 => "RS256",
            AlgorithmId::RS384 => "RS384",
            AlgorithmId::RS512 => "RS512",

            AlgorithmId::PS256 => "PS256",
            AlgorithmId::PS384 => "PS384",
            AlgorithmId::PS512 => "PS512",

            AlgorithmId::ES256 => "ES256",
            AlgorithmId::ES384 => "ES384",
            AlgorithmId::ES512 => "ES512",
        }
    }

    /// Check if algorithm is the unsigned `none`
    pub fn is_none(&self) -> bool {
        matches!(self, AlgorithmId::None)
    }

    /// Check if algorithm is HMAC-based (symmetric)
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            AlgorithmId::HS256 | AlgorithmId::HS384 | AlgorithmId::HS512
        )
    }

    /// Check if algorithm is asymmetric (RSA/ECDSA)
    pub fn is_asymmetric(&self) -> bool {
        !self.is_symmetric() && !self.is_none()
    }

    /// The curve an ECDSA algorithm requires
    fn required_curve(&self) -> Option<EcdsaCurve> {
        match self {
            AlgorithmId::ES256 => Some(EcdsaCurve::P256),
            AlgorithmId::ES384 => Some(EcdsaCurve::P384),
            AlgorithmId::ES512 => Some(EcdsaCurve::P521),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An algorithm paired with the key material it signs or verifies with
///
/// This is the value callers hand to the encoder and decoder. The decoder
/// verifies with this algorithm and never with the one named in the token
/// header.
#[derive(Debug, Clone)]
pub struct AlgorithmKey {
    id: AlgorithmId,
    key: Key,
}

impl AlgorithmKey {
    /// Pair an algorithm with a key, checking the key fits the algorithm family
    pub fn new(id: AlgorithmId, key: Key) -> Result<Self> {
        let compatible = match (&id, &key) {
            (AlgorithmId::None, Key::None) => true,
            (id, Key::Symmetric(_)) => id.is_symmetric(),
            (
                AlgorithmId::RS256
                | AlgorithmId::RS384
                | AlgorithmId::RS512
                | AlgorithmId::PS256
                | AlgorithmId::PS384
                | AlgorithmId::PS512,
                Key::Rsa(_),
            ) => true,
            (id, Key::Ecdsa(ecdsa)) => id.required_curve() == Some(ecdsa.curve()),
            _ => false,
        };

        if !compatible {
            let actual_key_type = match &key {
                Key::Ecdsa(ecdsa) => format!("ECDSA {:?}", ecdsa.curve()),
                other => other.key_type().to_string(),
            };
            return Err(Error::KeyTypeMismatch {
                algorithm: id.to_string(),
                expected_key_type: expected_key_type(&id),
                actual_key_type,
            });
        }

        Ok(Self { id, key })
    }

    /// The unsigned `none` algorithm
    pub fn none() -> Self {
        Self {
            id: AlgorithmId::None,
            key: Key::None,
        }
    }

    /// HMAC-SHA-256 with the given secret
    pub fn hs256(secret: impl Into<Vec<u8>>) -> Self {
        Self::hmac(AlgorithmId::HS256, secret)
    }

    /// HMAC-SHA-384 with the given secret
    pub fn hs384(secret: impl Into<Vec<u8>>) -> Self {
        Self::hmac(AlgorithmId::HS384, secret)
    }

    /// HMAC-SHA-512 with the given secret
    pub fn hs512(secret: impl Into<Vec<u8>>) -> Self {
        Self::hmac(AlgorithmId::HS512, secret)
    }

    fn hmac(id: AlgorithmId, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            key: Key::symmetric(secret),
        }
    }

    /// RSA PKCS#1 v1.5 with SHA-256
    pub fn rs256(key: Key) -> Result<Self> {
        Self::new(AlgorithmId::RS256, key)
    }

    /// RSA PKCS#1 v1.5 with SHA-384
    pub fn rs384(key: Key) -> Result<Self> {
        Self::new(AlgorithmId::RS384, key)
    }

    /// RSA PKCS#1 v1.5 with SHA-512
    pub fn rs512(key: Key) -> Result<Self> {
        Self::new(AlgorithmId::RS512, key)
    }

    /// RSA-PSS with SHA-256
    pub fn ps256(key: Key) -> Result<Self> {
        Self::new(AlgorithmId::PS256, key)
    }

    /// RSA-PSS with SHA-384
    pub fn ps384(key: Key) -> Result<Self> {
        Self::new(AlgorithmId::PS384, key)
    }

    /// RSA-PSS with SHA-512
    pub fn ps512(key: Key) -> Result<Self> {
        Self::new(AlgorithmId::PS512, key)
    }

    /// ECDSA P-256 with SHA-256
    pub fn es256(key: Key) -> Result<Self> {
        Self::new(AlgorithmId::ES256, key)
    }

    /// ECDSA P-384 with SHA-384
    pub fn es384(key: Key) -> Result<Self> {
        Self::new(AlgorithmId::ES384, key)
    }

    /// ECDSA P-521 with SHA-512
    pub fn es512(key: Key) -> Result<Self> {
        Self::new(AlgorithmId::ES512, key)
    }

    pub fn id(&self) -> AlgorithmId {
        self.id
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// The canonical `alg` header value
    pub fn name(&self) -> &'static str {
        get_algorithm(&self.id).name()
    }

    /// Sign the signing input (`header.payload`)
    pub fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        get_algorithm(&self.id).sign(signing_input, &self.key)
    }

    /// Verify a raw signature over the signing input
    ///
    /// Always fails with [`Error::AlgorithmNoneRejected`] for `none`; use
    /// [`AlgorithmKey::verify_with`] to accept unsigned tokens.
    pub fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()> {
        self.verify_with(signing_input, signature, false)
    }

    /// Verify a raw signature, accepting an empty `none` signature only when
    /// `allow_unsigned` is set
    pub fn verify_with(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        allow_unsigned: bool,
    ) -> Result<()> {
        if self.id.is_none() {
            return none::Unsigned::verify_allowed(signature, allow_unsigned);
        }
        get_algorithm(&self.id).verify(signing_input, signature, &self.key)
    }
}

fn expected_key_type(id: &AlgorithmId) -> String {
    match id {
        AlgorithmId::None => "None".to_string(),
        id if id.is_symmetric() => "Symmetric".to_string(),
        id => match id.required_curve() {
            Some(curve) => format!("ECDSA {:?}", curve),
            None => "RSA".to_string(),
        },
    }
}
