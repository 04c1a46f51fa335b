/// Key material for JWT signing and verification
///
/// This module provides a type-safe abstraction over different key types:
/// - Symmetric secrets (for HMAC algorithms)
/// - RSA keys (PKCS#1 v1.5 and PSS algorithms)
/// - ECDSA keys (P-256, P-384, P-521)
/// - No key at all (for the unsigned `none` algorithm)
///
/// Private keys are PKCS#8 DER documents and can both sign and verify.
/// Public keys are DER-encoded (PKCS#1 `RSAPublicKey`, SubjectPublicKeyInfo,
/// or an uncompressed EC point) and can only verify.
use crate::error::{Error, Result};

/// A key that can be used for JWT signing or signature verification
#[derive(Debug, Clone)]
pub enum Key {
    /// No key material (only valid for the `none` algorithm)
    None,

    /// Symmetric key for HMAC algorithms
    Symmetric(SymmetricKey),

    /// RSA key for RS* and PS* algorithms
    Rsa(RsaKey),

    /// ECDSA key for ES* algorithms
    Ecdsa(EcdsaKey),
}

/// Which half of an asymmetric key pair is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPart {
    /// PKCS#8 private key (can sign and verify)
    Private,
    /// Public key (can only verify)
    Public,
}

impl Key {
    /// Create a symmetric key from bytes
    pub fn symmetric(secret: impl Into<Vec<u8>>) -> Self {
        Key::Symmetric(SymmetricKey::new(secret.into()))
    }

    /// Create an RSA private key from a PKCS#8 DER document
    pub fn rsa_private(pkcs8_der: impl Into<Vec<u8>>) -> Self {
        Key::Rsa(RsaKey::new(pkcs8_der.into(), KeyPart::Private))
    }

    /// Create an RSA public key from DER (PKCS#1 or SubjectPublicKeyInfo)
    pub fn rsa_public(der: impl Into<Vec<u8>>) -> Self {
        Key::Rsa(RsaKey::new(der.into(), KeyPart::Public))
    }

    /// Create an ECDSA private key from a PKCS#8 DER document
    pub fn ecdsa_private(pkcs8_der: impl Into<Vec<u8>>, curve: EcdsaCurve) -> Self {
        Key::Ecdsa(EcdsaKey::new(pkcs8_der.into(), curve, KeyPart::Private))
    }

    /// Create an ECDSA public key from an uncompressed point or SubjectPublicKeyInfo
    pub fn ecdsa_public(der: impl Into<Vec<u8>>, curve: EcdsaCurve) -> Self {
        Key::Ecdsa(EcdsaKey::new(der.into(), curve, KeyPart::Public))
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            Key::None => "None",
            Key::Symmetric(_) => "Symmetric",
            Key::Rsa(_) => "RSA",
            Key::Ecdsa(_) => "ECDSA",
        }
    }

    /// Get as symmetric key or return error
    pub fn as_symmetric(&self) -> Result<&SymmetricKey> {
        match self {
            Key::Symmetric(key) => Ok(key),
            _ => Err(self.mismatch("HMAC", "Symmetric")),
        }
    }

    /// Get as RSA key or return error
    pub fn as_rsa(&self) -> Result<&RsaKey> {
        match self {
            Key::Rsa(key) => Ok(key),
            _ => Err(self.mismatch("RSA", "RSA")),
        }
    }

    /// Get as ECDSA key or return error
    pub fn as_ecdsa(&self) -> Result<&EcdsaKey> {
        match self {
            Key::Ecdsa(key) => Ok(key),
            _ => Err(self.mismatch("ECDSA", "ECDSA")),
        }
    }

    fn mismatch(&self, algorithm: &str, expected: &str) -> Error {
        Error::KeyTypeMismatch {
            algorithm: algorithm.to_string(),
            expected_key_type: expected.to_string(),
            actual_key_type: self.key_type().to_string(),
        }
    }
}

/// Symmetric key for HMAC algorithms
#[derive(Clone)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    /// Create a new symmetric key
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.secret.len())
            .finish()
    }
}

impl From<Vec<u8>> for SymmetricKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SymmetricKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for SymmetricKey {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for SymmetricKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

/// RSA key (private PKCS#8 or public DER)
#[derive(Clone)]
pub struct RsaKey {
    der: Vec<u8>,
    part: KeyPart,
}

impl RsaKey {
    /// Create a new RSA key from DER bytes
    pub fn new(der: Vec<u8>, part: KeyPart) -> Self {
        Self { der, part }
    }

    /// Get the DER-encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Private or public half
    pub fn part(&self) -> KeyPart {
        self.part
    }
}

impl std::fmt::Debug for RsaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKey").field("part", &self.part).finish()
    }
}

/// ECDSA curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// P-256 (secp256r1) curve
    P256,
    /// P-384 (secp384r1) curve
    P384,
    /// P-521 (secp521r1) curve
    P521,
}

/// ECDSA key (private PKCS#8 or public point)
#[derive(Clone)]
pub struct EcdsaKey {
    der: Vec<u8>,
    curve: EcdsaCurve,
    part: KeyPart,
}

impl EcdsaKey {
    /// Create a new ECDSA key from DER bytes
    pub fn new(der: Vec<u8>, curve: EcdsaCurve, part: KeyPart) -> Self {
        Self { der, curve, part }
    }

    /// Get the DER-encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Get the curve
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    /// Private or public half
    pub fn part(&self) -> KeyPart {
        self.part
    }
}

impl std::fmt::Debug for EcdsaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaKey")
            .field("curve", &self.curve)
            .field("part", &self.part)
            .finish()
    }
}
