use crate::error::Result;
use crate::keys::Key;

use super::AlgorithmId;

/// Core algorithm trait that all JWT signature algorithms implement
///
/// Different algorithm families (HMAC, RSA, RSA-PSS, ECDSA, none) implement
/// this trait. Implementations are stateless; key material is borrowed for
/// the duration of a single call.
pub trait Algorithm {
    /// The algorithm identifier (e.g., "HS256", "RS256")
    fn name(&self) -> &'static str;

    /// Sign the signing input (header.payload) with the given key
    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>>;

    /// Verify a raw (already Base64URL-decoded) signature
    ///
    /// # Arguments
    /// * `signing_input` - The data that was signed (header.payload)
    /// * `signature` - The signature bytes
    /// * `key` - The key to use for verification
    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()>;
}

/// Shared reference to a stateless algorithm implementation
pub type SignatureAlgorithm = &'static (dyn Algorithm + Send + Sync);

/// Get the implementation for the given algorithm ID
pub fn get_algorithm(algorithm: &AlgorithmId) -> SignatureAlgorithm {
    use super::{ecdsa, hmac, none, rsa};

    match algorithm {
        AlgorithmId::None => &none::Unsigned,

        AlgorithmId::HS256 => &hmac::HS256,
        AlgorithmId::HS384 => &hmac::HS384,
        AlgorithmId::HS512 => &hmac::HS512,

        AlgorithmId::RS256 => &rsa::RS256,
        AlgorithmId::RS384 => &rsa::RS384,
        AlgorithmId::RS512 => &rsa::RS512,

        AlgorithmId::PS256 => &rsa::PS256,
        AlgorithmId::PS384 => &rsa::PS384,
        AlgorithmId::PS512 => &rsa::PS512,

        AlgorithmId::ES256 => &ecdsa::ES256,
        AlgorithmId::ES384 => &ecdsa::ES384,
        AlgorithmId::ES512 => &ecdsa::ES512,
    }
}
