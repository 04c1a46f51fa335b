use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::Key;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
pub struct HS512;

#[derive(Clone, Copy)]
enum Digest {
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm for HS256 {
    fn name(&self) -> &'static str {
        "HS256"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        compute_mac(Digest::Sha256, signing_input, key)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_mac(Digest::Sha256, signing_input, signature, key)
    }
}

impl Algorithm for HS384 {
    fn name(&self) -> &'static str {
        "HS384"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        compute_mac(Digest::Sha384, signing_input, key)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_mac(Digest::Sha384, signing_input, signature, key)
    }
}

impl Algorithm for HS512 {
    fn name(&self) -> &'static str {
        "HS512"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        compute_mac(Digest::Sha512, signing_input, key)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_mac(Digest::Sha512, signing_input, signature, key)
    }
}

/// Compute the HMAC tag over the signing input
fn compute_mac(digest: Digest, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
    let secret = key.as_symmetric()?.as_bytes();
    let invalid_key = |e: hmac::digest::InvalidLength| Error::KeyRejected(e.to_string());

    let tag = match digest {
        Digest::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(secret).map_err(invalid_key)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
        Digest::Sha384 => {
            let mut mac = Hmac::<Sha384>::new_from_slice(secret).map_err(invalid_key)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
        Digest::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(secret).map_err(invalid_key)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
    };

    Ok(tag)
}

/// Verify an HMAC tag with constant-time comparison
fn verify_mac(digest: Digest, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
    let expected = compute_mac(digest, signing_input, key)?;

    if signature.len() != expected.len() {
        return Err(Error::SignatureInvalid);
    }

    if constant_time_eq(signature, &expected) {
        Ok(())
    } else {
        Err(Error::SignatureInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNING_INPUT: &[u8] = b"eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

    #[test]
    fn test_hs256_known_tag() {
        // RFC 4231 test case 2
        let key = Key::symmetric(b"Jefe".to_vec());
        let tag = HS256.sign(b"what do ya want for nothing?", &key).unwrap();
        assert_eq!(
            tag[..4],
            [0x5b, 0xdc, 0xc1, 0x46],
            "HMAC-SHA256 must match the RFC 4231 vector"
        );
    }

    #[test]
    fn test_hs256_valid_signature() {
        let key = Key::symmetric(b"your-256-bit-secret".to_vec());
        let signature = HS256.sign(SIGNING_INPUT, &key).unwrap();
        assert_eq!(signature.len(), 32);
        assert!(HS256.verify(SIGNING_INPUT, &signature, &key).is_ok());
    }

    #[test]
    fn test_hs256_invalid_signature() {
        let key = Key::symmetric(b"your-256-bit-secret".to_vec());
        let result = HS256.verify(SIGNING_INPUT, b"wrong", &key);
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_hs256_wrong_secret() {
        let key = Key::symmetric(b"your-256-bit-secret".to_vec());
        let wrong_key = Key::symmetric(b"wrong-secret".to_vec());

        let signature = HS256.sign(SIGNING_INPUT, &key).unwrap();
        let result = HS256.verify(SIGNING_INPUT, &signature, &wrong_key);
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_hs384_and_hs512_lengths() {
        let key = Key::symmetric(b"your-512-bit-secret-needs-to-be-even-longer".to_vec());

        let sig384 = HS384.sign(SIGNING_INPUT, &key).unwrap();
        assert_eq!(sig384.len(), 48);
        assert!(HS384.verify(SIGNING_INPUT, &sig384, &key).is_ok());

        let sig512 = HS512.sign(SIGNING_INPUT, &key).unwrap();
        assert_eq!(sig512.len(), 64);
        assert!(HS512.verify(SIGNING_INPUT, &sig512, &key).is_ok());

        // A tag from one digest never verifies under another
        assert!(HS512.verify(SIGNING_INPUT, &sig384, &key).is_err());
    }

    #[test]
    fn test_wrong_key_type() {
        let rsa_key = Key::rsa_public(vec![1, 2, 3]);
        let result = HS256.verify(SIGNING_INPUT, b"signature", &rsa_key);
        assert!(matches!(result, Err(Error::KeyTypeMismatch { .. })));
    }
}
