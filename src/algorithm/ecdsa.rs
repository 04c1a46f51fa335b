use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::{EcdsaCurve, EcdsaKey, Key, KeyPart};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, EcdsaKeyPair, EcdsaSigningAlgorithm, KeyPair, UnparsedPublicKey};

/// ES256 algorithm (ECDSA with P-256 and SHA-256)
pub struct ES256;

/// ES384 algorithm (ECDSA with P-384 and SHA-384)
pub struct ES384;

/// ES512 algorithm (ECDSA with P-521 and SHA-512)
pub struct ES512;

impl Algorithm for ES256 {
    fn name(&self) -> &'static str {
        "ES256"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        let ecdsa_key = expect_curve("ES256", key, EcdsaCurve::P256)?;
        sign_ecdsa(
            "ES256",
            signing_input,
            ecdsa_key,
            &signature::ECDSA_P256_SHA256_FIXED_SIGNING,
        )
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        let ecdsa_key = expect_curve("ES256", key, EcdsaCurve::P256)?;
        verify_ecdsa(
            signing_input,
            signature,
            ecdsa_key,
            &signature::ECDSA_P256_SHA256_FIXED_SIGNING,
            &signature::ECDSA_P256_SHA256_FIXED,
        )
    }
}

impl Algorithm for ES384 {
    fn name(&self) -> &'static str {
        "ES384"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        let ecdsa_key = expect_curve("ES384", key, EcdsaCurve::P384)?;
        sign_ecdsa(
            "ES384",
            signing_input,
            ecdsa_key,
            &signature::ECDSA_P384_SHA384_FIXED_SIGNING,
        )
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        let ecdsa_key = expect_curve("ES384", key, EcdsaCurve::P384)?;
        verify_ecdsa(
            signing_input,
            signature,
            ecdsa_key,
            &signature::ECDSA_P384_SHA384_FIXED_SIGNING,
            &signature::ECDSA_P384_SHA384_FIXED,
        )
    }
}

impl Algorithm for ES512 {
    fn name(&self) -> &'static str {
        "ES512"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        let ecdsa_key = expect_curve("ES512", key, EcdsaCurve::P521)?;
        sign_ecdsa(
            "ES512",
            signing_input,
            ecdsa_key,
            &signature::ECDSA_P521_SHA512_FIXED_SIGNING,
        )
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        let ecdsa_key = expect_curve("ES512", key, EcdsaCurve::P521)?;
        verify_ecdsa(
            signing_input,
            signature,
            ecdsa_key,
            &signature::ECDSA_P521_SHA512_FIXED_SIGNING,
            &signature::ECDSA_P521_SHA512_FIXED,
        )
    }
}

/// Check that the key is ECDSA on the curve the algorithm requires
fn expect_curve<'k>(algorithm: &str, key: &'k Key, curve: EcdsaCurve) -> Result<&'k EcdsaKey> {
    let ecdsa_key = key.as_ecdsa()?;

    if ecdsa_key.curve() != curve {
        return Err(Error::KeyTypeMismatch {
            algorithm: algorithm.to_string(),
            expected_key_type: format!("ECDSA {:?}", curve),
            actual_key_type: format!("ECDSA {:?}", ecdsa_key.curve()),
        });
    }

    Ok(ecdsa_key)
}

/// Generic ECDSA signing producing the fixed-width `r || s` form
fn sign_ecdsa(
    algorithm: &str,
    signing_input: &[u8],
    key: &EcdsaKey,
    signing_algorithm: &'static EcdsaSigningAlgorithm,
) -> Result<Vec<u8>> {
    if key.part() != KeyPart::Private {
        return Err(Error::KeyTypeMismatch {
            algorithm: algorithm.to_string(),
            expected_key_type: "ECDSA private key".to_string(),
            actual_key_type: "ECDSA public key".to_string(),
        });
    }

    let key_pair = EcdsaKeyPair::from_pkcs8(signing_algorithm, key.as_der())
        .map_err(|e| Error::KeyRejected(e.to_string()))?;

    let signature = key_pair
        .sign(&SystemRandom::new(), signing_input)
        .map_err(|e| Error::SigningFailed(e.to_string()))?;

    Ok(signature.as_ref().to_vec())
}

/// Generic ECDSA signature verification
fn verify_ecdsa(
    signing_input: &[u8],
    signature: &[u8],
    key: &EcdsaKey,
    signing_algorithm: &'static EcdsaSigningAlgorithm,
    algorithm: &'static dyn signature::VerificationAlgorithm,
) -> Result<()> {
    let derived;
    let public_key = match key.part() {
        KeyPart::Public => key.as_der(),
        KeyPart::Private => {
            derived = EcdsaKeyPair::from_pkcs8(signing_algorithm, key.as_der())
                .map_err(|e| Error::KeyRejected(e.to_string()))?;
            derived.public_key().as_ref()
        }
    };

    UnparsedPublicKey::new(algorithm, public_key)
        .verify(signing_input, signature)
        .map_err(|_| Error::SignatureInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNING_INPUT: &[u8] = b"eyJhbGciOiJFUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

    fn signing_algorithm(curve: EcdsaCurve) -> &'static EcdsaSigningAlgorithm {
        match curve {
            EcdsaCurve::P256 => &signature::ECDSA_P256_SHA256_FIXED_SIGNING,
            EcdsaCurve::P384 => &signature::ECDSA_P384_SHA384_FIXED_SIGNING,
            EcdsaCurve::P521 => &signature::ECDSA_P521_SHA512_FIXED_SIGNING,
        }
    }

    /// Returns (private key, public key)
    fn generate_ecdsa_keypair(curve: EcdsaCurve) -> (Key, Key) {
        let alg = signing_algorithm(curve);
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(alg, &SystemRandom::new())
            .expect("Failed to generate key");
        let key_pair = EcdsaKeyPair::from_pkcs8(alg, pkcs8.as_ref()).expect("Failed to parse key");

        (
            Key::ecdsa_private(pkcs8.as_ref().to_vec(), curve),
            Key::ecdsa_public(key_pair.public_key().as_ref().to_vec(), curve),
        )
    }

    #[test]
    fn test_es256_valid_signature() {
        let (private_key, public_key) = generate_ecdsa_keypair(EcdsaCurve::P256);

        let signature = ES256.sign(SIGNING_INPUT, &private_key).unwrap();
        assert_eq!(signature.len(), 64);
        assert!(ES256.verify(SIGNING_INPUT, &signature, &public_key).is_ok());
        assert!(ES256.verify(SIGNING_INPUT, &signature, &private_key).is_ok());
    }

    #[test]
    fn test_es384_valid_signature() {
        let (private_key, public_key) = generate_ecdsa_keypair(EcdsaCurve::P384);

        let signature = ES384.sign(SIGNING_INPUT, &private_key).unwrap();
        assert_eq!(signature.len(), 96);
        assert!(ES384.verify(SIGNING_INPUT, &signature, &public_key).is_ok());
    }

    #[test]
    fn test_es512_valid_signature() {
        let (private_key, public_key) = generate_ecdsa_keypair(EcdsaCurve::P521);

        let signature = ES512.sign(SIGNING_INPUT, &private_key).unwrap();
        assert_eq!(signature.len(), 132);
        assert!(ES512.verify(SIGNING_INPUT, &signature, &public_key).is_ok());
    }

    #[test]
    fn test_es256_invalid_signature() {
        let (_, public_key) = generate_ecdsa_keypair(EcdsaCurve::P256);

        let result = ES256.verify(SIGNING_INPUT, b"wrong_signature", &public_key);
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_es256_tampered_input() {
        let (private_key, public_key) = generate_ecdsa_keypair(EcdsaCurve::P256);

        let signature = ES256.sign(SIGNING_INPUT, &private_key).unwrap();
        let result = ES256.verify(b"eyJhbGciOiJFUzI1NiJ9.e30", &signature, &public_key);
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_es256_wrong_key() {
        let (private_key, _) = generate_ecdsa_keypair(EcdsaCurve::P256);
        let (_, wrong_public_key) = generate_ecdsa_keypair(EcdsaCurve::P256);

        let signature = ES256.sign(SIGNING_INPUT, &private_key).unwrap();
        let result = ES256.verify(SIGNING_INPUT, &signature, &wrong_public_key);
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_es256_wrong_curve() {
        let (private_key, public_key) = generate_ecdsa_keypair(EcdsaCurve::P384);

        assert!(matches!(
            ES256.sign(SIGNING_INPUT, &private_key),
            Err(Error::KeyTypeMismatch { .. })
        ));
        assert!(matches!(
            ES256.verify(SIGNING_INPUT, b"signature", &public_key),
            Err(Error::KeyTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_es512_wrong_curve() {
        let (_, public_key) = generate_ecdsa_keypair(EcdsaCurve::P256);

        let result = ES512.verify(SIGNING_INPUT, b"signature", &public_key);
        assert!(matches!(result, Err(Error::KeyTypeMismatch { .. })));
    }

    #[test]
    fn test_public_key_cannot_sign() {
        let (_, public_key) = generate_ecdsa_keypair(EcdsaCurve::P256);

        let result = ES256.sign(SIGNING_INPUT, &public_key);
        assert!(matches!(result, Err(Error::KeyTypeMismatch { .. })));
    }

    #[test]
    fn test_wrong_key_type() {
        let sym_key = Key::symmetric(b"secret".to_vec());
        let result = ES256.verify(SIGNING_INPUT, b"signature", &sym_key);
        assert!(matches!(result, Err(Error::KeyTypeMismatch { .. })));
    }
}
