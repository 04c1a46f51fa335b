use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::{Key, KeyPart, RsaKey};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, KeyPair, RsaEncoding, RsaKeyPair, UnparsedPublicKey};

/// RS256 algorithm (RSASSA-PKCS1-v1_5 with SHA-256)
pub struct RS256;

/// RS384 algorithm (RSASSA-PKCS1-v1_5 with SHA-384)
pub struct RS384;

/// RS512 algorithm (RSASSA-PKCS1-v1_5 with SHA-512)
pub struct RS512;

/// PS256 algorithm (RSASSA-PSS with SHA-256)
pub struct PS256;

/// PS384 algorithm (RSASSA-PSS with SHA-384)
pub struct PS384;

/// PS512 algorithm (RSASSA-PSS with SHA-512)
pub struct PS512;

macro_rules! rsa_algorithm {
    ($name:ident, $alg:literal, $signing:expr, $verification:expr) => {
        impl Algorithm for $name {
            fn name(&self) -> &'static str {
                $alg
            }

            fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
                sign_rsa($alg, signing_input, key.as_rsa()?, $signing)
            }

            fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
                verify_rsa(signing_input, signature, key.as_rsa()?, $verification)
            }
        }
    };
}

rsa_algorithm!(
    RS256,
    "RS256",
    &signature::RSA_PKCS1_SHA256,
    &signature::RSA_PKCS1_2048_8192_SHA256
);
rsa_algorithm!(
    RS384,
    "RS384",
    &signature::RSA_PKCS1_SHA384,
    &signature::RSA_PKCS1_2048_8192_SHA384
);
rsa_algorithm!(
    RS512,
    "RS512",
    &signature::RSA_PKCS1_SHA512,
    &signature::RSA_PKCS1_2048_8192_SHA512
);
rsa_algorithm!(
    PS256,
    "PS256",
    &signature::RSA_PSS_SHA256,
    &signature::RSA_PSS_2048_8192_SHA256
);
rsa_algorithm!(
    PS384,
    "PS384",
    &signature::RSA_PSS_SHA384,
    &signature::RSA_PSS_2048_8192_SHA384
);
rsa_algorithm!(
    PS512,
    "PS512",
    &signature::RSA_PSS_SHA512,
    &signature::RSA_PSS_2048_8192_SHA512
);

/// Load a PKCS#8 RSA private key
fn load_key_pair(algorithm: &str, key: &RsaKey) -> Result<RsaKeyPair> {
    if key.part() != KeyPart::Private {
        return Err(Error::KeyTypeMismatch {
            algorithm: algorithm.to_string(),
            expected_key_type: "RSA private key".to_string(),
            actual_key_type: "RSA public key".to_string(),
        });
    }

    RsaKeyPair::from_pkcs8(key.as_der()).map_err(|e| Error::KeyRejected(e.to_string()))
}

/// Generic RSA signing (PKCS#1 v1.5 is deterministic, PSS is randomized)
fn sign_rsa(
    algorithm: &str,
    signing_input: &[u8],
    key: &RsaKey,
    encoding: &'static dyn RsaEncoding,
) -> Result<Vec<u8>> {
    let key_pair = load_key_pair(algorithm, key)?;
    let rng = SystemRandom::new();

    let mut signature = vec![0u8; key_pair.public_modulus_len()];
    key_pair
        .sign(encoding, &rng, signing_input, &mut signature)
        .map_err(|e| Error::SigningFailed(e.to_string()))?;

    Ok(signature)
}

/// Generic RSA signature verification
///
/// A private key verifies with its own public half.
fn verify_rsa(
    signing_input: &[u8],
    signature: &[u8],
    key: &RsaKey,
    algorithm: &'static dyn signature::VerificationAlgorithm,
) -> Result<()> {
    let derived;
    let public_key_der = match key.part() {
        KeyPart::Public => key.as_der(),
        KeyPart::Private => {
            derived = RsaKeyPair::from_pkcs8(key.as_der())
                .map_err(|e| Error::KeyRejected(e.to_string()))?;
            derived.public_key().as_ref()
        }
    };

    UnparsedPublicKey::new(algorithm, public_key_der)
        .verify(signing_input, signature)
        .map_err(|_| Error::SignatureInvalid)
}
