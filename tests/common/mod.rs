//! Shared fixtures for the integration tests

#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    EcdsaKeyPair, KeyPair, RsaKeyPair, ECDSA_P256_SHA256_FIXED_SIGNING,
    ECDSA_P384_SHA384_FIXED_SIGNING, ECDSA_P521_SHA512_FIXED_SIGNING,
};
use jwtcraft::*;
use std::sync::OnceLock;

/// The instant every test decoder is pinned to
pub const NOW: i64 = 1_700_000_000;

/// RSA key pair as (PKCS#8 private DER, PKCS#1 public DER)
pub struct RsaKeys {
    pub private_der: Vec<u8>,
    pub public_der: Vec<u8>,
}

/// 2048-bit RSA keys, generated once per test binary
pub fn rsa_keys() -> &'static RsaKeys {
    static KEYS: OnceLock<RsaKeys> = OnceLock::new();
    KEYS.get_or_init(generate_rsa_keys)
}

/// A second, unrelated RSA key pair
pub fn other_rsa_keys() -> &'static RsaKeys {
    static KEYS: OnceLock<RsaKeys> = OnceLock::new();
    KEYS.get_or_init(generate_rsa_keys)
}

fn generate_rsa_keys() -> RsaKeys {
    use rsa::{pkcs8::EncodePrivateKey, RsaPrivateKey};

    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate key");
    let private_der = private_key
        .to_pkcs8_der()
        .expect("failed to serialize")
        .as_bytes()
        .to_vec();
    let public_der = RsaKeyPair::from_pkcs8(&private_der)
        .expect("failed to load key")
        .public_key()
        .as_ref()
        .to_vec();

    RsaKeys {
        private_der,
        public_der,
    }
}

/// ECDSA key pair as (private key, public key) for the given curve
pub fn ecdsa_keys(curve: EcdsaCurve) -> (Key, Key) {
    let alg = match curve {
        EcdsaCurve::P256 => &ECDSA_P256_SHA256_FIXED_SIGNING,
        EcdsaCurve::P384 => &ECDSA_P384_SHA384_FIXED_SIGNING,
        EcdsaCurve::P521 => &ECDSA_P521_SHA512_FIXED_SIGNING,
    };

    let pkcs8 = EcdsaKeyPair::generate_pkcs8(alg, &SystemRandom::new()).expect("keygen failed");
    let key_pair = EcdsaKeyPair::from_pkcs8(alg, pkcs8.as_ref()).expect("failed to load key");

    (
        Key::ecdsa_private(pkcs8.as_ref().to_vec(), curve),
        Key::ecdsa_public(key_pair.public_key().as_ref().to_vec(), curve),
    )
}

/// (signing key, verification key) for any algorithm
pub fn algorithm_keys(id: AlgorithmId) -> (AlgorithmKey, AlgorithmKey) {
    match id {
        AlgorithmId::None => (AlgorithmKey::none(), AlgorithmKey::none()),
        AlgorithmId::HS256 | AlgorithmId::HS384 | AlgorithmId::HS512 => {
            let key = Key::symmetric(format!("test-secret-for-{id}"));
            let signing = AlgorithmKey::new(id, key).unwrap();
            (signing.clone(), signing)
        }
        AlgorithmId::ES256 | AlgorithmId::ES384 | AlgorithmId::ES512 => {
            let curve = match id {
                AlgorithmId::ES256 => EcdsaCurve::P256,
                AlgorithmId::ES384 => EcdsaCurve::P384,
                _ => EcdsaCurve::P521,
            };
            let (private_key, public_key) = ecdsa_keys(curve);
            (
                AlgorithmKey::new(id, private_key).unwrap(),
                AlgorithmKey::new(id, public_key).unwrap(),
            )
        }
        _ => {
            let keys = rsa_keys();
            (
                AlgorithmKey::new(id, Key::rsa_private(keys.private_der.clone())).unwrap(),
                AlgorithmKey::new(id, Key::rsa_public(keys.public_der.clone())).unwrap(),
            )
        }
    }
}

/// Decoder pinned to [`NOW`]
pub fn decoder(parameters: ValidationParameters) -> Decoder<MiniserdeSerializer, Base64Url, FixedClock> {
    Decoder::with_components(MiniserdeSerializer, Base64Url, FixedClock::at(NOW), parameters)
}

/// HS256 token signed by hand with the `hmac` crate, bypassing the encoder
pub fn hs256_by_hand(header: &str, payload: &str, secret: &[u8]) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    let header_b64 = jwtcraft::utils::base64url::encode(header);
    let payload_b64 = jwtcraft::utils::base64url::encode(payload);
    let signing_input = format!("{}.{}", header_b64, payload_b64);

    let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
    mac.update(signing_input.as_bytes());
    let signature_bytes = mac.finalize().into_bytes();
    let signature_b64 = jwtcraft::utils::base64url::encode_bytes(&signature_bytes);

    format!("{}.{}", signing_input, signature_b64)
}

/// Canonical JSON text of a claim set, for equality checks
pub fn json(claims: &ClaimSet) -> String {
    miniserde::json::to_string(claims)
}
