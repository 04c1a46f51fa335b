//! # jwtcraft - Issue and Verify JSON Web Tokens
//!
//! > Compact, typed JSON Web Token (JWT) encoding, decoding and validation for Rust.
//!
//! **jwtcraft** builds signed tokens from a claim set and verifies them again: it splits
//! the compact form, decodes the Base64URL segments, checks the signature with an
//! algorithm the caller chooses, and validates the time claims `exp`, `nbf` and `iat`
//! against an injected clock with a configurable margin.
//!
//! ## Overview
//!
//! A JWT is three Base64URL segments joined by dots:
//!
//! ```text
//! base64url(header-json) "." base64url(claims-json) "." base64url(signature)
//! ```
//!
//! The signature covers the first two segments exactly as transmitted. Encoding
//! serializes the [`Header`] and [`ClaimSet`], signs them and appends the signature.
//! Decoding reverses that and then validates:
//!
//! ```text
//! token string
//!     │ split on '.' (exactly three segments)
//!     ▼
//! header + claims (Base64URL -> JSON)
//!     │ verify signature with the caller's AlgorithmKey
//!     ▼
//! verified claims
//!     │ exp / nbf / iat (+ optional aud, iss, max age, custom)
//!     ▼
//! ClaimSet or a typed payload
//! ```
//!
//! The signature is always checked before any claim, so a forged token never reveals
//! whether its claims would have passed.
//!
//! ## Quick Start
//!
//! ```
//! use jwtcraft::*;
//!
//! let algorithm = AlgorithmKey::hs256("your-256-bit-secret");
//!
//! let claims = ClaimSet::new()
//!     .with("sub", "user-42")
//!     .with("exp", 4_102_444_800_i64);
//! let token = Encoder::new().encode_claims(&claims, &algorithm)?;
//!
//! let decoded = Decoder::new(ValidationParameters::default())
//!     .decode(&token, Some(&algorithm))?;
//! assert_eq!(decoded.subject(), Some("user-42"));
//! # Ok::<(), Error>(())
//! ```
//!
//! The same through the fluent [`JwtBuilder`]:
//!
//! ```
//! use jwtcraft::*;
//!
//! let builder = JwtBuilder::new()
//!     .with_algorithm(AlgorithmId::HS256)
//!     .with_secret("your-256-bit-secret");
//!
//! let token = builder.clone().add_claim("sub", "user-42").encode()?;
//! assert_eq!(builder.decode(&token)?.subject(), Some("user-42"));
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Algorithm Support
//!
//! All algorithms implement a common [`Algorithm`] trait:
//!
//! - **HMAC**: HS256, HS384, HS512
//! - **RSA PKCS#1 v1.5**: RS256, RS384, RS512
//! - **RSA-PSS**: PS256, PS384, PS512
//! - **ECDSA**: ES256 (P-256), ES384 (P-384), ES512 (P-521)
//! - **none**: unsigned tokens, accepted only with [`ValidationParameters::allow_unsigned`]
//!
//! RSA and ECDSA private keys are PKCS#8 DER documents and can sign and verify. Public
//! keys only verify.
//!
//! ## Claims Validation
//!
//! ```
//! use jwtcraft::*;
//!
//! let params = ValidationParameters::default()
//!     .time_margin(60)                       // Allow 60s clock skew
//!     .require_audience("my-api")            // Validate `aud` claim
//!     .max_age(3600)                         // Token must be < 1 hour old
//!     .custom(|claims| {                     // Custom validation logic
//!         if claims.subject() != Some("admin") {
//!             Err(Error::TokenInvalidClaim("admin only".to_string()))
//!         } else {
//!             Ok(())
//!         }
//!     });
//! # let _ = params;
//! ```
//!
//! Missing time claims are not errors. Present ones must be numeric; anything else is
//! [`Error::ClaimFormat`].
//!
//! ## Security
//!
//! ### Algorithm Confusion Prevention
//!
//! The decoder never picks an algorithm from the token header. A token claiming
//! `alg: "none"` presented to a decoder expecting HS256 fails with
//! [`Error::SignatureInvalid`].
//!
//! ### "none" Algorithm Rejection
//!
//! Unsigned tokens are rejected per [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725)
//! unless the caller both expects `none` and opts in.
//!
//! ### Timing Attack Protection
//!
//! HMAC signature verification uses constant-time comparison via the [`constant_time_eq`](https://crates.io/crates/constant_time_eq)
//! crate.
//!
//! ## Logging
//!
//! Rejections are reported as `tracing` debug events and skipped signature checks as
//! warnings. No subscriber is installed by the library.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515) - JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) - JSON Web Token (JWT)
//! - [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725) - JSON Web Signature Best Practices

// Core modules
pub mod error;
pub mod utils;

// Capabilities
pub mod serialization;
pub mod time;

// Algorithm system
pub mod algorithm;
pub mod keys;

// Claims and validation
pub mod claims;

// Token encoding and decoding
pub mod token;

// Fluent facade
pub mod builder;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use builder::JwtBuilder;
pub use token::{Decoder, Encoder, Header};

// Configuration types
pub use claims::{ClaimSet, ClaimsValidator, IntoClaim, ValidationParameters};

// Capabilities
pub use serialization::{JsonSerializer, MiniserdeSerializer};
pub use time::{Clock, FixedClock, SystemClock};
pub use utils::{Base64Url, UrlEncoder};

// Supporting types for advanced usage
pub use algorithm::{Algorithm, AlgorithmId, AlgorithmKey};
pub use error::{Error, Result};
pub use keys::{EcdsaCurve, Key, KeyPart};
