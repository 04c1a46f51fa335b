//! Errors for jwtcraft
//!
//! Every failure in the encode/decode pipeline surfaces as one variant of
//! [`Error`], independent of the algorithm, serializer or codec in use.

use thiserror::Error;

/// jwtcraft errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    /// Token is not three valid Base64URL segments, or a segment is not the
    /// expected JSON shape
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Codec-level Base64URL failure
    #[error("Base64URL decoding failed: {0}")]
    Decode(String),

    /// A reserved claim (`exp`, `nbf`, `iat`) is present but not numeric
    #[error("Claim '{claim}' has an invalid format: {reason}")]
    ClaimFormat { claim: String, reason: String },

    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("JSON serialization failed: {0}")]
    Serialization(String),

    // ============================================================================
    // Algorithm and Key Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    /// Unsigned tokens were presented without `allow_unsigned`
    #[error("The 'none' algorithm is rejected unless unsigned tokens are explicitly allowed")]
    AlgorithmNoneRejected,

    #[error(
        "Key type mismatch for algorithm '{algorithm}': expected {expected_key_type}, got {actual_key_type}"
    )]
    KeyTypeMismatch {
        algorithm: String,
        expected_key_type: String,
        actual_key_type: String,
    },

    #[error("Key rejected: {0}")]
    KeyRejected(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Token Errors
    // ============================================================================
    #[error("Token expired at {expired_at} (now: {now}, margin: {margin}s)")]
    TokenExpired {
        expired_at: i64,
        now: i64,
        margin: u64,
    },

    /// `nbf` lies in the future, or `iat` lies in the future beyond the margin
    #[error("Token not valid until {valid_from} per '{claim}' (now: {now}, margin: {margin}s)")]
    TokenNotYetValid {
        claim: &'static str,
        valid_from: i64,
        now: i64,
        margin: u64,
    },

    #[error("Token too old: issued at {issued_at}, max age {max_age}s (now: {now})")]
    TokenTooOld {
        issued_at: i64,
        now: i64,
        max_age: u64,
    },

    #[error("Token audience mismatch: expected '{expected}', found {found:?}")]
    TokenAudienceMismatch {
        expected: String,
        found: Vec<String>,
    },

    #[error("Token issuer mismatch: expected '{expected}', found '{found}'")]
    TokenIssuerMismatch { expected: String, found: String },

    #[error("Required token claim '{0}' is missing")]
    TokenMissingClaim(String),

    #[error("Token claim validation failed: {0}")]
    TokenInvalidClaim(String),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),
}

/// Result type alias for jwtcraft operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = Error::TokenExpired {
            expired_at: 100,
            now: 200,
            margin: 5,
        };
        assert_eq!(err.to_string(), "Token expired at 100 (now: 200, margin: 5s)");

        let err = Error::TokenNotYetValid {
            claim: "iat",
            valid_from: 300,
            now: 200,
            margin: 0,
        };
        assert!(err.to_string().contains("'iat'"));
    }
}
