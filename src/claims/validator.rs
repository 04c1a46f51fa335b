use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::utils::bounds::apply_margin;
use std::sync::Arc;
use tracing::debug;

/// Caller-supplied check run after the built-in claim checks
pub type CustomValidator = Arc<dyn Fn(&ClaimSet) -> Result<()> + Send + Sync>;

/// Configuration for decoding and claims validation
///
/// The default validates everything: the signature, `exp`, `nbf` and
/// `iat`, with no time margin. Every check is turned off explicitly.
#[derive(Clone)]
pub struct ValidationParameters {
    /// Verify the signature segment
    pub validate_signature: bool,

    /// Validate expiration time (exp claim)
    pub validate_expiration_time: bool,

    /// Validate not-before (nbf claim) and issued-at (iat claim)
    pub validate_issued_time: bool,

    /// Clock skew tolerance in seconds, applied to both bounds
    pub time_margin: u64,

    /// Maximum age of token in seconds, measured from `iat`
    /// Only applies if validate_issued_time is true
    pub max_age: Option<u64>,

    /// Accept tokens signed with the `none` algorithm
    pub allow_unsigned: bool,

    /// Required audience value
    pub required_audience: Option<String>,

    /// Required issuer value
    pub required_issuer: Option<String>,

    /// Reject longer tokens before splitting them
    pub max_token_length: Option<usize>,

    /// Custom validation function
    pub custom_validator: Option<CustomValidator>,
}

impl Default for ValidationParameters {
    fn default() -> Self {
        Self {
            validate_signature: true,
            validate_expiration_time: true,
            validate_issued_time: true,
            time_margin: 0,
            max_age: None,
            allow_unsigned: false,
            required_audience: None,
            required_issuer: None,
            max_token_length: None,
            custom_validator: None,
        }
    }
}

impl std::fmt::Debug for ValidationParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationParameters")
            .field("validate_signature", &self.validate_signature)
            .field("validate_expiration_time", &self.validate_expiration_time)
            .field("validate_issued_time", &self.validate_issued_time)
            .field("time_margin", &self.time_margin)
            .field("max_age", &self.max_age)
            .field("allow_unsigned", &self.allow_unsigned)
            .field("required_audience", &self.required_audience)
            .field("required_issuer", &self.required_issuer)
            .field("max_token_length", &self.max_token_length)
            .field("custom_validator", &self.custom_validator.is_some())
            .finish()
    }
}

impl ValidationParameters {
    /// Create new validation parameters with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clock skew tolerance
    pub fn time_margin(mut self, seconds: u64) -> Self {
        self.time_margin = seconds;
        self
    }

    /// Set maximum token age
    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Require a specific audience
    pub fn require_audience(mut self, audience: impl Into<String>) -> Self {
        self.required_audience = Some(audience.into());
        self
    }

    /// Require a specific issuer
    pub fn require_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.required_issuer = Some(issuer.into());
        self
    }

    /// Reject tokens longer than `bytes`
    pub fn max_token_length(mut self, bytes: usize) -> Self {
        self.max_token_length = Some(bytes);
        self
    }

    /// Disable signature verification
    pub fn no_signature_validation(mut self) -> Self {
        self.validate_signature = false;
        self
    }

    /// Disable expiration validation
    pub fn no_exp_validation(mut self) -> Self {
        self.validate_expiration_time = false;
        self
    }

    /// Disable not-before and issued-at validation
    pub fn no_issued_time_validation(mut self) -> Self {
        self.validate_issued_time = false;
        self
    }

    /// Accept `alg: none` tokens when the caller also expects `none`
    pub fn allow_unsigned(mut self) -> Self {
        self.allow_unsigned = true;
        self
    }

    /// Skip all time validation (use with extreme caution!)
    ///
    /// This disables the exp, nbf, iat and max-age checks. The signature is
    /// still verified; use [`no_signature_validation`](Self::no_signature_validation)
    /// for that.
    pub fn skip_all(mut self) -> Self {
        self.validate_expiration_time = false;
        self.validate_issued_time = false;
        self.max_age = None;
        self
    }

    /// Add custom validation function
    pub fn custom<F>(mut self, validator: F) -> Self
    where
        F: Fn(&ClaimSet) -> Result<()> + Send + Sync + 'static,
    {
        self.custom_validator = Some(Arc::new(validator));
        self
    }
}

/// Claims validator
pub struct ClaimsValidator;

impl ClaimsValidator {
    /// Validate claims according to the parameters at instant `now`
    /// (seconds since the Unix epoch)
    ///
    /// Checks run in a fixed order: `exp`, `nbf`, `iat`, max age, audience,
    /// issuer, then the custom validator. Absent time claims are skipped.
    pub fn validate(claims: &ClaimSet, params: &ValidationParameters, now: i64) -> Result<()> {
        let margin = params.time_margin;

        // Validate expiration
        if params.validate_expiration_time {
            if let Some(exp) = claims.expiration()? {
                if now > apply_margin(exp, margin, true) {
                    debug!(exp, now, margin, "token expired");
                    return Err(Error::TokenExpired {
                        expired_at: exp,
                        now,
                        margin,
                    });
                }
            }
        }

        if params.validate_issued_time {
            // Validate not-before
            if let Some(nbf) = claims.not_before()? {
                if now < apply_margin(nbf, margin, false) {
                    debug!(nbf, now, margin, "token not yet valid");
                    return Err(Error::TokenNotYetValid {
                        claim: "nbf",
                        valid_from: nbf,
                        now,
                        margin,
                    });
                }
            }

            if let Some(iat) = claims.issued_at()? {
                // Check if issued in the future
                if iat > apply_margin(now, margin, true) {
                    debug!(iat, now, margin, "token issued in the future");
                    return Err(Error::TokenNotYetValid {
                        claim: "iat",
                        valid_from: iat,
                        now,
                        margin,
                    });
                }

                // Check max age
                if let Some(max_age) = params.max_age {
                    let oldest = apply_margin(iat, max_age, true);
                    if now > apply_margin(oldest, margin, true) {
                        debug!(iat, now, max_age, "token too old");
                        return Err(Error::TokenTooOld {
                            issued_at: iat,
                            now,
                            max_age,
                        });
                    }
                }
            }
        }

        // Validate audience
        if let Some(required) = &params.required_audience {
            if !claims.contains("aud") {
                return Err(Error::TokenMissingClaim("aud".to_string()));
            }
            let found = claims.audience();
            if !found.iter().any(|aud| aud == required) {
                debug!(expected = %required, "audience mismatch");
                return Err(Error::TokenAudienceMismatch {
                    expected: required.clone(),
                    found,
                });
            }
        }

        // Validate issuer
        if let Some(required) = &params.required_issuer {
            match claims.issuer() {
                Some(iss) if iss == required => {}
                Some(iss) => {
                    debug!(expected = %required, found = %iss, "issuer mismatch");
                    return Err(Error::TokenIssuerMismatch {
                        expected: required.clone(),
                        found: iss.to_string(),
                    });
                }
                None => return Err(Error::TokenMissingClaim("iss".to_string())),
            }
        }

        // Run custom validation
        if let Some(validator) = &params.custom_validator {
            validator(claims)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn make_claims(exp: Option<i64>, nbf: Option<i64>, iat: Option<i64>) -> ClaimSet {
        let mut claims = ClaimSet::new();
        if let Some(exp) = exp {
            claims.set_expiration(exp);
        }
        if let Some(nbf) = nbf {
            claims.set_not_before(nbf);
        }
        if let Some(iat) = iat {
            claims.set_issued_at(iat);
        }
        claims
    }

    fn validate(claims: &ClaimSet, params: &ValidationParameters) -> Result<()> {
        ClaimsValidator::validate(claims, params, NOW)
    }

    #[test]
    fn test_valid_token() {
        let claims = make_claims(Some(NOW + 3600), Some(NOW - 60), Some(NOW));
        assert!(validate(&claims, &ValidationParameters::default()).is_ok());
    }

    #[test]
    fn test_no_time_claims() {
        assert!(validate(&ClaimSet::new(), &ValidationParameters::default()).is_ok());
    }

    #[test]
    fn test_expiration_boundaries() {
        let params = ValidationParameters::default();

        assert!(matches!(
            validate(&make_claims(Some(NOW - 1), None, None), &params),
            Err(Error::TokenExpired { .. })
        ));
        // now == exp is still accepted; only now > exp + margin fails
        assert!(validate(&make_claims(Some(NOW), None, None), &params).is_ok());
        assert!(validate(&make_claims(Some(NOW + 1), None, None), &params).is_ok());
    }

    #[test]
    fn test_expiration_margin() {
        let params = ValidationParameters::default().time_margin(5);

        assert!(validate(&make_claims(Some(NOW - 3), None, None), &params).is_ok());
        assert!(validate(&make_claims(Some(NOW - 5), None, None), &params).is_ok());
        assert!(matches!(
            validate(&make_claims(Some(NOW - 10), None, None), &params),
            Err(Error::TokenExpired { margin: 5, .. })
        ));
    }

    #[test]
    fn test_not_before_boundaries() {
        let params = ValidationParameters::default();

        assert!(matches!(
            validate(&make_claims(None, Some(NOW + 1), None), &params),
            Err(Error::TokenNotYetValid { claim: "nbf", .. })
        ));
        assert!(validate(&make_claims(None, Some(NOW), None), &params).is_ok());
        assert!(validate(&make_claims(None, Some(NOW - 1), None), &params).is_ok());

        let params = params.time_margin(5);
        assert!(validate(&make_claims(None, Some(NOW + 3), None), &params).is_ok());
        assert!(matches!(
            validate(&make_claims(None, Some(NOW + 10), None), &params),
            Err(Error::TokenNotYetValid { claim: "nbf", .. })
        ));
    }

    #[test]
    fn test_issued_in_future() {
        let params = ValidationParameters::default();
        assert!(matches!(
            validate(&make_claims(None, None, Some(NOW + 30)), &params),
            Err(Error::TokenNotYetValid { claim: "iat", .. })
        ));

        let params = params.time_margin(60);
        assert!(validate(&make_claims(None, None, Some(NOW + 30)), &params).is_ok());
    }

    #[test]
    fn test_max_age() {
        let params = ValidationParameters::default().max_age(3600);

        assert!(validate(&make_claims(None, None, Some(NOW - 3600)), &params).is_ok());
        assert!(matches!(
            validate(&make_claims(None, None, Some(NOW - 3601)), &params),
            Err(Error::TokenTooOld { max_age: 3600, .. })
        ));
    }

    #[test]
    fn test_selective_validation() {
        let expired = make_claims(Some(NOW - 120), None, None);
        let params = ValidationParameters::default().no_exp_validation();
        assert!(validate(&expired, &params).is_ok());

        let early = make_claims(None, Some(NOW + 120), Some(NOW + 120));
        let params = ValidationParameters::default().no_issued_time_validation();
        assert!(validate(&early, &params).is_ok());

        let params = ValidationParameters::default().skip_all();
        assert!(validate(&expired, &params).is_ok());
        assert!(validate(&early, &params).is_ok());
        assert!(params.validate_signature);
    }

    #[test]
    fn test_disabled_check_does_not_read_claim() {
        let claims = ClaimSet::new().with("exp", "soon");
        let params = ValidationParameters::default().no_exp_validation();
        assert!(validate(&claims, &params).is_ok());

        let result = validate(&claims, &ValidationParameters::default());
        assert!(matches!(result, Err(Error::ClaimFormat { .. })));
    }

    #[test]
    fn test_extreme_timestamps_with_margin() {
        let params = ValidationParameters::default().time_margin(5);

        let claims = make_claims(Some(i64::MAX), None, None);
        assert!(validate(&claims, &params).is_ok());

        let claims = make_claims(None, Some(i64::MIN), Some(i64::MIN));
        assert!(validate(&claims, &params).is_ok());

        let params = params.max_age(u64::MAX);
        let claims = make_claims(None, None, Some(NOW - 1_000_000));
        assert!(validate(&claims, &params).is_ok());
    }

    #[test]
    fn test_huge_margin() {
        let params = ValidationParameters::default().time_margin(u64::MAX);

        let claims = make_claims(Some(NOW + 60), Some(NOW + 60), Some(NOW + 60));
        assert!(validate(&claims, &params).is_ok());

        let claims = make_claims(Some(i64::MIN), None, None);
        assert!(matches!(
            validate(&claims, &params),
            Err(Error::TokenExpired { .. })
        ));
    }

    #[test]
    fn test_out_of_range_numeric_dates_clamp() {
        let params = ValidationParameters::default();

        let claims = ClaimSet::new().with("exp", u64::MAX);
        assert_eq!(claims.expiration().unwrap(), Some(i64::MAX));
        assert!(validate(&claims, &params).is_ok());

        let claims = ClaimSet::new().with("exp", 1e20);
        assert_eq!(claims.expiration().unwrap(), Some(i64::MAX));
        assert!(validate(&claims, &params).is_ok());

        let claims = ClaimSet::new().with("exp", -1e20);
        assert_eq!(claims.expiration().unwrap(), Some(i64::MIN));
        assert!(matches!(
            validate(&claims, &params),
            Err(Error::TokenExpired { .. })
        ));
    }

    #[test]
    fn test_audience() {
        let params = ValidationParameters::default().require_audience("api");

        assert!(validate(&ClaimSet::new().with("aud", "api"), &params).is_ok());
        assert!(validate(&ClaimSet::new().with("aud", vec!["web", "api"]), &params).is_ok());
        assert!(matches!(
            validate(&ClaimSet::new().with("aud", "web"), &params),
            Err(Error::TokenAudienceMismatch { .. })
        ));
        assert!(matches!(
            validate(&ClaimSet::new(), &params),
            Err(Error::TokenMissingClaim(_))
        ));
    }

    #[test]
    fn test_issuer() {
        let params = ValidationParameters::default().require_issuer("https://issuer.example");

        let claims = ClaimSet::new().with("iss", "https://issuer.example");
        assert!(validate(&claims, &params).is_ok());

        let claims = ClaimSet::new().with("iss", "https://evil.example");
        assert!(matches!(
            validate(&claims, &params),
            Err(Error::TokenIssuerMismatch { .. })
        ));
        assert!(matches!(
            validate(&ClaimSet::new(), &params),
            Err(Error::TokenMissingClaim(_))
        ));
    }

    #[test]
    fn test_custom_validator() {
        let params = ValidationParameters::default().custom(|claims| {
            if claims.get_str("role") == Some("admin") {
                Ok(())
            } else {
                Err(Error::TokenInvalidClaim("role must be admin".to_string()))
            }
        });

        assert!(validate(&ClaimSet::new().with("role", "admin"), &params).is_ok());
        assert!(matches!(
            validate(&ClaimSet::new().with("role", "user"), &params),
            Err(Error::TokenInvalidClaim(_))
        ));
    }
}
