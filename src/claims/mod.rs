mod validator;

pub use validator::{ClaimsValidator, CustomValidator, ValidationParameters};

use crate::error::{Error, Result};
use miniserde::json::{Array, Number, Object, Value};

/// Registered claim names with time semantics (RFC 7519 Section 4.1)
pub const EXPIRATION: &str = "exp";
pub const NOT_BEFORE: &str = "nbf";
pub const ISSUED_AT: &str = "iat";

/// The payload of a JWT: a mapping from claim name to JSON value
///
/// Keys are kept in sorted order, so two claim sets with the same entries
/// always serialize to the same text. Inserting an existing name replaces
/// the previous value.
///
/// # Examples
///
/// ```
/// use jwtcraft::ClaimSet;
///
/// let mut claims = ClaimSet::new();
/// claims.insert("sub", "user-42");
/// claims.insert("exp", 1_700_000_000_i64);
/// claims.insert("admin", true);
///
/// assert_eq!(claims.subject(), Some("user-42"));
/// assert_eq!(claims.expiration().unwrap(), Some(1_700_000_000));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClaimSet {
    claims: Object,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already decoded JSON object
    pub fn from_object(claims: Object) -> Self {
        Self { claims }
    }

    pub fn as_object(&self) -> &Object {
        &self.claims
    }

    pub fn into_object(self) -> Object {
        self.claims
    }

    /// Insert a claim, returning the value it replaced
    pub fn insert(&mut self, name: impl Into<String>, value: impl IntoClaim) -> Option<Value> {
        self.claims.insert(name.into(), value.into_claim())
    }

    /// Chainable form of [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, value: impl IntoClaim) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Get a claim if it is a JSON string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.claims.get(name) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.claims.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate claims in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.claims.iter()
    }

    /// Issuer (`iss`)
    pub fn issuer(&self) -> Option<&str> {
        self.get_str("iss")
    }

    /// Subject (`sub`)
    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    /// JWT ID (`jti`)
    pub fn jwt_id(&self) -> Option<&str> {
        self.get_str("jti")
    }

    /// Audience (`aud`), which RFC 7519 allows as a string or an array of strings
    ///
    /// Non-string array members are ignored. Returns an empty list when the
    /// claim is absent.
    pub fn audience(&self) -> Vec<String> {
        match self.claims.get("aud") {
            Some(Value::String(aud)) => vec![aud.clone()],
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|value| match value {
                    Value::String(aud) => Some(aud.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Expiration time (`exp`) in seconds since the Unix epoch
    pub fn expiration(&self) -> Result<Option<i64>> {
        self.numeric_date(EXPIRATION)
    }

    /// Not-before time (`nbf`) in seconds since the Unix epoch
    pub fn not_before(&self) -> Result<Option<i64>> {
        self.numeric_date(NOT_BEFORE)
    }

    /// Issued-at time (`iat`) in seconds since the Unix epoch
    pub fn issued_at(&self) -> Result<Option<i64>> {
        self.numeric_date(ISSUED_AT)
    }

    pub fn set_expiration(&mut self, timestamp: i64) {
        self.insert(EXPIRATION, timestamp);
    }

    pub fn set_not_before(&mut self, timestamp: i64) {
        self.insert(NOT_BEFORE, timestamp);
    }

    pub fn set_issued_at(&mut self, timestamp: i64) {
        self.insert(ISSUED_AT, timestamp);
    }

    /// Check that every reserved time claim that is present is numeric
    pub fn check_reserved(&self) -> Result<()> {
        self.expiration()?;
        self.not_before()?;
        self.issued_at()?;
        Ok(())
    }

    /// Read a NumericDate claim; fractional seconds are truncated toward
    /// negative infinity and values beyond the `i64` range are clamped
    fn numeric_date(&self, claim: &str) -> Result<Option<i64>> {
        let format_error = |reason: &str| Error::ClaimFormat {
            claim: claim.to_string(),
            reason: reason.to_string(),
        };

        match self.claims.get(claim) {
            None => Ok(None),
            Some(Value::Number(Number::U64(value))) => {
                Ok(Some(i64::try_from(*value).unwrap_or(i64::MAX)))
            }
            Some(Value::Number(Number::I64(value))) => Ok(Some(*value)),
            // `as` saturates for finite floats
            Some(Value::Number(Number::F64(value))) if value.is_finite() => {
                Ok(Some(value.floor() as i64))
            }
            Some(Value::Number(Number::F64(_))) => Err(format_error("timestamp is not finite")),
            Some(_) => Err(format_error("expected a number of seconds since the Unix epoch")),
        }
    }
}

impl From<Object> for ClaimSet {
    fn from(claims: Object) -> Self {
        Self::from_object(claims)
    }
}

impl miniserde::Serialize for ClaimSet {
    fn begin(&self) -> miniserde::ser::Fragment {
        self.claims.begin()
    }
}

/// Conversion of Rust values into claim values
pub trait IntoClaim {
    fn into_claim(self) -> Value;
}

impl IntoClaim for Value {
    fn into_claim(self) -> Value {
        self
    }
}

impl IntoClaim for &str {
    fn into_claim(self) -> Value {
        Value::String(self.to_string())
    }
}

impl IntoClaim for String {
    fn into_claim(self) -> Value {
        Value::String(self)
    }
}

impl IntoClaim for bool {
    fn into_claim(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoClaim for i64 {
    fn into_claim(self) -> Value {
        if self >= 0 {
            Value::Number(Number::U64(self as u64))
        } else {
            Value::Number(Number::I64(self))
        }
    }
}

impl IntoClaim for i32 {
    fn into_claim(self) -> Value {
        i64::from(self).into_claim()
    }
}

impl IntoClaim for u64 {
    fn into_claim(self) -> Value {
        Value::Number(Number::U64(self))
    }
}

impl IntoClaim for u32 {
    fn into_claim(self) -> Value {
        Value::Number(Number::U64(u64::from(self)))
    }
}

impl IntoClaim for f64 {
    fn into_claim(self) -> Value {
        Value::Number(Number::F64(self))
    }
}

impl IntoClaim for Object {
    fn into_claim(self) -> Value {
        Value::Object(self)
    }
}

impl<T: IntoClaim> IntoClaim for Vec<T> {
    fn into_claim(self) -> Value {
        let mut array = Array::new();
        array.extend(self.into_iter().map(IntoClaim::into_claim));
        Value::Array(array)
    }
}
