use crate::algorithm::AlgorithmId;
use crate::claims::IntoClaim;
use crate::error::{Error, Result};
use miniserde::json::{Object, Value};

/// Default `typ` value
pub const JWT_TYPE: &str = "JWT";

/// JWT header (JOSE header)
///
/// `typ`, `alg` and `kid` are held as typed fields; every other member is
/// kept verbatim as an extension so custom header fields survive a decode.
#[derive(Debug, Clone)]
pub struct Header {
    token_type: Option<String>,
    algorithm: Option<String>,
    key_id: Option<String>,
    extensions: Object,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            token_type: Some(JWT_TYPE.to_string()),
            algorithm: None,
            key_id: None,
            extensions: Object::new(),
        }
    }
}

impl Header {
    /// A header with `typ: "JWT"` and no algorithm yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Token type (typically "JWT")
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    pub fn set_token_type(&mut self, token_type: impl Into<String>) {
        self.token_type = Some(token_type.into());
    }

    /// Omit `typ` from the serialized header
    pub fn clear_token_type(&mut self) {
        self.token_type = None;
    }

    /// Algorithm name as written in the header
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    pub fn set_algorithm(&mut self, algorithm: impl Into<String>) {
        self.algorithm = Some(algorithm.into());
    }

    /// Parse algorithm from header
    ///
    /// Informational only: verification always uses the algorithm the
    /// caller supplies.
    pub fn parse_algorithm(&self) -> Result<AlgorithmId> {
        match &self.algorithm {
            Some(alg) => AlgorithmId::from_str(alg),
            None => Err(Error::MalformedToken("header has no 'alg'".to_string())),
        }
    }

    /// Get key ID if present
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    pub fn set_key_id(&mut self, key_id: impl Into<String>) {
        self.key_id = Some(key_id.into());
    }

    /// Insert a header field
    ///
    /// String values for `typ`, `alg` and `kid` update the typed fields;
    /// anything else is stored as an extension.
    pub fn insert(&mut self, name: impl Into<String>, value: impl IntoClaim) {
        let name = name.into();
        match (name.as_str(), value.into_claim()) {
            ("typ", Value::String(typ)) => self.token_type = Some(typ),
            ("alg", Value::String(alg)) => self.algorithm = Some(alg),
            ("kid", Value::String(kid)) => self.key_id = Some(kid),
            (_, value) => {
                self.extensions.insert(name, value);
            }
        }
    }

    /// Get an extension field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    /// All fields other than `typ`, `alg` and `kid`
    pub fn extensions(&self) -> &Object {
        &self.extensions
    }

    /// Build the JSON object written into the token
    pub fn to_object(&self) -> Object {
        let mut object = self.extensions.clone();
        let fields = [
            ("typ", &self.token_type),
            ("alg", &self.algorithm),
            ("kid", &self.key_id),
        ];
        for (name, field) in fields {
            if let Some(value) = field {
                object.insert(name.to_string(), Value::String(value.clone()));
            }
        }
        object
    }

    /// Read a header from a decoded JSON object
    ///
    /// A non-string `typ`, `alg` or `kid` makes the token malformed.
    pub fn from_object(mut object: Object) -> Result<Self> {
        let mut take = |name: &str| -> Result<Option<String>> {
            match object.remove(name) {
                None => Ok(None),
                Some(Value::String(value)) => Ok(Some(value)),
                Some(_) => Err(Error::MalformedToken(format!(
                    "header field '{name}' must be a string"
                ))),
            }
        };

        let token_type = take("typ")?;
        let algorithm = take("alg")?;
        let key_id = take("kid")?;

        Ok(Self {
            token_type,
            algorithm,
            key_id,
            extensions: object,
        })
    }
}
