//! JSON serialization capability
//!
//! The encoder and decoder never call a JSON library directly; they go
//! through a [`JsonSerializer`] owned by the instance. [`MiniserdeSerializer`]
//! is the stock implementation.

use crate::error::{Error, Result};
use miniserde::{Deserialize, Serialize};

/// Serialize values to JSON text and back
pub trait JsonSerializer {
    /// Serialize a value to JSON text
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String>;

    /// Deserialize JSON text into `T`
    fn deserialize<T: Deserialize>(&self, text: &str) -> Result<T>;
}

impl<S: JsonSerializer + ?Sized> JsonSerializer for &S {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        (**self).serialize(value)
    }

    fn deserialize<T: Deserialize>(&self, text: &str) -> Result<T> {
        (**self).deserialize(text)
    }
}

/// JSON serializer backed by `miniserde`
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniserdeSerializer;

impl JsonSerializer for MiniserdeSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(miniserde::json::to_string(value))
    }

    fn deserialize<T: Deserialize>(&self, text: &str) -> Result<T> {
        miniserde::json::from_str(text).map_err(|e| Error::Serialization(e.to_string()))
    }
}
