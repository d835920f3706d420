//! Pluggable value serialization.
//!
//! The cache stores arbitrary serde-compatible values; the strategy that
//! turns them into entry payload text is swappable via the [`Serializer`]
//! trait. [`JsonSerializer`] is the default.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error type produced by serializer strategies.
pub type SerializeError = Box<dyn std::error::Error + Send + Sync>;

/// Strategy converting stored values to and from entry payload text.
///
/// The payload is embedded as a string field of the entry record, so a
/// strategy must produce text; a binary format needs an encoding layer
/// (base64 or similar) on top.
pub trait Serializer {
    /// Encode a value into payload text.
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, SerializeError>;

    /// Decode payload text into a value.
    fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T, SerializeError>;
}

/// The default strategy: payloads stored as JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, SerializeError> {
        Ok(serde_json::to_string(value)?)
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T, SerializeError> {
        Ok(serde_json::from_str(data)?)
    }
}
