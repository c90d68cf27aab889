//! Feed Codec
//!
//! Tolerant JSON decoding for the price feed stream. Messages carrying
//! an unknown `type` tag, or a `priceUpdate` without a `prices`
//! collection, decode to [`FeedMessage::Ignored`] rather than an
//! error; only text that is not valid JSON (or a snapshot whose
//! records do not match the schema) is reported, and the caller drops
//! it after logging.

use super::messages::{FeedMessage, PRICE_UPDATE_TYPE, PriceUpdateMessage};

/// Codec errors.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// JSON decoding failed.
    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload is not a JSON object.
    #[error("invalid message format: {0}")]
    InvalidFormat(String),
}

/// JSON codec for the price feed stream.
#[derive(Debug, Default, Clone)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create a new JSON codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decode a text frame into a [`FeedMessage`].
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON, is not an
    /// object, or is a tagged snapshot whose `prices` records do not
    /// match the schema.
    pub fn decode(&self, text: &str) -> Result<FeedMessage, CodecError> {
        let value: serde_json::Value = serde_json::from_str(text)?;

        if !value.is_object() {
            let preview: String = text.chars().take(50).collect();
            return Err(CodecError::InvalidFormat(format!(
                "expected JSON object, got: {preview}..."
            )));
        }

        let is_price_update = value
            .get("type")
            .and_then(|v| v.as_str())
            .is_some_and(|t| t == PRICE_UPDATE_TYPE);

        // Wrong tag or missing prices collection: not ours, not an error.
        if !is_price_update || !value.get("prices").is_some_and(serde_json::Value::is_array) {
            return Ok(FeedMessage::Ignored);
        }

        let msg: PriceUpdateMessage = serde_json::from_value(value)?;
        Ok(FeedMessage::PriceUpdate(msg))
    }
}
