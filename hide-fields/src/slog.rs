//! Adapters for emitting hidden values through `slog`.
//!
//! This module connects [`crate::hide_fields`] with `slog` by providing
//! `slog::Value` implementations that serialize the hidden form of a value as
//! structured JSON via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is taken after hiding, never from the
//!   original value.
//! - Avoiding fallible logging APIs: hiding and serialization failures are
//!   represented as placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or decide which fields are hidden.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{hide_fields, Hideable};

/// A `slog::Value` that emits an owned hidden payload as structured JSON.
///
/// The payload is stored as a `serde_json::Value` and emitted via `slog`'s
/// nested-value support.
pub struct HiddenJson {
    value: JsonValue,
}

impl HiddenJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The JSON payload that will be emitted.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for HiddenJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their hidden form as JSON.
///
/// Calling `into_hidden_json` consumes the value, hides its fields in place,
/// and stores the result as a `serde_json::Value`. The original value is not
/// serialized.
///
/// ## Example
/// ```ignore
/// use hide_fields::slog::IntoHiddenJson;
///
/// info!(logger, "login"; "request" => request.into_hidden_json());
/// ```
pub trait IntoHiddenJson: Hideable + Serialize + Sized {
    /// Hides `self` and returns a `slog::Value` that serializes as structured JSON.
    ///
    /// If hiding fails, the payload is the string
    /// `"Failed to hide fields: <error>"`. If the hidden value cannot be
    /// converted into `serde_json::Value`, the payload is the string
    /// `"Failed to serialize hidden value"`.
    fn into_hidden_json(mut self) -> HiddenJson {
        let json_value = match hide_fields(&mut self) {
            Ok(()) => serde_json::to_value(&self).unwrap_or_else(|_| {
                JsonValue::String("Failed to serialize hidden value".to_string())
            }),
            Err(err) => JsonValue::String(format!("Failed to hide fields: {err}")),
        };
        HiddenJson::new(json_value)
    }
}

impl<T> IntoHiddenJson for T where T: Hideable + Serialize {}
