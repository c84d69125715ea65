//! Adapters for emitting redacted records through `slog`.
//!
//! This module connects [`Shrouded`] with `slog` by providing `slog::Value`
//! implementations that serialize the redacted mapping as structured JSON via
//! `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is derived from
//!   [`Shrouded::to_redacted_map`], never from the raw record.
//! - Avoiding fallible logging APIs: failures to compute the redacted mapping
//!   are represented as placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or define redaction policy.

use serde_json::Value as JsonValue;
use slog::{Key, Record as SlogRecord, Result as SlogResult, Serializer, Value as SlogValue};

use crate::record::Record;
use crate::redaction::Shrouded;

/// A `slog::Value` that emits an owned redacted payload as structured JSON.
///
/// The payload is stored as a `serde_json::Value` and emitted via `slog`'s
/// nested-value support.
pub struct RedactedJson {
    value: JsonValue,
}

impl RedactedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }
}

impl SlogValue for RedactedJson {
    fn serialize(
        &self,
        record: &SlogRecord<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

impl<R: Record> Shrouded<R> {
    /// Computes the redacted mapping as a `slog::Value` emitting structured
    /// JSON.
    ///
    /// If the redacted mapping cannot be computed (a substitution failed, or
    /// the record could not serialize an attribute), the returned value
    /// stores a JSON string with the message
    /// `"Failed to serialize redacted record"`.
    #[must_use]
    pub fn to_redacted_json(&self) -> RedactedJson {
        let value = self
            .to_redacted_map()
            .map(JsonValue::Object)
            .unwrap_or_else(|_| {
                JsonValue::String("Failed to serialize redacted record".to_string())
            });
        RedactedJson::new(value)
    }
}

/// Logging a wrapper emits its redacted mapping.
///
/// ## Example
/// ```ignore
/// info!(logger, "user loaded"; "user" => &user.shroud());
/// ```
impl<R: Record> SlogValue for Shrouded<R> {
    fn serialize(
        &self,
        record: &SlogRecord<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        SlogValue::serialize(&self.to_redacted_json(), record, key, serializer)
    }
}
