//! The record boundary: where attribute values live.
//!
//! This module defines the only seam between the redaction engine and the
//! host application's storage:
//!
//! - [`Record`]: raw attribute access by key plus the full ordered mapping
//! - [`AttributeMap`]: the ordered key-to-value mapping type
//! - [`RecordError`]: the failure surface of record reads and substitutions
//!
//! A record never learns about redaction. The wrapper in `crate::redaction`
//! decides per read whether to consult the record's normal read path or to
//! substitute a value, and it only ever *reads* through this trait.
//!
//! ## Absent vs. stored null
//!
//! `raw_attribute` distinguishes a key with no stored value (`Ok(None)`) from
//! a key storing JSON null (`Ok(Some(Value::Null))`). The distinction matters:
//! a field that is not stored at all is never redacted, because there is
//! nothing to hide.

use serde_json::Value;
use thiserror::Error;

/// Ordered attribute mapping, preserving insertion order.
///
/// Derived records insert attributes in declaration order, so iteration
/// yields the type's natural field order.
pub type AttributeMap = serde_json::Map<String, Value>;

/// Error type accepted from user-supplied substitution functions and custom
/// record backends.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure surface of attribute reads through a [`Shrouded`] wrapper.
///
/// A missing substitution function is *not* an error (the default substitute
/// applies); only genuine failures reach this type.
///
/// [`Shrouded`]: crate::Shrouded
#[derive(Debug, Error)]
pub enum RecordError {
    /// An attribute value could not be converted into JSON.
    #[error("failed to serialize attribute data")]
    Serialize(#[from] serde_json::Error),
    /// A registered substitution function failed; the source error is the
    /// user function's own failure, surfaced verbatim.
    #[error("substitution for field `{field}` failed")]
    Substitution {
        /// The field whose substitution function failed.
        field: String,
        /// The substitution function's error.
        #[source]
        source: BoxError,
    },
    /// A custom record backend failed to produce an attribute.
    #[error("record storage error")]
    Storage(#[source] BoxError),
}

/// Raw attribute access for a record instance.
///
/// Implemented by `#[derive(Redactable)]` for structs, and manually for
/// records backed by anything else (a row map, a document, a cache entry).
/// The wrapper in `crate::redaction` calls `raw_attribute` when computing a
/// substitute (so custom substitutions see the stored value, not a cast one)
/// and `read_attribute` when redaction does not apply.
pub trait Record {
    /// Returns the stored, uncast value for `key`, or `None` when the record
    /// holds nothing under that key.
    fn raw_attribute(&self, key: &str) -> Result<Option<Value>, RecordError>;

    /// Returns all stored attributes in the record's natural order.
    fn raw_attribute_map(&self) -> Result<AttributeMap, RecordError>;

    /// The record's own non-redacted read path.
    ///
    /// Override this to apply casts or computed accessors. The default is the
    /// raw stored value.
    fn read_attribute(&self, key: &str) -> Result<Option<Value>, RecordError> {
        self.raw_attribute(key)
    }
}

/// Plain JSON objects are records; keys map to themselves in insertion order.
impl Record for AttributeMap {
    fn raw_attribute(&self, key: &str) -> Result<Option<Value>, RecordError> {
        Ok(self.get(key).cloned())
    }

    fn raw_attribute_map(&self) -> Result<AttributeMap, RecordError> {
        Ok(self.clone())
    }
}
