//! The read-intercepting wrapper.
//!
//! [`Shrouded`] is an explicit decorator: it holds the record it wraps and
//! implements the read surface itself, delegating to the record except where
//! redaction applies. Composition replaces any notion of overriding a base
//! class's attribute accessor.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::record::{AttributeMap, BoxError, Record, RecordError};

use super::{
    policy::{FieldSpec, RedactionPolicy},
    substitution::SubstitutionTable,
};

/// A record wrapped with a redaction policy.
///
/// Every single-field read ([`Shrouded::attribute`]) and every full-record
/// serialization ([`Shrouded::to_redacted_map`]) consults the policy. The
/// wrapped record's stored values are never modified; reading through
/// [`Shrouded::record`] or unwrapping with [`Shrouded::into_inner`] yields
/// them untouched.
///
/// No decision is cached: mutating the policy between reads takes effect on
/// the next read.
pub struct Shrouded<R> {
    record: R,
    policy: RedactionPolicy,
    substitutions: SubstitutionTable,
}

impl<R: Record> Shrouded<R> {
    /// Wraps `record` with an explicit policy and no substitutions.
    #[must_use]
    pub fn with_policy(record: R, policy: RedactionPolicy) -> Self {
        Self {
            record,
            policy,
            substitutions: SubstitutionTable::new(),
        }
    }

    /// Replaces the substitution table.
    #[must_use]
    pub fn with_substitutions(mut self, substitutions: SubstitutionTable) -> Self {
        self.substitutions = substitutions;
        self
    }

    /// The wrapped record, raw values intact.
    pub fn record(&self) -> &R {
        &self.record
    }

    /// Mutable access to the wrapped record.
    pub fn record_mut(&mut self) -> &mut R {
        &mut self.record
    }

    /// Unwraps the record, discarding policy and substitutions.
    pub fn into_inner(self) -> R {
        self.record
    }

    /// The active policy.
    pub fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    /// Mutable access to the active policy.
    pub fn policy_mut(&mut self) -> &mut RedactionPolicy {
        &mut self.policy
    }

    /// The active substitution table.
    pub fn substitutions(&self) -> &SubstitutionTable {
        &self.substitutions
    }

    /// Mutable access to the active substitution table.
    pub fn substitutions_mut(&mut self) -> &mut SubstitutionTable {
        &mut self.substitutions
    }

    /// Registers a substitution for `field` on this instance.
    pub fn register_substitution<F>(&mut self, field: impl Into<String>, substitute: F)
    where
        F: Fn(&Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.substitutions.register(field, substitute);
    }

    /// Disables redaction for all fields.
    pub fn disable_all_protection(&mut self) {
        self.policy.disable_all_protection();
    }

    /// Re-enables redaction.
    pub fn enable_all_protection(&mut self) {
        self.policy.enable_all_protection();
    }

    /// Appends one field to the redacted set.
    pub fn add_redacted_field(&mut self, field: impl Into<String>) {
        self.policy.add_redacted_field(field);
    }

    /// Replaces the redacted-field set.
    pub fn replace_redacted_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy.replace_redacted_fields(fields);
    }

    /// Dual-mode setter: a single name appends, a list replaces.
    pub fn set_redacted_fields(&mut self, fields: impl Into<FieldSpec>) {
        self.policy.set_redacted_fields(fields);
    }

    /// Reads one attribute through the redaction policy.
    ///
    /// A redacted field with a stored value resolves to its substitute. A
    /// key the record stores nothing under is never redacted; the read falls
    /// through to the record's own path, whatever that does for unknown keys.
    /// Non-redacted fields delegate to [`Record::read_attribute`].
    pub fn attribute(&self, key: &str) -> Result<Option<Value>, RecordError> {
        if self.policy.should_redact(key) {
            if let Some(raw) = self.record.raw_attribute(key)? {
                return self.substitute(key, &raw).map(Some);
            }
        }
        self.record.read_attribute(key)
    }

    /// Serializes the full record with redaction applied.
    ///
    /// Iterates the record's raw mapping in its natural order. Redacted keys
    /// are recomputed through [`Shrouded::attribute`], so per-field
    /// substitutions and placeholder logic apply identically to single-field
    /// and bulk access. A redacted key resolving to null is dropped when the
    /// policy says to omit such keys. Non-redacted entries pass through
    /// unchanged, original type included.
    pub fn to_redacted_map(&self) -> Result<AttributeMap, RecordError> {
        let mut output = AttributeMap::new();
        for (key, value) in self.record.raw_attribute_map()? {
            if self.policy.should_redact(&key) {
                let substituted = self.attribute(&key)?.unwrap_or(Value::Null);
                if substituted.is_null() && self.policy.omit_null_redacted_keys() {
                    continue;
                }
                output.insert(key, substituted);
            } else {
                output.insert(key, value);
            }
        }
        Ok(output)
    }

    /// Two-tier substitution: the registered function for `key` wins, else
    /// the policy default applies.
    fn substitute(&self, key: &str, raw: &Value) -> Result<Value, RecordError> {
        if let Some(substitute) = self.substitutions.get(key) {
            return substitute(raw).map_err(|source| RecordError::Substitution {
                field: key.to_owned(),
                source,
            });
        }
        Ok(self.policy.default_substitute())
    }
}

/// Record types with redaction defaults declared at definition time.
///
/// Implemented by `#[derive(Redactable)]`; manual implementations only need
/// to override the defaults they actually declare.
pub trait Redactable: Record + Sized {
    /// Policy seeded with this type's declared redacted fields and options.
    #[must_use]
    fn default_policy() -> RedactionPolicy {
        RedactionPolicy::new()
    }

    /// Substitutions registered at type-definition time.
    #[must_use]
    fn substitutions() -> SubstitutionTable {
        SubstitutionTable::new()
    }

    /// Wraps the record with its type-level defaults.
    ///
    /// The returned wrapper owns an independent copy of the defaults; mutating
    /// it never affects other instances.
    #[must_use]
    fn shroud(self) -> Shrouded<Self> {
        Shrouded::with_policy(self, Self::default_policy())
            .with_substitutions(Self::substitutions())
    }
}

/// Serializes the redacted view, never the raw record.
impl<R: Record> Serialize for Shrouded<R> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let map = self.to_redacted_map().map_err(serde::ser::Error::custom)?;
        map.serialize(serializer)
    }
}

/// Debug output shows the redacted view, never the raw record.
impl<R: Record> fmt::Debug for Shrouded<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Shrouded");
        match self.to_redacted_map() {
            Ok(map) => debug.field("attributes", &map),
            Err(_) => debug.field("attributes", &"<unavailable>"),
        };
        debug.field("policy", &self.policy).finish()
    }
}
