//! Per-field substitution functions.
//!
//! Substitution is two-tier: a function registered for a field wins over the
//! policy's default substitute. A missing registration is never an error, and
//! a failing registration surfaces verbatim to the caller of the read.
//!
//! Registration is an explicit table of closures, populated either by the
//! `Redactable` derive at type-definition time or imperatively on the wrapper
//! at instance-configuration time. There is no name-derived dispatch.

use std::{collections::HashMap, fmt, sync::Arc};

use serde_json::Value;

use crate::record::BoxError;

/// Signature of a per-field substitution.
///
/// The function receives the record's raw stored value for the field and
/// returns the value emitted in its place. Any JSON type may be returned,
/// including null. Functions must be synchronous; the engine imposes no
/// timeout or retry on them, and their errors propagate unmodified.
pub type SubstitutionFn = dyn Fn(&Value) -> Result<Value, BoxError> + Send + Sync;

/// Registry mapping field names to substitution functions.
///
/// One function per field; registering again for the same field replaces the
/// previous entry.
#[derive(Clone, Default)]
pub struct SubstitutionTable {
    entries: HashMap<String, Arc<SubstitutionFn>>,
}

impl SubstitutionTable {
    /// Constructs an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers `substitute` for `field`, replacing any previous entry.
    pub fn register<F>(&mut self, field: impl Into<String>, substitute: F)
    where
        F: Fn(&Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.entries.insert(field.into(), Arc::new(substitute));
    }

    /// Removes the entry for `field`, restoring the default substitute.
    pub fn unregister(&mut self, field: &str) {
        self.entries.remove(field);
    }

    /// Whether a substitution is registered for `field`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Number of registered substitutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get(&self, field: &str) -> Option<&Arc<SubstitutionFn>> {
        self.entries.get(field)
    }
}

impl fmt::Debug for SubstitutionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstitutionTable")
            .field("fields", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
