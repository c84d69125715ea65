//! Redaction decision configuration.
//!
//! A policy is pure configuration plus one predicate. It does not read
//! records, produce substitute values beyond the default, or cache decisions;
//! every call re-evaluates the current state.

use std::{borrow::Cow, collections::BTreeSet, fmt, sync::Arc};

use serde_json::Value;

/// Default placeholder returned for a redacted field with no registered
/// substitution.
pub const HIDDEN_PLACEHOLDER: &str = "[Hidden Data]";

type FieldGate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Argument form for the dual-mode [`RedactionPolicy::set_redacted_fields`].
///
/// A single name appends to the redacted set; a list replaces it. Call sites
/// that want to be explicit about which mode they get should use
/// [`RedactionPolicy::add_redacted_field`] or
/// [`RedactionPolicy::replace_redacted_fields`] instead.
#[derive(Clone, Debug)]
pub enum FieldSpec {
    /// One field name, appended to the existing set.
    One(String),
    /// A full field list, replacing the existing set.
    Many(Vec<String>),
}

impl From<&str> for FieldSpec {
    fn from(field: &str) -> Self {
        FieldSpec::One(field.to_owned())
    }
}

impl From<String> for FieldSpec {
    fn from(field: String) -> Self {
        FieldSpec::One(field)
    }
}

impl From<Vec<String>> for FieldSpec {
    fn from(fields: Vec<String>) -> Self {
        FieldSpec::Many(fields)
    }
}

impl From<Vec<&str>> for FieldSpec {
    fn from(fields: Vec<&str>) -> Self {
        FieldSpec::Many(fields.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldSpec {
    fn from(fields: [&str; N]) -> Self {
        FieldSpec::Many(fields.into_iter().map(str::to_owned).collect())
    }
}

/// Per-instance redaction configuration.
///
/// A policy travels with one wrapped record; there is no shared global state.
/// All state is ordinary mutable data with no interior locking, so a policy
/// shared across threads needs external synchronization for mutation (reads
/// through `&self` are fine).
#[derive(Clone)]
pub struct RedactionPolicy {
    /// Field names marked sensitive.
    redacted_fields: BTreeSet<String>,
    /// When false, redacted fields resolve to null instead of the placeholder.
    redact_enabled: bool,
    /// Text substituted for redacted fields with no custom function.
    placeholder: Cow<'static, str>,
    /// Kill-switch: when true, no field is redacted at all.
    protection_disabled: bool,
    /// Whether a field redacting to null is dropped from serialized output.
    omit_null_redacted_keys: bool,
    /// Per-field predicate consulted after set membership.
    field_gate: Option<FieldGate>,
}

impl RedactionPolicy {
    /// Constructs a policy with no redacted fields and default behavior:
    /// protection on, placeholder [`HIDDEN_PLACEHOLDER`], null-redacted keys
    /// omitted from serialization.
    #[must_use]
    pub fn new() -> Self {
        Self {
            redacted_fields: BTreeSet::new(),
            redact_enabled: true,
            placeholder: Cow::Borrowed(HIDDEN_PLACEHOLDER),
            protection_disabled: false,
            omit_null_redacted_keys: true,
            field_gate: None,
        }
    }

    /// Replaces the redacted-field set.
    #[must_use]
    pub fn with_redacted_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replace_redacted_fields(fields);
        self
    }

    /// Chooses between placeholder output (`true`) and null output (`false`)
    /// for redacted fields.
    #[must_use]
    pub fn with_redact_enabled(mut self, redact_enabled: bool) -> Self {
        self.redact_enabled = redact_enabled;
        self
    }

    /// Uses a specific placeholder text.
    #[must_use]
    pub fn with_placeholder<P>(mut self, placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        self.placeholder = placeholder.into();
        self
    }

    /// Chooses whether null-redacted keys are dropped from serialization.
    #[must_use]
    pub fn with_omit_null_redacted_keys(mut self, omit: bool) -> Self {
        self.omit_null_redacted_keys = omit;
        self
    }

    /// Installs a per-field gate consulted after set membership.
    ///
    /// The gate receives only the field name; any contextual decision (current
    /// viewer, request) must be captured by the closure before reads happen.
    #[must_use]
    pub fn with_field_gate<F>(mut self, gate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.field_gate = Some(Arc::new(gate));
        self
    }

    /// Disables redaction for all fields, regardless of set membership and
    /// gate.
    pub fn disable_all_protection(&mut self) {
        self.protection_disabled = true;
    }

    /// Re-enables redaction after [`RedactionPolicy::disable_all_protection`].
    pub fn enable_all_protection(&mut self) {
        self.protection_disabled = false;
    }

    /// Replaces the redacted-field set with `fields`.
    pub fn replace_redacted_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redacted_fields = fields.into_iter().map(Into::into).collect();
    }

    /// Appends one field to the redacted set. Appending a field already in
    /// the set is a no-op.
    pub fn add_redacted_field(&mut self, field: impl Into<String>) {
        self.redacted_fields.insert(field.into());
    }

    /// Dual-mode setter: a single name appends, a list replaces.
    ///
    /// Kept for drop-in compatibility with callers that pass either form
    /// through one entry point; the mode is decided by the [`FieldSpec`]
    /// conversion of the argument.
    pub fn set_redacted_fields(&mut self, fields: impl Into<FieldSpec>) {
        match fields.into() {
            FieldSpec::One(field) => self.add_redacted_field(field),
            FieldSpec::Many(fields) => self.replace_redacted_fields(fields),
        }
    }

    /// Chooses between placeholder output (`true`) and null output (`false`).
    pub fn set_redact_enabled(&mut self, redact_enabled: bool) {
        self.redact_enabled = redact_enabled;
    }

    /// Sets the placeholder text.
    pub fn set_placeholder<P>(&mut self, placeholder: P)
    where
        P: Into<Cow<'static, str>>,
    {
        self.placeholder = placeholder.into();
    }

    /// Sets whether null-redacted keys are dropped from serialization.
    pub fn set_omit_null_redacted_keys(&mut self, omit: bool) {
        self.omit_null_redacted_keys = omit;
    }

    /// Installs a per-field gate, replacing any previous one.
    pub fn set_field_gate<F>(&mut self, gate: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.field_gate = Some(Arc::new(gate));
    }

    /// Removes the per-field gate; membership alone decides again.
    pub fn clear_field_gate(&mut self) {
        self.field_gate = None;
    }

    /// The current redacted-field set.
    pub fn redacted_fields(&self) -> &BTreeSet<String> {
        &self.redacted_fields
    }

    /// Whether redacted fields resolve to the placeholder (`true`) or null.
    pub fn redact_enabled(&self) -> bool {
        self.redact_enabled
    }

    /// The current placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Whether the kill-switch is active.
    pub fn protection_disabled(&self) -> bool {
        self.protection_disabled
    }

    /// Whether null-redacted keys are dropped from serialization.
    pub fn omit_null_redacted_keys(&self) -> bool {
        self.omit_null_redacted_keys
    }

    /// Decides whether a read of `key` is intercepted.
    ///
    /// True iff protection is not disabled, `key` is in the redacted set, and
    /// the gate (if any) returns true. Pure function of current configuration.
    #[must_use]
    pub fn should_redact(&self, key: &str) -> bool {
        !self.protection_disabled
            && self.redacted_fields.contains(key)
            && self.field_gate.as_ref().map_or(true, |gate| gate(key))
    }

    /// The default substitute for a redacted field with no custom function:
    /// the placeholder when redaction output is enabled, JSON null otherwise.
    #[must_use]
    pub fn default_substitute(&self) -> Value {
        if self.redact_enabled {
            Value::String(self.placeholder.clone().into_owned())
        } else {
            Value::Null
        }
    }
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RedactionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactionPolicy")
            .field("redacted_fields", &self.redacted_fields)
            .field("redact_enabled", &self.redact_enabled)
            .field("placeholder", &self.placeholder)
            .field("protection_disabled", &self.protection_disabled)
            .field("omit_null_redacted_keys", &self.omit_null_redacted_keys)
            .field("field_gate", &self.field_gate.as_ref().map(|_| "<gate>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{RedactionPolicy, HIDDEN_PLACEHOLDER};

    #[test]
    fn fresh_policy_redacts_nothing() {
        let policy = RedactionPolicy::new();
        assert!(!policy.should_redact("ssn"));
    }

    #[test]
    fn membership_drives_the_predicate() {
        let policy = RedactionPolicy::new().with_redacted_fields(["ssn"]);
        assert!(policy.should_redact("ssn"));
        assert!(!policy.should_redact("name"));
    }

    #[test]
    fn kill_switch_supersedes_membership_and_gate() {
        let mut policy = RedactionPolicy::new()
            .with_redacted_fields(["ssn"])
            .with_field_gate(|_| true);
        policy.disable_all_protection();
        assert!(!policy.should_redact("ssn"));
        assert!(policy.protection_disabled());

        policy.enable_all_protection();
        assert!(policy.should_redact("ssn"));
    }

    #[test]
    fn gate_vetoes_individual_fields() {
        let policy = RedactionPolicy::new()
            .with_redacted_fields(["ssn", "email"])
            .with_field_gate(|key| key != "ssn");
        assert!(!policy.should_redact("ssn"));
        assert!(policy.should_redact("email"));
    }

    #[test]
    fn clearing_the_gate_restores_membership_semantics() {
        let mut policy = RedactionPolicy::new()
            .with_redacted_fields(["ssn"])
            .with_field_gate(|_| false);
        assert!(!policy.should_redact("ssn"));
        policy.clear_field_gate();
        assert!(policy.should_redact("ssn"));
    }

    #[test]
    fn single_name_appends_list_replaces() {
        let mut policy = RedactionPolicy::new().with_redacted_fields(["a"]);

        policy.set_redacted_fields("b");
        let fields: Vec<&str> = policy.redacted_fields().iter().map(String::as_str).collect();
        assert_eq!(fields, ["a", "b"]);

        policy.set_redacted_fields(vec!["c"]);
        let fields: Vec<&str> = policy.redacted_fields().iter().map(String::as_str).collect();
        assert_eq!(fields, ["c"]);
    }

    #[test]
    fn duplicate_append_is_a_no_op() {
        let mut policy = RedactionPolicy::new().with_redacted_fields(["a"]);
        policy.add_redacted_field("a");
        assert_eq!(policy.redacted_fields().len(), 1);
    }

    #[test]
    fn default_substitute_follows_redact_enabled() {
        let mut policy = RedactionPolicy::new();
        assert_eq!(
            policy.default_substitute(),
            Value::String(HIDDEN_PLACEHOLDER.to_string())
        );

        policy.set_redact_enabled(false);
        assert_eq!(policy.default_substitute(), Value::Null);
    }

    #[test]
    fn custom_placeholder_is_used() {
        let policy = RedactionPolicy::new().with_placeholder("<gone>");
        assert_eq!(policy.default_substitute(), Value::String("<gone>".into()));
    }

    #[test]
    fn predicate_is_pure() {
        let policy = RedactionPolicy::new().with_redacted_fields(["ssn"]);
        assert_eq!(policy.should_redact("ssn"), policy.should_redact("ssn"));
    }
}
