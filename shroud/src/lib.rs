//! Read-time field redaction for record types.
//!
//! This crate separates:
//! - **Records**: where attribute values live ([`Record`]).
//! - **Policy**: which fields are hidden and what replaces them
//!   ([`RedactionPolicy`], [`SubstitutionTable`]).
//!
//! [`Shrouded`] composes the two. It wraps any [`Record`] and intercepts every
//! single-field read and every full-record serialization, substituting the
//! values of fields the policy marks as redacted. Stored data is never
//! touched; redaction is purely a read-time transform, and reading through
//! [`Shrouded::record`] (or unwrapping with [`Shrouded::into_inner`]) yields
//! the original values.
//!
//! Key rules:
//! - A field is redacted only when protection is enabled, the field is in the
//!   policy's redacted set, and the per-field gate (if any) agrees.
//! - A substitution function registered for the field wins over the default
//!   placeholder.
//! - With the placeholder disabled, redacted fields resolve to JSON null and
//!   are dropped from serialized output (configurable).
//! - Fields outside the redacted set pass through unchanged, original type
//!   included.
//!
//! What this crate does:
//! - defines the [`Record`] boundary and a JSON-object implementation
//! - defines the redaction policy, the substitution registry, and the
//!   [`Shrouded`] wrapper
//! - provides integrations behind feature flags (e.g. `slog`)
//!
//! What it does not do:
//! - encrypt, persist, or access-control anything
//! - stop code that reads the wrapped record directly
//!
//! The `Redactable` derive macro lives in `shroud-derive` and is re-exported
//! from the crate root.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use shroud_derive::Redactable;

// Module declarations
mod record;
mod redaction;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use record::{AttributeMap, BoxError, Record, RecordError};
pub use redaction::{
    FieldSpec, Redactable, RedactionPolicy, Shrouded, SubstitutionFn, SubstitutionTable,
    HIDDEN_PLACEHOLDER,
};

// Paths referenced by generated derive code. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
