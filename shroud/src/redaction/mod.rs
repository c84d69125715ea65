//! Redaction policy, substitution, and the record wrapper.
//!
//! This module ties the pieces together:
//!
//! - **`policy`**: Decision layer - whether a field is redacted (`RedactionPolicy`)
//! - **`substitution`**: Override layer - what replaces a redacted value (`SubstitutionTable`)
//! - **`shrouded`**: Interception layer - the wrapper applying both on every read (`Shrouded`)
//!
//! The record boundary lives in `crate::record`.

mod policy;
mod shrouded;
mod substitution;

pub use policy::{FieldSpec, RedactionPolicy, HIDDEN_PLACEHOLDER};
pub use shrouded::{Redactable, Shrouded};
pub use substitution::{SubstitutionFn, SubstitutionTable};
