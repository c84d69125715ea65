//! Derive macro for `shroud` records.
//!
//! This crate generates the record plumbing behind `#[derive(Redactable)]`. It:
//! - reads `#[redact(...)]` container and field attributes
//! - emits a `Record` implementation mapping declared fields to JSON values
//! - emits a `Redactable` implementation carrying the declared defaults
//!
//! It does **not** decide anything at read time. Interception lives in the
//! main `shroud` crate and is configured per wrapper instance.

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
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod expand;
mod field;
mod generics;

use expand::derive_record;

/// Derives `shroud::Record` and `shroud::Redactable` for named-field structs.
///
/// # Container Attributes
///
/// These attributes are placed on the struct itself:
///
/// - `#[redact(placeholder = "...")]` - Placeholder text for this type's default policy.
/// - `#[redact(keep_null_keys)]` - Keep null-redacted keys in full-record serialization
///   (the default policy drops them).
///
/// # Field Attributes
///
/// - **No annotation**: The field is a plain attribute; reads pass through.
///
/// - `#[redact]`: The field is in the type's default redacted set; reads resolve to the
///   default substitute.
///
/// - `#[redact(with = "path::to::fn")]`: As above, with the named function registered as
///   the field's substitution. The function signature is
///   `fn(&serde_json::Value) -> Result<serde_json::Value, shroud::BoxError>` and it
///   receives the raw stored value.
///
/// Every field's value type must implement `serde::Serialize`. Attribute keys are the
/// declared field identifiers (a `#[serde(rename)]` does not affect them). Enums,
/// unions, tuple structs, and unit structs are rejected at compile time.
#[proc_macro_derive(Redactable, attributes(redact))]
pub fn derive_redactable(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the shroud crate root.
///
/// Handles crate renaming (e.g., `my_shroud = { package = "shroud", ... }`)
/// and internal usage (when the derive is used inside the shroud crate itself).
fn crate_root() -> TokenStream {
    match crate_name("shroud") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::shroud },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    match &input.data {
        Data::Struct(data) => derive_record(&input, data),
        Data::Enum(data) => Err(syn::Error::new(
            data.enum_token.span(),
            "`Redactable` cannot be derived for enums; a record is a set of named attributes",
        )),
        Data::Union(data) => Err(syn::Error::new(
            data.union_token.span(),
            "`Redactable` cannot be derived for unions",
        )),
    }
}
