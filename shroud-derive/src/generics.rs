//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics that attribute fields actually use, so
//! marker parameters don't pick up spurious `Serialize` requirements.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields are explicitly skipped when collecting generics:
//!
//! ```ignore
//! struct TypedRow<T> {
//!     id: String,
//!     _marker: PhantomData<T>,  // T should NOT require Serialize
//! }
//! ```

use proc_macro2::{Ident, TokenStream};
use syn::parse_quote;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    if let syn::Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            // Skip PhantomData - it's a zero-sized marker whose parameter is
            // never serialized.
            if segment.ident == "PhantomData" {
                return;
            }

            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }

            // Check if this type identifier matches a generic parameter
            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
    }
}

/// Adds `Serialize` bounds to generic parameters used by attribute fields.
pub(crate) fn add_serialize_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
    crate_root: &TokenStream,
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param
                .bounds
                .push(parse_quote!(#crate_root::__private::serde::Serialize));
        }
    }
    generics
}
