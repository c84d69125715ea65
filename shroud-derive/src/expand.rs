//! Record derivation for named-field structs.
//!
//! This module generates the `Record` attribute plumbing and the `Redactable`
//! defaults for one struct, and collects the generic parameters that require
//! `Serialize` bounds.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, DeriveInput, Fields, Result};

use crate::{
    container::parse_container_options,
    crate_root,
    field::{parse_field_rule, FieldRule},
    generics::{add_serialize_bounds, collect_generics_from_type},
};

pub(crate) fn derive_record(input: &DeriveInput, data: &DataStruct) -> Result<TokenStream> {
    let fields = match &data.fields {
        Fields::Named(fields) => &fields.named,
        Fields::Unnamed(_) | Fields::Unit => {
            return Err(syn::Error::new(
                input.ident.span(),
                "`Redactable` requires named fields; records address attributes by name",
            ));
        }
    };

    let options = parse_container_options(&input.attrs)?;
    let root = crate_root();

    let mut used_generics = Vec::new();
    let mut raw_arms = Vec::new();
    let mut map_inserts = Vec::new();
    let mut redacted_names = Vec::new();
    let mut registrations = Vec::new();

    for field in fields {
        let span = field.span();
        let rule = parse_field_rule(&field.attrs)?;
        let ident = field
            .ident
            .as_ref()
            .expect("named field should have an identifier");
        let name = ident.to_string();
        // Raw identifiers name the attribute without the `r#` prefix.
        let name = syn::LitStr::new(name.strip_prefix("r#").unwrap_or(&name), ident.span());

        collect_generics_from_type(&field.ty, &input.generics, &mut used_generics);

        raw_arms.push(quote_spanned! { span =>
            #name => #root::__private::serde_json::to_value(&self.#ident)
                .map(::core::option::Option::Some)
                .map_err(#root::RecordError::from),
        });
        map_inserts.push(quote_spanned! { span =>
            map.insert(
                ::std::string::String::from(#name),
                #root::__private::serde_json::to_value(&self.#ident)?,
            );
        });

        if let FieldRule::RedactWith(path) = &rule {
            registrations.push(quote_spanned! { span =>
                table.register(#name, #path);
            });
        }
        if rule.is_redacted() {
            redacted_names.push(name);
        }
    }

    let bounded = add_serialize_bounds(input.generics.clone(), &used_generics, &root);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let ident = &input.ident;

    let raw_attribute_map_body = if map_inserts.is_empty() {
        quote! {
            ::core::result::Result::Ok(#root::AttributeMap::new())
        }
    } else {
        quote! {
            let mut map = #root::AttributeMap::new();
            #(#map_inserts)*
            ::core::result::Result::Ok(map)
        }
    };

    let raw_attribute_body = if raw_arms.is_empty() {
        quote! {
            let _ = key;
            ::core::result::Result::Ok(::core::option::Option::None)
        }
    } else {
        quote! {
            match key {
                #(#raw_arms)*
                _ => ::core::result::Result::Ok(::core::option::Option::None),
            }
        }
    };

    // Default policy is built as a builder chain so the generated code stays
    // warning-free for structs that declare nothing.
    let mut policy_expr = quote! { #root::RedactionPolicy::new() };
    if !redacted_names.is_empty() {
        policy_expr = quote! { #policy_expr.with_redacted_fields([#(#redacted_names),*]) };
    }
    if let Some(placeholder) = &options.placeholder {
        policy_expr = quote! { #policy_expr.with_placeholder(#placeholder) };
    }
    if options.keep_null_keys {
        policy_expr = quote! { #policy_expr.with_omit_null_redacted_keys(false) };
    }

    let substitutions_body = if registrations.is_empty() {
        quote! { #root::SubstitutionTable::new() }
    } else {
        quote! {
            let mut table = #root::SubstitutionTable::new();
            #(#registrations)*
            table
        }
    };

    Ok(quote! {
        impl #impl_generics #root::Record for #ident #ty_generics #where_clause {
            fn raw_attribute(
                &self,
                key: &str,
            ) -> ::core::result::Result<
                ::core::option::Option<#root::__private::serde_json::Value>,
                #root::RecordError,
            > {
                #raw_attribute_body
            }

            fn raw_attribute_map(
                &self,
            ) -> ::core::result::Result<#root::AttributeMap, #root::RecordError> {
                #raw_attribute_map_body
            }
        }

        impl #impl_generics #root::Redactable for #ident #ty_generics #where_clause {
            fn default_policy() -> #root::RedactionPolicy {
                #policy_expr
            }

            fn substitutions() -> #root::SubstitutionTable {
                #substitutions_body
            }
        }
    })
}
