//! Parsing of `#[redact(...)]` field attributes.
//!
//! This module maps attribute syntax to per-field rules and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Meta, Result};

/// Field handling derived from `#[redact(...)]` attributes.
///
/// ## Rule Mapping
///
/// | Attribute | Rule | Behavior |
/// |-----------|------|----------|
/// | None | `Clear` | Plain attribute; reads pass through |
/// | `#[redact]` | `Redact` | In the default redacted set |
/// | `#[redact(with = "path")]` | `RedactWith(path)` | Redacted with a registered substitution |
#[derive(Clone, Debug)]
pub(crate) enum FieldRule {
    /// No annotation: plain attribute.
    Clear,
    /// Bare `#[redact]`: redacted, the default substitute applies.
    Redact,
    /// `#[redact(with = "path")]`: redacted with a named substitution function.
    RedactWith(syn::Path),
}

impl FieldRule {
    pub(crate) fn is_redacted(&self) -> bool {
        !matches!(self, FieldRule::Clear)
    }
}

fn set_rule(target: &mut Option<FieldRule>, next: FieldRule, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[redact] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_rule(attrs: &[Attribute]) -> Result<FieldRule> {
    let mut rule: Option<FieldRule> = None;
    for attr in attrs {
        if !attr.path().is_ident("redact") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                // Bare #[redact] - default substitute applies
                set_rule(&mut rule, FieldRule::Redact, attr.span())?;
            }
            Meta::List(list) => {
                let mut with_path: Option<syn::Path> = None;
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("with") {
                        let value: syn::LitStr = meta.value()?.parse()?;
                        with_path = Some(value.parse()?);
                        Ok(())
                    } else {
                        Err(meta.error("expected `with = \"path::to::fn\"`"))
                    }
                })?;
                match with_path {
                    Some(path) => set_rule(&mut rule, FieldRule::RedactWith(path), attr.span())?,
                    None => {
                        return Err(syn::Error::new(
                            attr.span(),
                            "empty #[redact()] list; use bare #[redact] or \
                            #[redact(with = \"path::to::fn\")]",
                        ));
                    }
                }
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[redact]",
                ));
            }
        }
    }

    // Default: no annotation means a plain attribute
    Ok(rule.unwrap_or(FieldRule::Clear))
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_clear() {
        let attrs = parse_attrs(quote! {});
        let rule = parse_field_rule(&attrs).unwrap();
        assert!(matches!(rule, FieldRule::Clear));
        assert!(!rule.is_redacted());
    }

    #[test]
    fn bare_redact_returns_redact() {
        let attrs = parse_attrs(quote! { #[redact] });
        let rule = parse_field_rule(&attrs).unwrap();
        assert!(matches!(rule, FieldRule::Redact));
        assert!(rule.is_redacted());
    }

    #[test]
    fn with_function_returns_redact_with() {
        let attrs = parse_attrs(quote! { #[redact(with = "mask_ssn")] });
        let rule = parse_field_rule(&attrs).unwrap();
        match rule {
            FieldRule::RedactWith(path) => assert!(path.is_ident("mask_ssn")),
            _ => panic!("expected RedactWith"),
        }
    }

    #[test]
    fn with_function_accepts_module_paths() {
        let attrs = parse_attrs(quote! { #[redact(with = "masks::last_four")] });
        let rule = parse_field_rule(&attrs).unwrap();
        match rule {
            FieldRule::RedactWith(path) => assert_eq!(path.segments.len(), 2),
            _ => panic!("expected RedactWith"),
        }
    }

    #[test]
    fn multiple_redact_attributes_error() {
        let attrs = parse_attrs(quote! {
            #[redact]
            #[redact(with = "mask_ssn")]
        });
        let result = parse_field_rule(&attrs);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("multiple #[redact] attributes"));
    }

    #[test]
    fn empty_list_errors() {
        let attrs = parse_attrs(quote! { #[redact()] });
        let result = parse_field_rule(&attrs);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_list_option_errors() {
        let attrs = parse_attrs(quote! { #[redact(mask = "x")] });
        let result = parse_field_rule(&attrs);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("expected `with = \"path::to::fn\"`"));
    }

    #[test]
    fn name_value_syntax_errors() {
        let attrs = parse_attrs(quote! { #[redact = "x"] });
        let result = parse_field_rule(&attrs);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("name-value syntax is not supported"));
    }

    #[test]
    fn invalid_path_errors() {
        let attrs = parse_attrs(quote! { #[redact(with = "not a path")] });
        let result = parse_field_rule(&attrs);
        assert!(result.is_err());
    }

    #[test]
    fn other_attributes_ignored() {
        let attrs = parse_attrs(quote! {
            #[derive(Clone)]
            #[serde(skip)]
        });
        let rule = parse_field_rule(&attrs).unwrap();
        assert!(matches!(rule, FieldRule::Clear));
    }
}
