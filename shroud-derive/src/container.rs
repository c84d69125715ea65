//! Container-level attribute parsing for `#[derive(Redactable)]`.
//!
//! This module handles attributes on the struct itself, not on fields.

use syn::{Attribute, Meta, Result};

/// Options parsed from container-level `#[redact(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Placeholder text for the type's default policy.
    pub(crate) placeholder: Option<String>,
    /// If true, null-redacted keys stay in full-record serialization.
    pub(crate) keep_null_keys: bool,
}

/// Parses container-level `#[redact(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("redact") {
            continue;
        }

        match &attr.meta {
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "bare #[redact] belongs on fields; container options are \
                    #[redact(placeholder = \"...\")] and #[redact(keep_null_keys)]",
                ));
            }
            Meta::List(list) => {
                // Parse the contents
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("placeholder") {
                        let value: syn::LitStr = meta.value()?.parse()?;
                        options.placeholder = Some(value.value());
                        Ok(())
                    } else if meta.path.is_ident("keep_null_keys") {
                        options.keep_null_keys = true;
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `placeholder` or `keep_null_keys`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[redact]",
                ));
            }
        }
    }

    Ok(options)
}
