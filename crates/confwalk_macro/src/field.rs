//! Per-field plans built once at expansion time.
//!
//! A [`FieldPlan`] records everything the generated walk needs for one
//! field: the member to write, its type, the resolved key segment, and the
//! optional default and environment fallback.

use proc_macro2::TokenStream as QuoteStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Expr, ExprLit, Field, Ident, Lit, LitStr, Type};

use crate::parse::{ConfigAttr, SerdeNames};

pub struct FieldPlan {
    pub ident: Ident,
    pub ty: Type,
    pub segment: String,
    pub default: Option<Expr>,
    pub env: Option<LitStr>,
    pub skip: bool,
}

impl FieldPlan {
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Populate requires named fields"));
        };

        let config = ConfigAttr::parse(&field.attrs)?;
        let serde = SerdeNames::parse(&field.attrs)?;
        let segment = resolve_segment(&ident, &config, &serde)?;

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            segment,
            default: config.default,
            env: config.env,
            skip: config.skip,
        })
    }

    /// The expression assigned when the backend has no entry for the key.
    pub fn default_value(&self) -> Option<QuoteStream> {
        self.default.as_ref().map(|expr| match expr {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => quote! { ::std::string::String::from(#s) },
            other => quote! { #other },
        })
    }
}

/// Picks the key segment: `config(key)`, then `serde(rename)`, then
/// `serde(alias)`, then the field name. Empty overrides are ignored.
fn resolve_segment(
    ident: &Ident,
    config: &ConfigAttr,
    serde: &SerdeNames,
) -> syn::Result<String> {
    let chosen = [&config.key, &serde.rename, &serde.alias]
        .into_iter()
        .flatten()
        .find(|lit| !lit.value().is_empty());

    let Some(lit) = chosen else {
        return Ok(ident.unraw().to_string());
    };

    let segment = lit.value();
    if segment.split('.').any(str::is_empty) {
        return Err(syn::Error::new_spanned(
            lit,
            format!("key `{segment}` contains an empty path segment"),
        ));
    }

    Ok(segment)
}
