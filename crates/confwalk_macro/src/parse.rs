//! Attribute parsing for `#[config(...)]` and the `#[serde(...)]` names we honor.
//!
//! ```rust,ignore
//! #[config(key = "Port", default = 8080, env = "PORT")]
//! #[config(skip)]
//! #[serde(rename = "Host")]
//! #[serde(rename(deserialize = "Host"))]
//! #[serde(alias = "host")]
//! ```
//!
//! Every other `serde` option is skipped so that the attribute can be shared
//! with `#[derive(Deserialize)]` on the same struct.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprLit, ExprUnary, Lit, LitStr, Token, UnOp};

/// Options from `#[config(...)]`.
#[derive(Default)]
pub struct ConfigAttr {
    /// `key = "..."`
    pub key: Option<LitStr>,

    /// `default = <literal>`
    pub default: Option<Expr>,

    /// `env = "..."`
    pub env: Option<LitStr>,

    /// `skip`
    pub skip: bool,
}

/// Names from `#[serde(...)]`.
#[derive(Default)]
pub struct SerdeNames {
    /// `rename = "..."` or `rename(deserialize = "...")`
    pub rename: Option<LitStr>,

    /// The first `alias = "..."`
    pub alias: Option<LitStr>,
}

impl ConfigAttr {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = ConfigAttr::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("config")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    let value: LitStr = meta.value()?.parse()?;
                    set_once(&meta, &mut out.key, value, "key")
                } else if meta.path.is_ident("default") {
                    let value: Expr = meta.value()?.parse()?;
                    check_default_literal(&value)?;
                    set_once(&meta, &mut out.default, value, "default")
                } else if meta.path.is_ident("env") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().is_empty() {
                        return Err(syn::Error::new_spanned(
                            &value,
                            "`env` must name a non-empty environment variable",
                        ));
                    }
                    set_once(&meta, &mut out.env, value, "env")
                } else if meta.path.is_ident("skip") {
                    if out.skip {
                        return Err(meta.error("duplicate `config` option `skip`"));
                    }
                    out.skip = true;
                    Ok(())
                } else {
                    let name = meta
                        .path
                        .get_ident()
                        .map_or_else(|| "?".to_string(), ToString::to_string);
                    Err(meta.error(format!(
                        "unknown `config` option `{name}`; expected one of: key, default, env, skip"
                    )))
                }
            })?;
        }

        if out.skip && (out.key.is_some() || out.default.is_some() || out.env.is_some()) {
            let message = "`skip` cannot be combined with `key`, `default` or `env`";
            return Err(attrs
                .iter()
                .find(|a| a.path().is_ident("config"))
                .map_or_else(
                    || syn::Error::new(proc_macro2::Span::call_site(), message),
                    |attr| syn::Error::new_spanned(attr, message),
                ));
        }

        Ok(out)
    }
}

impl SerdeNames {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = SerdeNames::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if meta.input.peek(Token![=]) {
                        let value: LitStr = meta.value()?.parse()?;
                        if out.rename.is_none() {
                            out.rename = Some(value);
                        }
                    } else {
                        meta.parse_nested_meta(|inner| {
                            if inner.path.is_ident("deserialize") {
                                let value: LitStr = inner.value()?.parse()?;
                                if out.rename.is_none() {
                                    out.rename = Some(value);
                                }
                                Ok(())
                            } else {
                                skip_meta(&inner)
                            }
                        })?;
                    }
                    Ok(())
                } else if meta.path.is_ident("alias") {
                    let value: LitStr = meta.value()?.parse()?;
                    if out.alias.is_none() {
                        out.alias = Some(value);
                    }
                    Ok(())
                } else {
                    skip_meta(&meta)
                }
            })?;
        }

        Ok(out)
    }
}

fn set_once<T>(
    meta: &ParseNestedMeta,
    slot: &mut Option<T>,
    value: T,
    name: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `config` option `{name}`")));
    }
    *slot = Some(value);
    Ok(())
}

/// Consumes an option we do not interpret: `name`, `name = expr` or `name(...)`.
fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta(&inner))?;
    }
    Ok(())
}

/// Defaults are written straight into the field, so only literals are allowed.
fn check_default_literal(expr: &Expr) -> syn::Result<()> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(_) | Lit::Int(_) | Lit::Bool(_),
            ..
        }) => Ok(()),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) if matches!(
            expr.as_ref(),
            Expr::Lit(ExprLit {
                lit: Lit::Int(_),
                ..
            })
        ) =>
        {
            Ok(())
        }
        other => Err(syn::Error::new_spanned(
            other,
            "`default` must be a string, integer or boolean literal",
        )),
    }
}
