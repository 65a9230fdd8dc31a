//! Code generation for `#[derive(Populate)]`.
//!
//! # Generated Code Pattern
//!
//! ```rust,ignore
//! impl ::confwalk::Populate for Configuration {
//!     fn populate(&mut self, __backend: &dyn ::confwalk::Backend, __key: &str)
//!         -> Result<(), ::confwalk::Error>
//!     {
//!         {
//!             let __field_key = ::confwalk::join_key(__key, "API");
//!             ::confwalk::Populate::populate(&mut self.api, __backend, &__field_key)?;
//!         }
//!         Ok(())
//!     }
//!
//!     fn describe(__key: &str, __out: &mut Vec<::confwalk::KeySpec>) {
//!         <Api as ::confwalk::Populate>::describe(&::confwalk::join_key(__key, "API"), __out);
//!     }
//!
//!     fn apply_fallbacks(&mut self, __env: &dyn ::confwalk::Environment)
//!         -> Result<(), ::confwalk::Error>
//!     {
//!         ::confwalk::Populate::apply_fallbacks(&mut self.api, __env)?;
//!         Ok(())
//!     }
//! }
//! ```

use proc_macro2::TokenStream as QuoteStream;
use quote::quote;
use syn::{Data, DataStruct, DeriveInput, Fields, GenericParam, parse_quote};

use crate::field::FieldPlan;

pub struct Expander;

impl Expander {
    pub fn expand(input: DeriveInput) -> syn::Result<QuoteStream> {
        let fields = match &input.data {
            Data::Struct(DataStruct {
                fields: Fields::Named(named),
                ..
            }) => &named.named,

            Data::Struct(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Populate can only be derived for structs with named fields",
                ));
            }

            Data::Enum(data) => {
                return Err(syn::Error::new_spanned(
                    data.enum_token,
                    "Populate cannot be derived for enums; a configuration node must be a struct",
                ));
            }

            Data::Union(data) => {
                return Err(syn::Error::new_spanned(
                    data.union_token,
                    "Populate cannot be derived for unions; a configuration node must be a struct",
                ));
            }
        };

        let plans: Vec<FieldPlan> = fields
            .iter()
            .map(FieldPlan::from_field)
            .collect::<syn::Result<_>>()?;

        let active: Vec<&FieldPlan> = plans.iter().filter(|p| !p.skip).collect();

        let walk = active.iter().map(|p| generate_walk(p));
        let describe = active.iter().map(|p| generate_describe(p));
        let fallbacks = active.iter().map(|p| generate_fallback(p));

        if let Some(attr) = input.attrs.iter().find(|a| a.path().is_ident("config")) {
            return Err(syn::Error::new_spanned(
                attr,
                "`config` is a field attribute; it has no struct-level options",
            ));
        }

        let name = &input.ident;
        let mut generics = input.generics.clone();
        let type_params: Vec<_> = generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(ty) => Some(ty.ident.clone()),
                _ => None,
            })
            .collect();
        for ident in type_params {
            generics
                .make_where_clause()
                .predicates
                .push(parse_quote!(#ident: ::confwalk::Populate));
        }
        // Defaults bypass `Populate::populate`, so only writable leaves may carry one.
        for plan in active.iter().filter(|p| p.default.is_some()) {
            let ty = &plan.ty;
            generics
                .make_where_clause()
                .predicates
                .push(parse_quote!(#ty: ::confwalk::EnvFallback));
        }
        let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

        Ok(quote! {
            impl #impl_generics ::confwalk::Populate for #name #type_generics #where_clause {
                fn populate(
                    &mut self,
                    __backend: &dyn ::confwalk::Backend,
                    __key: &str,
                ) -> ::std::result::Result<(), ::confwalk::Error> {
                    #(#walk)*
                    ::std::result::Result::Ok(())
                }

                fn describe(
                    __key: &str,
                    __out: &mut ::std::vec::Vec<::confwalk::KeySpec>,
                ) {
                    #(#describe)*
                }

                fn apply_fallbacks(
                    &mut self,
                    __env: &dyn ::confwalk::Environment,
                ) -> ::std::result::Result<(), ::confwalk::Error> {
                    #(#fallbacks)*
                    ::std::result::Result::Ok(())
                }
            }
        })
    }
}

fn generate_walk(plan: &FieldPlan) -> QuoteStream {
    let ident = &plan.ident;
    let segment = &plan.segment;

    let populate = quote! {
        ::confwalk::Populate::populate(&mut self.#ident, __backend, &__field_key)?;
    };

    let body = match plan.default_value() {
        Some(default) => quote! {
            if ::confwalk::Backend::contains(__backend, &__field_key) {
                #populate
            } else {
                self.#ident = #default;
            }
        },
        None => populate,
    };

    quote! {
        {
            let __field_key = ::confwalk::join_key(__key, #segment);
            #body
        }
    }
}

fn generate_describe(plan: &FieldPlan) -> QuoteStream {
    let ty = &plan.ty;
    let segment = &plan.segment;

    quote! {
        <#ty as ::confwalk::Populate>::describe(&::confwalk::join_key(__key, #segment), __out);
    }
}

fn generate_fallback(plan: &FieldPlan) -> QuoteStream {
    let ident = &plan.ident;

    match &plan.env {
        Some(var) => quote! {
            ::confwalk::fallback::apply(&mut self.#ident, __env, #var)?;
        },
        None => quote! {
            ::confwalk::Populate::apply_fallbacks(&mut self.#ident, __env)?;
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: DeriveInput) -> syn::Result<String> {
        Expander::expand(input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_rejects_enum() {
        let input: DeriveInput = parse_quote! {
            enum Config { Development, Production }
        };
        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("cannot be derived for enums"));
    }

    #[test]
    fn test_rejects_union() {
        let input: DeriveInput = parse_quote! {
            union Config { int_val: u32, float_val: f32 }
        };
        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("cannot be derived for unions"));
    }

    #[test]
    fn test_rejects_tuple_and_unit_structs() {
        let tuple: DeriveInput = parse_quote! { struct Config(i32, String); };
        let unit: DeriveInput = parse_quote! { struct Config; };

        for input in [tuple, unit] {
            let err = expand(input).unwrap_err();
            assert!(err.to_string().contains("structs with named fields"));
        }
    }

    #[test]
    fn test_expands_walk_in_declaration_order() {
        let input: DeriveInput = parse_quote! {
            struct Api {
                #[config(key = "Port", env = "PORT")]
                port: i32,
                #[config(key = "Host")]
                host: String,
            }
        };

        let out = expand(input).unwrap();
        let port = out.find("\"Port\"").unwrap();
        let host = out.find("\"Host\"").unwrap();
        assert!(port < host);
        assert!(out.contains("fallback :: apply"));
        assert!(out.contains("\"PORT\""));
    }

    #[test]
    fn test_skipped_field_is_not_generated() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[config(skip)]
                cache: Vec<u8>,
                name: String,
            }
        };

        let out = expand(input).unwrap();
        assert!(!out.contains("cache"));
        assert!(out.contains("\"name\""));
    }

    #[test]
    fn test_default_generates_contains_check() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[config(default = 8080)]
                port: i32,
            }
        };

        let out = expand(input).unwrap();
        assert!(out.contains("Backend :: contains"));
        assert!(out.contains("8080"));
    }

    #[test]
    fn test_defaulted_fields_require_leaf_bound() {
        let input: DeriveInput = parse_quote! {
            struct Limits {
                #[config(key = "Max", default = 10)]
                max: u32,
                #[config(key = "Min")]
                min: u16,
            }
        };

        let out = expand(input).unwrap();
        let start = out.find("where").unwrap();
        let end = start + out[start..].find('{').unwrap();
        let where_clause = &out[start..end];
        assert!(where_clause.contains("u32"));
        assert!(where_clause.contains("EnvFallback"));
        assert!(!where_clause.contains("u16"));
    }

    #[test]
    fn test_no_where_clause_without_defaults_or_generics() {
        let input: DeriveInput = parse_quote! {
            struct Limits {
                #[config(key = "Max")]
                max: u32,
            }
        };

        let out = expand(input).unwrap();
        assert!(!out.contains("EnvFallback"));
    }

    #[test]
    fn test_rejects_struct_level_config() {
        let input: DeriveInput = parse_quote! {
            #[config(prefix = "APP")]
            struct Config {
                port: i32,
            }
        };

        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("no struct-level options"));
    }

    #[test]
    fn test_container_serde_attrs_are_ignored() {
        let input: DeriveInput = parse_quote! {
            #[serde(deny_unknown_fields)]
            struct Config {
                port: i32,
            }
        };

        assert!(expand(input).is_ok());
    }

    #[test]
    fn test_generic_params_get_bounds() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper<T> {
                inner: T,
            }
        };

        let out = expand(input).unwrap();
        let where_clause = &out[out.find("where").unwrap()..];
        assert!(where_clause.contains("Populate"));
    }
}
