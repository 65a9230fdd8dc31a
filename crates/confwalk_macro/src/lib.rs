//! # confwalk_macro
//!
//! This crate provides the `#[derive(Populate)]` procedural macro.
//! It is a proc-macro crate, meaning it can only export procedural macros.
//!
//! ## Module Structure
//!
//! - `parse` - Attribute parsing for `#[config(...)]` and `#[serde(...)]`
//! - `field` - Per-field key resolution
//! - `expand` - Code generation for the `Populate` impl

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// Internal modules - not exposed publicly
mod expand;
mod field;
mod parse;

/// Derive macro that fills a configuration struct from a dotted key/value backend.
///
/// Generates an `impl confwalk::Populate` that visits each field in
/// declaration order, resolves its key, reads the backend with the getter
/// matching the field's type and writes the value in place. Nested structs
/// that also derive `Populate` are walked recursively with the parent's key
/// as prefix.
///
/// # Attributes
///
/// - `#[config(key = "Name")]` - Key segment for the field
/// - `#[serde(rename = "Name")]` - Used when no `config(key)` is present
/// - `#[serde(alias = "Name")]` - Used when neither of the above is present
/// - `#[config(default = <literal>)]` - Assigned when the backend has no entry
/// - `#[config(env = "VAR")]` - Read `VAR` after the walk if the field is still zero
/// - `#[config(skip)]` - Leave the field alone
///
/// # Example
///
/// ```ignore
/// #[derive(Default, Populate)]
/// struct Api {
///     #[config(key = "Port", env = "PORT")]
///     port: i32,
///
///     #[config(key = "Host", default = "127.0.0.1")]
///     host: String,
/// }
///
/// #[derive(Default, Populate)]
/// struct Configuration {
///     #[config(key = "API")]
///     api: Api,
/// }
///
/// // Reads "API.Port" and "API.Host", then falls back to $PORT.
/// let config: Configuration = confwalk::Populator::new(&backend).load()?;
/// ```
#[proc_macro_derive(Populate, attributes(config, serde))]
pub fn derive_populate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    // On error, convert to a compile_error!() invocation for better error messages
    expand::Expander::expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
