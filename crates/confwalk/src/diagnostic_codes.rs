//! Centralized registry of diagnostic error codes used throughout confwalk.
//!
//! These constants mirror the codes in the `#[diagnostic(code(...))]`
//! attributes on [`crate::Error`], so callers can match on them without
//! spelling the strings out by hand.
//!
//! | Code | Description |
//! |------|-------------|
//! | `confwalk::unsupported_type` | Field kind has no coercion rule |
//! | `confwalk::out_of_range` | Backend integer does not fit the field |
//! | `confwalk::env_parse` | Fallback variable could not be parsed |
//! | `confwalk::dotenv` | `.env` file could not be read |
//!
//! # Example
//!
//! ```rust,ignore
//! use miette::Diagnostic;
//! use confwalk::diagnostic_codes;
//!
//! if err.code().map(|c| c.to_string()).as_deref() == Some(diagnostic_codes::ENV_PARSE) {
//!     eprintln!("fix the fallback environment variable");
//! }
//! ```

/// A field's kind has no coercion rule.
pub const UNSUPPORTED_TYPE: &str = "confwalk::unsupported_type";

/// A backend integer does not fit the field's width.
pub const OUT_OF_RANGE: &str = "confwalk::out_of_range";

/// An environment fallback variable could not be parsed.
pub const ENV_PARSE: &str = "confwalk::env_parse";

/// A `.env` file could not be read.
#[cfg(feature = "dotenv")]
pub const DOTENV: &str = "confwalk::dotenv";
