//! # confwalk
//!
//! Populates strongly-typed, nested configuration structs from a loosely-typed
//! key/value backend.
//!
//! `#[derive(Populate)]` generates a depth-first walk over a struct's fields.
//! Each field gets a dotted lookup key built from its parent's key and its own
//! segment; the value is read from the [`Backend`] with the getter matching the
//! field's type and written back in place. After the walk, fields marked with
//! an environment fallback are filled from the environment if they are still
//! zero.
//!
//! ## Quick Start
//!
//! ```rust
//! use confwalk::{MapEnv, MemoryBackend, Populate, Populator};
//!
//! #[derive(Debug, Default, Populate)]
//! struct Api {
//!     #[config(key = "Port", env = "PORT")]
//!     port: i32,
//!
//!     #[config(key = "Host")]
//!     host: String,
//! }
//!
//! #[derive(Debug, Default, Populate)]
//! struct Configuration {
//!     #[config(key = "API")]
//!     api: Api,
//!
//!     #[config(default = false)]
//!     verbose: bool,
//! }
//!
//! let backend = MemoryBackend::new().with_value("API.Host", "0.0.0.0");
//! let env = MapEnv::new().with("PORT", "8080");
//!
//! let mut config = Configuration::default();
//! Populator::new(&backend).with_env(&env).populate(&mut config)?;
//!
//! assert_eq!(config.api.host, "0.0.0.0");
//! assert_eq!(config.api.port, 8080);
//! # Ok::<(), confwalk::Error>(())
//! ```
//!
//! ## Field Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[config(key = "Name")]` | Key segment for this field (highest priority) |
//! | `#[serde(rename = "Name")]` | Key segment if no `config(key)` is given |
//! | `#[serde(alias = "Name")]` | Key segment if neither of the above is given |
//! | `#[config(default = <literal>)]` | Value used when the backend has no entry for the key |
//! | `#[config(env = "VAR")]` | Fill from `VAR` after the walk if the field is still zero |
//! | `#[config(skip)]` | Leave the field untouched |
//!
//! Without any of the key attributes the declared field name is used verbatim.
//!
//! ## Supported Field Types
//!
//! | Kind | Types |
//! |------|-------|
//! | integer | `i8`, `i16`, `i32`, `i64`, `i128`, `isize` |
//! | boolean | `bool` |
//! | string | `String` |
//! | record | any struct deriving [`Populate`] |
//!
//! Unsigned integers, floats, `char`, `Vec`, arrays, maps, `Option` and `Box`
//! compile but fail at runtime with [`Error::Unsupported`]. Only the leaf
//! kinds above accept `default` or `env`; on any other type those options
//! are compile errors.
//!
//! ## Error Handling
//!
//! [`Error`] integrates with [`miette`]:
//!
//! ```rust,ignore
//! if let Err(e) = Populator::new(&backend).populate(&mut config) {
//!     eprintln!("{:?}", miette::Report::from(e));
//!     std::process::exit(1);
//! }
//! ```

// Lets the derive's `::confwalk::` paths resolve inside this crate's tests.
extern crate self as confwalk;

pub use confwalk_macro::Populate;

pub mod backend;
pub mod diagnostic_codes;
pub mod env;
pub mod fallback;
pub mod populate;
pub mod populator;
pub mod value;

pub use backend::{Backend, MemoryBackend};
#[cfg(feature = "dotenv")]
pub use env::DotenvEnv;
pub use env::{Environment, MapEnv, ProcessEnv};
pub use fallback::EnvFallback;
pub use populate::{KeySpec, Kind, Populate, join_key};
pub use populator::{Populator, populate};
pub use value::ConfigValue;

use std::error::Error as StdError;

use miette::Diagnostic;

/// Errors that can occur while populating a configuration tree.
///
/// Every variant is fatal for the pass that produced it: population stops at
/// the first error and nothing already written is rolled back.
///
/// | Code | Meaning |
/// |------|---------|
/// | `confwalk::unsupported_type` | A field's kind has no coercion rule |
/// | `confwalk::out_of_range` | A backend integer does not fit the field |
/// | `confwalk::env_parse` | A fallback variable could not be parsed |
/// | `confwalk::dotenv` | A `.env` file could not be read |
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum Error {
    /// A field has a kind the populator cannot write.
    #[error("setting configuration values: unsupported field type {kind} at `{key}`")]
    #[diagnostic(
        code(confwalk::unsupported_type),
        help("use a signed integer, bool, String or a struct deriving Populate")
    )]
    Unsupported {
        /// Dotted key of the offending field.
        key: String,

        /// The field's kind.
        kind: Kind,
    },

    /// The backend returned an integer that does not fit the field.
    #[error("setting configuration values: {value} at `{key}` does not fit in {target}")]
    #[diagnostic(
        code(confwalk::out_of_range),
        help("widen the field's integer type or correct the configured value")
    )]
    OutOfRange {
        /// Dotted key of the field.
        key: String,

        /// The value the backend returned.
        value: i64,

        /// The field's integer type.
        target: &'static str,
    },

    /// An environment fallback variable is set but could not be parsed.
    #[error("formatting {var} into {expected_type}: got {value:?}")]
    #[diagnostic(code(confwalk::env_parse))]
    EnvParse {
        /// The environment variable name.
        var: String,

        /// The raw value of the variable.
        value: String,

        /// The field type the value was parsed into.
        expected_type: &'static str,

        /// Help text naming the variable and expected type.
        #[help]
        help: String,

        /// The underlying parse error.
        source: Box<dyn StdError + Send + Sync>,
    },

    /// A `.env` file could not be read or parsed.
    #[cfg(feature = "dotenv")]
    #[error("failed to load environment file {}", .path.display())]
    #[diagnostic(
        code(confwalk::dotenv),
        help("check that the file exists and uses KEY=value lines")
    )]
    Dotenv {
        /// Path of the file.
        path: std::path::PathBuf,

        /// The underlying dotenvy error.
        source: dotenvy::Error,
    },
}

impl Error {
    /// Creates an Unsupported error.
    pub fn unsupported(key: impl Into<String>, kind: Kind) -> Self {
        Error::Unsupported {
            key: key.into(),
            kind,
        }
    }

    /// Creates an OutOfRange error.
    pub fn out_of_range(key: impl Into<String>, value: i64, target: &'static str) -> Self {
        Error::OutOfRange {
            key: key.into(),
            value,
            target,
        }
    }

    /// Creates an EnvParse error with help text for the variable.
    pub fn env_parse(
        var: impl Into<String>,
        value: impl Into<String>,
        expected_type: &'static str,
        source: Box<dyn StdError + Send + Sync>,
    ) -> Self {
        let var = var.into();
        let help = format!("set {var} to a valid {expected_type} or unset it");
        Error::EnvParse {
            var,
            value: value.into(),
            expected_type,
            help,
            source,
        }
    }

    /// Creates a Dotenv error.
    #[cfg(feature = "dotenv")]
    pub fn dotenv(path: impl Into<std::path::PathBuf>, source: dotenvy::Error) -> Self {
        Error::Dotenv {
            path: path.into(),
            source,
        }
    }
}
