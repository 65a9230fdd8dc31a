//! Environment fallbacks for fields that the walk left at their zero value.
//!
//! A field declared as
//!
//! ```rust,ignore
//! #[config(key = "Port", env = "PORT")]
//! port: i32,
//! ```
//!
//! is first populated from the backend like any other field. Once the whole
//! tree has been walked, if `port` is still `0` and `PORT` is set to a
//! non-empty value, the variable is parsed into the field. A value that does
//! not parse aborts population with [`Error::EnvParse`].

use crate::Error;
use crate::env::Environment;
use crate::value::parse_bool;

/// A leaf that can be written without going through the backend.
///
/// Fields with `#[config(env = "...")]` or `#[config(default = ...)]` must
/// have a type implementing this trait: a signed integer, `bool` or `String`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot take a `#[config(env)]` or `#[config(default)]` value",
    label = "only signed integers, `bool` and `String` can"
)]
pub trait EnvFallback: Sized {
    /// Returns true if the field still holds its zero value.
    fn is_zero(&self) -> bool;

    /// Parses the raw variable value.
    fn from_env(var: &str, raw: &str) -> Result<Self, Error>;
}

macro_rules! impl_integer_fallback {
    ($($ty:ty),* $(,)?) => {$(
        impl EnvFallback for $ty {
            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn from_env(var: &str, raw: &str) -> Result<Self, Error> {
                raw.parse::<$ty>()
                    .map_err(|e| Error::env_parse(var, raw, stringify!($ty), Box::new(e)))
            }
        }
    )*};
}

impl_integer_fallback!(i8, i16, i32, i64, i128, isize);

impl EnvFallback for bool {
    fn is_zero(&self) -> bool {
        !*self
    }

    fn from_env(var: &str, raw: &str) -> Result<Self, Error> {
        parse_bool(raw).ok_or_else(|| {
            Error::env_parse(var, raw, "bool", "expected 1, t, true, 0, f or false".into())
        })
    }
}

impl EnvFallback for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn from_env(_var: &str, raw: &str) -> Result<Self, Error> {
        Ok(raw.to_string())
    }
}

/// Overwrites `field` from `var` if the field is zero and `var` is non-empty.
///
/// Returns whether the field was replaced. Called by derived
/// [`Populate::apply_fallbacks`](crate::Populate::apply_fallbacks) impls.
pub fn apply<T: EnvFallback>(
    field: &mut T,
    env: &dyn Environment,
    var: &str,
) -> Result<bool, Error> {
    if !field.is_zero() {
        return Ok(false);
    }

    let Some(raw) = env.var(var).filter(|v| !v.is_empty()) else {
        return Ok(false);
    };

    *field = T::from_env(var, &raw)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(var, "applied environment fallback");

    Ok(true)
}
