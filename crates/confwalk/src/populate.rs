//! The [`Populate`] trait and its leaf implementations.
//!
//! `#[derive(Populate)]` implements the trait for configuration structs by
//! visiting each field in declaration order. Leaf types implement it here:
//!
//! | Kind | Types | Backend getter |
//! |------|-------|----------------|
//! | integer | `i8`, `i16`, `i32`, `i64`, `i128`, `isize` | [`Backend::get_int`] |
//! | boolean | `bool` | [`Backend::get_bool`] |
//! | string | `String` | [`Backend::get_string`] |
//!
//! Unsigned integers, floats, `char`, sequences, maps, `Option` and `Box`
//! also implement the trait, but populating them fails with
//! [`Error::Unsupported`]. Any other type is rejected at compile time.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display, Formatter};

use crate::Error;
use crate::backend::Backend;
use crate::env::Environment;

/// Semantic kind of a configuration field, independent of its width.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// A signed integer of any width.
    Integer,
    /// `bool`.
    Boolean,
    /// `String`.
    String,
    /// An unsigned integer. Unsupported.
    Unsigned,
    /// `f32` or `f64`. Unsupported.
    Float,
    /// `char`. Unsupported.
    Char,
    /// `Vec<T>` or `[T; N]`. Unsupported.
    Sequence,
    /// `HashMap` or `BTreeMap`. Unsupported.
    Map,
    /// `Option<T>`. Unsupported.
    Optional,
    /// `Box<T>`. Unsupported.
    Pointer,
}

impl Kind {
    /// Returns true for kinds the populator can write.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            Kind::Integer | Kind::Boolean | Kind::String
        )
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::String => "string",
            Kind::Unsigned => "unsigned integer",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
            Kind::Optional => "optional",
            Kind::Pointer => "pointer",
        };
        f.write_str(name)
    }
}

/// A resolved leaf key and the kind of field behind it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeySpec {
    /// Fully qualified dotted key.
    pub key: String,

    /// Kind of the field at that key.
    pub kind: Kind,
}

impl KeySpec {
    /// Creates a new `KeySpec`.
    pub fn new(key: impl Into<String>, kind: Kind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }
}

impl Display for KeySpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.kind)
    }
}

/// Joins a key prefix and a field segment with `.`.
///
/// An empty prefix denotes the root, so the segment is returned unchanged.
pub fn join_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// A value that can be filled from a [`Backend`].
///
/// Usually implemented with `#[derive(Populate)]`:
///
/// ```rust
/// use confwalk::{MemoryBackend, Populate, Populator};
///
/// #[derive(Default, Populate)]
/// struct Api {
///     #[config(key = "Port")]
///     port: i32,
///     #[serde(rename = "Host")]
///     host: String,
/// }
///
/// #[derive(Default, Populate)]
/// struct Configuration {
///     #[config(key = "API")]
///     api: Api,
/// }
///
/// let backend = MemoryBackend::new()
///     .with_value("API.Port", 9000)
///     .with_value("API.Host", "localhost");
///
/// let mut config = Configuration::default();
/// Populator::new(&backend).populate(&mut config).unwrap();
/// assert_eq!(config.api.port, 9000);
/// assert_eq!(config.api.host, "localhost");
/// ```
pub trait Populate {
    /// Overwrites `self` with the backend's values.
    ///
    /// `key` is the fully qualified key of `self`; records pass
    /// `join_key(key, segment)` to each field, and the root is called with
    /// an empty key.
    fn populate(&mut self, backend: &dyn Backend, key: &str) -> Result<(), Error>;

    /// Appends a [`KeySpec`] for every leaf reachable from `Self`.
    fn describe(key: &str, out: &mut Vec<KeySpec>)
    where
        Self: Sized;

    /// Applies environment fallbacks after the whole tree has been walked.
    ///
    /// Leaves have nothing to do here; records forward to their fields.
    fn apply_fallbacks(&mut self, _env: &dyn Environment) -> Result<(), Error> {
        Ok(())
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl Populate for $ty {
            fn populate(&mut self, backend: &dyn Backend, key: &str) -> Result<(), Error> {
                let raw = backend.get_int(key);
                *self = num_traits::cast::<i64, $ty>(raw)
                    .ok_or_else(|| Error::out_of_range(key, raw, stringify!($ty)))?;

                #[cfg(feature = "tracing")]
                tracing::trace!(key, value = raw, "resolved integer");

                Ok(())
            }

            fn describe(key: &str, out: &mut Vec<KeySpec>) {
                out.push(KeySpec::new(key, Kind::Integer));
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize);

impl Populate for bool {
    fn populate(&mut self, backend: &dyn Backend, key: &str) -> Result<(), Error> {
        *self = backend.get_bool(key);

        #[cfg(feature = "tracing")]
        tracing::trace!(key, value = *self, "resolved boolean");

        Ok(())
    }

    fn describe(key: &str, out: &mut Vec<KeySpec>) {
        out.push(KeySpec::new(key, Kind::Boolean));
    }
}

impl Populate for String {
    fn populate(&mut self, backend: &dyn Backend, key: &str) -> Result<(), Error> {
        *self = backend.get_string(key);

        #[cfg(feature = "tracing")]
        tracing::trace!(key, value = %self, "resolved string");

        Ok(())
    }

    fn describe(key: &str, out: &mut Vec<KeySpec>) {
        out.push(KeySpec::new(key, Kind::String));
    }
}

macro_rules! impl_unsupported {
    ($kind:expr => $([$($generics:tt)*] $ty:ty),* $(,)?) => {$(
        impl<$($generics)*> Populate for $ty {
            fn populate(&mut self, _backend: &dyn Backend, key: &str) -> Result<(), Error> {
                Err(Error::unsupported(key, $kind))
            }

            fn describe(key: &str, out: &mut Vec<KeySpec>) {
                out.push(KeySpec::new(key, $kind));
            }
        }
    )*};
}

impl_unsupported!(Kind::Unsigned => [] u8, [] u16, [] u32, [] u64, [] u128, [] usize);
impl_unsupported!(Kind::Float => [] f32, [] f64);
impl_unsupported!(Kind::Char => [] char);
impl_unsupported!(Kind::Sequence => [T] Vec<T>, [T, const N: usize] [T; N]);
impl_unsupported!(Kind::Map => [K, V, S] HashMap<K, V, S>, [K, V] BTreeMap<K, V>);
impl_unsupported!(Kind::Optional => [T] Option<T>);
impl_unsupported!(Kind::Pointer => [T: ?Sized] Box<T>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBackend;

    #[test]
    fn test_join_key() {
        assert_eq!(join_key("", "API"), "API");
        assert_eq!(join_key("API", "Port"), "API.Port");
        assert_eq!(join_key("a.b", "c"), "a.b.c");
    }

    #[test]
    fn test_integer_widths() {
        let backend = MemoryBackend::new().with_value("n", -100);

        let mut a = 0i8;
        a.populate(&backend, "n").unwrap();
        assert_eq!(a, -100);

        let mut b = 0i64;
        b.populate(&backend, "n").unwrap();
        assert_eq!(b, -100);

        let mut c = 0i128;
        c.populate(&backend, "n").unwrap();
        assert_eq!(c, -100);
    }

    #[test]
    fn test_integer_out_of_range() {
        let backend = MemoryBackend::new().with_value("n", 300);

        let mut small = 7i8;
        let err = small.populate(&backend, "n").unwrap_err();
        assert!(matches!(err, Error::OutOfRange { value: 300, .. }));
        assert_eq!(small, 7);
    }

    #[test]
    fn test_bool_and_string() {
        let backend = MemoryBackend::new()
            .with_value("flag", "true")
            .with_value("name", 42);

        let mut flag = false;
        flag.populate(&backend, "flag").unwrap();
        assert!(flag);

        let mut name = String::from("old");
        name.populate(&backend, "name").unwrap();
        assert_eq!(name, "42");

        name.populate(&backend, "missing").unwrap();
        assert_eq!(name, "");
    }

    #[test]
    fn test_unsupported_kinds() {
        let backend = MemoryBackend::new().with_value("x", 1);

        let mut ratio = 0.5f64;
        let err = ratio.populate(&backend, "x").unwrap_err();
        assert!(matches!(err, Error::Unsupported { kind: Kind::Float, .. }));
        assert_eq!(ratio, 0.5);

        let mut list: Vec<String> = Vec::new();
        let err = list.populate(&backend, "x").unwrap_err();
        assert!(matches!(err, Error::Unsupported { kind: Kind::Sequence, .. }));

        let mut port: Option<i32> = None;
        let err = port.populate(&backend, "x").unwrap_err();
        assert!(matches!(err, Error::Unsupported { kind: Kind::Optional, .. }));
    }

    #[test]
    fn test_describe_leaf() {
        let mut out = Vec::new();
        <u16 as Populate>::describe("API.Port", &mut out);
        <bool as Populate>::describe("API.Debug", &mut out);
        assert_eq!(
            out,
            vec![
                KeySpec::new("API.Port", Kind::Unsigned),
                KeySpec::new("API.Debug", Kind::Boolean),
            ]
        );
        assert_eq!(out[0].to_string(), "API.Port (unsigned integer)");
    }

    #[test]
    fn test_kind_support() {
        assert!(Kind::Integer.is_supported());
        assert!(Kind::String.is_supported());
        assert!(!Kind::Float.is_supported());
        assert_eq!(Kind::Pointer.to_string(), "pointer");
    }
}
