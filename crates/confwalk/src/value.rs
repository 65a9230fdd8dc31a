//! Type-erased configuration values held by a backend.
//!
//! The [`ConfigValue`] enum is what a [`MemoryBackend`](crate::MemoryBackend)
//! stores. Reads are best-effort: every value can be coerced to an integer,
//! a boolean or a string, falling back to the zero value when no sensible
//! conversion exists.
//!
//! # Example
//!
//! ```rust
//! use confwalk::ConfigValue;
//!
//! let value = ConfigValue::from_str_infer("8080");
//! assert_eq!(value, ConfigValue::UnsignedInteger(8080));
//! assert_eq!(value.to_int_lossy(), 8080);
//! assert_eq!(ConfigValue::from("yes").to_bool_lossy(), false);
//! ```

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// A type-erased configuration value.
///
/// # Supported Types
///
/// | Variant | Rust Types |
/// |---------|------------|
/// | `String` | `String`, `&str` |
/// | `Integer` | `i8`, `i16`, `i32`, `i64` |
/// | `UnsignedInteger` | `u8`, `u16`, `u32`, `u64` |
/// | `Float` | `f32`, `f64` |
/// | `Boolean` | `bool` |
/// | `List` | `Vec<ConfigValue>` |
/// | `Map` | `HashMap<String, ConfigValue>` |
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// A string value.
    String(String),

    /// A signed integer value (stored as i64 for maximum range).
    Integer(i64),

    /// An unsigned integer value (stored as u64 for maximum range).
    UnsignedInteger(u64),

    /// A floating-point value.
    Float(f64),

    /// A boolean value.
    Boolean(bool),

    /// A list of values.
    List(Vec<ConfigValue>),

    /// A map of string keys to values.
    Map(HashMap<String, ConfigValue>),

    /// No value. Reads as the zero value of every type.
    None,
}

impl ConfigValue {
    /// Creates a `ConfigValue` from a raw string, inferring the type.
    ///
    /// Inference order:
    /// 1. Boolean (`true`/`false`)
    /// 2. Unsigned integer
    /// 3. Signed integer
    /// 4. Float (only if the text contains `.`, `e` or `E`)
    /// 5. String
    pub fn from_str_infer(s: &str) -> Self {
        match s {
            "true" => return ConfigValue::Boolean(true),
            "false" => return ConfigValue::Boolean(false),
            _ => {}
        }

        if let Ok(u) = s.parse::<u64>() {
            return ConfigValue::UnsignedInteger(u);
        }

        if let Ok(i) = s.parse::<i64>() {
            return ConfigValue::Integer(i);
        }

        if s.contains(['.', 'e', 'E'])
            && let Ok(f) = s.parse::<f64>()
        {
            return ConfigValue::Float(f);
        }

        ConfigValue::String(s.to_string())
    }

    /// Returns the string slice if this is a [`ConfigValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for [`ConfigValue::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, ConfigValue::None)
    }

    /// Short name of the variant, used in trace output.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::UnsignedInteger(_) => "unsigned integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::Boolean(_) => "boolean",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "map",
            ConfigValue::None => "none",
        }
    }

    /// Coerces the value to an `i64`, returning 0 when no conversion applies.
    ///
    /// - unsigned integers saturate at `i64::MAX`
    /// - floats are truncated toward zero
    /// - booleans become 1 or 0
    /// - strings are parsed as integers; `0x`, `0o` and `0b` prefixes and
    ///   `_` separators are accepted, and an all-zero fraction (`"10.00"`)
    ///   is dropped before parsing
    pub fn to_int_lossy(&self) -> i64 {
        match self {
            ConfigValue::Integer(i) => *i,
            ConfigValue::UnsignedInteger(u) => i64::try_from(*u).unwrap_or(i64::MAX),
            ConfigValue::Float(f) => *f as i64,
            ConfigValue::Boolean(b) => i64::from(*b),
            ConfigValue::String(s) => parse_int_lossy(s).unwrap_or(0),
            ConfigValue::List(_) | ConfigValue::Map(_) | ConfigValue::None => 0,
        }
    }

    /// Coerces the value to a `bool`, returning `false` when no conversion applies.
    ///
    /// Numbers are true when non-zero. Strings accept `1`, `t`, `T`, `TRUE`,
    /// `true`, `True` and their false counterparts.
    pub fn to_bool_lossy(&self) -> bool {
        match self {
            ConfigValue::Boolean(b) => *b,
            ConfigValue::Integer(i) => *i != 0,
            ConfigValue::UnsignedInteger(u) => *u != 0,
            ConfigValue::Float(f) => *f != 0.0,
            ConfigValue::String(s) => parse_bool(s).unwrap_or(false),
            ConfigValue::List(_) | ConfigValue::Map(_) | ConfigValue::None => false,
        }
    }

    /// Coerces the value to a `String`. Lists, maps and `None` become empty.
    pub fn to_string_lossy(&self) -> String {
        match self {
            ConfigValue::String(s) => s.clone(),
            ConfigValue::Integer(i) => i.to_string(),
            ConfigValue::UnsignedInteger(u) => u.to_string(),
            ConfigValue::Float(f) => f.to_string(),
            ConfigValue::Boolean(b) => b.to_string(),
            ConfigValue::List(_) | ConfigValue::Map(_) | ConfigValue::None => String::new(),
        }
    }
}

/// Parses the boolean spellings accepted by [`ConfigValue::to_bool_lossy`].
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_int_lossy(s: &str) -> Option<i64> {
    let s = trim_zero_decimal(s);

    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match digits.get(..2) {
        Some("0x" | "0X") => (16, &digits[2..]),
        Some("0o" | "0O") => (8, &digits[2..]),
        Some("0b" | "0B") => (2, &digits[2..]),
        _ => (10, digits),
    };

    let digits = digits.replace('_', "");
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }

    // Parse the magnitude unsigned so that i64::MIN round-trips.
    let magnitude = u64::from_str_radix(&digits, radix).ok()?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn trim_zero_decimal(s: &str) -> &str {
    match s.split_once('.') {
        Some((whole, fraction))
            if !whole.is_empty() && !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') =>
        {
            whole
        }
        _ => s,
    }
}

impl Display for ConfigValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::List(items) => write!(f, "[{} item(s)]", items.len()),
            ConfigValue::Map(map) => write!(f, "{{{} key(s)}}", map.len()),
            ConfigValue::None => write!(f, "<none>"),
            other => f.write_str(&other.to_string_lossy()),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Integer(i64::from(value))
    }
}

impl From<u64> for ConfigValue {
    fn from(value: u64) -> Self {
        ConfigValue::UnsignedInteger(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Boolean(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(value: Vec<T>) -> Self {
        ConfigValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConfigValue::None, Into::into)
    }
}
