//! Key/value backends queried by the populator.
//!
//! A [`Backend`] resolves a fully qualified dotted key (for example
//! `"API.Port"`) to a typed value. Lookups never fail: a key that is not set
//! reads as the zero value of the requested type.
//!
//! [`MemoryBackend`] is the in-crate implementation. It keeps three layers,
//! checked in priority order:
//!
//! 1. **Overrides** - values forced by the application
//! 2. **Values** - values merged from files, environment, flags, ...
//! 3. **Defaults** - lowest priority fallbacks

use std::collections::HashMap;

use crate::value::ConfigValue;

/// A loosely-typed configuration store with typed getters.
///
/// Implementations must be infallible: unknown keys and values that cannot
/// be coerced read as `0`, `false` or `""`.
pub trait Backend {
    /// Returns the value at `key` coerced to an integer.
    fn get_int(&self, key: &str) -> i64;

    /// Returns the value at `key` coerced to a boolean.
    fn get_bool(&self, key: &str) -> bool;

    /// Returns the value at `key` coerced to a string.
    fn get_string(&self, key: &str) -> String;

    /// Returns true if `key` has a value in any layer.
    ///
    /// Used to decide whether a field's declared default applies.
    fn contains(&self, key: &str) -> bool;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn get_int(&self, key: &str) -> i64 {
        (**self).get_int(key)
    }

    fn get_bool(&self, key: &str) -> bool {
        (**self).get_bool(key)
    }

    fn get_string(&self, key: &str) -> String {
        (**self).get_string(key)
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn get_int(&self, key: &str) -> i64 {
        (**self).get_int(key)
    }

    fn get_bool(&self, key: &str) -> bool {
        (**self).get_bool(key)
    }

    fn get_string(&self, key: &str) -> String {
        (**self).get_string(key)
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

/// Layered in-memory [`Backend`].
///
/// # Example
///
/// ```rust
/// use confwalk::{Backend, MemoryBackend};
///
/// let backend = MemoryBackend::new()
///     .with_default("API.Port", 8080)
///     .with_value("API.Port", "9000")
///     .with_value("API.Host", "0.0.0.0");
///
/// assert_eq!(backend.get_int("API.Port"), 9000);
/// assert_eq!(backend.get_string("API.Host"), "0.0.0.0");
/// assert_eq!(backend.get_bool("API.Debug"), false);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    overrides: HashMap<String, ConfigValue>,
    values: HashMap<String, ConfigValue>,
    defaults: HashMap<String, ConfigValue>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value in the override layer.
    pub fn set_override(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.overrides.insert(key.into(), value.into());
    }

    /// Sets a value in the value layer.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Sets a value in the default layer.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.defaults.insert(key.into(), value.into());
    }

    /// Builder form of [`MemoryBackend::set_override`].
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.set_override(key, value);
        self
    }

    /// Builder form of [`MemoryBackend::set`].
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder form of [`MemoryBackend::set_default`].
    #[must_use]
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.set_default(key, value);
        self
    }

    /// Merges a nested map into the value layer, flattening it to dotted keys.
    ///
    /// `{"API": {"Port": 80}}` becomes `API.Port = 80`. Existing keys are
    /// replaced.
    pub fn merge_map(&mut self, map: HashMap<String, ConfigValue>) {
        flatten_into(&mut self.values, "", map);
    }

    /// Returns the highest-priority value stored for `key`.
    ///
    /// `ConfigValue::None` entries are treated as unset so that a lower layer
    /// can still supply a value.
    pub fn lookup(&self, key: &str) -> Option<&ConfigValue> {
        [&self.overrides, &self.values, &self.defaults]
            .into_iter()
            .filter_map(|layer| layer.get(key))
            .find(|value| !value.is_none())
    }

    /// Number of distinct keys across all layers.
    pub fn len(&self) -> usize {
        let mut keys: Vec<&String> = self
            .overrides
            .keys()
            .chain(self.values.keys())
            .chain(self.defaults.keys())
            .collect();
        keys.sort();
        keys.dedup();
        keys.len()
    }

    /// Returns true if no layer holds any key.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.values.is_empty() && self.defaults.is_empty()
    }
}

fn flatten_into(
    target: &mut HashMap<String, ConfigValue>,
    prefix: &str,
    map: HashMap<String, ConfigValue>,
) {
    for (segment, value) in map {
        let key = crate::populate::join_key(prefix, &segment);
        match value {
            ConfigValue::Map(nested) => flatten_into(target, &key, nested),
            other => {
                target.insert(key, other);
            }
        }
    }
}

impl Backend for MemoryBackend {
    fn get_int(&self, key: &str) -> i64 {
        self.lookup(key).map_or(0, ConfigValue::to_int_lossy)
    }

    fn get_bool(&self, key: &str) -> bool {
        self.lookup(key).is_some_and(ConfigValue::to_bool_lossy)
    }

    fn get_string(&self, key: &str) -> String {
        self.lookup(key)
            .map(ConfigValue::to_string_lossy)
            .unwrap_or_default()
    }

    fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for MemoryBackend {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut backend = MemoryBackend::new();
        for (key, value) in iter {
            backend.set(key, value);
        }
        backend
    }
}
