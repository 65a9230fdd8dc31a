//! The entry point that drives a full population pass.

use crate::Error;
use crate::backend::Backend;
use crate::env::{Environment, ProcessEnv};
use crate::populate::{KeySpec, Populate};

/// Populates configuration trees from a [`Backend`].
///
/// A pass has two phases:
///
/// 1. **Walk** - every field is visited depth-first in declaration order and
///    overwritten with the backend's value for its dotted key. The first
///    error aborts the pass; fields already written stay written.
/// 2. **Fallbacks** - fields declared with `#[config(env = "...")]` that are
///    still zero are filled from the [`Environment`].
///
/// # Example
///
/// ```rust
/// use confwalk::{MapEnv, MemoryBackend, Populate, Populator};
///
/// #[derive(Default, Populate)]
/// struct Api {
///     #[config(key = "Port", env = "PORT")]
///     port: i32,
/// }
///
/// #[derive(Default, Populate)]
/// struct Configuration {
///     #[config(key = "API")]
///     api: Api,
/// }
///
/// let backend = MemoryBackend::new();
/// let env = MapEnv::new().with("PORT", "8080");
///
/// let config: Configuration = Populator::new(&backend).with_env(&env).load().unwrap();
/// assert_eq!(config.api.port, 8080);
/// ```
#[derive(Clone, Copy)]
pub struct Populator<'a> {
    backend: &'a dyn Backend,
    env: &'a dyn Environment,
}

impl<'a> Populator<'a> {
    /// Creates a populator reading fallbacks from the process environment.
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            env: &ProcessEnv,
        }
    }

    /// Replaces the environment used for fallbacks.
    #[must_use]
    pub fn with_env(mut self, env: &'a dyn Environment) -> Self {
        self.env = env;
        self
    }

    /// Overwrites every reachable leaf of `root`, then applies fallbacks.
    pub fn populate<T: Populate>(&self, root: &mut T) -> Result<(), Error> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("populate", root = std::any::type_name::<T>()).entered();

        root.populate(self.backend, "")?;
        root.apply_fallbacks(self.env)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("configuration populated");

        Ok(())
    }

    /// Builds a `T` from its [`Default`] and populates it.
    pub fn load<T: Populate + Default>(&self) -> Result<T, Error> {
        let mut root = T::default();
        self.populate(&mut root)?;
        Ok(root)
    }

    /// Lists the dotted key and kind of every leaf reachable from `T`.
    pub fn keys<T: Populate>() -> Vec<KeySpec> {
        let mut out = Vec::new();
        T::describe("", &mut out);
        out
    }
}

/// Populates `root` from `backend`, with fallbacks from the process environment.
pub fn populate<T: Populate>(root: &mut T, backend: &dyn Backend) -> Result<(), Error> {
    Populator::new(backend).populate(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Kind, MapEnv, MemoryBackend};

    #[derive(Debug, Default, PartialEq, crate::Populate)]
    struct Api {
        #[config(key = "Port", env = "PORT")]
        port: i32,

        #[config(key = "Host")]
        host: String,
    }

    #[derive(Debug, Default, PartialEq, crate::Populate)]
    struct Configuration {
        #[config(key = "API")]
        api: Api,
    }

    #[test]
    fn test_walk_then_fallback() {
        let backend = MemoryBackend::new().with_value("API.Host", "localhost");
        let env = MapEnv::new().with("PORT", "8080");

        let config: Configuration = Populator::new(&backend).with_env(&env).load().unwrap();

        assert_eq!(
            config,
            Configuration {
                api: Api {
                    port: 8080,
                    host: "localhost".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_keys() {
        let keys = Populator::keys::<Configuration>();
        assert_eq!(
            keys,
            vec![
                KeySpec::new("API.Port", Kind::Integer),
                KeySpec::new("API.Host", Kind::String),
            ]
        );
    }
}
