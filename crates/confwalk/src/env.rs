//! Environment collaborators consulted for fallback values.
//!
//! After the tree walk, fields declared with `#[config(env = "VAR")]` that
//! are still zero are filled from an [`Environment`]. The process
//! environment is the usual source; [`MapEnv`] exists for tests and for
//! embedding applications that manage their own variables.

use std::collections::HashMap;

/// Read-only access to named variables.
pub trait Environment {
    /// Returns the variable's value, or `None` if it is unset or not UTF-8.
    fn var(&self, name: &str) -> Option<String>;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// The current process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables.
///
/// # Example
///
/// ```rust
/// use confwalk::{Environment, MapEnv};
///
/// let env = MapEnv::new().with("PORT", "8080");
/// assert_eq!(env.var("PORT").as_deref(), Some("8080"));
/// assert_eq!(env.var("HOME"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Builder form of [`MapEnv::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = MapEnv::new();
        for (name, value) in iter {
            env.set(name, value);
        }
        env
    }
}

/// The process environment layered over a `.env` file.
///
/// Process variables win. The file is read once at construction with
/// [`dotenvy`] and the process environment is never modified.
#[cfg(feature = "dotenv")]
#[derive(Clone, Debug)]
pub struct DotenvEnv {
    file: MapEnv,
    path: std::path::PathBuf,
}

#[cfg(feature = "dotenv")]
impl DotenvEnv {
    /// Loads variables from the `.env` file at `path`.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref().to_path_buf();

        let iter = dotenvy::from_path_iter(&path).map_err(|e| crate::Error::dotenv(&path, e))?;

        let mut file = MapEnv::new();
        for item in iter {
            let (name, value) = item.map_err(|e| crate::Error::dotenv(&path, e))?;
            file.set(name, value);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), "loaded .env file");

        Ok(Self { file, path })
    }

    /// Like [`DotenvEnv::from_path`], but a missing file yields an empty layer.
    pub fn from_path_optional(path: impl AsRef<std::path::Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_path(path)
        } else {
            Ok(Self {
                file: MapEnv::new(),
                path: path.to_path_buf(),
            })
        }
    }

    /// The path the file layer was read from.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "dotenv")]
impl Environment for DotenvEnv {
    fn var(&self, name: &str) -> Option<String> {
        ProcessEnv.var(name).or_else(|| self.file.var(name))
    }
}
