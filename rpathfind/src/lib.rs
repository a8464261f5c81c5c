//! Resolve the installation base directory of a Python runtime.
//!
//! Asks the runtime's installation configuration for its library directory
//! (`LIBDIR`) and returns the parent of that directory. Build systems use the
//! result as a linker search path or rpath.
//!
//! # Architecture
//!
//! ```text
//! Resolver (public API)
//!  ├── ConfigSource (trait: config_var(name) -> Option<OsString>)
//!  │    ├── PythonSysconfig: runs `python -c` against sysconfig
//!  │    └── StaticSource: in-memory map
//!  └── base_dir: parent of the library directory
//! ```
//!
//! # Example
//!
//! ```
//! use rpathfind::{Resolver, StaticSource};
//!
//! let src = StaticSource::new().with("LIBDIR", "/usr/lib/python3.9");
//! let res = Resolver::new(src).resolve().unwrap();
//! assert_eq!(res.base_dir, std::path::Path::new("/usr/lib"));
//! ```

mod error;
mod path;
mod python;
mod source;

use std::path::PathBuf;

pub use error::{Error, Result};
pub use path::base_dir;
pub use python::PythonSysconfig;
pub use source::{ConfigSource, StaticSource};

/// Variable naming the library directory in the installation configuration.
pub const LIBDIR: &str = "LIBDIR";

/// Settings for building a [`Resolver`] over a Python interpreter.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Interpreter to query. `None` discovers `python3` / `python` on `PATH`.
    pub interpreter: Option<PathBuf>,
    /// Variable holding the library directory. Defaults to [`LIBDIR`].
    pub variable: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            interpreter: None,
            variable: LIBDIR.to_owned(),
        }
    }
}

/// Outcome of a successful lookup.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Resolution {
    /// Variable that was queried.
    pub variable: String,
    /// Library directory as reported by the configuration facility.
    pub libdir: PathBuf,
    /// Parent of `libdir`.
    pub base_dir: PathBuf,
}

/// Looks up the library directory through a [`ConfigSource`] and computes
/// its parent.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    /// Where variables are looked up.
    source: S,
    /// Name of the library-directory variable.
    variable: String,
}

impl<S: ConfigSource> Resolver<S> {
    /// Creates a resolver that queries [`LIBDIR`] from `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            variable: LIBDIR.to_owned(),
        }
    }

    /// Queries `variable` instead of [`LIBDIR`].
    #[must_use]
    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// The underlying configuration source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Resolves the base directory.
    ///
    /// Fails with [`Error::NotFound`] when the variable is absent or empty.
    pub fn resolve(&self) -> Result<Resolution> {
        let libdir = self
            .source
            .config_var(&self.variable)?
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::not_found(&self.variable))
            .map(PathBuf::from)?;

        let base_dir = base_dir(&libdir);
        tracing::debug!(
            variable = %self.variable,
            libdir = %libdir.display(),
            base_dir = %base_dir.display(),
            "resolved"
        );

        Ok(Resolution {
            variable: self.variable.clone(),
            libdir,
            base_dir,
        })
    }
}

impl Resolver<PythonSysconfig> {
    /// Builds a resolver over a Python interpreter from `config`.
    ///
    /// Runs interpreter discovery when no interpreter is configured.
    pub fn from_config(config: ResolverConfig) -> Result<Self> {
        let source = match config.interpreter {
            Some(path) => PythonSysconfig::new(path),
            None => PythonSysconfig::discover()?,
        };
        Ok(Self::new(source).variable(config.variable))
    }
}
