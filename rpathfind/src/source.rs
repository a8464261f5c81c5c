//! Installation-configuration facilities.
//!
//! A [`ConfigSource`] answers "what is the value of configuration variable
//! `name`?" for some runtime installation. [`PythonSysconfig`](crate::PythonSysconfig)
//! asks a real interpreter; [`StaticSource`] answers from memory.

use std::collections::BTreeMap;
use std::ffi::OsString;

use crate::Result;

/// Read-only access to a runtime's installation configuration.
pub trait ConfigSource {
    /// Looks up a configuration variable.
    ///
    /// Returns `Ok(None)` when the facility answered but the variable is not
    /// set, and `Err` when the facility itself is unavailable. Values are
    /// OS strings so paths that are not valid UTF-8 survive the lookup.
    fn config_var(&self, name: &str) -> Result<Option<OsString>>;
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn config_var(&self, name: &str) -> Result<Option<OsString>> {
        (**self).config_var(name)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for Box<T> {
    fn config_var(&self, name: &str) -> Result<Option<OsString>> {
        (**self).config_var(name)
    }
}

/// A fixed, in-memory set of configuration variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource {
    /// Variable name to value.
    vars: BTreeMap<String, OsString>,
}

impl StaticSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<OsString>> FromIterator<(K, V)> for StaticSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for StaticSource {
    fn config_var(&self, name: &str) -> Result<Option<OsString>> {
        Ok(self.vars.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn static_lookup() {
        let src = StaticSource::new().with("LIBDIR", "/usr/lib");
        assert_eq!(src.config_var("LIBDIR").unwrap().as_deref(), Some(OsStr::new("/usr/lib")));
        assert_eq!(src.config_var("BINDIR").unwrap(), None);
    }

    #[test]
    fn collects_from_pairs() {
        let src: StaticSource = [("LIBDIR", "/a/lib"), ("BINDIR", "/a/bin")]
            .into_iter()
            .collect();
        assert_eq!(src, StaticSource::new().with("BINDIR", "/a/bin").with("LIBDIR", "/a/lib"));
    }

    #[test]
    fn forwards_through_references_and_boxes() {
        let src = StaticSource::new().with("LIBDIR", "/x/lib");
        let boxed: Box<dyn ConfigSource> = Box::new(src.clone());
        assert_eq!((&src).config_var("LIBDIR").unwrap(), boxed.config_var("LIBDIR").unwrap());
    }
}
