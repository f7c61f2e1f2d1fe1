//! Process environment snapshots
//!
//! The child `git` process never inherits the parent environment directly.
//! A snapshot is taken at invocation time and sanitized: empty values are
//! dropped, and so is `EDITOR` in any letter case, so an interactive editor
//! can never be launched behind the `core.editor` override.

use std::ffi::{OsStr, OsString};

/// Interactive editor variable removed from every child environment
pub const EDITOR_VARIABLE: &str = "EDITOR";

/// An ordered list of environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: Vec<(OsString, OsString)>,
}

impl Environment {
    /// Snapshot the current process environment
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    /// Build an environment from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether `name` is set, even to an empty value
    pub fn contains<K: AsRef<OsStr>>(&self, name: K) -> bool {
        let name = name.as_ref();
        self.vars.iter().any(|(k, _)| k == name)
    }

    /// Value of `name`, if set
    pub fn get<K: AsRef<OsStr>>(&self, name: K) -> Option<&OsStr> {
        let name = name.as_ref();
        self.vars
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_os_str())
    }

    /// Copy of this environment safe to hand to a non-interactive child
    pub fn sanitized(&self) -> Self {
        Self {
            vars: self
                .vars
                .iter()
                .filter(|(k, v)| !v.is_empty() && !is_editor_variable(k))
                .cloned()
                .collect(),
        }
    }

    /// Iterate over the variables in order
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether there are no variables
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

fn is_editor_variable(name: &OsStr) -> bool {
    name.to_string_lossy().eq_ignore_ascii_case(EDITOR_VARIABLE)
}
