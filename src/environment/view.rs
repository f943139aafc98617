//! Environment variable access.
//!
//! The resolvers never touch `std::env` directly. They read through an
//! [`EnvironmentView`], and the only write they perform is the single
//! set-if-absent of the region override made by the account lookup.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// Read access to environment variables plus one guarded write.
pub trait EnvironmentView: Send + Sync {
    /// Get a variable's value, or `None` if unset (or not valid unicode).
    fn var(&self, key: &str) -> Option<String>;

    /// Set `key` to `value` only if it is currently unset.
    ///
    /// Returns `true` if the write happened. The check and the write are
    /// one atomic step with respect to other callers of this method.
    fn set_var_if_unset(&self, key: &str, value: &str) -> bool;

    /// Get a variable's value, treating whitespace-only values as unset.
    fn non_empty_var(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.trim().is_empty())
    }
}

/// Serializes writes to the real process environment.
static PROCESS_ENV_LOCK: Mutex<()> = Mutex::new(());

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    /// Create a view of the process environment.
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentView for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set_var_if_unset(&self, key: &str, value: &str) -> bool {
        let _guard = PROCESS_ENV_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if std::env::var_os(key).is_some() {
            return false;
        }
        std::env::set_var(key, value);
        true
    }
}

/// An in-memory environment, used by tests and embedders that want to
/// resolve against a fixed set of variables.
///
/// # Example
///
/// ```
/// use cloudctx::environment::{EnvironmentView, MapEnvironment};
///
/// let env = MapEnvironment::new().with("AWS_REGION", "eu-west-2");
/// assert_eq!(env.var("AWS_REGION").as_deref(), Some("eu-west-2"));
/// assert!(!env.set_var_if_unset("AWS_REGION", "us-east-1"));
/// ```
#[derive(Debug, Default)]
pub struct MapEnvironment {
    vars: RwLock<HashMap<String, String>>,
}

impl MapEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn with(self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a variable unconditionally.
    pub fn insert(&self, key: &str, value: &str) {
        self.vars
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    /// Remove a variable.
    pub fn remove(&self, key: &str) {
        self.vars
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }
}

impl EnvironmentView for MapEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set_var_if_unset(&self, key: &str, value: &str) -> bool {
        let mut vars = self
            .vars
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if vars.contains_key(key) {
            return false;
        }
        vars.insert(key.to_string(), value.to_string());
        true
    }
}
