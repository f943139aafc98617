//! Write-once cache cells.
//!
//! Each resolved value lives in a [`CacheCell`] for the lifetime of its
//! resolver. The first caller computes it; concurrent callers block on the
//! init lock and then read the winner's value. A failed computation leaves
//! the cell unresolved.

use std::convert::Infallible;
use std::sync::{Mutex, OnceLock};

/// State of a cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedValue<T> {
    /// Not computed yet.
    Unresolved,
    /// Computed and present.
    Resolved(T),
    /// Computed, and there was nothing to find.
    ResolvedEmpty,
}

impl<T> ResolvedValue<T> {
    /// Whether a computation has completed.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

impl<'a, T> ResolvedValue<&'a Option<T>> {
    /// Treat a cached `None` as [`ResolvedValue::ResolvedEmpty`].
    pub fn flatten(self) -> ResolvedValue<&'a T> {
        match self {
            Self::Unresolved => ResolvedValue::Unresolved,
            Self::ResolvedEmpty | Self::Resolved(None) => ResolvedValue::ResolvedEmpty,
            Self::Resolved(Some(value)) => ResolvedValue::Resolved(value),
        }
    }
}

/// A lazily-initialized, write-once value with single-flight init.
#[derive(Debug)]
pub struct CacheCell<T> {
    value: OnceLock<T>,
    init: Mutex<()>,
}

impl<T> Default for CacheCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CacheCell<T> {
    /// Create an unresolved cell.
    pub fn new() -> Self {
        Self {
            value: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// The cached value, if computed.
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Current state without triggering a computation.
    pub fn state(&self) -> ResolvedValue<&T> {
        match self.value.get() {
            Some(value) => ResolvedValue::Resolved(value),
            None => ResolvedValue::Unresolved,
        }
    }

    /// Get the value, computing it with `init` on first use.
    ///
    /// An `Err` is returned to the caller and nothing is cached, so the
    /// next call computes again.
    pub fn get_or_try_init<E, F>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let _guard = self
            .init
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Another caller may have finished while we waited.
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let computed = init()?;
        Ok(self.value.get_or_init(|| computed))
    }

    /// Get the value, computing it with an infallible `init` on first use.
    pub fn get_or_init<F>(&self, init: F) -> &T
    where
        F: FnOnce() -> T,
    {
        match self.get_or_try_init(|| Ok::<T, Infallible>(init())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}
