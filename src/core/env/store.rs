// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key/value stores the environment is activated into.
//!
//! # Architecture
//!
//! ```text
//! EnvStore (get / set / unset)
//!   ProcessEnv  -> std::env, process-global
//!   MemoryEnv   -> BTreeMap<EnvKey, String>, test double and snapshot
//!   &mut S      -> forwards, so callers can keep ownership of the store
//! ```

use super::types::{EnvKey, validate_assignment, validate_key};
use crate::error::AssignmentError;
use std::collections::BTreeMap;

/// Read/write access to an environment-style key/value table.
///
/// Writes are fallible so a store can refuse names the platform would
/// refuse. Reads of invalid names return `None`.
pub trait EnvStore {
    /// Returns the value of `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<String>;

    /// Sets `key` to `value`.
    ///
    /// # Errors
    ///
    /// Returns an [`AssignmentError`] if the name or value is not storable.
    fn set(&mut self, key: &str, value: &str) -> Result<(), AssignmentError>;

    /// Removes `key`. Removing a key that is not set succeeds.
    ///
    /// # Errors
    ///
    /// Returns an [`AssignmentError`] if the name is not valid.
    fn unset(&mut self, key: &str) -> Result<(), AssignmentError>;
}

impl<S: EnvStore + ?Sized> EnvStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AssignmentError> {
        (**self).set(key, value)
    }

    fn unset(&mut self, key: &str) -> Result<(), AssignmentError> {
        (**self).unset(key)
    }
}

/// The environment of the running process.
///
/// # Thread Safety
///
/// The process environment is global. Writes go through
/// `std::env::set_var` / `remove_var`, which are only sound while no other
/// thread reads or writes the environment. Run at most one setup/breakdown
/// pair per process and do it before spawning threads, or serialize access.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        validate_key(key).ok()?;
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AssignmentError> {
        validate_assignment(key, value)?;
        // SAFETY: the name and value were validated above, and the type-level
        // contract requires callers to keep other threads off the environment.
        unsafe {
            std::env::set_var(key, value);
        }
        Ok(())
    }

    fn unset(&mut self, key: &str) -> Result<(), AssignmentError> {
        validate_key(key)?;
        // SAFETY: same contract as `set`.
        unsafe {
            std::env::remove_var(key);
        }
        Ok(())
    }
}

/// An in-memory environment table.
///
/// Applies the same name rules as [`ProcessEnv`], so activation failures
/// can be reproduced without touching the real environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<EnvKey, String>,
}

impl MemoryEnv {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Returns true if `key` is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(&EnvKey::new(key))
    }

    /// Returns an iterator over the variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(&EnvKey::new(key)).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AssignmentError> {
        validate_assignment(key, value)?;
        self.vars.insert(EnvKey::new(key), value.to_owned());
        Ok(())
    }

    fn unset(&mut self, key: &str) -> Result<(), AssignmentError> {
        validate_key(key)?;
        self.vars.remove(&EnvKey::new(key));
        Ok(())
    }
}
