// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! A single parsed key/value pair.

use crate::error::{EnvError, EnvResult};
use serde::Serialize;

/// An immutable variable read from an environment file.
///
/// Keys are not validated here; a bad key surfaces when the variable is
/// activated into a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentVariable {
    key: String,
    value: String,
}

impl EnvironmentVariable {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::EmptyValue`] when the value is the empty string,
    /// including when the file declared it empty on purpose.
    pub fn value(&self) -> EnvResult<&str> {
        if self.value.is_empty() {
            Err(EnvError::EmptyValue {
                key: self.key.clone(),
            })
        } else {
            Ok(&self.value)
        }
    }

    /// Returns the key and the raw value, empty or not.
    #[must_use]
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.key, &self.value)
    }
}
