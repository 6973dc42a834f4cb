// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Types shared by the environment stores.
//!
//! ```text
//! EnvKey: case-insensitive on Windows (PATH == Path == path), exact elsewhere
//! validate_assignment(): empty name | '=' in name | NUL anywhere -> refused
//! ```

use crate::error::AssignmentError;

/// Name of the marker variable holding the active branch label.
pub const MARKER_KEY: &str = "local-environment";

/// An environment variable key that compares the way the host platform does.
#[derive(Debug, Clone, Eq)]
pub(super) struct EnvKey(String);

impl EnvKey {
    pub(super) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg(windows)]
    fn folded(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    #[cfg(not(windows))]
    fn folded(&self) -> &str {
        &self.0
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        if cfg!(windows) {
            self.0.eq_ignore_ascii_case(&other.0)
        } else {
            self.0 == other.0
        }
    }
}

impl std::hash::Hash for EnvKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.folded().hash(state);
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.folded().cmp(&other.folded())
    }
}

/// Checks a variable name alone, as used by reads and removals.
pub(super) fn validate_key(key: &str) -> Result<(), AssignmentError> {
    if key.is_empty() {
        Err(AssignmentError::EmptyKey)
    } else if key.contains('=') {
        Err(AssignmentError::KeyContainsEquals)
    } else if key.contains('\0') {
        Err(AssignmentError::ContainsNul)
    } else {
        Ok(())
    }
}

/// Checks a full assignment before it reaches a store.
pub(super) fn validate_assignment(key: &str, value: &str) -> Result<(), AssignmentError> {
    validate_key(key)?;
    if value.contains('\0') {
        return Err(AssignmentError::ContainsNul);
    }
    Ok(())
}
