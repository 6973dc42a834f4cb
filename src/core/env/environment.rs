// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! A branch environment loaded from one file.
//!
//! # Lifecycle
//!
//! ```text
//! from_path(".env.prod")   branch = "prod"
//!        |
//!        v
//!      read()              JSON object -> Vec<EnvironmentVariable>
//!        |
//!        v
//!      set(store)          marker first, then each variable; fail fast
//!        |
//!        v
//!     unset(store)         every variable (best effort), then marker
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::store::EnvStore;
use super::types::MARKER_KEY;
use super::variable::EnvironmentVariable;
use crate::error::{EnvError, EnvResult};

/// Text that separates the branch label from the rest of a file name.
const BRANCH_SEPARATOR: &str = "env.";

/// Variables for one branch, plus where they came from.
#[derive(Debug, Clone)]
pub struct Environment {
    branch: String,
    variables: Vec<EnvironmentVariable>,
    path: PathBuf,
}

impl Environment {
    /// Creates an empty environment for `path`.
    ///
    /// The branch is everything after the first `env.` in the file name,
    /// so `.env.staging` gives `staging` and `.env.eu.prod` gives `eu.prod`.
    /// Parent directories are not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::MalformedPath`] if the path has no file name or
    /// the file name has no `env.`.
    pub fn from_path(path: impl Into<PathBuf>) -> EnvResult<Self> {
        let path = path.into();
        let branch = path.file_name().and_then(|name| {
            name.to_string_lossy()
                .split_once(BRANCH_SEPARATOR)
                .map(|(_, branch)| branch.to_owned())
        });
        let Some(branch) = branch else {
            return Err(EnvError::MalformedPath { path });
        };

        Ok(Self {
            branch,
            variables: Vec::new(),
            path,
        })
    }

    /// Reads and parses the file, adding one variable per entry.
    ///
    /// The file must be a flat JSON object whose values are all strings.
    /// Entries are added in key order; nothing is added if parsing fails.
    ///
    /// # Errors
    ///
    /// - [`EnvError::ReadFailure`] if the file cannot be read.
    /// - [`EnvError::ParseFailure`] if it is not a flat object of strings.
    pub fn read(&mut self) -> EnvResult<()> {
        let content = std::fs::read(&self.path).map_err(|source| EnvError::ReadFailure {
            path: self.path.clone(),
            source,
        })?;

        let entries: BTreeMap<String, String> =
            serde_json::from_slice(&content).map_err(|source| EnvError::ParseFailure {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            count = entries.len(),
            "parsed environment file"
        );

        for (key, value) in entries {
            self.add(EnvironmentVariable::new(key, value));
        }
        Ok(())
    }

    /// Appends a variable. The live environment is not touched.
    pub fn add(&mut self, variable: EnvironmentVariable) {
        self.variables.push(variable);
    }

    /// Activates the environment into `store`.
    ///
    /// The marker [`MARKER_KEY`] is set to the branch first, then every
    /// variable in collection order. Returns the keys that were set.
    ///
    /// # Errors
    ///
    /// Stops at the first refused assignment with
    /// [`EnvError::ActivationFailure`]. Keys set before it stay set and are
    /// listed in the error; see [`Environment::rollback`].
    pub fn set<S: EnvStore + ?Sized>(&self, store: &mut S) -> EnvResult<Vec<String>> {
        let mut activated = Vec::with_capacity(self.variables.len() + 1);
        assign(store, MARKER_KEY, &self.branch, &mut activated)?;

        for variable in &self.variables {
            let (key, value) = variable.as_pair();
            if key == MARKER_KEY {
                warn!(key, branch = %self.branch, "variable overrides the branch marker");
            }
            assign(store, key, value, &mut activated)?;
        }

        info!(
            branch = %self.branch,
            count = self.variables.len(),
            "activated environment"
        );
        Ok(activated)
    }

    /// Removes every variable and then the marker from `store`.
    ///
    /// A variable that cannot be removed is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::DeactivationFailure`] only if the marker itself
    /// cannot be removed.
    pub fn unset<S: EnvStore + ?Sized>(&self, store: &mut S) -> EnvResult<()> {
        for variable in &self.variables {
            if let Err(reason) = store.unset(variable.key()) {
                warn!(key = variable.key(), %reason, "failed to deactivate variable");
            }
        }

        store
            .unset(MARKER_KEY)
            .map_err(|reason| EnvError::DeactivationFailure {
                key: MARKER_KEY.to_owned(),
                reason,
            })?;

        info!(branch = %self.branch, "deactivated environment");
        Ok(())
    }

    /// Removes `keys` from `store`, skipping any that cannot be removed.
    ///
    /// Meant for the key list carried by [`EnvError::ActivationFailure`].
    /// Returns the number of keys removed.
    pub fn rollback<S: EnvStore + ?Sized>(store: &mut S, keys: &[String]) -> usize {
        let mut cleared = 0;
        for key in keys {
            match store.unset(key) {
                Ok(()) => cleared += 1,
                Err(reason) => warn!(key = %key, %reason, "failed to roll back variable"),
            }
        }
        debug!(cleared, total = keys.len(), "rolled back partial activation");
        cleared
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn variables(&self) -> &[EnvironmentVariable] {
        &self.variables
    }
}

fn assign<S: EnvStore + ?Sized>(
    store: &mut S,
    key: &str,
    value: &str,
    activated: &mut Vec<String>,
) -> EnvResult<()> {
    if let Err(reason) = store.set(key, value) {
        return Err(EnvError::ActivationFailure {
            key: key.to_owned(),
            reason,
            activated: std::mem::take(activated),
        });
    }
    activated.push(key.to_owned());
    Ok(())
}
