// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point: set up a branch environment and tear it down again.
//!
//! ```text
//! EnvironmentContext::setup()
//!   |
//!   +-- discover(cwd, ".env.*", Sorted)   NoEnvironmentFileFound
//!   +-- Environment::from_path()          MalformedPath
//!   +-- Environment::read()               ReadFailure / ParseFailure
//!   +-- Environment::set(store)           ActivationFailure
//!   |        (rollback=true: undo partial activation first)
//!   v
//! ready context:  get / variables / environment
//!   |
//!   v
//! breakdown()     Environment::unset, errors logged only
//! ```
//!
//! A context owns its store. Pass `&mut store` to keep using the store after
//! the context is gone.

use std::path::{Path, PathBuf};

use bon::Builder;
use tracing::{info, warn};

use crate::core::env::{EnvStore, Environment, EnvironmentVariable, ProcessEnv};
use crate::discovery::{self, DEFAULT_PATTERN, Selection};
use crate::error::{EnvError, EnvResult};

/// Where and how to look for the environment file.
#[derive(Debug, Clone, Builder)]
pub struct SetupOptions {
    /// Directory to search. `None` means the current working directory.
    #[builder(into, setters(name = with_directory))]
    directory: Option<PathBuf>,
    #[builder(into, setters(name = with_pattern), default = DEFAULT_PATTERN.to_owned())]
    pattern: String,
    #[builder(setters(name = with_selection), default)]
    selection: Selection,
    /// Undo a partial activation before reporting the failure.
    #[builder(setters(name = with_rollback), default)]
    rollback: bool,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SetupOptions {
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub const fn rollback(&self) -> bool {
        self.rollback
    }

    fn search_dir(&self) -> EnvResult<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(|source| EnvError::ReadFailure {
                path: PathBuf::from("."),
                source,
            }),
        }
    }
}

/// An activated branch environment.
///
/// Either fully set up or never constructed: every setup failure is
/// returned as an error and no context exists.
#[derive(Debug)]
pub struct EnvironmentContext<S: EnvStore = ProcessEnv> {
    env: Environment,
    store: S,
    activated: Vec<String>,
}

impl EnvironmentContext<ProcessEnv> {
    /// Activates the first `.env.*` file of the current working directory
    /// into the process environment.
    ///
    /// See [`ProcessEnv`] for the threading contract.
    ///
    /// # Errors
    ///
    /// Any discovery, read, parse or activation failure. With no matching
    /// file the error is [`EnvError::NoEnvironmentFileFound`] and the
    /// environment is left untouched.
    pub fn setup() -> EnvResult<Self> {
        Self::setup_with(&SetupOptions::default(), ProcessEnv)
    }
}

impl<S: EnvStore> EnvironmentContext<S> {
    /// Runs discovery, parsing and activation into `store`.
    ///
    /// # Errors
    ///
    /// Same as [`EnvironmentContext::setup`]. An [`EnvError::ActivationFailure`]
    /// leaves the keys it lists active unless `options.rollback()` is set.
    pub fn setup_with(options: &SetupOptions, mut store: S) -> EnvResult<Self> {
        let dir = options.search_dir()?;
        let path = discovery::discover(&dir, options.pattern(), options.selection())?;

        let mut env = Environment::from_path(path)?;
        env.read()?;

        let activated = match env.set(&mut store) {
            Ok(keys) => keys,
            Err(err) => {
                if options.rollback() {
                    let cleared = Environment::rollback(&mut store, err.activated_keys());
                    warn!(cleared, "activation failed, rolled back");
                }
                return Err(err);
            }
        };

        info!(
            branch = env.branch(),
            path = %env.path().display(),
            "environment ready"
        );
        Ok(Self {
            env,
            store,
            activated,
        })
    }

    /// Reads `key` from the live store, not from the parsed file.
    ///
    /// Returns an empty string when the key is not set.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.store.get(key).unwrap_or_default()
    }

    /// Deactivates the environment. Failures are logged, never returned.
    ///
    /// The parsed variables stay available afterwards.
    pub fn breakdown(&mut self) {
        if let Err(err) = self.env.unset(&mut self.store) {
            warn!(error = %err, "breakdown incomplete");
        }
    }

    /// The parsed variables, in activation order.
    #[must_use]
    pub fn variables(&self) -> &[EnvironmentVariable] {
        self.env.variables()
    }

    /// The branch label of the active environment.
    #[must_use]
    pub fn environment(&self) -> &str {
        self.env.branch()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.env.path()
    }

    /// Keys written during setup, marker first.
    #[must_use]
    pub fn activated_keys(&self) -> &[String] {
        &self.activated
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}
