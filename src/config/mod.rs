// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for branchenv.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. branchenv.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. BRANCHENV_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! BRANCHENV_GLOBAL__LOG_LEVEL=4        → global.log_level = 4
//! BRANCHENV_DISCOVERY__PATTERN=.env.*  → discovery.pattern = ".env.*"
//! BRANCHENV_DISCOVERY__SELECTION=first → discovery.selection = "first"
//! ```
//!
//! Sections and keys are separated by a double underscore because keys
//! themselves contain single underscores.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::context::SetupOptions;
use crate::error::ConfigError;

use loader::ConfigLoader;
use types::{DiscoveryConfig, GlobalConfig};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "branchenv.toml";

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "BRANCHENV";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Environment file discovery.
    pub discovery: DiscoveryConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use branchenv::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("branchenv.toml")
    ///     .with_env_prefix("BRANCHENV")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::builder().add_toml_str(content).build()
    }

    /// Builds the setup options described by the `[discovery]` section.
    #[must_use]
    pub fn setup_options(&self) -> SetupOptions {
        SetupOptions::builder()
            .maybe_with_directory(self.discovery.directory.clone())
            .with_pattern(self.discovery.pattern.clone())
            .with_selection(self.discovery.selection)
            .with_rollback(self.discovery.rollback)
            .build()
    }

    /// Format configuration options for display, one `key = value` per line
    /// in key order.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.log_level",
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "discovery.directory",
            self.discovery
                .directory
                .as_ref()
                .map_or_else(|| "(cwd)".to_string(), |p| p.display().to_string()),
        );
        options.insert("discovery.pattern", self.discovery.pattern.clone());
        options.insert("discovery.selection", self.discovery.selection.to_string());
        options.insert("discovery.rollback", self.discovery.rollback.to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
