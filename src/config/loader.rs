// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration sources.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("branchenv.toml")
//!   .add_toml_file(--config)
//!   .with_env_prefix("BRANCHENV")     only <PREFIX>_GLOBAL__* / _DISCOVERY__*
//!   .set(key, value)                  CLI flags
//!        |
//!        v
//!    build() --> Config | ConfigError::ParseError
//! ```

use std::path::{Path, PathBuf};

use config::{File, FileFormat};

use super::Config;
use crate::error::ConfigError;

/// Sections that environment variables may address.
const ENV_SECTIONS: [&str; 2] = ["GLOBAL", "DISCOVERY"];

/// Collects the sources of a [`Config`] in priority order; later wins.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(&'static str, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist when [`ConfigLoader::build`] runs.
    #[must_use]
    pub fn add_toml_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.files.push(("file", path.to_path_buf()));
        self
    }

    /// Adds a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.exists() {
            self.files.push(("optional", path.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files.push(("string", PathBuf::from("<string>")));
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` variables at build time.
    ///
    /// Other variables that merely share the prefix are ignored.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Overrides a single `section.key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `key` is not a valid path.
    pub fn set(mut self, key: &str, value: impl Into<config::Value>) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override(key, value).map_err(|e| {
            let (section, key) = key.split_once('.').unwrap_or(("", key));
            ConfigError::InvalidValue {
                section: section.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(self)
    }

    /// Merges every source into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] naming the loaded files if a
    /// required file is missing, a file is not valid TOML, or a value does
    /// not fit its field.
    pub fn build(self) -> Result<Config, ConfigError> {
        let origin = self.origin();
        let to_parse_error = |e: config::ConfigError| ConfigError::ParseError {
            path: origin.clone(),
            message: e.to_string(),
        };

        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(section_vars(prefix, utf8_vars()))),
            ),
            None => self.builder,
        };
        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(to_parse_error)
    }

    /// One `N. [kind] path` line per source, in load order.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (kind, path))| format!("{}. [{kind}] {}", i + 1, path.display()))
            .collect()
    }

    fn origin(&self) -> String {
        if self.files.is_empty() {
            return "<defaults>".to_string();
        }
        self.files
            .iter()
            .map(|(_, path)| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Process variables whose name and value are both valid UTF-8.
fn utf8_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
}

/// Keeps the variables that address a known section, such as
/// `BRANCHENV_DISCOVERY__PATTERN`. Matching is case-insensitive.
pub(super) fn section_vars(
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> config::Map<String, String> {
    let wanted: Vec<String> = ENV_SECTIONS
        .iter()
        .map(|section| format!("{}_{section}__", prefix.to_ascii_uppercase()))
        .collect();

    vars.into_iter()
        .filter(|(name, _)| {
            let name = name.to_ascii_uppercase();
            wanted.iter().any(|start| name.starts_with(start.as_str()))
        })
        .collect()
}
