// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for branchenv.
//!
//! ```text
//! Config: GlobalConfig, DiscoveryConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::discovery::{DEFAULT_PATTERN, Selection};
use crate::logging::LogLevel;

/// Global options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console log level (0-6).
    pub log_level: LogLevel,
    /// Optional log file; gets everything down to TRACE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

/// Environment file discovery options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Directory to search (default: current working directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Glob matched against file names in `directory`.
    pub pattern: String,
    /// Tie-break when several files match.
    pub selection: Selection,
    /// Undo a partial activation when setup fails.
    pub rollback: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            directory: None,
            pattern: DEFAULT_PATTERN.to_string(),
            selection: Selection::default(),
            rollback: false,
        }
    }
}
