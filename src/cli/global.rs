// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE      ← Additional config files (can repeat)
//! --log-level N      ← Console verbosity (0-6)
//! --log-file FILE    ← global.log_file override
//! -C DIR             ← discovery.directory override
//! --pattern GLOB     ← discovery.pattern override
//! --selection MODE   ← discovery.selection override
//! --rollback         ← discovery.rollback override
//!
//! Precedence: CLI flags > BRANCHENV_* > --config > branchenv.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::discovery::Selection;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(long = "config", value_name = "FILE", global = true, action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Disables loading `branchenv.toml` from the current directory.
    #[arg(long = "no-default-config", global = true)]
    pub no_default_config: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true,
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory to search for the environment file.
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    /// Glob matched against file names in the search directory.
    #[arg(long = "pattern", value_name = "GLOB", global = true)]
    pub pattern: Option<String>,

    /// What to do when several files match.
    #[arg(long = "selection", value_name = "MODE", global = true,
        value_parser = clap::value_parser!(Selection)
    )]
    pub selection: Option<Selection>,

    /// Undo a partial activation when setup fails.
    #[arg(long = "rollback", global = true)]
    pub rollback: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.log_level", level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.display().to_string()));
        }

        if let Some(ref dir) = self.directory {
            overrides.push(("discovery.directory", dir.display().to_string()));
        }

        if let Some(ref pattern) = self.pattern {
            overrides.push(("discovery.pattern", pattern.clone()));
        }

        if let Some(selection) = self.selection {
            overrides.push(("discovery.selection", selection.to_string()));
        }

        if self.rollback {
            overrides.push(("discovery.rollback", "true".to_string()));
        }

        overrides
    }
}
