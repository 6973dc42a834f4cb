// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Locating the environment file.
//!
//! ```text
//! discover(dir, ".env.*", selection)
//!        |
//!        v
//!   read_dir(dir)          regular files only, no recursion
//!        |
//!        v
//!   wax glob on file name  .env.dev  .env.prod  (README.md skipped)
//!        |
//!        v
//!   Selection
//!     Sorted  -> smallest name  (default)
//!     First   -> directory order, platform dependent
//!     Unique  -> error unless exactly one
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use wax::{Glob, Program};

use crate::error::{ConfigError, EnvError, EnvResult};

/// Default discovery pattern.
pub const DEFAULT_PATTERN: &str = ".env.*";

/// How to choose among several matching files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Lexicographically smallest file name.
    #[default]
    Sorted,
    /// First entry returned by the directory listing. The order is not
    /// specified by any platform.
    First,
    /// Exactly one file must match.
    Unique,
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sorted => write!(f, "sorted"),
            Self::First => write!(f, "first"),
            Self::Unique => write!(f, "unique"),
        }
    }
}

impl std::str::FromStr for Selection {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sorted" => Ok(Self::Sorted),
            "first" => Ok(Self::First),
            "unique" => Ok(Self::Unique),
            _ => Err(ConfigError::InvalidValue {
                section: "discovery".to_string(),
                key: "selection".to_string(),
                message: format!("expected 'sorted', 'first', or 'unique', got '{s}'"),
            }),
        }
    }
}

/// Finds the environment file in `dir`.
///
/// # Errors
///
/// - [`EnvError::InvalidPattern`] if `pattern` is not a valid glob.
/// - [`EnvError::ReadFailure`] if `dir` cannot be listed.
/// - [`EnvError::NoEnvironmentFileFound`] if nothing matches.
/// - [`EnvError::AmbiguousEnvironmentFile`] with [`Selection::Unique`] and
///   more than one match.
pub fn discover(dir: &Path, pattern: &str, selection: Selection) -> EnvResult<PathBuf> {
    let candidates = find_candidates(dir, pattern)?;
    let chosen = select(candidates, selection).map_err(|candidates| {
        if candidates.is_empty() {
            EnvError::NoEnvironmentFileFound {
                dir: dir.to_path_buf(),
                pattern: pattern.to_owned(),
            }
        } else {
            EnvError::AmbiguousEnvironmentFile {
                pattern: pattern.to_owned(),
                candidates,
            }
        }
    })?;

    debug!(path = %chosen.display(), %selection, "selected environment file");
    Ok(chosen)
}

/// Lists every regular file directly in `dir` whose name matches `pattern`,
/// in directory-listing order.
///
/// # Errors
///
/// Returns [`EnvError::InvalidPattern`] or [`EnvError::ReadFailure`].
pub fn find_candidates(dir: &Path, pattern: &str) -> EnvResult<Vec<PathBuf>> {
    let glob = Glob::new(pattern).map_err(|e| EnvError::InvalidPattern {
        pattern: pattern.to_owned(),
        message: e.to_string(),
    })?;

    let entries = std::fs::read_dir(dir).map_err(|source| EnvError::ReadFailure {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut matches = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        if glob.is_match(Path::new(&name)) {
            trace!(path = %path.display(), "candidate");
            matches.push(path);
        }
    }

    debug!(
        dir = %dir.display(),
        pattern,
        count = matches.len(),
        "scanned for environment files"
    );
    Ok(matches)
}

/// Picks one path. On failure the candidates are handed back: empty for
/// "nothing found", non-empty for "ambiguous".
fn select(mut candidates: Vec<PathBuf>, selection: Selection) -> Result<PathBuf, Vec<PathBuf>> {
    match selection {
        Selection::First if !candidates.is_empty() => Ok(candidates.swap_remove(0)),
        Selection::Sorted if !candidates.is_empty() => {
            candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            Ok(candidates.swap_remove(0))
        }
        Selection::Unique if candidates.len() == 1 => Ok(candidates.swap_remove(0)),
        Selection::Unique => {
            candidates.sort();
            Err(candidates)
        }
        Selection::First | Selection::Sorted => Err(candidates),
    }
}
