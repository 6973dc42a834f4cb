// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          BranchEnvError (~24 bytes)
//!                  |
//!   +--------+-----+-----+--------+--------+
//!   |        |           |        |        |
//!   v        v           v        v        v
//! Bail      Env        Config  Process    Io
//! Box<str>  Box         Box      Box      Box
//!
//! Sub-errors (unboxed internally):
//!   Env     NoEnvironmentFileFound, MalformedPath, ReadFailure,
//!           ParseFailure, ActivationFailure, DeactivationFailure, EmptyValue
//!           (store writes refused with AssignmentError)
//!   Config  ParseError, InvalidValue
//!   Process ExecutableNotFound, SpawnFailed, Terminated
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`BranchEnvError`], returned by the command handlers.
pub type BranchEnvResult<T> = std::result::Result<T, BranchEnvError>;

/// Result type using [`EnvError`].
pub type EnvResult<T> = std::result::Result<T, EnvError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum BranchEnvError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Environment lifecycle error.
    #[error("environment error: {0}")]
    Env(#[from] Box<EnvError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Child process error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Writing command output failed.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Create a fatal [`BranchEnvError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> BranchEnvError {
    BranchEnvError::Bailed(message.into().into_boxed_str())
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for BranchEnvError {
                fn from(err: $error) -> Self {
                    BranchEnvError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    EnvError => Env,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Environment Errors ---

/// Errors raised while discovering, loading, activating or clearing a
/// branch environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// No file in the search directory matched the discovery pattern.
    #[error("no environment file matching '{pattern}' in {}", .dir.display())]
    NoEnvironmentFileFound { dir: PathBuf, pattern: String },

    /// Several files matched and the selection policy requires exactly one.
    #[error("{} environment files match '{pattern}': {}", .candidates.len(), join_names(.candidates))]
    AmbiguousEnvironmentFile {
        pattern: String,
        candidates: Vec<PathBuf>,
    },

    /// The discovery pattern is not a valid glob.
    #[error("invalid discovery pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The file path carries no `env.` marker to derive a branch from.
    #[error("cannot derive a branch from '{}': missing 'env.'", .path.display())]
    MalformedPath { path: PathBuf },

    /// The environment file (or its directory) could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The environment file is not a flat JSON object of strings.
    #[error("failed to parse '{}': {source}", .path.display())]
    ParseFailure {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An assignment was refused. `activated` lists the keys that were set
    /// before the failure, in assignment order.
    #[error("failed to activate '{key}': {reason}")]
    ActivationFailure {
        key: String,
        #[source]
        reason: AssignmentError,
        activated: Vec<String>,
    },

    /// A variable could not be removed.
    #[error("failed to deactivate '{key}': {reason}")]
    DeactivationFailure {
        key: String,
        #[source]
        reason: AssignmentError,
    },

    /// The variable exists but holds an empty string.
    #[error("no value set in variable '{key}'")]
    EmptyValue { key: String },
}

impl EnvError {
    /// Keys left active by a failed activation.
    ///
    /// Empty for every other kind of error.
    #[must_use]
    pub fn activated_keys(&self) -> &[String] {
        match self {
            Self::ActivationFailure { activated, .. } => activated,
            _ => &[],
        }
    }
}

/// Why an environment store refused a write.
///
/// These mirror the cases where the platform environment rejects a name or
/// value, so the in-memory store behaves like the real one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("variable name is empty")]
    EmptyKey,

    #[error("variable name contains '='")]
    KeyContainsEquals,

    #[error("variable name or value contains a NUL byte")]
    ContainsNul,
}

fn join_names(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .map_or_else(|| p.display().to_string(), |n| n.to_string_lossy().into_owned())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Errors from the child process launched by `exec`.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed while waiting on the process.
    #[error("failed to wait for process '{command}': {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process was terminated by a signal.
    #[error("process '{command}' was terminated by a signal")]
    Terminated { command: String },
}
