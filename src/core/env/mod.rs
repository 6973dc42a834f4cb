// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variables: parsing, activation and the stores they live in.
//!
//! # Architecture
//!
//! ```text
//! EnvironmentVariable  immutable key/value, value() refuses ""
//! Environment          branch + Vec<EnvironmentVariable> + path
//!                      read / set / unset / rollback
//! EnvStore             ProcessEnv (real) | MemoryEnv (in-memory)
//! ```
//!
//! - **Marker**: `local-environment` holds the active branch label
//! - **Sorted parse**: variables are added in key order
//! - **Names checked at write time**: empty, `=` or NUL are refused

pub mod environment;
pub mod store;
pub mod types;
pub mod variable;

#[cfg(test)]
mod tests;

pub use environment::Environment;
pub use store::{EnvStore, MemoryEnv, ProcessEnv};
pub use types::MARKER_KEY;
pub use variable::EnvironmentVariable;
