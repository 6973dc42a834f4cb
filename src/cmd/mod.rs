// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, configs), show, get, exec
//!
//! show / get / exec:
//!   setup_with(config.setup_options(), ProcessEnv)
//!     -> command body
//!     -> breakdown()   always, even when the body failed
//! ```

pub mod config;
pub mod exec;
pub mod get;
pub mod show;

#[cfg(test)]
mod tests;
