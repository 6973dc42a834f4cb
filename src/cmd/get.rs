// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Get command implementation.

use std::io::Write;
use std::process::ExitCode;

use tracing::debug;

use crate::cli::env::GetArgs;
use crate::config::Config;
use crate::context::EnvironmentContext;
use crate::core::env::{EnvStore, ProcessEnv};
use crate::error::BranchEnvResult;

/// Looks `key` up in the live store of an active context.
///
/// `None` when the variable is not set at all. An empty value is returned
/// as `Some("")`.
#[must_use]
pub fn lookup<S: EnvStore>(ctx: &EnvironmentContext<S>, key: &str) -> Option<String> {
    ctx.store().get(key)
}

/// Main handler for the get command.
///
/// Prints the value followed by a newline. Exits with code 1 and prints
/// nothing when the variable is not set.
///
/// # Errors
///
/// Returns an error if setup fails or stdout cannot be written.
pub fn run_get_command(args: &GetArgs, config: &Config) -> BranchEnvResult<ExitCode> {
    let mut ctx = EnvironmentContext::setup_with(&config.setup_options(), ProcessEnv)?;

    let outcome = match lookup(&ctx, &args.key) {
        Some(value) => writeln!(std::io::stdout().lock(), "{value}")
            .map(|()| ExitCode::SUCCESS)
            .map_err(Into::into),
        None => {
            debug!(key = %args.key, "variable not set");
            Ok(ExitCode::FAILURE)
        }
    };

    ctx.breakdown();
    outcome
}
