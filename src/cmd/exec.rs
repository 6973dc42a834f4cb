// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exec command implementation.
//!
//! ```text
//! setup_with(.., ProcessEnv)
//!        |
//!        v
//! which(PROGRAM)        resolved with the activated PATH
//!        |
//!        v
//! spawn (inherit stdio, kill_on_drop)
//!        |
//!   select!
//!   /        \
//! wait()    ctrl_c()
//!   |          |
//!   |       kill + wait, exit 130
//!    \        /
//!     v      v
//!   breakdown()
//!        |
//!        v
//!   child exit code
//! ```

use std::path::Path;
use std::process::{ExitCode, Stdio};

use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::cli::env::ExecArgs;
use crate::config::Config;
use crate::context::EnvironmentContext;
use crate::core::env::ProcessEnv;
use crate::error::{BranchEnvResult, ProcessError};

/// Exit code reported when the child was interrupted with Ctrl-C.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Main handler for the exec command.
///
/// The environment is cleared again whether or not the child could be
/// started.
///
/// # Errors
///
/// Returns an error if setup fails, the program is not on `PATH`, or the
/// child cannot be spawned or waited on.
pub async fn run_exec_command(args: &ExecArgs, config: &Config) -> BranchEnvResult<ExitCode> {
    let mut ctx = EnvironmentContext::setup_with(&config.setup_options(), ProcessEnv)?;

    let (program, rest) = args.split();
    let outcome = run_program(program, rest).await;

    ctx.breakdown();
    Ok(ExitCode::from(outcome?))
}

/// Resolves `program` on `PATH`, runs it with inherited stdio and returns
/// its exit code.
///
/// # Errors
///
/// Returns a [`ProcessError`] if the program cannot be found, spawned or
/// waited on, or if it was killed by a signal.
pub async fn run_program(program: &str, args: &[String]) -> Result<u8, ProcessError> {
    let resolved = which::which(program).map_err(|_| ProcessError::ExecutableNotFound {
        name: program.to_string(),
    })?;
    let command_line = command_line(&resolved, args);
    debug!(cmd = %command_line, "exec");

    let mut child = Command::new(&resolved)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ProcessError::SpawnFailed {
            command: command_line.clone(),
            source,
        })?;
    trace!(pid = ?child.id(), "spawned");

    let status = tokio::select! {
        status = child.wait() => status,
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!(cmd = %command_line, "interrupted, terminating process");
            if let Err(err) = child.kill().await {
                warn!(error = %err, "failed to kill process");
            }
            return Ok(INTERRUPTED_EXIT_CODE);
        }
    }
    .map_err(|source| ProcessError::WaitFailed {
        command: command_line.clone(),
        source,
    })?;

    let code = status.code().ok_or_else(|| ProcessError::Terminated {
        command: command_line.clone(),
    })?;
    trace!(exit_code = code, "completed");

    Ok(exit_code_byte(code))
}

/// Maps a platform exit code onto the `0..=255` range of [`ExitCode`].
///
/// Codes outside that range (Windows NTSTATUS values, for instance) become 1
/// so that a failure never reads as success.
#[must_use]
pub fn exit_code_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

pub(crate) fn command_line(program: &Path, args: &[String]) -> String {
    let mut cmd = program.display().to_string();
    for arg in args {
        cmd.push(' ');
        if arg.contains(' ') {
            cmd.push('"');
            cmd.push_str(arg);
            cmd.push('"');
        } else {
            cmd.push_str(arg);
        }
    }
    cmd
}
