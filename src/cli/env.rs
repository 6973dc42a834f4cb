// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the commands that activate an environment.
//!
//! ```text
//! show [--values] [--json]   → branch, file, keys
//! get KEY                    → value on stdout, exit 1 if unset
//! exec -- PROGRAM [ARGS...]  → child exit code
//! ```

use clap::Args;

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ShowArgs {
    /// Prints values next to the keys.
    #[arg(long)]
    pub values: bool,

    /// Prints a JSON document instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Variable name.
    #[arg(value_name = "KEY")]
    pub key: String,
}

/// Arguments for the `exec` command.
#[derive(Debug, Clone, Args)]
pub struct ExecArgs {
    /// Program to run, followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl ExecArgs {
    /// The program name and its arguments.
    #[must_use]
    pub fn split(&self) -> (&str, &[String]) {
        match self.command.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => ("", &[]),
        }
    }
}
