// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for branchenv using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! branchenv [global options] <command>
//! version
//! options
//! show [--values] [--json]
//! get <KEY>
//! exec -- <PROGRAM> [ARGS...]
//! ```

pub mod env;
pub mod global;


use crate::cli::env::{ExecArgs, GetArgs, ShowArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Branch-Specific Environment Bootstrapper
///
/// Activates the variables of a `.env.<branch>` JSON file for the duration
/// of a command.
#[derive(Debug, Parser)]
#[command(
    name = "branchenv",
    author,
    version,
    about = "Branch-Specific Environment Bootstrapper",
    long_about = "branchenv Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Finds a `.env.<branch>` file in the working directory, loads its\n\
                  flat JSON object of strings and exports every entry, together\n\
                  with `local-environment=<branch>`, into the environment.\n\n\
                  `branchenv exec -- cargo test` runs a command inside the\n\
                  branch environment. See `branchenv <command> --help` for more\n\
                  information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  branchenv reads `branchenv.toml` from the current directory if\n\
                  present, then every file given with --config, then variables\n\
                  named BRANCHENV_<SECTION>__<KEY> (e.g. BRANCHENV_DISCOVERY__PATTERN).\n\
                  Command line flags override all of them."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files in load order.
    Configs,

    /// Activates the environment and prints what was activated.
    Show(ShowArgs),

    /// Prints the value of one variable inside the environment.
    Get(GetArgs),

    /// Runs a program inside the environment.
    Exec(ExecArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
