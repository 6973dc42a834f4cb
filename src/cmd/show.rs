// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Show command implementation.

use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::cli::env::ShowArgs;
use crate::config::Config;
use crate::context::EnvironmentContext;
use crate::core::env::{EnvStore, ProcessEnv};
use crate::error::BranchEnvResult;

/// What `show` prints, in either format.
#[derive(Debug, Serialize)]
pub struct ShowReport<'a> {
    pub branch: &'a str,
    pub path: &'a Path,
    pub variables: Vec<ShowEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ShowEntry<'a> {
    pub key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'a str>,
}

impl<'a> ShowReport<'a> {
    /// Builds the report from an active context. Values are read from the
    /// parsed file and only included when `with_values` is set.
    #[must_use]
    pub fn new<S: EnvStore>(ctx: &'a EnvironmentContext<S>, with_values: bool) -> Self {
        let variables = ctx
            .variables()
            .iter()
            .map(|var| {
                let (key, value) = var.as_pair();
                ShowEntry {
                    key,
                    value: with_values.then_some(value),
                }
            })
            .collect();

        Self {
            branch: ctx.environment(),
            path: ctx.path(),
            variables,
        }
    }

    /// Writes the text form: a header, then one key (or `key=value`) per line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "branch: {}", self.branch)?;
        writeln!(out, "file:   {}", self.path.display())?;
        for entry in &self.variables {
            match entry.value {
                Some(value) => writeln!(out, "{}={value}", entry.key)?,
                None => writeln!(out, "{}", entry.key)?,
            }
        }
        Ok(())
    }

    /// Writes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_json(&self, out: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Main handler for the show command.
///
/// # Errors
///
/// Returns an error if setup fails or stdout cannot be written.
pub fn run_show_command(args: &ShowArgs, config: &Config) -> BranchEnvResult<()> {
    let mut ctx = EnvironmentContext::setup_with(&config.setup_options(), ProcessEnv)?;

    let report = ShowReport::new(&ctx, args.values);
    let mut stdout = std::io::stdout().lock();
    let written = if args.json {
        report.write_json(&mut stdout)
    } else {
        report.write_text(&mut stdout)
    };

    ctx.breakdown();
    Ok(written?)
}
