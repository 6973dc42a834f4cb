// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Configs | Show | Get | Exec
//! ```
//!
//! The runtime is single-threaded: the process environment is only ever
//! modified from this thread.

use std::io::IsTerminal;
use std::process::ExitCode;

use branchenv::cli::global::GlobalOptions;
use branchenv::cli::{self, Command};
use branchenv::cmd::config::{run_configs_command, run_options_command};
use branchenv::cmd::exec::run_exec_command;
use branchenv::cmd::get::run_get_command;
use branchenv::cmd::show::run_show_command;
use branchenv::config::loader::ConfigLoader;
use branchenv::config::{CONFIG_FILE, Config, ENV_PREFIX};
use branchenv::error::{BranchEnvResult, Result, bail_out};
use branchenv::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let (config, loaded_files) = match load_config(&cli.global) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match start_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, &config, &loaded_files).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(config: &Config) -> Result<LogGuard> {
    let log_config = LogConfig::builder()
        .with_console_level(config.global.log_level)
        .with_ansi(std::io::stderr().is_terminal())
        .maybe_with_log_file(config.global.log_file.clone())
        .build();
    init_logging(&log_config)
}

async fn dispatch_command(
    cli: &cli::Cli,
    config: &Config,
    loaded_files: &[String],
) -> BranchEnvResult<ExitCode> {
    match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Configs) => {
            run_configs_command(loaded_files);
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Show(args)) => run_show_command(args, config).map(|()| ExitCode::SUCCESS),
        Some(Command::Get(args)) => run_get_command(args, config),
        Some(Command::Exec(args)) => run_exec_command(args, config).await,
        None => Err(bail_out("no command specified, use --help for usage information")),
    }
}

/// Layers: `branchenv.toml`, `--config` files, `BRANCHENV_<SECTION>__<KEY>`, CLI flags.
///
/// Also returns the file listing printed by `configs`.
fn load_config(global: &GlobalOptions) -> BranchEnvResult<(Config, Vec<String>)> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    let loaded_files = loader.format_loaded_files();
    Ok((loader.build()?, loaded_files))
}
