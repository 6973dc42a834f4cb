// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use branchenv::config::Config;
use branchenv::context::EnvironmentContext;
use branchenv::core::env::MemoryEnv;
use branchenv::discovery::Selection;
use branchenv::logging::LogLevel;
use std::path::Path;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty() {
    let config = Config::parse("").unwrap();
    insta::assert_debug_snapshot!(config, @r#"
    Config {
        global: GlobalConfig {
            log_level: LogLevel(
                3,
            ),
            log_file: None,
        },
        discovery: DiscoveryConfig {
            directory: None,
            pattern: ".env.*",
            selection: Sorted,
            rollback: false,
        },
    }
    "#);
}

#[test]
fn config_parse_all_sections() {
    let toml = r#"
[global]
log_level = 1
log_file = "/var/log/branchenv.log"

[discovery]
directory = "/srv/app"
pattern = "*.env.*"
selection = "first"
rollback = true
"#;
    let config = Config::parse(toml).unwrap();

    assert_eq!(config.global.log_level, LogLevel::ERROR);
    assert_eq!(
        config.global.log_file.as_deref(),
        Some(Path::new("/var/log/branchenv.log"))
    );
    assert_eq!(config.discovery.directory.as_deref(), Some(Path::new("/srv/app")));
    assert_eq!(config.discovery.pattern, "*.env.*");
    assert_eq!(config.discovery.selection, Selection::First);
    assert!(config.discovery.rollback);
}

#[test]
fn config_error_names_the_source() {
    let err = Config::parse("[global]\nlog_level = \"loud\"").unwrap_err();
    assert!(err.to_string().contains("<string>"), "got {err}");
}

// =============================================================================
// Config driving setup
// =============================================================================

#[test]
fn config_setup_options_drive_discovery() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("svc.env.blue"), r#"{"COLOR":"blue"}"#).unwrap();
    std::fs::write(temp.path().join(".env.green"), r#"{"COLOR":"green"}"#).unwrap();

    let toml = format!(
        "[discovery]\ndirectory = '{}'\npattern = 'svc.env.*'\nselection = 'unique'\n",
        temp.path().display()
    );
    let config = Config::parse(&toml).unwrap();
    assert_eq!(config.discovery.selection, Selection::Unique);
    assert_eq!(config.global.log_level, LogLevel::INFO);

    let ctx = EnvironmentContext::setup_with(&config.setup_options(), MemoryEnv::new()).unwrap();
    assert_eq!(ctx.environment(), "blue");
    assert_eq!(ctx.get("COLOR"), "blue");
}

#[test]
fn config_from_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("branchenv.toml");
    std::fs::write(&path, "[discovery]\nrollback = true\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert!(config.discovery.rollback);
    assert!(config.setup_options().rollback());
}
