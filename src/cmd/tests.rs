// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::exec::{command_line, exit_code_byte, run_program};
use super::get::lookup;
use super::show::ShowReport;
use crate::context::{EnvironmentContext, SetupOptions};
use crate::core::env::{MARKER_KEY, MemoryEnv};
use crate::error::ProcessError;
use std::path::Path;
use tempfile::TempDir;

fn active_context(content: &str) -> (TempDir, EnvironmentContext<MemoryEnv>) {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(temp.path().join(".env.staging"), content).expect("failed to write file");
    let options = SetupOptions::builder().with_directory(temp.path()).build();
    let ctx = EnvironmentContext::setup_with(&options, MemoryEnv::new()).expect("setup failed");
    (temp, ctx)
}

fn render(report: &ShowReport<'_>, json: bool) -> String {
    let mut out = Vec::new();
    if json {
        report.write_json(&mut out).unwrap();
    } else {
        report.write_text(&mut out).unwrap();
    }
    String::from_utf8(out).unwrap()
}

#[test]
fn test_show_text_keys_only() {
    let (temp, ctx) = active_context(r#"{"DB_HOST":"localhost","API_KEY":"secret"}"#);
    let text = render(&ShowReport::new(&ctx, false), false);
    let text = text.replace(&temp.path().display().to_string(), "<dir>");

    insta::assert_snapshot!(text, @r"
    branch: staging
    file:   <dir>/.env.staging
    API_KEY
    DB_HOST
    ");
}

#[test]
fn test_show_text_with_values() {
    let (_temp, ctx) = active_context(r#"{"DB_HOST":"localhost","EMPTY":""}"#);
    let text = render(&ShowReport::new(&ctx, true), false);

    let lines: Vec<_> = text.lines().skip(2).collect();
    assert_eq!(lines, ["DB_HOST=localhost", "EMPTY="]);
}

#[test]
fn test_show_json() {
    let (_temp, ctx) = active_context(r#"{"A":"1"}"#);

    let keys_only: serde_json::Value =
        serde_json::from_str(&render(&ShowReport::new(&ctx, false), true)).unwrap();
    assert_eq!(keys_only["branch"], "staging");
    assert_eq!(keys_only["variables"], serde_json::json!([{ "key": "A" }]));

    let with_values: serde_json::Value =
        serde_json::from_str(&render(&ShowReport::new(&ctx, true), true)).unwrap();
    assert_eq!(
        with_values["variables"],
        serde_json::json!([{ "key": "A", "value": "1" }])
    );
}

#[test]
fn test_lookup_distinguishes_unset_from_empty() {
    let (_temp, ctx) = active_context(r#"{"EMPTY":"","A":"1"}"#);

    assert_eq!(lookup(&ctx, "A").as_deref(), Some("1"));
    assert_eq!(lookup(&ctx, "EMPTY").as_deref(), Some(""));
    assert_eq!(lookup(&ctx, MARKER_KEY).as_deref(), Some("staging"));
    assert_eq!(lookup(&ctx, "MISSING"), None);
}

#[test]
fn test_exit_code_byte() {
    assert_eq!(exit_code_byte(0), 0);
    assert_eq!(exit_code_byte(42), 42);
    assert_eq!(exit_code_byte(255), 255);
    assert_eq!(exit_code_byte(256), 1);
    assert_eq!(exit_code_byte(-1), 1);
}

#[test]
fn test_command_line_quotes_spaces() {
    let args = vec!["run".to_string(), "two words".to_string()];
    assert_eq!(
        command_line(Path::new("/usr/bin/tool"), &args),
        r#"/usr/bin/tool run "two words""#
    );
    assert_eq!(command_line(Path::new("ls"), &[]), "ls");
    assert_eq!(
        command_line(Path::new("env"), &["A=1".to_string(), String::new()]),
        "env A=1 "
    );
}

#[tokio::test]
async fn test_run_program_not_found() {
    let err = run_program("branchenv-definitely-not-a-program", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessError::ExecutableNotFound { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_program_exit_codes() {
    assert_eq!(run_program("true", &[]).await.unwrap(), 0);
    assert_eq!(run_program("false", &[]).await.unwrap(), 1);

    let args = vec!["-c".to_string(), "exit 7".to_string()];
    assert_eq!(run_program("sh", &args).await.unwrap(), 7);
}
