// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the environment module.

use super::{EnvStore, Environment, EnvironmentVariable, MARKER_KEY, MemoryEnv};
use crate::error::{AssignmentError, EnvError};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_env_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("failed to write env file");
    path
}

fn loaded(content: &str) -> (TempDir, Environment) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_env_file(&dir, ".env.prod", content);
    let mut env = Environment::from_path(path).expect("path has a branch");
    env.read().expect("file should parse");
    (dir, env)
}

// --- EnvironmentVariable ---

#[test]
fn test_variable_value() {
    let var = EnvironmentVariable::new("HOST", "localhost");
    assert_eq!(var.key(), "HOST");
    assert_eq!(var.value().unwrap(), "localhost");
}

#[test]
fn test_variable_empty_value_is_an_error() {
    let var = EnvironmentVariable::new("TOKEN", "");
    assert!(matches!(
        var.value(),
        Err(EnvError::EmptyValue { ref key }) if key == "TOKEN"
    ));
    assert_eq!(var.as_pair(), ("TOKEN", ""));
}

#[test]
fn test_variable_key_is_not_validated() {
    let var = EnvironmentVariable::new("", "x");
    assert_eq!(var.key(), "");
    assert_eq!(var.value().unwrap(), "x");
}

// --- Environment::from_path ---

#[test]
fn test_branch_from_path() {
    let cases = [
        (".env.staging", "staging"),
        ("/srv/app/.env.prod", "prod"),
        (".env.eu.prod", "eu.prod"),
        ("config/env.dev", "dev"),
        (".env.", ""),
    ];
    for (path, expected) in cases {
        let env = Environment::from_path(path).unwrap();
        assert_eq!(env.branch(), expected, "branch for {path}");
        assert!(env.variables().is_empty());
    }
}

#[test]
fn test_branch_ignores_directory_names() {
    let env = Environment::from_path("/home/me/myenv.d/.env.qa").unwrap();
    assert_eq!(env.branch(), "qa");

    for path in ["env.d/settings", "/srv/env.prod/config.json", "/srv/.env.qa/.."] {
        let err = Environment::from_path(path).unwrap_err();
        assert!(matches!(err, EnvError::MalformedPath { .. }), "{path} should be malformed");
    }
}

#[test]
fn test_malformed_path() {
    let err = Environment::from_path("settings.json").unwrap_err();
    assert!(matches!(err, EnvError::MalformedPath { .. }));
}

// --- Environment::read ---

#[test]
fn test_read_key_set_matches_input() {
    let (_dir, env) = loaded(r#"{"B": "2", "A": "1", "C": ""}"#);

    let keys: BTreeSet<&str> = env.variables().iter().map(EnvironmentVariable::key).collect();
    assert_eq!(keys, BTreeSet::from(["A", "B", "C"]));
}

#[test]
fn test_read_adds_in_key_order() {
    let (_dir, env) = loaded(r#"{"ZETA": "z", "ALPHA": "a", "MID": "m"}"#);

    let keys: Vec<&str> = env.variables().iter().map(EnvironmentVariable::key).collect();
    assert_eq!(keys, ["ALPHA", "MID", "ZETA"]);
}

#[test]
fn test_read_duplicate_key_last_wins() {
    let (_dir, env) = loaded(r#"{"A": "first", "A": "second"}"#);
    assert_eq!(env.variables(), [EnvironmentVariable::new("A", "second")]);
}

#[test]
fn test_read_empty_object() {
    let (_dir, env) = loaded("{}");
    assert!(env.variables().is_empty());
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut env = Environment::from_path(dir.path().join(".env.gone")).unwrap();

    let err = env.read().unwrap_err();
    assert!(matches!(err, EnvError::ReadFailure { .. }), "got {err:?}");
}

#[test]
fn test_read_rejects_non_flat_or_non_string_content() {
    let inputs = [
        r#"{"A": "1", "B": "#,
        r#"{"A": 1}"#,
        r#"{"A": true}"#,
        r#"{"A": null}"#,
        r#"{"A": ["x"]}"#,
        r#"{"A": {"B": "c"}}"#,
        r#"["A", "B"]"#,
        "not json",
        "",
    ];
    let dir = tempfile::tempdir().unwrap();

    for input in inputs {
        let path = write_env_file(&dir, ".env.bad", input);
        let mut env = Environment::from_path(path).unwrap();
        let err = env.read().unwrap_err();
        assert!(
            matches!(err, EnvError::ParseFailure { .. }),
            "expected parse failure for {input:?}, got {err:?}"
        );
        assert!(env.variables().is_empty(), "nothing added for {input:?}");
    }
}

#[test]
fn test_add_does_not_touch_store() {
    let mut env = Environment::from_path(".env.dev").unwrap();
    env.add(EnvironmentVariable::new("A", "1"));
    assert_eq!(env.variables().len(), 1);
}

// --- Environment::set / unset ---

#[test]
fn test_set_marker_first_then_variables() {
    let (_dir, env) = loaded(r#"{"A": "1", "B": "2"}"#);
    let mut store = MemoryEnv::new();

    let activated = env.set(&mut store).unwrap();

    assert_eq!(activated, [MARKER_KEY, "A", "B"]);
    assert_eq!(store.get(MARKER_KEY).as_deref(), Some("prod"));
    assert_eq!(store.get("A").as_deref(), Some("1"));
    assert_eq!(store.get("B").as_deref(), Some("2"));
}

#[test]
fn test_set_empty_value_is_activated() {
    let (_dir, env) = loaded(r#"{"EMPTY": ""}"#);
    let mut store = MemoryEnv::new();

    env.set(&mut store).unwrap();
    assert_eq!(store.get("EMPTY").as_deref(), Some(""));
}

#[test]
fn test_set_fails_fast_and_leaves_partial_activation() {
    let mut env = Environment::from_path(".env.dev").unwrap();
    env.add(EnvironmentVariable::new("A", "1"));
    env.add(EnvironmentVariable::new("BAD=KEY", "2"));
    env.add(EnvironmentVariable::new("C", "3"));
    let mut store = MemoryEnv::new();

    let err = env.set(&mut store).unwrap_err();

    match &err {
        EnvError::ActivationFailure {
            key,
            reason,
            activated,
        } => {
            assert_eq!(key, "BAD=KEY");
            assert_eq!(*reason, AssignmentError::KeyContainsEquals);
            assert_eq!(activated, &[MARKER_KEY, "A"]);
        }
        other => panic!("expected activation failure, got {other:?}"),
    }
    assert!(store.contains(MARKER_KEY), "marker stays active");
    assert!(store.contains("A"), "earlier variable stays active");
    assert!(!store.contains("C"), "later variable is never set");
}

#[test]
fn test_rollback_clears_partial_activation() {
    let mut env = Environment::from_path(".env.dev").unwrap();
    env.add(EnvironmentVariable::new("A", "1"));
    env.add(EnvironmentVariable::new("", "2"));
    let mut store = MemoryEnv::new();

    let err = env.set(&mut store).unwrap_err();
    let cleared = Environment::rollback(&mut store, err.activated_keys());

    assert_eq!(cleared, 2);
    assert!(store.is_empty());
}

#[test]
fn test_unset_clears_everything() {
    let (_dir, env) = loaded(r#"{"A": "1", "B": "2"}"#);
    let mut store = MemoryEnv::new();
    store.set("UNRELATED", "keep").unwrap();

    env.set(&mut store).unwrap();
    env.unset(&mut store).unwrap();

    assert_eq!(store.iter().collect::<Vec<_>>(), [("UNRELATED", "keep")]);
}

#[test]
fn test_unset_continues_past_failing_variable() {
    let mut env = Environment::from_path(".env.dev").unwrap();
    env.add(EnvironmentVariable::new("A", "1"));
    env.add(EnvironmentVariable::new("BAD\0KEY", "2"));
    env.add(EnvironmentVariable::new("C", "3"));
    let mut store = MemoryEnv::new();
    for key in [MARKER_KEY, "A", "C"] {
        store.set(key, "x").unwrap();
    }

    env.unset(&mut store).unwrap();

    assert!(store.is_empty(), "variables after the failure are cleared too");
}

#[test]
fn test_marker_collision_last_write_wins() {
    let mut env = Environment::from_path(".env.dev").unwrap();
    env.add(EnvironmentVariable::new(MARKER_KEY, "override"));
    let mut store = MemoryEnv::new();

    env.set(&mut store).unwrap();
    assert_eq!(store.get(MARKER_KEY).as_deref(), Some("override"));
}

// --- Stores ---

#[test]
fn test_memory_env_rejects_what_the_platform_rejects() {
    let mut store = MemoryEnv::new();
    let results = [
        store.set("", "v"),
        store.set("A=B", "v"),
        store.set("A\0", "v"),
        store.set("A", "v\0"),
        store.unset(""),
        store.set("OK", "v"),
    ];

    assert_eq!(
        results,
        [
            Err(AssignmentError::EmptyKey),
            Err(AssignmentError::KeyContainsEquals),
            Err(AssignmentError::ContainsNul),
            Err(AssignmentError::ContainsNul),
            Err(AssignmentError::EmptyKey),
            Ok(()),
        ]
    );
    assert_eq!(store.iter().collect::<Vec<_>>(), [("OK", "v")]);
}

#[test]
fn test_memory_env_through_mut_ref() {
    fn fill<S: EnvStore>(mut store: S) {
        store.set("A", "1").unwrap();
    }

    let mut store = MemoryEnv::new();
    fill(&mut store);
    assert_eq!(store.get("A").as_deref(), Some("1"));
}

#[test]
#[cfg(windows)]
fn test_memory_env_case_insensitive_on_windows() {
    let mut store = MemoryEnv::new();
    store.set("Path", "x").unwrap();
    assert_eq!(store.get("PATH").as_deref(), Some("x"));
}

#[test]
#[cfg(not(windows))]
fn test_memory_env_case_sensitive() {
    let mut store = MemoryEnv::new();
    store.set("Path", "x").unwrap();
    assert_eq!(store.get("PATH"), None);
}
