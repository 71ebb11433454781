#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{fixture, helptoc_cmd};
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn path_prints_breadcrumb() {
    helptoc_cmd()
        .args(["path", "Toolbox", "--file"])
        .arg(fixture())
        .assert()
        .success()
        .stdout("Getting started › Install IntelliJ IDEA › Toolbox App\n");
}

#[test]
fn path_of_top_level_entry_is_itself() {
    helptoc_cmd()
        .args(["path", "Editor", "--file"])
        .arg(fixture())
        .assert()
        .success()
        .stdout("Editor basics\n");
}

#[test]
fn path_json_lists_entries_root_first() {
    let output = helptoc_cmd()
        .args(["path", "Postfix", "--format", "json", "--file"])
        .arg(fixture())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let entries: Value = serde_json::from_slice(&output).unwrap();
    let ids: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["Editor", "Code_completion", "Postfix"]);
    assert_eq!(entries[2]["url"], "settings-postfix-completion.html");
}

#[test]
fn path_unknown_id_fails() {
    helptoc_cmd()
        .args(["path", "Nope", "--file"])
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry with id 'Nope'"));
}
