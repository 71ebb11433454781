#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

fn config_dir() -> &'static Path {
    static CONFIG_DIR: OnceLock<TempDir> = OnceLock::new();
    CONFIG_DIR
        .get_or_init(|| tempfile::tempdir().expect("failed to create config dir for tests"))
        .path()
}

/// Create a configured `helptoc` command suitable for integration tests.
///
/// The configuration points at a scratch file so tests never read or write the
/// user's real settings.
pub fn helptoc_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("helptoc"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("HELPTOC_CONFIG", config_dir().join("config.toml"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// The sample dataset shipped with the tests.
#[allow(dead_code)]
pub fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("help_toc.json")
}

/// Contents of the sample dataset.
#[allow(dead_code)]
pub fn fixture_json() -> String {
    std::fs::read_to_string(fixture()).expect("fixture should be readable")
}
