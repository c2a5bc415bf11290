//! Unit tests for layered configuration loading.

use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use rstest::rstest;
use tempfile::TempDir;

use crate::{
    CONFIG_PATH_ENV, Config, DEFAULT_LOG_FILTER, DEFAULT_STEP_ROOT, LOG_FILTER_ENV,
    LOG_FORMAT_ENV, LogFormat, STEP_ROOT_ENV,
};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const MANAGED_VARIABLES: [&str; 4] = [STEP_ROOT_ENV, LOG_FILTER_ENV, LOG_FORMAT_ENV, CONFIG_PATH_ENV];

/// Serialises access to the process environment and restores every
/// configuration variable on drop.
struct EnvOverride {
    previous: Vec<(&'static str, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvOverride {
    fn apply(pairs: &[(&'static str, &str)]) -> Self {
        let guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        let previous = MANAGED_VARIABLES
            .iter()
            .map(|key| (*key, std::env::var_os(key)))
            .collect();
        // Environment mutation is `unsafe` in edition 2024; the mutex keeps
        // tests in this crate from racing on it.
        for key in MANAGED_VARIABLES {
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in pairs {
            unsafe { std::env::set_var(key, value) };
        }
        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            match value {
                Some(value) => unsafe { std::env::set_var(key, value) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

fn load() -> Config {
    Config::load_for_program("entrypoint").expect("configuration loads")
}

#[test]
fn defaults_apply_when_nothing_is_configured() {
    let _env = EnvOverride::apply(&[]);

    let config = load();

    assert_eq!(config.step_root().as_str(), DEFAULT_STEP_ROOT);
    assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
    assert_eq!(config.log_format(), LogFormat::Json);
    assert_eq!(config, Config::default());
}

#[test]
fn environment_overrides_every_field() {
    let _env = EnvOverride::apply(&[
        (STEP_ROOT_ENV, "/var/run/steps"),
        (LOG_FILTER_ENV, "entrypoint_subcommands=debug"),
        (LOG_FORMAT_ENV, "compact"),
    ]);

    let config = load();

    assert_eq!(config.step_root().as_str(), "/var/run/steps");
    assert_eq!(config.log_filter(), "entrypoint_subcommands=debug");
    assert_eq!(config.log_format(), LogFormat::Compact);
}

#[test]
fn configuration_file_supplies_values() {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("entrypoint.toml");
    fs::write(&path, "step_root = \"/srv/steps\"\nlog_format = \"compact\"\n")
        .expect("write config file");
    let path = path.to_str().expect("utf-8 temp path");
    let _env = EnvOverride::apply(&[(CONFIG_PATH_ENV, path)]);

    let config = load();

    assert_eq!(config.step_root().as_str(), "/srv/steps");
    assert_eq!(config.log_format(), LogFormat::Compact);
    assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
}

#[test]
fn environment_takes_precedence_over_the_configuration_file() {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("entrypoint.toml");
    fs::write(&path, "step_root = \"/from/file\"\n").expect("write config file");
    let path = path.to_str().expect("utf-8 temp path");
    let _env = EnvOverride::apply(&[(CONFIG_PATH_ENV, path), (STEP_ROOT_ENV, "/from/env")]);

    assert_eq!(load().step_root().as_str(), "/from/env");
}

#[test]
fn unknown_log_format_is_rejected() {
    let _env = EnvOverride::apply(&[(LOG_FORMAT_ENV, "xml")]);

    let error = Config::load_for_program("entrypoint").expect_err("xml is not a log format");

    assert!(!error.to_string().is_empty());
}

#[test]
fn malformed_configuration_file_is_rejected() {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("entrypoint.toml");
    fs::write(&path, "step_root = [not toml").expect("write config file");
    let path = path.to_str().expect("utf-8 temp path");
    let _env = EnvOverride::apply(&[(CONFIG_PATH_ENV, path)]);

    Config::load_for_program("entrypoint").expect_err("malformed file must fail");
}

#[rstest]
#[case::lower("json", LogFormat::Json)]
#[case::upper("JSON", LogFormat::Json)]
#[case::mixed("Compact", LogFormat::Compact)]
fn log_format_parses_case_insensitively(#[case] raw: &str, #[case] expected: LogFormat) {
    assert_eq!(raw.parse::<LogFormat>().expect("parse log format"), expected);
}

#[test]
fn builders_replace_single_fields() {
    let config = Config::default()
        .with_step_root("/tmp/isolated")
        .with_log_filter("off")
        .with_log_format(LogFormat::Compact);

    assert_eq!(config.step_root().as_str(), "/tmp/isolated");
    assert_eq!(config.log_filter(), "off");
    assert_eq!(config.log_format(), LogFormat::Compact);
}
