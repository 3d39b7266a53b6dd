//! Layered loading through `ortho_config`: defaults, file, environment, CLI.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use xjx_config::{Config, LogFormat, default_character_encoding, default_log_filter};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const LOADER_VARIABLES: [&str; 5] = [
    "XJX_CONFIG_PATH",
    "XJX_CHARACTER_ENCODING",
    "XJX_OUTPUT_ENTITIES",
    "XJX_LOG_FILTER",
    "XJX_LOG_FORMAT",
];

/// Serialises environment access and restores every loader variable on drop.
struct Environment {
    saved: Vec<(&'static str, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
    dir: TempDir,
}

impl Environment {
    fn new() -> Self {
        let guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let saved = LOADER_VARIABLES
            .iter()
            .map(|key| (*key, std::env::var_os(key)))
            .collect();
        for key in LOADER_VARIABLES {
            // Environment mutation is `unsafe` in edition 2024; the mutex keeps
            // loading tests from racing each other.
            unsafe { std::env::remove_var(key) };
        }
        Self {
            saved,
            _guard: guard,
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn set(&self, key: &str, value: impl AsRef<OsStr>) {
        assert!(
            LOADER_VARIABLES.contains(&key),
            "{key} would not be restored"
        );
        unsafe { std::env::set_var(key, value) };
    }

    fn write_file(&self, body: &str) -> PathBuf {
        let path = self.dir.path().join("xjx.toml");
        fs::write(&path, body).expect("write configuration file");
        path
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(previous) => unsafe { std::env::set_var(key, previous) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

#[fixture]
fn env() -> Environment {
    Environment::new()
}

fn args<const N: usize>(flags: [&str; N]) -> Vec<OsString> {
    std::iter::once("xjx-host")
        .chain(flags)
        .map(OsString::from)
        .collect()
}

#[rstest]
fn no_sources_yield_the_defaults(env: Environment) {
    let config = Config::load_from_iter(args([])).expect("load");
    assert_eq!(config, Config::default());
    assert_eq!(config.character_encoding(), default_character_encoding());
    assert_eq!(config.log_filter(), default_log_filter());
    drop(env);
}

#[rstest]
fn file_values_override_defaults(env: Environment) {
    let path = env.write_file("character_encoding = \"iso-8859-1\"\noutput_entities = true\n");
    let mut argv = args(["--config-path"]);
    argv.push(path.into_os_string());

    let config = Config::load_from_iter(argv).expect("load");
    assert_eq!(config.character_encoding(), "iso-8859-1");
    assert!(config.output_entities());
    assert_eq!(config.log_filter(), default_log_filter());
}

#[rstest]
fn environment_overrides_the_file(env: Environment) {
    let path = env.write_file("log_filter = \"xjx_response=trace\"\n");
    env.set("XJX_CONFIG_PATH", &path);
    env.set("XJX_LOG_FILTER", "xjx_response::queue=debug");

    let config = Config::load_from_iter(args([])).expect("load");
    assert_eq!(config.log_filter(), "xjx_response::queue=debug");
}

#[rstest]
fn command_line_overrides_the_environment(env: Environment) {
    env.set("XJX_LOG_FORMAT", "json");
    env.set("XJX_CHARACTER_ENCODING", "windows-1252");

    let config = Config::load_from_iter(args(["--log-format", "compact"])).expect("load");
    assert_eq!(config.log_format(), LogFormat::Compact);
    assert_eq!(config.character_encoding(), "windows-1252");
}

#[rstest]
fn unknown_log_format_fails_to_load(env: Environment) {
    let result = Config::load_from_iter(args(["--log-format", "xml"]));
    assert!(result.is_err(), "expected a load error, got {result:?}");
    drop(env);
}
