//! Behavioural coverage for configuration loading and defaults.

use std::cell::RefCell;
use std::str::FromStr;

use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Map, Value};

use xjx_config::{
    Config, DEFAULT_CHARACTER_ENCODING, LogFormat, default_log_filter, default_log_format,
};

struct Harness {
    document: RefCell<Map<String, Value>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            document: RefCell::new(Map::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
        }
    }

    fn set(&self, key: &str, value: &str) {
        self.document
            .borrow_mut()
            .insert(key.to_owned(), Value::String(value.trim_matches('"').to_owned()));
    }

    fn load(&self) {
        let document = Value::Object(self.document.borrow().clone());
        match serde_json::from_value::<Config>(document) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn config(&self) -> Config {
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("an empty configuration document")]
fn given_empty_document(harness: &Harness) {
    harness.document.borrow_mut().clear();
}

#[given("a configuration document setting the character encoding to {encoding}")]
fn given_encoding(harness: &Harness, encoding: String) {
    harness.set("character_encoding", &encoding);
}

#[given("the configuration document sets the log format to {format}")]
fn given_log_format(harness: &Harness, format: String) {
    harness.set("log_format", &format);
}

#[given("a configuration document with the log format {format}")]
fn given_bad_log_format(harness: &Harness, format: String) {
    harness.set("log_format", &format);
}

#[when("the configuration is loaded")]
fn when_loaded(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.config();
    assert_eq!(config.character_encoding(), DEFAULT_CHARACTER_ENCODING);
    assert!(!config.output_entities());
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
}

#[then("the character encoding is {encoding}")]
fn then_encoding(harness: &Harness, encoding: String) {
    assert_eq!(
        harness.config().character_encoding(),
        encoding.trim_matches('"')
    );
}

#[then("the log format is {format}")]
fn then_log_format(harness: &Harness, format: String) {
    let expected = match LogFormat::from_str(format.trim_matches('"')) {
        Ok(value) => value,
        Err(error) => panic!("invalid expected log format '{format}': {error}"),
    };
    assert_eq!(harness.config().log_format(), expected);
}

#[then("loading the configuration fails")]
fn then_load_fails(harness: &Harness) {
    assert!(
        harness.error.borrow().is_some(),
        "expected configuration loading to fail"
    );
}

#[scenario(
    path = "tests/features/configuration_defaults.feature",
    name = "Missing fields fall back to the built-in defaults"
)]
fn defaults_scenario(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_defaults.feature",
    name = "Explicit fields override the defaults"
)]
fn overrides_scenario(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_defaults.feature",
    name = "Unknown log formats are rejected"
)]
fn rejection_scenario(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[rstest]
#[case::json("json", LogFormat::Json)]
#[case::compact("compact", LogFormat::Compact)]
#[case::mixed_case("Compact", LogFormat::Compact)]
fn log_format_parses_case_insensitively(#[case] input: &str, #[case] expected: LogFormat) {
    let parsed = LogFormat::from_str(input).expect("parse log format");
    assert_eq!(parsed, expected);
}

#[test]
fn builder_methods_replace_fields() {
    let config = Config::default()
        .with_character_encoding("iso-8859-1")
        .with_output_entities(true)
        .with_log_filter("xjx_response=trace")
        .with_log_format(LogFormat::Compact);
    assert_eq!(config.character_encoding(), "iso-8859-1");
    assert!(config.output_entities());
    assert_eq!(config.log_filter(), "xjx_response=trace");
    assert_eq!(config.log_format(), LogFormat::Compact);
}

#[test]
fn config_round_trips_through_json() {
    let config = Config::default().with_output_entities(true);
    let json = serde_json::to_string(&config).expect("serialise");
    let back: Config = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(back, config);
}
