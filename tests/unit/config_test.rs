//! Tests for configuration loading

use std::fs;

use serial_test::serial;
use tempfile::TempDir;
use toolbelt::config::{Config, WEATHER_API_KEY_ENV};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.crypto.limit, 20);
    assert_eq!(config.crypto.poll_interval_secs, 5);
    assert_eq!(config.hangman.max_incorrect, 6);
    assert_eq!(config.hangman.fallback_words.len(), 5);
    assert_eq!(config.jokes.count, 10);
    assert_eq!(config.news.retries, 3);
    assert_eq!(config.news.page_size, 5);
    assert_eq!(config.words.top_n, 5);
    assert_eq!(config.export.default_color, "gray");
    assert_eq!(config.sort.categories.len(), 8);
    assert_eq!(config.tasks.file, "task.txt");
    assert!(config.weather.api_key.is_none());
}

#[test]
#[serial(env)]
fn test_partial_file_keeps_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[news]\nretries = 1\n\n[words]\ntop_n = 10\n").unwrap();

    let config = Config::load(Some(&path)).unwrap();

    assert_eq!(config.news.retries, 1);
    assert_eq!(config.news.page_size, 5);
    assert_eq!(config.words.top_n, 10);
    assert_eq!(config.crypto.limit, 20);
}

#[test]
#[serial(env)]
fn test_explicit_missing_file_is_error() {
    let temp = TempDir::new().unwrap();
    assert!(Config::load(Some(&temp.path().join("missing.toml"))).is_err());
}

#[test]
#[serial(env)]
fn test_invalid_toml_is_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[news\nretries = ").unwrap();
    let err = Config::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn test_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/config.toml");
    let mut config = Config::default();
    config.jokes.delay_secs = 0;
    config.sort.others = "misc".to_string();

    config.save(&path).unwrap();
    let reloaded = Config::from_file(&path).unwrap();

    assert_eq!(reloaded.jokes.delay_secs, 0);
    assert_eq!(reloaded.sort.others, "misc");
    assert_eq!(reloaded.export.palette, config.export.palette);
    assert_eq!(reloaded.words.stop_words, config.words.stop_words);
}

#[test]
#[serial(env)]
fn test_env_overrides_weather_key() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[weather]\napi_key = \"from-file\"\n").unwrap();

    // SAFETY: serialised with every other test touching the environment
    unsafe { std::env::set_var(WEATHER_API_KEY_ENV, "from-env") };
    let config = Config::load(Some(&path));
    unsafe { std::env::remove_var(WEATHER_API_KEY_ENV) };

    assert_eq!(config.unwrap().weather.api_key.as_deref(), Some("from-env"));
}

#[test]
#[serial(env)]
fn test_blank_env_is_ignored() {
    let mut config = Config::default();
    // SAFETY: serialised with every other test touching the environment
    unsafe { std::env::set_var(WEATHER_API_KEY_ENV, "   ") };
    config.apply_env();
    unsafe { std::env::remove_var(WEATHER_API_KEY_ENV) };
    assert!(config.weather.api_key.is_none());
}
