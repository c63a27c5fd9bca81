//! Configuration management
//!
//! All endpoints, limits and lookup tables live here. Config is stored at
//! `~/.config/toolbelt/config.toml`; a missing file means defaults, and
//! every section may be partial. Lookup tables (profession colours,
//! extension categories, stop words) are read from here once and turned into
//! immutable values by the module that uses them.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::paths;

/// Environment variable that overrides `weather.api_key`
pub const WEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level toolbelt configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Crypto price filter
    #[serde(default)]
    pub crypto: CryptoConfig,
    /// Hangman game
    #[serde(default)]
    pub hangman: HangmanConfig,
    /// Joke fetcher and rater
    #[serde(default)]
    pub jokes: JokesConfig,
    /// News fetcher
    #[serde(default)]
    pub news: NewsConfig,
    /// Weather lookup
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Word frequency counter
    #[serde(default)]
    pub words: WordsConfig,
    /// Spreadsheet export
    #[serde(default)]
    pub export: ExportConfig,
    /// File sorter
    #[serde(default)]
    pub sort: SortConfig,
    /// Task board
    #[serde(default)]
    pub tasks: TasksConfig,
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl HttpConfig {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Crypto price filter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Assets endpoint
    pub endpoint: String,
    /// Page size requested from the endpoint
    pub limit: u32,
    /// Delay between polling rounds, and before retrying a failed fetch
    pub poll_interval_secs: u64,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.coincap.io/v2/assets".to_string(),
            limit: 20,
            poll_interval_secs: 5,
        }
    }
}

/// Hangman settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HangmanConfig {
    /// Random word endpoint
    pub endpoint: String,
    /// How many words to request per game
    pub word_count: u32,
    /// Wrong guesses allowed before the game is lost, 1 to 6
    pub max_incorrect: u8,
    /// Words used when the endpoint is unavailable
    pub fallback_words: Vec<String>,
}

impl Default for HangmanConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://random-word-api.herokuapp.com/word".to_string(),
            word_count: 5,
            max_incorrect: 6,
            fallback_words: ["apple", "banana", "cherry", "orange", "grape"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Joke fetcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JokesConfig {
    /// Random joke endpoint
    pub endpoint: String,
    /// Number of jokes to fetch
    pub count: usize,
    /// Pause between fetches in seconds
    pub delay_secs: u64,
    /// Where rated jokes are written
    pub output: String,
}

impl Default for JokesConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://official-joke-api.appspot.com/random_joke".to_string(),
            count: 10,
            delay_secs: 1,
            output: "top_jokes.txt".to_string(),
        }
    }
}

/// News fetcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Top headlines endpoint
    pub endpoint: String,
    /// Article language
    pub language: String,
    /// Articles per request
    pub page_size: u32,
    /// Retries after a 500 response
    pub retries: u32,
    /// First retry delay in seconds, doubled on each retry
    pub base_delay_secs: u64,
    /// Where articles are written
    pub output: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://newsapi.org/v2/top-headlines".to_string(),
            language: "en".to_string(),
            page_size: 5,
            retries: 3,
            base_delay_secs: 5,
            output: "news_today.txt".to_string(),
        }
    }
}

/// Weather lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Current weather endpoint
    pub endpoint: String,
    /// `OpenWeatherMap` API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Unit system passed to the API
    pub units: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            api_key: None,
            units: "metric".to_string(),
        }
    }
}

/// Word frequency settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    /// Text file read when no path is given
    pub input: String,
    /// How many words to print
    pub top_n: usize,
    /// Words ignored when counting
    pub stop_words: Vec<String>,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            input: "newfile.txt".to_string(),
            top_n: 5,
            stop_words: [
                "он", "бою", "на", "всегда", "в", "для", "о", "по", "это", "или", "быть", "забыл",
                "добавить", "подсказку", "потому", "что", "опилки", "вместо", "мозгов", "не",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// A profession keyword and the row colour it selects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionColor {
    /// Lowercase substring looked up in the profession
    pub keyword: String,
    /// Colour name (`green`, `tomato`, ...) or `#RRGGBB`
    pub color: String,
}

/// Spreadsheet export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Whitespace-delimited people file
    pub input: String,
    /// Workbook to write
    pub output: String,
    /// Colour used when no keyword matches
    pub default_color: String,
    /// Keyword to colour table, checked in order
    pub palette: Vec<ProfessionColor>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input: "people.txt".to_string(),
            output: "people_output.xlsx".to_string(),
            default_color: "gray".to_string(),
            palette: [
                ("программист", "green"),
                ("певец", "yellow"),
                ("музыкант", "pink"),
                ("писатель", "red"),
                ("горняк", "brown"),
                ("стоматолог", "blue"),
                ("официантка", "white"),
                ("продавец", "tomato"),
            ]
            .into_iter()
            .map(|(keyword, color)| ProfessionColor {
                keyword: keyword.to_string(),
                color: color.to_string(),
            })
            .collect(),
        }
    }
}

/// A destination folder and the extensions routed to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Folder name
    pub name: String,
    /// Extensions with leading dot, e.g. `.mp4`
    pub extensions: Vec<String>,
}

/// File sorter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Catch-all folder for unlisted extensions
    pub others: String,
    /// Category table
    pub categories: Vec<CategoryConfig>,
}

impl Default for SortConfig {
    fn default() -> Self {
        let table: [(&str, &[&str]); 8] = [
            ("docs", &[".doc", ".docx", ".txt", ".rtf"]),
            ("pdf", &[".pdf"]),
            ("images", &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff"]),
            ("videos", &[".mp4", ".mkv", ".avi", ".mov", ".flv"]),
            ("audio", &[".mp3", ".wav", ".aac", ".flac"]),
            ("spreadsheets", &[".xls", ".xlsx", ".csv"]),
            ("presentations", &[".ppt", ".pptx"]),
            ("archives", &[".zip", ".tar", ".tar.gz", ".rar", ".7z"]),
        ];
        Self {
            others: "others".to_string(),
            categories: table
                .into_iter()
                .map(|(name, extensions)| CategoryConfig {
                    name: name.to_string(),
                    extensions: extensions.iter().map(|e| (*e).to_string()).collect(),
                })
                .collect(),
        }
    }
}

/// Task board settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Board file
    pub file: String,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            file: "task.txt".to_string(),
        }
    }
}

impl Config {
    /// Load the config.
    ///
    /// With an explicit path the file must exist and parse. Without one the
    /// default location is tried and a missing file yields defaults.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = paths::config_file();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    log::debug!("no config at {}, using defaults", default_path.display());
                    Self::default()
                }
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Overlay environment variables
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(WEATHER_API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.weather.api_key = Some(key.trim().to_string());
            }
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save config to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
