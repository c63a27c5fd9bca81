//! Centralized path definitions for toolbelt
//!
//! ## Layout
//!
//! ```text
//! ~/.config/toolbelt/
//! └── config.toml               # Endpoints, lookup tables, defaults
//! ```
//!
//! Output files (`news_today.txt`, `top_jokes.txt`, the task board, ...) are
//! plain relative paths taken from the config and resolved against the
//! current working directory.

use std::path::PathBuf;

/// Global config directory name
const CONFIG_DIR: &str = "toolbelt";

/// Global config filename
const CONFIG_FILE: &str = "config.toml";

/// Get the toolbelt config directory.
///
/// Uses the platform config dir (`~/.config` on Linux), falling back to
/// `~/.config` when it cannot be determined.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(CONFIG_DIR)
}

/// Get the default config file path.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}
