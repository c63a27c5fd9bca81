//! Word frequency command

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use toolbelt::config::Config;
use toolbelt::output::{OutputMode, Render, WordsResult};
use toolbelt::words::{StopWords, top_words};

/// Print the most frequent words of a file
pub fn words(
    path: Option<PathBuf>,
    top: Option<usize>,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(&config.words.input));
    let text =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let top = top.unwrap_or(config.words.top_n);
    let stop_words = StopWords::new(&config.words.stop_words);

    WordsResult {
        top,
        words: top_words(&text, &stop_words, top),
    }
    .render(mode);
    Ok(())
}
