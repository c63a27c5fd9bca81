//! Joke fetcher and rater

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JokesConfig;
use crate::http::{FetchError, HttpGet, ensure_success};

/// Highest rating handed out; ratings are unique, so also the most jokes
/// that can be rated at once
pub const MAX_RATING: u8 = 10;

/// Errors raised while rating or saving jokes
#[derive(Debug, Error)]
pub enum RateError {
    /// Nothing to rate or save
    #[error("the joke list is empty")]
    Empty,
    /// More jokes than distinct ratings
    #[error("cannot give {0} jokes distinct ratings from 1 to 10")]
    TooMany(usize),
    /// Writing the output failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A joke as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Joke {
    /// Setup line
    pub setup: String,
    /// Punchline
    pub punchline: String,
}

impl Joke {
    /// Setup and punchline on one line
    #[must_use]
    pub fn text(&self) -> String {
        format!("{} {}", self.setup.trim(), self.punchline.trim()).trim().to_string()
    }
}

/// A joke with its rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatedJoke {
    /// Joke text
    pub joke: String,
    /// Rating, 1 to 10
    pub rating: u8,
}

/// Fetch one joke
pub async fn fetch_joke<C: HttpGet>(client: &C, url: &str) -> Result<Joke, FetchError> {
    let response = client.get(url, &[]).await?;
    let response = ensure_success(response, url)?;
    response.json()
}

/// Fetch `config.count` jokes one after another, pausing between them.
/// Failed fetches are logged and skipped.
pub async fn collect_jokes<C: HttpGet>(client: &C, config: &JokesConfig) -> Vec<String> {
    let delay = Duration::from_secs(config.delay_secs);
    let mut jokes = Vec::with_capacity(config.count);

    for i in 0..config.count {
        match fetch_joke(client, &config.endpoint).await {
            Ok(joke) => {
                let text = joke.text();
                if text.is_empty() {
                    log::warn!("joke {} was empty, skipping", i + 1);
                } else {
                    jokes.push(text);
                }
            },
            Err(e) => log::warn!("failed to retrieve joke {}: {e}", i + 1),
        }
        if i + 1 < config.count && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    jokes
}

/// Give each joke a distinct random rating from 1 to 10
pub fn rate_jokes<R: Rng>(jokes: Vec<String>, rng: &mut R) -> Result<Vec<RatedJoke>, RateError> {
    if jokes.is_empty() {
        return Err(RateError::Empty);
    }
    if jokes.len() > usize::from(MAX_RATING) {
        return Err(RateError::TooMany(jokes.len()));
    }

    let ratings = rand::seq::index::sample(rng, usize::from(MAX_RATING), jokes.len());
    Ok(jokes
        .into_iter()
        .zip(ratings.iter())
        .map(|(joke, index)| RatedJoke {
            joke,
            rating: u8::try_from(index + 1).unwrap_or(MAX_RATING),
        })
        .collect())
}

/// Sort by rating, best first
pub fn sort_by_rating(rated: &mut [RatedJoke]) {
    rated.sort_by(|a, b| b.rating.cmp(&a.rating));
}

/// Render `Joke:`/`Rating:` blocks, best first
#[must_use]
pub fn render_rated(rated: &[RatedJoke]) -> String {
    let mut sorted = rated.to_vec();
    sort_by_rating(&mut sorted);

    let mut out = String::new();
    for joke in &sorted {
        let _ = write!(out, "Joke: {}\nRating: {}\n", joke.joke, joke.rating);
    }
    out
}

/// Write rated jokes to `path`, best first
pub fn save_rated(path: &Path, rated: &[RatedJoke]) -> Result<(), RateError> {
    if rated.is_empty() {
        return Err(RateError::Empty);
    }
    fs::write(path, render_rated(rated))?;
    log::info!("saved {} rated jokes to {}", rated.len(), path.display());
    Ok(())
}
