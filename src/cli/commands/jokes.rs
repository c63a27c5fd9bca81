//! Joke fetch and rate command

use std::path::PathBuf;

use toolbelt::config::Config;
use toolbelt::jokes::{MAX_RATING, RateError, collect_jokes, rate_jokes, save_rated, sort_by_rating};
use toolbelt::output::{JokesResult, OutputMode, Render};

/// Fetch, rate and save jokes
pub async fn jokes(
    count: Option<usize>,
    output: Option<PathBuf>,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let mut settings = config.jokes.clone();
    if let Some(count) = count {
        settings.count = count;
    }
    if settings.count > usize::from(MAX_RATING) {
        return Err(RateError::TooMany(settings.count).into());
    }
    let output = output.unwrap_or_else(|| PathBuf::from(&settings.output));

    let client = super::http_client(config)?;
    let texts = collect_jokes(&client, &settings).await;
    if texts.is_empty() {
        anyhow::bail!("no jokes fetched");
    }

    let mut rated = rate_jokes(texts, &mut rand::thread_rng())?;
    sort_by_rating(&mut rated);
    save_rated(&output, &rated)?;

    JokesResult {
        output,
        jokes: rated,
    }
    .render(mode);
    Ok(())
}
