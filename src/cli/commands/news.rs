//! Headlines command

use std::path::PathBuf;

use toolbelt::config::Config;
use toolbelt::news::{NewsQuery, RetryPolicy, get_news, save_articles};
use toolbelt::output::{NewsResult, OutputMode, Render};

/// Fetch headlines, save them and print them
pub async fn news(
    api_key: &str,
    query: Option<String>,
    category: Option<String>,
    output: Option<PathBuf>,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let request = NewsQuery::new(api_key, query, category, &config.news)?;
    let client = super::http_client(config)?;
    let policy = RetryPolicy::from_config(&config.news);

    let articles = get_news(&client, &config.news.endpoint, &request, policy).await?;

    let saved_to = if articles.is_empty() {
        log::warn!("no articles returned, nothing saved");
        None
    } else {
        let output = output.unwrap_or_else(|| PathBuf::from(&config.news.output));
        save_articles(&output, &articles)?;
        Some(output)
    };

    NewsResult { saved_to, articles }.render(mode);
    Ok(())
}
