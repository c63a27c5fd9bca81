//! Crypto price filter command

use std::time::Duration;

use toolbelt::config::Config;
use toolbelt::console;
use toolbelt::crypto::{self, apply_filters, fetch_assets};
use toolbelt::http::HttpGet;
use toolbelt::output::{AssetsResult, OutputMode, Render};

/// One filtered fetch when a filter flag is given, else the polling loop
pub async fn crypto(
    name: Option<String>,
    above: Option<f64>,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let client = super::http_client(config)?;

    if name.is_some() || above.is_some() {
        let assets = fetch_assets(&client, &config.crypto).await?;
        let selected = apply_filters(&assets, name.as_deref(), above);
        AssetsResult {
            assets: selected.into_iter().cloned().collect(),
        }
        .render(mode);
        return Ok(());
    }

    poll(&client, config).await
}

async fn poll<C: HttpGet>(client: &C, config: &Config) -> anyhow::Result<()> {
    let interval = Duration::from_secs(config.crypto.poll_interval_secs);
    let mut console = console::stdio();

    loop {
        match fetch_assets(client, &config.crypto).await {
            Ok(assets) if assets.is_empty() => log::warn!("no data received, retrying"),
            Ok(assets) => {
                if !crypto::filter_round(&mut console, &assets)? {
                    return Ok(());
                }
            },
            Err(e) => log::error!("failed to fetch assets: {e}"),
        }

        if !pause(interval).await {
            console.say("\nOperation interrupted by the user.")?;
            return Ok(());
        }
    }
}

/// Sleep for `delay`; `false` if Ctrl-C came first
async fn pause(delay: Duration) -> bool {
    tokio::select! {
        () = tokio::time::sleep(delay) => true,
        _ = tokio::signal::ctrl_c() => false,
    }
}
