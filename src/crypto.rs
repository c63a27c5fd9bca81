//! Cryptocurrency price filter
//!
//! Fetches the asset list from a `CoinCap`-style endpoint and narrows it with
//! two independent predicates: a case-insensitive name match and a price
//! threshold. Records with missing or malformed fields never match a
//! predicate; they do not abort the pass.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::CryptoConfig;
use crate::console::Console;
use crate::http::{FetchError, HttpGet, ensure_success};

/// One asset record, all fields as sent by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Asset name, e.g. "Bitcoin"
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Ticker symbol
    #[serde(default, deserialize_with = "lenient_text")]
    pub symbol: Option<String>,
    /// Price in USD
    #[serde(default, deserialize_with = "lenient_text")]
    pub price_usd: Option<String>,
    /// Market capitalisation in USD
    #[serde(default, deserialize_with = "lenient_text")]
    pub market_cap_usd: Option<String>,
    /// Traded volume over 24h in USD
    #[serde(default, deserialize_with = "lenient_text", rename = "volumeUsd24Hr")]
    pub volume_usd_24h: Option<String>,
    /// Price change over 24h in percent
    #[serde(default, deserialize_with = "lenient_text", rename = "changePercent24Hr")]
    pub change_percent_24h: Option<String>,
}

impl Asset {
    /// Price parsed as a number, if present and well-formed
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.price_usd
            .as_deref()
            .and_then(|p| p.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite())
    }
}

/// Strings as sent, numbers as their text, anything else dropped
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Deserialize)]
struct AssetsEnvelope {
    data: Vec<Asset>,
}

/// Fetch the asset list, preserving API order
pub async fn fetch_assets<C: HttpGet>(
    client: &C,
    config: &CryptoConfig,
) -> Result<Vec<Asset>, FetchError> {
    let query = [("limit".to_string(), config.limit.to_string())];
    let response = client.get(&config.endpoint, &query).await?;
    let response = ensure_success(response, &config.endpoint)?;
    let envelope: AssetsEnvelope = response.json()?;
    log::debug!("fetched {} assets", envelope.data.len());
    Ok(envelope.data)
}

/// Assets whose name contains `needle`, ignoring case.
///
/// Records without a name (or with an empty one) never match, so an empty
/// needle returns exactly the named records.
#[must_use]
pub fn filter_name<'a>(assets: &'a [Asset], needle: &str) -> Vec<&'a Asset> {
    let needle = needle.to_lowercase();
    assets
        .iter()
        .filter(|asset| {
            asset
                .name
                .as_deref()
                .filter(|name| !name.is_empty())
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Assets priced strictly above `threshold`
#[must_use]
pub fn filter_value(assets: &[Asset], threshold: f64) -> Vec<&Asset> {
    assets
        .iter()
        .filter(|asset| asset.price().is_some_and(|price| price > threshold))
        .collect()
}

/// Apply the optional name and price predicates together
#[must_use]
pub fn apply_filters<'a>(
    assets: &'a [Asset],
    name: Option<&str>,
    above: Option<f64>,
) -> Vec<&'a Asset> {
    let by_name: Vec<&Asset> = match name {
        Some(needle) => filter_name(assets, needle),
        None => assets.iter().collect(),
    };
    match above {
        Some(threshold) => {
            by_name.into_iter().filter(|a| a.price().is_some_and(|p| p > threshold)).collect()
        },
        None => by_name,
    }
}

/// Menu choice in the interactive loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChoice {
    /// Filter by name
    Name,
    /// Filter by price threshold
    Price,
    /// Show everything
    All,
}

impl std::str::FromStr for FilterChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Name),
            "2" => Ok(Self::Price),
            "3" => Ok(Self::All),
            other => Err(format!("Invalid choice: {other}. Enter 1, 2, or 3")),
        }
    }
}

/// Parse a user-entered price threshold
pub fn parse_threshold(input: &str) -> Result<f64, String> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| format!("Invalid value entered: {}. Please enter a numeric value.", input.trim()))
}

/// Render assets as human-readable blocks
#[must_use]
pub fn render_assets(assets: &[&Asset]) -> String {
    fn field(value: Option<&String>) -> &str {
        value.map_or("N/A", String::as_str)
    }

    let mut out = String::new();
    for asset in assets {
        let _ = writeln!(out, "Name: {}", field(asset.name.as_ref()));
        let _ = writeln!(out, "Symbol: {}", field(asset.symbol.as_ref()));
        let _ = writeln!(out, "Current Price: ${}", field(asset.price_usd.as_ref()));
        let _ = writeln!(out, "Market Cap: ${}", field(asset.market_cap_usd.as_ref()));
        let _ = writeln!(out, "Total Volume: ${}", field(asset.volume_usd_24h.as_ref()));
        let _ = writeln!(out, "Price Change (24h): {}%", field(asset.change_percent_24h.as_ref()));
        let _ = writeln!(out, "------------------------------------");
    }
    out
}

/// One interactive round over `assets`: ask for a filter, apply it, print.
///
/// Returns `Ok(false)` when input ends.
pub fn filter_round<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    assets: &[Asset],
) -> io::Result<bool> {
    console.say(
        "Select filter options:\n1. Filter by name\n2. Filter by value (price > XXX)\n3. No filter, show all",
    )?;
    let Some(choice) = console.prompt("Enter your choice (1, 2, or 3): ")? else {
        return Ok(false);
    };
    let choice = match choice.parse::<FilterChoice>() {
        Ok(choice) => choice,
        Err(e) => {
            console.say(e)?;
            return Ok(true);
        },
    };

    let selected = match choice {
        FilterChoice::All => assets.iter().collect(),
        FilterChoice::Name => {
            let prompt = "Enter the name of the cryptocurrency to search for (e.g., Bitcoin): ";
            let Some(name) = console.prompt(prompt)? else {
                return Ok(false);
            };
            let name = name.trim();
            if name.is_empty() {
                console.say("No name entered. Showing all data.")?;
                assets.iter().collect()
            } else {
                let found = filter_name(assets, name);
                if found.is_empty() {
                    console.say(format!("No cryptocurrencies found with name containing '{name}'."))?;
                }
                found
            }
        },
        FilterChoice::Price => {
            let Some(raw) = console.prompt("Enter the minimum price (USD): ")? else {
                return Ok(false);
            };
            match parse_threshold(&raw) {
                Ok(threshold) => {
                    let found = filter_value(assets, threshold);
                    if found.is_empty() {
                        console.say(format!(
                            "No cryptocurrencies found with price greater than {threshold}."
                        ))?;
                    }
                    found
                },
                Err(e) => {
                    console.say(e)?;
                    return Ok(true);
                },
            }
        },
    };

    if !selected.is_empty() {
        console.say(render_assets(&selected).trim_end())?;
    }
    Ok(true)
}
