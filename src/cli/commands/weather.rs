//! Weather command

use toolbelt::config::Config;
use toolbelt::output::{OutputMode, Render, WeatherResult};
use toolbelt::weather::{WeatherError, WeatherOption, fetch_weather, resolve_api_key};

/// Look up one weather value for `city`
pub async fn weather(
    city: &str,
    option: WeatherOption,
    api_key: Option<&str>,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<()> {
    if city.trim().is_empty() {
        return Err(WeatherError::EmptyCity.into());
    }
    let key = resolve_api_key(api_key, &config.weather)?;
    let client = super::http_client(config)?;

    let sample = fetch_weather(&client, &config.weather, &key, city).await?;
    WeatherResult::new(city, option, sample).render(mode);
    Ok(())
}
