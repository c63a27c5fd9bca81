//! Current weather for a city
//!
//! One value is shown per lookup: temperature, humidity or wind speed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::WeatherConfig;
use crate::http::{FetchError, HttpGet, ensure_success};

/// Errors raised by the weather lookup
#[derive(Debug, Error)]
pub enum WeatherError {
    /// City name was blank
    #[error("city name cannot be empty")]
    EmptyCity,
    /// No API key from flag, config or environment
    #[error("no API key: pass --api-key, set weather.api_key or OPENWEATHER_API_KEY")]
    MissingApiKey,
    /// Response lacked the `main` or `wind` object
    #[error("weather or wind data is missing")]
    MissingData,
    /// The request failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Which value to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WeatherOption {
    /// Temperature in Celsius
    Temperature,
    /// Relative humidity in percent
    Humidity,
    /// Wind speed in m/s
    #[value(name = "wind_speed")]
    WindSpeed,
}

#[derive(Debug, Default, Deserialize)]
struct MainBlock {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: Option<MainBlock>,
    wind: Option<WindBlock>,
}

/// The values of one lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WeatherSample {
    /// Degrees Celsius
    pub temperature: Option<f64>,
    /// Percent
    pub humidity: Option<f64>,
    /// Metres per second
    pub wind_speed: Option<f64>,
}

fn or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

impl WeatherSample {
    /// The line shown for `option`
    #[must_use]
    pub fn describe(&self, option: WeatherOption) -> String {
        match option {
            WeatherOption::Temperature => format!("Temperature: {} °C", or_na(self.temperature)),
            WeatherOption::Humidity => format!("Humidity: {} %", or_na(self.humidity)),
            WeatherOption::WindSpeed => format!("Wind Speed: {} m/s", or_na(self.wind_speed)),
        }
    }

    /// The raw value for `option`
    #[must_use]
    pub const fn value(&self, option: WeatherOption) -> Option<f64> {
        match option {
            WeatherOption::Temperature => self.temperature,
            WeatherOption::Humidity => self.humidity,
            WeatherOption::WindSpeed => self.wind_speed,
        }
    }
}

/// Pick the API key: flag first, then config (which already holds any
/// environment override)
pub fn resolve_api_key(flag: Option<&str>, config: &WeatherConfig) -> Result<String, WeatherError> {
    flag.or(config.api_key.as_deref())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(String::from)
        .ok_or(WeatherError::MissingApiKey)
}

/// Fetch current weather for `city`
pub async fn fetch_weather<C: HttpGet>(
    client: &C,
    config: &WeatherConfig,
    api_key: &str,
    city: &str,
) -> Result<WeatherSample, WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::EmptyCity);
    }

    let query = [
        ("q".to_string(), city.to_string()),
        ("appid".to_string(), api_key.to_string()),
        ("units".to_string(), config.units.clone()),
    ];
    log::debug!("requesting weather for {city}");
    let response = client.get(&config.endpoint, &query).await?;
    let response = ensure_success(response, &config.endpoint)?;
    let decoded: WeatherResponse = response.json()?;

    match (decoded.main, decoded.wind) {
        (Some(main), Some(wind)) => Ok(WeatherSample {
            temperature: main.temp,
            humidity: main.humidity,
            wind_speed: wind.speed,
        }),
        _ => Err(WeatherError::MissingData),
    }
}
