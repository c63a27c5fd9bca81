//! Tests for the weather lookup

use crate::common::MockHttp;
use test_case::test_case;
use toolbelt::config::WeatherConfig;
use toolbelt::http::FetchError;
use toolbelt::weather::{
    WeatherError, WeatherOption, WeatherSample, fetch_weather, resolve_api_key,
};

const BODY: &str = r#"{"main":{"temp":20,"humidity":80},"wind":{"speed":5.5},"name":"Riga"}"#;

#[test_case(WeatherOption::Temperature, "Temperature: 20 °C" ; "temperature")]
#[test_case(WeatherOption::Humidity, "Humidity: 80 %" ; "humidity")]
#[test_case(WeatherOption::WindSpeed, "Wind Speed: 5.5 m/s" ; "wind speed")]
fn test_describe(option: WeatherOption, expected: &str) {
    let sample = WeatherSample {
        temperature: Some(20.0),
        humidity: Some(80.0),
        wind_speed: Some(5.5),
    };
    assert_eq!(sample.describe(option), expected);
}

#[test]
fn test_describe_missing_value() {
    let sample = WeatherSample::default();
    assert_eq!(sample.describe(WeatherOption::Humidity), "Humidity: N/A %");
}

#[test]
fn test_resolve_api_key_order() {
    let config = WeatherConfig {
        api_key: Some("from-config".to_string()),
        ..WeatherConfig::default()
    };
    assert_eq!(resolve_api_key(Some("flag"), &config).unwrap(), "flag");
    assert_eq!(resolve_api_key(None, &config).unwrap(), "from-config");
    assert!(matches!(
        resolve_api_key(Some("  "), &WeatherConfig::default()),
        Err(WeatherError::MissingApiKey)
    ));
}

#[tokio::test]
async fn test_fetch_weather_sends_params() {
    let http = MockHttp::new().respond(200, BODY);

    let sample = fetch_weather(&http, &WeatherConfig::default(), "key", " Riga ").await.unwrap();

    assert_eq!(sample.temperature, Some(20.0));
    assert_eq!(sample.wind_speed, Some(5.5));
    let request = &http.requests()[0];
    assert_eq!(request.param("q"), Some("Riga"));
    assert_eq!(request.param("appid"), Some("key"));
    assert_eq!(request.param("units"), Some("metric"));
}

#[tokio::test]
async fn test_fetch_weather_empty_city() {
    let http = MockHttp::new();
    let err = fetch_weather(&http, &WeatherConfig::default(), "key", "   ").await.unwrap_err();
    assert!(matches!(err, WeatherError::EmptyCity));
    assert_eq!(http.calls(), 0);
}

#[tokio::test]
async fn test_fetch_weather_missing_blocks() {
    let http = MockHttp::new().respond(200, r#"{"main":{"temp":1}}"#);
    let err = fetch_weather(&http, &WeatherConfig::default(), "key", "Oslo").await.unwrap_err();
    assert!(matches!(err, WeatherError::MissingData));
}

#[tokio::test]
async fn test_fetch_weather_unknown_city() {
    let http = MockHttp::new().respond(404, r#"{"cod":"404","message":"city not found"}"#);
    let err = fetch_weather(&http, &WeatherConfig::default(), "key", "Atlantis").await.unwrap_err();
    match err {
        WeatherError::Fetch(FetchError::Status { status, message, .. }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "city not found");
        },
        other => panic!("unexpected error: {other:?}"),
    }
}
