//! Open-Meteo client and next-hour sample selection.
//!
//! The provider returns an hourly temperature series as two parallel arrays
//! (`time`, `temperature_2m`); timestamps are `%Y-%m-%dT%H:%M` strings in
//! UTC. The report wants the first sample strictly after the current hour.

use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDateTime, Timelike};
use serde::Deserialize;

/// Forecast endpoint queried with `latitude`, `longitude` and
/// `hourly=temperature_2m`.
pub const OPEN_METEO_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

/// Timestamp layout used by the provider's hourly series.
pub const SERIES_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Weather request failure modes.
#[derive(Debug, Clone)]
pub enum WeatherError {
    /// Transport-level failure (connect, timeout, ...).
    Request(String),
    /// Non-success HTTP status from the provider.
    Status(u16),
    /// Response body that does not match the expected shape.
    Malformed(String),
    /// The series holds no sample after the requested instant.
    NoFutureSample,
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::Request(msg) => write!(f, "Request error: {msg}"),
            WeatherError::Status(code) => write!(f, "Provider returned status {code}"),
            WeatherError::Malformed(msg) => write!(f, "Malformed response: {msg}"),
            WeatherError::NoFutureSample => write!(f, "No forecast sample after the current hour"),
        }
    }
}

impl std::error::Error for WeatherError {}

/// The provider's hourly series: parallel arrays of equal length.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
}

/// Top-level provider response; fields other than `hourly` are ignored.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub hourly: HourlySeries,
}

/// HTTP client for the forecast endpoint.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    endpoint: String,
}

impl WeatherClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint: OPEN_METEO_ENDPOINT.to_string(),
        })
    }

    /// One GET for the hourly temperature series at the given coordinates.
    /// No retry; any non-success status is a hard failure for this request.
    pub async fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<HourlySeries, WeatherError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("latitude", latitude), ("longitude", longitude)])
            .query(&[("hourly", "temperature_2m")])
            .send()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Malformed(e.to_string()))?;

        let series = forecast.hourly;
        if series.time.len() != series.temperature_2m.len() {
            return Err(WeatherError::Malformed(format!(
                "parallel arrays differ: {} timestamps, {} temperatures",
                series.time.len(),
                series.temperature_2m.len()
            )));
        }
        Ok(series)
    }
}

/// Zeroes the sub-hour components of an instant ("truncated-now").
pub fn truncate_to_hour(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}

/// Returns the temperature paired with the first timestamp strictly greater
/// than `after`. The series is expected time-ascending and parallel; a
/// length mismatch or unparseable timestamp is a malformed series.
pub fn next_hour_temperature(
    series: &HourlySeries,
    after: NaiveDateTime,
) -> Result<f64, WeatherError> {
    if series.time.len() != series.temperature_2m.len() {
        return Err(WeatherError::Malformed(format!(
            "parallel arrays differ: {} timestamps, {} temperatures",
            series.time.len(),
            series.temperature_2m.len()
        )));
    }

    for (stamp, temperature) in series.time.iter().zip(&series.temperature_2m) {
        let parsed = NaiveDateTime::parse_from_str(stamp, SERIES_TIME_FORMAT)
            .map_err(|e| WeatherError::Malformed(format!("bad timestamp {stamp:?}: {e}")))?;
        if parsed > after {
            return Ok(*temperature);
        }
    }
    Err(WeatherError::NoFutureSample)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(stamp: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(stamp, SERIES_TIME_FORMAT).unwrap()
    }

    fn series() -> HourlySeries {
        HourlySeries {
            time: vec![
                "2024-01-01T10:00".to_string(),
                "2024-01-01T11:00".to_string(),
                "2024-01-01T12:00".to_string(),
            ],
            temperature_2m: vec![1.0, 2.0, 3.0],
        }
    }

    #[test]
    fn test_first_strictly_greater_sample_wins() {
        let temperature = next_hour_temperature(&series(), instant("2024-01-01T10:00")).unwrap();
        assert_eq!(temperature, 2.0);
    }

    #[test]
    fn test_exhausted_series_has_no_future_sample() {
        let result = next_hour_temperature(&series(), instant("2024-01-01T12:00"));
        assert!(matches!(result, Err(WeatherError::NoFutureSample)));
    }

    #[test]
    fn test_length_mismatch_is_malformed() {
        let mut broken = series();
        broken.temperature_2m.pop();
        let result = next_hour_temperature(&broken, instant("2024-01-01T09:00"));
        assert!(matches!(result, Err(WeatherError::Malformed(_))));
    }

    #[test]
    fn test_bad_timestamp_is_malformed() {
        let mut broken = series();
        broken.time[0] = "not-a-time".to_string();
        let result = next_hour_temperature(&broken, instant("2024-01-01T09:00"));
        assert!(matches!(result, Err(WeatherError::Malformed(_))));
    }

    #[test]
    fn test_truncate_zeroes_minutes_and_seconds() {
        let now = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 41, 23)
            .unwrap();
        assert_eq!(truncate_to_hour(now), instant("2024-01-01T10:00"));
    }

    #[test]
    fn test_provider_json_deserializes() {
        let body = r#"{
            "latitude": 55.625,
            "longitude": 37.375,
            "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
            "hourly": {
                "time": ["2024-01-01T10:00", "2024-01-01T11:00"],
                "temperature_2m": [-3.1, -2.6]
            }
        }"#;
        let forecast: ForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(forecast.hourly.time.len(), 2);
        assert_eq!(forecast.hourly.temperature_2m[1], -2.6);
    }
}
