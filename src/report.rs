//! Report generation: resolve the query to coordinates, fetch the hourly
//! series, and format the one-hour-ahead temperature.

use chrono::Utc;

use crate::cities;
use crate::weather::{next_hour_temperature, truncate_to_hour, WeatherClient, WeatherError};

/// What the user gave us to locate the forecast; the two forms are
/// mutually exclusive by construction.
#[derive(Clone, Debug, PartialEq)]
pub enum WeatherQuery {
    Coordinates { latitude: f64, longitude: f64 },
    City(String),
}

/// Why a report could not be produced. Both variants share one user-facing
/// message; the distinction only matters for logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportError {
    /// The provider was unreachable, errored, or replied with garbage.
    Unavailable,
    /// The series held no sample after the current hour.
    NoFutureSample,
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Unavailable => write!(f, "Weather provider unavailable"),
            ReportError::NoFutureSample => {
                write!(f, "No forecast sample after the current hour")
            }
        }
    }
}

impl std::error::Error for ReportError {}

impl From<WeatherError> for ReportError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::NoFutureSample => ReportError::NoFutureSample,
            WeatherError::Request(_) | WeatherError::Status(_) | WeatherError::Malformed(_) => {
                ReportError::Unavailable
            }
        }
    }
}

impl ReportError {
    /// Every report failure reads the same to the user.
    pub fn user_message(&self) -> &'static str {
        "Problems with your weather request, try later."
    }
}

/// Builds the next-hour temperature report for a query.
///
/// City names resolve through the fixed table (unknown names fall back to
/// the default city, never fail). One request, no retry.
pub async fn build_report(
    client: &WeatherClient,
    query: &WeatherQuery,
) -> Result<String, ReportError> {
    let (latitude, longitude) = match query {
        WeatherQuery::Coordinates {
            latitude,
            longitude,
        } => (*latitude, *longitude),
        WeatherQuery::City(name) => cities::resolve(name),
    };

    let series = client.fetch_hourly(latitude, longitude).await?;
    let now = truncate_to_hour(Utc::now().naive_utc());
    let temperature = next_hour_temperature(&series, now)?;

    Ok(format!("Your weather report for next hour: {temperature}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_weather_failure_maps_to_a_report_error() {
        assert_eq!(
            ReportError::from(WeatherError::Request("timed out".to_string())),
            ReportError::Unavailable
        );
        assert_eq!(
            ReportError::from(WeatherError::Status(503)),
            ReportError::Unavailable
        );
        assert_eq!(
            ReportError::from(WeatherError::Malformed("truncated".to_string())),
            ReportError::Unavailable
        );
        assert_eq!(
            ReportError::from(WeatherError::NoFutureSample),
            ReportError::NoFutureSample
        );
    }

    #[test]
    fn test_both_failures_share_the_user_message() {
        assert_eq!(
            ReportError::Unavailable.user_message(),
            "Problems with your weather request, try later."
        );
        assert_eq!(
            ReportError::NoFutureSample.user_message(),
            ReportError::Unavailable.user_message()
        );
    }
}
