use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    FetchError, WeatherPayload,
    model::PayloadLocation,
    provider::checked_body,
};

use super::WeatherSource;

pub const DEFAULT_WEATHERSTACK_URL: &str = "http://api.weatherstack.com";

#[derive(Debug, Clone)]
pub struct WeatherstackSource {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherstackSource {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn current_url(&self) -> String {
        format!("{}/current", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct WsCurrent {
    temperature: f64,
    observation_time: String,
    weather_descriptions: Vec<String>,
    is_day: String,
    pressure: f64,
    cloudcover: f64,
    humidity: f64,
    visibility: f64,
    uv_index: f64,
    wind_speed: f64,
}

#[derive(Debug, Deserialize)]
struct WsResponse {
    current: WsCurrent,
    location: PayloadLocation,
}

/// Weatherstack reports failures with a 200 status and this body.
#[derive(Debug, Deserialize)]
struct WsErrorResponse {
    success: bool,
    error: WsError,
}

#[derive(Debug, Deserialize)]
struct WsError {
    code: i64,
    #[serde(default)]
    info: String,
}

fn parse_body(body: &str) -> Result<WeatherPayload, FetchError> {
    if let Ok(failure) = serde_json::from_str::<WsErrorResponse>(body) {
        if !failure.success {
            return Err(FetchError::Api {
                code: failure.error.code,
                info: failure.error.info,
            });
        }
    }

    let parsed: WsResponse = serde_json::from_str(body)?;
    let current = parsed.current;

    WeatherPayload {
        temperature: current.temperature,
        observation_time: current.observation_time,
        weather_descriptions: current.weather_descriptions,
        is_day: current.is_day,
        pressure: current.pressure,
        cloudcover: current.cloudcover,
        humidity: current.humidity,
        visibility: current.visibility,
        uv_index: current.uv_index,
        wind_speed: current.wind_speed,
        location: parsed.location,
    }
    .validate()
}

#[async_trait]
impl WeatherSource for WeatherstackSource {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherPayload, FetchError> {
        tracing::debug!("Requesting weather for '{}' from weatherstack", city);

        let res = self
            .http
            .get(self.current_url())
            .query(&[("access_key", self.api_key.as_str()), ("query", city)])
            .send()
            .await?;
        let body = checked_body(res, city).await?;

        parse_body(&body)
    }
}
