use async_trait::async_trait;
use reqwest::Client;

use crate::{FetchError, WeatherPayload, provider::checked_body};

use super::WeatherSource;

pub const DEFAULT_PROXY_URL: &str = "https://weather-app-proxy.onrender.com";

/// Credential-less proxy that answers with a flat payload.
#[derive(Debug, Clone)]
pub struct ProxySource {
    base_url: String,
    http: Client,
}

impl ProxySource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherSource for ProxySource {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherPayload, FetchError> {
        tracing::debug!("Requesting weather for '{}' from proxy {}", city, self.base_url);

        let res = self.http.get(&self.base_url).query(&[("query", city)]).send().await?;
        let body = checked_body(res, city).await?;

        let payload: WeatherPayload = serde_json::from_str(&body)?;
        payload.validate()
    }
}
