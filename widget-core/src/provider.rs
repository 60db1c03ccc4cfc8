use crate::{
    Config, FetchError, WeatherPayload,
    error::truncate_body,
    provider::{proxy::ProxySource, weatherstack::WeatherstackSource},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod proxy;
pub mod weatherstack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Proxy,
    Weatherstack,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::Proxy => "proxy",
            SourceId::Weatherstack => "weatherstack",
        }
    }

    pub const fn all() -> &'static [SourceId] {
        &[SourceId::Proxy, SourceId::Weatherstack]
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, SourceId::Weatherstack)
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "proxy" => Ok(SourceId::Proxy),
            "weatherstack" => Ok(SourceId::Weatherstack),
            _ => Err(anyhow::anyhow!(
                "Unknown source '{value}'. Supported sources: proxy, weatherstack."
            )),
        }
    }
}

/// Where the widget gets its weather from.
///
/// Implementations must not panic on bad responses: every failure is a
/// [`FetchError`] and the caller keeps its previous state.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherPayload, FetchError>;
}

/// Read a response body, mapping non-2xx statuses onto [`FetchError`].
pub(crate) async fn checked_body(
    res: reqwest::Response,
    city: &str,
) -> Result<String, FetchError> {
    let status = res.status();
    let body = res.text().await?;

    if status == reqwest::StatusCode::BAD_REQUEST {
        return Err(FetchError::BadRequest {
            city: city.to_string(),
            body: truncate_body(&body),
        });
    }

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

/// Construct a source from config and explicit SourceId.
pub fn source_from_config(id: SourceId, config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let base_url = config.source_base_url(id);

    let boxed: Box<dyn WeatherSource> = match id {
        SourceId::Proxy => Box::new(ProxySource::new(base_url)),
        SourceId::Weatherstack => {
            let api_key = config.source_api_key(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for source '{id}'.\n\
                     Hint: run `weather-widget configure {id}` and enter your access key."
                )
            })?;
            Box::new(WeatherstackSource::new(api_key.to_owned(), base_url))
        }
    };

    Ok(boxed)
}

/// Construct the default source from config, using `default_source` field.
pub fn default_source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let id = config.default_source_id()?;
    source_from_config(id, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn source_id_as_str_roundtrip() {
        for id in SourceId::all() {
            let s = id.as_str();
            let parsed = SourceId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn source_id_parse_is_case_insensitive() {
        assert_eq!(SourceId::try_from("WeatherStack").unwrap(), SourceId::Weatherstack);
    }

    #[test]
    fn unknown_source_error() {
        let err = SourceId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown source"));
    }

    #[test]
    fn weatherstack_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = source_from_config(SourceId::Weatherstack, &cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured for source"));
    }

    #[test]
    fn proxy_needs_no_credentials() {
        let cfg = Config::default();
        assert!(source_from_config(SourceId::Proxy, &cfg).is_ok());
        assert!(!SourceId::Proxy.requires_api_key());
    }

    #[test]
    fn default_source_from_config_falls_back_to_proxy() {
        let cfg = Config::default();
        assert!(default_source_from_config(&cfg).is_ok());
    }

    #[test]
    fn default_source_from_config_works_when_set_and_configured() {
        let mut cfg = Config::default();
        cfg.upsert_source_api_key(SourceId::Weatherstack, "KEY".to_string());

        let source = default_source_from_config(&cfg);
        assert!(source.is_ok());
    }
}
