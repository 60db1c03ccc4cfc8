use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::provider::{
    SourceId, proxy::DEFAULT_PROXY_URL, weatherstack::DEFAULT_WEATHERSTACK_URL,
};

/// City used when nothing is remembered and nothing is configured.
pub const FALLBACK_CITY: &str = "Kiev";

/// Configuration for a single weather source.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override of the source's endpoint, mostly useful for self-hosted proxies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default source id, "proxy" or "weatherstack".
    pub default_source: Option<String>,

    /// City shown when no city has been remembered yet.
    pub default_city: Option<String>,

    /// Example TOML:
    /// [sources.weatherstack]
    /// api_key = "..."
    #[serde(default)]
    pub sources: HashMap<String, SourceConfig>,
}

impl Config {
    /// Return the default source as a strongly-typed SourceId, proxy when unset.
    pub fn default_source_id(&self) -> Result<SourceId> {
        match self.default_source.as_deref() {
            Some(s) => SourceId::try_from(s),
            None => Ok(SourceId::Proxy),
        }
    }

    pub fn default_city(&self) -> &str {
        self.default_city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(FALLBACK_CITY)
    }

    pub fn source_config(&self, id: SourceId) -> Option<&SourceConfig> {
        self.sources.get(id.as_str())
    }

    /// Store default source as string.
    pub fn set_default_source(&mut self, id: SourceId) {
        self.default_source = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Set/replace a source API key and make it the default if none is set.
    pub fn upsert_source_api_key(&mut self, id: SourceId, api_key: String) {
        self.sources.entry(id.as_str().to_string()).or_default().api_key = Some(api_key);

        if self.default_source.is_none() {
            self.default_source = Some(id.to_string());
        }
    }

    pub fn set_source_base_url(&mut self, id: SourceId, base_url: String) {
        self.sources.entry(id.as_str().to_string()).or_default().base_url = Some(base_url);
    }

    /// Returns API key for a source, if present.
    pub fn source_api_key(&self, id: SourceId) -> Option<&str> {
        self.source_config(id).and_then(|cfg| cfg.api_key.as_deref())
    }

    /// Configured endpoint, or the source's public one.
    pub fn source_base_url(&self, id: SourceId) -> String {
        self.source_config(id)
            .and_then(|cfg| cfg.base_url.clone())
            .unwrap_or_else(|| match id {
                SourceId::Proxy => DEFAULT_PROXY_URL.to_string(),
                SourceId::Weatherstack => DEFAULT_WEATHERSTACK_URL.to_string(),
            })
    }
}

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-widget", "weather-widget")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SourceId;

    #[test]
    fn default_source_is_proxy_when_not_set() {
        let cfg = Config::default();
        assert_eq!(cfg.default_source_id().unwrap(), SourceId::Proxy);
    }

    #[test]
    fn default_source_id_rejects_unknown_names() {
        let cfg = Config {
            default_source: Some("nope".into()),
            ..Config::default()
        };
        assert!(cfg.default_source_id().unwrap_err().to_string().contains("Unknown source"));
    }

    #[test]
    fn default_city_falls_back_when_blank() {
        let mut cfg = Config::default();
        assert_eq!(cfg.default_city(), FALLBACK_CITY);

        cfg.default_city = Some("  ".into());
        assert_eq!(cfg.default_city(), FALLBACK_CITY);

        cfg.default_city = Some("London".into());
        assert_eq!(cfg.default_city(), "London");
    }

    #[test]
    fn set_api_key_and_default_for_source() {
        let mut cfg = Config::default();

        cfg.upsert_source_api_key(SourceId::Weatherstack, "WS_KEY".into());

        let default = cfg.default_source_id().expect("default source must exist");
        assert_eq!(default, SourceId::Weatherstack);

        assert_eq!(cfg.source_api_key(SourceId::Weatherstack), Some("WS_KEY"));
        assert!(cfg.source_config(SourceId::Weatherstack).is_some());
    }

    #[test]
    fn upsert_does_not_override_existing_default() {
        let mut cfg = Config::default();
        cfg.set_default_source(SourceId::Proxy);

        cfg.upsert_source_api_key(SourceId::Weatherstack, "WS_KEY".into());

        assert_eq!(cfg.default_source_id().unwrap(), SourceId::Proxy);
        assert!(cfg.source_config(SourceId::Weatherstack).is_some());
    }

    #[test]
    fn base_url_override_wins_over_public_endpoint() {
        let mut cfg = Config::default();
        assert_eq!(cfg.source_base_url(SourceId::Proxy), DEFAULT_PROXY_URL);

        cfg.set_source_base_url(SourceId::Proxy, "http://localhost:9000".into());
        assert_eq!(cfg.source_base_url(SourceId::Proxy), "http://localhost:9000");
        assert_eq!(cfg.source_base_url(SourceId::Weatherstack), DEFAULT_WEATHERSTACK_URL);
    }

    #[test]
    fn save_and_load_roundtrip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.upsert_source_api_key(SourceId::Weatherstack, "WS_KEY".into());
        cfg.default_city = Some("Paris".into());
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_source_id().unwrap(), SourceId::Weatherstack);
        assert_eq!(loaded.default_city(), "Paris");
        assert_eq!(loaded.source_api_key(SourceId::Weatherstack), Some("WS_KEY"));
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.default_source.is_none());
    }
}
