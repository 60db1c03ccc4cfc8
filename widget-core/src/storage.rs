//! The remembered city: one string under the `"city"` key.

use anyhow::{Context, Result};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::config::project_dirs;

pub const CITY_KEY: &str = "city";

pub trait CityStore: Send + std::fmt::Debug {
    fn load_city(&self) -> Result<Option<String>>;

    fn save_city(&mut self, city: &str) -> Result<()>;
}

/// Key-value JSON file, e.g. `{"city": "Paris"}`.
#[derive(Debug, Clone)]
pub struct FileCityStore {
    path: PathBuf,
}

impl FileCityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `storage.json` in the platform data directory.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(project_dirs()?.data_dir().join("storage.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read storage file: {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage file: {}", self.path.display()))
    }
}

impl CityStore for FileCityStore {
    fn load_city(&self) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(CITY_KEY).filter(|c| !c.trim().is_empty()))
    }

    fn save_city(&mut self, city: &str) -> Result<()> {
        // Keep whatever else lives in the file.
        let mut entries = self.read_all().unwrap_or_else(|e| {
            tracing::warn!("Overwriting unreadable storage file: {:#}", e);
            BTreeMap::new()
        });
        entries.insert(CITY_KEY.to_string(), city.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create storage directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&entries).context("Failed to serialize storage")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write storage file: {}", self.path.display()))?;

        tracing::info!("Remembered city '{}' in {:?}", city, self.path);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCityStore {
    city: Option<String>,
}

impl MemoryCityStore {
    pub fn with_city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
        }
    }
}

impl CityStore for MemoryCityStore {
    fn load_city(&self) -> Result<Option<String>> {
        Ok(self.city.clone())
    }

    fn save_city(&mut self, city: &str) -> Result<()> {
        self.city = Some(city.to_string());
        Ok(())
    }
}
