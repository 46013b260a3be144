use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{DeckError, DeckResult};
use crate::forecast::DEFAULT_WINDOW;
use crate::solar::resolve_time_zone;
use crate::types::GeoLocation;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub location: GeoLocation,
    pub screen_width: u32,
    pub screen_height: u32,
    pub tick_hz: u32,
    pub forecast_slots: usize,
    pub rain_drop_count: usize,
    pub provider_timeout_secs: u64,
    pub map_layer: String,
    pub map_zoom: u8,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            location: GeoLocation::default(),
            screen_width: 480,
            screen_height: 320,
            tick_hz: 10,
            forecast_slots: DEFAULT_WINDOW,
            rain_drop_count: 60,
            provider_timeout_secs: 10,
            map_layer: "precipitation_new".to_string(),
            map_zoom: 8,
        }
    }
}

impl DeckConfig {
    /// Parses TOML; absent keys take their default values.
    pub fn from_toml_str(content: &str) -> DeckResult<Self> {
        let config: DeckConfig = toml::from_str(content)
            .map_err(|e| DeckError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> DeckResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            DeckError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> DeckResult<()> {
        if self.tick_hz == 0 {
            return Err(DeckError::Config("tick_hz must be positive".into()));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(DeckError::Config(format!(
                "screen size {}x{} is empty",
                self.screen_width, self.screen_height
            )));
        }
        if self.forecast_slots == 0 {
            return Err(DeckError::Config("forecast_slots must be positive".into()));
        }
        resolve_time_zone(&self.location)?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz.max(1)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}
