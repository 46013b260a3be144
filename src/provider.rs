//! Boundary between the dashboard core and the weather/map services.
//!
//! The HTTP transport lives outside this crate. Implementors of
//! [`WeatherProvider`] hand the core typed snapshots; the response structs
//! here cover the OpenWeatherMap `weather` and `forecast` payloads so a
//! transport only has to deliver the body text.

use std::f64::consts::PI;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{DeckError, DeckResult};
use crate::types::{ConditionCategory, ForecastSample, GeoLocation, TileRequest, WeatherSnapshot};

pub trait WeatherProvider {
    /// Current conditions. Must give up after `timeout` with [`DeckError::ProviderTimeout`].
    fn current(&mut self, location: &GeoLocation, timeout: Duration) -> DeckResult<WeatherSnapshot>;

    /// Future samples in ascending timestamp order.
    fn forecast(
        &mut self,
        location: &GeoLocation,
        timeout: Duration,
    ) -> DeckResult<Vec<ForecastSample>>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmCondition {
    #[serde(default)]
    pub id: i32,
    pub main: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmMain {
    pub temp: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwmWind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmCurrent {
    pub weather: Vec<OwmCondition>,
    pub main: OwmMain,
    #[serde(default)]
    pub wind: OwmWind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmForecastEntry {
    pub dt: i64,
    pub main: OwmMain,
    pub weather: Vec<OwmCondition>,
    #[serde(default)]
    pub pop: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmForecast {
    pub list: Vec<OwmForecastEntry>,
}

fn primary(conditions: &[OwmCondition]) -> DeckResult<&OwmCondition> {
    conditions
        .first()
        .ok_or_else(|| DeckError::ProviderUnavailable("response carries no weather condition".into()))
}

impl TryFrom<OwmCurrent> for WeatherSnapshot {
    type Error = DeckError;

    fn try_from(value: OwmCurrent) -> Result<Self, Self::Error> {
        let condition = primary(&value.weather)?;
        Ok(WeatherSnapshot {
            condition_category: ConditionCategory::from_description(&condition.description),
            condition_main: condition.main.clone(),
            condition_description: condition.description.clone(),
            condition_icon: condition.icon.clone(),
            temperature_kelvin: value.main.temp,
            wind_speed_mps: value.wind.speed,
            wind_direction_deg: value.wind.deg,
        })
    }
}

impl TryFrom<OwmForecastEntry> for ForecastSample {
    type Error = DeckError;

    fn try_from(value: OwmForecastEntry) -> Result<Self, Self::Error> {
        let condition = primary(&value.weather)?;
        let timestamp = DateTime::<Utc>::from_timestamp(value.dt, 0).ok_or_else(|| {
            DeckError::ProviderUnavailable(format!("forecast timestamp {} out of range", value.dt))
        })?;
        Ok(ForecastSample {
            timestamp,
            temperature_kelvin: value.main.temp,
            precipitation_probability: value.pop.clamp(0.0, 1.0),
            condition_main: condition.main.clone(),
            condition_icon: condition.icon.clone(),
        })
    }
}

pub fn parse_current(body: &str) -> DeckResult<WeatherSnapshot> {
    let raw: OwmCurrent = serde_json::from_str(body)?;
    raw.try_into()
}

/// Parses a forecast body into samples sorted by ascending timestamp.
pub fn parse_forecast(body: &str) -> DeckResult<Vec<ForecastSample>> {
    let raw: OwmForecast = serde_json::from_str(body)?;
    let mut samples = raw
        .list
        .into_iter()
        .map(ForecastSample::try_from)
        .collect::<DeckResult<Vec<_>>>()?;
    samples.sort_by_key(|s| s.timestamp);
    Ok(samples)
}

impl WeatherSnapshot {
    pub fn icon_id(&self) -> &str {
        &self.condition_icon
    }

    pub fn compass_point(&self) -> &'static str {
        compass_point(self.wind_direction_deg)
    }
}

pub fn compass_point(degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = (degrees.rem_euclid(360.0) / 45.0).round() as usize % 8;
    POINTS[index]
}

/// Web-Mercator latitude limit.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

impl TileRequest {
    /// The slippy-map tile containing `location` at `zoom`.
    pub fn for_location(location: &GeoLocation, layer: &str, zoom: u8) -> TileRequest {
        let n = 2f64.powi(zoom as i32);
        let max_index = (n - 1.0).max(0.0);
        let lat_rad = location
            .latitude
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
            .to_radians();
        let x = ((location.longitude + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();

        TileRequest {
            layer: layer.to_string(),
            x: x.clamp(0.0, max_index) as u32,
            y: y.clamp(0.0, max_index) as u32,
            zoom,
        }
    }

    /// Tiles in the square of `radius` around this one, row by row, wrapping
    /// horizontally and skipping rows past the poles.
    pub fn neighbourhood(&self, radius: u32) -> Vec<TileRequest> {
        let n = 1i64 << self.zoom.min(30);
        let r = radius as i64;
        let mut tiles = Vec::new();
        for dy in -r..=r {
            let y = self.y as i64 + dy;
            if y < 0 || y >= n {
                continue;
            }
            for dx in -r..=r {
                let x = (self.x as i64 + dx).rem_euclid(n);
                tiles.push(TileRequest {
                    layer: self.layer.clone(),
                    x: x as u32,
                    y: y as u32,
                    zoom: self.zoom,
                });
            }
        }
        tiles
    }
}
