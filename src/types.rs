use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone_id: String,
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self {
            latitude: 51.5074,
            longitude: -0.1278,
            time_zone_id: "Europe/London".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub date_of_record: NaiveDate,
}

/// Sunrise and sunset expressed in the same day-progress space as
/// [`crate::solar::SolarClock::day_progress`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarProgress {
    pub sunrise: f64,
    pub sunset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    ClearLike,
    RainLike,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteStop {
    pub progress: f64,
    pub color: Rgb,
}

pub const PALETTE_STOPS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct PaletteCurve {
    pub category: ConditionCategory,
    pub stops: [PaletteStop; PALETTE_STOPS],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_kelvin: f64,
    pub precipitation_probability: f64,
    pub condition_main: String,
    pub condition_icon: String,
}

/// A forecast sample paired with its rounded hours-ahead label.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSlot {
    pub hours_ahead: i64,
    pub sample: ForecastSample,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub condition_category: ConditionCategory,
    pub condition_main: String,
    pub condition_description: String,
    pub condition_icon: String,
    pub temperature_kelvin: f64,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainDrop {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileRequest {
    pub layer: String,
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}
