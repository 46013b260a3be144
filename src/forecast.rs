use chrono::{DateTime, Utc};

use crate::error::{DeckError, DeckResult};
use crate::types::{ForecastSample, ForecastSlot};

pub const DEFAULT_WINDOW: usize = 4;
pub const KELVIN_OFFSET: f64 = 273.15;

/// Whole hours from `now` to `timestamp`, rounded half away from zero.
pub fn hours_ahead(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (timestamp - now).num_milliseconds() as f64 / 1000.0;
    (seconds / 3600.0).round() as i64
}

/// Smallest index `i` such that `samples[i + 1]` is at least one rounded hour ahead of `now`.
///
/// The scan is bounded by the list; a list that is empty or entirely in the
/// near past yields [`DeckError::EmptyForecast`].
pub fn next_hour_index(samples: &[ForecastSample], now: DateTime<Utc>) -> DeckResult<usize> {
    samples
        .windows(2)
        .position(|pair| hours_ahead(pair[1].timestamp, now) >= 1)
        .ok_or(DeckError::EmptyForecast)
}

/// `count` consecutive samples starting after `start_index`, each labelled with hours ahead.
pub fn select_window(
    samples: &[ForecastSample],
    start_index: usize,
    count: usize,
    now: DateTime<Utc>,
) -> DeckResult<Vec<ForecastSlot>> {
    let first = start_index + 1;
    let last = first + count;
    if count == 0 || last > samples.len() {
        return Err(DeckError::EmptyForecast);
    }

    Ok(samples[first..last]
        .iter()
        .map(|sample| ForecastSlot {
            hours_ahead: hours_ahead(sample.timestamp, now),
            sample: sample.clone(),
        })
        .collect())
}

/// The display window for `now`: [`next_hour_index`] followed by [`select_window`].
pub fn upcoming(
    samples: &[ForecastSample],
    count: usize,
    now: DateTime<Utc>,
) -> DeckResult<Vec<ForecastSlot>> {
    let start = next_hour_index(samples, now)?;
    select_window(samples, start, count, now)
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

impl ForecastSample {
    pub fn temperature_celsius(&self) -> f64 {
        kelvin_to_celsius(self.temperature_kelvin)
    }

    pub fn precipitation_percent(&self) -> u8 {
        (self.precipitation_probability.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    pub fn icon_id(&self) -> &str {
        &self.condition_icon
    }
}

impl ForecastSlot {
    pub fn label(&self) -> String {
        format!("{}h", self.hours_ahead)
    }
}
