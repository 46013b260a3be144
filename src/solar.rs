use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use log::debug;

use crate::error::{DeckError, DeckResult};
use crate::types::{GeoLocation, SolarProgress, SolarTimes};

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const MINUTES_PER_DEGREE: f64 = 4.0;
/// Apparent altitude of the sun's centre at rise/set (refraction plus semi-diameter).
pub const HORIZON_ALTITUDE: f64 = -0.833;

pub fn equation_of_time(n: i32) -> f64 {
    let b = ((n - 1) as f64 * (360.0 / 365.0)).to_radians();
    229.18
        * (0.000075
            + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}

pub fn solar_declination(n: i32) -> f64 {
    EARTH_AXIAL_TILT * (360.0 * ((284 + n) as f64 / 365.0)).to_radians().sin()
}

/// Hour angle of sunrise in degrees, in [0, 180].
///
/// Polar night collapses to 0 (sunrise and sunset both at solar noon) and
/// polar day saturates at 180 (sunrise and sunset twelve hours either side).
pub fn sunrise_hour_angle(latitude: f64, declination: f64) -> f64 {
    let lat_rad = latitude.to_radians();
    let dec_rad = declination.to_radians();
    let cos_h = (HORIZON_ALTITUDE.to_radians().sin() - lat_rad.sin() * dec_rad.sin())
        / (lat_rad.cos() * dec_rad.cos());

    if cos_h >= 1.0 {
        0.0
    } else if cos_h <= -1.0 {
        180.0
    } else {
        cos_h.acos().to_degrees()
    }
}

/// Minutes after UTC midnight at which the sun crosses the local meridian.
pub fn solar_noon_utc_minutes(longitude: f64, day_of_year: i32) -> f64 {
    720.0 - MINUTES_PER_DEGREE * longitude - equation_of_time(day_of_year)
}

pub fn resolve_time_zone(location: &GeoLocation) -> DeckResult<Tz> {
    let GeoLocation { latitude, longitude, time_zone_id } = location;
    if !latitude.is_finite() || !(-90.0..=90.0).contains(latitude) {
        return Err(DeckError::LocationResolution(format!(
            "latitude {} out of range",
            latitude
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(longitude) {
        return Err(DeckError::LocationResolution(format!(
            "longitude {} out of range",
            longitude
        )));
    }
    time_zone_id.parse::<Tz>().map_err(|e| {
        DeckError::LocationResolution(format!("unknown time zone {:?}: {}", time_zone_id, e))
    })
}

/// First valid instant of `date` in `tz`; zones that skip midnight for DST
/// start the day at the end of the gap.
pub fn local_midnight(tz: &Tz, date: NaiveDate) -> DeckResult<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=180)
        .find_map(|m| {
            tz.from_local_datetime(&(midnight + TimeDelta::minutes(m)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            DeckError::LocationResolution(format!("no local midnight for {} in {}", date, tz))
        })
}

fn local_day_bounds(tz: &Tz, date: NaiveDate) -> DeckResult<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date
        .succ_opt()
        .ok_or_else(|| DeckError::LocationResolution(format!("date {} has no successor", date)))?;
    Ok((local_midnight(tz, date)?, local_midnight(tz, next)?))
}

/// Fraction of the local calendar day `date` elapsed at `instant`, clamped to [0, 1].
fn progress_within(tz: &Tz, date: NaiveDate, instant: DateTime<Utc>) -> DeckResult<f64> {
    let (start, end) = local_day_bounds(tz, date)?;
    let day_ms = (end - start).num_milliseconds() as f64;
    let elapsed_ms = (instant - start).num_milliseconds() as f64;
    Ok((elapsed_ms / day_ms).clamp(0.0, 1.0))
}

fn minutes_after(base: DateTime<Utc>, minutes: f64) -> DateTime<Utc> {
    base + TimeDelta::milliseconds((minutes * 60_000.0).round() as i64)
}

/// Sunrise and sunset for the local calendar day `date`.
///
/// The astronomy is evaluated for the UTC day containing local midday, so
/// zones whose offset runs far ahead of or behind their longitude (UTC+13
/// west of the date line) still get a solar noon inside the local day.
fn solar_times_in(location: &GeoLocation, tz: &Tz, date: NaiveDate) -> DeckResult<SolarTimes> {
    let (start, end) = local_day_bounds(tz, date)?;
    let anchor = (start + (end - start) / 2).date_naive();
    let n = anchor.ordinal() as i32;
    let decl = solar_declination(n);
    let half_day_minutes = sunrise_hour_angle(location.latitude, decl) * MINUTES_PER_DEGREE;
    let noon = solar_noon_utc_minutes(location.longitude, n);
    let utc_midnight = anchor.and_time(NaiveTime::MIN).and_utc();

    Ok(SolarTimes {
        sunrise: minutes_after(utc_midnight, noon - half_day_minutes),
        sunset: minutes_after(utc_midnight, noon + half_day_minutes),
        date_of_record: date,
    })
}

pub fn compute_solar_times(location: &GeoLocation, date: NaiveDate) -> DeckResult<SolarTimes> {
    let tz = resolve_time_zone(location)?;
    solar_times_in(location, &tz, date)
}

pub fn day_progress(now: DateTime<Utc>, location: &GeoLocation) -> DeckResult<f64> {
    let tz = resolve_time_zone(location)?;
    let date = now.with_timezone(&tz).date_naive();
    progress_within(&tz, date, now)
}

pub fn sunrise_progress(times: &SolarTimes, location: &GeoLocation) -> DeckResult<f64> {
    let tz = resolve_time_zone(location)?;
    progress_within(&tz, times.date_of_record, times.sunrise)
}

pub fn sunset_progress(times: &SolarTimes, location: &GeoLocation) -> DeckResult<f64> {
    let tz = resolve_time_zone(location)?;
    progress_within(&tz, times.date_of_record, times.sunset)
}

/// Sunrise/sunset and day-progress for one resolved location.
///
/// Solar times are cached per local calendar day; asking for the same date
/// again returns the cached value.
#[derive(Debug, Clone)]
pub struct SolarClock {
    location: GeoLocation,
    tz: Tz,
    cached: Option<SolarTimes>,
}

impl SolarClock {
    pub fn new(location: GeoLocation) -> DeckResult<Self> {
        let tz = resolve_time_zone(&location)?;
        Ok(Self { location, tz, cached: None })
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }

    pub fn solar_times(&mut self, date: NaiveDate) -> DeckResult<SolarTimes> {
        match self.cached {
            Some(times) if times.date_of_record == date => Ok(times),
            _ => {
                let times = solar_times_in(&self.location, &self.tz, date)?;
                debug!(
                    "solar times for {}: sunrise {} sunset {}",
                    date, times.sunrise, times.sunset
                );
                self.cached = Some(times);
                Ok(times)
            }
        }
    }

    pub fn solar_times_at(&mut self, now: DateTime<Utc>) -> DeckResult<SolarTimes> {
        let date = self.local_date(now);
        self.solar_times(date)
    }

    pub fn day_progress(&self, now: DateTime<Utc>) -> DeckResult<f64> {
        progress_within(&self.tz, self.local_date(now), now)
    }

    pub fn solar_progress(&self, times: &SolarTimes) -> DeckResult<SolarProgress> {
        Ok(SolarProgress {
            sunrise: progress_within(&self.tz, times.date_of_record, times.sunrise)?,
            sunset: progress_within(&self.tz, times.date_of_record, times.sunset)?,
        })
    }
}
