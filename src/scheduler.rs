use chrono::{DateTime, TimeZone};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::RainDrop;

/// Horizontal spread of the drop field relative to the screen width, so
/// diagonal drift still covers the right edge.
pub const RAIN_SPREAD: f32 = 1.6;
pub const DRIFT_X: f32 = -1.0;
pub const FALL_Y: f32 = 1.0;
/// Bounding-box edge of one slanted drop; a drop re-enters only once it is
/// entirely past the left edge.
pub const DROP_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawPhase {
    Stale,
    Fresh,
}

/// Wall-clock minute of `now` in its own zone, e.g. `2026-03-21 06:42`.
pub fn minute_stamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y-%m-%d %H:%M").to_string()
}

/// Gates full redraws to at most one per distinct minute stamp.
#[derive(Debug, Clone, Default)]
pub struct RedrawScheduler {
    last_redraw_minute: Option<String>,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, stamp: &str) -> RedrawPhase {
        match &self.last_redraw_minute {
            Some(last) if last == stamp => RedrawPhase::Fresh,
            _ => RedrawPhase::Stale,
        }
    }

    pub fn is_redraw_due(&self, stamp: &str) -> bool {
        self.phase(stamp) == RedrawPhase::Stale
    }

    pub fn mark_redraw_complete(&mut self, stamp: &str) {
        debug!("redraw complete for minute {}", stamp);
        self.last_redraw_minute = Some(stamp.to_string());
    }

    pub fn last_redraw_minute(&self) -> Option<&str> {
        self.last_redraw_minute.as_deref()
    }
}

pub fn is_rain_condition(main: &str) -> bool {
    main.to_lowercase().contains("rain")
}

/// Animated drop positions, advanced once per tick independently of redraws.
#[derive(Debug, Clone)]
pub struct RainField {
    width: f32,
    height: f32,
    drop_count: usize,
    drops: Vec<RainDrop>,
    raining: bool,
    rng: StdRng,
}

impl RainField {
    pub fn new(width: u32, height: u32, drop_count: usize) -> Self {
        Self::with_rng(width, height, drop_count, StdRng::from_os_rng())
    }

    pub fn seeded(width: u32, height: u32, drop_count: usize, seed: u64) -> Self {
        Self::with_rng(width, height, drop_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: u32, height: u32, drop_count: usize, rng: StdRng) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
            drop_count,
            drops: Vec::new(),
            raining: false,
            rng,
        }
    }

    pub fn is_raining(&self) -> bool {
        self.raining
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    /// Upper bound (exclusive) of spawned x positions.
    pub fn spread_width(&self) -> f32 {
        self.width * RAIN_SPREAD
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn spawn(&mut self) -> RainDrop {
        RainDrop {
            x: self.rng.random_range(0.0..self.width * RAIN_SPREAD),
            y: self.rng.random_range(-self.height..self.height),
        }
    }

    /// No-op when the state already matches.
    pub fn set_raining(&mut self, raining: bool) {
        if raining == self.raining {
            return;
        }
        self.raining = raining;
        if raining {
            self.drops = (0..self.drop_count).map(|_| self.spawn()).collect();
            info!("rain on: {} drops", self.drops.len());
        } else {
            self.drops.clear();
            info!("rain off");
        }
    }

    pub fn update_from_condition(&mut self, main: &str) {
        self.set_raining(is_rain_condition(main));
    }

    /// Moves every drop one frame; drops fully past the left edge or reaching
    /// the bottom edge re-enter.
    pub fn advance(&mut self) {
        for i in 0..self.drops.len() {
            let d = &mut self.drops[i];
            d.x += DRIFT_X;
            d.y += FALL_Y;
            if d.x + DROP_SIZE <= 0.0 || d.y >= self.height {
                self.drops[i] = self.spawn();
            }
        }
    }
}
