use std::thread;
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::config::DeckConfig;
use crate::error::DeckResult;
use crate::forecast;
use crate::palette::{build_curve, color_at};
use crate::provider::WeatherProvider;
use crate::scheduler::{minute_stamp, RainField, RedrawScheduler};
use crate::solar::SolarClock;
use crate::types::{
    ForecastSlot, RainDrop, Rgb, SolarProgress, SolarTimes, TileRequest, WeatherSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckEvent {
    Exit,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Exit,
    Continue { redrawn: bool },
}

/// Static content of one redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub rendered_at: DateTime<Utc>,
    pub snapshot: WeatherSnapshot,
    pub solar_times: SolarTimes,
    pub solar_progress: SolarProgress,
    pub day_progress: f64,
    pub background: Rgb,
    pub forecast: Vec<ForecastSlot>,
    pub map_tile: TileRequest,
}

pub trait Renderer {
    fn draw_frame(&mut self, frame: &Frame);

    fn draw_rain(&mut self, drops: &[RainDrop]);
}

pub trait EventSource {
    fn drain(&mut self) -> Vec<DeckEvent>;
}

pub struct Dashboard<P> {
    config: DeckConfig,
    solar: SolarClock,
    scheduler: RedrawScheduler,
    rain: RainField,
    provider: P,
    map_tile: TileRequest,
    frame: Option<Frame>,
}

impl<P: WeatherProvider> Dashboard<P> {
    pub fn new(config: DeckConfig, provider: P) -> DeckResult<Self> {
        config.validate()?;
        let solar = SolarClock::new(config.location.clone())?;
        let rain = RainField::new(config.screen_width, config.screen_height, config.rain_drop_count);
        let map_tile = TileRequest::for_location(&config.location, &config.map_layer, config.map_zoom);
        info!(
            "dashboard at ({:.4}, {:.4}) {}",
            config.location.latitude, config.location.longitude, config.location.time_zone_id
        );
        Ok(Self {
            config,
            solar,
            scheduler: RedrawScheduler::new(),
            rain,
            provider,
            map_tile,
            frame: None,
        })
    }

    /// Replaces the rain field, e.g. with a seeded one.
    pub fn with_rain_field(mut self, rain: RainField) -> Self {
        self.rain = rain;
        self
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Minute stamp of `now` on the display's local clock.
    pub fn minute_stamp(&self, now: DateTime<Utc>) -> String {
        minute_stamp(&now.with_timezone(&self.solar.time_zone()))
    }

    pub fn is_redraw_due(&self, now: DateTime<Utc>) -> bool {
        self.scheduler.is_redraw_due(&self.minute_stamp(now))
    }

    pub fn mark_redraw_complete(&mut self, now: DateTime<Utc>) {
        let stamp = self.minute_stamp(now);
        self.scheduler.mark_redraw_complete(&stamp);
    }

    pub fn current_palette_color(&self) -> Option<Rgb> {
        self.frame.as_ref().map(|f| f.background)
    }

    pub fn current_forecast_window(&self) -> &[ForecastSlot] {
        self.frame
            .as_ref()
            .map(|f| f.forecast.as_slice())
            .unwrap_or_default()
    }

    pub fn is_raining(&self) -> bool {
        self.rain.is_raining()
    }

    pub fn drops(&self) -> &[RainDrop] {
        self.rain.drops()
    }

    /// Fetches and recomputes the static frame. On error the previous frame is
    /// kept; the rain toggle follows the current conditions as soon as they arrive.
    pub fn redraw(&mut self, now: DateTime<Utc>) -> DeckResult<&Frame> {
        let timeout = self.config.provider_timeout();
        let location = self.config.location.clone();
        let snapshot = self.provider.current(&location, timeout)?;
        self.rain.update_from_condition(&snapshot.condition_main);

        let samples = self.provider.forecast(&location, timeout)?;
        let window = forecast::upcoming(&samples, self.config.forecast_slots, now)?;

        let solar_times = self.solar.solar_times_at(now)?;
        let solar_progress = self.solar.solar_progress(&solar_times)?;
        let day_progress = self.solar.day_progress(now)?;
        let curve = build_curve(snapshot.condition_category, solar_progress);
        let background = color_at(&curve, day_progress);
        debug!(
            "redraw: progress {:.4} sunrise {:.4} sunset {:.4} -> {:?}",
            day_progress, solar_progress.sunrise, solar_progress.sunset, background
        );

        Ok(&*self.frame.insert(Frame {
            rendered_at: now,
            snapshot,
            solar_times,
            solar_progress,
            day_progress,
            background,
            forecast: window,
            map_tile: self.map_tile.clone(),
        }))
    }

    /// One cooperative tick: exit check, minute-gated redraw, rain advance.
    pub fn tick(&mut self, now: DateTime<Utc>, events: &[DeckEvent]) -> TickOutcome {
        if events.contains(&DeckEvent::Exit) {
            info!("exit requested");
            return TickOutcome::Exit;
        }

        let mut redrawn = false;
        let stamp = self.minute_stamp(now);
        if self.scheduler.is_redraw_due(&stamp) {
            match self.redraw(now) {
                Ok(_) => redrawn = true,
                Err(e) => warn!("redraw skipped at {}: {}", stamp, e),
            }
            self.scheduler.mark_redraw_complete(&stamp);
        }

        self.rain.advance();
        TickOutcome::Continue { redrawn }
    }
}

/// Blocking loop bounded to the configured tick rate; returns on an exit event.
pub fn run_loop<P, E, R, C>(dashboard: &mut Dashboard<P>, events: &mut E, renderer: &mut R, mut clock: C)
where
    P: WeatherProvider,
    E: EventSource,
    R: Renderer,
    C: FnMut() -> DateTime<Utc>,
{
    let interval = dashboard.config().tick_interval();
    loop {
        let started = Instant::now();
        let pending = events.drain();
        match dashboard.tick(clock(), &pending) {
            TickOutcome::Exit => return,
            TickOutcome::Continue { redrawn } => {
                if redrawn {
                    if let Some(frame) = dashboard.frame() {
                        renderer.draw_frame(frame);
                    }
                }
                renderer.draw_rain(dashboard.drops());
            }
        }
        if let Some(rest) = interval.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}
