use std::time::{Duration, Instant};

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

use weather_deck::{
    kelvin_to_celsius, run_loop, ConditionCategory, Dashboard, DeckConfig, DeckEvent, DeckResult,
    EventSource, ForecastSample, Frame, GeoLocation, RainDrop, Renderer, WeatherProvider,
    WeatherSnapshot,
};

/// Canned conditions standing in for the HTTP client.
struct SyntheticProvider;

impl WeatherProvider for SyntheticProvider {
    fn current(&mut self, _location: &GeoLocation, _timeout: Duration) -> DeckResult<WeatherSnapshot> {
        Ok(WeatherSnapshot {
            condition_category: ConditionCategory::from_description("shower rain"),
            condition_main: "Rain".to_string(),
            condition_description: "shower rain".to_string(),
            condition_icon: "10d".to_string(),
            temperature_kelvin: 284.6,
            wind_speed_mps: 5.1,
            wind_direction_deg: 250.0,
        })
    }

    fn forecast(
        &mut self,
        _location: &GeoLocation,
        _timeout: Duration,
    ) -> DeckResult<Vec<ForecastSample>> {
        let start = Utc::now()
            .duration_trunc(TimeDelta::hours(3))
            .unwrap_or_else(|_| Utc::now());
        Ok((0..8)
            .map(|k| ForecastSample {
                timestamp: start + TimeDelta::hours(3 * k),
                temperature_kelvin: 283.0 + k as f64 * 0.7,
                precipitation_probability: 0.6 - k as f64 * 0.05,
                condition_main: if k < 3 { "Rain" } else { "Clouds" }.to_string(),
                condition_icon: if k < 3 { "10d" } else { "04d" }.to_string(),
            })
            .collect())
    }
}

struct RunFor(Instant, Duration);

impl EventSource for RunFor {
    fn drain(&mut self) -> Vec<DeckEvent> {
        if self.0.elapsed() >= self.1 {
            vec![DeckEvent::Exit]
        } else {
            Vec::new()
        }
    }
}

#[derive(Default)]
struct ConsoleRenderer {
    rain_frames: u64,
}

impl Renderer for ConsoleRenderer {
    fn draw_frame(&mut self, frame: &Frame) {
        let bg = frame.background;
        println!("=== {} ===", frame.rendered_at.format("%H:%M"));
        println!(
            "Background: #{:02x}{:02x}{:02x} (day {:.3}, sunrise {:.3}, sunset {:.3})",
            bg.r, bg.g, bg.b, frame.day_progress, frame.solar_progress.sunrise, frame.solar_progress.sunset
        );
        println!(
            "Now: {} {:.1}°C, wind {:.1} m/s {}",
            frame.snapshot.condition_main,
            kelvin_to_celsius(frame.snapshot.temperature_kelvin),
            frame.snapshot.wind_speed_mps,
            frame.snapshot.compass_point()
        );
        for slot in &frame.forecast {
            println!(
                "  {:>4}  {:>5.1}°C  {:>3}%  {}",
                slot.label(),
                slot.sample.temperature_celsius(),
                slot.sample.precipitation_percent(),
                slot.sample.condition_main
            );
        }
        println!(
            "Map tile: {}/{}/{}/{}",
            frame.map_tile.layer, frame.map_tile.zoom, frame.map_tile.x, frame.map_tile.y
        );
    }

    fn draw_rain(&mut self, drops: &[RainDrop]) {
        self.rain_frames += 1;
        if self.rain_frames % 50 == 0 {
            log::debug!("rain frame {} with {} drops", self.rain_frames, drops.len());
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => DeckConfig::from_file(path)?,
        None => DeckConfig::default(),
    };

    let mut dashboard = Dashboard::new(config, SyntheticProvider)?;
    let mut events = RunFor(Instant::now(), Duration::from_secs(5));
    let mut renderer = ConsoleRenderer::default();
    let clock: fn() -> DateTime<Utc> = Utc::now;
    run_loop(&mut dashboard, &mut events, &mut renderer, clock);
    Ok(())
}
