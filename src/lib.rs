pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod palette;
pub mod provider;
pub mod scheduler;
pub mod solar;
pub mod types;

pub use config::DeckConfig;

pub use dashboard::{run_loop, Dashboard, DeckEvent, EventSource, Frame, Renderer, TickOutcome};

pub use error::{DeckError, DeckResult};

pub use forecast::{
    hours_ahead, kelvin_to_celsius, next_hour_index, select_window, upcoming, DEFAULT_WINDOW,
};

pub use palette::{build_curve, color_at, interpolate_rgb, NIGHT, TRANSITION_WIDTH};

pub use provider::{compass_point, parse_current, parse_forecast, WeatherProvider};

pub use scheduler::{
    is_rain_condition, minute_stamp, RainField, RedrawPhase, RedrawScheduler, RAIN_SPREAD,
};

pub use solar::{
    compute_solar_times, day_progress, equation_of_time, local_midnight, resolve_time_zone,
    solar_declination, sunrise_hour_angle, sunrise_progress, sunset_progress, SolarClock,
};

pub use types::{
    ConditionCategory, ForecastSample, ForecastSlot, GeoLocation, PaletteCurve, PaletteStop,
    RainDrop, Rgb, SolarProgress, SolarTimes, TileRequest, WeatherSnapshot,
};
