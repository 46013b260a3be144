use crate::types::{ConditionCategory, PaletteCurve, PaletteStop, Rgb, SolarProgress};

/// Width of the dawn and dusk transition bands, as a fraction of the day (~36 minutes).
pub const TRANSITION_WIDTH: f64 = 0.025;

pub const NIGHT: Rgb = Rgb::new(30, 30, 30);

pub const CLEAR_DAY: Rgb = Rgb::new(62, 179, 214);
pub const CLEAR_EVENING: Rgb = Rgb::new(212, 127, 0);
pub const RAIN_DAY: Rgb = Rgb::new(140, 140, 140);
pub const RAIN_EVENING: Rgb = Rgb::new(194, 158, 105);
pub const OTHER_DAY: Rgb = Rgb::new(200, 200, 200);
pub const OTHER_EVENING: Rgb = Rgb::new(194, 158, 105);

impl ConditionCategory {
    /// Classifies a provider condition description such as `"scattered clouds"`.
    pub fn from_description(description: &str) -> ConditionCategory {
        match description.trim().to_ascii_lowercase().as_str() {
            "clear sky" | "few clouds" | "scattered clouds" | "broken clouds" => {
                ConditionCategory::ClearLike
            }
            "shower rain" | "rain" | "thunderstorm" | "mist" => ConditionCategory::RainLike,
            _ => ConditionCategory::Other,
        }
    }

    /// (day colour, evening colour)
    pub fn colors(&self) -> (Rgb, Rgb) {
        match self {
            ConditionCategory::ClearLike => (CLEAR_DAY, CLEAR_EVENING),
            ConditionCategory::RainLike => (RAIN_DAY, RAIN_EVENING),
            ConditionCategory::Other => (OTHER_DAY, OTHER_EVENING),
        }
    }
}

/// Builds the seven-stop curve: flat night, dawn band, flat day, dusk band, night.
///
/// Stop positions are clamped into [0, 1] and forced non-decreasing, so
/// sunrise/sunset values near the day edges produce zero-width segments
/// rather than out-of-order stops.
pub fn build_curve(category: ConditionCategory, solar: SolarProgress) -> PaletteCurve {
    let (day, evening) = category.colors();
    let SolarProgress { sunrise, sunset } = solar;
    let raw = [
        (0.0, NIGHT),
        (sunrise - TRANSITION_WIDTH, NIGHT),
        (sunrise, evening),
        (sunrise + TRANSITION_WIDTH, day),
        (sunset - TRANSITION_WIDTH, day),
        (sunset, evening),
        (sunset + TRANSITION_WIDTH, NIGHT),
    ];

    let mut floor = 0.0_f64;
    let stops = raw.map(|(progress, color)| {
        floor = progress.clamp(0.0, 1.0).max(floor);
        PaletteStop { progress: floor, color }
    });

    PaletteCurve { category, stops }
}

fn lerp_channel(c1: u8, c2: u8, fraction: f64) -> u8 {
    let (a, b) = (c1 as f64, c2 as f64);
    // truncates toward zero
    (a + (b - a) * fraction).clamp(0.0, 255.0) as u8
}

pub fn interpolate_rgb(c1: Rgb, c2: Rgb, fraction: f64) -> Rgb {
    let fraction = fraction.clamp(0.0, 1.0);
    Rgb::new(
        lerp_channel(c1.r, c2.r, fraction),
        lerp_channel(c1.g, c2.g, fraction),
        lerp_channel(c1.b, c2.b, fraction),
    )
}

pub fn color_at(curve: &PaletteCurve, day_progress: f64) -> Rgb {
    let stops = &curve.stops;
    if day_progress < stops[0].progress {
        return stops[0].color;
    }

    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if lo.progress <= day_progress && day_progress <= hi.progress {
            let span = hi.progress - lo.progress;
            if span <= f64::EPSILON {
                return lo.color;
            }
            return interpolate_rgb(lo.color, hi.color, (day_progress - lo.progress) / span);
        }
    }

    stops[stops.len() - 1].color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_channel_endpoints() {
        assert_eq!(lerp_channel(10, 200, 0.0), 10);
        assert_eq!(lerp_channel(10, 200, 1.0), 200);
        assert_eq!(lerp_channel(200, 10, 0.5), 105);
    }

    #[test]
    fn test_lerp_channel_truncates() {
        assert_eq!(lerp_channel(0, 10, 0.99), 9);
        assert_eq!(lerp_channel(10, 0, 0.99), 0);
        assert_eq!(lerp_channel(30, 212, 0.5), 121);
    }

    #[test]
    fn test_interpolate_rgb_clamps_fraction() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(100, 100, 100);
        assert_eq!(interpolate_rgb(a, b, -1.0), a);
        assert_eq!(interpolate_rgb(a, b, 2.0), b);
    }
}
