use std::io::Write;
use std::time::Duration;

use weather_deck::{DeckConfig, DeckError, GeoLocation};

#[test]
fn test_default_config() {
    let c = DeckConfig::default();
    assert_eq!(c.screen_width, 480);
    assert_eq!(c.screen_height, 320);
    assert_eq!(c.tick_hz, 10);
    assert_eq!(c.forecast_slots, 4);
    assert_eq!(c.rain_drop_count, 60);
    assert_eq!(c.map_zoom, 8);
    assert_eq!(c.location, GeoLocation::default());
    assert!(c.validate().is_ok());
}

#[test]
fn test_durations() {
    let c = DeckConfig::default();
    assert_eq!(c.tick_interval(), Duration::from_millis(100));
    assert_eq!(c.provider_timeout(), Duration::from_secs(10));
}

#[test]
fn test_partial_toml_falls_back_to_defaults() {
    let c = DeckConfig::from_toml_str(
        r#"
        tick_hz = 20
        rain_drop_count = 40

        [location]
        latitude = 47.3769
        longitude = 8.5417
        time_zone_id = "Europe/Zurich"
        "#,
    )
    .unwrap();
    assert_eq!(c.tick_hz, 20);
    assert_eq!(c.rain_drop_count, 40);
    assert_eq!(c.location.time_zone_id, "Europe/Zurich");
    assert_eq!(c.screen_width, 480);
    assert_eq!(c.tick_interval(), Duration::from_millis(50));
}

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(DeckConfig::from_toml_str("").unwrap(), DeckConfig::default());
}

#[test]
fn test_invalid_values_rejected() {
    assert!(matches!(DeckConfig::from_toml_str("tick_hz = 0"), Err(DeckError::Config(_))));
    assert!(matches!(DeckConfig::from_toml_str("screen_height = 0"), Err(DeckError::Config(_))));
    assert!(matches!(DeckConfig::from_toml_str("forecast_slots = 0"), Err(DeckError::Config(_))));
    assert!(matches!(DeckConfig::from_toml_str("tick_hz = \"fast\""), Err(DeckError::Config(_))));
}

#[test]
fn test_invalid_location_rejected() {
    let r = DeckConfig::from_toml_str(
        r#"
        [location]
        latitude = 123.0
        longitude = 0.0
        time_zone_id = "UTC"
        "#,
    );
    assert!(matches!(r, Err(DeckError::LocationResolution(_))));
}

#[test]
fn test_from_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "map_zoom = 6").unwrap();
    let c = DeckConfig::from_file(f.path()).unwrap();
    assert_eq!(c.map_zoom, 6);

    let missing = f.path().with_extension("absent");
    assert!(matches!(DeckConfig::from_file(&missing), Err(DeckError::Config(_))));
}
