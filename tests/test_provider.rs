use chrono::{TimeZone, Utc};

use weather_deck::provider::*;
use weather_deck::types::{ConditionCategory, GeoLocation, TileRequest};
use weather_deck::DeckError;

const CURRENT: &str = r#"{
    "coord": {"lon": -0.1278, "lat": 51.5074},
    "weather": [{"id": 521, "main": "Rain", "description": "shower rain", "icon": "10d"}],
    "main": {"temp": 285.4, "feels_like": 284.9, "humidity": 81},
    "wind": {"speed": 4.6, "deg": 230},
    "dt": 1777000000,
    "name": "London"
}"#;

const FORECAST: &str = r#"{
    "cod": "200",
    "list": [
        {"dt": 1777010800, "main": {"temp": 286.0}, "weather": [{"main": "Clouds", "icon": "04d"}], "pop": 0.2},
        {"dt": 1777000000, "main": {"temp": 285.0}, "weather": [{"main": "Rain", "icon": "10d"}], "pop": 0.85},
        {"dt": 1777021600, "main": {"temp": 284.0}, "weather": [{"main": "Clear", "icon": "01n"}]}
    ],
    "city": {"name": "London", "timezone": 3600}
}"#;

#[test]
fn test_parse_current() {
    let snap = parse_current(CURRENT).unwrap();
    assert_eq!(snap.condition_category, ConditionCategory::RainLike);
    assert_eq!(snap.condition_main, "Rain");
    assert_eq!(snap.condition_description, "shower rain");
    assert_eq!(snap.icon_id(), "10d");
    assert_eq!(snap.temperature_kelvin, 285.4);
    assert_eq!(snap.wind_speed_mps, 4.6);
    assert_eq!(snap.wind_direction_deg, 230.0);
    assert_eq!(snap.compass_point(), "SW");
}

#[test]
fn test_parse_current_without_wind() {
    let body = r#"{"weather": [{"main": "Clear", "description": "clear sky", "icon": "01d"}], "main": {"temp": 300.0}}"#;
    let snap = parse_current(body).unwrap();
    assert_eq!(snap.condition_category, ConditionCategory::ClearLike);
    assert_eq!(snap.wind_speed_mps, 0.0);
}

#[test]
fn test_parse_current_classifies_by_description() {
    let cases = [
        ("Clouds", "broken clouds", ConditionCategory::ClearLike),
        ("Clouds", "overcast clouds", ConditionCategory::Other),
        ("Mist", "mist", ConditionCategory::RainLike),
        ("Rain", "light rain", ConditionCategory::Other),
        ("Snow", "", ConditionCategory::Other),
    ];
    for (main, description, expected) in cases {
        let body = format!(
            r#"{{"weather": [{{"main": "{}", "description": "{}", "icon": "04d"}}], "main": {{"temp": 280.0}}}}"#,
            main, description
        );
        let snap = parse_current(&body).unwrap();
        assert_eq!(snap.condition_category, expected, "{} / {}", main, description);
        assert_eq!(snap.condition_main, main);
    }
}

#[test]
fn test_parse_current_rejects_missing_condition() {
    let body = r#"{"weather": [], "main": {"temp": 300.0}}"#;
    assert!(matches!(parse_current(body), Err(DeckError::ProviderUnavailable(_))));
}

#[test]
fn test_parse_current_rejects_garbage() {
    assert!(matches!(parse_current("{not json"), Err(DeckError::MalformedResponse(_))));
    assert!(matches!(parse_current(r#"{"weather": []}"#), Err(DeckError::MalformedResponse(_))));
}

#[test]
fn test_parse_forecast_sorted() {
    let samples = parse_forecast(FORECAST).unwrap();
    assert_eq!(samples.len(), 3);
    assert!(samples.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    assert_eq!(samples[0].timestamp, Utc.timestamp_opt(1_777_000_000, 0).unwrap());
    assert_eq!(samples[0].condition_main, "Rain");
    assert_eq!(samples[0].precipitation_probability, 0.85);
    assert_eq!(samples[2].precipitation_probability, 0.0);
    assert_eq!(samples[2].icon_id(), "01n");
}

#[test]
fn test_parse_forecast_empty_list() {
    let samples = parse_forecast(r#"{"list": []}"#).unwrap();
    assert!(samples.is_empty());
}

// ── Tiles ──

fn loc(latitude: f64, longitude: f64) -> GeoLocation {
    GeoLocation {
        latitude,
        longitude,
        time_zone_id: "UTC".to_string(),
    }
}

#[test]
fn test_tile_for_origin() {
    let t = TileRequest::for_location(&loc(0.0, 0.0), "clouds_new", 1);
    assert_eq!((t.x, t.y, t.zoom), (1, 1, 1));
    assert_eq!(t.layer, "clouds_new");
}

#[test]
fn test_tile_for_london() {
    let t = TileRequest::for_location(&loc(51.5074, -0.1278), "precipitation_new", 10);
    assert_eq!((t.x, t.y), (511, 340));
}

#[test]
fn test_tile_zoom_zero_and_poles() {
    let t = TileRequest::for_location(&loc(89.9, 179.9), "temp_new", 0);
    assert_eq!((t.x, t.y), (0, 0));
    let t = TileRequest::for_location(&loc(-89.9, 180.0), "temp_new", 3);
    assert_eq!((t.x, t.y), (7, 7));
}

#[test]
fn test_neighbourhood_wraps_and_clips() {
    let t = TileRequest::for_location(&loc(0.0, -179.9), "clouds_new", 2);
    assert_eq!((t.x, t.y), (0, 2));
    let tiles = t.neighbourhood(1);
    assert_eq!(tiles.len(), 9);
    assert!(tiles.iter().any(|n| n.x == 3 && n.y == 1));

    let top = TileRequest { layer: "clouds_new".into(), x: 1, y: 0, zoom: 2 };
    let tiles = top.neighbourhood(1);
    assert_eq!(tiles.len(), 6);
    assert!(tiles.iter().all(|n| n.y <= 1));
}
