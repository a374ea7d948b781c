use scrollwork::{Journey, ScrollworkError};

#[test]
fn json_fixture_validates() {
    let s = include_str!("data/journey.json");
    let journey = Journey::from_json(s).unwrap();
    journey.validate().unwrap();
}

#[test]
fn truncated_json_surfaces_a_serde_error() {
    let s = include_str!("data/journey.json");
    let err = Journey::from_json(&s[..s.len() / 2]).unwrap_err();
    assert!(matches!(err, ScrollworkError::Serde(_)));
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn defaults_fill_omitted_sections() {
    let journey: Journey = serde_json::from_str(r#"{ "layers": [] }"#).unwrap();
    journey.validate().unwrap();
    assert_eq!(journey.altitude.max_altitude_ft, 500);
    assert_eq!(journey.crossfade.section_count, 3);
    assert_eq!(journey.gate.zoom_ms, 800);
}
