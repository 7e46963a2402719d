use super::*;

#[test]
fn defaults_validate() {
    ExperienceConfig::default().validate().unwrap();
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg = ExperienceConfig::from_json_str(
        r#"{ "narration": { "lead_in_secs": 1.0 }, "ambient": { "ceiling_gain": 0.05 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.narration.lead_in_secs, 1.0);
    assert_eq!(cfg.narration.rate, 0.94);
    assert_eq!(cfg.ambient.ceiling_gain, 0.05);
    assert_eq!(cfg.ambient.sample_rate, 48_000);
    assert_eq!(cfg.scenes.len(), 6);
}

#[test]
fn custom_scene_list_parses() {
    let cfg = ExperienceConfig::from_json_str(
        r#"{ "scenes": [
            { "key": "mirror", "title": "M", "duration": 2.5, "voiceLine": "hi", "sensation": "s" }
        ] }"#,
    )
    .unwrap();
    assert_eq!(cfg.scenes.len(), 1);
    assert_eq!(cfg.scenes[0].key, crate::catalog::SceneKey::Mirror);
}

#[test]
fn empty_catalog_is_valid() {
    let cfg = ExperienceConfig::from_json_str(r#"{ "scenes": [] }"#).unwrap();
    assert!(cfg.scenes.is_empty());
}

#[test]
fn rejects_teardown_shorter_than_fade() {
    let mut cfg = ExperienceConfig::default();
    cfg.ambient.teardown_delay_secs = 1.0;
    assert!(matches!(
        cfg.validate(),
        Err(Room213Error::Validation(_))
    ));
}

#[test]
fn rejects_zero_gain_floor() {
    let mut cfg = ExperienceConfig::default();
    cfg.ambient.floor_gain = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ExperienceConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, Room213Error::Serde(_)));
}

#[test]
fn noise_buffer_is_three_seconds_at_default_rate() {
    assert_eq!(AmbientConfig::default().noise_buffer_frames(), 144_000);
}
