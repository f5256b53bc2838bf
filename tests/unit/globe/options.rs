use super::*;

#[test]
fn empty_document_uses_defaults() {
    let options = GlobeOptions::from_json_str("{}").unwrap();
    assert_eq!(options, GlobeOptions::default());
    assert!(options.start_with_intro_animation);
    assert_eq!(options.renderer_size, Size::new(1280.0, 720.0));
    assert_eq!(options.intro.settle_delay_ms, 600.0);
    assert_eq!(options.intro.rotation_duration_ms, 1200.0);
}

#[test]
fn accepts_camel_case_and_short_alias() {
    let options = GlobeOptions::from_json_str(
        r#"{ "animateIn": false, "intro": { "scaleDurationMs": 250 } }"#,
    )
    .unwrap();
    assert!(!options.start_with_intro_animation);
    assert_eq!(options.intro.scale_duration_ms, 250.0);
    assert_eq!(options.intro.epsilon, 1e-6);

    let options =
        GlobeOptions::from_json_str(r#"{ "startWithIntroAnimation": false }"#).unwrap();
    assert!(!options.start_with_intro_animation);
}

#[test]
fn renderer_size_uses_kurbo_shape() {
    let options =
        GlobeOptions::from_json_str(r#"{ "rendererSize": { "width": 640, "height": 480 } }"#)
            .unwrap();
    assert_eq!(options.renderer_size, Size::new(640.0, 480.0));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = GlobeOptions::from_json_str("{ animateIn: ").unwrap_err();
    assert!(matches!(err, GlobeError::Serde(_)));
}

#[test]
fn invalid_timings_are_rejected() {
    let err = GlobeOptions::from_json_str(r#"{ "intro": { "epsilon": 0 } }"#).unwrap_err();
    assert!(matches!(err, GlobeError::Configuration(_)));

    let err =
        GlobeOptions::from_json_str(r#"{ "intro": { "settleDelayMs": -1 } }"#).unwrap_err();
    assert!(err.to_string().contains("settleDelayMs"));

    let mut options = GlobeOptions::default();
    options.renderer_size = Size::new(f64::NAN, 10.0);
    assert!(options.validate().is_err());
}
