use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = SignatureConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, SignatureConfig::default());
    assert_eq!(cfg.canvas, Canvas::default());
    assert_eq!(cfg.timing.char_delay_ms, 80);
    assert_eq!(cfg.flourish.drop, 40.0);
    assert_eq!(cfg.reentry, ReentryPolicy::CancelAndRestart);
    assert!(cfg.seed.is_none());
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let json = r#"{
        "canvas": { "width": 640, "height": 240 },
        "fonts_dir": "assets/fonts",
        "fallback_family": "Allura",
        "timing": { "char_delay_ms": 40 },
        "reentry": "ignore_while_busy",
        "seed": 7
    }"#;
    let cfg = SignatureConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.canvas, Canvas::new(640, 240).unwrap());
    assert_eq!(cfg.fonts_dir, Some(PathBuf::from("assets/fonts")));
    assert_eq!(cfg.fallback_family.as_deref(), Some("Allura"));
    assert_eq!(cfg.timing.char_delay_ms, 40);
    assert_eq!(cfg.timing.fade_steps, 8);
    assert_eq!(cfg.reentry, ReentryPolicy::IgnoreWhileBusy);
    assert_eq!(cfg.seed, Some(7));
}

#[test]
fn unknown_fields_are_config_errors() {
    let err = SignatureConfig::from_reader(r#"{ "colour": "red" }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn invalid_values_are_rejected() {
    for json in [
        r#"{ "canvas": { "width": 0, "height": 300 } }"#,
        r#"{ "timing": { "fade_steps": 0 } }"#,
        r#"{ "flourish": { "alpha": 1.5 } }"#,
        r#"{ "fallback_family": "  " }"#,
    ] {
        let err = SignatureConfig::from_reader(json.as_bytes()).unwrap_err();
        assert!(err.to_string().starts_with("config error:"), "{json}: {err}");
    }
}

#[test]
fn missing_file_is_a_config_error() {
    let err = SignatureConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("open config"));
}
