use super::*;

#[test]
fn defaults_are_valid_and_match_the_stage() {
    let cfg = ShortConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.canvas.width, 1920);
    assert_eq!(cfg.canvas.height, 1080);
    assert_eq!(cfg.time_step, 0.005);
    assert_eq!(cfg.credits.len(), 2);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: ShortConfig = serde_json::from_str(r#"{ "seed": 9, "time_step": 0.01 }"#).unwrap();
    assert_eq!(cfg.seed, 9);
    assert_eq!(cfg.time_step, 0.01);
    assert_eq!(cfg.canvas, ShortConfig::default().canvas);
    assert!(serde_json::from_str::<ShortConfig>(r#"{ "sed": 9 }"#).is_err());
}

#[test]
fn validation_rejects_bad_values() {
    let bad = [
        ShortConfig {
            canvas: Canvas {
                width: 1921,
                height: 1080,
            },
            ..ShortConfig::default()
        },
        ShortConfig {
            time_step: 0.0,
            ..ShortConfig::default()
        },
        ShortConfig {
            duration_secs: f64::NAN,
            ..ShortConfig::default()
        },
        ShortConfig {
            fps: Fps { num: 0, den: 1 },
            ..ShortConfig::default()
        },
        ShortConfig {
            credits: vec!["only one".to_owned()],
            ..ShortConfig::default()
        },
    ];
    for cfg in bad {
        assert!(cfg.validate().is_err(), "{cfg:?}");
    }
}

#[test]
fn frame_time_mapping_is_stable_at_step_multiples() {
    let cfg = ShortConfig::default();
    assert_eq!(cfg.frame_at(0.0), FrameIndex(0));
    assert_eq!(cfg.frame_at(3.0), FrameIndex(600));
    assert_eq!(cfg.frame_at(-1.0), FrameIndex(0));
    assert!((cfg.time_at(FrameIndex(600)) - 3.0).abs() < 1e-9);

    let full = cfg.full_range().unwrap();
    assert_eq!(full.start, FrameIndex(0));
    assert_eq!(full.end, FrameIndex(7600));
}

#[test]
fn from_json_path_reports_missing_file() {
    let err = ShortConfig::from_json_path(Path::new("target/definitely/missing.json"))
        .unwrap_err()
        .to_string();
    assert!(err.contains("missing.json"));
}
