use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = EngineConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.readiness_timeout_ms, 3_000);
    assert_eq!(cfg.reset_viewport_factor, 1.5);
    assert_eq!(cfg.duplicate_offset, 20.0);
    assert_eq!(cfg.primary_kind, RecordKind::Template);
}

#[test]
fn partial_override_keeps_other_defaults() {
    let json = r#"{"readinessTimeoutMs": 500, "primaryKind": "instance"}"#;
    let cfg = EngineConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.readiness_timeout_ms, 500);
    assert_eq!(cfg.primary_kind, RecordKind::Instance);
    assert_eq!(cfg.history_limit, 100);
}

#[test]
fn rejects_non_positive_reset_factor() {
    let json = r#"{"resetViewportFactor": 0}"#;
    assert!(EngineConfig::from_reader(json.as_bytes()).is_err());
}

#[test]
fn rejects_zero_history() {
    let json = r#"{"historyLimit": 0}"#;
    assert!(EngineConfig::from_reader(json.as_bytes()).is_err());
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = EngineConfig::from_path("definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}
