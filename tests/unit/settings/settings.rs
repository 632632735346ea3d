use super::*;

#[test]
fn empty_document_uses_defaults() {
    let s = PlayerSettings::from_json_str("{}").unwrap();
    assert_eq!(s, PlayerSettings::default());
    assert_eq!(s.vertical_scroll, VerticalScrollSource::VerticalField);
    assert_eq!(s.sync_offset_ms, 0.0);
}

#[test]
fn parses_all_fields() {
    let s = PlayerSettings::from_json_str(
        r#"{ "vertical_scroll": "horizontal_field", "sync_offset_ms": 800 }"#,
    )
    .unwrap();
    assert_eq!(s.vertical_scroll, VerticalScrollSource::HorizontalField);
    assert_eq!(s.sync_offset_ms, 800.0);
}

#[test]
fn rejects_unknown_fields_and_values() {
    let err = PlayerSettings::from_json_str(r#"{ "scale": 2 }"#).unwrap_err();
    assert!(matches!(err, CdgError::Settings(_)));

    let err = PlayerSettings::from_json_str(r#"{ "vertical_scroll": "sideways" }"#).unwrap_err();
    assert!(err.to_string().contains("settings error"));
}

#[test]
fn from_path_reads_file_and_reports_missing() {
    let dir = std::path::PathBuf::from("target").join("settings_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("player.json");
    std::fs::write(&path, r#"{ "sync_offset_ms": 12.5 }"#).unwrap();

    let s = PlayerSettings::from_path(&path).unwrap();
    assert_eq!(s.sync_offset_ms, 12.5);

    let err = PlayerSettings::from_path(dir.join("missing.json")).unwrap_err();
    assert!(matches!(err, CdgError::Io(_)));
}

#[test]
fn serializes_snake_case() {
    let json = serde_json::to_value(PlayerSettings::default()).unwrap();
    assert_eq!(json["vertical_scroll"], "vertical_field");
}
