//! Dispatch and loader tests.

use blueprint_load::{
    Blueprint, BlueprintLoadError, ConfigMerger, DecodeError, DispatchConfig, LoaderConfig,
    decode_blueprint, load_blueprint, load_blueprints,
};
use blueprint_types::{BlueprintApi, BlueprintError, TargetDogu};
use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

fn dir_path(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().join("blueprints")).unwrap()
}

fn write_blueprint(dir: &Utf8PathBuf, name: &str, contents: &str) -> Utf8PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn valid_v1() -> &'static str {
    r#"{
        "blueprintApi": "v1",
        "blueprintId": "staging",
        "cesappVersion": "6.0.2-1",
        "dogus": [{"name": "official/nginx", "version": "1.17.10-7"}]
    }"#
}

fn allow_tests() -> DispatchConfig {
    DispatchConfig {
        allow_test_apis: true,
    }
}

#[test]
fn test_decode_v1() {
    let blueprint = decode_blueprint(valid_v1().as_bytes(), &DispatchConfig::default()).unwrap();
    assert_eq!(blueprint.api(), &BlueprintApi::V1);

    let v1 = blueprint.into_v1().expect("v1 variant");
    assert_eq!(v1.id, "staging");
    assert_eq!(v1.dogus, vec![TargetDogu::new("official/nginx", "1.17.10-7")]);
}

#[test]
fn test_decode_unknown_version_is_unsupported() {
    let raw = br#"{"blueprintApi":"v2","dogus":{"totally":"different"}}"#;
    let err = decode_blueprint(raw, &DispatchConfig::default()).expect_err("v2");

    match &err {
        DecodeError::UnsupportedVersion { api } => assert_eq!(api, "v2"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_unsupported_version());
}

#[test]
fn test_decode_missing_version() {
    let err = decode_blueprint(b"{}", &DispatchConfig::default()).expect_err("no version");
    assert!(matches!(err, DecodeError::MissingVersion));
    assert!(!err.is_unsupported_version());
}

#[test]
fn test_decode_malformed_document() {
    let err = decode_blueprint(b"{\"blueprintApi\":", &DispatchConfig::default())
        .expect_err("truncated");
    assert!(matches!(
        err,
        DecodeError::Parse(BlueprintError::MalformedDocument { .. })
    ));
}

#[test]
fn test_decode_v1_with_bad_target_state_is_malformed_enum() {
    let raw = br#"{"blueprintApi":"v1","dogus":[{"name":"official/nginx","targetState":7}]}"#;
    let err = decode_blueprint(raw, &DispatchConfig::default()).expect_err("bad state");
    match err {
        DecodeError::Parse(BlueprintError::MalformedEnum { raw, .. }) => assert_eq!(raw, "7"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_decode_null_document_is_missing_version() {
    let err = decode_blueprint(b"null", &DispatchConfig::default()).expect_err("null");
    assert!(matches!(err, DecodeError::MissingVersion));
}

#[test]
fn test_test_empty_requires_opt_in() {
    let raw = br#"{"blueprintApi":"test/empty"}"#;

    let err = decode_blueprint(raw, &DispatchConfig::default()).expect_err("disabled");
    assert!(matches!(err, DecodeError::TestApiDisabled { .. }));

    let blueprint = decode_blueprint(raw, &allow_tests()).expect("enabled");
    assert!(matches!(blueprint, Blueprint::TestEmpty(_)));
    assert_eq!(blueprint.api(), &BlueprintApi::TEST_EMPTY);
    assert!(blueprint.as_v1().is_none());
}

#[test]
fn test_load_single_file() {
    let temp = create_temp_dir();
    let dir = dir_path(&temp);
    let path = write_blueprint(&dir, "staging.json", valid_v1());

    let blueprint = load_blueprint(&path, &DispatchConfig::default()).unwrap();
    assert_eq!(blueprint.as_v1().map(|b| b.id.as_str()), Some("staging"));
}

#[test]
fn test_load_single_file_error_names_path() {
    let temp = create_temp_dir();
    let dir = dir_path(&temp);
    let path = write_blueprint(&dir, "broken.json", "{ not json");

    let err = load_blueprint(&path, &DispatchConfig::default()).expect_err("broken");
    let chain = format!("{err:#}");
    assert!(chain.contains("broken.json"));
    assert!(chain.contains("could not parse blueprint"));
}

#[test]
fn test_load_missing_file() {
    let temp = create_temp_dir();
    let path = dir_path(&temp).join("nope.json");

    let err = load_blueprint(&path, &DispatchConfig::default()).expect_err("missing");
    assert!(format!("{err:#}").contains("nope.json"));
}

#[test]
fn test_missing_directory_is_empty() {
    let temp = create_temp_dir();
    let dir = dir_path(&temp);

    let loaded = load_blueprints(&dir, &LoaderConfig::default()).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_scan_sorted_with_per_file_results() {
    let temp = create_temp_dir();
    let dir = dir_path(&temp);
    write_blueprint(&dir, "zeta.json", valid_v1());
    write_blueprint(&dir, "alpha.json", r#"{"blueprintApi":"v9"}"#);
    write_blueprint(&dir, "middle.json", "not json at all");
    write_blueprint(&dir, "notes.txt", "ignored by pattern");

    let loaded = load_blueprints(&dir, &LoaderConfig::default()).unwrap();
    let names: Vec<&str> = loaded.iter().filter_map(|l| l.path.file_name()).collect();
    assert_eq!(names, vec!["alpha.json", "middle.json", "zeta.json"]);

    assert_eq!(
        loaded[0].blueprint.as_ref().expect_err("v9"),
        &BlueprintLoadError::UnsupportedVersion {
            api: BlueprintApi::new("v9")
        }
    );
    match loaded[1].blueprint.as_ref().expect_err("not json") {
        BlueprintLoadError::Decode { message } => {
            assert!(message.contains("could not parse blueprint"));
            assert!(message.contains("expected"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(loaded[2].blueprint.is_ok());
}

#[test]
fn test_scan_honours_config_pattern_and_dispatch() {
    let temp = create_temp_dir();
    let dir = dir_path(&temp);
    write_blueprint(&dir, "a.blueprint", r#"{"blueprintApi":"test/empty"}"#);
    write_blueprint(&dir, "b.json", valid_v1());

    let config = ConfigMerger::new(LoaderConfig::default())
        .allow_test_apis(true)
        .pattern(Some("*.blueprint".to_string()))
        .merge();

    let loaded = load_blueprints(&dir, &config).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(matches!(loaded[0].blueprint, Ok(Blueprint::TestEmpty(_))));
}
