use std::fs;

use bintree::config::{Settings, Traversal};
use bintree::SettingsError;
use rstest::rstest;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("bintree.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_explicit_file_when_loading_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "traversal = \"iterative\"\nrecursion_limit = 42\n");

    let settings = Settings::load(Some(&path)).unwrap();
    assert_eq!(settings.traversal, Traversal::Iterative);
    assert_eq!(settings.recursion_limit, 42);
}

#[test]
fn given_partial_file_when_loading_then_unspecified_keys_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "recursion_limit = 7\n");

    let settings = Settings::load(Some(&path)).unwrap();
    assert_eq!(settings.traversal, Settings::default().traversal);
    assert_eq!(settings.recursion_limit, 7);
}

#[test]
fn given_template_file_when_loading_then_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &Settings::template());

    assert_eq!(Settings::load(Some(&path)).unwrap(), Settings::default());
}

#[test]
fn given_missing_explicit_file_when_loading_then_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = Settings::load(Some(&path));
    assert!(matches!(result, Err(SettingsError::Read { .. })));
}

#[rstest]
#[case::unknown_traversal("traversal = \"sideways\"\n")]
#[case::wrong_type("recursion_limit = \"many\"\n")]
#[case::negative_limit("recursion_limit = -1\n")]
#[case::not_toml("traversal = \n")]
fn given_invalid_file_when_loading_then_parse_error(#[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, content);

    let result = Settings::load(Some(&path));
    assert!(
        matches!(result, Err(SettingsError::Parse { ref path, .. }) if path.ends_with("bintree.toml")),
        "{:?}",
        result
    );
}

#[test]
fn given_effective_settings_when_to_toml_then_loadable_again() {
    let dir = TempDir::new().unwrap();
    let settings = Settings {
        traversal: Traversal::Recursive,
        recursion_limit: 123,
    };
    let path = write_config(&dir, &settings.to_toml().unwrap());

    assert_eq!(Settings::load(Some(&path)).unwrap(), settings);
}
