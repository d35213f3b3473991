use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn resxlate_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("resxlate"))
}

const DEFAULTS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">Hello %1$s</string>
    <string name="server" translatable="false">api.example.com</string>
</resources>
"#;

const FRENCH: &str = "<resources>\n    <string name=\"app_name\">Bonjour %1$s</string>\n</resources>\n";

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("values")).unwrap();
    fs::write(temp_dir.path().join("values/strings.xml"), DEFAULTS).unwrap();
    fs::create_dir(temp_dir.path().join("values-fr")).unwrap();
    fs::write(temp_dir.path().join("values-fr/strings.xml"), FRENCH).unwrap();
    temp_dir
}

fn write_settings(dir: &TempDir, endpoint: &str) -> std::path::PathBuf {
    let path = dir.path().join("project.settings");
    fs::write(
        &path,
        format!("[translate]\napi_key = \"test-key\"\nendpoint = \"{}\"\ntimeout_secs = 2\n", endpoint),
    )
    .unwrap();
    path
}

#[test]
fn test_translate_without_settings_fails_before_touching_files() {
    let temp_dir = project();

    let output = resxlate_cmd()
        .current_dir(temp_dir.path())
        .args(["translate", temp_dir.path().to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Settings file not found"));
    assert_eq!(fs::read_to_string(temp_dir.path().join("values-fr/strings.xml")).unwrap(), FRENCH);
}

#[test]
fn test_translate_with_empty_api_key_is_config_error() {
    let temp_dir = project();
    let settings = temp_dir.path().join("custom.settings");
    fs::write(&settings, "[translate]\napi_key = \"\"\n").unwrap();

    let output = resxlate_cmd()
        .args([
            "translate",
            temp_dir.path().to_str().unwrap(),
            "--settings",
            settings.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config error"));
}

#[test]
fn test_translate_malformed_defaults_is_parse_error() {
    let temp_dir = project();
    fs::write(temp_dir.path().join("values/strings.xml"), "<resources><string name=\"a\">").unwrap();
    let settings = write_settings(&temp_dir, "http://127.0.0.1:9/translate");

    let output = resxlate_cmd()
        .args([
            "translate",
            temp_dir.path().to_str().unwrap(),
            "-s",
            settings.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("parse error"));
    assert_eq!(fs::read_to_string(temp_dir.path().join("values-fr/strings.xml")).unwrap(), FRENCH);
}

#[test]
fn test_translate_with_no_locales_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("values")).unwrap();
    fs::write(temp_dir.path().join("values/strings.xml"), DEFAULTS).unwrap();
    fs::create_dir(temp_dir.path().join("values-v21")).unwrap();
    let settings = write_settings(&temp_dir, "http://127.0.0.1:9/translate");

    let output = resxlate_cmd()
        .args([
            "translate",
            temp_dir.path().to_str().unwrap(),
            "--settings",
            settings.to_str().unwrap(),
            "--verbose",
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("into 0 locales"));
    assert!(stdout.contains("Execution time"));
}

#[test]
fn test_translate_only_non_translatable_key_is_noop() {
    let temp_dir = project();
    let settings = write_settings(&temp_dir, "http://127.0.0.1:9/translate");

    let output = resxlate_cmd()
        .args([
            "translate",
            temp_dir.path().to_str().unwrap(),
            "server",
            "--settings",
            settings.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Nothing to translate."));
    assert_eq!(fs::read_to_string(temp_dir.path().join("values-fr/strings.xml")).unwrap(), FRENCH);
}

#[test]
fn test_translate_service_failure_exits_non_zero_and_keeps_file() {
    let temp_dir = project();
    let settings = write_settings(&temp_dir, "http://127.0.0.1:9/translate");

    let output = resxlate_cmd()
        .args([
            "translate",
            temp_dir.path().to_str().unwrap(),
            "app_name",
            "--settings",
            settings.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("translation service error for key `app_name` (fr)"), "{stderr}");
    assert!(stderr.contains("1 of 1 locales failed"));
    assert_eq!(fs::read_to_string(temp_dir.path().join("values-fr/strings.xml")).unwrap(), FRENCH);
}
