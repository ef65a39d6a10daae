// tests/config_test.rs
use release_bot::config::{load_config, Config, CONFIG_FILE_NAME};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[forge]
owner = "example-org"
pacing_ms = 500
remote = "upstream"

[changelog]
compact_components = ["web-ui", "cockpit-composer"]

[chat]
api_url = "http://localhost:9000/api"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.forge.owner, "example-org");
    assert_eq!(config.forge.pacing(), Duration::from_millis(500));
    assert_eq!(config.forge.remote, "upstream");
    assert_eq!(config.forge.api_url, "https://api.github.com");
    assert!(config
        .changelog
        .compact_components
        .contains(&"web-ui".to_string()));
    assert_eq!(config.changelog.post_release_marker, "Post release version bump");
    assert_eq!(config.chat.api_url, "http://localhost:9000/api");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(load_config(Some(path.to_str().unwrap())).is_err());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[forge]\npacing_ms = \"fast\"\n").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path().to_str().unwrap())).is_err());
}

#[test]
#[serial]
fn test_discovers_file_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[forge]\nowner = \"from-cwd\"\n",
    )
    .unwrap();

    let original = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    env::set_current_dir(original).unwrap();

    assert_eq!(result.unwrap().forge.owner, "from-cwd");
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.forge.owner, "osbuild");
    assert_eq!(config.forge.web_url, "https://github.com");
    assert_eq!(config.forge.timeout(), Duration::from_secs(30));
    assert_eq!(config.chat.timeout(), Duration::from_secs(30));
}
