//! Loading `ClientConfig` from TOML files on disk.

use auditline_client::{load_config, Client, ClientError, ConfigError};
use std::io::Write;

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("absent.toml");

    let config = load_config(path.to_str()).unwrap();
    assert_eq!(config.page_size, 1000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn no_path_uses_defaults() {
    let config = load_config(None).unwrap();
    assert_eq!(config.api_version, "v1");
}

#[test]
fn reads_settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
endpoint = "https://audit.internal"
project_id = "proj-42"
component = "Web Dashboard"
page_size = 250

[logging]
level = "auditline_query=debug,info"
json = true
"#
    )
    .unwrap();

    let config = load_config(file.path().to_str()).unwrap();
    assert_eq!(config.endpoint, "https://audit.internal");
    assert_eq!(config.project_id, "proj-42");
    assert_eq!(config.component, "Web Dashboard");
    assert_eq!(config.page_size, 250);
    assert_eq!(config.logging.level, "auditline_query=debug,info");
    assert!(config.logging.json);

    let client = Client::new(config, ()).unwrap();
    assert_eq!(client.config().project_id, "proj-42");
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "page_size = \"many\"").unwrap();

    let err = load_config(file.path().to_str()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_page_size_fails_client_construction() {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "project_id = \"proj-1\"\npage_size = 0").unwrap();

    let config = load_config(file.path().to_str()).unwrap();
    let err = Client::new(config, ()).unwrap_err();
    assert!(matches!(err, ClientError::Config(ConfigError::Invalid(_))));
}
