// Configuration loading tests

use anyhow::Result;
use live_translate::{Config, LateResultPolicy};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_defaults_without_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("missing");

    let cfg = Config::load(path.to_str().unwrap())?;

    assert_eq!(cfg.service.http.port, 5000);
    assert_eq!(cfg.service.http.bind, "0.0.0.0");
    assert!(cfg.service.static_dir.is_none());
    assert_eq!(cfg.capture.silence_timeout_ms, 2000);
    assert_eq!(cfg.capture.default_source, "en-US");
    assert_eq!(cfg.capture.default_target, "hi");
    assert_eq!(cfg.capture.late_result_policy, LateResultPolicy::ViewOnly);
    Ok(())
}

#[test]
fn test_file_overrides_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("live-translate.toml");
    fs::write(
        &path,
        r#"
[service]
name = "relay-test"
static_dir = "public"

[service.http]
bind = "127.0.0.1"
port = 8080

[capture]
silence_timeout_ms = 1500
late_result_policy = "apply"
"#,
    )?;

    let cfg = Config::load(path.with_extension("").to_str().unwrap())?;

    assert_eq!(cfg.service.name, "relay-test");
    assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
    assert_eq!(cfg.service.static_dir.as_deref(), Some("public"));

    let capture = cfg.capture.to_capture_config();
    assert_eq!(capture.silence_timeout, Duration::from_millis(1500));
    assert_eq!(capture.late_result_policy, LateResultPolicy::Apply);
    assert_eq!(capture.fallback_locale, "en-US");
    Ok(())
}
