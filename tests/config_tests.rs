use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use token_risk_engine::{config::Settings, AppError};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings.scoring.staleness_window_minutes, 60);
    assert_eq!(settings.scoring.battle_tested_max_score, 25);
    assert!(settings.ai_service.url.is_none());
}

#[test]
fn test_file_overrides_defaults() {
    let file = config_file(
        r#"
[scoring]
staleness_window_minutes = 15
battle_tested_discount = 0.4

[ai_service]
url = "http://localhost:8001"
timeout_seconds = 3
"#,
    );

    let settings = Settings::load_from(file.path()).unwrap();
    assert_eq!(settings.scoring.staleness_window_minutes, 15);
    assert_eq!(settings.ai_service.url.as_deref(), Some("http://localhost:8001"));
    assert_eq!(settings.ai_service.timeout(), Duration::from_secs(3));

    let engine_config = settings.to_engine_config();
    assert_eq!(engine_config.staleness_window_minutes, 15);
    assert!((engine_config.battle_tested.discount - 0.4).abs() < f64::EPSILON);
}

#[test]
fn test_invalid_url_is_rejected() {
    let file = config_file(
        r#"
[ai_service]
url = "not a url"
"#,
    );

    let err = Settings::load_from(file.path()).unwrap_err();
    assert!(matches!(err, AppError::ConfigError(_)));
}

#[test]
fn test_environment_overrides_file() {
    std::env::set_var("TOKEN_RISK__AI_SERVICE__RESET_TIMEOUT_SECONDS", "7");
    let file = config_file(
        r#"
[ai_service]
reset_timeout_seconds = 30
"#,
    );

    let settings = Settings::load_from(file.path()).unwrap();
    std::env::remove_var("TOKEN_RISK__AI_SERVICE__RESET_TIMEOUT_SECONDS");
    assert_eq!(settings.ai_service.reset_timeout_seconds, 7);
}
