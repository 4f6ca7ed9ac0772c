use showip_domain::{LogFormat, LoggingConfig};
use showip_infrastructure::logging::{build_filter, init_logging};

#[test]
fn test_init_logging_installs_once() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Text,
    };

    assert!(init_logging(&config));
    assert!(!init_logging(&config));
}

#[test]
fn test_invalid_level_falls_back() {
    let config = LoggingConfig {
        level: "showip=[".to_string(),
        format: LogFormat::Json,
    };

    let filter = build_filter(&config);

    assert!(!filter.to_string().is_empty());
}
