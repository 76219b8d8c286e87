use syncscope_config::domains::logging::{LogFormat, LoggingConfig};
use syncscope_logging::init_logging_from_config;

#[test]
fn test_repeated_initialization_is_harmless() {
    let config = LoggingConfig {
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };

    let guard = init_logging_from_config(&config).unwrap();
    assert!(!guard.has_file_sink());

    // A second subscriber cannot be installed, but the call should not fail
    let _second = init_logging_from_config(&config).unwrap();

    tracing::info!(target: "syncscope", "logging initialized");
}
