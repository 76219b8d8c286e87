//! Service container and the mapping from configuration to runtime components

use anyhow::Result;
use std::sync::Arc;
use syncscope_config::{CorsConfig, ServerConfig, SyncscopeConfig, UnmatchedOperationSetting};
use syncscope_core::{Classifier, UnmatchedOperation};
use syncscope_logging::{init_logging_from_config, LoggingGuard};
use syncscope_rest_api::{AppConfig, AppContext};
use syncscope_systemd::{JournalctlReader, SystemctlProbe};
use syncscope_web::middleware::CorsConfig as WebCorsConfig;

/// Collaborators shared by every request
#[derive(Clone)]
pub struct ServiceContainer {
    pub journal: Arc<JournalctlReader>,
    pub probe: Arc<SystemctlProbe>,
}

impl ServiceContainer {
    /// Build the systemd adapters for the configured unit
    pub fn new(config: &SyncscopeConfig) -> Self {
        let unit = config.service.unit.clone();

        let journal = JournalctlReader::new(unit.clone())
            .with_program(config.journal.journalctl_path.clone())
            .with_sudo(config.journal.use_sudo)
            .with_max_output_bytes(config.journal.max_output_bytes)
            .with_timeout(config.journal.timeout);

        let probe = SystemctlProbe::new(unit)
            .with_program(config.service.systemctl_path.clone())
            .with_timeout(config.service.timeout);

        tracing::debug!(
            unit = %config.service.unit,
            journalctl = %config.journal.journalctl_path,
            systemctl = %config.service.systemctl_path,
            "Service container created"
        );

        Self {
            journal: Arc::new(journal),
            probe: Arc::new(probe),
        }
    }

    /// Handler state for the dashboard API
    pub fn rest_context(&self, config: &SyncscopeConfig) -> AppContext {
        AppContext::new(self.journal.clone(), self.probe.clone(), config.registry.list_path.clone())
            .with_classifier(Classifier::new(unmatched_operation(
                config.classifier.unmatched_operation,
            )))
            .with_poll_interval(config.broadcast.poll_interval)
            .with_keep_alive(config.broadcast.keep_alive)
    }
}

/// Router options derived from the server section
pub fn rest_app_config(server: &ServerConfig) -> AppConfig {
    AppConfig {
        enable_cors: server.cors.enabled,
        cors: web_cors_config(&server.cors),
        enable_request_id: server.enable_request_id,
        enable_tracing: server.enable_tracing,
        api_prefix: server.api_prefix.clone(),
    }
}

fn web_cors_config(cors: &CorsConfig) -> WebCorsConfig {
    WebCorsConfig {
        allowed_origins: cors.allowed_origins.clone(),
        allowed_methods: cors.allowed_methods.clone(),
        allowed_headers: cors.allowed_headers.clone(),
        allow_credentials: cors.allow_credentials,
        max_age: Some(cors.max_age),
    }
}

pub fn unmatched_operation(setting: UnmatchedOperationSetting) -> UnmatchedOperation {
    match setting {
        UnmatchedOperationSetting::Pull => UnmatchedOperation::Pull,
        UnmatchedOperationSetting::Unknown => UnmatchedOperation::Unknown,
    }
}

/// Initialize logging from the loaded configuration.
///
/// The returned guard flushes the file sink when dropped.
pub fn init_logging(config: &SyncscopeConfig) -> Result<LoggingGuard> {
    init_logging_from_config(&config.logging)
}
