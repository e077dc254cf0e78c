//! Configuration validation with aggregated errors.
//! Every problem is collected so one start-up attempt reports all of them.

use std::path::Path;

use tracing::{error, info};

use crate::config::secret_store::SecretStoreConfig;
use crate::config::settings::{ServiceConfig, SettingsConfig};
use crate::observability::metrics::get_metrics;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_secret_store(&cfg.secret_store, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        get_metrics().await.config_validation_errors.inc();
        Err(errors)
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.server.host.is_empty() {
        errors.push("settings.server.host must not be empty".to_string());
    }
    if settings.server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' must be a valid port number",
            settings.server.port
        ));
    }

    if !settings.invocation.path.starts_with('/') {
        errors.push(format!(
            "settings.invocation.path '{}' must start with '/'",
            settings.invocation.path
        ));
    }
    if settings.invocation.timeout_ms == Some(0) {
        errors.push("settings.invocation.timeout_ms must be greater than 0".to_string());
    }

    if settings.metrics.is_enabled {
        if !settings.metrics.path.starts_with('/') {
            errors.push(format!(
                "settings.metrics.path '{}' must start with '/'",
                settings.metrics.path
            ));
        }
        if settings.metrics.path == settings.invocation.path {
            errors.push(format!(
                "settings.metrics.path and settings.invocation.path both use '{}'",
                settings.metrics.path
            ));
        }
    }

    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of {}",
                logging.level,
                LOG_LEVELS.join(", ")
            ));
        }
    }
}

/// SECRET STORE VALIDATION
fn validate_secret_store(store: &SecretStoreConfig, errors: &mut Vec<String>) {
    match store {
        SecretStoreConfig::SecretsExtension {
            endpoint,
            version_stage,
            ..
        } => {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                errors.push(format!(
                    "secret_store.endpoint '{}' must be an http(s) URL",
                    endpoint
                ));
            }
            if version_stage.as_deref() == Some("") {
                errors.push("secret_store.version_stage must not be empty".to_string());
            }
        }
        SecretStoreConfig::File { dir } => {
            if !Path::new(dir).is_absolute() {
                errors.push(format!(
                    "secret_store.dir '{}' must be an absolute path, relative paths are not allowed",
                    dir
                ));
            }
        }
    }
}
