// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Ensures configuration values are within valid ranges before any engine is
//! built from them. Preset names are only checked for presence here; the
//! energy crate owns the enumerated set.

use crate::{ConfigError, ConfigResult, NuvidyaConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Upper bound on `analysis.samples`; the report buffers seven rows of this length
pub const MAX_ANALYSIS_SAMPLES: usize = 10_000_000;

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation found
pub fn validate_config(config: &NuvidyaConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_required_fields(config, &mut errors);
    validate_value_ranges(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_required_fields(config: &NuvidyaConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.engine.default_preset.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "engine.default_preset".to_string(),
        });
    }
    if config.logging.file_logging && config.logging.log_dir.as_os_str().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "logging.log_dir".to_string(),
        });
    }
}

fn invalid(errors: &mut Vec<ConfigValidationError>, field: &str, reason: &str) {
    errors.push(ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    });
}

fn validate_value_ranges(config: &NuvidyaConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.engine.tick_interval_ms == 0 || config.engine.tick_interval_ms > 60_000 {
        invalid(errors, "engine.tick_interval_ms", "must be between 1 and 60000");
    }
    if config.engine.history_capacity < 2 {
        invalid(errors, "engine.history_capacity", "must be at least 2");
    }
    if !config.energy.crown_decay.is_finite() || config.energy.crown_decay < 0.0 {
        invalid(errors, "energy.crown_decay", "must be finite and non-negative");
    }
    if !config.energy.heart_offset.is_finite() || config.energy.heart_offset <= 0.0 {
        invalid(errors, "energy.heart_offset", "must be finite and positive");
    }
    if !config.analysis.duration_s.is_finite() || config.analysis.duration_s <= 0.0 {
        invalid(errors, "analysis.duration_s", "must be finite and positive");
    }
    if config.analysis.samples < 2 || config.analysis.samples > MAX_ANALYSIS_SAMPLES {
        invalid(errors, "analysis.samples", "must be between 2 and 10000000");
    }
    if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        invalid(
            errors,
            "logging.level",
            "must be one of trace, debug, info, warn, error",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&NuvidyaConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_tick_interval() {
        let mut config = NuvidyaConfig::default();
        config.engine.tick_interval_ms = 0;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError(ref msg)) if msg.contains("engine.tick_interval_ms")
        ));
    }

    #[test]
    fn test_collects_every_violation() {
        let mut config = NuvidyaConfig::default();
        config.engine.history_capacity = 1;
        config.energy.heart_offset = 0.0;
        config.logging.level = "loud".to_string();

        match validate_config(&config) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("engine.history_capacity"));
                assert!(msg.contains("energy.heart_offset"));
                assert!(msg.contains("logging.level"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_analysis_samples_bounds() {
        let mut config = NuvidyaConfig::default();
        config.analysis.samples = MAX_ANALYSIS_SAMPLES;
        assert!(validate_config(&config).is_ok());

        for samples in [1, MAX_ANALYSIS_SAMPLES + 1, usize::MAX] {
            config.analysis.samples = samples;
            match validate_config(&config) {
                Err(ConfigError::ValidationError(msg)) => {
                    assert!(msg.contains("Invalid configuration value for analysis.samples"))
                }
                other => panic!("samples={} accepted: {:?}", samples, other),
            }
        }
    }

    #[test]
    fn test_missing_preset() {
        let mut config = NuvidyaConfig::default();
        config.engine.default_preset = "  ".to_string();

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError(ref msg)) if msg.contains("engine.default_preset")
        ));
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = NuvidyaConfig::default();
        config.logging.level = "WARN".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
