// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, NuvidyaConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "nuvidya_configuration.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `NUVIDYA_CONFIG_PATH` environment variable
/// 2. Current working directory: `./nuvidya_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NUVIDYA_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by NUVIDYA_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet NUVIDYA_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NuvidyaConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NuvidyaConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

fn parse_bool(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NUVIDYA_TICK_INTERVAL_MS` -> `engine.tick_interval_ms`
/// - `NUVIDYA_HISTORY_CAPACITY` -> `engine.history_capacity`
/// - `NUVIDYA_DEFAULT_PRESET` -> `engine.default_preset`
/// - `NUVIDYA_CROWN_DECAY` -> `energy.crown_decay`
/// - `NUVIDYA_ANALYSIS_DURATION` -> `analysis.duration_s`
/// - `NUVIDYA_ANALYSIS_SAMPLES` -> `analysis.samples`
/// - `NUVIDYA_LOG_LEVEL` -> `logging.level`
/// - `NUVIDYA_FILE_LOGGING` -> `logging.file_logging`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut NuvidyaConfig) {
    if let Ok(value) = env::var("NUVIDYA_TICK_INTERVAL_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.engine.tick_interval_ms = ms;
        }
    }
    if let Ok(value) = env::var("NUVIDYA_HISTORY_CAPACITY") {
        if let Ok(capacity) = value.parse::<usize>() {
            config.engine.history_capacity = capacity;
        }
    }
    if let Ok(value) = env::var("NUVIDYA_DEFAULT_PRESET") {
        config.engine.default_preset = value;
    }
    if let Ok(value) = env::var("NUVIDYA_CROWN_DECAY") {
        if let Ok(beta) = value.parse::<f64>() {
            config.energy.crown_decay = beta;
        }
    }
    if let Ok(value) = env::var("NUVIDYA_ANALYSIS_DURATION") {
        if let Ok(duration) = value.parse::<f64>() {
            config.analysis.duration_s = duration;
        }
    }
    if let Ok(value) = env::var("NUVIDYA_ANALYSIS_SAMPLES") {
        if let Ok(samples) = value.parse::<usize>() {
            config.analysis.samples = samples;
        }
    }
    if let Ok(value) = env::var("NUVIDYA_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("NUVIDYA_FILE_LOGGING") {
        config.logging.file_logging = parse_bool(&value);
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"preset": "wise", "tick_interval_ms": "50"}`)
pub fn apply_cli_overrides(config: &mut NuvidyaConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("tick_interval_ms") {
        if let Ok(ms) = value.parse::<u64>() {
            config.engine.tick_interval_ms = ms;
        }
    }
    if let Some(value) = cli_args.get("history_capacity") {
        if let Ok(capacity) = value.parse::<usize>() {
            config.engine.history_capacity = capacity;
        }
    }
    if let Some(value) = cli_args.get("preset") {
        config.engine.default_preset = value.clone();
    }
    if let Some(value) = cli_args.get("crown_decay") {
        if let Ok(beta) = value.parse::<f64>() {
            config.energy.crown_decay = beta;
        }
    }
    if let Some(value) = cli_args.get("duration") {
        if let Ok(duration) = value.parse::<f64>() {
            config.analysis.duration_s = duration;
        }
    }
    if let Some(value) = cli_args.get("samples") {
        if let Ok(samples) = value.parse::<usize>() {
            config.analysis.samples = samples;
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("NUVIDYA_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("NUVIDYA_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::set_var("NUVIDYA_CONFIG_PATH", "/definitely/not/here.toml");
        let result = find_config_file();
        env::remove_var("NUVIDYA_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::remove_var("NUVIDYA_TICK_INTERVAL_MS");
        env::remove_var("NUVIDYA_DEFAULT_PRESET");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[engine]").unwrap();
        writeln!(file, "tick_interval_ms = 250").unwrap();
        writeln!(file, "default_preset = \"wise\"").unwrap();
        writeln!(file, "[energy]").unwrap();
        writeln!(file, "crown_decay = 0.75").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.engine.tick_interval_ms, 250);
        assert_eq!(config.engine.default_preset, "wise");
        assert_eq!(config.energy.crown_decay, 0.75);
        assert_eq!(config.engine.history_capacity, 100);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[engine\ntick_interval_ms = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = NuvidyaConfig::default();

        env::set_var("NUVIDYA_TICK_INTERVAL_MS", "40");
        env::set_var("NUVIDYA_HISTORY_CAPACITY", "not-a-number");
        env::set_var("NUVIDYA_FILE_LOGGING", "yes");

        apply_environment_overrides(&mut config);

        env::remove_var("NUVIDYA_TICK_INTERVAL_MS");
        env::remove_var("NUVIDYA_HISTORY_CAPACITY");
        env::remove_var("NUVIDYA_FILE_LOGGING");

        assert_eq!(config.engine.tick_interval_ms, 40);
        assert_eq!(config.engine.history_capacity, 100);
        assert!(config.logging.file_logging);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = NuvidyaConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("preset".to_string(), "creative".to_string());
        cli_args.insert("samples".to_string(), "2000".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.engine.default_preset, "creative");
        assert_eq!(config.analysis.samples, 2000);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[engine]").unwrap();
        writeln!(file, "default_preset = \"grounded\"").unwrap();
        writeln!(file, "tick_interval_ms = 100").unwrap();

        env::set_var("NUVIDYA_DEFAULT_PRESET", "wise");
        env::set_var("NUVIDYA_TICK_INTERVAL_MS", "20");

        let mut cli_args = HashMap::new();
        cli_args.insert("preset".to_string(), "decisive".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("NUVIDYA_DEFAULT_PRESET");
        env::remove_var("NUVIDYA_TICK_INTERVAL_MS");

        // CLI wins for preset, env wins for tick interval (no CLI override)
        assert_eq!(config.engine.default_preset, "decisive");
        assert_eq!(config.engine.tick_interval_ms, 20);
    }
}
