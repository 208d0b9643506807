// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `nuvidya_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NuvidyaConfig {
    pub engine: EngineConfig,
    pub energy: EnergyConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

/// Tick loop configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Interval between ticks; also the sample spacing fed to the aggregator
    pub tick_interval_ms: u64,
    /// Samples retained in the influence window
    pub history_capacity: usize,
    /// Preset selected when none is requested
    pub default_preset: String,
    /// Per-subscriber queue bound; 0 = unbounded
    pub subscriber_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            history_capacity: 100,
            default_preset: "balanced".to_string(),
            subscriber_buffer: 64,
        }
    }
}

impl EngineConfig {
    /// Tick interval in seconds
    pub fn sample_interval(&self) -> f64 {
        self.tick_interval_ms as f64 / 1000.0
    }
}

/// Integrated chakra constants
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub crown_decay: f64,
    pub heart_offset: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            crown_decay: 0.5,
            heart_offset: 0.1,
        }
    }
}

/// Offline series analysis window
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub duration_s: f64,
    pub samples: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            duration_s: 10.0,
            samples: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Write rolling JSON log files in addition to the console
    pub file_logging: bool,
    pub log_dir: PathBuf,
    pub retention_days: u64,
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
            log_dir: PathBuf::from("./logs"),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}
