// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for Nuvidya binaries
//!
//! Console logging is always available. With the `file-logging` feature,
//! each process run also gets its own timestamped folder of JSON logs.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::{NaiveDateTime, Utc};
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Initialize human-readable console logging on stderr
///
/// `default_level` applies to every target without a debug flag.
/// Fails if a global subscriber is already installed.
pub fn init_console_logging(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(debug_flags.to_filter_string_with_default(default_level))
        .map_err(|e| anyhow!("Invalid log filter: {}", e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install console logger: {}", e))
}

#[cfg(feature = "file-logging")]
pub use file::*;

#[cfg(feature = "file-logging")]
mod file {
    use super::*;

    use anyhow::Context;
    use tracing_appender::rolling;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{Layer, Registry};

    /// Logging initialization result
    ///
    /// Dropping the guard flushes and closes the file writers.
    pub struct LoggingGuard {
        _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
        log_dir: PathBuf,
    }

    impl LoggingGuard {
        /// Run folder the logs are written to
        pub fn log_dir(&self) -> &Path {
            &self.log_dir
        }
    }

    /// Initialize console logging plus per-run JSON log files
    ///
    /// Creates:
    /// ```text
    /// ./logs/
    ///   └── run_20250101_120000/
    ///       ├── nuvidya-engine.log
    ///       ├── nuvidya-energy.log
    ///       └── nuvidya.log (combined)
    /// ```
    pub fn init_logging(
        debug_flags: &CrateDebugFlags,
        default_level: &str,
        log_dir: Option<PathBuf>,
        retention_days: Option<u64>,
        retention_runs: Option<usize>,
    ) -> Result<LoggingGuard> {
        let base_log_dir = log_dir.unwrap_or_else(|| PathBuf::from("./logs"));

        let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
        let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
        std::fs::create_dir_all(&run_folder).with_context(|| {
            format!("Failed to create log directory: {}", run_folder.display())
        })?;

        cleanup_old_logs(&base_log_dir, retention_days, retention_runs)?;

        let filter = debug_flags.to_filter_string_with_default(default_level);
        let env_filter =
            EnvFilter::try_new(&filter).map_err(|e| anyhow!("Invalid log filter: {}", e))?;

        let mut layers = Vec::new();
        let mut file_guards = Vec::new();

        layers.push(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(env_filter)
                .boxed(),
        );

        for crate_name in crate::KNOWN_CRATES {
            let file_appender = rolling::daily(&run_folder, format!("{}.log", crate_name));
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            file_guards.push(guard);

            let target = crate_name.replace('-', "_");
            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_filter(EnvFilter::new(format!("off,{}=debug", target)))
                    .boxed(),
            );
        }

        let combined_appender = rolling::daily(&run_folder, "nuvidya.log");
        let (combined_non_blocking, combined_guard) =
            tracing_appender::non_blocking(combined_appender);
        file_guards.push(combined_guard);

        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(combined_non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(EnvFilter::new(&filter))
                .boxed(),
        );

        Registry::default()
            .with(layers)
            .try_init()
            .map_err(|e| anyhow!("Failed to install file logger: {}", e))?;

        Ok(LoggingGuard {
            _file_guards: file_guards,
            log_dir: run_folder,
        })
    }
}

/// Remove old `run_*` log folders
///
/// Folders older than `retention_days` (default 30) are removed first, then
/// the oldest remaining folders until at most `retention_runs` (default 10)
/// are left. Folders whose names do not parse as a run timestamp are left alone.
/// Returns the number of folders removed.
pub fn cleanup_old_logs(
    base_log_dir: &Path,
    retention_days: Option<u64>,
    retention_runs: Option<usize>,
) -> Result<usize> {
    if !base_log_dir.exists() {
        return Ok(0);
    }

    let retention_days = retention_days.unwrap_or(30);
    let retention_runs = retention_runs.unwrap_or(10);
    let cutoff = Utc::now().naive_utc() - chrono::Duration::days(retention_days as i64);

    let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let stamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
            .and_then(|s| NaiveDateTime::parse_from_str(s, RUN_TIMESTAMP_FORMAT).ok());
        if let Some(dt) = stamp {
            runs.push((path, dt));
        }
    }

    // oldest first
    runs.sort_by_key(|(_, dt)| *dt);

    let expired = runs.iter().take_while(|(_, dt)| *dt < cutoff).count();
    let over_limit = (runs.len() - expired).saturating_sub(retention_runs);

    let mut removed = 0;
    for (path, _) in runs.iter().take(expired + over_limit) {
        match std::fs::remove_dir_all(path) {
            Ok(()) => removed += 1,
            Err(e) => eprintln!(
                "Warning: Failed to remove old log directory {}: {}",
                path.display(),
                e
            ),
        }
    }

    Ok(removed)
}
