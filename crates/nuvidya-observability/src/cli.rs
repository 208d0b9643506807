// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-nuvidya-engine`, `--debug-nuvidya-energy`, etc.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use nuvidya_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-nuvidya-engine".to_string()]);
/// assert!(flags.is_enabled("nuvidya-engine"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();

        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
                continue;
            }
            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enabled_crates.insert(crate_name.to_string(), true);
            }
        }

        flags
    }

    fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enabled_crates.insert(crate_name.to_string(), true);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    /// Get all enabled crates
    pub fn enabled_crates(&self) -> Vec<&String> {
        self.enabled_crates.keys().collect()
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `DEBUG` for enabled crates, `INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create a tracing filter from debug flags with `info` as the fallback level
    pub fn to_filter_string(&self) -> String {
        self.to_filter_string_with_default("info")
    }

    /// Create a tracing filter from debug flags
    ///
    /// Crate names are converted to their target form (`nuvidya-engine` ->
    /// `nuvidya_engine`). Format: `"nuvidya_engine=debug,warn"`.
    pub fn to_filter_string_with_default(&self, default_level: &str) -> String {
        let mut names: Vec<&String> = self.enabled_crates.keys().collect();
        names.sort();

        let mut filters: Vec<String> = names
            .into_iter()
            .map(|crate_name| format!("{}=debug", crate_name.replace('-', "_")))
            .collect();
        filters.push(default_level.to_lowercase());
        filters.join(",")
    }
}

/// Parse debug flags from command-line arguments and the `NUVIDYA_DEBUG` environment variable
///
/// Environment variable format: comma-separated crate names, or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(env_var) = env::var("NUVIDYA_DEBUG") {
        apply_debug_env(&mut flags, &env_var);
    }

    flags
}

fn apply_debug_env(flags: &mut CrateDebugFlags, value: &str) {
    if value == "all" {
        flags.enable_all();
        return;
    }
    for crate_name in value.split(',') {
        let crate_name = crate_name.trim();
        if !crate_name.is_empty() {
            flags.enabled_crates.insert(crate_name.to_string(), true);
        }
    }
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  NUVIDYA_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  NUVIDYA_DEBUG=all                              Enable debug for all crates
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-nuvidya-engine".to_string()]);
        assert!(flags.is_enabled("nuvidya-engine"));
        assert!(!flags.is_enabled("nuvidya-energy"));
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_filter_string_uses_target_names() {
        let flags = CrateDebugFlags::from_args(vec![
            "--debug-nuvidya-engine".to_string(),
            "--preset".to_string(),
        ]);
        assert_eq!(flags.to_filter_string(), "nuvidya_engine=debug,info");
        assert_eq!(
            flags.to_filter_string_with_default("WARN"),
            "nuvidya_engine=debug,warn"
        );
    }

    #[test]
    fn test_empty_flags_filter() {
        let flags = CrateDebugFlags::default();
        assert!(!flags.any_enabled());
        assert_eq!(flags.to_filter_string(), "info");
    }

    #[test]
    fn test_log_level() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-nuvidya-energy".to_string()]);
        assert_eq!(flags.log_level("nuvidya-energy"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("nuvidya-engine"), tracing::Level::INFO);
    }

    #[test]
    fn test_env_value_parsing() {
        let mut flags = CrateDebugFlags::default();
        apply_debug_env(&mut flags, "nuvidya-config, nuvidya-energy,");
        assert!(flags.is_enabled("nuvidya-config"));
        assert!(flags.is_enabled("nuvidya-energy"));
        assert_eq!(flags.enabled_crates().len(), 2);

        let mut all = CrateDebugFlags::default();
        apply_debug_env(&mut all, "all");
        assert_eq!(all.enabled_crates().len(), KNOWN_CRATES.len());
    }
}
