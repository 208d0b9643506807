// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # nuvidya-observability
//!
//! Logging initialisation shared by every Nuvidya binary, with per-crate
//! debug flag support.
//!
//! ## Features
//! - `file-logging`: per-run rolling JSON log files

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "nuvidya",
    "nuvidya-energy",
    "nuvidya-engine",
    "nuvidya-config",
    "nuvidya-observability",
];
