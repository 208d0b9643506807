// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Nuvidya Engine
//!
//! Drives the energy field forward in time:
//! - [`EnergySimulator`]: deterministic single-step scheduler (`t = tick * dt`)
//! - [`EnergyLoopRunner`]: background thread ticking at a fixed cadence and
//!   streaming [`EnergyUpdate`]s to subscribers

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod runner;
pub mod simulator;

pub use error::{EngineError, Result};
pub use runner::{drain_pending, EnergyLoopRunner, UpdatePublisher};
pub use simulator::{EnergySimulator, EnergyUpdate};
