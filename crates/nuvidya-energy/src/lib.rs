// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Nuvidya Energy Computation
//!
//! All chakra energy computation in one place:
//! - **Types**: [`Chakra`], [`EnergyVector`], [`InfluenceWeights`], [`EnergyError`]
//! - **Oscillators**: closed-form energy functions and the pure [`energy`] entry point
//! - **Field**: streaming integrator for the history-dependent chakras
//! - **Influence**: rolling-window trapezoidal aggregation
//! - **Presets**: named sensitivity tables
//! - **Analysis**: whole-window series evaluation
//!
//! Time is always an explicit argument; nothing in this crate reads a clock.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod analysis;
pub mod field;
pub mod influence;
pub mod oscillators;
pub mod presets;
pub mod prompt;
pub mod types;

pub use analysis::{SeriesAnalysis, SummaryRow, MAX_SAMPLES};
pub use field::{EnergyField, FieldParams};
pub use influence::{InfluenceAggregator, DEFAULT_HISTORY_CAPACITY};
pub use oscillators::{energy, DEFAULT_SAMPLE_INTERVAL};
pub use presets::{biased_influences, lookup_preset, presets, Preset, PresetName};
pub use prompt::{compose_prompt, prompt_context};
pub use types::{
    Chakra, ChakraInfo, EnergyError, EnergyVector, InfluenceWeights, Result, CHAKRA_COUNT,
};
