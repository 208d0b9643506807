// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Nuvidya - Seven-Core Energy Field
//!
//! Nuvidya models seven "core" signals (the chakras) as deterministic
//! functions of time, turns a rolling window of their energies into
//! normalized influence weights, and streams both at a fixed cadence.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! nuvidya = "0.1"  # Default: engine + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`engine`** (default): threaded tick loop and update stream
//! - **`observability`** (default): console logging and debug flags
//! - **`file-logging`**: per-run rolling JSON log files
//!
//! ## Usage Examples
//!
//! ### Pure energy evaluation
//!
//! ```rust
//! use nuvidya::prelude::*;
//!
//! let e = energy(Chakra::Root, 0.5, 1.0);
//! assert!((e - 1.0).abs() < 1e-9);
//!
//! let creative = lookup_preset("creative")?;
//! assert_eq!(creative.multipliers[1], 1.8);
//! # Ok::<(), EnergyError>(())
//! ```
//!
//! ### Streaming updates
//!
//! ```rust,no_run
//! use nuvidya::prelude::*;
//!
//! let mut runner = EnergyLoopRunner::for_preset("balanced", &EngineConfig::default())?;
//! let updates = runner.subscribe();
//! runner.start()?;
//!
//! for update in updates.iter().take(10) {
//!     println!("t={:.1} dominant={}", update.t, update.influences.dominant());
//! }
//! runner.stop();
//! # Ok::<(), EngineError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! nuvidya (umbrella)
//! ├── nuvidya-energy         (oscillators, field, influence, presets, analysis)
//! ├── nuvidya-config         (TOML + env + CLI configuration)
//! ├── nuvidya-engine         (simulator step + threaded runner)
//! └── nuvidya-observability  (logging initialisation)
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core types and computation (always available)
pub use nuvidya_energy as energy;

pub use nuvidya_config as config;

#[cfg(feature = "engine")]
pub use nuvidya_engine as engine;

#[cfg(feature = "observability")]
pub use nuvidya_observability as observability;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::energy::{
        biased_influences, compose_prompt, energy, lookup_preset, presets, Chakra, EnergyError,
        EnergyField, EnergyVector, FieldParams, InfluenceAggregator, InfluenceWeights, Preset,
        PresetName, SeriesAnalysis, CHAKRA_COUNT,
    };

    pub use crate::config::{load_config, validate_config, NuvidyaConfig};
    pub use crate::config::{AnalysisConfig, EnergyConfig, EngineConfig, LoggingConfig};

    #[cfg(feature = "engine")]
    pub use crate::engine::{
        EnergyLoopRunner, EnergySimulator, EnergyUpdate, EngineError, UpdatePublisher,
    };
}

/// Version information
pub fn version_info() -> String {
    format!(
        "nuvidya v{} (energy v{}, config v{})",
        VERSION,
        nuvidya_energy::VERSION,
        nuvidya_config::VERSION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert!(info.contains("nuvidya v"));
        assert!(info.contains(VERSION));
    }
}
