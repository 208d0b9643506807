// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Single-threaded energy scheduler.

One [`EnergySimulator::tick`] evaluates the energy field at `t = tick * dt`,
scales it by the active preset's multipliers and folds it into the influence
window. Simulation time never reads the wall clock, so two simulators built
from the same configuration produce identical update sequences.
*/

use nuvidya_config::{EnergyConfig, EngineConfig, NuvidyaConfig};
use nuvidya_energy::{
    lookup_preset, EnergyField, EnergyVector, FieldParams, InfluenceAggregator, InfluenceWeights,
    Preset, PresetName,
};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{EngineError, Result};

/// One published step of the energy field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyUpdate {
    /// Zero-based tick index
    pub tick: u64,
    /// Simulation time in seconds
    pub t: f64,
    pub preset: PresetName,
    /// Preset-scaled energies
    pub energies: EnergyVector,
    pub influences: InfluenceWeights,
}

pub struct EnergySimulator {
    preset: &'static Preset,
    field: EnergyField,
    aggregator: InfluenceAggregator,
    ticks: u64,
    sample_interval: f64,
}

impl EnergySimulator {
    pub fn new(preset: &'static Preset, engine: &EngineConfig, energy: &EnergyConfig) -> Result<Self> {
        if engine.tick_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "tick_interval_ms must be > 0".to_string(),
            ));
        }
        let sample_interval = engine.sample_interval();

        let params = FieldParams {
            crown_decay: energy.crown_decay,
            heart_offset: energy.heart_offset,
        };
        params.validate()?;

        let aggregator = InfluenceAggregator::new(engine.history_capacity, sample_interval)?;

        debug!(
            "Energy simulator created: preset={}, dt={}s, window={}",
            preset.name, sample_interval, engine.history_capacity
        );

        Ok(Self {
            preset,
            field: EnergyField::with_params(params),
            aggregator,
            ticks: 0,
            sample_interval,
        })
    }

    /// Build from a full configuration, resolving `engine.default_preset`
    pub fn from_config(config: &NuvidyaConfig) -> Result<Self> {
        let preset = lookup_preset(&config.engine.default_preset)?;
        Self::new(preset, &config.engine, &config.energy)
    }

    pub fn preset(&self) -> &'static Preset {
        self.preset
    }

    /// Switch presets without clearing the influence window
    pub fn set_preset(&mut self, preset: &'static Preset) {
        if self.preset.name != preset.name {
            debug!("Preset changed: {} -> {}", self.preset.name, preset.name);
        }
        self.preset = preset;
    }

    /// Number of ticks taken so far
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Time the next [`tick`](Self::tick) will be evaluated at
    pub fn next_time(&self) -> f64 {
        self.ticks as f64 * self.sample_interval
    }

    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    pub fn aggregator(&self) -> &InfluenceAggregator {
        &self.aggregator
    }

    pub fn influences(&self) -> InfluenceWeights {
        self.aggregator.weights()
    }

    /// Advance one fixed step
    pub fn tick(&mut self) -> EnergyUpdate {
        let t = self.next_time();
        self.step(t)
    }

    /// Advance to an explicit time
    ///
    /// Times at or before the previous sample are zero-length steps for the
    /// integrated chakras.
    pub fn tick_at(&mut self, t: f64) -> EnergyUpdate {
        self.step(t)
    }

    /// Clear field state, influence window and tick counter
    pub fn reset(&mut self) {
        self.field.reset();
        self.aggregator.clear();
        self.ticks = 0;
    }

    fn step(&mut self, t: f64) -> EnergyUpdate {
        let raw = self.field.advance(t);
        let energies = raw.scaled(&self.preset.multipliers);
        let influences = self.aggregator.push(energies);

        let tick = self.ticks;
        self.ticks += 1;

        trace!(
            "tick {} t={:.3} dominant={}",
            tick,
            t,
            influences.dominant()
        );

        EnergyUpdate {
            tick,
            t,
            preset: self.preset.name,
            energies,
            influences,
        }
    }
}
