// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Seven-slot vectors indexed by [`Chakra`]

use core::ops::Index;
use serde::{Deserialize, Serialize};

use super::chakra::{Chakra, CHAKRA_COUNT};

/// Variance (around 1/7) below which a weight vector counts as resonating
pub const RESONANCE_VARIANCE_THRESHOLD: f64 = 0.01;

/// Instantaneous energy of every chakra at one sample time
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyVector(pub [f64; CHAKRA_COUNT]);

impl EnergyVector {
    pub const ZERO: EnergyVector = EnergyVector([0.0; CHAKRA_COUNT]);

    pub fn new(values: [f64; CHAKRA_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_array(&self) -> &[f64; CHAKRA_COUNT] {
        &self.0
    }

    pub fn get(&self, chakra: Chakra) -> f64 {
        self.0[chakra.index()]
    }

    /// Element-wise scaling by per-chakra multipliers
    pub fn scaled(&self, multipliers: &[f64; CHAKRA_COUNT]) -> Self {
        let mut out = self.0;
        for (value, m) in out.iter_mut().zip(multipliers) {
            *value *= m;
        }
        Self(out)
    }

    /// Sum of absolute energies
    pub fn magnitude(&self) -> f64 {
        self.0.iter().map(|e| e.abs()).sum()
    }
}

impl Index<Chakra> for EnergyVector {
    type Output = f64;

    fn index(&self, chakra: Chakra) -> &f64 {
        &self.0[chakra.index()]
    }
}

impl From<[f64; CHAKRA_COUNT]> for EnergyVector {
    fn from(values: [f64; CHAKRA_COUNT]) -> Self {
        Self(values)
    }
}

/// Normalized influence share of each chakra (non-negative, sums to 1)
///
/// Serialized as a plain array. Deserialized arrays go through
/// [`InfluenceWeights::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; CHAKRA_COUNT]", into = "[f64; CHAKRA_COUNT]")]
pub struct InfluenceWeights([f64; CHAKRA_COUNT]);

impl From<[f64; CHAKRA_COUNT]> for InfluenceWeights {
    fn from(raw: [f64; CHAKRA_COUNT]) -> Self {
        Self::normalize(&raw)
    }
}

impl From<InfluenceWeights> for [f64; CHAKRA_COUNT] {
    fn from(weights: InfluenceWeights) -> Self {
        weights.0
    }
}

impl InfluenceWeights {
    /// `[1/7; 7]`
    pub fn uniform() -> Self {
        Self([1.0 / CHAKRA_COUNT as f64; CHAKRA_COUNT])
    }

    /// Normalize raw integrated weights.
    ///
    /// Falls back to [`InfluenceWeights::uniform`] when the total is zero, negative,
    /// or not finite, so the result always sums to 1.
    pub fn normalize(raw: &[f64; CHAKRA_COUNT]) -> Self {
        let total: f64 = raw.iter().sum();
        if !total.is_finite() || total <= 0.0 || raw.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Self::uniform();
        }
        let mut out = [0.0; CHAKRA_COUNT];
        for (slot, w) in out.iter_mut().zip(raw) {
            *slot = w / total;
        }
        Self(out)
    }

    pub fn as_array(&self) -> &[f64; CHAKRA_COUNT] {
        &self.0
    }

    pub fn get(&self, chakra: Chakra) -> f64 {
        self.0[chakra.index()]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Chakras ordered by descending weight; ties keep index order.
    pub fn ranked(&self) -> Vec<(Chakra, f64)> {
        let mut ranked: Vec<(Chakra, f64)> = Chakra::ALL
            .iter()
            .map(|&chakra| (chakra, self.get(chakra)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    pub fn top(&self, n: usize) -> Vec<(Chakra, f64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    pub fn dominant(&self) -> Chakra {
        self.ranked()[0].0
    }

    pub fn variance_from_uniform(&self) -> f64 {
        let mean = 1.0 / CHAKRA_COUNT as f64;
        self.0.iter().map(|w| (w - mean).powi(2)).sum::<f64>() / CHAKRA_COUNT as f64
    }

    pub fn is_resonating(&self) -> bool {
        self.variance_from_uniform() < RESONANCE_VARIANCE_THRESHOLD
    }
}

impl Default for InfluenceWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

impl Index<Chakra> for InfluenceWeights {
    type Output = f64;

    fn index(&self, chakra: Chakra) -> &f64 {
        &self.0[chakra.index()]
    }
}
