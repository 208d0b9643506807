// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Influence aggregation over a bounded energy history.
//!
//! Semantics:
//! - Bounded: at most `capacity` samples are kept, oldest dropped first.
//! - Fixed interval: every sample is assumed to be `sample_interval` apart.
//! - Trapezoidal: `W_k = Σ (|E_k[i-1]| + |E_k[i]|) · Δt / 2` over the window.
//! - Total: a zero, negative or non-finite total yields uniform weights.

use std::collections::VecDeque;

use crate::types::{EnergyError, EnergyVector, InfluenceWeights, Result, CHAKRA_COUNT};

/// Default number of retained samples
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Rolling-window integrator producing [`InfluenceWeights`].
#[derive(Debug, Clone)]
pub struct InfluenceAggregator {
    history: VecDeque<EnergyVector>, // oldest -> newest
    capacity: usize,
    sample_interval: f64,
    weights: InfluenceWeights,
}

impl InfluenceAggregator {
    /// Create an aggregator keeping `capacity` samples spaced `sample_interval` seconds apart.
    pub fn new(capacity: usize, sample_interval: f64) -> Result<Self> {
        if capacity < 2 {
            return Err(EnergyError::InvalidHistoryCapacity(capacity));
        }
        if !sample_interval.is_finite() || sample_interval <= 0.0 {
            return Err(EnergyError::InvalidSampleInterval(sample_interval));
        }
        Ok(Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            sample_interval,
            weights: InfluenceWeights::uniform(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Weights computed on the last push (uniform before any sample)
    pub fn weights(&self) -> InfluenceWeights {
        self.weights
    }

    /// Iterate retained samples, oldest first
    pub fn history(&self) -> impl Iterator<Item = &EnergyVector> {
        self.history.iter()
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.weights = InfluenceWeights::uniform();
    }

    /// Append a sample, evicting the oldest when full, and recompute weights.
    pub fn push(&mut self, sample: EnergyVector) -> InfluenceWeights {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(sample);
        self.weights = InfluenceWeights::normalize(&self.integrated());
        self.weights
    }

    /// Push every sample in order and return the final weights.
    pub fn seed<I>(&mut self, samples: I) -> InfluenceWeights
    where
        I: IntoIterator<Item = EnergyVector>,
    {
        for sample in samples {
            self.push(sample);
        }
        self.weights
    }

    /// Raw trapezoidal integrals `W_k` of `|E_k|` across the window.
    pub fn integrated(&self) -> [f64; CHAKRA_COUNT] {
        let mut totals = [0.0; CHAKRA_COUNT];
        let half_dt = self.sample_interval / 2.0;
        for (prev, next) in self.history.iter().zip(self.history.iter().skip(1)) {
            for (k, total) in totals.iter_mut().enumerate() {
                *total += (prev.0[k].abs() + next.0[k].abs()) * half_dt;
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chakra;

    fn aggregator() -> InfluenceAggregator {
        InfluenceAggregator::new(DEFAULT_HISTORY_CAPACITY, 0.1).unwrap()
    }

    #[test]
    fn test_rejects_bad_construction() {
        assert_eq!(
            InfluenceAggregator::new(1, 0.1).unwrap_err(),
            EnergyError::InvalidHistoryCapacity(1)
        );
        assert!(matches!(
            InfluenceAggregator::new(10, 0.0),
            Err(EnergyError::InvalidSampleInterval(_))
        ));
    }

    #[test]
    fn test_empty_and_single_sample_are_uniform() {
        let mut agg = aggregator();
        assert_eq!(agg.weights(), InfluenceWeights::uniform());
        let w = agg.push(EnergyVector::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
        // one sample spans no interval
        assert_eq!(w, InfluenceWeights::uniform());
    }

    #[test]
    fn test_all_zero_history_is_exactly_uniform() {
        let mut agg = aggregator();
        let w = agg.seed(std::iter::repeat(EnergyVector::ZERO).take(25));
        assert_eq!(w.as_array(), &[1.0 / 7.0; 7]);
    }

    #[test]
    fn test_single_active_chakra_takes_all_influence() {
        let mut agg = aggregator();
        let sample = EnergyVector::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let w = agg.seed(std::iter::repeat(sample).take(10));
        assert!((w[Chakra::Root] - 1.0).abs() < 1e-12);
        for chakra in &Chakra::ALL[1..] {
            assert!(w[*chakra].abs() < 1e-12);
        }
        assert!((agg.integrated()[0] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut agg = InfluenceAggregator::new(5, 0.1).unwrap();
        for i in 0..20 {
            agg.push(EnergyVector::new([i as f64; 7]));
        }
        assert_eq!(agg.len(), 5);
        assert_eq!(agg.history().next().unwrap().0[0], 15.0);
    }

    #[test]
    fn test_old_energy_leaves_the_window() {
        let mut agg = InfluenceAggregator::new(4, 0.1).unwrap();
        agg.seed(std::iter::repeat(EnergyVector::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])).take(4));
        let w = agg.seed(
            std::iter::repeat(EnergyVector::new([0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0])).take(4),
        );
        assert!((w[Chakra::Solar] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_energy_counts_by_magnitude() {
        let mut agg = aggregator();
        let w = agg.seed(
            std::iter::repeat(EnergyVector::new([-1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0])).take(3),
        );
        assert!((w[Chakra::Root] - 0.5).abs() < 1e-12);
        assert!((w[Chakra::Sacral] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_nan_sample_falls_back_to_uniform() {
        let mut agg = aggregator();
        agg.push(EnergyVector::new([1.0; 7]));
        let w = agg.push(EnergyVector::new([f64::NAN, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]));
        assert_eq!(w, InfluenceWeights::uniform());
    }

    #[test]
    fn test_clear_resets_weights() {
        let mut agg = aggregator();
        agg.seed(std::iter::repeat(EnergyVector::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])).take(3));
        agg.clear();
        assert!(agg.is_empty());
        assert_eq!(agg.weights(), InfluenceWeights::uniform());
    }
}
