// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Offline Series Analysis
//!
//! Evaluates all seven chakras over a uniform time grid in one pass and
//! integrates their influence over the whole window.
//!
//! Unlike the streaming [`crate::field::EnergyField`], the derived terms use
//! whole-series numerics:
//! - Heart: cumulative sum of `|E1|+|E2|` times `dt`, over `t + offset`
//! - Throat: central-difference gradient of Heart (one-sided at the edges)
//! - Crown: causal exponential convolution of Third Eye
//! - Weights: trapezoidal integral of `|E_k|` over the grid

use ndarray::{Array1, Array2, ArrayView1};
use serde::Serialize;
use tracing::debug;

use crate::field::FieldParams;
use crate::oscillators::{self, modulation};
use crate::types::{Chakra, EnergyError, InfluenceWeights, Result, CHAKRA_COUNT};

/// One row of the influence summary
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub chakra: Chakra,
    pub name: &'static str,
    pub influence_percent: f64,
    pub integrated_energy: f64,
}

/// Largest window [`SeriesAnalysis::compute`] will allocate
pub const MAX_SAMPLES: usize = 10_000_000;

#[derive(Debug, Clone)]
pub struct SeriesAnalysis {
    times: Array1<f64>,
    /// Shape `(7, samples)`, one row per chakra
    series: Array2<f64>,
    weights: [f64; CHAKRA_COUNT],
    influences: InfluenceWeights,
}

impl SeriesAnalysis {
    /// Analyse `samples` points on `[0, duration]`.
    ///
    /// # Errors
    ///
    /// [`EnergyError::InvalidAnalysis`] when `samples` is outside
    /// `2..=MAX_SAMPLES`, `duration` is not a positive finite number, or
    /// `params` fail validation.
    pub fn compute(duration: f64, samples: usize, params: FieldParams) -> Result<Self> {
        if samples < 2 {
            return Err(EnergyError::InvalidAnalysis(format!(
                "need at least 2 samples, got {samples}"
            )));
        }
        if samples > MAX_SAMPLES {
            return Err(EnergyError::InvalidAnalysis(format!(
                "at most {MAX_SAMPLES} samples, got {samples}"
            )));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(EnergyError::InvalidAnalysis(format!(
                "duration must be finite and > 0, got {duration}"
            )));
        }
        params.validate()?;

        let times = Array1::linspace(0.0, duration, samples);
        let dt = times[1] - times[0];
        let mut series = Array2::<f64>::zeros((CHAKRA_COUNT, samples));

        for (i, &t) in times.iter().enumerate() {
            let sacral = oscillators::sacral(t);
            let solar = oscillators::solar(t);
            series[[Chakra::Root.index(), i]] = oscillators::root(t);
            series[[Chakra::Sacral.index(), i]] = sacral;
            series[[Chakra::Solar.index(), i]] = solar;
            series[[Chakra::ThirdEye.index(), i]] = oscillators::third_eye_from(sacral, solar, t);
        }

        // Heart: running integral over elapsed time
        let mut integral = 0.0;
        for (i, &t) in times.iter().enumerate() {
            integral += (series[[Chakra::Sacral.index(), i]].abs()
                + series[[Chakra::Solar.index(), i]].abs())
                * dt;
            series[[Chakra::Heart.index(), i]] =
                integral / (t + params.heart_offset) * modulation(1.2, t);
        }

        // Throat: gradient of Heart
        let gradient = central_gradient(series.row(Chakra::Heart.index()), dt);
        for (i, &t) in times.iter().enumerate() {
            series[[Chakra::Throat.index(), i]] = gradient[i] * modulation(1.5, t);
        }

        // Crown: causal convolution with β·e^(−β·Δ)
        let beta = params.crown_decay;
        let decay = (-beta * dt).exp();
        let mut carry = 0.0;
        for (i, &t) in times.iter().enumerate() {
            carry = carry * decay + beta * series[[Chakra::ThirdEye.index(), i]] * dt;
            series[[Chakra::Crown.index(), i]] = carry * modulation(0.1, t);
        }

        let mut weights = [0.0; CHAKRA_COUNT];
        for (k, weight) in weights.iter_mut().enumerate() {
            *weight = trapezoid_abs(series.row(k), dt);
        }
        let influences = InfluenceWeights::normalize(&weights);

        debug!(duration, samples, total = weights.iter().sum::<f64>(), "series analysis complete");

        Ok(Self {
            times,
            series,
            weights,
            influences,
        })
    }

    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.times.view()
    }

    pub fn series(&self, chakra: Chakra) -> ArrayView1<'_, f64> {
        self.series.row(chakra.index())
    }

    /// Integrated `|E_k|` per chakra
    pub fn weights(&self) -> &[f64; CHAKRA_COUNT] {
        &self.weights
    }

    pub fn influences(&self) -> InfluenceWeights {
        self.influences
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        Chakra::ALL
            .iter()
            .map(|&chakra| SummaryRow {
                chakra,
                name: chakra.name(),
                influence_percent: self.influences[chakra] * 100.0,
                integrated_energy: self.weights[chakra.index()],
            })
            .collect()
    }
}

/// Second-order central differences in the interior, first-order at the edges.
fn central_gradient(values: ArrayView1<'_, f64>, dt: f64) -> Array1<f64> {
    let n = values.len();
    let mut out = Array1::<f64>::zeros(n);
    if n < 2 {
        return out;
    }
    out[0] = (values[1] - values[0]) / dt;
    out[n - 1] = (values[n - 1] - values[n - 2]) / dt;
    for i in 1..n - 1 {
        out[i] = (values[i + 1] - values[i - 1]) / (2.0 * dt);
    }
    out
}

fn trapezoid_abs(values: ArrayView1<'_, f64>, dt: f64) -> f64 {
    values
        .iter()
        .zip(values.iter().skip(1))
        .map(|(a, b)| (a.abs() + b.abs()) * dt / 2.0)
        .sum()
}
