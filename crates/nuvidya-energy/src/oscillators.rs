// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Chakra Oscillators
//!
//! ```text
//! E0 (Root)     = sin(2π·0.5·t) · |sin(2π·0.5·t)|
//! E1 (Sacral)   = (1 − e^(−0.3·(t mod 10))) · sin(2π·t) · |sin(2π·0.7·t)|
//! E2 (Solar)    = Σ_c exp(−((t mod 12) − c)² / 2σ²) · |sin(2π·t)|,  c ∈ {1,4,7,10}, σ = 0.2
//! E3 (Heart)    = ∫(|E1|+|E2|)dt / (t + 0.1) · |sin(2π·1.2·t)|
//! E4 (Throat)   = dE3/dt · |sin(2π·1.5·t)|
//! E5 (ThirdEye) = E1 · E2 · |sin(2π·0.3·t)|
//! E6 (Crown)    = decayed carry of E5 · |sin(2π·0.1·t)|
//! ```
//!
//! E0, E1, E2 and E5 are closed-form and live here. E3, E4 and E6 need
//! integration state and are produced by [`crate::field::EnergyField`].

use core::f64::consts::TAU;
use std::sync::OnceLock;

use crate::field::{EnergyField, FieldParams};
use crate::types::{Chakra, EnergyVector};

/// Step used when an integrated chakra is evaluated without caller-provided history
pub const DEFAULT_SAMPLE_INTERVAL: f64 = 0.1;

const SACRAL_CYCLE: f64 = 10.0;
const SOLAR_CYCLE: f64 = 12.0;
const SOLAR_PULSE_CENTERS: [f64; 4] = [1.0, 4.0, 7.0, 10.0];
const SOLAR_PULSE_WIDTH: f64 = 0.2;

/// `|sin(2π·f·t)|`
#[inline]
pub fn modulation(frequency: f64, t: f64) -> f64 {
    (TAU * frequency * t).sin().abs()
}

#[inline]
pub fn root(t: f64) -> f64 {
    let s = (TAU * 0.5 * t).sin();
    s * s.abs()
}

#[inline]
pub fn sacral(t: f64) -> f64 {
    let ramp = 1.0 - (-0.3 * t.rem_euclid(SACRAL_CYCLE)).exp();
    ramp * (TAU * t).sin() * modulation(0.7, t)
}

#[inline]
pub fn solar(t: f64) -> f64 {
    let phase = t.rem_euclid(SOLAR_CYCLE);
    let denom = 2.0 * SOLAR_PULSE_WIDTH * SOLAR_PULSE_WIDTH;
    let pulses: f64 = SOLAR_PULSE_CENTERS
        .iter()
        .map(|c| (-(phase - c).powi(2) / denom).exp())
        .sum();
    pulses * modulation(1.0, t)
}

/// Third-eye synthesis from already-evaluated sacral and solar energies
#[inline]
pub fn third_eye_from(sacral: f64, solar: f64, t: f64) -> f64 {
    sacral * solar * modulation(0.3, t)
}

#[inline]
pub fn third_eye(t: f64) -> f64 {
    third_eye_from(sacral(t), solar(t), t)
}

/// Closed-form energy, or `None` for the integrated chakras.
pub fn closed_form(chakra: Chakra, t: f64) -> Option<f64> {
    match chakra {
        Chakra::Root => Some(root(t)),
        Chakra::Sacral => Some(sacral(t)),
        Chakra::Solar => Some(solar(t)),
        Chakra::ThirdEye => Some(third_eye(t)),
        Chakra::Heart | Chakra::Throat | Chakra::Crown => None,
    }
}

/// Deterministic energy of `chakra` at time `t`, scaled by `multiplier`.
///
/// Integrated chakras are evaluated as if a fresh [`EnergyField`] had been
/// advanced from `t = 0` on a [`DEFAULT_SAMPLE_INTERVAL`] grid, finishing
/// exactly at `t`. The Heart integrand repeats every 60 s on that grid, so the
/// integral up to the last minute comes from one precomputed cycle and only
/// the final [`LOOKBACK_STEPS`] samples are actually replayed. The Crown carry
/// entering that window has decayed by `e^(−0.5·60)`.
pub fn energy(chakra: Chakra, t: f64, multiplier: f64) -> f64 {
    let base = match closed_form(chakra, t) {
        Some(value) => value,
        None => replay(t)[chakra],
    };
    base * multiplier
}

/// Grid samples in one common Sacral/Solar cycle (lcm(10, 12) s)
const HEART_CYCLE_STEPS: usize = 600;

/// Grid samples replayed before `t` by [`energy`]
pub const LOOKBACK_STEPS: u64 = HEART_CYCLE_STEPS as u64;

/// Prefix sums of `(|E1| + |E2|)·Δt` over one cycle of the default grid
fn heart_cycle() -> &'static [f64; HEART_CYCLE_STEPS + 1] {
    static CYCLE: OnceLock<[f64; HEART_CYCLE_STEPS + 1]> = OnceLock::new();
    CYCLE.get_or_init(|| {
        let mut prefix = [0.0; HEART_CYCLE_STEPS + 1];
        for k in 1..=HEART_CYCLE_STEPS {
            let t = k as f64 * DEFAULT_SAMPLE_INTERVAL;
            let dt = t - (k - 1) as f64 * DEFAULT_SAMPLE_INTERVAL;
            prefix[k] = prefix[k - 1] + (sacral(t).abs() + solar(t).abs()) * dt;
        }
        prefix
    })
}

/// Heart integral after `step` samples of the default grid
fn heart_integral_at(step: u64) -> f64 {
    let prefix = heart_cycle();
    let cycles = step / HEART_CYCLE_STEPS as u64;
    let rem = (step % HEART_CYCLE_STEPS as u64) as usize;
    cycles as f64 * prefix[HEART_CYCLE_STEPS] + prefix[rem]
}

fn replay(t: f64) -> EnergyVector {
    if !t.is_finite() || t <= 0.0 {
        return EnergyField::new().advance(t.max(0.0));
    }
    let steps = (t / DEFAULT_SAMPLE_INTERVAL).floor() as u64;
    let (mut field, first) = if steps > LOOKBACK_STEPS {
        let start = steps - LOOKBACK_STEPS;
        let start_t = start as f64 * DEFAULT_SAMPLE_INTERVAL;
        let field =
            EnergyField::resume_at(FieldParams::default(), start_t, heart_integral_at(start));
        (field, start + 1)
    } else {
        (EnergyField::new(), 0)
    };
    for k in first..=steps {
        let sample_t = k as f64 * DEFAULT_SAMPLE_INTERVAL;
        if sample_t < t {
            field.advance(sample_t);
        }
    }
    field.advance(t)
}
