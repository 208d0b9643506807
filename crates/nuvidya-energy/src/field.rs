// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Energy Field
//!
//! Streaming evaluator for all seven chakras. Holds the integration state the
//! Heart, Throat and Crown terms need between samples:
//!
//! ```text
//! integral(t_i) = integral(t_{i-1}) + (|E1(t_i)| + |E2(t_i)|) · Δt
//! E3(t_i)       = integral(t_i) / (t_i + offset) · |sin(2π·1.2·t_i)|
//! E4(t_i)       = (E3(t_i) − E3(t_{i-1})) / Δt · |sin(2π·1.5·t_i)|
//! carry(t_i)    = carry(t_{i-1}) · e^(−β·Δt) + β · E5(t_i) · Δt
//! E6(t_i)       = carry(t_i) · |sin(2π·0.1·t_i)|
//! ```
//!
//! The carry is the recursive form of the causal kernel `β·e^(−β|t−s|)`.

use crate::oscillators::{self, modulation};
use crate::types::{EnergyError, EnergyVector, Result};

/// Tunable constants for the integrated chakras
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Crown decay rate β (1/s)
    pub crown_decay: f64,
    /// Offset added to `t` in the Heart denominator
    pub heart_offset: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            crown_decay: 0.5,
            heart_offset: 0.1,
        }
    }
}

impl FieldParams {
    pub fn validate(&self) -> Result<()> {
        if !self.crown_decay.is_finite() || self.crown_decay < 0.0 {
            return Err(EnergyError::InvalidAnalysis(format!(
                "crown decay must be finite and >= 0, got {}",
                self.crown_decay
            )));
        }
        if !self.heart_offset.is_finite() || self.heart_offset <= 0.0 {
            return Err(EnergyError::InvalidAnalysis(format!(
                "heart offset must be finite and > 0, got {}",
                self.heart_offset
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct FieldState {
    last_t: Option<f64>,
    heart_integral: f64,
    last_heart: f64,
    last_derivative: f64,
    crown_carry: f64,
    samples: u64,
}

/// Stateful evaluator producing one [`EnergyVector`] per sample time.
#[derive(Debug, Clone)]
pub struct EnergyField {
    params: FieldParams,
    state: FieldState,
}

impl Default for EnergyField {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyField {
    pub fn new() -> Self {
        Self::with_params(FieldParams::default())
    }

    pub fn with_params(params: FieldParams) -> Self {
        Self {
            params,
            state: FieldState::default(),
        }
    }

    /// Field positioned at `t` with an accumulated Heart integral.
    ///
    /// The Crown carry starts empty and the Throat derivative at zero; both are
    /// rebuilt by the samples that follow.
    pub(crate) fn resume_at(params: FieldParams, t: f64, heart_integral: f64) -> Self {
        let last_heart = heart_integral / (t.max(0.0) + params.heart_offset) * modulation(1.2, t);
        Self {
            params,
            state: FieldState {
                last_t: Some(t),
                heart_integral,
                last_heart,
                ..FieldState::default()
            },
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Time of the last sample, if any
    pub fn time(&self) -> Option<f64> {
        self.state.last_t
    }

    pub fn sample_count(&self) -> u64 {
        self.state.samples
    }

    pub fn reset(&mut self) {
        self.state = FieldState::default();
    }

    /// Evaluate every chakra at `t` and fold the sample into the integration state.
    ///
    /// A `t` that does not move forward is a zero-length step: nothing is
    /// integrated and the Throat derivative keeps its previous value.
    pub fn advance(&mut self, t: f64) -> EnergyVector {
        let dt = match self.state.last_t {
            Some(last) if t > last => t - last,
            _ => 0.0,
        };

        let root = oscillators::root(t);
        let sacral = oscillators::sacral(t);
        let solar = oscillators::solar(t);
        let third_eye = oscillators::third_eye_from(sacral, solar, t);

        self.state.heart_integral += (sacral.abs() + solar.abs()) * dt;
        let denom = t.max(0.0) + self.params.heart_offset;
        let heart_base = self.state.heart_integral / denom;
        let heart = heart_base * modulation(1.2, t);

        let derivative = if dt > 0.0 {
            (heart - self.state.last_heart) / dt
        } else {
            self.state.last_derivative
        };
        let throat = derivative * modulation(1.5, t);

        let beta = self.params.crown_decay;
        self.state.crown_carry = self.state.crown_carry * (-beta * dt).exp() + beta * third_eye * dt;
        let crown = self.state.crown_carry * modulation(0.1, t);

        if dt > 0.0 || self.state.last_t.is_none() {
            self.state.last_t = Some(t);
        }
        self.state.last_heart = heart;
        self.state.last_derivative = derivative;
        self.state.samples += 1;

        EnergyVector::new([root, sacral, solar, heart, throat, third_eye, crown])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chakra;

    #[test]
    fn test_first_sample_has_no_integrated_energy() {
        let mut field = EnergyField::new();
        let e = field.advance(0.0);
        assert_eq!(e[Chakra::Heart], 0.0);
        assert_eq!(e[Chakra::Throat], 0.0);
        assert_eq!(e[Chakra::Crown], 0.0);
        assert_eq!(field.sample_count(), 1);
    }

    #[test]
    fn test_closed_form_slots_match_oscillators() {
        let mut field = EnergyField::new();
        for i in 0..50 {
            let t = i as f64 * 0.1;
            let e = field.advance(t);
            assert_eq!(e[Chakra::Root], oscillators::root(t));
            assert_eq!(e[Chakra::Sacral], oscillators::sacral(t));
            assert_eq!(e[Chakra::Solar], oscillators::solar(t));
            assert_eq!(e[Chakra::ThirdEye], oscillators::third_eye(t));
        }
    }

    #[test]
    fn test_heart_integral_is_non_negative_before_modulation() {
        let mut field = EnergyField::new();
        for i in 0..200 {
            let e = field.advance(i as f64 * 0.1);
            assert!(e[Chakra::Heart] >= 0.0);
            assert!(e.as_array().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_repeated_time_is_zero_length_step() {
        let mut field = EnergyField::new();
        field.advance(0.0);
        let a = field.advance(1.3);
        let b = field.advance(1.3);
        assert_eq!(a[Chakra::Heart], b[Chakra::Heart]);
        assert_eq!(a[Chakra::Throat], b[Chakra::Throat]);
        assert_eq!(a[Chakra::Crown], b[Chakra::Crown]);
        assert_eq!(field.time(), Some(1.3));
    }

    #[test]
    fn test_zero_decay_disables_crown() {
        let mut field = EnergyField::with_params(FieldParams {
            crown_decay: 0.0,
            ..FieldParams::default()
        });
        for i in 0..100 {
            assert_eq!(field.advance(i as f64 * 0.1)[Chakra::Crown], 0.0);
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut field = EnergyField::new();
        for i in 0..20 {
            field.advance(i as f64 * 0.1);
        }
        field.reset();
        assert_eq!(field.time(), None);
        assert_eq!(field.advance(0.0)[Chakra::Heart], 0.0);
    }

    #[test]
    fn test_params_validation() {
        assert!(FieldParams::default().validate().is_ok());
        let bad = FieldParams {
            heart_offset: 0.0,
            ..FieldParams::default()
        };
        assert!(bad.validate().is_err());
    }
}
