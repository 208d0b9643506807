// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Named preset table.
//!
//! Each preset carries per-chakra sensitivity multipliers (applied to the
//! energy outputs) and a weight bias table (used by [`biased_influences`]).

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::types::{Chakra, EnergyError, InfluenceWeights, Result, CHAKRA_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    Balanced,
    Grounded,
    Creative,
    Wise,
    Compassionate,
    Decisive,
}

impl PresetName {
    pub const ALL: [PresetName; 6] = [
        PresetName::Balanced,
        PresetName::Grounded,
        PresetName::Creative,
        PresetName::Wise,
        PresetName::Compassionate,
        PresetName::Decisive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PresetName::Balanced => "balanced",
            PresetName::Grounded => "grounded",
            PresetName::Creative => "creative",
            PresetName::Wise => "wise",
            PresetName::Compassionate => "compassionate",
            PresetName::Decisive => "decisive",
        }
    }

    pub fn preset(self) -> &'static Preset {
        &PRESETS[self as usize]
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = EnergyError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        PresetName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EnergyError::UnknownPreset(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: PresetName,
    pub label: &'static str,
    pub description: &'static str,
    /// Sensitivity multiplier per chakra
    pub multipliers: [f64; CHAKRA_COUNT],
    /// Weight bias per chakra
    pub weights: [f64; CHAKRA_COUNT],
}

impl Preset {
    pub fn multiplier(&self, chakra: Chakra) -> f64 {
        self.multipliers[chakra.index()]
    }
}

static PRESETS: [Preset; 6] = [
    Preset {
        name: PresetName::Balanced,
        label: "Balanced",
        description: "Harmonious balance across all core agents",
        multipliers: [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        weights: [0.14, 0.14, 0.14, 0.16, 0.14, 0.14, 0.14],
    },
    Preset {
        name: PresetName::Grounded,
        label: "Grounded",
        description: "Practical, stability-centered approach",
        multipliers: [1.8, 1.2, 1.0, 0.9, 0.8, 0.8, 0.6],
        weights: [0.30, 0.20, 0.15, 0.10, 0.10, 0.10, 0.05],
    },
    Preset {
        name: PresetName::Creative,
        label: "Creative",
        description: "Flowing, innovative, and expressive",
        multipliers: [0.8, 1.8, 1.0, 1.2, 1.4, 1.4, 1.0],
        weights: [0.10, 0.30, 0.20, 0.15, 0.15, 0.10, 0.00],
    },
    Preset {
        name: PresetName::Wise,
        label: "Wise",
        description: "Intuitive, insightful, and transcendent",
        multipliers: [0.6, 0.8, 0.9, 1.2, 1.2, 1.8, 1.8],
        weights: [0.05, 0.05, 0.10, 0.15, 0.15, 0.25, 0.25],
    },
    Preset {
        name: PresetName::Compassionate,
        label: "Compassionate",
        description: "Empathetic, loving, and communicative",
        multipliers: [0.9, 1.0, 0.8, 1.8, 1.4, 1.0, 1.0],
        weights: [0.10, 0.10, 0.10, 0.40, 0.20, 0.05, 0.05],
    },
    Preset {
        name: PresetName::Decisive,
        label: "Decisive",
        description: "Confident, action-oriented, and powerful",
        multipliers: [1.2, 1.0, 1.8, 0.9, 1.0, 0.8, 0.8],
        weights: [0.20, 0.15, 0.35, 0.10, 0.10, 0.05, 0.05],
    },
];

/// Look up a preset by name (trimmed, ASCII case-insensitive).
///
/// # Errors
///
/// Returns [`EnergyError::UnknownPreset`] for names outside the enumerated set.
pub fn lookup_preset(name: &str) -> Result<&'static Preset> {
    name.parse::<PresetName>().map(PresetName::preset)
}

pub fn presets() -> &'static [Preset] {
    &PRESETS
}

/// Resonance-biased normalization of a preset's weight table at time `t`.
///
/// `bias_k = clamp(weight_k + 0.3 · (0.5 + 0.1 · sin(t · f_k / 100)), 0, 1)`
/// where `f_k` is the chakra's resonance frequency.
pub fn biased_influences(preset: &Preset, t: f64) -> InfluenceWeights {
    let mut raw = [0.0; CHAKRA_COUNT];
    for chakra in Chakra::ALL {
        let frequency = chakra.info().resonance_frequency;
        let resonance = (t * frequency / 100.0).sin() * 0.1 + 0.5;
        raw[chakra.index()] = (preset.weights[chakra.index()] + resonance * 0.3).clamp(0.0, 1.0);
    }
    InfluenceWeights::normalize(&raw)
}
