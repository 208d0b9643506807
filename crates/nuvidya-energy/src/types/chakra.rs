// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Chakra identity and static metadata

use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of chakra oscillators
pub const CHAKRA_COUNT: usize = 7;

/// One of the seven fixed oscillator slots.
///
/// The discriminant is the chakra index used by every vector in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Chakra {
    Root = 0,
    Sacral = 1,
    Solar = 2,
    Heart = 3,
    Throat = 4,
    ThirdEye = 5,
    Crown = 6,
}

/// Static descriptive data attached to a chakra
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChakraInfo {
    pub name: &'static str,
    pub sanskrit: &'static str,
    pub color: &'static str,
    pub purpose: &'static str,
    /// Name of the "core agent" this chakra drives
    pub core: &'static str,
    /// Frequency (Hz) of the modulating sine term
    pub base_frequency: f64,
    /// Syllable resonance frequency used by the preset bias
    pub resonance_frequency: f64,
}

const INFO: [ChakraInfo; CHAKRA_COUNT] = [
    ChakraInfo {
        name: "Root",
        sanskrit: "LAM",
        color: "#8B4513",
        purpose: "Grounding & Stability",
        core: "Foundation",
        base_frequency: 0.5,
        resonance_frequency: 256.0,
    },
    ChakraInfo {
        name: "Sacral",
        sanskrit: "VAM",
        color: "#FF8C00",
        purpose: "Creativity & Flow",
        core: "Flow",
        base_frequency: 1.0,
        resonance_frequency: 288.0,
    },
    ChakraInfo {
        name: "Solar",
        sanskrit: "RAM",
        color: "#FFD700",
        purpose: "Willpower & Decision",
        core: "Drive",
        base_frequency: 1.0,
        resonance_frequency: 320.0,
    },
    ChakraInfo {
        name: "Heart",
        sanskrit: "YAM",
        color: "#32CD32",
        purpose: "Compassion & Integration",
        core: "Harmony",
        base_frequency: 1.2,
        resonance_frequency: 341.0,
    },
    ChakraInfo {
        name: "Throat",
        sanskrit: "HAM",
        color: "#1E90FF",
        purpose: "Expression & Clarity",
        core: "Clarity",
        base_frequency: 1.5,
        resonance_frequency: 384.0,
    },
    ChakraInfo {
        name: "Third Eye",
        sanskrit: "OM",
        color: "#4B0082",
        purpose: "Insight & Synthesis",
        core: "Insight",
        base_frequency: 0.3,
        resonance_frequency: 426.0,
    },
    ChakraInfo {
        name: "Crown",
        sanskrit: "Silence",
        color: "#9370DB",
        purpose: "Meta-awareness",
        core: "Synthesis",
        base_frequency: 0.1,
        resonance_frequency: 480.0,
    },
];

impl Chakra {
    /// All chakras in index order
    pub const ALL: [Chakra; CHAKRA_COUNT] = [
        Chakra::Root,
        Chakra::Sacral,
        Chakra::Solar,
        Chakra::Heart,
        Chakra::Throat,
        Chakra::ThirdEye,
        Chakra::Crown,
    ];

    /// Map a raw index to a chakra. Returns `None` for indices >= 7.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> &'static ChakraInfo {
        &INFO[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// True when the energy at `t` is a closed-form function of `t` alone.
    ///
    /// Heart, Throat and Crown depend on integrated history.
    pub fn is_closed_form(self) -> bool {
        !matches!(self, Chakra::Heart | Chakra::Throat | Chakra::Crown)
    }

    /// Period (seconds) after which a closed-form oscillator repeats exactly.
    pub fn period(self) -> Option<f64> {
        match self {
            Chakra::Root => Some(2.0),
            Chakra::Sacral => Some(10.0),
            Chakra::Solar => Some(12.0),
            Chakra::ThirdEye => Some(60.0),
            Chakra::Heart | Chakra::Throat | Chakra::Crown => None,
        }
    }
}

impl TryFrom<u8> for Chakra {
    type Error = crate::EnergyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Chakra::from_index(value).ok_or(crate::EnergyError::InvalidIndex(value))
    }
}

impl fmt::Display for Chakra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
