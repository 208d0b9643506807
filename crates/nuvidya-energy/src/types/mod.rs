// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Core type definitions

pub mod chakra;
pub mod error;
pub mod vectors;

pub use chakra::{Chakra, ChakraInfo, CHAKRA_COUNT};
pub use error::{EnergyError, Result};
pub use vectors::{EnergyVector, InfluenceWeights, RESONANCE_VARIANCE_THRESHOLD};
