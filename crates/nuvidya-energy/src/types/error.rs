// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for energy computation

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnergyError {
    #[error("unknown preset '{0}' (expected one of: balanced, grounded, creative, wise, compassionate, decisive)")]
    UnknownPreset(String),

    #[error("chakra index {0} out of range (0-6)")]
    InvalidIndex(u8),

    #[error("history capacity must be >= 2, got {0}")]
    InvalidHistoryCapacity(usize),

    #[error("sample interval must be finite and > 0, got {0}")]
    InvalidSampleInterval(f64),

    #[error("invalid analysis window: {0}")]
    InvalidAnalysis(String),
}

pub type Result<T> = core::result::Result<T, EnergyError>;
