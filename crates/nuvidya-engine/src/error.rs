// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use nuvidya_energy::EnergyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("energy loop already running")]
    AlreadyRunning,

    #[error("failed to spawn energy loop thread: {0}")]
    ThreadSpawn(String),

    #[error(transparent)]
    Energy(#[from] EnergyError),

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
