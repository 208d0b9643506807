// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Runner behaviour when built from a full configuration

use std::time::Duration;

use nuvidya_config::NuvidyaConfig;
use nuvidya_energy::{lookup_preset, Chakra, PresetName};
use nuvidya_engine::{EnergyLoopRunner, EnergySimulator, EngineError};

fn config(preset: &str) -> NuvidyaConfig {
    let mut config = NuvidyaConfig::default();
    config.engine.tick_interval_ms = 5;
    config.engine.default_preset = preset.to_string();
    config
}

#[test]
fn runner_stream_matches_offline_simulator() {
    let config = config("compassionate");
    let mut runner = EnergyLoopRunner::from_config(&config).unwrap();
    let rx = runner.subscribe();
    runner.start().unwrap();

    let streamed: Vec<_> = (0..10)
        .map(|_| rx.recv_timeout(Duration::from_secs(2)).unwrap())
        .collect();
    runner.stop();

    let mut offline = EnergySimulator::from_config(&config).unwrap();
    for update in streamed {
        assert_eq!(*update, offline.tick());
    }
}

#[test]
fn crown_decay_flows_into_the_field() {
    let mut slow = config("balanced");
    slow.energy.crown_decay = 0.0;
    let mut sim = EnergySimulator::from_config(&slow).unwrap();

    // zero decay never charges the crown carry
    for _ in 0..50 {
        let update = sim.tick();
        assert_eq!(update.energies[Chakra::Crown], 0.0);
    }
}

#[test]
fn invalid_energy_config_is_rejected() {
    let mut bad = config("balanced");
    bad.energy.heart_offset = 0.0;
    assert!(matches!(
        EnergyLoopRunner::from_config(&bad),
        Err(EngineError::Energy(_))
    ));
}

#[test]
fn preset_case_and_whitespace_are_ignored() {
    let runner = EnergyLoopRunner::for_preset(" GROUNDED", &config("balanced").engine).unwrap();
    assert_eq!(runner.preset(), PresetName::Grounded);
    assert_eq!(
        lookup_preset("grounded").unwrap().multipliers[0],
        1.8
    );
}
