// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file -> validated config -> streaming runner

use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use nuvidya::config::ConfigError;
use nuvidya::prelude::*;
use tempfile::tempdir;

const CONFIG: &str = r#"
[engine]
tick_interval_ms = 5
history_capacity = 20
default_preset = "Decisive"

[energy]
crown_decay = 0.25
"#;

#[test]
fn runner_built_from_file_streams_updates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nuvidya_configuration.toml");
    fs::write(&path, CONFIG).unwrap();

    let mut cli = HashMap::new();
    cli.insert("history_capacity".to_string(), "10".to_string());

    let config = load_config(Some(&path), Some(&cli)).unwrap();
    validate_config(&config).unwrap();
    assert_eq!(config.engine.history_capacity, 10);
    assert_eq!(config.energy.crown_decay, 0.25);

    let mut runner = EnergyLoopRunner::from_config(&config).unwrap();
    let updates = runner.subscribe();
    runner.start().unwrap();

    let received: Vec<_> = (0..15)
        .map(|_| updates.recv_timeout(Duration::from_secs(2)).unwrap())
        .collect();
    runner.stop();

    assert!(received.iter().all(|u| u.preset == PresetName::Decisive));
    assert!(received
        .windows(2)
        .all(|pair| pair[1].tick == pair[0].tick + 1));
    for update in &received {
        assert!((update.influences.sum() - 1.0).abs() < 1e-6);
    }

    let latest = runner.latest().unwrap();
    assert!(latest.tick >= 14);
    let json = serde_json::to_value(&*latest).unwrap();
    assert_eq!(json["preset"], "decisive");
}

#[test]
fn invalid_file_values_fail_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nuvidya_configuration.toml");
    fs::write(
        &path,
        "[engine]\ntick_interval_ms = 0\n[analysis]\nsamples = 1\n",
    )
    .unwrap();

    let config = load_config(Some(&path), None).unwrap();
    match validate_config(&config) {
        Err(ConfigError::ValidationError(msg)) => {
            assert!(msg.contains("engine.tick_interval_ms"));
            assert!(msg.contains("analysis.samples"));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn unknown_preset_in_file_is_reported() {
    let mut config = NuvidyaConfig::default();
    config.engine.default_preset = "serene".to_string();
    validate_config(&config).unwrap();

    match EnergyLoopRunner::from_config(&config) {
        Err(EngineError::Energy(EnergyError::UnknownPreset(name))) => assert_eq!(name, "serene"),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("unknown preset accepted"),
    }
}
