// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Offline influence report.
//!
//! Evaluates every chakra over `linspace(0, duration, samples)`, integrates
//! the absolute energies and prints each chakra's share of the total, plus the
//! selected preset's resonance-biased weights at the end of the window.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use nuvidya::config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    validate_config, NuvidyaConfig,
};
use nuvidya::energy::{
    biased_influences, lookup_preset, prompt_context, Chakra, FieldParams, InfluenceWeights,
    PresetName, SeriesAnalysis, SummaryRow,
};
use nuvidya::observability::{debug_flags_help, init_console_logging, parse_debug_flags};
use serde::Serialize;
use tracing::{debug, info};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: chakra_analysis [--duration <seconds>] [--samples <n>] [--preset <name>] \
         [--config <path>] [--json] [--debug-<crate>]\n\n\
         Defaults come from nuvidya_configuration.toml when found, otherwise:\n\
         - duration: 10\n\
         - samples: 1000\n\
         - preset: balanced\n\n\
         {}",
        debug_flags_help()
    );
    process::exit(2);
}

struct Args {
    config_path: Option<PathBuf>,
    overrides: HashMap<String, String>,
    json: bool,
}

fn parse_args() -> Args {
    let mut config_path = None;
    let mut overrides = HashMap::new();
    let mut json = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--duration" | "--samples" | "--preset" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                overrides.insert(arg.trim_start_matches("--").to_string(), v);
            }
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                config_path = Some(PathBuf::from(v));
            }
            "--json" => json = true,
            "-h" | "--help" => usage_and_exit(),
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    Args {
        config_path,
        overrides,
        json,
    }
}

fn resolve_config(args: &Args) -> Result<NuvidyaConfig> {
    let explicit = args.config_path.clone().or_else(|| find_config_file().ok());

    let config = match explicit {
        Some(path) => load_config(Some(&path), Some(&args.overrides))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            let mut config = NuvidyaConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &args.overrides);
            config
        }
    };

    validate_config(&config)?;
    Ok(config)
}

#[derive(Serialize)]
struct Report {
    preset: PresetName,
    duration_s: f64,
    samples: usize,
    total_energy: f64,
    dominant: Chakra,
    resonating: bool,
    chakras: Vec<SummaryRow>,
    influences: InfluenceWeights,
    preset_bias: InfluenceWeights,
    prompt_context: String,
}

fn print_table(report: &Report) {
    println!(
        "Chakra influence over {:.1}s ({} samples, preset '{}')",
        report.duration_s, report.samples, report.preset
    );
    println!();
    println!(
        "{:<12} {:>12} {:>18} {:>12}",
        "Chakra", "Influence %", "Integrated energy", "Preset bias"
    );
    println!("{}", "-".repeat(57));
    for row in &report.chakras {
        println!(
            "{:<12} {:>11.2}% {:>18.4} {:>11.2}%",
            row.name,
            row.influence_percent,
            row.integrated_energy,
            report.preset_bias.get(row.chakra) * 100.0
        );
    }
    println!("{}", "-".repeat(57));
    println!("{:<12} {:>12} {:>18.4}", "Total", "", report.total_energy);
    println!();
    println!("Dominant: {}", report.dominant);
    println!(
        "State: {}",
        if report.resonating { "resonating" } else { "imbalanced" }
    );
    println!("Prompt context: {}", report.prompt_context);
}

fn main() -> Result<()> {
    let args = parse_args();
    let config = resolve_config(&args)?;

    let debug_flags = parse_debug_flags();
    init_console_logging(&debug_flags, &config.logging.level)?;

    let preset = lookup_preset(&config.engine.default_preset)?;
    let params = FieldParams {
        crown_decay: config.energy.crown_decay,
        heart_offset: config.energy.heart_offset,
    };

    info!(
        "Analysing {}s over {} samples (preset={})",
        config.analysis.duration_s, config.analysis.samples, preset.name
    );
    let analysis =
        SeriesAnalysis::compute(config.analysis.duration_s, config.analysis.samples, params)?;
    let influences = analysis.influences();
    debug!("Influences: {:?}", influences.as_array());

    let report = Report {
        preset: preset.name,
        duration_s: config.analysis.duration_s,
        samples: config.analysis.samples,
        total_energy: analysis.total_weight(),
        dominant: influences.dominant(),
        resonating: influences.is_resonating(),
        chakras: analysis.summary(),
        influences,
        preset_bias: biased_influences(preset, config.analysis.duration_s),
        prompt_context: prompt_context(&influences),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }

    Ok(())
}
