// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Prompt context derived from the two dominant cores.

use crate::types::{Chakra, InfluenceWeights};

fn guidance(chakra: Chakra) -> &'static str {
    match chakra {
        Chakra::Root => "grounding this in practical reality and stability",
        Chakra::Sacral => "approaching with creativity and adaptive flow",
        Chakra::Solar => "responding with confidence and decisive action",
        Chakra::Heart => "infusing with compassion and emotional wisdom",
        Chakra::Throat => "expressing with transparency and clear communication",
        Chakra::ThirdEye => "providing pattern recognition and intuitive understanding",
        Chakra::Crown => "offering integrated wisdom and strategic perspective",
    }
}

/// Guidance sentence for the two strongest chakras, without the user prompt.
pub fn prompt_context(influences: &InfluenceWeights) -> String {
    let dominant = influences.top(2);

    let context = dominant
        .iter()
        .map(|(chakra, _)| guidance(*chakra))
        .collect::<Vec<_>>()
        .join(" while ");

    let shares = dominant
        .iter()
        .map(|(chakra, value)| format!("{}: {}%", chakra.info().core, (value * 100.0).round()))
        .collect::<Vec<_>>()
        .join(", ");

    format!("Please respond by {context}. Current core influences: {shares}")
}

/// Append core-influence guidance for the two strongest chakras to `user_prompt`.
pub fn compose_prompt(user_prompt: &str, influences: &InfluenceWeights) -> String {
    format!("{user_prompt} ({})", prompt_context(influences))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_prompt_uses_two_dominant_cores() {
        let weights = InfluenceWeights::normalize(&[0.1, 0.4, 0.1, 0.3, 0.05, 0.05, 0.0]);
        let prompt = compose_prompt("How do I start?", &weights);
        assert!(prompt.starts_with("How do I start? (Please respond by approaching with creativity"));
        assert!(prompt.contains("while infusing with compassion"));
        assert!(prompt.contains("Flow: 40%, Harmony: 30%"));
        assert!(!prompt.contains("Foundation"));
    }

    #[test]
    fn test_uniform_weights_pick_lowest_indices() {
        let context = prompt_context(&InfluenceWeights::uniform());
        assert!(context.starts_with("Please respond by grounding this"));
        assert!(context.contains("Foundation: 14%, Flow: 14%"));
    }
}
