// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Language efficiency rule.
//!
//! Each language carries a penalty for a 100% share of the code base. The
//! deduction is the byte-weighted average of those penalties, rounded to the
//! nearest point.

use std::collections::BTreeMap;

use super::{Category, Tally};
use crate::{config::ScoringConfig, profile::RepositoryProfile};

/// Energy-efficiency tier of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Compiled to native code.
    EcoNative,
    /// Garbage collected, VM or AOT, but fast.
    EfficientManaged,
    /// Interpreted or JIT compiled.
    Interpreted,
    /// Heavily interpreted runtimes.
    EnergyIntensive
}

/// One row of the tier table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanguageTier {
    /// Language name as reported by the host.
    pub name:    &'static str,
    /// Tier classification.
    pub tier:    Tier,
    /// Penalty for a 100% share.
    pub penalty: f64
}

const fn entry(name: &'static str, tier: Tier, penalty: f64) -> LanguageTier {
    LanguageTier {
        name,
        tier,
        penalty
    }
}

/// Known languages and their penalties.
pub const LANGUAGE_TIERS: &[LanguageTier] = &[
    entry("C", Tier::EcoNative, 0.0),
    entry("C++", Tier::EcoNative, 0.0),
    entry("Rust", Tier::EcoNative, 0.0),
    entry("Zig", Tier::EcoNative, 0.0),
    entry("Ada", Tier::EcoNative, 0.0),
    entry("Fortran", Tier::EcoNative, 0.0),
    entry("HTML", Tier::EcoNative, 0.0),
    entry("CSS", Tier::EcoNative, 0.0),
    entry("ShaderLab", Tier::EcoNative, 0.0),
    entry("Go", Tier::EfficientManaged, 5.0),
    entry("Java", Tier::EfficientManaged, 5.0),
    entry("C#", Tier::EfficientManaged, 5.0),
    entry("Swift", Tier::EfficientManaged, 5.0),
    entry("Kotlin", Tier::EfficientManaged, 5.0),
    entry("Haskell", Tier::EfficientManaged, 5.0),
    entry("Pascal", Tier::EfficientManaged, 5.0),
    entry("Dart", Tier::EfficientManaged, 5.0),
    entry("JavaScript", Tier::Interpreted, 15.0),
    entry("TypeScript", Tier::Interpreted, 15.0),
    entry("PHP", Tier::Interpreted, 15.0),
    entry("Elixir", Tier::Interpreted, 10.0),
    entry("Erlang", Tier::Interpreted, 10.0),
    entry("Python", Tier::EnergyIntensive, 30.0),
    entry("Ruby", Tier::EnergyIntensive, 30.0),
    entry("Perl", Tier::EnergyIntensive, 30.0),
    entry("Lua", Tier::EnergyIntensive, 25.0),
    entry("R", Tier::EnergyIntensive, 30.0),
    entry("Shell", Tier::EnergyIntensive, 20.0),
    entry("PowerShell", Tier::EnergyIntensive, 20.0)
];

/// Looks up a language in [`LANGUAGE_TIERS`]. Names are case sensitive.
pub fn tier_of(language: &str) -> Option<&'static LanguageTier> {
    LANGUAGE_TIERS.iter().find(|tier| tier.name == language)
}

/// Penalty for a 100% share of `language`.
pub fn penalty_of(language: &str, config: &ScoringConfig) -> f64 {
    tier_of(language).map_or(config.unknown_language_penalty, |tier| tier.penalty)
}

/// Byte-weighted average penalty, rounded. Zero when no bytes are reported.
pub fn language_deduction(languages: &BTreeMap<String, u64>, config: &ScoringConfig) -> u32 {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return 0;
    }

    let weighted: f64 = languages
        .iter()
        .map(|(language, bytes)| {
            let share = *bytes as f64 / total as f64;
            share * penalty_of(language, config)
        })
        .sum();

    weighted.round().max(0.0) as u32
}

pub(super) fn apply(profile: &RepositoryProfile, config: &ScoringConfig, tally: &mut Tally) {
    let deduction = language_deduction(profile.languages(), config);
    if deduction > 0 {
        tally.deduct(
            Category::Language,
            deduction,
            format!("Language composition penalty: -{deduction} pts (based on energy efficiency)")
        );
    } else if profile.total_language_bytes() == 0 {
        tally.award(0, "No language data reported: no language penalty".to_owned());
    } else {
        tally.award(0, "Purely efficient languages detected (Tier 1)".to_owned());
    }
}
