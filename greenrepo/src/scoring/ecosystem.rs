// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ecosystem and dependency intensity rule.
//!
//! All manifest texts are joined into one lower-cased corpus and searched for
//! each signature substring. A signature contributes at most once per
//! analysis, however often it appears.

use std::collections::BTreeSet;

use super::{Category, Tally};
use crate::profile::RepositoryProfile;

/// Known dependency signature with its point delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcosystemSignature {
    /// Lower-case substring searched for in the manifests.
    pub name:  &'static str,
    /// Points added to the score; negative for heavy ecosystems.
    pub delta: i32,
    /// Explanation used in the reason line.
    pub label: &'static str
}

const fn signature(name: &'static str, delta: i32, label: &'static str) -> EcosystemSignature {
    EcosystemSignature {
        name,
        delta,
        label
    }
}

/// Signature table in display order.
pub const ECOSYSTEM_SIGNATURES: &[EcosystemSignature] = &[
    signature("tensorflow", -15, "Deep Learning (Heavy Compute)"),
    signature("torch", -15, "PyTorch (Heavy Compute)"),
    signature("transformers", -10, "LLM/Transformers (Heavy Compute)"),
    signature("langchain", -10, "LLM Orchestration"),
    signature("openai", -5, "AI API Integration"),
    signature("web3", -15, "Blockchain/Crypto (Energy Intensive)"),
    signature("ethers", -15, "Blockchain/Crypto"),
    signature("puppeteer", -10, "Headless Browser (Memory Heavy)"),
    signature("selenium", -10, "Browser Automation"),
    signature("electron", -10, "Electron (Bundled Chromium)"),
    signature("fastify", 5, "Fastify (High Performance Node.js)"),
    signature("actix", 5, "Actix (Rust High Performance)"),
    signature("axum", 5, "Axum (Rust High Performance)"),
    signature("preact", 5, "Preact (Lightweight React)"),
    signature("svelte", 5, "Svelte (Compiler Optimized)"),
    signature("astro", 5, "Astro (Zero JS by default)"),
    signature("next", 0, "Next.js (Standard)")
];

/// Signatures present in `texts`, deduplicated by name, in table order.
pub fn matching_signatures(texts: &[String]) -> Vec<&'static EcosystemSignature> {
    let corpus = texts.join(" ").to_lowercase();
    let mut seen = BTreeSet::new();

    ECOSYSTEM_SIGNATURES
        .iter()
        .filter(|signature| corpus.contains(signature.name))
        .filter(|signature| seen.insert(signature.name))
        .collect()
}

pub(super) fn apply(profile: &RepositoryProfile, tally: &mut Tally) {
    for signature in matching_signatures(profile.dependency_texts()) {
        if signature.delta < 0 {
            tally.deduct(
                Category::Compute,
                signature.delta.unsigned_abs(),
                format!("{}: {} pts", signature.label, signature.delta)
            );
        } else {
            tally.award(
                signature.delta,
                format!("{}: +{} pts", signature.label, signature.delta)
            );
        }
    }
}
