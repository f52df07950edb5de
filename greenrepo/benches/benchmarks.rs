// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use greenrepo::{RepositoryProfile, TreeEntry, TreeIndex, parse_config, render_badge_svg, score};

fn sample_profile(files: usize) -> RepositoryProfile {
    let mut builder = RepositoryProfile::builder()
        .language("TypeScript", 420_000)
        .language("Rust", 180_000)
        .language("Shell", 4_000)
        .dependency_text(r#"{"dependencies": {"svelte": "^4", "puppeteer": "^22"}}"#)
        .dependency_text("[dependencies]\naxum = \"0.7\"\ntokio = \"1\"\n")
        .file(".github/workflows/ci.yml")
        .size_kb(48 * 1024);

    for i in 0..files {
        let path = match i % 5 {
            0 => format!("assets/img{i}.png"),
            1 => format!("assets/icon{i}.svg"),
            _ => format!("src/module{i}.ts")
        };
        builder = builder.file(path);
    }

    builder.build()
}

fn benchmark_score_small_profile(c: &mut Criterion) {
    let profile = sample_profile(50);

    c.bench_function("score_small_profile", |b| {
        b.iter(|| black_box(score(black_box(&profile))))
    });
}

fn benchmark_score_large_profile(c: &mut Criterion) {
    let profile = sample_profile(20_000);

    c.bench_function("score_20000_files", |b| {
        b.iter(|| black_box(score(black_box(&profile)).score))
    });
}

fn benchmark_tree_index(c: &mut Criterion) {
    let entries: Vec<TreeEntry> = (0..10_000)
        .map(|i| match i % 100 {
            0 => TreeEntry::blob(format!("packages/pkg{i}/package.json"), format!("sha{i}")),
            _ => TreeEntry::blob(
                format!("packages/pkg{}/src/file{i}.ts", i / 100),
                format!("sha{i}")
            )
        })
        .collect();

    c.bench_function("tree_index_10000_entries", |b| {
        b.iter(|| {
            let index = TreeIndex::from_entries(black_box(&entries));
            black_box(index.manifests_to_fetch(5).len())
        })
    });
}

fn benchmark_config_parse(c: &mut Criterion) {
    let yaml = r"
host:
  api_base: https://api.github.com
  manifest_limit: 5
  fetch_timeout_secs: 10
  retry:
    max_attempts: 3
    initial_delay_ms: 250
    backoff_factor: 2.0
scoring:
  unknown_language_penalty: 12.5
";

    c.bench_function("parse_config", |b| {
        b.iter(|| parse_config(black_box(yaml)).expect("parse failed"))
    });
}

fn benchmark_badge_render(c: &mut Criterion) {
    c.bench_function("render_badge_svg", |b| {
        b.iter(|| render_badge_svg(black_box(87)))
    });
}

criterion_group!(
    benches,
    benchmark_score_small_profile,
    benchmark_score_large_profile,
    benchmark_tree_index,
    benchmark_config_parse,
    benchmark_badge_render
);
criterion_main!(benches);
