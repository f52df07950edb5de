// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Badge asset generation utilities.
//!
//! The badge is a pure function of the numeric score. Grade letter, label
//! and colors come from [`Grade::from_score`] and [`Grade::palette`], so the
//! badge and the scoring result can never disagree about a grade.

use std::{
    borrow::Cow,
    f64::consts::PI,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf}
};

use serde::Serialize;

use crate::{
    error::{self, Error},
    scoring::{Grade, MAX_SCORE}
};

/// Slug used when none is supplied.
pub const DEFAULT_BADGE_SLUG: &str = "greenrepo";

const WIDTH: u32 = 400;
const HEIGHT: u32 = 120;
const RING_CENTER_X: u32 = 330;
const RING_CENTER_Y: u32 = 60;
const RING_RADIUS: f64 = 35.0;
const FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif";

/// Result of writing badge assets for a score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeAssets {
    /// Path to the rendered SVG badge.
    pub svg_path:      PathBuf,
    /// Path to the JSON manifest describing the badge.
    pub manifest_path: PathBuf
}

/// Renders the SVG badge for `score`. Scores above 100 render as 100.
///
/// # Examples
///
/// ```
/// let svg = greenrepo::render_badge_svg(95);
/// assert!(svg.contains("Eco Native"));
/// assert!(svg.contains("#10b981"));
/// ```
pub fn render_badge_svg(score: u8) -> String {
    let score = score.min(MAX_SCORE);
    let grade = Grade::from_score(score);
    let palette = grade.palette();
    let label = escape_xml(grade.label());
    let (circumference, offset) = ring_geometry(score);

    let mut buffer = String::with_capacity(2048);
    buffer.push_str(&format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" \
         role=\"img\" aria-label=\"Green Repo score {score} ({grade})\" width=\"{WIDTH}\" \
         height=\"{HEIGHT}\" viewBox=\"0 0 {WIDTH} {HEIGHT}\">\n"
    ));
    buffer.push_str(
        "  <defs>\n    <linearGradient id=\"greenrepo-bg\" x1=\"0%\" y1=\"0%\" x2=\"100%\" \
         y2=\"100%\">\n      <stop offset=\"0%\" stop-color=\"#18181b\"/>\n      <stop \
         offset=\"100%\" stop-color=\"#09090b\"/>\n    </linearGradient>\n  </defs>\n"
    );
    buffer.push_str(&format!(
        "  <rect x=\"1\" y=\"1\" width=\"{}\" height=\"{}\" rx=\"16\" fill=\"url(#greenrepo-bg)\" \
         stroke=\"{}\" stroke-width=\"1\"/>\n",
        WIDTH - 2,
        HEIGHT - 2,
        palette.secondary
    ));
    buffer.push_str(&format!(
        "  <g transform=\"translate(30, 40)\">\n    <circle cx=\"6\" cy=\"2\" r=\"6\" \
         fill=\"{primary}\" opacity=\"0.9\"/>\n    <text x=\"24\" y=\"6\" \
         font-family=\"{FONT_STACK}\" font-size=\"14\" fill=\"#a1a1aa\" font-weight=\"500\" \
         letter-spacing=\"1\">GREEN REPO</text>\n    <text x=\"0\" y=\"42\" \
         font-family=\"{FONT_STACK}\" font-size=\"28\" font-weight=\"800\" \
         fill=\"#e4e4e7\">{label}</text>\n  </g>\n",
        primary = palette.primary
    ));
    buffer.push_str(&format!(
        "  <g transform=\"translate({RING_CENTER_X}, {RING_CENTER_Y})\">\n    <circle cx=\"0\" \
         cy=\"0\" r=\"{RING_RADIUS}\" fill=\"none\" stroke=\"#27272a\" stroke-width=\"8\"/>\n    \
         <circle cx=\"0\" cy=\"0\" r=\"{RING_RADIUS}\" fill=\"none\" stroke=\"{primary}\" \
         stroke-width=\"8\" stroke-dasharray=\"{circumference:.2}\" \
         stroke-dashoffset=\"{offset:.2}\" stroke-linecap=\"round\" \
         transform=\"rotate(-90)\"/>\n    <text x=\"0\" y=\"2\" font-family=\"{FONT_STACK}\" \
         font-size=\"22\" font-weight=\"bold\" fill=\"#ffffff\" text-anchor=\"middle\" \
         dominant-baseline=\"middle\">{grade}</text>\n  </g>\n",
        primary = palette.primary
    ));
    buffer.push_str(
        "  <line x1=\"250\" y1=\"30\" x2=\"250\" y2=\"90\" stroke=\"#27272a\" \
         stroke-width=\"1\"/>\n"
    );
    buffer.push_str("</svg>\n");

    buffer
}

/// Writes `<slug>.svg` and `<slug>.json` for `score` inside `output_dir`.
///
/// The slug is normalized to lowercase ASCII alphanumerics separated by
/// single hyphens, so `octocat/Hello World` becomes `octocat-hello-world`.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the slug has no usable characters,
/// [`Error::BadgeIo`] when directories or files cannot be created and
/// [`Error::Serialize`] if the manifest cannot be encoded.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// # fn main() -> Result<(), greenrepo::Error> {
/// let assets = greenrepo::write_badge_assets(87, "octocat/hello", Path::new("badges"))?;
/// println!("SVG: {}", assets.svg_path.display());
/// # Ok(())
/// # }
/// ```
pub fn write_badge_assets(score: u8, slug: &str, output_dir: &Path) -> Result<BadgeAssets, Error> {
    let slug = badge_slug(slug).ok_or_else(|| {
        Error::validation(format!("badge slug {slug:?} has no usable characters"))
    })?;
    fs::create_dir_all(output_dir).map_err(|source| error::badge_io_error(output_dir, source))?;

    let svg_path = output_dir.join(format!("{slug}.svg"));
    let manifest_path = output_dir.join(format!("{slug}.json"));

    write_svg(&svg_path, score)?;
    write_manifest(&manifest_path, &slug, score, &svg_path)?;

    Ok(BadgeAssets {
        svg_path,
        manifest_path
    })
}

fn write_svg(path: &Path, score: u8) -> Result<(), Error> {
    let contents = render_badge_svg(score);
    let file = File::create(path).map_err(|source| error::badge_io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .map_err(|source| error::badge_io_error(path, source))?;
    writer
        .flush()
        .map_err(|source| error::badge_io_error(path, source))
}

fn write_manifest(path: &Path, slug: &str, score: u8, svg_path: &Path) -> Result<(), Error> {
    let score = score.min(MAX_SCORE);
    let grade = Grade::from_score(score);
    let palette = grade.palette();
    let manifest = BadgeManifest {
        slug,
        score,
        grade,
        label: grade.label(),
        primary_color: palette.primary,
        secondary_color: palette.secondary,
        svg_artifact: path_to_string(svg_path)
    };

    let file = File::create(path).map_err(|source| error::badge_io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &manifest)?;
    writer
        .write_all(b"\n")
        .map_err(|source| error::badge_io_error(path, source))?;
    writer
        .flush()
        .map_err(|source| error::badge_io_error(path, source))
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Circumference of the ring and the dash offset leaving `score` percent
/// of it drawn.
fn ring_geometry(score: u8) -> (f64, f64) {
    let circumference = 2.0 * PI * RING_RADIUS;
    let filled = f64::from(score) / f64::from(MAX_SCORE) * circumference;
    (circumference, circumference - filled)
}

fn badge_slug(source: &str) -> Option<String> {
    let trimmed = source.trim();
    let mut slug = String::with_capacity(trimmed.len());
    let mut previous_hyphen = false;

    for candidate in trimmed.chars() {
        if candidate.is_ascii_alphanumeric() {
            slug.push(candidate.to_ascii_lowercase());
            previous_hyphen = false;
        } else if !previous_hyphen && !slug.is_empty() {
            slug.push('-');
            previous_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    (!slug.is_empty()).then_some(slug)
}

fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len());
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

#[derive(Serialize)]
struct BadgeManifest<'a> {
    slug:            &'a str,
    score:           u8,
    grade:           Grade,
    label:           &'static str,
    primary_color:   &'static str,
    secondary_color: &'static str,
    svg_artifact:    String
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn write_badge_assets_writes_svg_and_manifest() {
        let directory = tempdir().expect("failed to create temp dir");
        let output_dir = directory.path().join("out");

        let assets = write_badge_assets(87, "octocat/Hello World", &output_dir)
            .expect("expected badge generation to succeed");

        assert_eq!(assets.svg_path, output_dir.join("octocat-hello-world.svg"));
        assert!(assets.svg_path.exists());
        assert!(assets.manifest_path.exists());

        let svg = fs::read_to_string(&assets.svg_path).expect("expected svg to be readable");
        assert!(svg.contains("Efficient"));
        assert!(svg.contains("#3b82f6"));

        let manifest =
            fs::read_to_string(&assets.manifest_path).expect("expected manifest to be readable");
        let value: Value =
            serde_json::from_str(&manifest).expect("expected manifest to be valid JSON");
        assert_eq!(value["slug"], "octocat-hello-world");
        assert_eq!(value["score"], 87);
        assert_eq!(value["grade"], "A");
        assert_eq!(value["label"], "Efficient");
        assert!(value["svg_artifact"].as_str().is_some());
    }

    #[test]
    fn write_badge_assets_propagates_directory_errors() {
        let directory = tempdir().expect("failed to create temp dir");
        let file_path = directory.path().join("blocked");
        File::create(&file_path).expect("failed to create placeholder file");

        let error = write_badge_assets(50, DEFAULT_BADGE_SLUG, &file_path)
            .expect_err("expected io failure");

        match error {
            Error::BadgeIo {
                path, ..
            } => {
                assert_eq!(path, file_path);
            }
            other => panic!("unexpected error variant: {other:?}")
        }
    }

    #[test]
    fn write_badge_assets_rejects_empty_slug() {
        let directory = tempdir().expect("failed to create temp dir");
        let error =
            write_badge_assets(50, " // ", directory.path()).expect_err("expected invalid slug");
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn badge_follows_grade_table() {
        for score in [0u8, 50, 51, 61, 71, 81, 90, 91, 100] {
            let grade = Grade::from_score(score);
            let svg = render_badge_svg(score);
            assert!(svg.contains(grade.palette().primary), "score {score}");
            assert!(svg.contains(grade.label()), "score {score}");
            assert!(svg.contains(&format!(">{grade}</text>")), "score {score}");
        }
    }

    #[test]
    fn scores_above_range_render_as_full() {
        assert_eq!(render_badge_svg(250), render_badge_svg(100));
    }

    #[test]
    fn document_is_complete_and_line_terminated() {
        let svg = render_badge_svg(64);

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg "));
        assert!(svg.ends_with("  </g>\n  <line x1=\"250\" y1=\"30\" x2=\"250\" y2=\"90\" \
                               stroke=\"#27272a\" stroke-width=\"1\"/>\n</svg>\n"));
        assert_eq!(svg.matches("<svg ").count(), 1);
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert!(svg.lines().all(|line| !line.is_empty()));
        assert!(svg.contains("stroke-width=\"1\"/>\n  <g transform=\"translate(30, 40)\">"));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_badge_svg(73), render_badge_svg(73));
    }

    #[test]
    fn ring_geometry_tracks_score() {
        let (circumference, empty) = ring_geometry(0);
        assert!((circumference - 2.0 * PI * 35.0).abs() < f64::EPSILON);
        assert!((empty - circumference).abs() < f64::EPSILON);

        let (_, full) = ring_geometry(100);
        assert!(full.abs() < 1e-9);

        let (circumference, half) = ring_geometry(50);
        assert!((half - circumference / 2.0).abs() < 1e-9);
    }

    #[test]
    fn badge_slug_normalizes_input() {
        assert_eq!(badge_slug(" Octocat/Hello.World ").as_deref(), Some("octocat-hello-world"));
        assert_eq!(badge_slug("a--b").as_deref(), Some("a-b"));
        assert_eq!(badge_slug("---").as_deref(), None);
    }

    #[test]
    fn escape_xml_handles_all_special_characters() {
        assert_eq!(escape_xml("&<>\"'normal"), "&amp;&lt;&gt;&quot;&apos;normal");
        assert!(matches!(escape_xml("plain"), Cow::Borrowed("plain")));
    }
}
