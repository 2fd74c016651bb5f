//! # Golden Tests
//!
//! These tests pin shader output so refactors of the math can't silently
//! change how a background looks.
//!
//! ## Test Coverage
//!
//! - **Golden samples** (`.json`): every shader sampled at a handful of
//!   fragments and times, compared per channel with a 1e-4 tolerance.
//! - **Properties**: determinism, the range invariant, resolution
//!   invariance and frame dimensions, which hold without golden files.
//!
//! ## Regenerating Golden Files
//!
//! ```bash
//! cargo test generate_golden_files -- --ignored --nocapture
//! ```
//!
//! Every shader in [`ShaderKind::ALL`] needs a golden file; a missing one
//! fails the comparison.

use backdrop::background::Background;
use backdrop::effects::{self, ShaderKind};
use backdrop::render;
use backdrop::shader::Rgba;
use backdrop::uniforms::{Resolution, Uniforms};
use backdrop::ShaderDescriptor;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Path to golden test directory
const GOLDEN_DIR: &str = "tests/golden";

/// Per-channel tolerance for golden comparisons.
const TOLERANCE: f32 = 1e-4;

/// Sample grid resolution shared by all golden files.
const GOLDEN_RESOLUTION: Resolution = Resolution::new(800.0, 600.0);

const GOLDEN_TIMES: &[f32] = &[0.0, 1.25, 7.5];

const GOLDEN_FRAGS: &[[f32; 2]] = &[
    [400.0, 300.0],
    [0.5, 0.5],
    [799.5, 599.5],
    [123.0, 456.0],
    [640.0, 80.0],
    // on the glowing ring
    [400.0, 492.0],
    [560.0, 380.0],
];

#[derive(Debug, Serialize, Deserialize)]
struct GoldenSample {
    time: f32,
    frag: [f32; 2],
    rgba: [f32; 4],
}

#[derive(Debug, Serialize, Deserialize)]
struct GoldenFile {
    shader: String,
    width: f32,
    height: f32,
    samples: Vec<GoldenSample>,
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn golden_path(name: &str) -> PathBuf {
    PathBuf::from(GOLDEN_DIR).join(format!("{}.json", name))
}

/// Sample a shader (default parameters, no speed modifier) on the golden grid.
fn sample_shader(kind: ShaderKind) -> GoldenFile {
    let effect = kind.build();
    let mut samples = Vec::new();
    for &time in GOLDEN_TIMES {
        let uniforms = Uniforms::new(time, GOLDEN_RESOLUTION);
        for &frag in GOLDEN_FRAGS {
            let c = effect.evaluate(&uniforms, Vec2::from(frag));
            samples.push(GoldenSample {
                time,
                frag,
                rgba: [c.r, c.g, c.b, c.a],
            });
        }
    }
    GoldenFile {
        shader: kind.name().to_string(),
        width: GOLDEN_RESOLUTION.width,
        height: GOLDEN_RESOLUTION.height,
        samples,
    }
}

/// Write a golden file
fn write_golden(file: &GoldenFile) {
    let path = golden_path(&file.shader);
    let json = serde_json::to_string_pretty(file).expect("golden file serializes");
    fs::write(&path, json).unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    println!("Wrote {} ({} samples)", path.display(), file.samples.len());
}

/// Compare fresh samples against a golden file.
fn check_golden(actual: &GoldenFile) {
    let path = golden_path(&actual.shader);
    let json = fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Golden file {} unreadable ({}). Run `cargo test generate_golden_files -- --ignored` to generate.",
            path.display(),
            e
        )
    });
    let golden: GoldenFile = serde_json::from_str(&json)
        .unwrap_or_else(|e| panic!("Corrupt golden file {}: {}", path.display(), e));

    assert_eq!(golden.samples.len(), actual.samples.len(), "{}: sample count", path.display());
    for (g, a) in golden.samples.iter().zip(&actual.samples) {
        assert_eq!((g.time, g.frag), (a.time, a.frag), "{}: sample order", path.display());
        for ch in 0..4 {
            let diff = (g.rgba[ch] - a.rgba[ch]).abs();
            assert!(
                diff <= TOLERANCE,
                "Golden mismatch for {} at t={} frag={:?}: channel {} golden {} actual {}.\n\
                 Regenerate if this change is intentional.",
                actual.shader,
                a.time,
                a.frag,
                ch,
                g.rgba[ch],
                a.rgba[ch]
            );
        }
    }
}

fn assert_in_range(c: Rgba, context: &str) {
    for v in [c.r, c.g, c.b] {
        assert!((0.0..=1.0).contains(&v), "{}: channel {} out of range", context, v);
    }
    assert_eq!(c.a, 1.0, "{}: alpha", context);
}

// ============================================================================
// GOLDEN FILE GENERATOR
// ============================================================================

/// Generate golden samples for every shader.
/// Run with: cargo test generate_golden_files -- --ignored --nocapture
#[test]
#[ignore]
fn generate_golden_files() {
    fs::create_dir_all(GOLDEN_DIR).expect("create golden dir");
    for kind in ShaderKind::ALL {
        write_golden(&sample_shader(kind));
    }
}

// ============================================================================
// GOLDEN COMPARISONS
// ============================================================================

#[test]
fn test_golden_files_present() {
    for kind in ShaderKind::ALL {
        assert!(golden_path(kind.name()).exists(), "no golden file for {}", kind);
    }
}

#[test]
fn test_golden_all_shaders() {
    for kind in ShaderKind::ALL {
        check_golden(&sample_shader(kind));
    }
}

/// The palette at the screen centre at t=0 is pinned independently of the
/// golden files.
#[test]
fn test_palette_center_pinned() {
    let c = ShaderDescriptor::of(ShaderKind::Palette).evaluate(
        0.0,
        GOLDEN_RESOLUTION,
        Vec2::new(400.0, 300.0),
    );
    let expected = [0.792_037_1, 0.340_903_97, 1.0];
    for (actual, expected) in [c.r, c.g, c.b].into_iter().zip(expected) {
        assert!(
            (actual - expected).abs() <= TOLERANCE,
            "palette centre {:?}, expected {:?}",
            c,
            expected
        );
    }
}

/// The palette sample at the screen centre at t=0 is reproducible.
#[test]
fn test_palette_center_reproducible() {
    let descriptor = ShaderDescriptor::of(ShaderKind::Palette);
    let frag = Vec2::new(400.0, 300.0);
    let first = descriptor.evaluate(0.0, GOLDEN_RESOLUTION, frag);
    for _ in 0..5 {
        let again = ShaderDescriptor::of(ShaderKind::Palette).evaluate(0.0, GOLDEN_RESOLUTION, frag);
        for (a, b) in [(first.r, again.r), (first.g, again.g), (first.b, again.b)] {
            assert!((a - b).abs() <= TOLERANCE);
        }
    }
    assert_in_range(first, "palette centre");
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

/// Every shader stays in range over a coarse grid, including at large times.
#[test]
fn test_all_shaders_in_range() {
    let res = Resolution::new(96.0, 54.0);
    for kind in ShaderKind::ALL {
        let effect = kind.build();
        for time in [0.0, 3.3, 1000.0] {
            let uniforms = Uniforms::new(time, res);
            for y in (0..54).step_by(9) {
                for x in (0..96).step_by(12) {
                    let frag = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                    assert_in_range(
                        effect.evaluate(&uniforms, frag),
                        &format!("{} t={} ({}, {})", kind, time, x, y),
                    );
                }
            }
        }
    }
}

/// Same normalized coordinate at two resolutions with the same aspect ratio
/// gives the same color.
#[test]
fn test_resolution_invariance() {
    let small = Resolution::new(800.0, 600.0);
    let large = Resolution::new(1600.0, 1200.0);
    for kind in ShaderKind::ALL {
        let effect = kind.build();
        for &[x, y] in GOLDEN_FRAGS {
            let a = effect.evaluate(&Uniforms::new(2.0, small), Vec2::new(x, y));
            let b = effect.evaluate(&Uniforms::new(2.0, large), Vec2::new(2.0 * x, 2.0 * y));
            let diff = (a.rgb() - b.rgb()).abs().max_element();
            assert!(diff < 1e-3, "{} at ({}, {}): diff {}", kind, x, y, diff);
        }
    }
}

/// Test that shader output is deterministic (same input = same output)
#[test]
fn test_shader_determinism() {
    let res = Resolution::new(64.0, 36.0);
    for kind in ShaderKind::ALL {
        let bg = Background::shader(kind);
        let a = render::render_frame(&bg, 4.2, res).unwrap();
        let b = render::render_frame(&bg, 4.2, res).unwrap();
        assert_eq!(a.as_raw(), b.as_raw(), "{} should be deterministic", kind);
    }
}

/// Test that every listed shader can be retrieved by name
#[test]
fn test_all_shaders_accessible() {
    for kind in ShaderKind::ALL {
        let effect = effects::by_name(kind.name());
        assert!(effect.is_some(), "Shader '{}' listed but not accessible", kind);
        let bg: Background = format!("shader:{}", kind).parse().unwrap();
        assert!(bg.is_animated());
    }
}

#[test]
fn test_frame_dimensions() {
    let bg = Background::shader(ShaderKind::MovingWaves);
    let img = render::render_frame(&bg, 1.0, Resolution::new(390.0, 844.0)).unwrap();
    assert_eq!(img.dimensions(), (390, 844));
}

#[test]
fn test_crossfade_midpoint_between_solids() {
    let from: Background = "solid:#000000".parse().unwrap();
    let to: Background = "solid:#ffffff".parse().unwrap();
    let fade = render::Crossfade::new(from, 0.0, to, 1.0).curve(render::BlendCurve::Linear);
    let img = fade.render(0.5, Resolution::new(4.0, 4.0)).unwrap();
    for px in img.pixels() {
        assert!((127..=128).contains(&px.0[0]), "{:?}", px);
        assert_eq!(px.0[3], 255);
    }
}
