//! # Palette Flow
//!
//! A domain-warped flow field pushed through a cosine palette. The screen
//! coordinates are aspect-corrected and softly compressed near the edges,
//! then warped over eight iterations. Each iteration is seeded by a hash of
//! its index and the seed uniform and contributes to two scalar fields:
//! `d` (banding) and `acc` (directional glow).
//!
//! ## Formula
//!
//! ```text
//! uv = compress_edges(2·(frag − res/2)/res.y)
//! for i in 0..8:
//!     h     = hash11(17.13i + 3.7·seed + 1)
//!     f     = 1 + 0.35i·complexity
//!     φ     = 2πh + t(0.3 + 0.2h)
//!     n     = noise(0.8p + 3.1i + seed) − 0.5
//!     p    += 0.3·intensity/f · (sin(p.y·f + φ) + n, cos(p.x·f − 0.8φ) − n)
//!     d    += sin(p.x·f + cos(0.7p.y·f + φ)) / f
//!     acc  += (0.5 + 0.5cos(dot(p, dir(h))·f + 0.5t)) / (1 + i)
//! v     = 0.5 + 0.5·sin(0.9d + 1.3acc − 0.1t)
//! color = grade(palette(v) · (0.75 + 0.25·(0.5 + 0.5cos(d + acc·(1, 1.3, 1.7) + (0, 2.1, 4.2)))))
//! ```
//!
//! The red variant ([`super::red`]) runs the same flow with its own hash
//! key, palette and grading.

use std::f32::consts::TAU;
use std::fmt;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::shader::{
    Grading, HashKey, PaletteParams, Rgba, aspect_uv, compress_edges, hash11, stepped_palette,
    value_noise2d,
};
use crate::uniforms::Uniforms;

use super::{Effect, ParamSpec, format_vec3, parse_f32, parse_u32, parse_vec3};

/// Warp iterations per fragment.
pub const FLOW_STEPS: u32 = 8;

/// Parameters for the palette flow (shared with the red variant).
#[derive(Debug, Clone)]
pub struct Params {
    /// Time multiplier. Default: 0.4
    pub speed: f32,
    /// Coordinate zoom. Default: 1.2
    pub scale: f32,
    /// Strength of the warp. Default: 1.0
    pub wave_intensity: f32,
    /// Frequency growth per iteration. Default: 1.0
    pub complexity: f32,
    /// |coordinate| where edge compression starts. Default: 0.8
    pub edge_threshold: f32,
    /// Scale applied to coordinates far past the threshold. Default: 0.35
    pub edge_compression: f32,
    /// Cosine palette.
    pub palette: PaletteParams,
    /// Number of palette bands, 0 for a continuous palette. Default: 0
    pub stop_count: u32,
    /// Blend width between bands. Default: 0.5
    pub blend_softness: f32,
    /// Post-processing after the palette lookup.
    pub grading: Grading,
    /// Hash constants for the warp noise.
    pub key: HashKey,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            speed: 0.4,
            scale: 1.2,
            wave_intensity: 1.0,
            complexity: 1.0,
            edge_threshold: 0.8,
            edge_compression: 0.35,
            palette: PaletteParams::default(),
            stop_count: 0,
            blend_softness: 0.5,
            grading: Grading::default(),
            key: HashKey::FLOW,
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let palette = PaletteParams {
            a: random_vec3(&mut rng, 0.4, 0.7),
            b: random_vec3(&mut rng, 0.25, 0.5),
            c: random_vec3(&mut rng, 0.5, 1.5),
            d: random_vec3(&mut rng, 0.0, 1.0),
        };
        Self {
            speed: rng.random_range(0.2..0.8),
            scale: rng.random_range(0.8..1.8),
            wave_intensity: rng.random_range(0.6..1.5),
            complexity: rng.random_range(0.6..1.6),
            palette,
            ..Self::default()
        }
    }

    /// Set a flow parameter by name. `effect` names the effect in errors.
    pub fn set(&mut self, effect: &str, name: &str, value: &str) -> Result<(), String> {
        match name {
            "speed" => self.speed = parse_f32(value)?,
            "scale" => self.scale = parse_f32(value)?,
            "wave_intensity" => self.wave_intensity = parse_f32(value)?,
            "complexity" => self.complexity = parse_f32(value)?,
            "edge_threshold" => self.edge_threshold = parse_f32(value)?.max(0.0),
            "edge_compression" => self.edge_compression = parse_f32(value)?,
            "palette_a" => self.palette.a = parse_vec3(value)?,
            "palette_b" => self.palette.b = parse_vec3(value)?,
            "palette_c" => self.palette.c = parse_vec3(value)?,
            "palette_d" => self.palette.d = parse_vec3(value)?,
            "stop_count" => self.stop_count = parse_u32(value)?.min(64),
            "blend_softness" => self.blend_softness = parse_f32(value)?.clamp(0.0, 1.0),
            "vividness" => self.grading.vividness = parse_f32(value)?,
            "bloom" => self.grading.bloom = parse_f32(value)?,
            "warm_bias" => self.grading.warm_bias = parse_f32(value)?.clamp(0.0, 1.0),
            "hue_drift" => self.grading.hue_drift = parse_f32(value)?,
            "gamma" => self.grading.gamma = parse_f32(value)?,
            _ => return Err(format!("Unknown param '{}' for {}", name, effect)),
        }
        Ok(())
    }

    /// Current values, formatted so [`Params::set`] reads them back.
    pub fn list(&self) -> Vec<(&'static str, String)> {
        vec![
            ("speed", format!("{:.2}", self.speed)),
            ("scale", format!("{:.2}", self.scale)),
            ("wave_intensity", format!("{:.2}", self.wave_intensity)),
            ("complexity", format!("{:.2}", self.complexity)),
            ("edge_threshold", format!("{:.2}", self.edge_threshold)),
            ("edge_compression", format!("{:.2}", self.edge_compression)),
            ("palette_a", format_vec3(self.palette.a)),
            ("palette_b", format_vec3(self.palette.b)),
            ("palette_c", format_vec3(self.palette.c)),
            ("palette_d", format_vec3(self.palette.d)),
            ("stop_count", self.stop_count.to_string()),
            ("blend_softness", format!("{:.2}", self.blend_softness)),
            ("vividness", format!("{:.2}", self.grading.vividness)),
            ("bloom", format!("{:.2}", self.grading.bloom)),
            ("warm_bias", format!("{:.2}", self.grading.warm_bias)),
            ("hue_drift", format!("{:.3}", self.grading.hue_drift)),
            ("gamma", format!("{:.2}", self.grading.gamma)),
        ]
    }

    pub fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("speed", "Animation Speed", 0.1, 2.0, 0.05)
                .with_description("0.1 slow .. 2.0 fast"),
            ParamSpec::slider("scale", "Texture Scale", 0.5, 3.0, 0.05)
                .with_description("Zoom of the flow"),
            ParamSpec::slider("wave_intensity", "Wave Intensity", 0.0, 2.0, 0.05)
                .with_description("Strength of the domain warp"),
            ParamSpec::slider("complexity", "Wave Complexity", 0.2, 2.0, 0.05)
                .with_description("Frequency growth per warp iteration"),
            ParamSpec::slider("edge_threshold", "Edge Threshold", 0.3, 1.5, 0.05)
                .with_description("Where edge compression starts"),
            ParamSpec::slider("edge_compression", "Edge Compression", 0.1, 1.0, 0.05)
                .with_description("1.0 disables edge compression"),
            ParamSpec::color("palette_a", "Palette A").with_description("Palette offset"),
            ParamSpec::color("palette_b", "Palette B").with_description("Palette amplitude"),
            ParamSpec::color("palette_c", "Palette C").with_description("Palette frequency"),
            ParamSpec::color("palette_d", "Palette D").with_description("Palette phase"),
            ParamSpec::int("stop_count", "Stop Count", Some(0), Some(64))
                .with_description("Palette bands, 0 for continuous"),
            ParamSpec::slider("blend_softness", "Blend Softness", 0.0, 1.0, 0.05)
                .with_description("Blend width between bands"),
            ParamSpec::slider("vividness", "Vividness", 0.0, 1.0, 0.05),
            ParamSpec::slider("bloom", "Bloom", 0.0, 0.5, 0.01),
            ParamSpec::slider("warm_bias", "Warm Bias", 0.0, 1.0, 0.01),
            ParamSpec::slider("hue_drift", "Hue Drift", -0.5, 0.5, 0.01)
                .with_description("Hue rotation in radians per second"),
            ParamSpec::slider("gamma", "Gamma", 0.8, 1.2, 0.01),
        ]
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed={:.2} scale={:.2} intensity={:.2} complexity={:.2} stops={}",
            self.speed, self.scale, self.wave_intensity, self.complexity, self.stop_count
        )
    }
}

fn random_vec3(rng: &mut impl Rng, lo: f32, hi: f32) -> Vec3 {
    Vec3::new(
        rng.random_range(lo..hi),
        rng.random_range(lo..hi),
        rng.random_range(lo..hi),
    )
}

/// Run the warp loop and return the `(d, acc)` fields at `uv`.
pub fn flow_fields(uv: Vec2, t: f32, seed: f32, params: &Params) -> (f32, f32) {
    let mut p = uv * params.scale;
    let mut d = 0.0;
    let mut acc = 0.0;

    for i in 0..FLOW_STEPS {
        let fi = i as f32;
        let h = hash11(fi * 17.13 + seed * 3.7 + 1.0);
        let freq = 1.0 + fi * 0.35 * params.complexity;
        let phase = h * TAU + t * (0.3 + 0.2 * h);

        let n = value_noise2d(p * 0.8 + Vec2::splat(fi * 3.1 + seed), params.key) - 0.5;
        p += params.wave_intensity * 0.3 / freq
            * Vec2::new((p.y * freq + phase).sin() + n, (p.x * freq - phase * 0.8).cos() - n);

        d += (p.x * freq + (p.y * freq * 0.7 + phase).cos()).sin() / freq;
        let dir = Vec2::new((h * TAU).cos(), (h * TAU).sin());
        acc += (0.5 + 0.5 * (p.dot(dir) * freq + t * 0.5).cos()) / (1.0 + fi);
    }

    (d, acc)
}

/// Compute the flow color at a fragment.
pub fn shade(uniforms: &Uniforms, frag: Vec2, params: &Params) -> Rgba {
    let t = uniforms.time * params.speed;
    let uv = aspect_uv(frag, uniforms.resolution.as_vec2()) * 2.0;
    let uv = compress_edges(uv, params.edge_threshold, params.edge_compression);

    let (d, acc) = flow_fields(uv, t, uniforms.seed, params);

    let v = 0.5 + 0.5 * (0.9 * d + 1.3 * acc - 0.1 * t).sin();
    let base = if params.stop_count > 0 {
        stepped_palette(v, &params.palette, params.stop_count, params.blend_softness)
    } else {
        params.palette.at(v)
    };

    let wave = Vec3::splat(d) + acc * Vec3::new(1.0, 1.3, 1.7) + Vec3::new(0.0, 2.1, 4.2);
    let modulation = Vec3::splat(0.5)
        + 0.5 * Vec3::new(wave.x.cos(), wave.y.cos(), wave.z.cos());
    let color = base * (Vec3::splat(0.75) + 0.25 * modulation);

    Rgba::from_vec3(params.grading.apply(color, t))
}

/// Palette flow effect.
#[derive(Debug, Clone)]
pub struct PaletteFlow {
    params: Params,
}

impl Default for PaletteFlow {
    fn default() -> Self {
        Self::golden()
    }
}

impl PaletteFlow {
    pub fn golden() -> Self {
        Self { params: Params::default() }
    }

    pub fn random() -> Self {
        Self { params: Params::random() }
    }

    pub fn with_params(params: Params) -> Self {
        Self { params }
    }
}

impl Effect for PaletteFlow {
    fn name(&self) -> &'static str {
        "palette"
    }

    fn evaluate(&self, uniforms: &Uniforms, frag: Vec2) -> Rgba {
        shade(uniforms, frag, &self.params)
    }

    fn params_description(&self) -> String {
        self.params.to_string()
    }

    fn set_param(&mut self, name: &str, value: &str) -> Result<(), String> {
        self.params.set("palette", name, value)
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        self.params.list()
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        Params::specs()
    }
}
