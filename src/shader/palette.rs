//! Palette generators: scalar intensity in, RGB out.
//!
//! Three building blocks:
//!
//! - [`cosine_palette`]: `a + b·cos(2π(c·t + d))`, four vectors describe a
//!   whole smooth palette
//! - [`multi_stop_gradient`]: piecewise-linear interpolation between explicit
//!   color stops
//! - [`Grading`]: post-processing on the palette output (vividness, bloom,
//!   warm bias, hue drift, gamma), always in that order

use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::adjust::gamma_vec3;
use super::blend::{mix, smoothstep};
use super::color::{hue_rotate, luma};

/// The four vectors of a cosine palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaletteParams {
    /// Offset (the palette's mean color).
    pub a: Vec3,
    /// Amplitude.
    pub b: Vec3,
    /// Frequency per channel.
    pub c: Vec3,
    /// Phase per channel.
    pub d: Vec3,
}

impl Default for PaletteParams {
    fn default() -> Self {
        Self {
            a: Vec3::new(0.9, 0.5, 0.6),
            b: Vec3::new(0.3, 0.4, 0.5),
            c: Vec3::new(1.5, 0.8, 1.2),
            d: Vec3::new(0.2, 0.5, 0.8),
        }
    }
}

impl PaletteParams {
    /// Deep reds and oranges.
    pub const EMBER: PaletteParams = PaletteParams {
        a: Vec3::new(0.6, 0.2, 0.15),
        b: Vec3::new(0.4, 0.2, 0.1),
        c: Vec3::new(1.0, 0.9, 0.7),
        d: Vec3::new(0.0, 0.15, 0.25),
    };

    /// Evaluate the palette at `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        cosine_palette(t, self.a, self.b, self.c, self.d)
    }
}

/// Cosine palette: `a + b·cos(2π(c·t + d))`.
///
/// The output is not clamped; callers clamp once at the end of the chain.
#[inline]
pub fn cosine_palette(t: f32, a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Vec3 {
    let phase = TAU * (c * t + d);
    a + b * Vec3::new(phase.x.cos(), phase.y.cos(), phase.z.cos())
}

/// Quantize `t` into `stop_count` bands of the palette, blending across
/// each band edge over `softness` (fraction of a band, 0 = hard edges).
pub fn stepped_palette(t: f32, params: &PaletteParams, stop_count: u32, softness: f32) -> Vec3 {
    let n = stop_count.max(1) as f32;
    let scaled = t.clamp(0.0, 1.0) * n;
    let band = scaled.floor().min(n - 1.0);
    let within = scaled - band;

    let lower = params.at(band / n);
    let upper = params.at(((band + 1.0).min(n - 1.0)) / n);

    let half = (softness.clamp(0.0, 1.0) * 0.5).max(1e-4);
    let blend = smoothstep(1.0 - half, 1.0 + half, within);
    mix(lower, upper, blend)
}

/// A color stop for [`multi_stop_gradient`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position in [0, 1]. Stops must be sorted by position.
    pub position: f32,
    /// Color at this position.
    pub color: Vec3,
}

impl ColorStop {
    pub const fn new(position: f32, color: Vec3) -> Self {
        Self { position, color }
    }
}

/// Piecewise-linear interpolation across sorted color stops.
///
/// `t` before the first stop returns the first color, past the last stop
/// returns the last color. An empty slice returns black.
pub fn multi_stop_gradient(t: f32, stops: &[ColorStop]) -> Vec3 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Vec3::ZERO;
    };
    if t <= first.position {
        return first.color;
    }
    if t >= last.position {
        return last.color;
    }

    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.position {
            let span = hi.position - lo.position;
            if span <= 0.0 {
                return hi.color;
            }
            return mix(lo.color, hi.color, (t - lo.position) / span);
        }
    }

    last.color
}

/// Color grading applied after a palette lookup.
///
/// Stages run in a fixed order: vividness, bloom, warm bias, hue drift,
/// gamma. A zero amount disables a stage (gamma 1.0 disables gamma).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grading {
    /// Saturation boost around the color's own luma. 0 = unchanged.
    pub vividness: f32,
    /// Additive highlight above `bloom_threshold`.
    pub bloom: f32,
    /// Luma where bloom starts.
    pub bloom_threshold: f32,
    /// Blend amount toward `warm_target`.
    pub warm_bias: f32,
    /// Warm (or cool) target color.
    pub warm_target: Vec3,
    /// Hue rotation in radians per second of time.
    pub hue_drift: f32,
    /// Output gamma.
    pub gamma: f32,
}

impl Default for Grading {
    fn default() -> Self {
        Self {
            vividness: 0.25,
            bloom: 0.12,
            bloom_threshold: 0.65,
            warm_bias: 0.08,
            warm_target: Vec3::new(1.0, 0.72, 0.45),
            hue_drift: 0.05,
            gamma: 0.92,
        }
    }
}

impl Grading {
    /// Grading that leaves colors untouched.
    pub const NEUTRAL: Grading = Grading {
        vividness: 0.0,
        bloom: 0.0,
        bloom_threshold: 1.0,
        warm_bias: 0.0,
        warm_target: Vec3::ONE,
        hue_drift: 0.0,
        gamma: 1.0,
    };

    /// Run the grading chain on `color` at `time` seconds.
    pub fn apply(&self, color: Vec3, time: f32) -> Vec3 {
        let mut c = color;

        // vividness
        let y = luma(c);
        c = Vec3::splat(y) + (c - Vec3::splat(y)) * (1.0 + self.vividness);

        // bloom
        if self.bloom != 0.0 {
            c += Vec3::splat(self.bloom * smoothstep(self.bloom_threshold, 1.0, luma(c)));
        }

        // warm bias
        c = mix(c, self.warm_target, self.warm_bias);

        // hue drift
        if self.hue_drift != 0.0 {
            c = hue_rotate(c, self.hue_drift * time);
        }

        gamma_vec3(c, self.gamma)
    }
}
