//! # Moving Waves
//!
//! Rolling hills: stacked sinusoidal height fields drawn back to front over
//! a vertical sky gradient. Farther layers sit higher on screen, move slower
//! and fade toward the sky color.
//!
//! ## Formula
//!
//! ```text
//! h_i(x) = base_i + amp·(sin(x·f_i + t·s_i + φ_i) + 0.5·sin(2.3x·f_i − 0.7t·s_i))
//! mask_i = 1 − smoothstep(h_i − edge, h_i + edge, y)
//! color  = mix(color, layer_color_i, mask_i)
//! ```

use std::fmt;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::shader::{Rgba, mix, smoothstep};
use crate::uniforms::Uniforms;

use super::{Effect, ParamSpec, format_vec3, parse_f32, parse_u32, parse_vec3};

/// Parameters for the moving waves effect.
#[derive(Debug, Clone)]
pub struct Params {
    /// Time multiplier. Default: 1.0
    pub speed: f32,
    /// Height of the waves. Default: 1.0
    pub wave_intensity: f32,
    /// Number of hill layers. Default: 4
    pub complexity: u32,
    /// Softness of each hill edge, in screen heights. Default: 0.004
    pub edge: f32,
    /// Sky color at the top. Default: (0.16, 0.22, 0.45)
    pub sky_top: Vec3,
    /// Sky color at the horizon. Default: (0.85, 0.55, 0.55)
    pub sky_bottom: Vec3,
    /// Color of the nearest hill. Default: (0.06, 0.08, 0.18)
    pub hill_color: Vec3,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            speed: 1.0,
            wave_intensity: 1.0,
            complexity: 4,
            edge: 0.004,
            sky_top: Vec3::new(0.16, 0.22, 0.45),
            sky_bottom: Vec3::new(0.85, 0.55, 0.55),
            hill_color: Vec3::new(0.06, 0.08, 0.18),
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            speed: rng.random_range(0.5..1.5),
            wave_intensity: rng.random_range(0.5..1.6),
            complexity: rng.random_range(2..7),
            ..Self::default()
        }
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed={:.2} intensity={:.2} layers={} edge={:.3}",
            self.speed, self.wave_intensity, self.complexity, self.edge
        )
    }
}

/// Height of hill layer `i` of `n` at horizontal position `x` (screen heights).
fn layer_height(i: u32, n: u32, x: f32, t: f32, intensity: f32) -> f32 {
    let depth = if n > 1 { i as f32 / (n - 1) as f32 } else { 1.0 };
    // depth 0 = farthest layer
    let base = 0.62 - 0.42 * depth;
    let amp = 0.035 * intensity * (0.6 + 0.8 * depth);
    let freq = 2.0 + 1.5 * depth + i as f32 * 0.37;
    let speed = 0.15 + 0.35 * depth;
    let phase = i as f32 * 1.7;
    base + amp * ((x * freq + t * speed + phase).sin() + 0.5 * (2.3 * x * freq - 0.7 * t * speed).sin())
}

/// Compute the moving waves color at a fragment.
pub fn shade(uniforms: &Uniforms, frag: Vec2, params: &Params) -> Rgba {
    let t = uniforms.time * params.speed;
    let res = uniforms.resolution.as_vec2();
    let y = frag.y / res.y;
    let x = frag.x / res.y;

    let mut color = mix(params.sky_bottom, params.sky_top, smoothstep(0.0, 1.0, y));

    let n = params.complexity.max(1);
    for i in 0..n {
        let depth = if n > 1 { i as f32 / (n - 1) as f32 } else { 1.0 };
        let h = layer_height(i, n, x, t, params.wave_intensity);
        let mask = 1.0 - smoothstep(h - params.edge, h + params.edge, y);
        // Far layers take on the sky color (aerial perspective)
        let haze = mix(params.sky_bottom, params.sky_top, 0.35);
        let layer = mix(haze, params.hill_color, 0.35 + 0.65 * depth);
        // Darker toward the bottom of each hill
        let shading = 1.0 - 0.25 * smoothstep(h, h - 0.3, y);
        color = mix(color, layer * shading, mask);
    }

    Rgba::from_vec3(color)
}

/// Moving waves effect.
#[derive(Debug, Clone)]
pub struct MovingWaves {
    params: Params,
}

impl Default for MovingWaves {
    fn default() -> Self {
        Self::golden()
    }
}

impl MovingWaves {
    pub fn golden() -> Self {
        Self { params: Params::default() }
    }

    pub fn random() -> Self {
        Self { params: Params::random() }
    }
}

impl Effect for MovingWaves {
    fn name(&self) -> &'static str {
        "moving_waves"
    }

    fn evaluate(&self, uniforms: &Uniforms, frag: Vec2) -> Rgba {
        shade(uniforms, frag, &self.params)
    }

    fn params_description(&self) -> String {
        self.params.to_string()
    }

    fn set_param(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "speed" => self.params.speed = parse_f32(value)?,
            "wave_intensity" => self.params.wave_intensity = parse_f32(value)?,
            "complexity" => self.params.complexity = parse_u32(value)?.clamp(1, 8),
            "edge" => self.params.edge = parse_f32(value)?.max(1e-4),
            "sky_top" => self.params.sky_top = parse_vec3(value)?,
            "sky_bottom" => self.params.sky_bottom = parse_vec3(value)?,
            "hill_color" => self.params.hill_color = parse_vec3(value)?,
            _ => return Err(format!("Unknown param '{}' for moving_waves", name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("speed", format!("{:.2}", self.params.speed)),
            ("wave_intensity", format!("{:.2}", self.params.wave_intensity)),
            ("complexity", self.params.complexity.to_string()),
            ("edge", format!("{:.4}", self.params.edge)),
            ("sky_top", format_vec3(self.params.sky_top)),
            ("sky_bottom", format_vec3(self.params.sky_bottom)),
            ("hill_color", format_vec3(self.params.hill_color)),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("speed", "Speed", 0.1, 2.0, 0.05)
                .with_description("Animation speed"),
            ParamSpec::slider("wave_intensity", "Wave Intensity", 0.0, 2.0, 0.05)
                .with_description("Height of the waves"),
            ParamSpec::int("complexity", "Layers", Some(1), Some(8))
                .with_description("Number of hill layers"),
            ParamSpec::slider("edge", "Edge Softness", 0.001, 0.02, 0.001),
            ParamSpec::color("sky_top", "Sky Top"),
            ParamSpec::color("sky_bottom", "Horizon"),
            ParamSpec::color("hill_color", "Hill Color"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::Resolution;

    #[test]
    fn test_top_is_sky() {
        let params = Params::default();
        let u = Uniforms::new(3.0, Resolution::new(300.0, 600.0));
        let c = shade(&u, Vec2::new(150.0, 600.0), &params);
        assert!((c.rgb() - params.sky_top).length() < 1e-4);
    }

    #[test]
    fn test_bottom_is_nearest_hill() {
        let params = Params::default();
        let u = Uniforms::new(3.0, Resolution::new(300.0, 600.0));
        let c = shade(&u, Vec2::new(150.0, 0.0), &params);
        // Fully under the front layer: its color, shaded by at most 25%
        let rgb = c.rgb();
        assert!(rgb.cmple(params.hill_color + Vec3::splat(1e-4)).all());
        assert!(rgb.cmpge(params.hill_color * 0.75 - Vec3::splat(1e-4)).all());
    }

    #[test]
    fn test_layer_height_bounded() {
        for i in 0..4 {
            for step in 0..100 {
                let h = layer_height(i, 4, step as f32 * 0.05, 10.0, 1.0);
                assert!(h > 0.0 && h < 1.0);
            }
        }
    }
}
