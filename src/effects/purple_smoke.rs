//! # Purple Smoke
//!
//! Fractal noise warped by itself twice, giving slow curling smoke. The
//! final noise value picks a color from four stops, dark violet to lilac.
//!
//! ## Formula
//!
//! ```text
//! q = (fbm(p + 0.1t), fbm(p + (5.2, 1.3)))
//! r = (fbm(p + warp·q + (1.7, 9.2) + 0.15t), fbm(p + warp·q + (8.3, 2.8) + 0.126t))
//! f = fbm(p + warp·r)
//! color = gradient(f)    stops at 0.14, 0.30, 0.50, 0.70
//! ```

use std::fmt;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::shader::{ColorStop, HashKey, Rgba, aspect_uv, fbm2d, multi_stop_gradient};
use crate::uniforms::Uniforms;

use super::{Effect, ParamSpec, format_vec3, parse_f32, parse_u32, parse_vec3};

/// Parameters for the purple smoke.
#[derive(Debug, Clone)]
pub struct Params {
    /// Time multiplier. Default: 1.0
    pub speed: f32,
    /// Noise zoom. Default: 2.5
    pub scale: f32,
    /// Fbm octaves. Default: 5
    pub octaves: u32,
    /// Strength of each warp. Default: 4.0
    pub warp: f32,
    /// Stop colors, darkest first.
    pub colors: [Vec3; 4],
}

/// Stop positions along the noise value.
const STOP_POSITIONS: [f32; 4] = [0.14, 0.30, 0.50, 0.70];

impl Default for Params {
    fn default() -> Self {
        Self {
            speed: 1.0,
            scale: 2.5,
            octaves: 5,
            warp: 4.0,
            colors: [
                Vec3::new(0.04, 0.02, 0.09),
                Vec3::new(0.22, 0.07, 0.38),
                Vec3::new(0.52, 0.28, 0.74),
                Vec3::new(0.88, 0.78, 0.98),
            ],
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            speed: rng.random_range(0.5..1.5),
            scale: rng.random_range(1.5..4.0),
            octaves: rng.random_range(4..7),
            warp: rng.random_range(2.5..5.0),
            ..Self::default()
        }
    }

    fn stops(&self) -> [ColorStop; 4] {
        std::array::from_fn(|i| ColorStop::new(STOP_POSITIONS[i], self.colors[i]))
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed={:.2} scale={:.2} octaves={} warp={:.2}",
            self.speed, self.scale, self.octaves, self.warp
        )
    }
}

/// Twice-warped fbm at `p`.
fn smoke(p: Vec2, t: f32, octaves: usize, warp: f32) -> f32 {
    let key = HashKey::FLOW;
    let q = Vec2::new(
        fbm2d(p + Vec2::splat(0.1 * t), octaves, key),
        fbm2d(p + Vec2::new(5.2, 1.3), octaves, key),
    );
    let r = Vec2::new(
        fbm2d(p + warp * q + Vec2::new(1.7, 9.2) + Vec2::splat(0.15 * t), octaves, key),
        fbm2d(p + warp * q + Vec2::new(8.3, 2.8) + Vec2::splat(0.126 * t), octaves, key),
    );
    fbm2d(p + warp * r, octaves, key)
}

/// Compute the purple smoke color at a fragment.
pub fn shade(uniforms: &Uniforms, frag: Vec2, params: &Params) -> Rgba {
    let t = uniforms.time * params.speed;
    let p = aspect_uv(frag, uniforms.resolution.as_vec2()) * params.scale;
    let f = smoke(p, t, params.octaves as usize, params.warp);
    Rgba::from_vec3(multi_stop_gradient(f, &params.stops()))
}

/// Purple smoke effect.
#[derive(Debug, Clone)]
pub struct PurpleSmoke {
    params: Params,
}

impl Default for PurpleSmoke {
    fn default() -> Self {
        Self::golden()
    }
}

impl PurpleSmoke {
    pub fn golden() -> Self {
        Self { params: Params::default() }
    }

    pub fn random() -> Self {
        Self { params: Params::random() }
    }
}

impl Effect for PurpleSmoke {
    fn name(&self) -> &'static str {
        "purple_smoke"
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
            "scale" => self.params.scale = parse_f32(value)?,
            "octaves" => self.params.octaves = parse_u32(value)?.clamp(1, 8),
            "warp" => self.params.warp = parse_f32(value)?,
            "color_1" => self.params.colors[0] = parse_vec3(value)?,
            "color_2" => self.params.colors[1] = parse_vec3(value)?,
            "color_3" => self.params.colors[2] = parse_vec3(value)?,
            "color_4" => self.params.colors[3] = parse_vec3(value)?,
            _ => return Err(format!("Unknown param '{}' for purple_smoke", name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("speed", format!("{:.2}", self.params.speed)),
            ("scale", format!("{:.2}", self.params.scale)),
            ("octaves", self.params.octaves.to_string()),
            ("warp", format!("{:.2}", self.params.warp)),
            ("color_1", format_vec3(self.params.colors[0])),
            ("color_2", format_vec3(self.params.colors[1])),
            ("color_3", format_vec3(self.params.colors[2])),
            ("color_4", format_vec3(self.params.colors[3])),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("speed", "Speed", 0.1, 2.0, 0.05)
                .with_description("Animation speed"),
            ParamSpec::slider("scale", "Scale", 0.5, 6.0, 0.1)
                .with_description("Zoom of the smoke"),
            ParamSpec::int("octaves", "Detail", Some(1), Some(8))
                .with_description("Noise octaves"),
            ParamSpec::slider("warp", "Warp", 0.0, 8.0, 0.1)
                .with_description("How strongly the smoke curls"),
            ParamSpec::color("color_1", "Shadow"),
            ParamSpec::color("color_2", "Dark"),
            ParamSpec::color("color_3", "Light"),
            ParamSpec::color("color_4", "Highlight"),
        ]
    }
}
