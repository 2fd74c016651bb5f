//! # Glowing Ring
//!
//! A soft ring of light whose radius breathes with 3D simplex noise, with a
//! bright spot orbiting along it. The ring is built at full brightness,
//! split into color and alpha, then laid over a dark background.
//!
//! ## Formula
//!
//! ```text
//! n0 = simplex(uv·noise_scale, 0.5t)·0.5 + 0.5
//! r0 = mix(mix(inner, 1, 0.4), mix(inner, 1, 0.6), n0)
//! d0 = |uv − r0·uv/|uv||                    distance to the ring
//! v0 = light1(1, 10, d0)·smoothstep(1.05·r0, r0, |uv|)
//! v1 = light2(1.5, 5, |uv − orbit|)·light1(1, 50, d0)
//! col = ((mix(c3, mix(c1, c2, cl), v0) + v1)·v2·v3
//! light1(i, k, d) = i / (1 + d·k)
//! light2(i, k, d) = i / (1 + d²·k)
//! ```

use std::f32::consts::PI;
use std::fmt;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::shader::{
    Rgba, cart_to_polar, centered_uv, extract_alpha, hue_rotate, lerp, mix, rotate2d, simplex3d,
    smoothstep,
};
use crate::uniforms::Uniforms;

use super::{Effect, ParamSpec, format_vec3, parse_f32, parse_vec3};

const BASE_COLOR_1: Vec3 = Vec3::new(0.611765, 0.262745, 0.996078);
const BASE_COLOR_2: Vec3 = Vec3::new(0.298039, 0.760784, 0.913725);
const BASE_COLOR_3: Vec3 = Vec3::new(0.062745, 0.078431, 0.600000);
const INNER_RADIUS: f32 = 0.6;
const NOISE_SCALE: f32 = 0.65;

/// Parameters for the glowing ring.
#[derive(Debug, Clone)]
pub struct Params {
    /// Time multiplier. Default: 1.0
    pub speed: f32,
    /// Hue shift of the three ring colors, in radians. Default: 0.0
    pub hue: f32,
    /// Rotation of the whole ring, radians per second. Default: 0.3
    pub rotation_speed: f32,
    /// Color behind the ring. Default: (0.02, 0.02, 0.05)
    pub background: Vec3,
    /// Overall size; 1.0 fills the shorter screen side. Default: 0.8
    pub size: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            speed: 1.0,
            hue: 0.0,
            rotation_speed: 0.3,
            background: Vec3::new(0.02, 0.02, 0.05),
            size: 0.8,
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            speed: rng.random_range(0.5..1.5),
            hue: rng.random_range(-PI..PI),
            rotation_speed: rng.random_range(-0.6..0.6),
            background: Vec3::new(0.02, 0.02, 0.05),
            size: rng.random_range(0.6..0.95),
        }
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed={:.2} hue={:.2} rotation={:.2} size={:.2}",
            self.speed, self.hue, self.rotation_speed, self.size
        )
    }
}

#[inline]
fn light1(intensity: f32, attenuation: f32, dist: f32) -> f32 {
    intensity / (1.0 + dist * attenuation)
}

#[inline]
fn light2(intensity: f32, attenuation: f32, dist: f32) -> f32 {
    intensity / (1.0 + dist * dist * attenuation)
}

/// Ring color and coverage at `uv` (ring-space coordinates).
fn draw(uv: Vec2, t: f32, hue: f32) -> (Vec3, f32) {
    let color1 = hue_rotate(BASE_COLOR_1, hue);
    let color2 = hue_rotate(BASE_COLOR_2, hue);
    let color3 = hue_rotate(BASE_COLOR_3, hue);

    let (len, ang) = cart_to_polar(uv);
    let inv_len = if len > 0.0 { 1.0 / len } else { 0.0 };

    let n0 = simplex3d((uv * NOISE_SCALE).extend(t * 0.5)) * 0.5 + 0.5;
    let r0 = lerp(lerp(INNER_RADIUS, 1.0, 0.4), lerp(INNER_RADIUS, 1.0, 0.6), n0);
    let d0 = uv.distance(uv * (r0 * inv_len));
    let v0 = light1(1.0, 10.0, d0) * smoothstep(r0 * 1.05, r0, len);
    let cl = (ang + t * 2.0).cos() * 0.5 + 0.5;

    // Bright spot orbiting the ring
    let a = -t;
    let pos = Vec2::new(a.cos(), a.sin()) * r0;
    let d = uv.distance(pos);
    let v1 = light2(1.5, 5.0, d) * light1(1.0, 50.0, d0);

    let v2 = smoothstep(1.0, lerp(INNER_RADIUS, 1.0, n0 * 0.5), len);
    let v3 = smoothstep(INNER_RADIUS, lerp(INNER_RADIUS, 1.0, 0.5), len);

    let col = mix(color1, color2, cl);
    let col = mix(color3, col, v0);
    let col = ((col + Vec3::splat(v1)) * v2 * v3).clamp(Vec3::ZERO, Vec3::ONE);

    extract_alpha(col)
}

/// Compute the glowing ring color at a fragment.
pub fn shade(uniforms: &Uniforms, frag: Vec2, params: &Params) -> Rgba {
    let t = uniforms.time * params.speed;
    let uv = centered_uv(frag, uniforms.resolution.as_vec2()) / params.size.max(1e-3);
    let uv = rotate2d(t * params.rotation_speed) * uv;

    let (rgb, alpha) = draw(uv, t, params.hue);
    // rgb·alpha is the ring's own light; the background shows through the rest.
    let col = rgb * alpha + params.background * (1.0 - alpha);
    Rgba::from_vec3(col)
}

/// Glowing ring effect.
#[derive(Debug, Clone)]
pub struct GlowingRing {
    params: Params,
}

impl Default for GlowingRing {
    fn default() -> Self {
        Self::golden()
    }
}

impl GlowingRing {
    pub fn golden() -> Self {
        Self { params: Params::default() }
    }

    pub fn random() -> Self {
        Self { params: Params::random() }
    }
}

impl Effect for GlowingRing {
    fn name(&self) -> &'static str {
        "glowing_ring"
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
            "hue" => self.params.hue = parse_f32(value)?,
            "rotation_speed" => self.params.rotation_speed = parse_f32(value)?,
            "background" => self.params.background = parse_vec3(value)?,
            "size" => self.params.size = parse_f32(value)?,
            _ => return Err(format!("Unknown param '{}' for glowing_ring", name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("speed", format!("{:.2}", self.params.speed)),
            ("hue", format!("{:.3}", self.params.hue)),
            ("rotation_speed", format!("{:.2}", self.params.rotation_speed)),
            ("background", format_vec3(self.params.background)),
            ("size", format!("{:.2}", self.params.size)),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("speed", "Speed", 0.1, 2.0, 0.05)
                .with_description("Animation speed"),
            ParamSpec::slider("hue", "Hue", -PI, PI, 0.01)
                .with_description("Hue rotation of the ring colors (radians)"),
            ParamSpec::slider("rotation_speed", "Rotation", -1.0, 1.0, 0.05)
                .with_description("Rotation of the ring (radians per second)"),
            ParamSpec::color("background", "Background"),
            ParamSpec::slider("size", "Size", 0.3, 1.0, 0.01)
                .with_description("Ring size relative to the shorter screen side"),
        ]
    }
}
