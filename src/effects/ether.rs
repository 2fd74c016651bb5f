//! # Ether
//!
//! A short raymarch through a rotating fog field. Each step samples the
//! field, estimates a directional derivative for lighting, and multiplies
//! the accumulated light by the local tint.
//!
//! ## Formula
//!
//! ```text
//! p.xz = rot(0.4t)·p.xz;  p.xy = rot(0.3t)·p.xy
//! q    = 2p + t
//! map  = |p + sin(0.7t)|·ln(|p| + 1) + 0.5·sin(q.x + sin(q.z + sin(q.y))) − 1
//!
//! for each step:
//!     rz = map(ro + rd·d)
//!     f  = clamp((rz − map(pos + 0.1))·0.5, −0.1, 1)
//!     l  = base + glow·f
//!     cl = cl·l + smoothstep(2.5, 0, rz)·0.7·l
//!     d += min(rz, 1)
//!
//! color = 1 − exp(−cl)
//! ```

use std::fmt;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::shader::{Rgba, aspect_uv, rotate2d, smoothstep, tonemap_exp_vec3};
use crate::uniforms::Uniforms;

use super::{Effect, ParamSpec, format_vec3, parse_f32, parse_u32, parse_vec3};

/// Parameters for the ether effect.
#[derive(Debug, Clone)]
pub struct Params {
    /// Time multiplier. Default: 1.0
    pub speed: f32,
    /// Raymarch steps after the first sample. Default: 5
    pub steps: u32,
    /// Ambient tint of the fog. Default: (0.1, 0.3, 0.4)
    pub base: Vec3,
    /// Light added in proportion to the field slope. Default: (5.0, 2.5, 3.0)
    pub glow: Vec3,
    /// Initial ray distance. Default: 2.5
    pub start: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            speed: 1.0,
            steps: 5,
            base: Vec3::new(0.1, 0.3, 0.4),
            glow: Vec3::new(5.0, 2.5, 3.0),
            start: 2.5,
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            speed: rng.random_range(0.6..1.4),
            steps: rng.random_range(4..8),
            base: Vec3::new(
                rng.random_range(0.05..0.2),
                rng.random_range(0.15..0.4),
                rng.random_range(0.25..0.5),
            ),
            glow: Vec3::new(
                rng.random_range(3.0..6.0),
                rng.random_range(1.5..3.5),
                rng.random_range(2.0..4.0),
            ),
            start: rng.random_range(2.0..3.0),
        }
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed={:.2} steps={} base=({}) glow=({}) start={:.2}",
            self.speed,
            self.steps,
            format_vec3(self.base),
            format_vec3(self.glow),
            self.start
        )
    }
}

/// Fog density field. Negative inside the dense region.
fn map(p: Vec3, t: f32) -> f32 {
    let mut p = p;
    let xz = rotate2d(t * 0.4) * Vec2::new(p.x, p.z);
    p.x = xz.x;
    p.z = xz.y;
    let xy = rotate2d(t * 0.3) * Vec2::new(p.x, p.y);
    p.x = xy.x;
    p.y = xy.y;

    let q = p * 2.0 + Vec3::splat(t);
    (p + Vec3::splat((t * 0.7).sin())).length() * (p.length() + 1.0).ln()
        + (q.x + (q.z + q.y.sin()).sin()).sin() * 0.5
        - 1.0
}

/// Compute the ether color at a fragment.
pub fn shade(uniforms: &Uniforms, frag: Vec2, params: &Params) -> Rgba {
    let t = uniforms.time * params.speed;
    let uv = aspect_uv(frag, uniforms.resolution.as_vec2());

    let ro = Vec3::new(0.0, 0.0, 5.0);
    let rd = uv.extend(-1.0).normalize();

    let mut cl = Vec3::ZERO;
    let mut d = params.start;
    for _ in 0..=params.steps {
        let pos = ro + rd * d;
        let rz = map(pos, t);
        let f = ((rz - map(pos + Vec3::splat(0.1), t)) * 0.5).clamp(-0.1, 1.0);
        let l = params.base + params.glow * f;
        cl = cl * l + smoothstep(2.5, 0.0, rz) * 0.7 * l;
        d += rz.min(1.0);
    }

    Rgba::from_vec3(tonemap_exp_vec3(cl))
}

/// Ether effect.
#[derive(Debug, Clone)]
pub struct Ether {
    params: Params,
}

impl Default for Ether {
    fn default() -> Self {
        Self::golden()
    }
}

impl Ether {
    pub fn golden() -> Self {
        Self { params: Params::default() }
    }

    pub fn random() -> Self {
        Self { params: Params::random() }
    }
}

impl Effect for Ether {
    fn name(&self) -> &'static str {
        "ether"
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
            "steps" => self.params.steps = parse_u32(value)?.clamp(1, 32),
            "base" => self.params.base = parse_vec3(value)?,
            "glow" => self.params.glow = parse_vec3(value)?,
            "start" => self.params.start = parse_f32(value)?,
            _ => return Err(format!("Unknown param '{}' for ether", name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("speed", format!("{:.2}", self.params.speed)),
            ("steps", self.params.steps.to_string()),
            ("base", format_vec3(self.params.base)),
            ("glow", format_vec3(self.params.glow)),
            ("start", format!("{:.2}", self.params.start)),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("speed", "Speed", 0.1, 2.0, 0.05)
                .with_description("Animation speed"),
            ParamSpec::int("steps", "Steps", Some(1), Some(32))
                .with_description("Raymarch steps"),
            ParamSpec::color("base", "Fog Tint").with_description("Ambient tint of the fog"),
            ParamSpec::color("glow", "Glow").with_description("Light added on the lit side of the fog"),
            ParamSpec::slider("start", "Start Distance", 1.0, 4.0, 0.1)
                .with_description("Initial ray distance"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::Resolution;

    #[test]
    fn test_shade_range() {
        let params = Params::default();
        let u = Uniforms::new(2.0, Resolution::new(160.0, 90.0));
        for y in (0..90).step_by(10) {
            for x in (0..160).step_by(10) {
                let c = shade(&u, Vec2::new(x as f32, y as f32), &params);
                assert!(c.r >= 0.0 && c.r <= 1.0);
                assert_eq!(c.a, 1.0);
            }
        }
    }

    #[test]
    fn test_animates() {
        let params = Params::default();
        let res = Resolution::new(160.0, 90.0);
        let changed = (0..16).any(|i| {
            let frag = Vec2::new(10.0 * i as f32, 40.0);
            shade(&Uniforms::new(0.0, res), frag, &params)
                != shade(&Uniforms::new(3.0, res), frag, &params)
        });
        assert!(changed);
    }

    #[test]
    fn test_tonemap_keeps_highlights_below_white() {
        let params = Params::default();
        let res = Resolution::new(160.0, 120.0);
        for time in [0.0, 2.0, 5.0] {
            let u = Uniforms::new(time, res);
            let mut lit = 0;
            for y in 0..120 {
                for x in 0..160 {
                    let c = shade(&u, Vec2::new(x as f32 + 0.5, y as f32 + 0.5), &params);
                    assert!(c.rgb().max_element() < 1.0, "t={} ({}, {}): {:?}", time, x, y, c);
                    if c.rgb().max_element() > 0.05 {
                        lit += 1;
                    }
                }
            }
            assert!(lit > 0, "t={}: frame is dark", time);
        }
    }

    #[test]
    fn test_steps_clamped() {
        let mut ether = Ether::golden();
        ether.set_param("steps", "500").unwrap();
        assert_eq!(ether.params.steps, 32);
    }
}
