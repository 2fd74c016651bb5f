//! # Purple Gradient
//!
//! A three-stop purple gradient along a slowly swinging direction, with a
//! faint noise shimmer so large flat areas never look static.
//!
//! ## Formula
//!
//! ```text
//! θ = angle + drift·sin(0.15t)
//! g = dot(uv, (cos θ, sin θ))·0.5·spread + 0.5 + 0.08·sin(0.4t)
//! s = (noise(3uv + 0.2t) − 0.5)·shimmer
//! color = gradient(clamp(g + s, 0, 1))
//! ```

use std::f32::consts::TAU;
use std::fmt;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::shader::{
    ColorStop, HashKey, Rgba, aspect_uv, clamp01, multi_stop_gradient, value_noise2d,
};
use crate::uniforms::Uniforms;

use super::{Effect, ParamSpec, format_vec3, parse_f32, parse_vec3};

/// Parameters for the purple gradient.
#[derive(Debug, Clone)]
pub struct Params {
    /// Time multiplier. Default: 1.0
    pub speed: f32,
    /// Base gradient direction in radians. Default: 0.6
    pub angle: f32,
    /// Amplitude of the direction swing in radians. Default: 0.6
    pub drift: f32,
    /// Gradient stretch; larger spreads more of the stops on screen. Default: 1.0
    pub spread: f32,
    /// Noise amplitude. Default: 0.04
    pub shimmer: f32,
    /// Dark end. Default: (0.12, 0.04, 0.26)
    pub color_1: Vec3,
    /// Middle. Default: (0.42, 0.14, 0.62)
    pub color_2: Vec3,
    /// Light end. Default: (0.78, 0.52, 0.92)
    pub color_3: Vec3,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            speed: 1.0,
            angle: 0.6,
            drift: 0.6,
            spread: 1.0,
            shimmer: 0.04,
            color_1: Vec3::new(0.12, 0.04, 0.26),
            color_2: Vec3::new(0.42, 0.14, 0.62),
            color_3: Vec3::new(0.78, 0.52, 0.92),
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            speed: rng.random_range(0.5..1.5),
            angle: rng.random_range(0.0..TAU),
            drift: rng.random_range(0.2..1.0),
            spread: rng.random_range(0.7..1.4),
            shimmer: rng.random_range(0.0..0.08),
            ..Self::default()
        }
    }

    fn stops(&self) -> [ColorStop; 3] {
        [
            ColorStop::new(0.0, self.color_1),
            ColorStop::new(0.5, self.color_2),
            ColorStop::new(1.0, self.color_3),
        ]
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed={:.2} angle={:.2} drift={:.2} spread={:.2} shimmer={:.3}",
            self.speed, self.angle, self.drift, self.spread, self.shimmer
        )
    }
}

/// Compute the purple gradient color at a fragment.
pub fn shade(uniforms: &Uniforms, frag: Vec2, params: &Params) -> Rgba {
    let t = uniforms.time * params.speed;
    let uv = aspect_uv(frag, uniforms.resolution.as_vec2());

    let theta = params.angle + params.drift * (0.15 * t).sin();
    let dir = Vec2::new(theta.cos(), theta.sin());
    let g = uv.dot(dir) * 0.5 * params.spread + 0.5 + 0.08 * (0.4 * t).sin();
    let shimmer = (value_noise2d(uv * 3.0 + Vec2::splat(0.2 * t), HashKey::FLOW) - 0.5)
        * params.shimmer;

    Rgba::from_vec3(multi_stop_gradient(clamp01(g + shimmer), &params.stops()))
}

/// Purple gradient effect.
#[derive(Debug, Clone)]
pub struct PurpleGradient {
    params: Params,
}

impl Default for PurpleGradient {
    fn default() -> Self {
        Self::golden()
    }
}

impl PurpleGradient {
    pub fn golden() -> Self {
        Self { params: Params::default() }
    }

    pub fn random() -> Self {
        Self { params: Params::random() }
    }
}

impl Effect for PurpleGradient {
    fn name(&self) -> &'static str {
        "purple_gradient"
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
            "angle" => self.params.angle = parse_f32(value)?,
            "drift" => self.params.drift = parse_f32(value)?,
            "spread" => self.params.spread = parse_f32(value)?,
            "shimmer" => self.params.shimmer = parse_f32(value)?.clamp(0.0, 1.0),
            "color_1" => self.params.color_1 = parse_vec3(value)?,
            "color_2" => self.params.color_2 = parse_vec3(value)?,
            "color_3" => self.params.color_3 = parse_vec3(value)?,
            _ => return Err(format!("Unknown param '{}' for purple_gradient", name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("speed", format!("{:.2}", self.params.speed)),
            ("angle", format!("{:.3}", self.params.angle)),
            ("drift", format!("{:.3}", self.params.drift)),
            ("spread", format!("{:.2}", self.params.spread)),
            ("shimmer", format!("{:.3}", self.params.shimmer)),
            ("color_1", format_vec3(self.params.color_1)),
            ("color_2", format_vec3(self.params.color_2)),
            ("color_3", format_vec3(self.params.color_3)),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("speed", "Speed", 0.1, 2.0, 0.05)
                .with_description("Animation speed"),
            ParamSpec::slider("angle", "Angle", 0.0, TAU, 0.01)
                .with_description("Gradient direction (radians)"),
            ParamSpec::slider("drift", "Drift", 0.0, 1.5, 0.01)
                .with_description("How far the direction swings"),
            ParamSpec::slider("spread", "Spread", 0.3, 2.0, 0.05),
            ParamSpec::slider("shimmer", "Shimmer", 0.0, 0.2, 0.005),
            ParamSpec::color("color_1", "Dark"),
            ParamSpec::color("color_2", "Middle"),
            ParamSpec::color("color_3", "Light"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::luma;
    use crate::uniforms::Resolution;

    #[test]
    fn test_stays_between_stops() {
        let params = Params::default();
        let lo = params.color_1.min(params.color_2).min(params.color_3);
        let hi = params.color_1.max(params.color_2).max(params.color_3);
        let u = Uniforms::new(7.0, Resolution::new(120.0, 80.0));
        for y in (0..80).step_by(8) {
            for x in (0..120).step_by(8) {
                let c = shade(&u, Vec2::new(x as f32, y as f32), &params).rgb();
                assert!(c.cmpge(lo - Vec3::splat(1e-5)).all());
                assert!(c.cmple(hi + Vec3::splat(1e-5)).all());
            }
        }
    }

    #[test]
    fn test_runs_along_angle() {
        let params = Params {
            angle: 0.0,
            drift: 0.0,
            shimmer: 0.0,
            ..Params::default()
        };
        let u = Uniforms::new(0.0, Resolution::new(800.0, 600.0));
        let left = shade(&u, Vec2::new(0.0, 300.0), &params);
        let right = shade(&u, Vec2::new(800.0, 300.0), &params);
        assert!(luma(right.rgb()) > luma(left.rgb()));
        // Perpendicular to the gradient nothing changes
        let top = shade(&u, Vec2::new(400.0, 600.0), &params);
        let bottom = shade(&u, Vec2::new(400.0, 0.0), &params);
        assert!((top.rgb() - bottom.rgb()).length() < 1e-5);
    }
}
