//! # Turbulence
//!
//! A volumetric raymarch through a shell of turbulent glow. Every sample
//! point is pushed around by a stack of cosine waves of rising frequency
//! before the distance to the shell is measured, so the shell tears into
//! flowing filaments. Color piles up inversely to the step size and is
//! tonemapped at the end.
//!
//! ## Formula
//!
//! ```text
//! rd = normalize(2frag.x − res.x, 2frag.y − res.y, −res.y)
//! repeat steps:
//!     p = z·rd + (0, 0, 6)
//!     for f = 1; f < 9; f /= 0.7:  p += cos(p.yzx·f − t) / f
//!     d = 0.01 + |len(p) − radius| / 7
//!     z += d
//!     acc += (cos(p.y + (6, 1, 2)) + 1) / d
//! color = gamma(tanh(acc·exposure / 1000))
//! ```

use std::fmt;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::shader::{Rgba, gamma_vec3, tanh_approx_vec3};
use crate::uniforms::Uniforms;

use super::{Effect, ParamSpec, parse_f32, parse_u32};

/// Parameters for the turbulence effect.
#[derive(Debug, Clone)]
pub struct Params {
    /// Time multiplier. Default: 1.0
    pub speed: f32,
    /// Raymarch steps. Default: 77
    pub steps: u32,
    /// Radius of the glowing shell. Default: 3.0
    pub radius: f32,
    /// Brightness before tonemapping. Default: 1.0
    pub exposure: f32,
    /// Output gamma. Default: 0.9
    pub gamma: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            speed: 1.0,
            steps: 77,
            radius: 3.0,
            exposure: 1.0,
            gamma: 0.9,
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            speed: rng.random_range(0.6..1.4),
            radius: rng.random_range(2.5..3.5),
            exposure: rng.random_range(0.7..1.4),
            ..Self::default()
        }
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed={:.2} steps={} radius={:.2} exposure={:.2} gamma={:.2}",
            self.speed, self.steps, self.radius, self.exposure, self.gamma
        )
    }
}

/// Perturb `p` with cosine waves of rising frequency.
fn turbulence(mut p: Vec3, t: f32) -> Vec3 {
    let mut f = 1.0_f32;
    while f < 9.0 {
        let yzx = Vec3::new(p.y, p.z, p.x) * f - Vec3::splat(t);
        p += Vec3::new(yzx.x.cos(), yzx.y.cos(), yzx.z.cos()) / f;
        f /= 0.7;
    }
    p
}

/// Compute the turbulence color at a fragment.
pub fn shade(uniforms: &Uniforms, frag: Vec2, params: &Params) -> Rgba {
    let t = uniforms.time * params.speed;
    let res = uniforms.resolution.as_vec2();
    let rd = Vec3::new(2.0 * frag.x - res.x, 2.0 * frag.y - res.y, -res.y).normalize();

    let mut z = 0.0_f32;
    let mut acc = Vec3::ZERO;
    for _ in 0..params.steps {
        let mut p = z * rd;
        p.z += 6.0;
        let p = turbulence(p, t);
        let d = 0.01 + (p.length() - params.radius).abs() / 7.0;
        z += d;
        let tint = Vec3::new((p.y + 6.0).cos(), (p.y + 1.0).cos(), (p.y + 2.0).cos());
        acc += (tint + Vec3::ONE) / d;
    }

    let color = tanh_approx_vec3(acc * params.exposure / 1000.0);
    Rgba::from_vec3(gamma_vec3(color, params.gamma))
}

/// Turbulence effect.
#[derive(Debug, Clone)]
pub struct Turbulence {
    params: Params,
}

impl Default for Turbulence {
    fn default() -> Self {
        Self::golden()
    }
}

impl Turbulence {
    pub fn golden() -> Self {
        Self { params: Params::default() }
    }

    pub fn random() -> Self {
        Self { params: Params::random() }
    }
}

impl Effect for Turbulence {
    fn name(&self) -> &'static str {
        "turbulence"
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
            "steps" => self.params.steps = parse_u32(value)?.clamp(8, 128),
            "radius" => self.params.radius = parse_f32(value)?,
            "exposure" => self.params.exposure = parse_f32(value)?.max(0.0),
            "gamma" => self.params.gamma = parse_f32(value)?,
            _ => return Err(format!("Unknown param '{}' for turbulence", name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("speed", format!("{:.2}", self.params.speed)),
            ("steps", self.params.steps.to_string()),
            ("radius", format!("{:.2}", self.params.radius)),
            ("exposure", format!("{:.2}", self.params.exposure)),
            ("gamma", format!("{:.2}", self.params.gamma)),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("speed", "Speed", 0.1, 2.0, 0.05)
                .with_description("Animation speed"),
            ParamSpec::int("steps", "Steps", Some(8), Some(128))
                .with_description("Raymarch steps; fewer is faster and dimmer"),
            ParamSpec::slider("radius", "Radius", 1.0, 5.0, 0.1),
            ParamSpec::slider("exposure", "Exposure", 0.0, 3.0, 0.05),
            ParamSpec::slider("gamma", "Gamma", 0.5, 1.5, 0.01),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::Resolution;

    #[test]
    fn test_zero_exposure_is_black() {
        let params = Params {
            exposure: 0.0,
            ..Params::default()
        };
        let u = Uniforms::new(1.0, Resolution::new(64.0, 64.0));
        let c = shade(&u, Vec2::new(32.0, 32.0), &params);
        assert_eq!(c.rgb(), Vec3::ZERO);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_turbulence_is_bounded_push() {
        // Each wave moves p by at most 1/f per axis
        let p = Vec3::new(0.3, -1.2, 4.0);
        let q = turbulence(p, 2.5);
        let mut bound = 0.0;
        let mut f = 1.0_f32;
        while f < 9.0 {
            bound += 1.0 / f;
            f /= 0.7;
        }
        assert!((q - p).abs().max_element() <= bound + 1e-4);
    }

    #[test]
    fn test_more_steps_never_darker() {
        let short = Params {
            steps: 24,
            ..Params::default()
        };
        let long = Params::default();
        let u = Uniforms::new(0.7, Resolution::new(80.0, 60.0));
        for frag in [Vec2::new(20.0, 45.0), Vec2::new(40.0, 30.0), Vec2::new(75.0, 5.0)] {
            let a = shade(&u, frag, &short).rgb();
            let b = shade(&u, frag, &long).rgb();
            assert!(a.cmple(b + Vec3::splat(1e-6)).all(), "{:?} vs {:?}", a, b);
        }
    }
}
