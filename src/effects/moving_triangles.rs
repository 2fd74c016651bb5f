//! # Moving Triangles
//!
//! Three soft lines rotate about slowly wandering pivots over a diagonal
//! two-color gradient. Where the lines cross they carve out triangles that
//! keep reshaping as the angles drift apart.
//!
//! ## Formula
//!
//! ```text
//! base   = mix(color_a, color_b, (uv.x + uv.y) / 2)
//! angle_k = t·speed·(1 + 0.27k) + k·π/3
//! pivot_k = center + 0.15·(sin(0.31t + 2k), cos(0.23t + 3k))
//! line_k = rotating_line(p, pivot_k, angle_k, width, softness)
//! color  = base + Σ line_k · line_color · intensity
//! ```

use std::f32::consts::PI;
use std::fmt;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::shader::{Rgba, mix, rotating_line};
use crate::uniforms::Uniforms;

use super::{Effect, ParamSpec, format_vec3, parse_f32, parse_u32, parse_vec3};

/// Parameters for the moving triangles effect.
#[derive(Debug, Clone)]
pub struct Params {
    /// Rotation speed in radians per second. Default: 0.25
    pub rotation_speed: f32,
    /// Number of lines. Default: 3
    pub lines: u32,
    /// Half width of each line, in screen heights. Default: 0.004
    pub line_width: f32,
    /// Soft falloff beyond the half width. Default: 0.02
    pub softness: f32,
    /// Strength of the added lines. Default: 0.35
    pub intensity: f32,
    /// Gradient color at the bottom-left corner. Default: (0.05, 0.09, 0.22)
    pub color_a: Vec3,
    /// Gradient color at the top-right corner. Default: (0.38, 0.16, 0.44)
    pub color_b: Vec3,
    /// Color of the lines. Default: (0.9, 0.85, 1.0)
    pub line_color: Vec3,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            rotation_speed: 0.25,
            lines: 3,
            line_width: 0.004,
            softness: 0.02,
            intensity: 0.35,
            color_a: Vec3::new(0.05, 0.09, 0.22),
            color_b: Vec3::new(0.38, 0.16, 0.44),
            line_color: Vec3::new(0.9, 0.85, 1.0),
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            rotation_speed: rng.random_range(0.1..0.6),
            lines: rng.random_range(2..6),
            line_width: rng.random_range(0.002..0.008),
            softness: rng.random_range(0.01..0.04),
            intensity: rng.random_range(0.2..0.5),
            ..Self::default()
        }
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rotation={:.2} lines={} width={:.3} softness={:.3} intensity={:.2}",
            self.rotation_speed, self.lines, self.line_width, self.softness, self.intensity
        )
    }
}

/// Compute the moving triangles color at a fragment.
pub fn shade(uniforms: &Uniforms, frag: Vec2, params: &Params) -> Rgba {
    let t = uniforms.time;
    let res = uniforms.resolution.as_vec2();
    let uv = frag / res;
    // Height-normalized so lines keep their angle on any aspect ratio
    let p = frag / res.y;
    let center = Vec2::new(0.5 * uniforms.resolution.aspect(), 0.5);

    let mut color = mix(params.color_a, params.color_b, (uv.x + uv.y) * 0.5);

    for k in 0..params.lines {
        let kf = k as f32;
        let angle = t * params.rotation_speed * (1.0 + 0.27 * kf) + kf * PI / 3.0;
        let pivot = center
            + 0.15 * Vec2::new((0.31 * t + 2.0 * kf).sin(), (0.23 * t + 3.0 * kf).cos());
        let line = rotating_line(p, pivot, angle, params.line_width, params.softness);
        color += params.line_color * (line * params.intensity);
    }

    Rgba::from_vec3(color)
}

/// Moving triangles effect.
#[derive(Debug, Clone)]
pub struct MovingTriangles {
    params: Params,
}

impl Default for MovingTriangles {
    fn default() -> Self {
        Self::golden()
    }
}

impl MovingTriangles {
    pub fn golden() -> Self {
        Self { params: Params::default() }
    }

    pub fn random() -> Self {
        Self { params: Params::random() }
    }
}

impl Effect for MovingTriangles {
    fn name(&self) -> &'static str {
        "moving_triangles"
    }

    fn evaluate(&self, uniforms: &Uniforms, frag: Vec2) -> Rgba {
        shade(uniforms, frag, &self.params)
    }

    fn params_description(&self) -> String {
        self.params.to_string()
    }

    fn set_param(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "rotation_speed" => self.params.rotation_speed = parse_f32(value)?,
            "lines" => self.params.lines = parse_u32(value)?.min(12),
            "line_width" => self.params.line_width = parse_f32(value)?.max(0.0),
            "softness" => self.params.softness = parse_f32(value)?.max(1e-4),
            "intensity" => self.params.intensity = parse_f32(value)?,
            "color_a" => self.params.color_a = parse_vec3(value)?,
            "color_b" => self.params.color_b = parse_vec3(value)?,
            "line_color" => self.params.line_color = parse_vec3(value)?,
            _ => return Err(format!("Unknown param '{}' for moving_triangles", name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rotation_speed", format!("{:.2}", self.params.rotation_speed)),
            ("lines", self.params.lines.to_string()),
            ("line_width", format!("{:.4}", self.params.line_width)),
            ("softness", format!("{:.4}", self.params.softness)),
            ("intensity", format!("{:.2}", self.params.intensity)),
            ("color_a", format_vec3(self.params.color_a)),
            ("color_b", format_vec3(self.params.color_b)),
            ("line_color", format_vec3(self.params.line_color)),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("rotation_speed", "Rotation Speed", 0.0, 1.5, 0.05)
                .with_description("Line rotation (radians per second)"),
            ParamSpec::int("lines", "Lines", Some(0), Some(12)),
            ParamSpec::slider("line_width", "Line Width", 0.0, 0.02, 0.001),
            ParamSpec::slider("softness", "Softness", 0.001, 0.08, 0.001)
                .with_description("Soft edge beyond the line width"),
            ParamSpec::slider("intensity", "Intensity", 0.0, 1.0, 0.05),
            ParamSpec::color("color_a", "Gradient Start"),
            ParamSpec::color("color_b", "Gradient End"),
            ParamSpec::color("line_color", "Line Color"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::Resolution;

    #[test]
    fn test_no_lines_is_plain_gradient() {
        let params = Params {
            lines: 0,
            ..Params::default()
        };
        let u = Uniforms::new(5.0, Resolution::new(200.0, 100.0));
        let bottom_left = shade(&u, Vec2::new(0.0, 0.0), &params);
        let top_right = shade(&u, Vec2::new(200.0, 100.0), &params);
        assert!((bottom_left.rgb() - params.color_a).length() < 1e-5);
        assert!((top_right.rgb() - params.color_b).length() < 1e-5);
    }

    #[test]
    fn test_lines_brighten() {
        let params = Params::default();
        let plain = Params {
            lines: 0,
            ..Params::default()
        };
        let u = Uniforms::new(0.0, Resolution::new(200.0, 100.0));
        // At t=0 the first line is horizontal through its pivot, 0.15 above center.
        let frag = Vec2::new(60.0, 65.0);
        let lit = shade(&u, frag, &params);
        let base = shade(&u, frag, &plain);
        assert!(lit.rgb().max_element() > base.rgb().max_element());
    }
}
