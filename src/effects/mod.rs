//! # Background Effects
//!
//! Procedural background generators. Each effect is self-contained in its
//! own module with a struct implementing the [`Effect`] trait, and every
//! effect is a pure function of `(uniforms, fragment coordinate)`.
//!
//! ## Adding a New Effect
//!
//! 1. Create `src/effects/myeffect.rs` with a struct implementing [`Effect`]
//! 2. Add `pub mod myeffect;` below
//! 3. Add a variant to [`ShaderKind`] and wire it in [`ShaderKind::build`]
//! 4. Run `cargo test generate_golden_files -- --ignored` to record samples

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::shader::Rgba;
use crate::uniforms::Uniforms;

pub mod ether;
pub mod glowing_ring;
pub mod moving_triangles;
pub mod moving_waves;
pub mod palette;
pub mod purple_gradient;
pub mod purple_smoke;
pub mod red;
pub mod space;
pub mod turbulence;

/// Trait for background effects.
pub trait Effect: Send + Sync {
    /// Effect name (lowercase, e.g., "ether").
    fn name(&self) -> &'static str;

    /// Color of one fragment. `frag` is in pixels with the origin at the
    /// bottom-left corner. Channels are in [0, 1] and alpha is 1.
    fn evaluate(&self, uniforms: &Uniforms, frag: Vec2) -> Rgba;

    /// One-line summary of the current parameters.
    fn params_description(&self) -> String;

    /// Set a parameter from its string form.
    fn set_param(&mut self, name: &str, value: &str) -> Result<(), String>;

    /// Current parameter values, formatted.
    fn list_params(&self) -> Vec<(&'static str, String)>;

    /// Parameter metadata for UIs and the CLI.
    fn param_specs(&self) -> Vec<ParamSpec>;
}

/// The closed set of shader-driven backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderKind {
    Ether,
    GlowingRing,
    MovingTriangles,
    MovingWaves,
    Palette,
    PurpleGradient,
    PurpleSmoke,
    Red,
    Space,
    Turbulence,
}

impl ShaderKind {
    /// All kinds, in display order.
    pub const ALL: [ShaderKind; 10] = [
        ShaderKind::Palette,
        ShaderKind::Red,
        ShaderKind::PurpleGradient,
        ShaderKind::PurpleSmoke,
        ShaderKind::Ether,
        ShaderKind::Turbulence,
        ShaderKind::GlowingRing,
        ShaderKind::Space,
        ShaderKind::MovingWaves,
        ShaderKind::MovingTriangles,
    ];

    /// Stable lowercase key used in preferences and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ShaderKind::Ether => "ether",
            ShaderKind::GlowingRing => "glowing_ring",
            ShaderKind::MovingTriangles => "moving_triangles",
            ShaderKind::MovingWaves => "moving_waves",
            ShaderKind::Palette => "palette",
            ShaderKind::PurpleGradient => "purple_gradient",
            ShaderKind::PurpleSmoke => "purple_smoke",
            ShaderKind::Red => "red",
            ShaderKind::Space => "space",
            ShaderKind::Turbulence => "turbulence",
        }
    }

    /// Speed multiplier applied to elapsed time before it reaches the effect.
    pub fn default_speed_modifier(self) -> f32 {
        match self {
            ShaderKind::Ether => 0.6,
            ShaderKind::Turbulence => 0.5,
            ShaderKind::PurpleGradient => 0.5,
            _ => 1.0,
        }
    }

    /// Build the effect with its default (golden) parameters.
    pub fn build(self) -> Box<dyn Effect> {
        match self {
            ShaderKind::Ether => Box::new(ether::Ether::golden()),
            ShaderKind::GlowingRing => Box::new(glowing_ring::GlowingRing::golden()),
            ShaderKind::MovingTriangles => Box::new(moving_triangles::MovingTriangles::golden()),
            ShaderKind::MovingWaves => Box::new(moving_waves::MovingWaves::golden()),
            ShaderKind::Palette => Box::new(palette::PaletteFlow::golden()),
            ShaderKind::PurpleGradient => Box::new(purple_gradient::PurpleGradient::golden()),
            ShaderKind::PurpleSmoke => Box::new(purple_smoke::PurpleSmoke::golden()),
            ShaderKind::Red => Box::new(red::Red::golden()),
            ShaderKind::Space => Box::new(space::Space::golden()),
            ShaderKind::Turbulence => Box::new(turbulence::Turbulence::golden()),
        }
    }

    /// Build the effect with randomized parameters.
    pub fn build_random(self) -> Box<dyn Effect> {
        match self {
            ShaderKind::Ether => Box::new(ether::Ether::random()),
            ShaderKind::GlowingRing => Box::new(glowing_ring::GlowingRing::random()),
            ShaderKind::MovingTriangles => Box::new(moving_triangles::MovingTriangles::random()),
            ShaderKind::MovingWaves => Box::new(moving_waves::MovingWaves::random()),
            ShaderKind::Palette => Box::new(palette::PaletteFlow::random()),
            ShaderKind::PurpleGradient => Box::new(purple_gradient::PurpleGradient::random()),
            ShaderKind::PurpleSmoke => Box::new(purple_smoke::PurpleSmoke::random()),
            ShaderKind::Red => Box::new(red::Red::random()),
            ShaderKind::Space => Box::new(space::Space::random()),
            ShaderKind::Turbulence => Box::new(turbulence::Turbulence::random()),
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShaderKind {
    type Err = String;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        ShaderKind::ALL
            .into_iter()
            .find(|kind| kind.name() == key)
            .ok_or_else(|| format!("Unknown shader '{}'", s))
    }
}

/// Get an effect by name, with default parameters.
pub fn by_name(name: &str) -> Option<Box<dyn Effect>> {
    name.parse::<ShaderKind>().ok().map(ShaderKind::build)
}

/// Get an effect by name, with randomized parameters.
pub fn by_name_random(name: &str) -> Option<Box<dyn Effect>> {
    name.parse::<ShaderKind>().ok().map(ShaderKind::build_random)
}

/// Describes one user-controllable parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: ParamKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

/// Value shape of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamKind {
    /// Continuous value with a suggested range.
    Slider { min: f32, max: f32, step: f32 },
    /// Whole number with optional bounds.
    Int { min: Option<i64>, max: Option<i64> },
    /// RGB triple, `r,g,b` or `#rrggbb`.
    Color,
}

impl ParamSpec {
    pub fn slider(name: &'static str, label: &'static str, min: f32, max: f32, step: f32) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Slider { min, max, step },
            description: None,
        }
    }

    pub fn int(name: &'static str, label: &'static str, min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Int { min, max },
            description: None,
        }
    }

    pub fn color(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Color,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// Parse a float parameter value.
pub fn parse_f32(value: &str) -> Result<f32, String> {
    let v = value
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("Invalid value '{}': {}", value, e))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Invalid value '{}': must be finite", value))
    }
}

/// Parse an unsigned integer parameter value.
pub fn parse_u32(value: &str) -> Result<u32, String> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("Invalid value '{}': {}", value, e))
}

/// Parse an RGB triple from `r,g,b` floats or `#rrggbb`.
pub fn parse_vec3(value: &str) -> Result<Vec3, String> {
    let value = value.trim();
    if value.starts_with('#') {
        return value.parse::<Rgba>().map(|c| c.rgb());
    }
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("Invalid value '{}': expected r,g,b", value));
    }
    Ok(Vec3::new(
        parse_f32(parts[0])?,
        parse_f32(parts[1])?,
        parse_f32(parts[2])?,
    ))
}

/// Format an RGB triple the way [`parse_vec3`] reads it.
pub fn format_vec3(v: Vec3) -> String {
    format!("{:.3},{:.3},{:.3}", v.x, v.y, v.z)
}
