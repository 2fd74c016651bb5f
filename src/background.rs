//! # Backgrounds
//!
//! What the clock face draws behind the time: a solid color, a static
//! gradient, or one of the animated shaders.
//!
//! Backgrounds round-trip through short string keys so they can live in a
//! flat key-value preference store:
//!
//! | Key | Background |
//! |-----|------------|
//! | `solid:#1a1a2e` | Solid color |
//! | `gradient:sunset` | Named gradient preset |
//! | `gradient:45;#000000@0,#ffffff@1` | Custom gradient (angle in degrees) |
//! | `shader:ether` | Shader with default parameters |

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};

use crate::descriptor::ShaderDescriptor;
use crate::effects::ShaderKind;
use crate::error::BackdropError;
use crate::shader::{ColorStop, Rgba, multi_stop_gradient};
use crate::uniforms::Resolution;

/// A named static gradient.
#[derive(Debug, Clone, Copy)]
pub struct GradientPreset {
    pub name: &'static str,
    /// Direction in degrees, 0 = left to right, 90 = bottom to top.
    pub angle: f32,
    pub stops: &'static [ColorStop],
}

/// Built-in gradients.
pub const GRADIENT_PRESETS: &[GradientPreset] = &[
    GradientPreset {
        name: "sunset",
        angle: 90.0,
        stops: &[
            ColorStop::new(0.0, Vec3::new(0.98, 0.55, 0.35)),
            ColorStop::new(0.5, Vec3::new(0.75, 0.3, 0.5)),
            ColorStop::new(1.0, Vec3::new(0.2, 0.12, 0.38)),
        ],
    },
    GradientPreset {
        name: "ocean",
        angle: 90.0,
        stops: &[
            ColorStop::new(0.0, Vec3::new(0.0, 0.15, 0.3)),
            ColorStop::new(1.0, Vec3::new(0.1, 0.55, 0.7)),
        ],
    },
    GradientPreset {
        name: "night",
        angle: 90.0,
        stops: &[
            ColorStop::new(0.0, Vec3::new(0.05, 0.05, 0.12)),
            ColorStop::new(1.0, Vec3::new(0.0, 0.0, 0.02)),
        ],
    },
    GradientPreset {
        name: "dawn",
        angle: 45.0,
        stops: &[
            ColorStop::new(0.0, Vec3::new(0.96, 0.76, 0.62)),
            ColorStop::new(0.6, Vec3::new(0.62, 0.7, 0.88)),
            ColorStop::new(1.0, Vec3::new(0.35, 0.45, 0.75)),
        ],
    },
];

/// The background behind the clock.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Solid(Rgba),
    Gradient { stops: Vec<ColorStop>, angle: f32 },
    Shader(ShaderDescriptor),
}

impl Default for Background {
    fn default() -> Self {
        Background::Shader(ShaderDescriptor::of(ShaderKind::Palette))
    }
}

impl Background {
    /// Shader background with default parameters.
    pub fn shader(kind: ShaderKind) -> Self {
        Background::Shader(ShaderDescriptor::of(kind))
    }

    /// Gradient background from a preset name.
    pub fn preset(name: &str) -> Option<Self> {
        GRADIENT_PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| Background::Gradient {
                stops: p.stops.to_vec(),
                angle: p.angle,
            })
    }

    /// Whether the background changes over time.
    pub fn is_animated(&self) -> bool {
        matches!(self, Background::Shader(_))
    }

    /// Color at `frag` (pixels, bottom-left origin) `time` seconds after
    /// the background became active.
    pub fn color_at(&self, time: f32, resolution: Resolution, frag: Vec2) -> Rgba {
        match self {
            Background::Solid(color) => *color,
            Background::Gradient { stops, angle } => {
                let uv = frag / resolution.as_vec2() - Vec2::splat(0.5);
                let (s, c) = angle.to_radians().sin_cos();
                // Scale so the extreme corners land on 0 and 1
                let reach = c.abs() + s.abs();
                let t = 0.5 + uv.dot(Vec2::new(c, s)) / reach;
                Rgba::from_vec3(multi_stop_gradient(t, stops))
            }
            Background::Shader(descriptor) => descriptor.evaluate(time, resolution, frag),
        }
    }

    /// Every preset key: gradients and shaders.
    pub fn preset_keys() -> Vec<String> {
        GRADIENT_PRESETS
            .iter()
            .map(|p| format!("gradient:{}", p.name))
            .chain(ShaderKind::ALL.iter().map(|k| format!("shader:{}", k)))
            .collect()
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Solid(color) => write!(f, "solid:{}", color),
            Background::Gradient { stops, angle } => {
                let preset = GRADIENT_PRESETS
                    .iter()
                    .find(|p| p.angle == *angle && p.stops == stops.as_slice());
                if let Some(p) = preset {
                    return write!(f, "gradient:{}", p.name);
                }
                write!(f, "gradient:{}", angle)?;
                for (i, stop) in stops.iter().enumerate() {
                    let sep = if i == 0 { ';' } else { ',' };
                    write!(f, "{}{}@{}", sep, Rgba::from_vec3(stop.color), stop.position)?;
                }
                Ok(())
            }
            Background::Shader(descriptor) => write!(f, "shader:{}", descriptor.kind()),
        }
    }
}

impl FromStr for Background {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || BackdropError::UnknownBackground(s.to_string());
        let (scheme, value) = s.trim().split_once(':').ok_or_else(unknown)?;

        match scheme.to_ascii_lowercase().as_str() {
            "solid" => value
                .parse::<Rgba>()
                .map(Background::Solid)
                .map_err(|_| unknown()),
            "gradient" => Background::preset(value)
                .or_else(|| parse_custom_gradient(value))
                .ok_or_else(unknown),
            "shader" => value
                .parse::<ShaderKind>()
                .map(Background::shader)
                .map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}

/// `angle;#rrggbb@pos,#rrggbb@pos,...` with at least one stop.
fn parse_custom_gradient(value: &str) -> Option<Background> {
    let (angle, stops) = value.split_once(';')?;
    let angle: f32 = angle.trim().parse().ok().filter(|a: &f32| a.is_finite())?;

    let mut parsed = Vec::new();
    for stop in stops.split(',') {
        let (color, position) = stop.split_once('@')?;
        let color: Rgba = color.parse().ok()?;
        let position: f32 = position.trim().parse().ok().filter(|p: &f32| p.is_finite())?;
        parsed.push(ColorStop::new(position, color.rgb()));
    }
    if parsed.is_empty() {
        return None;
    }
    parsed.sort_by(|a, b| a.position.total_cmp(&b.position));

    Some(Background::Gradient {
        stops: parsed,
        angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keys_round_trip() {
        for key in [
            "solid:#1a1a2e",
            "gradient:sunset",
            "gradient:dawn",
            "shader:ether",
            "shader:moving_triangles",
        ] {
            let bg: Background = key.parse().unwrap();
            assert_eq!(bg.to_string(), key);
        }
    }

    #[test]
    fn test_custom_gradient_round_trip() {
        let key = "gradient:30;#000000@0,#ff8000@0.5,#ffffff@1";
        let bg: Background = key.parse().unwrap();
        assert_eq!(bg.to_string(), key);
        assert_eq!(bg.to_string().parse::<Background>().unwrap(), bg);
    }

    #[test]
    fn test_shader_key_is_forgiving() {
        let bg: Background = "shader:Glowing-Ring".parse().unwrap();
        assert_eq!(bg.to_string(), "shader:glowing_ring");
    }

    #[test]
    fn test_unknown_keys() {
        for key in ["", "shader", "shader:nope", "gradient:nope", "solid:#12", "video:x"] {
            assert!(
                matches!(key.parse::<Background>(), Err(BackdropError::UnknownBackground(_))),
                "{} should fail",
                key
            );
        }
    }

    #[test]
    fn test_solid_ignores_time_and_position() {
        let bg = Background::Solid(Rgba::opaque(0.2, 0.4, 0.6));
        let res = Resolution::new(100.0, 50.0);
        assert_eq!(bg.color_at(0.0, res, Vec2::ZERO), bg.color_at(9.0, res, Vec2::new(99.0, 49.0)));
        assert!(!bg.is_animated());
    }

    #[test]
    fn test_vertical_gradient_ends() {
        let bg = Background::preset("ocean").unwrap();
        let res = Resolution::new(100.0, 100.0);
        let bottom = bg.color_at(0.0, res, Vec2::new(50.0, 0.0));
        let top = bg.color_at(0.0, res, Vec2::new(50.0, 100.0));
        assert!((bottom.rgb() - Vec3::new(0.0, 0.15, 0.3)).length() < 1e-5);
        assert!((top.rgb() - Vec3::new(0.1, 0.55, 0.7)).length() < 1e-5);
    }

    #[test]
    fn test_preset_keys_parse() {
        let keys = Background::preset_keys();
        assert_eq!(keys.len(), GRADIENT_PRESETS.len() + ShaderKind::ALL.len());
        for key in keys {
            assert!(key.parse::<Background>().is_ok(), "{}", key);
        }
    }
}
