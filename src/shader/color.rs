//! Color types and color-space helpers.

use std::fmt;
use std::str::FromStr;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Rec. 601 luma weights.
pub const LUMA: Vec3 = Vec3::new(0.299, 0.587, 0.114);

/// An RGBA color with channels in [0, 1].
///
/// Every effect produces opaque output: `a == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0.0, 0.0, 0.0);

    /// Opaque color from channels, unclamped.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from a vector, each channel clamped to [0, 1].
    ///
    /// NaN channels become 0 so a degenerate input never leaks out of the
    /// evaluator as NaN.
    #[inline]
    pub fn from_vec3(c: Vec3) -> Self {
        let ch = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self::opaque(ch(c.x), ch(c.y), ch(c.z))
    }

    /// RGB part as a vector.
    #[inline]
    pub fn rgb(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Convert to 8-bit channels with rounding.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Linear blend of two colors, alpha included.
    pub fn lerp(&self, other: &Rgba, t: f32) -> Rgba {
        let a = Vec4::new(self.r, self.g, self.b, self.a);
        let b = Vec4::new(other.r, other.g, other.b, other.a);
        let c = a + (b - a) * t;
        Rgba { r: c.x, g: c.y, b: c.z, a: c.w }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, _] = self.to_rgba8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Rgba {
    type Err = String;

    /// Parse `#rrggbb` or `rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("Invalid color '{}': expected #rrggbb", s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|e| format!("Invalid color '{}': {}", s, e))
        };
        Ok(Rgba::opaque(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Perceived brightness of a color.
#[inline]
pub fn luma(c: Vec3) -> f32 {
    c.dot(LUMA)
}

#[inline]
fn rgb_to_yiq(c: Vec3) -> Vec3 {
    Vec3::new(
        c.dot(LUMA),
        c.dot(Vec3::new(0.596, -0.274, -0.322)),
        c.dot(Vec3::new(0.211, -0.523, 0.312)),
    )
}

#[inline]
fn yiq_to_rgb(c: Vec3) -> Vec3 {
    Vec3::new(
        c.x + 0.956 * c.y + 0.621 * c.z,
        c.x - 0.272 * c.y - 0.647 * c.z,
        c.x - 1.106 * c.y + 1.703 * c.z,
    )
}

/// Rotate the hue of a color by `angle` radians.
///
/// Works in YIQ: luma is kept, the chroma vector (I, Q) is rotated.
pub fn hue_rotate(color: Vec3, angle: f32) -> Vec3 {
    let yiq = rgb_to_yiq(color);
    let chroma = (yiq.y * yiq.y + yiq.z * yiq.z).sqrt();
    let hue = yiq.z.atan2(yiq.y) + angle;
    yiq_to_rgb(Vec3::new(yiq.x, chroma * hue.cos(), chroma * hue.sin()))
}

/// Split a color into a normalized color and an alpha equal to its
/// brightest channel. `rgb * alpha` gives the input back.
#[inline]
pub fn extract_alpha(color: Vec3) -> (Vec3, f32) {
    let a = color.max_element();
    (color / (a + 1e-5), a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_from_vec3_clamps() {
        let c = Rgba::from_vec3(Vec3::new(-0.5, 0.5, 2.0));
        assert_eq!(c, Rgba::opaque(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_from_vec3_nan_is_zero() {
        let c = Rgba::from_vec3(Vec3::new(f32::NAN, 0.2, 0.3));
        assert_eq!(c.r, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_hex_roundtrip() {
        let c: Rgba = "#1a2b3c".parse().unwrap();
        assert_eq!(c.to_string(), "#1a2b3c");
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("zzzzzz".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_hex_rejects_signs() {
        assert!("#+1+2+3".parse::<Rgba>().is_err());
        assert!("-1-2-3".parse::<Rgba>().is_err());
        assert!("#1a2b3".parse::<Rgba>().is_err());
        assert_eq!("#FFFFFF".parse::<Rgba>().unwrap(), Rgba::opaque(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_hue_rotate_zero_is_identity() {
        let c = Vec3::new(0.8, 0.3, 0.1);
        let r = hue_rotate(c, 0.0);
        assert!((r - c).abs().max_element() < 1e-2);
    }

    #[test]
    fn test_hue_rotate_preserves_luma() {
        let c = Vec3::new(0.2, 0.6, 0.4);
        let r = hue_rotate(c, PI / 3.0);
        assert!((luma(r) - luma(c)).abs() < 1e-3);
        assert!((r - c).length() > 0.05);
    }

    #[test]
    fn test_hue_rotate_gray_is_fixed() {
        let g = Vec3::splat(0.5);
        assert!((hue_rotate(g, 1.3) - g).abs().max_element() < 1e-3);
    }

    #[test]
    fn test_extract_alpha() {
        let (rgb, a) = extract_alpha(Vec3::new(0.5, 0.25, 0.0));
        assert!((a - 0.5).abs() < 1e-6);
        assert!((rgb.x - 1.0).abs() < 1e-4);
        assert!((rgb * a - Vec3::new(0.5, 0.25, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_to_rgba8() {
        assert_eq!(Rgba::opaque(1.0, 0.0, 0.5).to_rgba8(), [255, 0, 128, 255]);
    }
}
