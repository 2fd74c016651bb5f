//! Soft lines and segment clipping.

use glam::Vec2;

use super::blend::smoothstep;
use super::distance::dist_to_line;

/// Soft-edged band around a line distance.
///
/// 1 inside `half_width`, fading to 0 over `softness` beyond it.
#[inline]
pub fn soft_line(distance: f32, half_width: f32, softness: f32) -> f32 {
    1.0 - smoothstep(half_width, half_width + softness, distance.abs())
}

/// A soft line through `center` rotating at `angle` radians.
#[inline]
pub fn rotating_line(p: Vec2, center: Vec2, angle: f32, half_width: f32, softness: f32) -> f32 {
    soft_line(dist_to_line(p - center, angle), half_width, softness)
}

/// Axis-aligned rectangle used as a clip window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Clip the segment `a`–`b` to `rect` (Liang–Barsky).
///
/// Returns the parameter range `(t0, t1)` of the visible part, with
/// `a + (b - a)·t`, or `None` when the segment misses the rectangle.
pub fn clip_segment(a: Vec2, b: Vec2, rect: &Rect) -> Option<(f32, f32)> {
    let d = b - a;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;

    let edges = [
        (-d.x, a.x - rect.min.x),
        (d.x, rect.max.x - a.x),
        (-d.y, a.y - rect.min.y),
        (d.y, rect.max.y - a.y),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge: fully outside or irrelevant.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((t0, t1))
}
