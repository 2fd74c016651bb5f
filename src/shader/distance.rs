//! Distance functions for spatial calculations.

use glam::Vec2;

use super::transform::rotate;

/// Distance from `p` to the segment `a`–`b`, plus the projection parameter.
///
/// Returns `(distance, h)` where `h` in [0, 1] is how far along the segment
/// the closest point lies (0 at `a`, 1 at `b`). A zero-length segment
/// behaves like the point `a`.
#[inline]
pub fn dist_to_segment(p: Vec2, a: Vec2, b: Vec2) -> (f32, f32) {
    let pa = p - a;
    let ba = b - a;
    let len_sq = ba.length_squared();
    let h = if len_sq > 0.0 {
        (pa.dot(ba) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    ((pa - ba * h).length(), h)
}

/// Signed distance from `p` to the infinite line through the origin with
/// direction `angle` (radians).
#[inline]
pub fn dist_to_line(p: Vec2, angle: f32) -> f32 {
    // y in the line's own frame
    rotate(p.x, p.y, -angle).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist_to_segment_interior() {
        let (d, h) = dist_to_segment(Vec2::new(1.0, 1.0), Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert!((d - 1.0).abs() < 1e-6);
        assert!((h - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_dist_to_segment_clamps_to_endpoints() {
        let (d, h) = dist_to_segment(Vec2::new(5.0, 0.0), Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
        assert_eq!(h, 1.0);
        let (d, h) = dist_to_segment(Vec2::new(-1.0, 0.0), Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert!((d - 1.0).abs() < 1e-6);
        assert_eq!(h, 0.0);
    }

    #[test]
    fn test_dist_to_segment_degenerate() {
        let (d, h) = dist_to_segment(Vec2::new(0.0, 2.0), Vec2::ZERO, Vec2::ZERO);
        assert!((d - 2.0).abs() < 1e-6);
        assert_eq!(h, 0.0);
    }

    #[test]
    fn test_dist_to_line() {
        assert!((dist_to_line(Vec2::new(5.0, 2.0), 0.0) - 2.0).abs() < 1e-6);
        let d = dist_to_line(Vec2::new(1.0, 1.0), std::f32::consts::FRAC_PI_4);
        assert!(d.abs() < 1e-6);
    }
}
