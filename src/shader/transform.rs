//! Coordinate transformation functions.

use glam::{Mat2, Vec2};

use super::blend::{lerp, smoothstep};

/// Rotate a point around the origin.
///
/// # Parameters
/// - `x`, `y`: Point coordinates
/// - `angle`: Rotation angle in radians (counter-clockwise)
///
/// # Returns
/// Rotated (x, y) coordinates
#[inline]
pub fn rotate(x: f32, y: f32, angle: f32) -> (f32, f32) {
    let cos_a = angle.cos();
    let sin_a = angle.sin();
    (x * cos_a - y * sin_a, x * sin_a + y * cos_a)
}

/// 2x2 rotation matrix `[cos, -sin; sin, cos]`.
///
/// `rotate2d(a) * v` rotates `v` counter-clockwise by `a` radians.
#[inline]
pub fn rotate2d(angle: f32) -> Mat2 {
    let (s, c) = angle.sin_cos();
    Mat2::from_cols(Vec2::new(c, s), Vec2::new(-s, c))
}

/// Centered coordinates normalized by the shorter screen side.
///
/// The screen center maps to (0, 0) and the shorter axis spans [-1, 1].
/// Two resolutions with the same aspect ratio map corresponding pixels to
/// the same point.
#[inline]
pub fn centered_uv(frag: Vec2, resolution: Vec2) -> Vec2 {
    (2.0 * frag - resolution) / resolution.x.min(resolution.y)
}

/// Centered coordinates normalized by height, x stretched by aspect.
///
/// y spans [-0.5, 0.5], x spans `[-aspect/2, aspect/2]`.
#[inline]
pub fn aspect_uv(frag: Vec2, resolution: Vec2) -> Vec2 {
    (frag - 0.5 * resolution) / resolution.y
}

/// Soft-compress a coordinate beyond `threshold`.
///
/// Inside the threshold the coordinate is unchanged. Past it, the excess is
/// scaled by a factor that eases from 1 down to `compression` as `|x|`
/// approaches 1.5, keeping wide screens from stretching the gradient at the
/// edges.
#[inline]
pub fn compress_edge(x: f32, threshold: f32, compression: f32) -> f32 {
    let ax = x.abs();
    if ax <= threshold {
        return x;
    }
    let k = lerp(1.0, compression, smoothstep(threshold, 1.5, ax));
    x.signum() * (threshold + (ax - threshold) * k)
}

/// [`compress_edge`] applied to both axes.
#[inline]
pub fn compress_edges(p: Vec2, threshold: f32, compression: f32) -> Vec2 {
    Vec2::new(
        compress_edge(p.x, threshold, compression),
        compress_edge(p.y, threshold, compression),
    )
}

/// Convert Cartesian coordinates to polar.
///
/// # Returns
/// (radius, angle) where angle is in radians [-PI, PI]
#[inline]
pub fn cart_to_polar(p: Vec2) -> (f32, f32) {
    (p.length(), p.y.atan2(p.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_rotate_90() {
        let (x, y) = rotate(1.0, 0.0, PI / 2.0);
        assert!(x.abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate2d_matches_scalar() {
        for i in 0..16 {
            let a = i as f32 * 0.4;
            let v = rotate2d(a) * Vec2::new(0.3, -1.7);
            let (x, y) = rotate(0.3, -1.7, a);
            assert!((v.x - x).abs() < 1e-5);
            assert!((v.y - y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rotate2d_layout() {
        let m = rotate2d(PI / 2.0);
        // [cos, -sin; sin, cos] with cos=0, sin=1
        assert!((m.x_axis.y - 1.0).abs() < 1e-6);
        assert!((m.y_axis.x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_centered_uv() {
        let res = Vec2::new(800.0, 600.0);
        assert_eq!(centered_uv(Vec2::new(400.0, 300.0), res), Vec2::ZERO);
        let top = centered_uv(Vec2::new(400.0, 600.0), res);
        assert!((top.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_centered_uv_scale_invariant() {
        let a = centered_uv(Vec2::new(100.0, 50.0), Vec2::new(800.0, 600.0));
        let b = centered_uv(Vec2::new(200.0, 100.0), Vec2::new(1600.0, 1200.0));
        assert!((a - b).length() < 1e-6);
    }

    #[test]
    fn test_compress_edge() {
        assert_eq!(compress_edge(0.5, 0.8, 0.4), 0.5);
        assert_eq!(compress_edge(-0.8, 0.8, 0.4), -0.8);
        let far = compress_edge(2.0, 0.8, 0.4);
        assert!(far < 2.0 && far > 0.8);
        assert!((compress_edge(-2.0, 0.8, 0.4) + far).abs() < 1e-6);
    }

    #[test]
    fn test_compress_edge_continuous_at_threshold() {
        let inside = compress_edge(0.8, 0.8, 0.4);
        let outside = compress_edge(0.8001, 0.8, 0.4);
        assert!((outside - inside).abs() < 1e-3);
    }

    #[test]
    fn test_cart_to_polar() {
        let (r, a) = cart_to_polar(Vec2::new(0.0, 2.0));
        assert!((r - 2.0).abs() < 1e-6);
        assert!((a - PI / 2.0).abs() < 1e-6);
    }
}
