//! Blending and interpolation functions.

use glam::Vec3;

/// Linear interpolation between two values.
///
/// Returns `a` when `t=0`, `b` when `t=1`, and linear blend in between.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two colors (GLSL `mix`).
#[inline]
pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Smoothstep interpolation.
///
/// Hermite interpolation that is smooth at the endpoints.
/// Returns 0 when x <= edge0, 1 when x >= edge1, and smooth curve in between.
/// Reversed edges give the mirrored ramp, as in GLSL.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Hard step: 0 below `edge`, 1 at or above it.
#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep() {
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((smoothstep(2.0, 4.0, 3.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep_exact_at_edges() {
        let edges = [(0.0, 1.0), (-3.0, 2.5), (0.1, 0.1001), (10.0, 200.0)];
        for (e0, e1) in edges {
            assert_eq!(smoothstep(e0, e1, e0), 0.0);
            assert_eq!(smoothstep(e0, e1, e0 - 1.0), 0.0);
            assert_eq!(smoothstep(e0, e1, e1), 1.0);
            assert_eq!(smoothstep(e0, e1, e1 + 1.0), 1.0);
        }
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let (e0, e1) = (-0.7, 1.3);
        let mut last = 0.0;
        for i in 0..=400 {
            let x = -1.0 + i as f32 * 0.01;
            let v = smoothstep(e0, e1, x);
            assert!(v >= last, "not monotonic at x={}", x);
            last = v;
        }
    }

    #[test]
    fn test_smoothstep_reversed_edges() {
        assert_eq!(smoothstep(1.0, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(1.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_step() {
        assert_eq!(step(0.5, 0.49), 0.0);
        assert_eq!(step(0.5, 0.5), 1.0);
    }
}
