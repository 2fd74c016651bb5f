//! Hash and noise functions for procedural generation.
//!
//! Everything here is a pure function of its float inputs. The hash
//! constants are tuning values picked for appearance; each effect keeps its
//! own [`HashKey`] and the keys are not interchangeable.

use glam::{Vec2, Vec3, Vec4};

use super::adjust::{fract, fract_vec3};
use super::blend::{lerp, step};
use super::transform::rotate2d;

/// Constants for the `fract(sin(dot(p, k)) * K)` family of 2D hashes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashKey {
    /// Dot vector for the first output component.
    pub k0: Vec2,
    /// Dot vector for the second output component.
    pub k1: Vec2,
    /// Scramble multiplier applied after `sin`.
    pub scale: f32,
}

impl HashKey {
    /// Used by the palette flow and the purple effects.
    pub const FLOW: HashKey = HashKey {
        k0: Vec2::new(157.13, 113.47),
        k1: Vec2::new(271.93, 124.61),
        scale: 43758.547,
    };

    /// Used by the red flow variant.
    pub const EMBER: HashKey = HashKey {
        k0: Vec2::new(2127.1, 81.17),
        k1: Vec2::new(1269.5, 283.37),
        scale: 43758.547,
    };

    /// Used for star placement.
    pub const STARS: HashKey = HashKey {
        k0: Vec2::new(127.1, 311.7),
        k1: Vec2::new(269.5, 183.3),
        scale: 43758.547,
    };
}

/// 1D hash: `fract(sin(n) * 43758.5453)`, in [0, 1).
#[inline]
pub fn hash11(n: f32) -> f32 {
    fract(n.sin() * 43758.547)
}

/// 2D hash returning a vector in [-1, 1)².
#[inline]
pub fn hash2d(p: Vec2, key: HashKey) -> Vec2 {
    let h = Vec2::new(p.dot(key.k0), p.dot(key.k1));
    Vec2::new(
        -1.0 + 2.0 * fract(h.x.sin() * key.scale),
        -1.0 + 2.0 * fract(h.y.sin() * key.scale),
    )
}

/// 2D noise on the unit grid.
///
/// Each corner contributes `dot(hash2d(corner), f - corner)` and the four
/// contributions are blended with the cubic `f²(3 - 2f)` weights. The result
/// is shifted by 0.5 so it sits roughly in [0, 1] and is continuous across
/// cell boundaries.
pub fn value_noise2d(p: Vec2, key: HashKey) -> f32 {
    let i = p.floor();
    let f = p - i;
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);

    let corner = |o: Vec2| hash2d(i + o, key).dot(f - o);

    let a = corner(Vec2::new(0.0, 0.0));
    let b = corner(Vec2::new(1.0, 0.0));
    let c = corner(Vec2::new(0.0, 1.0));
    let d = corner(Vec2::new(1.0, 1.0));

    0.5 + lerp(lerp(a, b, u.x), lerp(c, d, u.x), u.y)
}

/// Fractal noise: octaves of [`value_noise2d`], each rotated, doubled in
/// frequency and halved in amplitude. Normalized back to roughly [0, 1].
pub fn fbm2d(p: Vec2, octaves: usize, key: HashKey) -> f32 {
    let rot = rotate2d(0.5);
    let mut p = p;
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        value += amplitude * value_noise2d(p, key);
        max_value += amplitude;
        p = rot * p * 2.0 + Vec2::splat(100.0);
        amplitude *= 0.5;
    }

    if max_value > 0.0 { value / max_value } else { 0.0 }
}

/// 3D hash returning a vector in [-1, 1)³.
#[inline]
pub fn hash33(p: Vec3) -> Vec3 {
    let mut p3 = fract_vec3(p * Vec3::new(0.1031, 0.11369, 0.13787));
    p3 += Vec3::splat(p3.dot(Vec3::new(p3.y, p3.x, p3.z) + Vec3::splat(19.19)));
    -1.0 + 2.0
        * fract_vec3(Vec3::new(p3.x + p3.y, p3.x + p3.z, p3.y + p3.z) * Vec3::new(p3.z, p3.y, p3.x))
}

/// 3D simplex noise, roughly in [-1, 1].
///
/// Skews into the tetrahedral lattice, picks the simplex containing `p`,
/// and sums the four corner kernels `max(0.6 - |d|², 0)⁴ · dot(d, grad)`.
pub fn simplex3d(p: Vec3) -> f32 {
    const K1: f32 = 0.333_333_34;
    const K2: f32 = 0.166_666_67;

    let i = (p + Vec3::splat((p.x + p.y + p.z) * K1)).floor();
    let d0 = p - (i - Vec3::splat((i.x + i.y + i.z) * K2));

    // Which of the six tetrahedra: compare each axis with the next.
    let diff = d0 - Vec3::new(d0.y, d0.z, d0.x);
    let e = Vec3::new(step(0.0, diff.x), step(0.0, diff.y), step(0.0, diff.z));
    let e_zxy = Vec3::new(e.z, e.x, e.y);
    let i1 = e * (Vec3::ONE - e_zxy);
    let i2 = Vec3::ONE - e_zxy * (Vec3::ONE - e);

    let d1 = d0 - (i1 - Vec3::splat(K2));
    let d2 = d0 - (i2 - Vec3::splat(K1));
    let d3 = d0 - Vec3::splat(0.5);

    let h = (Vec4::splat(0.6) - Vec4::new(d0.dot(d0), d1.dot(d1), d2.dot(d2), d3.dot(d3)))
        .max(Vec4::ZERO);
    let n = h * h * h * h
        * Vec4::new(
            d0.dot(hash33(i)),
            d1.dot(hash33(i + i1)),
            d2.dot(hash33(i + i2)),
            d3.dot(hash33(i + Vec3::ONE)),
        );

    Vec4::splat(31.316).dot(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash11_range() {
        for i in 0..1000 {
            let v = hash11(i as f32 * 1.37);
            assert!((0.0..1.0).contains(&v), "hash11 out of range: {}", v);
        }
    }

    #[test]
    fn test_hash2d_deterministic() {
        let p = Vec2::new(3.0, -7.0);
        assert_eq!(hash2d(p, HashKey::FLOW), hash2d(p, HashKey::FLOW));
    }

    #[test]
    fn test_hash_keys_differ() {
        let p = Vec2::new(4.0, 9.0);
        assert_ne!(hash2d(p, HashKey::FLOW), hash2d(p, HashKey::EMBER));
    }

    #[test]
    fn test_hash2d_range() {
        for y in 0..40 {
            for x in 0..40 {
                let h = hash2d(Vec2::new(x as f32, y as f32), HashKey::FLOW);
                assert!(h.x >= -1.0 && h.x < 1.0);
                assert!(h.y >= -1.0 && h.y < 1.0);
            }
        }
    }

    #[test]
    fn test_value_noise2d_range() {
        for y in 0..100 {
            for x in 0..100 {
                let v = value_noise2d(Vec2::new(x as f32 * 0.13, y as f32 * 0.11), HashKey::FLOW);
                assert!(v > -0.5 && v < 1.5, "noise out of range: {}", v);
            }
        }
    }

    #[test]
    fn test_value_noise2d_continuity() {
        let p = Vec2::new(3.3, 7.7);
        let eps = Vec2::new(0.0001, 0.0);
        let v1 = value_noise2d(p, HashKey::FLOW);
        let v2 = value_noise2d(p + eps, HashKey::FLOW);
        assert!((v1 - v2).abs() < 0.01, "noise should be continuous");
    }

    #[test]
    fn test_value_noise2d_continuous_across_cells() {
        for key in [HashKey::FLOW, HashKey::EMBER] {
            let left = value_noise2d(Vec2::new(4.9999, 2.5), key);
            let right = value_noise2d(Vec2::new(5.0001, 2.5), key);
            assert!((left - right).abs() < 0.01);
        }
    }

    #[test]
    fn test_value_noise2d_is_half_on_lattice() {
        // Every corner term vanishes on integer points.
        let v = value_noise2d(Vec2::new(3.0, 8.0), HashKey::FLOW);
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fbm2d_deterministic() {
        let p = Vec2::new(1.25, -0.5);
        assert_eq!(fbm2d(p, 5, HashKey::FLOW), fbm2d(p, 5, HashKey::FLOW));
        assert_eq!(fbm2d(p, 0, HashKey::FLOW), 0.0);
    }

    #[test]
    fn test_hash33_range() {
        for i in 0..200 {
            let h = hash33(Vec3::new(i as f32, i as f32 * 0.5, -(i as f32)));
            for c in h.to_array() {
                assert!((-1.0..=1.0).contains(&c));
            }
        }
    }

    #[test]
    fn test_simplex3d_bounded_and_smooth() {
        let mut last = simplex3d(Vec3::new(0.0, 0.3, 0.7));
        for i in 1..500 {
            let p = Vec3::new(i as f32 * 0.001, 0.3, 0.7);
            let v = simplex3d(p);
            assert!(v.abs() <= 1.5, "simplex out of range: {}", v);
            assert!((v - last).abs() < 0.05);
            last = v;
        }
    }
}
