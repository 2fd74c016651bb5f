//! Per-frame inputs shared by every fragment of one evaluation pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{BackdropError, Result};

/// Render target size in pixels. The aspect ratio is always derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: f32,
    pub height: f32,
}

impl Resolution {
    /// Build a resolution without checking it.
    ///
    /// Evaluators do not guard against a zero height; use
    /// [`Resolution::validated`] at the host boundary.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Build a resolution, rejecting non-positive or non-finite sizes.
    pub fn validated(width: f32, height: f32) -> Result<Self> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(width) && ok(height) {
            Ok(Self { width, height })
        } else {
            Err(BackdropError::InvalidResolution { width, height })
        }
    }

    /// `width / height`.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Size as a vector, for shader-style arithmetic.
    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// The uniform set handed to an effect for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    /// Seconds since the background became active, already scaled by the
    /// descriptor's speed modifier.
    pub time: f32,
    pub resolution: Resolution,
    /// Seed for the effects that randomize their flow per install.
    pub seed: f32,
}

impl Uniforms {
    pub fn new(time: f32, resolution: Resolution) -> Self {
        Self {
            time,
            resolution,
            seed: 0.0,
        }
    }

    pub fn with_seed(mut self, seed: f32) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect() {
        assert!((Resolution::new(800.0, 600.0).aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_validated() {
        assert!(Resolution::validated(1.0, 1.0).is_ok());
        assert!(Resolution::validated(0.0, 600.0).is_err());
        assert!(Resolution::validated(800.0, -1.0).is_err());
        assert!(Resolution::validated(f32::NAN, 600.0).is_err());
        assert!(Resolution::validated(800.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_with_seed() {
        let u = Uniforms::new(1.5, Resolution::new(10.0, 10.0)).with_seed(3.0);
        assert_eq!(u.seed, 3.0);
        assert_eq!(u.time, 1.5);
    }
}
