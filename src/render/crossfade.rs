//! # Crossfade
//!
//! Blend from the old background to the new one when the user switches,
//! instead of cutting. The old background keeps animating on its own clock
//! while it fades out.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use image::RgbaImage;

use crate::background::Background;
use crate::error::Result;
use crate::shader::Rgba;
use crate::uniforms::Resolution;

use super::raster::rasterize;

/// Blend curve types for crossfade transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlendCurve {
    /// Constant rate
    Linear,
    /// Slow start, fast middle, slow end
    #[default]
    Smooth,
    /// Slow start, fast end
    EaseIn,
    /// Fast start, slow end
    EaseOut,
}

impl BlendCurve {
    /// Map linear progress in [0, 1] onto the curve.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            BlendCurve::Linear => t,
            BlendCurve::Smooth => t * t * (3.0 - 2.0 * t),
            BlendCurve::EaseIn => t * t,
            BlendCurve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

impl FromStr for BlendCurve {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(BlendCurve::Linear),
            "smooth" => Ok(BlendCurve::Smooth),
            "ease-in" | "easein" | "ease_in" => Ok(BlendCurve::EaseIn),
            "ease-out" | "easeout" | "ease_out" => Ok(BlendCurve::EaseOut),
            _ => Err(format!("Unknown blend curve '{}'", s)),
        }
    }
}

impl fmt::Display for BlendCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlendCurve::Linear => "linear",
            BlendCurve::Smooth => "smooth",
            BlendCurve::EaseIn => "ease-in",
            BlendCurve::EaseOut => "ease-out",
        })
    }
}

/// A transition between two backgrounds.
#[derive(Debug, Clone)]
pub struct Crossfade {
    from: Background,
    to: Background,
    /// Elapsed time of `from` at the moment of the switch.
    from_offset: f32,
    duration: f32,
    curve: BlendCurve,
}

impl Crossfade {
    /// Fade from `from` (which had been running for `from_elapsed` seconds)
    /// to `to` over `duration` seconds.
    pub fn new(from: Background, from_elapsed: f32, to: Background, duration: f32) -> Self {
        Self {
            from,
            to,
            from_offset: from_elapsed.max(0.0),
            duration: duration.max(0.0),
            curve: BlendCurve::default(),
        }
    }

    /// Set the blend curve.
    pub fn curve(mut self, curve: BlendCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn target(&self) -> &Background {
        &self.to
    }

    /// Blend weight of the new background, `elapsed` seconds into the fade.
    pub fn weight(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.curve.apply(elapsed / self.duration)
    }

    pub fn is_finished(&self, elapsed: f32) -> bool {
        elapsed >= self.duration
    }

    /// Color at `frag`, `elapsed` seconds after the switch.
    pub fn color_at(&self, elapsed: f32, resolution: Resolution, frag: Vec2) -> Rgba {
        let w = self.weight(elapsed);
        if w >= 1.0 {
            return self.to.color_at(elapsed, resolution, frag);
        }
        let old = self.from.color_at(self.from_offset + elapsed, resolution, frag);
        if w <= 0.0 {
            return old;
        }
        let new = self.to.color_at(elapsed, resolution, frag);
        old.lerp(&new, w)
    }

    /// Render one frame of the transition.
    pub fn render(&self, elapsed: f32, resolution: Resolution) -> Result<RgbaImage> {
        rasterize(resolution, |frag| self.color_at(elapsed, resolution, frag))
    }
}
