//! # Shader Descriptor
//!
//! Pairs a [`ShaderKind`] with the effect that renders it and the speed
//! modifier applied to elapsed time. Descriptors are immutable once built
//! and cheap to clone; the effect is shared behind an [`Arc`].

use std::fmt;
use std::sync::Arc;

use glam::Vec2;

use crate::effects::{Effect, ShaderKind};
use crate::shader::Rgba;
use crate::uniforms::{Resolution, Uniforms};

/// A shader background ready to evaluate.
#[derive(Clone)]
pub struct ShaderDescriptor {
    kind: ShaderKind,
    speed_modifier: f32,
    seed: f32,
    effect: Arc<dyn Effect>,
}

impl ShaderDescriptor {
    /// Descriptor for `kind` with default parameters and speed.
    pub fn of(kind: ShaderKind) -> Self {
        Self::with_effect(kind, kind.build())
    }

    /// Descriptor around an already configured effect.
    pub fn with_effect(kind: ShaderKind, effect: Box<dyn Effect>) -> Self {
        Self {
            kind,
            speed_modifier: kind.default_speed_modifier(),
            seed: 0.0,
            effect: Arc::from(effect),
        }
    }

    /// Replace the speed modifier. Negative values are treated as zero.
    pub fn speed(mut self, speed_modifier: f32) -> Self {
        self.speed_modifier = speed_modifier.max(0.0);
        self
    }

    /// Replace the seed uniform.
    pub fn seed(mut self, seed: f32) -> Self {
        self.seed = seed;
        self
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn speed_modifier(&self) -> f32 {
        self.speed_modifier
    }

    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    /// Uniforms for a frame `elapsed` seconds after activation.
    pub fn uniforms(&self, elapsed: f32, resolution: Resolution) -> Uniforms {
        Uniforms::new(elapsed * self.speed_modifier, resolution).with_seed(self.seed)
    }

    /// Color of one fragment `elapsed` seconds after activation.
    pub fn evaluate(&self, elapsed: f32, resolution: Resolution, frag: Vec2) -> Rgba {
        self.effect.evaluate(&self.uniforms(elapsed, resolution), frag)
    }
}

impl fmt::Debug for ShaderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderDescriptor")
            .field("kind", &self.kind)
            .field("speed_modifier", &self.speed_modifier)
            .field("seed", &self.seed)
            .field("params", &self.effect.params_description())
            .finish()
    }
}

impl PartialEq for ShaderDescriptor {
    /// Equal when kind, speed, seed and parameter values all match.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.speed_modifier == other.speed_modifier
            && self.seed == other.seed
            && self.effect.list_params() == other.effect.list_params()
    }
}
