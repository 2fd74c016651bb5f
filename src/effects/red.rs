//! # Red
//!
//! The palette flow (see [`super::palette`]) with ember colors: its own hash
//! constants, a red cosine palette and a stronger pull toward orange.

use glam::{Vec2, Vec3};

use crate::shader::{Grading, HashKey, PaletteParams, Rgba};
use crate::uniforms::Uniforms;

use super::palette::{self, Params};
use super::{Effect, ParamSpec};

/// Default flow parameters for the red variant.
pub fn ember_params() -> Params {
    Params {
        speed: 0.35,
        palette: PaletteParams::EMBER,
        grading: Grading {
            vividness: 0.35,
            warm_bias: 0.2,
            warm_target: Vec3::new(1.0, 0.45, 0.25),
            hue_drift: 0.0,
            ..Grading::default()
        },
        key: HashKey::EMBER,
        ..Params::default()
    }
}

/// Red ember flow effect.
#[derive(Debug, Clone)]
pub struct Red {
    params: Params,
}

impl Default for Red {
    fn default() -> Self {
        Self::golden()
    }
}

impl Red {
    pub fn golden() -> Self {
        Self { params: ember_params() }
    }

    /// Randomized motion; colors stay red.
    pub fn random() -> Self {
        let motion = Params::random();
        Self {
            params: Params {
                speed: motion.speed,
                scale: motion.scale,
                wave_intensity: motion.wave_intensity,
                complexity: motion.complexity,
                ..ember_params()
            },
        }
    }
}

impl Effect for Red {
    fn name(&self) -> &'static str {
        "red"
    }

    fn evaluate(&self, uniforms: &Uniforms, frag: Vec2) -> Rgba {
        palette::shade(uniforms, frag, &self.params)
    }

    fn params_description(&self) -> String {
        self.params.to_string()
    }

    fn set_param(&mut self, name: &str, value: &str) -> Result<(), String> {
        self.params.set("red", name, value)
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        self.params.list()
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        Params::specs()
    }
}
