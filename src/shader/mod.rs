//! # Shader Primitives Library
//!
//! Reusable building blocks for the background effects. These functions
//! mirror the operations found in fragment shaders (GLSL `fract`, `mix`,
//! `smoothstep`, hashes, noise) and are composed by [`crate::effects`] into
//! full-frame color functions.
//!
//! ## Categories
//!
//! - [`noise`]: Sine hashes, gradient value noise, fbm, 3D simplex noise
//! - [`palette`]: Cosine palettes, multi-stop gradients, color grading
//! - [`color`]: The [`Rgba`] output type, luma, hue rotation, alpha extraction
//! - [`distance`]: Point, segment and line distances
//! - [`line`]: Soft lines, rotating lines, segment clipping
//! - [`transform`]: Rotation, aspect-corrected coordinates, edge compression
//! - [`grid`]: Cell indexing for scattered features
//! - [`blend`]: Linear interpolation, smoothstep, screen blend
//! - [`adjust`]: Gamma, tonemapping, clamping
//!
//! All functions are pure: no global state, no allocation, identical output
//! for identical input.
//!
//! ## Example
//!
//! ```rust
//! use backdrop::shader::*;
//! use glam::Vec2;
//!
//! fn my_effect(frag: Vec2, resolution: Vec2, time: f32) -> Rgba {
//!     let uv = centered_uv(frag, resolution);
//!     let n = value_noise2d(uv * 4.0 + Vec2::splat(time), HashKey::FLOW);
//!     Rgba::from_vec3(PaletteParams::default().at(n))
//! }
//! ```

pub mod adjust;
pub mod blend;
pub mod color;
pub mod distance;
pub mod grid;
pub mod line;
pub mod noise;
pub mod palette;
pub mod transform;

// Re-export all primitives at the top level for convenience
pub use adjust::*;
pub use blend::*;
pub use color::*;
pub use distance::*;
pub use grid::*;
pub use line::*;
pub use noise::*;
pub use palette::*;
pub use transform::*;
