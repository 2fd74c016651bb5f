//! # Backdrop - Procedural Clock Backgrounds
//!
//! Backdrop evaluates animated backgrounds for clock faces one pixel at a
//! time on the CPU, with the semantics of a fragment shader. It provides:
//!
//! - **Shader math**: GLSL-style helpers, noise, palettes and grading
//! - **Effects**: ten animated backgrounds behind one [`effects::Effect`] trait
//! - **Backgrounds**: solid colors, gradients and shaders behind string keys
//! - **Rendering**: parallel rasterization, crossfades and PNG output
//!
//! ## Quick Start
//!
//! ```no_run
//! use backdrop::{
//!     background::Background,
//!     clock::FrameClock,
//!     effects::ShaderKind,
//!     render,
//!     uniforms::Resolution,
//! };
//!
//! let background = Background::shader(ShaderKind::Palette);
//! let clock = FrameClock::system();
//!
//! let frame = render::render_frame(&background, clock.elapsed(), Resolution::new(800.0, 600.0))?;
//! render::save_png(&frame, "palette.png".as_ref())?;
//!
//! # Ok::<(), backdrop::BackdropError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`shader`] | Primitive math, noise, palettes |
//! | [`effects`] | Per-fragment background effects |
//! | [`uniforms`] | Time, resolution and seed handed to effects |
//! | [`descriptor`] | Shader kind plus speed modifier |
//! | [`background`] | Background selection and string keys |
//! | [`render`] | Frame rasterizer and crossfades |
//! | [`clock`] | Injected time sources |
//! | [`config`] | Preferences file and key-value store |
//! | [`error`] | Error types |

pub mod background;
pub mod clock;
pub mod config;
pub mod descriptor;
pub mod effects;
pub mod error;
pub mod render;
pub mod shader;
pub mod uniforms;

// Re-exports for convenience
pub use background::Background;
pub use descriptor::ShaderDescriptor;
pub use error::BackdropError;
pub use uniforms::{Resolution, Uniforms};
