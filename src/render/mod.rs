//! # Rendering Module
//!
//! Drives the per-fragment effects over whole frames.
//!
//! ## Modules
//!
//! - [`raster`]: parallel rasterizer and [`render_frame`]
//! - [`crossfade`]: blended transitions between backgrounds
//!
//! ## Usage Example
//!
//! ```no_run
//! use backdrop::background::Background;
//! use backdrop::effects::ShaderKind;
//! use backdrop::render;
//! use backdrop::uniforms::Resolution;
//!
//! let bg = Background::shader(ShaderKind::Ether);
//! let frame = render::render_frame(&bg, 2.0, Resolution::new(800.0, 600.0))?;
//! render::save_png(&frame, "ether.png".as_ref())?;
//! # Ok::<(), backdrop::BackdropError>(())
//! ```

use std::path::Path;

use image::RgbaImage;

use crate::error::{BackdropError, Result};

pub mod crossfade;
pub mod raster;

pub use crossfade::{BlendCurve, Crossfade};
pub use raster::{rasterize, render_frame};

/// Write `image` as a PNG file.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| BackdropError::Image(format!("{}: {}", path.display(), e)))?;
    tracing::info!(path = %path.display(), "wrote png");
    Ok(())
}
