//! # Rasterizer
//!
//! Turns a per-fragment color function into an RGBA image.
//!
//! ## Coordinates
//!
//! Effects follow fragment shader conventions: the origin is the
//! bottom-left corner and a pixel is sampled at its centre. Image rows run
//! top to bottom, so row `y` is sampled at:
//!
//! ```text
//! frag = (x + 0.5, height − 1 − y + 0.5)
//! ```
//!
//! Rows are independent and rendered in parallel with rayon.

use std::time::Instant;

use glam::Vec2;
use image::RgbaImage;
use rayon::prelude::*;

use crate::background::Background;
use crate::error::{BackdropError, Result};
use crate::shader::Rgba;
use crate::uniforms::Resolution;

/// Largest frame, in pixels, that [`rasterize`] will allocate (256 MiB of RGBA).
pub const MAX_PIXELS: u64 = 1 << 26;

/// Pixel dimensions of `resolution`, rejecting anything that would give an
/// empty image or one larger than [`MAX_PIXELS`].
pub fn pixel_size(resolution: Resolution) -> Result<(u32, u32)> {
    let resolution = Resolution::validated(resolution.width, resolution.height)?;
    let width = resolution.width.round();
    let height = resolution.height.round();
    if width < 1.0
        || height < 1.0
        || width > MAX_PIXELS as f32
        || height > MAX_PIXELS as f32
        || (width as u64) * (height as u64) > MAX_PIXELS
    {
        return Err(BackdropError::InvalidResolution {
            width: resolution.width,
            height: resolution.height,
        });
    }
    Ok((width as u32, height as u32))
}

/// Fragment coordinate for image pixel `(x, y)` in an image `height` rows tall.
#[inline]
pub fn frag_coord(x: u32, y: u32, height: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, (height - 1 - y) as f32 + 0.5)
}

/// Render an image by calling `color_fn` for every fragment.
pub fn rasterize<F>(resolution: Resolution, color_fn: F) -> Result<RgbaImage>
where
    F: Fn(Vec2) -> Rgba + Sync,
{
    let (width, height) = pixel_size(resolution)?;
    let row_bytes = width as usize * 4;
    let mut data = vec![0u8; row_bytes * height as usize];

    data.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let color = color_fn(frag_coord(x as u32, y as u32, height));
                px.copy_from_slice(&color.to_rgba8());
            }
        });

    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| BackdropError::Image("pixel buffer size mismatch".to_string()))
}

/// Render one frame of `background`, `time` seconds after it became active.
pub fn render_frame(background: &Background, time: f32, resolution: Resolution) -> Result<RgbaImage> {
    let started = Instant::now();
    let image = rasterize(resolution, |frag| background.color_at(time, resolution, frag))?;
    tracing::debug!(
        background = %background,
        time,
        width = image.width(),
        height = image.height(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "rendered frame"
    );
    Ok(image)
}
