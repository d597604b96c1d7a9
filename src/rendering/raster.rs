/// Rasterization of a `Scene` and encoding to disk

use crate::error::{Error, Result};
use crate::options::OutputFormat;
use crate::rendering::paint::{PaintCommand, Scene};
use image::{DynamicImage, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use log::info;
use std::io::Cursor;
use std::path::Path;

/// Largest RGB canvas we are willing to allocate, in bytes (1 GiB).
pub const MAX_CANVAS_BYTES: u64 = 1 << 30;

fn canvas_bytes(width: u32, height: u32) -> Option<u64> {
    (width as u64).checked_mul(height as u64)?.checked_mul(3)
}

/// Execute every paint command in order on a fresh canvas.
pub fn rasterize(scene: &Scene) -> Result<RgbImage> {
    let (width, height) = (scene.size.width, scene.size.height);
    match canvas_bytes(width, height) {
        Some(bytes) if bytes <= MAX_CANVAS_BYTES && usize::try_from(bytes).is_ok() => {}
        _ => {
            return Err(Error::RenderError(format!(
                "canvas {}x{} exceeds the {} byte limit",
                width, height, MAX_CANVAS_BYTES
            )))
        }
    }
    let mut canvas = RgbImage::new(width, height);

    for cmd in &scene.commands {
        match cmd {
            PaintCommand::Fill { rgb } => {
                let px = image::Rgb::<u8>::from(*rgb);
                canvas.pixels_mut().for_each(|p| *p = px);
            }
            PaintCommand::SolidRect { x, y, width, height, rgb } => {
                // imageproc clips to the canvas
                let rect = Rect::at(*x, *y).of_size((*width).max(1), (*height).max(1));
                draw_filled_rect_mut(&mut canvas, rect, image::Rgb::<u8>::from(*rgb));
            }
            PaintCommand::Text { x, y, text, rgb } => {
                let face = scene.typeface.as_ref().ok_or_else(|| {
                    Error::RenderError("text command without a typeface".to_string())
                })?;
                // imageproc positions glyphs from the top of the line box,
                // the scene carries the baseline.
                let top = y.saturating_sub(face.ascent().round() as i32);
                draw_text_mut(&mut canvas, image::Rgb::<u8>::from(*rgb), *x, top, face.scale, &face.font, text);
            }
        }
    }

    Ok(canvas)
}

/// Encode `canvas` in `format`.
pub fn encode(canvas: RgbImage, format: OutputFormat) -> Result<Vec<u8>> {
    let image = match format {
        OutputFormat::Gif => DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(canvas).to_rgba8()),
        OutputFormat::Png | OutputFormat::Jpg => DynamicImage::ImageRgb8(canvas),
    };

    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, format.image_format())
        .map_err(|e| Error::EncodeError(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Encode `canvas` in `format` and write it to `path`.
///
/// Encoding happens in memory first, so an encoder failure leaves nothing
/// on disk.
pub fn write_image(canvas: RgbImage, format: OutputFormat, path: &Path) -> Result<()> {
    let bytes = encode(canvas, format).map_err(|e| match e {
        Error::EncodeError(msg) => Error::EncodeError(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    std::fs::write(path, bytes)
        .map_err(|e| Error::IoError(format!("{}: {}", path.display(), e)))?;

    info!("wrote {} placeholder to {}", format.extension(), path.display());
    Ok(())
}
