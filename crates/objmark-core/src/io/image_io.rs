use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::error::Result;
use crate::geometry::Rect;

/// Decode an image file.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Pixel size of an image file, read from its header only.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    Ok(image::image_dimensions(path)?)
}

/// Copy out the part of `image` covered by `rect`, clamped to the image.
/// Returns `None` when the rectangle misses the image entirely.
pub fn crop_region(image: &DynamicImage, rect: &Rect) -> Option<DynamicImage> {
    let (w, h) = image.dimensions();
    let clamped = rect.clamp_to_image(w, h)?;
    Some(image.crop_imm(
        clamped.x as u32,
        clamped.y as u32,
        clamped.width as u32,
        clamped.height as u32,
    ))
}

/// Save as PNG regardless of the path's extension.
pub fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
