use std::path::Path;

use image::RgbImage;

use crate::errors::{ClassifyError, ClassifyResult};

/// Opens and decodes an image, forcing 8-bit RGB whatever the source layout
/// (grayscale, alpha, 16-bit).
pub fn load_rgb(path: impl AsRef<Path>) -> ClassifyResult<RgbImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| ClassifyError::image_decode(path, e))?;
    debug!("Decoded {:?}: {}x{} {:?}", path, image.width(), image.height(), image.color());
    Ok(image.to_rgb8())
}
