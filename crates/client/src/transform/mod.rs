//! Image transformation: bounded resize and JPEG re-encoding.
//!
//! Quality is fixed at 95 so scanned newspaper text stays legible.

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use frontpages_core::Error;

/// Fixed JPEG quality for re-encoded front pages.
const JPEG_QUALITY: u8 = 95;

/// Bounding box for a shrink-to-fit resize.
#[derive(Debug, Clone, Copy)]
pub struct ResizeTarget {
    pub width: u32,
    pub height: u32,
}

/// Decode raw image bytes, optionally shrink to fit within `target`, and
/// re-encode as JPEG.
///
/// The resize preserves aspect ratio and never upscales: an image already
/// inside the box is re-encoded at its original dimensions. With no target
/// the image is only re-encoded.
pub fn process_image(bytes: &[u8], target: Option<ResizeTarget>) -> Result<Vec<u8>, Error> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| Error::Unavailable(format!("image decode failed: {e}")))?;

    let resized = match target {
        Some(t) if decoded.width() > t.width || decoded.height() > t.height => {
            decoded.resize(t.width, t.height, FilterType::Lanczos3)
        }
        _ => decoded,
    };

    encode_jpeg(&resized)
}

fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>, Error> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|e| Error::Unavailable(format!("jpeg encode failed: {e}")))?;

    Ok(buf)
}
