//! Base64 / data-URI image decoding and normalization.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::imageops::FilterType;
use image::RgbImage;
use tracing::debug;

use crate::error::MediaResult;
use vgen_models::{INPUT_HEIGHT, INPUT_WIDTH};

/// Decode a base64 or data-URI image payload into an RGB raster.
///
/// A `data:image/...;base64,` prefix (any media type) is stripped before
/// decoding; everything through the first comma is scheme metadata. Alpha
/// channels are dropped.
pub fn decode_image(payload: &str) -> MediaResult<RgbImage> {
    let encoded = match payload.split_once(',') {
        Some((scheme, rest)) if scheme.starts_with("data:") => rest,
        _ => payload,
    };

    let bytes = BASE64.decode(encoded.trim())?;
    let image = image::load_from_memory(&bytes)?;

    debug!(
        width = image.width(),
        height = image.height(),
        "Decoded input image"
    );

    Ok(image.to_rgb8())
}

/// Encode an RGB raster as a base64 PNG payload (no data-URI prefix).
pub fn encode_image_png(image: &RgbImage) -> MediaResult<String> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image.clone()).write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageOutputFormat::Png,
    )?;

    Ok(BASE64.encode(bytes))
}

/// Resize an image to the model's required input resolution (1024x576).
///
/// The resolution is fixed by the capability; aspect ratio is not
/// preserved.
pub fn normalize_image(image: &RgbImage) -> RgbImage {
    if image.width() == INPUT_WIDTH && image.height() == INPUT_HEIGHT {
        return image.clone();
    }

    image::imageops::resize(image, INPUT_WIDTH, INPUT_HEIGHT, FilterType::Lanczos3)
}
