use ::image as image_lib;
use image_lib::codecs::jpeg::JpegEncoder;
use image_lib::codecs::png::PngEncoder;
use image_lib::{ExtendedColorType, ImageEncoder};

use super::{ImageRole, PixelBuffer};
use crate::error::{Error, Result};

pub(crate) fn decode(bytes: &[u8], role: ImageRole) -> Result<PixelBuffer> {
    let img = image_lib::load_from_memory(bytes).map_err(|source| Error::Load { role, source })?;

    tracing::debug!(
        "Decoded {} image: {}x{} {:?}",
        role,
        img.width(),
        img.height(),
        img.color()
    );

    Ok(PixelBuffer::from_rgba_image(img.into_rgba8()))
}

pub(crate) fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            image.bytes(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(Error::Encode)?;

    Ok(out)
}

pub(crate) fn encode_jpeg(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>> {
    let rgb: Vec<u8> = image
        .bytes()
        .chunks_exact(PixelBuffer::BYTES_PER_PIXEL)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .encode(&rgb, image.width(), image.height(), ExtendedColorType::Rgb8)
        .map_err(Error::Encode)?;

    Ok(out)
}
