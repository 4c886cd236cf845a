//! Synthetic cabinet photos for tests.

use crate::geometry::Dimensions;
use crate::image::PixelBuffer;

pub(crate) const WHITE: [u8; 4] = [255, 255, 255, 255];
pub(crate) const DARK: [u8; 4] = [20, 20, 20, 255];

/// Opaque white image.
pub(crate) fn blank_image(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::new_filled(Dimensions::new(width, height), WHITE)
}

/// Paints a rectangle, clipped to the image.
pub(crate) fn paint_rect(
    image: &mut PixelBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: [u8; 4],
) {
    let x1 = (x + width).min(image.width());
    let y1 = (y + height).min(image.height());
    for py in y..y1 {
        for px in x..x1 {
            image.set_pixel(px, py, color);
        }
    }
}

/// White image with one filled rectangle.
pub(crate) fn image_with_rect(
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    rect_width: u32,
    rect_height: u32,
    color: [u8; 4],
) -> PixelBuffer {
    let mut image = blank_image(width, height);
    paint_rect(&mut image, x, y, rect_width, rect_height, color);
    image
}

pub(crate) fn png_bytes(image: &PixelBuffer) -> Vec<u8> {
    image.encode_png().unwrap()
}
