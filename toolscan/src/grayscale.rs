//! Luma conversion, per-pixel differencing and thresholding.
//!
//! Intermediates are one byte per pixel in `Buffer2<u8>`, indexed
//! `y * width + x`. Conversion and differencing run row-parallel.

use common::{BitBuffer2, Buffer2};
use rayon::prelude::*;

use crate::geometry::Aabb;
use crate::image::PixelBuffer;

const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Rec. 601 luma, rounded half away from zero. Alpha plays no part.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64).round() as u8
}

pub fn to_grayscale(image: &PixelBuffer) -> Buffer2<u8> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let mut gray = Buffer2::new_default(width, height);
    if width == 0 || height == 0 {
        return gray;
    }

    gray.pixels_mut()
        .par_chunks_mut(width)
        .zip(image.bytes().par_chunks(width * PixelBuffer::BYTES_PER_PIXEL))
        .for_each(|(dst, src)| {
            for (out, px) in dst
                .iter_mut()
                .zip(src.chunks_exact(PixelBuffer::BYTES_PER_PIXEL))
            {
                *out = luma(px[0], px[1], px[2]);
            }
        });

    gray
}

/// `|a - b|` per pixel. Both buffers must have the same size.
pub fn absolute_difference(a: &Buffer2<u8>, b: &Buffer2<u8>) -> Buffer2<u8> {
    assert_eq!(a.width(), b.width(), "difference inputs differ in width");
    assert_eq!(a.height(), b.height(), "difference inputs differ in height");

    let width = a.width();
    let mut diff = Buffer2::new_default(width, a.height());
    if diff.is_empty() {
        return diff;
    }

    diff.pixels_mut()
        .par_chunks_mut(width)
        .zip(a.par_chunks(width).zip(b.par_chunks(width)))
        .for_each(|(dst, (row_a, row_b))| {
            for ((out, &va), &vb) in dst.iter_mut().zip(row_a).zip(row_b) {
                *out = va.abs_diff(vb);
            }
        });

    diff
}

/// Foreground bit for every pixel strictly above `threshold`.
pub fn threshold_mask(diff: &Buffer2<u8>, threshold: u8) -> BitBuffer2 {
    BitBuffer2::from_fn(diff.width(), diff.height(), |idx| diff[idx] > threshold)
}

/// Mean of `|a - b|` over an inclusive box that already lies inside both buffers.
pub fn mean_abs_difference(a: &Buffer2<u8>, b: &Buffer2<u8>, bbox: Aabb) -> f64 {
    debug_assert!(bbox.x_max < a.width() && bbox.y_max < a.height());
    debug_assert_eq!(a.width(), b.width());

    let mut total = 0u64;
    for y in bbox.y_min..=bbox.y_max {
        let row_a = &a.row(y)[bbox.x_min..=bbox.x_max];
        let row_b = &b.row(y)[bbox.x_min..=bbox.x_max];
        total += row_a
            .iter()
            .zip(row_b)
            .map(|(&va, &vb)| va.abs_diff(vb) as u64)
            .sum::<u64>();
    }

    total as f64 / bbox.area() as f64
}
