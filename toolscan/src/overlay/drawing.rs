//! Drawing primitives on RGBA8 pixel buffers.
//!
//! Every primitive alpha-blends and clips to the image.

use ab_glyph::{Font, PxScale, ScaleFont};
use glam::Vec2;

use super::color::Color;
use crate::geometry::{Dimensions, Rect};
use crate::image::PixelBuffer;

/// Fill a rectangle, clipped to the image.
pub fn fill_rect(image: &mut PixelBuffer, rect: Rect, color: Color) {
    let Some(bbox) = rect.clip(image.dimensions()) else {
        return;
    };

    let width = image.width() as usize;
    let pixels = image.bytes_mut();
    for y in bbox.y_min..=bbox.y_max {
        for x in bbox.x_min..=bbox.x_max {
            let idx = (y * width + x) * PixelBuffer::BYTES_PER_PIXEL;
            color.blend_onto(&mut pixels[idx..idx + PixelBuffer::BYTES_PER_PIXEL]);
        }
    }
}

/// Draw a rectangle outline centered on the rectangle's edges.
///
/// The four bands do not overlap, so translucent borders blend evenly.
pub fn stroke_rect(image: &mut PixelBuffer, rect: Rect, color: Color, thickness: u32) {
    if thickness == 0 {
        return;
    }

    // Caller-supplied bounds may sit near the i32 limits.
    let t = thickness;
    let lo = t / 2;
    let left = rect.x.saturating_sub_unsigned(lo);
    let top = rect.y.saturating_sub_unsigned(lo);
    let outer_width = rect.width.saturating_add(t);
    let inner_height = rect.height.saturating_sub(t);
    let inner_top = top.saturating_add_unsigned(t);

    // Top
    fill_rect(image, Rect::new(left, top, outer_width, t), color);
    // Bottom
    fill_rect(
        image,
        Rect::new(left, top.saturating_add_unsigned(rect.height), outer_width, t),
        color,
    );
    // Left
    fill_rect(image, Rect::new(left, inner_top, t, inner_height), color);
    // Right
    fill_rect(
        image,
        Rect::new(
            left.saturating_add_unsigned(rect.width),
            inner_top,
            t,
            inner_height,
        ),
        color,
    );
}

/// Draw a line with the given thickness.
pub fn draw_line(image: &mut PixelBuffer, start: Vec2, end: Vec2, color: Color, thickness: f32) {
    let dims = image.dimensions();
    let delta = end - start;
    let length = delta.length();

    if length < 0.001 {
        plot(image, dims, start, color);
        return;
    }

    let dir = delta / length;
    let perp = dir.perp();
    let half_thick = thickness / 2.0;
    let thick_steps = (thickness.ceil() as i32).max(1);

    // Pixels hit from several samples are blended once.
    let mut touched = std::collections::HashSet::new();
    let steps = (length.ceil() as usize).max(1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let center = start + delta * t;

        for j in -thick_steps..=thick_steps {
            let offset = j as f32 * 0.5;
            if offset.abs() > half_thick {
                continue;
            }
            let p = (center + perp * offset).round();
            if touched.insert((p.x as i32, p.y as i32)) {
                plot(image, dims, p, color);
            }
        }
    }
}

/// Draw connected line segments through `points`.
pub fn draw_polyline(image: &mut PixelBuffer, points: &[Vec2], color: Color, thickness: f32) {
    for segment in points.windows(2) {
        draw_line(image, segment[0], segment[1], color, thickness);
    }
}

/// Draw `text` with its baseline at `baseline`, x being the left edge.
pub fn draw_text(
    image: &mut PixelBuffer,
    text: &str,
    baseline: Vec2,
    font: &impl Font,
    size: f32,
    color: Color,
) {
    let scale = PxScale::from(size);
    let ascent = font.as_scaled(scale).ascent();
    let x = baseline.x.round() as i32;
    let y = (baseline.y - ascent).round() as i32;

    let owned = std::mem::replace(image, PixelBuffer::new_transparent(Dimensions::default()));
    let mut canvas = owned.into_rgba_image();
    imageproc::drawing::draw_text_mut(
        &mut canvas,
        ::image::Rgba(color.to_rgba_u8()),
        x,
        y,
        scale,
        font,
        text,
    );
    *image = PixelBuffer::from_rgba_image(canvas);
}

#[inline]
fn plot(image: &mut PixelBuffer, dims: Dimensions, p: Vec2, color: Color) {
    let x = p.x.round() as i32;
    let y = p.y.round() as i32;
    if x < 0 || y < 0 || x >= dims.width as i32 || y >= dims.height as i32 {
        return;
    }
    let idx = (y as usize * dims.width as usize + x as usize) * PixelBuffer::BYTES_PER_PIXEL;
    color.blend_onto(&mut image.bytes_mut()[idx..idx + PixelBuffer::BYTES_PER_PIXEL]);
}
