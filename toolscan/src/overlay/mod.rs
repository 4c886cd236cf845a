//! Annotated renderings of detection results.
//!
//! [`render_overlay`] marks verification results on the captured photo:
//! absent tools get a translucent red box with a label bar, present tools a
//! green check mark. [`annotate_silhouettes`] outlines discovery results on
//! the full-cabinet photo. Neither makes any decisions of its own.

pub mod color;
pub mod drawing;


use std::collections::HashSet;

use ab_glyph::FontArc;
use glam::Vec2;

pub use color::Color;

use crate::discovery::Silhouette;
use crate::error::Result;
use crate::geometry::Rect;
use crate::image::{ImageRole, PixelBuffer};
use crate::region::ToolRegion;
use drawing::{draw_polyline, draw_text, fill_rect, stroke_rect};

pub const OVERLAY_JPEG_QUALITY: u8 = 90;

const ABSENT_FILL: Color = Color::RED.with_alpha(0.25);
const ABSENT_BORDER: Color = Color::RED.with_alpha(0.8);
const ABSENT_BORDER_WIDTH: u32 = 3;
const LABEL_BAR: Color = Color::WHITE.with_alpha(0.95);
const LABEL_BAR_HEIGHT: u32 = 28;
const LABEL_INSET: f32 = 8.0;
const CHECK_WIDTH: f32 = 4.0;
const PREVIEW_OUTLINE_WIDTH: u32 = 3;

/// Text settings for overlay labels. Without a font the label bar is drawn
/// empty.
#[derive(Clone, Debug)]
pub struct OverlayStyle {
    pub font: Option<FontArc>,
    pub label_size: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            font: None,
            label_size: 16.0,
        }
    }
}

impl OverlayStyle {
    pub fn with_font(font: FontArc) -> Self {
        Self {
            font: Some(font),
            ..Self::default()
        }
    }
}

/// Draws verification results onto a copy of `captured`.
///
/// Regions whose id is in `absent_ids` are marked missing, all others
/// present. Bounds are taken as captured-image coordinates.
pub fn render_overlay(
    captured: &PixelBuffer,
    regions: &[ToolRegion],
    absent_ids: &[String],
    style: &OverlayStyle,
) -> PixelBuffer {
    let absent: HashSet<&str> = absent_ids.iter().map(String::as_str).collect();
    let mut canvas = captured.clone();

    for region in regions {
        if absent.contains(region.id.as_str()) {
            mark_absent(&mut canvas, region, style);
        } else {
            mark_present(&mut canvas, region.bounds);
        }
    }

    tracing::debug!(
        "Rendered overlay for {} regions ({} absent)",
        regions.len(),
        absent.len()
    );

    canvas
}

/// Decodes the captured photo, renders the overlay and encodes it as JPEG.
pub fn render_overlay_encoded(
    captured: &[u8],
    regions: &[ToolRegion],
    absent_ids: &[String],
    style: &OverlayStyle,
) -> Result<Vec<u8>> {
    let captured = PixelBuffer::decode(captured, ImageRole::Captured)?;
    render_overlay(&captured, regions, absent_ids, style).encode_jpeg(OVERLAY_JPEG_QUALITY)
}

/// The full photo with a red outline around every silhouette.
pub fn annotate_silhouettes(full: &PixelBuffer, silhouettes: &[Silhouette]) -> PixelBuffer {
    let mut canvas = full.clone();
    for silhouette in silhouettes {
        stroke_rect(
            &mut canvas,
            silhouette.bounds,
            Color::RED,
            PREVIEW_OUTLINE_WIDTH,
        );
    }
    canvas
}

fn mark_absent(canvas: &mut PixelBuffer, region: &ToolRegion, style: &OverlayStyle) {
    let b = region.bounds;
    fill_rect(canvas, b, ABSENT_FILL);
    stroke_rect(canvas, b, ABSENT_BORDER, ABSENT_BORDER_WIDTH);

    let bar = Rect::new(
        b.x,
        b.y.saturating_sub_unsigned(LABEL_BAR_HEIGHT),
        b.width,
        LABEL_BAR_HEIGHT,
    );
    fill_rect(canvas, bar, LABEL_BAR);

    if let Some(font) = &style.font {
        let baseline = Vec2::new(b.x as f32 + LABEL_INSET, b.y as f32 - LABEL_INSET);
        draw_text(
            canvas,
            region.display_name(),
            baseline,
            font,
            style.label_size,
            Color::LABEL_RED,
        );
    }
}

fn mark_present(canvas: &mut PixelBuffer, b: Rect) {
    let right = (b.x as i64 + b.width as i64) as f32;
    let top = b.y as f32;
    let points = [
        Vec2::new(right - 30.0, top + 15.0),
        Vec2::new(right - 20.0, top + 25.0),
        Vec2::new(right - 10.0, top + 10.0),
    ];
    draw_polyline(canvas, &points, Color::CHECK_GREEN, CHECK_WIDTH);
}
