//! Silhouette discovery: diff an empty-cabinet photo against a full one and
//! extract one silhouette per connected region of changed pixels.
//!
//! Pipeline: grayscale both photos, absolute difference, strict threshold,
//! flood-fill labeling, minimum-area filter, then bounds and masks.

pub mod config;
mod labeling;


use std::borrow::Cow;

use serde::{Deserialize, Serialize};

pub use config::{Connectivity, DiscoveryConfig, ResizePolicy};

use crate::error::{Error, Result};
use crate::geometry::{Dimensions, Rect};
use crate::grayscale::{absolute_difference, threshold_mask, to_grayscale};
use crate::image::{ImageRole, PixelBuffer};
use crate::region::ToolRegion;
use labeling::{label_components, Component};

/// Color of member pixels in a silhouette mask. Everything else is transparent.
pub const MASK_COLOR: [u8; 4] = [255, 0, 0, 255];

/// One discovered tool footprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Silhouette {
    /// Tight bounding box in empty-photo coordinates.
    pub bounds: Rect,
    /// Foreground pixel count of the component, not the box area.
    pub area: u32,
    /// Raster sized to `bounds`; `None` when masks were not requested.
    pub mask: Option<PixelBuffer>,
}

/// Persistable part of a [`Silhouette`]. The mask travels separately as PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilhouetteRecord {
    pub bounds: Rect,
    pub area: u32,
}

impl Silhouette {
    pub fn record(&self) -> SilhouetteRecord {
        SilhouetteRecord {
            bounds: self.bounds,
            area: self.area,
        }
    }

    /// Region for the `index`-th silhouette (0-based), named `tool-{n}` / `Tool {n}`
    /// with `n` starting at 1.
    pub fn to_tool_region(&self, index: usize) -> ToolRegion {
        let n = index + 1;
        ToolRegion {
            id: format!("tool-{n}"),
            bounds: self.bounds,
            label: Some(format!("Tool {n}")),
            silhouette: Some(self.record()),
        }
    }
}

/// Decodes both photos and runs [`discover_silhouettes_in`].
pub fn discover_silhouettes(
    empty: &[u8],
    full: &[u8],
    config: &DiscoveryConfig,
) -> Result<Vec<Silhouette>> {
    let empty = PixelBuffer::decode(empty, ImageRole::Empty)?;
    let full = PixelBuffer::decode(full, ImageRole::Full)?;

    discover_silhouettes_in(&empty, &full, config)
}

/// Finds regions where `full` differs from `empty`.
///
/// Silhouettes are ordered by the raster position of their first pixel.
/// Identical photos yield an empty list.
pub fn discover_silhouettes_in(
    empty: &PixelBuffer,
    full: &PixelBuffer,
    config: &DiscoveryConfig,
) -> Result<Vec<Silhouette>> {
    let full = match_dimensions(empty, full, config.resize_policy)?;

    let (empty_gray, full_gray) = rayon::join(|| to_grayscale(empty), || to_grayscale(&full));
    let diff = absolute_difference(&empty_gray, &full_gray);
    let mask = threshold_mask(&diff, config.threshold);

    tracing::debug!(
        "Foreground: {} of {} pixels above threshold {}",
        mask.count_ones(),
        mask.len(),
        config.threshold
    );

    let components = label_components(&mask, config.connectivity, config.min_area as usize);

    let width = empty.width() as usize;
    let silhouettes: Vec<Silhouette> = components
        .iter()
        .map(|component| build_silhouette(component, width, config.render_masks))
        .collect();

    tracing::info!(
        "Discovered {} silhouettes in {} image",
        silhouettes.len(),
        empty.dimensions()
    );

    Ok(silhouettes)
}

fn match_dimensions<'a>(
    empty: &PixelBuffer,
    full: &'a PixelBuffer,
    policy: ResizePolicy,
) -> Result<Cow<'a, PixelBuffer>> {
    if empty.dimensions() == full.dimensions() {
        return Ok(Cow::Borrowed(full));
    }

    match policy {
        ResizePolicy::Reject => Err(Error::DimensionMismatch {
            first_role: ImageRole::Empty,
            first: empty.dimensions(),
            second_role: ImageRole::Full,
            second: full.dimensions(),
        }),
        ResizePolicy::ResizeToFirst => {
            tracing::warn!(
                "Resampling full image from {} to {}",
                full.dimensions(),
                empty.dimensions()
            );
            Ok(Cow::Owned(full.resize(empty.dimensions())))
        }
    }
}

fn build_silhouette(component: &Component, width: usize, render_mask: bool) -> Silhouette {
    let bbox = component.bbox;
    let mask = render_mask.then(|| {
        let dims = Dimensions::new(bbox.width() as u32, bbox.height() as u32);
        let mut mask = PixelBuffer::new_transparent(dims);
        for &idx in &component.pixels {
            let x = idx % width - bbox.x_min;
            let y = idx / width - bbox.y_min;
            mask.set_pixel(x as u32, y as u32, MASK_COLOR);
        }
        mask
    });

    Silhouette {
        bounds: Rect::from(bbox),
        area: component.area() as u32,
        mask,
    }
}
