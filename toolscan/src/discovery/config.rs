//! Discovery configuration.

use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Pixel connectivity for connected component labeling.
///
/// Determines which pixels are considered neighbors when grouping
/// foreground pixels into silhouettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Only horizontal and vertical neighbors, (x±1, y) and (x, y±1).
    Four,
    /// All 8 surrounding pixels. Thin diagonal handles and straps stay
    /// attached to the tool body.
    #[default]
    Eight,
}

/// What to do when the empty and full photos differ in size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Fail with `Error::DimensionMismatch`.
    #[default]
    Reject,
    /// Resample the full photo to the empty photo's size. Geometry is
    /// reported in empty-photo coordinates.
    ResizeToFirst,
}

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Components with fewer foreground pixels are dropped.
    pub min_area: u32,
    /// A pixel is foreground when its luma difference is strictly above this.
    pub threshold: u8,
    pub connectivity: Connectivity,
    pub resize_policy: ResizePolicy,
    /// Produce an isolated mask raster per silhouette.
    pub render_masks: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            min_area: 500,
            threshold: 30,
            connectivity: Connectivity::Eight,
            resize_policy: ResizePolicy::Reject,
            render_masks: true,
        }
    }
}

impl DiscoveryConfig {
    pub fn with_min_area(mut self, min_area: u32) -> Self {
        self.min_area = min_area;
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_resize_policy(mut self, resize_policy: ResizePolicy) -> Self {
        self.resize_policy = resize_policy;
        self
    }
}
