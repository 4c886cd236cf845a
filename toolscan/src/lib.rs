//! Toolscan - tool silhouette discovery and presence verification.
//!
//! Works on photos of a tool cabinet taken from a fixed viewpoint:
//! - Discovery diffs an empty-cabinet photo against a full one and returns
//!   one silhouette (bounds, area, mask) per tool
//! - Verification checks a new photo against the empty reference and
//!   reports, per known tool region, whether the tool is present
//! - The overlay renderer draws either result back onto a photo
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use toolscan::{discover_silhouettes, verify_presence, DiscoveryConfig, VerificationConfig};
//!
//! let silhouettes = discover_silhouettes(&empty_png, &full_png, &DiscoveryConfig::default())?;
//! let regions: Vec<_> = silhouettes
//!     .iter()
//!     .enumerate()
//!     .map(|(i, s)| s.to_tool_region(i))
//!     .collect();
//!
//! let outcome = verify_presence(&photo_jpg, &empty_png, &regions, &VerificationConfig::default())?;
//! println!("missing: {:?}", outcome.absent_ids);
//! ```

pub mod discovery;
mod error;
pub mod geometry;
pub mod grayscale;
pub mod image;
pub mod overlay;
mod region;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_utils;

pub mod prelude;

// ============================================================================
// Core types
// ============================================================================

pub use crate::error::{Error, Result};
pub use crate::geometry::{Aabb, Dimensions, Rect};
pub use crate::image::{ImageRole, PixelBuffer};
pub use crate::region::ToolRegion;

// ============================================================================
// Discovery
// ============================================================================

pub use crate::discovery::{
    discover_silhouettes, discover_silhouettes_in, Connectivity, DiscoveryConfig, ResizePolicy,
    Silhouette, SilhouetteRecord, MASK_COLOR,
};

// ============================================================================
// Verification
// ============================================================================

pub use crate::verification::{
    verify_presence, verify_presence_in, PresenceStatus, RegionReport, VerificationConfig,
    VerificationOutcome,
};

// ============================================================================
// Overlay
// ============================================================================

pub use crate::overlay::{
    annotate_silhouettes, render_overlay, render_overlay_encoded, Color, OverlayStyle,
    OVERLAY_JPEG_QUALITY,
};
