//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use toolscan::prelude::*;
//! ```

pub use crate::{Dimensions, Error, PixelBuffer, Rect, Result, ToolRegion};

pub use crate::{discover_silhouettes, DiscoveryConfig, Silhouette};

pub use crate::{verify_presence, VerificationConfig, VerificationOutcome};

pub use crate::{render_overlay, OverlayStyle};
