//! Tool regions: the boxes verification checks and the overlay draws.

use serde::{Deserialize, Serialize};

use crate::discovery::SilhouetteRecord;
use crate::geometry::Rect;

/// A previously discovered tool footprint, identified by a caller-chosen id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRegion {
    pub id: String,
    pub bounds: Rect,
    /// Display name for overlay labels. Falls back to `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Carried through untouched; classification uses `bounds` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silhouette: Option<SilhouetteRecord>,
}

impl ToolRegion {
    pub fn new(id: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            bounds,
            label: None,
            silhouette: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}
