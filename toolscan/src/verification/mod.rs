//! Presence verification: compare a new photo of the cabinet against the
//! empty reference inside each known tool region.
//!
//! A region whose mean luma difference is above the threshold still holds
//! something that was not there in the empty cabinet, so the tool counts as
//! present. Regions are evaluated in parallel; results keep input order.

#[cfg(test)]
mod tests;

use std::borrow::Cow;

use common::Buffer2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Dimensions, Rect};
use crate::grayscale::{mean_abs_difference, to_grayscale};
use crate::image::{ImageRole, PixelBuffer};
use crate::region::ToolRegion;

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Mean luma difference above which a region counts as occupied.
    pub threshold: f64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self { threshold: 30.0 }
    }
}

impl VerificationConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "verification threshold must be a positive finite number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

// ============================================================================
// Outcome
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    Present,
    Absent,
}

/// Per-region evidence behind the classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    pub id: String,
    /// Region bounds in captured-image coordinates.
    pub bounds: Rect,
    /// Mean absolute luma difference over the in-bounds part of `bounds`.
    pub average_difference: f64,
    pub status: PresenceStatus,
    /// This region's share of the confidence score, 0 to 100.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub present_ids: Vec<String>,
    pub absent_ids: Vec<String>,
    /// Rounded mean of the region contributions; 0 when no regions were given.
    pub confidence_score: u8,
    pub regions: Vec<RegionReport>,
}

impl VerificationOutcome {
    pub fn missing_count(&self) -> usize {
        self.absent_ids.len()
    }

    pub fn total(&self) -> usize {
        self.regions.len()
    }

    /// Percentage of regions found present; 100 when nothing was checked.
    pub fn completion_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 100.0;
        }
        (total - self.missing_count()) as f64 / total as f64 * 100.0
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Decodes both photos and runs [`verify_presence_in`].
pub fn verify_presence(
    captured: &[u8],
    reference: &[u8],
    regions: &[ToolRegion],
    config: &VerificationConfig,
) -> Result<VerificationOutcome> {
    config.validate()?;

    let captured = PixelBuffer::decode(captured, ImageRole::Captured)?;
    let reference = PixelBuffer::decode(reference, ImageRole::Reference)?;

    verify_presence_in(&captured, &reference, regions, config)
}

/// Classifies every region as present or absent in `captured`.
///
/// Region bounds are given in `reference` coordinates. When the photos differ
/// in size the reference is resampled to the captured size and the bounds
/// are scaled by the same factors, flooring each component. Regions that
/// fall outside the image are never errors; they have a mean difference of 0.
pub fn verify_presence_in(
    captured: &PixelBuffer,
    reference: &PixelBuffer,
    regions: &[ToolRegion],
    config: &VerificationConfig,
) -> Result<VerificationOutcome> {
    config.validate()?;

    let captured_dims = captured.dimensions();
    let reference_dims = reference.dimensions();
    let scale_x = scale_factor(captured_dims.width, reference_dims.width);
    let scale_y = scale_factor(captured_dims.height, reference_dims.height);

    let reference: Cow<'_, PixelBuffer> = if reference_dims == captured_dims {
        Cow::Borrowed(reference)
    } else {
        tracing::warn!(
            "Resampling reference image from {} to {}",
            reference_dims,
            captured_dims
        );
        Cow::Owned(reference.resize(captured_dims))
    };

    let (captured_gray, reference_gray) =
        rayon::join(|| to_grayscale(captured), || to_grayscale(&reference));

    let reports: Vec<RegionReport> = regions
        .par_iter()
        .map(|region| {
            evaluate_region(
                region,
                &captured_gray,
                &reference_gray,
                captured_dims,
                (scale_x, scale_y),
                config.threshold,
            )
        })
        .collect();

    let outcome = summarize(reports);

    tracing::info!(
        "Verified {} regions: {} present, {} absent, confidence {}",
        outcome.total(),
        outcome.present_ids.len(),
        outcome.absent_ids.len(),
        outcome.confidence_score
    );

    Ok(outcome)
}

fn scale_factor(target: u32, source: u32) -> f64 {
    if source == 0 {
        1.0
    } else {
        target as f64 / source as f64
    }
}

fn evaluate_region(
    region: &ToolRegion,
    captured: &Buffer2<u8>,
    reference: &Buffer2<u8>,
    dims: Dimensions,
    (scale_x, scale_y): (f64, f64),
    threshold: f64,
) -> RegionReport {
    let bounds = region.bounds.scaled(scale_x, scale_y);
    let average_difference = bounds
        .clip(dims)
        .map(|bbox| mean_abs_difference(captured, reference, bbox))
        .unwrap_or(0.0);

    let ratio = average_difference / threshold;
    let (status, contribution) = if average_difference > threshold {
        (PresenceStatus::Present, (ratio * 50.0).min(100.0))
    } else {
        (PresenceStatus::Absent, (50.0 - ratio * 50.0).max(0.0))
    };

    tracing::debug!(
        "Region {} at {}: mean difference {:.2}, {:?}",
        region.id,
        bounds,
        average_difference,
        status
    );

    RegionReport {
        id: region.id.clone(),
        bounds,
        average_difference,
        status,
        contribution,
    }
}

fn summarize(reports: Vec<RegionReport>) -> VerificationOutcome {
    let mut present_ids = Vec::new();
    let mut absent_ids = Vec::new();
    for report in &reports {
        match report.status {
            PresenceStatus::Present => present_ids.push(report.id.clone()),
            PresenceStatus::Absent => absent_ids.push(report.id.clone()),
        }
    }

    let confidence_score = if reports.is_empty() {
        0
    } else {
        let sum: f64 = reports.iter().map(|r| r.contribution).sum();
        (sum / reports.len() as f64).round().clamp(0.0, 100.0) as u8
    };

    VerificationOutcome {
        present_ids,
        absent_ids,
        confidence_score,
        regions: reports,
    }
}
