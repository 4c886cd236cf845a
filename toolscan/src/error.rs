//! Error types for image loading, discovery and verification.

use thiserror::Error;

use crate::geometry::Dimensions;
use crate::image::ImageRole;

/// Errors raised by the loader and the detection engines.
///
/// Degenerate inputs (no regions, regions outside the image, components
/// below the minimum area) are not errors; they shrink the result instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load {role} image: {source}")]
    Load {
        role: ImageRole,
        #[source]
        source: ::image::ImageError,
    },

    #[error("Dimension mismatch: {first_role} image is {first}, {second_role} image is {second}")]
    DimensionMismatch {
        first_role: ImageRole,
        first: Dimensions,
        second_role: ImageRole,
        second: Dimensions,
    },

    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Failed to encode image: {0}")]
    Encode(#[source] ::image::ImageError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
