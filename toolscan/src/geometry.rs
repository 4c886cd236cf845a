//! Pixel-space geometry: image dimensions, rectangles and bounding boxes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle with a top-left origin.
///
/// `x` and `y` are signed so that boxes carried over from a differently
/// sized capture can sit partially outside the image; consumers clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Scale position and size independently per axis, flooring every component.
    pub fn scaled(&self, scale_x: f64, scale_y: f64) -> Rect {
        Rect {
            x: (self.x as f64 * scale_x).floor() as i32,
            y: (self.y as f64 * scale_y).floor() as i32,
            width: (self.width as f64 * scale_x).floor().max(0.0) as u32,
            height: (self.height as f64 * scale_y).floor().max(0.0) as u32,
        }
    }

    /// Intersection with an image of the given size, or `None` when nothing
    /// of the rectangle lies inside it.
    pub fn clip(&self, dims: Dimensions) -> Option<Aabb> {
        let x0 = (self.x as i64).max(0);
        let y0 = (self.y as i64).max(0);
        let x1 = self.right().min(dims.width as i64);
        let y1 = self.bottom().min(dims.height as i64);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some(Aabb::new(
            x0 as usize,
            (x1 - 1) as usize,
            y0 as usize,
            (y1 - 1) as usize,
        ))
    }
}

impl From<Aabb> for Rect {
    fn from(bbox: Aabb) -> Self {
        Rect {
            x: bbox.x_min as i32,
            y: bbox.y_min as i32,
            width: bbox.width() as u32,
            height: bbox.height() as u32,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Axis-aligned bounding box with inclusive `usize` bounds.
///
/// A pixel at (x, y) is inside if `x_min <= x <= x_max` and `y_min <= y <= y_max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aabb {
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
}

impl Aabb {
    #[inline]
    pub const fn new(x_min: usize, x_max: usize, y_min: usize, y_max: usize) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Inverted bounds, so the first `include()` sets them.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            x_min: usize::MAX,
            x_max: 0,
            y_min: usize::MAX,
            y_max: 0,
        }
    }

    #[inline]
    pub fn include(&mut self, x: usize, y: usize) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.x_max.saturating_sub(self.x_min) + 1
    }

    #[inline]
    pub const fn height(&self) -> usize {
        self.y_max.saturating_sub(self.y_min) + 1
    }

    #[inline]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    #[inline]
    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }
}
