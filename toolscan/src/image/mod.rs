//! RGBA8 pixel buffers and the image loader/normalizer.

mod io;


use std::fmt;

use ::image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::geometry::Dimensions;

/// Which input an image plays in a call. Carried by errors so callers can
/// tell the user which photo was unreadable or mismatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageRole {
    Empty,
    Full,
    Captured,
    Reference,
    Overlay,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRole::Empty => write!(f, "empty"),
            ImageRole::Full => write!(f, "full"),
            ImageRole::Captured => write!(f, "captured"),
            ImageRole::Reference => write!(f, "reference"),
            ImageRole::Overlay => write!(f, "overlay"),
        }
    }
}

/// Decoded image: dense row-major RGBA8 samples without stride padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    dims: Dimensions,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Fully transparent black buffer.
    pub fn new_transparent(dims: Dimensions) -> PixelBuffer {
        PixelBuffer {
            dims,
            bytes: vec![0; dims.pixel_count() * Self::BYTES_PER_PIXEL],
        }
    }

    pub fn new_filled(dims: Dimensions, rgba: [u8; 4]) -> PixelBuffer {
        let bytes = rgba
            .iter()
            .copied()
            .cycle()
            .take(dims.pixel_count() * Self::BYTES_PER_PIXEL)
            .collect();
        PixelBuffer { dims, bytes }
    }

    pub fn new_with_data(dims: Dimensions, bytes: Vec<u8>) -> Result<PixelBuffer> {
        let expected = dims.pixel_count() * Self::BYTES_PER_PIXEL;
        if bytes.len() != expected {
            return Err(Error::InvalidPixelData {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(PixelBuffer { dims, bytes })
    }

    /// Builds a buffer by evaluating `f(x, y)` for every pixel in row-major order.
    pub fn from_fn(dims: Dimensions, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> PixelBuffer {
        let mut bytes = Vec::with_capacity(dims.pixel_count() * Self::BYTES_PER_PIXEL);
        for y in 0..dims.height {
            for x in 0..dims.width {
                bytes.extend_from_slice(&f(x, y));
            }
        }
        PixelBuffer { dims, bytes }
    }

    /// Decodes an encoded image (PNG, JPEG, ...) into RGBA8.
    pub fn decode(bytes: &[u8], role: ImageRole) -> Result<PixelBuffer> {
        io::decode(bytes, role)
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        io::encode_png(self)
    }

    /// JPEG has no alpha channel; alpha is dropped, not composited.
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        io::encode_jpeg(self, quality)
    }

    /// Resamples to `dims` with a bilinear filter. Returns a copy when the
    /// size already matches.
    pub fn resize(&self, dims: Dimensions) -> PixelBuffer {
        if dims == self.dims {
            return self.clone();
        }

        let resized = ::image::imageops::resize(
            &self.view(),
            dims.width,
            dims.height,
            ::image::imageops::FilterType::Triangle,
        );

        PixelBuffer::from_rgba_image(resized)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> u32 {
        self.dims.width
    }

    pub fn height(&self) -> u32 {
        self.dims.height
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.offset(x, y);
        [
            self.bytes[idx],
            self.bytes[idx + 1],
            self.bytes[idx + 2],
            self.bytes[idx + 3],
        ]
    }

    #[inline]
    pub(crate) fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.offset(x, y);
        self.bytes[idx..idx + Self::BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.dims.width && y < self.dims.height);
        (y as usize * self.dims.width as usize + x as usize) * Self::BYTES_PER_PIXEL
    }

    pub(crate) fn from_rgba_image(image: RgbaImage) -> PixelBuffer {
        let dims = Dimensions::new(image.width(), image.height());
        PixelBuffer {
            dims,
            bytes: image.into_raw(),
        }
    }

    pub(crate) fn into_rgba_image(self) -> RgbaImage {
        let PixelBuffer { dims, bytes } = self;
        ImageBuffer::from_raw(dims.width, dims.height, bytes)
            .expect("pixel buffer length always matches its dimensions")
    }

    fn view(&self) -> ImageBuffer<Rgba<u8>, &[u8]> {
        ImageBuffer::from_raw(self.dims.width, self.dims.height, self.bytes.as_slice())
            .expect("pixel buffer length always matches its dimensions")
    }
}
