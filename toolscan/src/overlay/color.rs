//! RGBA color type for drawing operations.

/// RGBA color with f32 components in range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from RGB u8 values (0-255).
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_rgba_u8(&self) -> [u8; 4] {
        [
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b),
            to_u8(self.a),
        ]
    }

    /// Source-over composite onto one RGBA8 pixel.
    #[inline]
    pub fn blend_onto(&self, dst: &mut [u8]) {
        let src_a = self.a.clamp(0.0, 1.0);
        if src_a >= 1.0 {
            dst[..4].copy_from_slice(&self.to_rgba_u8());
            return;
        }

        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            dst[..4].fill(0);
            return;
        }

        for (channel, src) in dst[..3].iter_mut().zip([self.r, self.g, self.b]) {
            let d = *channel as f32 / 255.0;
            let c = (src * src_a + d * dst_a * (1.0 - src_a)) / out_a;
            *channel = to_u8(c);
        }
        dst[3] = to_u8(out_a);
    }

    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Label text on absent regions, rgb(220, 38, 38).
    pub const LABEL_RED: Color = Color::rgb(0.862_745_1, 0.149_019_61, 0.149_019_61);
    /// Check mark on present regions, rgb(34, 197, 94).
    pub const CHECK_GREEN: Color = Color::rgb(0.133_333_34, 0.772_549_03, 0.368_627_46);
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<[u8; 4]> for Color {
    fn from(arr: [u8; 4]) -> Self {
        Self::from_rgb_u8(arr[0], arr[1], arr[2]).with_alpha(arr[3] as f32 / 255.0)
    }
}
