pub use kurbo::{Affine, BezPath, Point, Rect};

/// Straight-alpha RGBA8 (r,g,b independent of a).
///
/// This is the engine-boundary pixel format: raster snapshots and draw
/// colors are straight alpha; the rasterizer premultiplies internally.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Construct from the four channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Convert into premultiplied RGBA8 bytes.
    pub fn premultiply(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    /// Recover straight-alpha channels from premultiplied RGBA8 bytes.
    ///
    /// Zero alpha maps to transparent black; the rounding is the inverse of
    /// [`Rgba8::premultiply`].
    pub fn unpremultiply(px: [u8; 4]) -> Self {
        let a = px[3];
        if a == 0 {
            return Self::transparent();
        }

        fn unpremul(c: u8, a: u8) -> u8 {
            let c = u32::from(c);
            let a = u32::from(a);
            ((c * 255 + a / 2) / a).min(255) as u8
        }

        Self::new(unpremul(px[0], a), unpremul(px[1], a), unpremul(px[2], a), a)
    }

    /// Derive a draw color: RGB passes through, alpha becomes
    /// `pass_alpha * (a / 255)` converted back to u8.
    pub fn scale_alpha(self, pass_alpha: f64) -> Self {
        let a = (pass_alpha * f64::from(self.a)).round().clamp(0.0, 255.0) as u8;
        Self { a, ..self }
    }
}
