//! Display colors carried by bodies, links and grounds
//!
//! Colors never affect the physics; they are stored so the renderer can draw
//! each entity the way the scene author asked.

/// sRGB-encoded RGBA, each channel in [0, 1]
///
/// Stored the way colors are authored. Convert with [`Color::to_linear`]
/// before blending on the GPU.
#[derive(Clone, Copy, Debug, PartialEq)]
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

    /// From 8-bit channels
    pub const fn from_srgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Decode the color channels to linear light; alpha is already linear.
    pub fn to_linear(self) -> Self {
        let decode = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        Self::new(decode(self.r), decode(self.g), decode(self.b), self.a)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        named::SEAGREEN
    }
}

/// The handful of named colors the built-in scenes use
pub mod named {
    use super::Color;

    pub const SEAGREEN: Color = Color::from_srgba(46, 139, 87, 255);
    pub const SKYBLUE: Color = Color::from_srgba(135, 206, 235, 255);
    pub const MAGENTA4: Color = Color::from_srgba(139, 0, 139, 255);
    pub const HOTPINK: Color = Color::from_srgba(255, 105, 180, 255);
    pub const ORANGE: Color = Color::from_srgba(255, 165, 0, 255);
    pub const GREEN: Color = Color::from_srgba(0, 128, 0, 255);
}
