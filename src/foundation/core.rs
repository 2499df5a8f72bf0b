use crate::foundation::error::{AutographError, AutographResult};

pub use kurbo::{Affine, Point, Vec2};

/// Logical drawing-surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800,
            height: 300,
        }
    }
}

impl Canvas {
    /// Create a validated canvas. Both sides must be in `1..=u16::MAX` (raster limit).
    pub fn new(width: u32, height: u32) -> AutographResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Check that the canvas can be rasterized.
    pub fn validate(self) -> AutographResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AutographError::validation("canvas width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(AutographError::validation(
                "canvas width/height must fit in u16",
            ));
        }
        Ok(())
    }

    /// Center point of the surface.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Uppercase `#RRGGBB` form (alpha dropped when opaque).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
