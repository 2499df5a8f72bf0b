use rand::Rng;

use crate::style::{font::FontSpec, font::SignatureFont, ink::InkColor, request::RenderRequest};

/// Nominal signature size before jitter.
pub const BASE_FONT_SIZE_PX: f64 = 70.0;
/// Relative size jitter (±5%).
pub const FONT_SIZE_JITTER: f64 = 0.05;
/// Absolute letter-spacing jitter around 1.0.
pub const LETTER_SPACING_JITTER: f64 = 0.5;
/// Maximum tilt in degrees, either direction.
pub const MAX_ROTATION_DEGREES: f64 = 1.0;

/// Randomized style applied to one rendering.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleDescriptor {
    pub font: SignatureFont,
    /// Rounded pixel size, within `[67, 74]`.
    pub font_size_px: u32,
    /// `1 ± 0.5`; only the deviation from 1 affects layout.
    pub letter_spacing: f64,
    /// Tilt applied around the surface center while characters are drawn.
    pub rotation_degrees: f64,
    pub ink: InkColor,
}

impl StyleDescriptor {
    /// Font request for the drawing surface (always italic bold).
    pub fn font_spec(&self) -> FontSpec {
        FontSpec::signature(self.font.family_name(), self.font_size_px as f32)
    }
}

/// Pick a style for `request` from the fixed palettes.
///
/// Every field is drawn independently and uniformly; the name itself does not bias the choice.
#[tracing::instrument(skip(rng), fields(name = %request))]
pub fn select_style<R: Rng + ?Sized>(request: &RenderRequest, rng: &mut R) -> StyleDescriptor {
    let font = SignatureFont::ALL[rng.gen_range(0..SignatureFont::ALL.len())];

    let size_jitter = rng.gen_range(-FONT_SIZE_JITTER..=FONT_SIZE_JITTER);
    let font_size_px = (BASE_FONT_SIZE_PX * (1.0 + size_jitter)).round() as u32;

    let letter_spacing = 1.0 + rng.gen_range(-LETTER_SPACING_JITTER..=LETTER_SPACING_JITTER);
    let rotation_degrees = rng.gen_range(-MAX_ROTATION_DEGREES..=MAX_ROTATION_DEGREES);

    let ink = InkColor::ALL[rng.gen_range(0..InkColor::ALL.len())];

    let style = StyleDescriptor {
        font,
        font_size_px,
        letter_spacing,
        rotation_degrees,
        ink,
    };
    tracing::debug!(?style, "selected signature style");
    style
}

#[cfg(test)]
#[path = "../../tests/unit/style/selector.rs"]
mod tests;
