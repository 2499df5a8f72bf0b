use crate::style::font::FontSpec;

/// Capability to query the rendered advance width of one character in a given font.
pub trait GlyphMeasure {
    fn glyph_width(&mut self, ch: char, font: &FontSpec) -> f64;
}

impl<M: GlyphMeasure + ?Sized> GlyphMeasure for &mut M {
    fn glyph_width(&mut self, ch: char, font: &FontSpec) -> f64 {
        (**self).glyph_width(ch, font)
    }
}

impl<M: GlyphMeasure + ?Sized> GlyphMeasure for Box<M> {
    fn glyph_width(&mut self, ch: char, font: &FontSpec) -> f64 {
        (**self).glyph_width(ch, font)
    }
}

/// Deterministic synthetic metrics: every glyph is `glyph_em` wide, whitespace `space_em`.
///
/// Useful wherever real font files are unavailable (tests, dry runs).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub glyph_em: f64,
    pub space_em: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self {
            glyph_em: 0.5,
            space_em: 0.25,
        }
    }
}

impl GlyphMeasure for FixedAdvance {
    fn glyph_width(&mut self, ch: char, font: &FontSpec) -> f64 {
        let em = if ch.is_whitespace() {
            self.space_em
        } else {
            self.glyph_em
        };
        em * f64::from(font.size_px)
    }
}

/// Extra width inserted between two measured characters.
pub fn measure_gap(letter_spacing: f64) -> f64 {
    (letter_spacing - 1.0) * 2.0
}

/// Extra advance applied after each drawn character.
pub fn advance_gap(letter_spacing: f64) -> f64 {
    (letter_spacing - 1.0) * 4.0
}

/// Total width of `text`: glyph widths plus [`measure_gap`] between characters.
pub fn measure_with(text: &str, letter_spacing: f64, mut glyph_width: impl FnMut(char) -> f64) -> f64 {
    let gap = measure_gap(letter_spacing);
    let mut total = 0.0;
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            total += gap;
        }
        total += glyph_width(ch);
    }
    total
}

/// [`measure_with`] using a [`GlyphMeasure`] for a fixed font.
pub fn measure_text<M: GlyphMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    font: &FontSpec,
    letter_spacing: f64,
) -> f64 {
    measure_with(text, letter_spacing, |ch| measure.glyph_width(ch, font))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;
