use crate::foundation::core::Point;
use crate::layout::measure::{advance_gap, measure_with};

/// Where one character of a signature is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterPlacement {
    pub index: usize,
    pub ch: char,
    /// Horizontal draw position (the character is center-aligned on it).
    pub x: f64,
    /// Intrinsic glyph width as measured.
    pub glyph_width: f64,
}

/// Left-to-right placement of a whole signature on a single baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct SignatureLayout {
    /// Surface center used for centering and as the baseline height.
    pub center: Point,
    /// Total measured width used for centering.
    pub text_width: f64,
    /// `center.x - text_width / 2`.
    pub start_x: f64,
    pub placements: Vec<CharacterPlacement>,
}

impl SignatureLayout {
    /// Measure every character once and accumulate positions.
    ///
    /// Each glyph is measured a single time; the total width and the per-character advances
    /// are derived from the same numbers.
    pub fn compute(
        text: &str,
        letter_spacing: f64,
        center: Point,
        mut glyph_width: impl FnMut(char) -> f64,
    ) -> Self {
        let widths: Vec<(char, f64)> = text.chars().map(|ch| (ch, glyph_width(ch))).collect();
        let mut it = widths.iter();
        let text_width = measure_with(text, letter_spacing, |_| {
            it.next().map(|(_, w)| *w).unwrap_or(0.0)
        });

        let start_x = center.x - text_width / 2.0;
        let gap = advance_gap(letter_spacing);
        let mut x = start_x;
        let placements = widths
            .iter()
            .enumerate()
            .map(|(index, &(ch, w))| {
                let p = CharacterPlacement {
                    index,
                    ch,
                    x,
                    glyph_width: w,
                };
                x += w + gap;
                p
            })
            .collect();

        Self {
            center,
            text_width,
            start_x,
            placements,
        }
    }

    pub fn baseline_y(&self) -> f64 {
        self.center.y
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
