use smallvec::SmallVec;

use crate::foundation::core::{Affine, Canvas, Point, Rgba8};
use crate::layout::measure::{GlyphMeasure, measure_with};
use crate::render::display_list::{DrawOp, LineCap, TextAlign, TextBaseline};
use crate::style::font::FontSpec;

/// Mutable drawing state, saved and restored as a unit.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub font: FontSpec,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub fill: Rgba8,
    pub stroke: Rgba8,
    /// Multiplier applied to every draw, `0.0..=1.0`.
    pub global_alpha: f32,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub transform: Affine,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            font: FontSpec {
                family: "sans-serif".to_owned(),
                size_px: 10.0,
                italic: false,
                bold: false,
            },
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
            fill: Rgba8::BLACK,
            stroke: Rgba8::BLACK,
            global_alpha: 1.0,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            transform: Affine::IDENTITY,
        }
    }
}

/// 2D drawing target with canvas-like state semantics.
pub trait Surface {
    fn canvas(&self) -> Canvas;

    /// Wipe all pixels; drawing state is left untouched.
    fn clear(&mut self);

    /// Push a copy of the current state.
    fn save(&mut self);

    /// Pop the last saved state. Unbalanced calls are ignored.
    fn restore(&mut self);

    fn state(&self) -> &DrawState;

    fn state_mut(&mut self) -> &mut DrawState;

    /// Advance width of `ch` in the current font.
    fn measure_char(&mut self, ch: char) -> f64;

    /// Fill `ch` at `at` using the current font, alignment, fill color and alpha.
    fn fill_char(&mut self, ch: char, at: Point);

    /// Stroke a straight segment using the current stroke color, width, cap and alpha.
    fn stroke_line(&mut self, from: Point, to: Point);

    /// Compose a rotation of `degrees` around `pivot` into the current transform.
    fn rotate_about(&mut self, pivot: Point, degrees: f64) {
        let p = pivot.to_vec2();
        let s = self.state_mut();
        s.transform = s.transform
            * Affine::translate(p)
            * Affine::rotate(degrees.to_radians())
            * Affine::translate(-p);
    }

    /// Width of `text` in the current font, see [`crate::layout::measure::measure_with`].
    fn measure_text(&mut self, text: &str, letter_spacing: f64) -> f64 {
        measure_with(text, letter_spacing, |ch| self.measure_char(ch))
    }
}

/// Surface that records every primitive into a display list.
///
/// Measurement is delegated to `M`; pixels are produced later by replaying
/// [`RecordingSurface::display_list`] through a rasterizer.
pub struct RecordingSurface<M> {
    canvas: Canvas,
    measure: M,
    state: DrawState,
    stack: SmallVec<[DrawState; 4]>,
    ops: Vec<DrawOp>,
}

impl<M: GlyphMeasure> RecordingSurface<M> {
    pub fn new(canvas: Canvas, measure: M) -> Self {
        Self {
            canvas,
            measure,
            state: DrawState::default(),
            stack: SmallVec::new(),
            ops: Vec::new(),
        }
    }

    /// Every op recorded so far, clears included.
    pub fn display_list(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of recorded pixel-affecting operations.
    pub fn mutation_count(&self) -> usize {
        self.ops.len()
    }

    /// Depth of the save stack.
    pub fn saved_depth(&self) -> usize {
        self.stack.len()
    }

    /// Reset drawing state and drop the save stack, keeping recorded ops.
    pub fn reset_state(&mut self) {
        self.state = DrawState::default();
        self.stack.clear();
    }
}

impl<M: GlyphMeasure> Surface for RecordingSurface<M> {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(s) = self.stack.pop() {
            self.state = s;
        }
    }

    fn state(&self) -> &DrawState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    fn measure_char(&mut self, ch: char) -> f64 {
        self.measure.glyph_width(ch, &self.state.font)
    }

    fn fill_char(&mut self, ch: char, at: Point) {
        let s = &self.state;
        self.ops.push(DrawOp::FillGlyph {
            ch,
            at,
            font: s.font.clone(),
            align: s.text_align,
            baseline: s.text_baseline,
            color: s.fill,
            alpha: s.global_alpha,
            transform: s.transform,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        let s = &self.state;
        self.ops.push(DrawOp::StrokeLine {
            from,
            to,
            width: s.line_width,
            cap: s.line_cap,
            color: s.stroke,
            alpha: s.global_alpha,
            transform: s.transform,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
