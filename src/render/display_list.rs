use crate::foundation::core::{Affine, Point, Rgba8};
use crate::style::font::FontSpec;

/// Horizontal anchoring of drawn text relative to its x coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Vertical anchoring of drawn text relative to its y coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Top,
}

/// Stroke end style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// One recorded drawing primitive with the full state it was issued under.
///
/// Ops are self-contained so a display list can be replayed (or a prefix of it) without
/// re-running the animation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Wipe the whole surface to transparent.
    Clear,
    FillGlyph {
        ch: char,
        at: Point,
        font: FontSpec,
        align: TextAlign,
        baseline: TextBaseline,
        color: Rgba8,
        alpha: f32,
        transform: Affine,
    },
    StrokeLine {
        from: Point,
        to: Point,
        width: f64,
        cap: LineCap,
        color: Rgba8,
        alpha: f32,
        transform: Affine,
    },
}

impl DrawOp {
    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }
}

/// Ops that are still visible: everything after the last [`DrawOp::Clear`].
pub fn visible_ops(ops: &[DrawOp]) -> &[DrawOp] {
    match ops.iter().rposition(DrawOp::is_clear) {
        Some(i) => &ops[i + 1..],
        None => ops,
    }
}
