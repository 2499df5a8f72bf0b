use crate::foundation::core::Point;

/// Horizontal underline swept left to right beneath a signature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlourishGeometry {
    pub start: Point,
    pub end: Point,
    /// Number of intervals; the sweep draws `steps + 1` segments (`0..=steps`).
    pub steps: u32,
}

impl FlourishGeometry {
    /// Underline spanning `text_width` plus `overhang` on both sides, `drop` below `center`.
    pub fn new(center: Point, text_width: f64, overhang: f64, drop: f64, steps: u32) -> Self {
        let y = center.y + drop;
        Self {
            start: Point::new(center.x - text_width / 2.0 - overhang, y),
            end: Point::new(center.x + text_width / 2.0 + overhang, y),
            steps,
        }
    }

    /// End point of the segment drawn at `step`.
    pub fn point_at(&self, step: u32) -> Point {
        if self.steps == 0 {
            return self.end;
        }
        let t = f64::from(step.min(self.steps)) / f64::from(self.steps);
        self.start.lerp(self.end, t)
    }

    pub fn segment_count(&self) -> u32 {
        self.steps + 1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/flourish.rs"]
mod tests;
