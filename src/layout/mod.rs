//! Manual text layout: glyph measurement, letter-spacing arithmetic, character placement and
//! flourish geometry.
//!
//! The spacing constants are asymmetric: measurement adds
//! `(letter_spacing - 1) * 2` between characters while placement advances by
//! `(letter_spacing - 1) * 4`.

/// Underline geometry.
pub mod flourish;
/// Glyph measurement seam and width computation.
pub mod measure;
/// Per-character placement.
pub mod placement;
