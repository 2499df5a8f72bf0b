/// Font loading, family resolution and single-character shaping.
pub mod fonts;
