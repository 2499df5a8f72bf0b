//! Randomized signature styling.
//!
//! A [`selector::StyleDescriptor`] is chosen per render from fixed font and ink palettes with small
//! uniform perturbations of size, spacing and rotation. Randomness is always injected by the
//! caller so selection is reproducible under a seeded generator.

/// Decorative font palette and font request descriptors.
pub mod font;
/// Locked ink color palette.
pub mod ink;
/// Validated render input.
pub mod request;
/// Style descriptor and the selection routine.
pub mod selector;
