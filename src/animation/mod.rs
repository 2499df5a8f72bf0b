//! Timed signature reveal.
//!
//! The reveal is an explicit state machine ([`signature::SignatureAnimation`]) rather than a chain
//! of sleeps: each `step` performs the drawing due at that instant and returns how long to wait
//! before the next one. Drivers decide what waiting means through a [`clock::Clock`].

/// Wall-clock and virtual clocks.
pub mod clock;
/// Progress signals emitted while rendering.
pub mod events;
/// Timing and flourish parameters.
pub mod params;
/// The reveal/flourish state machine.
pub mod signature;
