/// Frame buffer type produced by rasterization.
pub mod backend;
/// CPU rasterizer replaying display lists with `vello_cpu`.
pub mod cpu;
/// Recorded draw operations.
pub mod display_list;
/// Offline frame capture for an animation run.
pub mod pipeline;
/// Canvas-like drawing surface abstraction.
pub mod surface;
