/// PNG encoding and the export file name.
pub mod png;
/// Destinations for captured animation frames.
pub mod sink;
