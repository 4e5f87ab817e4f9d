//! Frame sinks.
//!
//! Sinks consume rendered vector frames in timeline order and are used by
//! [`crate::render_audio_frames`].

/// SVG rasterization to PNG.
pub mod raster;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
