//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by
//! [`render_range`](crate::render::pipeline::render_range).

/// `ffmpeg`-based MP4 output via the system `ffmpeg` binary.
pub mod ffmpeg;
/// Frame sink trait, in-memory sink and PNG sequence sink.
pub mod sink;
