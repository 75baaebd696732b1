/// Backend trait, settings and the rendered frame type.
pub mod backend;
/// CPU raster backend.
pub mod cpu;
/// Frame and range rendering on top of a backend.
pub mod pipeline;
pub(crate) mod text;
