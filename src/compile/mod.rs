//! Scene pose to draw list.

pub(crate) mod plan;
pub(crate) mod shapes;
