//! Per-frame pose evaluation: one timeline-driven actor per character plus the composer that
//! runs them in dependency order.

pub(crate) mod background;
pub(crate) mod context;
pub(crate) mod crescent;
pub(crate) mod rectangle;
pub(crate) mod scene;
pub(crate) mod trapezoid;
