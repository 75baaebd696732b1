use std::f64::consts::{FRAC_PI_2, PI};

use crate::foundation::math::map_range;

/// `1 - (1 - t)^3`: fast start, soft landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// `3t^2 - 2t^3`, flat at both ends.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// `sin(t * pi / 2)`.
pub fn ease_out_sine(t: f64) -> f64 {
    (t * FRAC_PI_2).sin()
}

/// `1 - cos(t * pi / 2)`, the mirror of [`ease_out_sine`].
pub fn ease_in_cosine(t: f64) -> f64 {
    1.0 - (t * FRAC_PI_2).cos()
}

/// Raw cosine oscillation `cos(t * pi)` remapped from `[-1, 1]` into `[lo, hi]`.
///
/// One full swing from `hi` to `lo` takes one unit of `t`.
pub fn cosine_oscillation(t: f64, lo: f64, hi: f64) -> f64 {
    map_range((t * PI).cos(), -1.0, 1.0, lo, hi)
}

/// Half-wave bump `sin(t * pi)`: 0 at both ends, 1 at the midpoint.
pub fn sine_bump(t: f64) -> f64 {
    (t * PI).sin()
}

/// Rectified sine `|sin(t * pi * hops_per_unit)|`, the bounce used by every hop in the short.
pub fn bounce(t: f64, hops_per_unit: f64) -> f64 {
    (t * PI * hops_per_unit).sin().abs()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
