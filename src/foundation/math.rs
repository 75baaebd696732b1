use crate::foundation::core::Point;

/// Linear interpolation between `a` (at `t = 0`) and `b` (at `t = 1`). `t` is not clamped.
///
/// Both endpoints are reproduced exactly.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Linear interpolation between two points. `t` is not clamped.
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Remap `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// No clamping: callers pre-clamp when they need it. A degenerate input range maps to
/// `out_min`.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

/// Deterministic SplitMix64 generator.
///
/// Used for the handful of random draws the stage makes at build time (window tilts, pivot
/// sides, walk targets) so a given seed always yields the same short.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[lo, hi)`.
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lerp(lo, hi, self.next_f64_01())
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.next_f64_01() > 0.5
    }
}

fn lattice01(x: i64) -> f64 {
    let mut rng = Rng64::new((x as u64).wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_f64_01()
}

/// Smooth 1D value noise in `[0, 1]`.
///
/// Lattice values are hashed per integer coordinate and blended with a smoothstep, so the
/// result is continuous with a continuous first derivative.
pub fn smooth_noise01(x: f64) -> f64 {
    let i0 = x.floor();
    let t = x - i0;
    let a = lattice01(i0 as i64);
    let b = lattice01(i0 as i64 + 1);
    let s = t * t * (3.0 - 2.0 * t);
    lerp(a, b, s)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
