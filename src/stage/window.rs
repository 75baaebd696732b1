use crate::foundation::core::{Affine, Rect, Vec2};

/// Which corner of a shape stays fixed while it rotates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotSide {
    /// Rotate about the shape's own origin.
    None,
    Left,
    Right,
}

/// One of the background windows.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Window {
    /// Untilted window rectangle in canvas space.
    pub rect: Rect,
    /// Tilt magnitude (radians) reached once the windows have fallen, in `[2deg, 15deg]`.
    pub final_tilt: f64,
    /// Hinge selector. `Left` windows stay pinned at their bottom-right corner and rotate by
    /// the negated angle, `Right` windows stay pinned at their bottom-left corner.
    pub pivot: PivotSide,
}

impl Window {
    /// Create an untilted window hinged on `pivot`.
    pub fn new(rect: Rect, final_tilt: f64, pivot: PivotSide) -> Self {
        Self {
            rect,
            final_tilt,
            pivot,
        }
    }

    /// Window shape in local space, centered on the origin.
    pub fn local_rect(&self) -> Rect {
        let w2 = self.rect.width() / 2.0;
        let h2 = self.rect.height() / 2.0;
        Rect::new(-w2, -h2, w2, h2)
    }

    /// Local-to-canvas transform for the window tilted by `tilt` radians.
    pub fn transform(&self, tilt: f64) -> Affine {
        let center = Affine::translate(self.rect.center().to_vec2());
        let w2 = self.rect.width() / 2.0;
        let h2 = self.rect.height() / 2.0;
        let (corner, angle) = match self.pivot {
            PivotSide::None => return center * Affine::rotate(tilt),
            PivotSide::Left => (Vec2::new(-w2, -h2), -tilt),
            PivotSide::Right => (Vec2::new(w2, -h2), tilt),
        };
        center * Affine::translate(-corner) * Affine::rotate(angle) * Affine::translate(corner)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/window.rs"]
mod tests;
