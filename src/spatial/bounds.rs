use crate::foundation::core::{Affine, Point, SurfaceSize};

/// Axis-aligned bounding box in surface pixel space.
///
/// Starts inverted-infinite (empty) and only ever grows. Registration
/// happens in the surface's local coordinate space; corners are pushed
/// through the surface's live affine transform and renormalized so
/// min <= max independently per axis, since a rotation can invert corner
/// ordering on one axis without touching the other.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Minimum X in device pixels.
    pub min_x: f64,
    /// Minimum Y in device pixels.
    pub min_y: f64,
    /// Maximum X in device pixels.
    pub max_x: f64,
    /// Maximum Y in device pixels.
    pub max_y: f64,
}

impl Bounds {
    /// The empty (inverted-infinite) box.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Maximal device-space extent, used when an operation's visual
    /// footprint cannot be safely bounded.
    pub const UNBOUNDED: Self = Self {
        min_x: 0.0,
        min_y: 0.0,
        max_x: f64::INFINITY,
        max_y: f64::INFINITY,
    };

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Device-space box covering the local-space box `(x0, y0)..(x1, y1)`
    /// under `transform`.
    pub fn transformed_box(transform: Affine, x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        let a = transform * Point::new(x0, y0);
        let b = transform * Point::new(x1, y1);
        let (min_x, max_x) = if b.x < a.x { (b.x, a.x) } else { (a.x, b.x) };
        let (min_y, max_y) = if b.y < a.y { (b.y, a.y) } else { (a.y, b.y) };
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Device-space degenerate box for the local-space point `(x, y)`.
    pub fn transformed_point(transform: Affine, x: f64, y: f64) -> Self {
        let p = transform * Point::new(x, y);
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    /// Expand to cover `other`. Folding an empty box is a no-op.
    pub fn union(&mut self, other: Bounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Scale into the `0..1` unit space by the surface's fixed dimensions.
    ///
    /// An empty box normalizes to the full unit box: nothing was staged, so
    /// the conservative answer is "anywhere on the surface".
    pub fn normalized(self, size: SurfaceSize) -> NormBox {
        if self.is_empty() {
            return NormBox::UNIT;
        }
        let w = f64::from(size.width);
        let h = f64::from(size.height);
        NormBox {
            min_x: self.min_x / w,
            max_x: self.max_x / w,
            min_y: self.min_y / h,
            max_y: self.max_y / h,
        }
    }
}

/// Bounding box normalized by the surface dimensions, `0..1` on each axis
/// for anything inside the surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormBox {
    /// Minimum X as a fraction of surface width.
    pub min_x: f64,
    /// Minimum Y as a fraction of surface height.
    pub min_y: f64,
    /// Maximum X as a fraction of surface width.
    pub max_x: f64,
    /// Maximum Y as a fraction of surface height.
    pub max_y: f64,
}

impl NormBox {
    /// The full unit box, the default for operations with no staged bounds.
    pub const UNIT: Self = Self {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 1.0,
        max_y: 1.0,
    };
}

#[cfg(test)]
#[path = "../../tests/unit/spatial/bounds.rs"]
mod tests;
