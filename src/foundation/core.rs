use crate::foundation::error::{OpweaveError, OpweaveResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Index of one recorded surface operation.
///
/// Assigned exactly once, in issue order, by the tracker's index counter.
/// Operations are never materialized as objects; an `OpIndex` is the key
/// into attribute bindings and dependency sets.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct OpIndex(pub u64);

/// Fixed pixel dimensions of the tracked surface.
///
/// Captured once at construction; every exported bounding box is divided by
/// these to land in the normalized `0..1` unit space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Build a surface size; zero on either axis is rejected since it would
    /// make normalization divide by zero.
    pub fn new(width: u32, height: u32) -> OpweaveResult<Self> {
        if width == 0 || height == 0 {
            return Err(OpweaveError::surface("surface width/height must be > 0"));
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
