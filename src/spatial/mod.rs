//! Transform-aware bounding-box accumulation in surface pixel space.

pub mod bounds;
