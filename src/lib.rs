//! Opweave builds, online, a dependency graph and a spatial index over a
//! stream of 2D drawing commands.
//!
//! A document renderer issues drawing and state-mutating calls against a
//! raster surface. Opweave observes that stream as it happens, without
//! re-reading or re-interpreting the drawn content, and produces, for
//! every operation and every logical group of operations, a normalized
//! bounding box plus the minimal set of prior operation indices its
//! appearance depends on.
//!
//! # Pipeline overview
//!
//! 1. **Forward**: every surface call routes through [`CanvasRecorder`]
//!    (or straight into [`Tracker`] for integrations with their own proxy)
//! 2. **Track**: state writes land in the save/restore-scoped attribute
//!    store; drawing calls stage transform-aware bounds and resolve their
//!    attribute dependencies
//! 3. **Group**: group boundaries delimit the finalized records
//! 4. **Export**: one terminal [`Tracker::take`] returns the
//!    [`Recording`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Opaque surface**: the surface is a sink opweave forwards to and
//!   queries (transform, text metrics); pixels are never inspected.
//! - **Order-sensitive and synchronous**: one tracker owns one linear
//!   operation stream from construction to export.
//! - **Fail loudly on misuse**: save/restore imbalance and post-export
//!   calls are fatal errors, never silently repaired.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod record;
mod spatial;
mod state;
mod track;

pub use foundation::core::{Affine, BezPath, OpIndex, Point, Rect, SurfaceSize, Vec2};
pub use foundation::error::{OpweaveError, OpweaveResult};
pub use record::recorder::CanvasRecorder;
pub use record::surface::{Canvas2d, LineCap, LineJoin, NullSurface, TextMetrics};
pub use spatial::bounds::{Bounds, NormBox};
pub use state::attrs::{Attr, AttrKind};
pub use state::store::AttrStore;
pub use track::tracker::{GroupRecord, OpRecord, Recording, Tracker, TrackerPolicy};
