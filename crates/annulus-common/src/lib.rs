//! Common types shared across the annulus post-processing crates.

pub mod bounds;
pub mod error;
pub mod field;
pub mod snapshot;

pub use bounds::{AnnulusGeometry, DomainBounds};
pub use error::{FramesError, FramesResult};
pub use field::Field2D;
pub use snapshot::SnapshotId;
