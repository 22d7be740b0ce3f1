//! Annulus heat-conduction post-processing.
//!
//! Turns the `intermediate/snapshot-*` files of a simulation case into one
//! PNG frame per timestep, running the external extraction tool for each
//! snapshot on a pool of worker threads.

pub mod config;
pub mod pipeline;

pub use config::{Args, RunConfig};
pub use pipeline::{Pipeline, RunSummary, TimestepOutcome};
