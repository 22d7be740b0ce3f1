//! Field loader for annulus heat-conduction snapshots.
//!
//! The solver's native mesh is not read directly. Instead an external
//! extraction executable interpolates a snapshot onto a regular (z, r) grid
//! and prints one row per grid point on its diagnostic stream:
//!
//! ```text
//! z r T aux
//! ```
//!
//! This crate runs that executable, parses the rows and reshapes the four
//! columns into [`Field2D`] arrays oriented for plotting.

mod extractor;
mod parse;
mod reshape;

use thiserror::Error;

pub use annulus_common::Field2D;
pub use extractor::{CommandExtractor, ExtractionRequest, FieldExtractor, DEFAULT_EXTRACTOR};
pub use parse::{parse_rows, ParsedColumns};
pub use reshape::{load_fields, points_per_row, reshape_fields, FieldSet};

/// Result type for field loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Error types for field extraction and reshaping.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The extraction executable could not be started
    #[error("Failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The extraction executable exited unsuccessfully
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// A diagnostic line could not be parsed into four numbers
    #[error("Invalid row {line}: '{content}'")]
    InvalidRow { line: usize, content: String },

    /// The number of parsed rows does not fill a whole grid
    #[error("Cannot reshape {rows} rows into rows of {points_per_row} points")]
    RowCountMismatch { rows: usize, points_per_row: usize },

    /// Grid resolution resolves to zero points per row
    #[error("Grid has no points per row (grids per r = {grids_per_r}, rmax = {r_max})")]
    EmptyGrid { grids_per_r: u32, r_max: f64 },

    #[error(transparent)]
    Field(#[from] annulus_common::FramesError),
}
