//! Reshaping parsed columns into plotting-oriented 2D fields.

use annulus_common::{DomainBounds, Field2D};
use tracing::debug;

use crate::{parse_rows, ExtractionRequest, FieldExtractor, LoaderError, LoaderResult, ParsedColumns};

/// The four channels of one snapshot, all of identical shape.
///
/// After reshaping, rows follow r and columns follow z: a field has shape
/// `(nr, nz)`.
#[derive(Debug, Clone)]
pub struct FieldSet {
    pub r: Field2D,
    pub z: Field2D,
    pub temperature: Field2D,
    pub aux: Field2D,
    /// Number of rows inferred from the extraction output.
    pub nz: usize,
    /// Points per extraction row.
    pub nr: usize,
}

impl FieldSet {
    /// Shape shared by every channel.
    pub fn shape(&self) -> (usize, usize) {
        self.temperature.shape()
    }

    /// Data extent spanned by the coordinate channels.
    pub fn extent(&self) -> Option<DomainBounds> {
        Some(DomainBounds::new(
            self.r.min()?,
            self.r.max()?,
            self.z.min()?,
            self.z.max()?,
        ))
    }
}

/// Points per extraction row: `floor(grids_per_r * r_max)`.
pub fn points_per_row(grids_per_r: u32, r_max: f64) -> LoaderResult<usize> {
    let points = (grids_per_r as f64 * r_max).floor();
    if !points.is_finite() || points < 1.0 {
        return Err(LoaderError::EmptyGrid { grids_per_r, r_max });
    }
    Ok(points as usize)
}

/// Reshape flat columns into `(nz, nr)` grids, rotate 90 degrees
/// counter-clockwise and flip vertically.
pub fn reshape_fields(columns: ParsedColumns, points_per_row: usize) -> LoaderResult<FieldSet> {
    let rows = columns.len();
    if points_per_row == 0 || rows == 0 || rows % points_per_row != 0 {
        return Err(LoaderError::RowCountMismatch {
            rows,
            points_per_row,
        });
    }

    let nr = points_per_row;
    let nz = rows / nr;
    debug!(nz, nr, "Reshaping extracted fields");

    let orient = |values: Vec<f64>| -> LoaderResult<Field2D> {
        let grid = Field2D::from_row_major(nz, nr, values)?;
        Ok(grid.rot90().flip_vertical())
    };

    Ok(FieldSet {
        r: orient(columns.r)?,
        z: orient(columns.z)?,
        temperature: orient(columns.temperature)?,
        aux: orient(columns.aux)?,
        nz,
        nr,
    })
}

/// Extract, parse and reshape the fields of one snapshot.
pub fn load_fields<E: FieldExtractor + ?Sized>(
    extractor: &E,
    request: &ExtractionRequest<'_>,
) -> LoaderResult<FieldSet> {
    let text = extractor.extract(request)?;
    let columns = parse_rows(&text)?;
    reshape_fields(columns, request.points_per_row)
}
