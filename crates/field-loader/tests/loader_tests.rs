//! Tests for extracting and reshaping snapshot fields.

use std::path::Path;

use annulus_common::DomainBounds;
use field_loader::{
    load_fields, parse_rows, reshape_fields, ExtractionRequest, FieldExtractor, LoaderError,
    LoaderResult,
};
use test_utils::{annulus_temperature, assert_approx_eq, extraction_text, indexed_extraction_text};

/// Extractor returning canned text, for tests that don't need a subprocess.
struct StaticExtractor(String);

impl FieldExtractor for StaticExtractor {
    fn extract(&self, _request: &ExtractionRequest<'_>) -> LoaderResult<String> {
        Ok(self.0.clone())
    }
}

// ============================================================================
// Orientation tests
// ============================================================================

#[test]
fn test_reshaped_values_land_at_transposed_positions() {
    let nr = 4;
    let nz = 3;
    let columns = parse_rows(&indexed_extraction_text(nz * nr)).unwrap();
    let set = reshape_fields(columns, nr).unwrap();

    assert_eq!(set.shape(), (nr, nz));
    // Row k of the output (k = i * nr + j) ends up at (j, i)
    for i in 0..nz {
        for j in 0..nr {
            let k = (i * nr + j) as f64;
            assert_eq!(set.z.get(j, i), Some(k));
            assert_eq!(set.r.get(j, i), Some(k + 0.25));
            assert_eq!(set.temperature.get(j, i), Some(k + 0.5));
            assert_eq!(set.aux.get(j, i), Some(k + 0.75));
        }
    }
}

#[test]
fn test_rotation_reverses_and_flip_restores() {
    let nr = 5;
    let nz = 2;
    let columns = parse_rows(&indexed_extraction_text(nz * nr)).unwrap();
    let grid = annulus_common::Field2D::from_row_major(nz, nr, columns.z).unwrap();

    // The first input row increases along r; after rotating it runs down
    // the first column in reverse.
    let rotated = grid.rot90();
    let first_col: Vec<f64> = (0..nr).map(|row| rotated.get(row, 0).unwrap()).collect();
    assert_eq!(first_col, vec![4.0, 3.0, 2.0, 1.0, 0.0]);

    let flipped = rotated.flip_vertical();
    let first_col: Vec<f64> = (0..nr).map(|row| flipped.get(row, 0).unwrap()).collect();
    assert_eq!(first_col, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_all_channels_share_shape() {
    let bounds = DomainBounds::default();
    for (nz, nr) in [(1, 1), (3, 7), (16, 16), (10, 4)] {
        let text = extraction_text(&bounds, nz, nr, |z, r| z + r);
        let set = reshape_fields(parse_rows(&text).unwrap(), nr).unwrap();
        assert_eq!(set.r.shape(), (nr, nz));
        assert_eq!(set.z.shape(), (nr, nz));
        assert_eq!(set.temperature.shape(), (nr, nz));
        assert_eq!(set.aux.shape(), (nr, nz));
    }
}

#[test]
fn test_extent_follows_coordinate_channels() {
    let bounds = DomainBounds::default();
    let text = extraction_text(&bounds, 8, 8, annulus_temperature(1.0, 4.0));
    let set = reshape_fields(parse_rows(&text).unwrap(), 8).unwrap();
    let extent = set.extent().unwrap();

    // Cell centres of an 8-point sweep over [-4, 4]
    assert_eq!(extent.r_min, -3.5);
    assert_eq!(extent.r_max, 3.5);
    assert_eq!(extent.z_min, -3.5);
    assert_eq!(extent.z_max, 3.5);

    // Rows follow r, columns follow z
    assert_eq!(set.r.get(0, 0), Some(-3.5));
    assert_eq!(set.r.get(7, 0), Some(3.5));
    assert_eq!(set.z.get(0, 7), Some(3.5));

    // Temperature travels with its coordinates
    let profile = annulus_temperature(1.0, 4.0);
    assert_approx_eq!(set.temperature.get(0, 7).unwrap(), profile(3.5, -3.5), 1e-12);
    assert_approx_eq!(set.temperature.get(5, 2).unwrap(), profile(-1.5, 1.5), 1e-12);
}

// ============================================================================
// load_fields tests
// ============================================================================

#[test]
fn test_load_fields_with_static_extractor() {
    let text = extraction_text(&DomainBounds::default(), 6, 4, |_, _| 0.5);
    let extractor = StaticExtractor(text);
    let request = ExtractionRequest::new(Path::new("unused"), DomainBounds::default(), 4);

    let set = load_fields(&extractor, &request).unwrap();
    assert_eq!(set.nz, 6);
    assert_eq!(set.nr, 4);
    assert!(set.temperature.as_slice().iter().all(|&t| t == 0.5));
}

#[test]
fn test_load_fields_rejects_partial_grid() {
    let extractor = StaticExtractor(indexed_extraction_text(10));
    let request = ExtractionRequest::new(Path::new("unused"), DomainBounds::default(), 4);

    let err = load_fields(&extractor, &request).unwrap_err();
    assert!(matches!(err, LoaderError::RowCountMismatch { rows: 10, points_per_row: 4 }));
}

#[test]
fn test_load_fields_through_trait_object() {
    let extractor: Box<dyn FieldExtractor> = Box::new(StaticExtractor(indexed_extraction_text(4)));
    let request = ExtractionRequest::new(Path::new("unused"), DomainBounds::default(), 2);
    let set = load_fields(extractor.as_ref(), &request).unwrap();
    assert_eq!(set.shape(), (2, 2));
}

// ============================================================================
// Subprocess tests
// ============================================================================

#[cfg(unix)]
mod subprocess {
    use super::*;
    use field_loader::CommandExtractor;
    use test_utils::{recorded_invocations, write_fake_extractor};

    #[test]
    fn test_command_extractor_reads_stderr_and_passes_args() {
        let dir = tempfile::tempdir().unwrap();
        let rows = indexed_extraction_text(6);
        let script = write_fake_extractor(dir.path(), "extract", &rows, 0).unwrap();

        let extractor = CommandExtractor::new(&script);
        let snapshot = dir.path().join("snapshot-1.0000");
        let request = ExtractionRequest::new(&snapshot, DomainBounds::new(-1.0, 2.0, -3.0, 4.0), 3);

        let set = load_fields(&extractor, &request).unwrap();
        assert_eq!(set.shape(), (3, 2));

        let calls = recorded_invocations(&script);
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            format!("{} -3.0 -1.0 4.0 2.0 3", snapshot.display())
        );
    }

    #[test]
    fn test_command_extractor_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_fake_extractor(dir.path(), "extract", "", 2).unwrap();

        let extractor = CommandExtractor::new(&script);
        let request = ExtractionRequest::new(Path::new("snap"), DomainBounds::default(), 4);

        let err = extractor.extract(&request).unwrap_err();
        assert!(matches!(err, LoaderError::CommandFailed { .. }));
    }
}
