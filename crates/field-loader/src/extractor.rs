//! Invocation of the external field-extraction executable.

use std::path::{Path, PathBuf};
use std::process::Command;

use annulus_common::DomainBounds;
use tracing::{debug, warn};

use crate::{LoaderError, LoaderResult};

/// Extraction executable expected in the working directory.
pub const DEFAULT_EXTRACTOR: &str = "./getData-generic-heatEq";

/// One extraction: which snapshot, over which bounds, at what resolution.
#[derive(Debug, Clone)]
pub struct ExtractionRequest<'a> {
    pub snapshot: &'a Path,
    pub bounds: DomainBounds,
    pub points_per_row: usize,
}

impl<'a> ExtractionRequest<'a> {
    pub fn new(snapshot: &'a Path, bounds: DomainBounds, points_per_row: usize) -> Self {
        Self {
            snapshot,
            bounds,
            points_per_row,
        }
    }

    /// Positional arguments: `file zmin rmin zmax rmax nr`.
    pub fn args(&self) -> Vec<String> {
        let b = &self.bounds;
        vec![
            self.snapshot.display().to_string(),
            format!("{:?}", b.z_min),
            format!("{:?}", b.r_min),
            format!("{:?}", b.z_max),
            format!("{:?}", b.r_max),
            self.points_per_row.to_string(),
        ]
    }
}

/// Source of raw extraction text for a snapshot.
pub trait FieldExtractor: Send + Sync {
    /// Return the diagnostic text (one `z r T aux` row per line).
    fn extract(&self, request: &ExtractionRequest<'_>) -> LoaderResult<String>;
}

/// Runs the extraction executable as a blocking subprocess.
///
/// Rows are read from the child's stderr; stdout is discarded.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: PathBuf,
}

impl CommandExtractor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for CommandExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_EXTRACTOR)
    }
}

impl FieldExtractor for CommandExtractor {
    fn extract(&self, request: &ExtractionRequest<'_>) -> LoaderResult<String> {
        let args = request.args();
        debug!(program = %self.program.display(), args = ?args, "Running field extraction");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| LoaderError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            warn!(
                program = %self.program.display(),
                status = %output.status,
                "Field extraction failed"
            );
            return Err(LoaderError::CommandFailed {
                program: self.program.display().to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stderr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_order() {
        let path = Path::new("case/intermediate/snapshot-1.0000");
        let request = ExtractionRequest::new(path, DomainBounds::new(-1.0, 2.5, -3.0, 4.0), 256);
        assert_eq!(
            request.args(),
            vec![
                "case/intermediate/snapshot-1.0000",
                "-3.0",
                "-1.0",
                "4.0",
                "2.5",
                "256"
            ]
        );
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let extractor = CommandExtractor::new("./definitely-not-an-extractor");
        let path = Path::new("snapshot");
        let request = ExtractionRequest::new(path, DomainBounds::default(), 4);
        let err = extractor.extract(&request).unwrap_err();
        assert!(matches!(err, LoaderError::Spawn { .. }));
        // The OS error is the source, not part of the message
        assert_eq!(err.to_string(), "Failed to run ./definitely-not-an-extractor");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_default_program() {
        assert_eq!(CommandExtractor::default().program(), Path::new(DEFAULT_EXTRACTOR));
    }
}
