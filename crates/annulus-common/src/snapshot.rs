//! Snapshot naming: simulation time, input paths and frame file names.

use std::path::{Path, PathBuf};

/// Subdirectory of a case that holds the solver's snapshot files.
pub const SNAPSHOT_DIR: &str = "intermediate";

/// A snapshot identified by its timestep index and the spacing between
/// snapshots in dimensionless time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotId {
    pub index: usize,
    pub tsnap: f64,
}

impl SnapshotId {
    pub fn new(index: usize, tsnap: f64) -> Self {
        Self { index, tsnap }
    }

    /// Dimensionless time `t = tsnap * index`.
    pub fn time(&self) -> f64 {
        self.tsnap * self.index as f64
    }

    /// File name of the snapshot, e.g. `snapshot-2.5000`.
    pub fn snapshot_file_name(&self) -> String {
        format!("snapshot-{:.4}", self.time())
    }

    /// `<case>/intermediate/snapshot-<t>`
    pub fn input_path(&self, case_dir: &Path) -> PathBuf {
        case_dir.join(SNAPSHOT_DIR).join(self.snapshot_file_name())
    }

    /// Time scaled by 1000 and rounded to the nearest integer.
    pub fn frame_index(&self) -> u64 {
        (self.time() * 1000.0).round().max(0.0) as u64
    }

    /// Frame file name, zero-padded to eight digits: `00002500.png`.
    pub fn frame_file_name(&self) -> String {
        format!("{:08}.png", self.frame_index())
    }

    /// `<folder>/<frame file name>`
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.frame_file_name())
    }

    /// Plot title, e.g. `t/τ = 2.500`.
    pub fn title(&self) -> String {
        format!("t/\u{3c4} = {:4.3}", self.time())
    }
}
