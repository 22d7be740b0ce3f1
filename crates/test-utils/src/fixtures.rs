//! Scratch case directories and a stand-in extraction executable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use annulus_common::SnapshotId;
use tempfile::TempDir;

/// A temporary directory laid out like a simulation case plus an output
/// folder for frames.
///
/// ```text
/// <tmp>/case/intermediate/snapshot-*
/// <tmp>/frames/
/// ```
pub struct SyntheticCase {
    dir: TempDir,
}

impl SyntheticCase {
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("case").join(annulus_common::snapshot::SNAPSHOT_DIR))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn case_dir(&self) -> PathBuf {
        self.dir.path().join("case")
    }

    /// Output folder; not created until the pipeline runs.
    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("frames")
    }

    /// Create an (empty) snapshot file for the given timestep.
    pub fn add_snapshot(&self, snapshot: SnapshotId) -> io::Result<PathBuf> {
        let path = snapshot.input_path(&self.case_dir());
        fs::write(&path, b"")?;
        Ok(path)
    }

    /// Pre-create a frame image so the pipeline treats it as done.
    pub fn add_existing_frame(&self, snapshot: SnapshotId) -> io::Result<PathBuf> {
        fs::create_dir_all(self.output_dir())?;
        let path = snapshot.output_path(&self.output_dir());
        fs::write(&path, b"existing")?;
        Ok(path)
    }

    /// Write a fake extractor that prints `rows` to stderr.
    #[cfg(unix)]
    pub fn fake_extractor(&self, rows: &str) -> io::Result<PathBuf> {
        write_fake_extractor(self.root(), "extract-ok", rows, 0)
    }

    /// Write a fake extractor that exits with the given non-zero status.
    #[cfg(unix)]
    pub fn failing_extractor(&self, status: i32) -> io::Result<PathBuf> {
        write_fake_extractor(self.root(), "extract-fail", "", status)
    }
}

/// Write an executable shell script standing in for the extraction tool.
///
/// The script appends its arguments to `<name>.args`, copies `<name>.rows`
/// to stderr and exits with `status`.
#[cfg(unix)]
pub fn write_fake_extractor(dir: &Path, name: &str, rows: &str, status: i32) -> io::Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let rows_path = dir.join(format!("{name}.rows"));
    let args_path = dir.join(format!("{name}.args"));
    fs::write(&rows_path, rows)?;

    let script = format!(
        "#!/bin/sh\necho \"$@\" >> '{}'\ncat '{}' 1>&2\nexit {}\n",
        args_path.display(),
        rows_path.display(),
        status
    );
    let script_path = dir.join(name);
    fs::write(&script_path, script)?;
    fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))?;
    Ok(script_path)
}

/// Lines recorded by a fake extractor, one per invocation.
pub fn recorded_invocations(extractor: &Path) -> Vec<String> {
    let args_path = extractor.with_extension("args");
    fs::read_to_string(args_path)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
