//! Per-timestep processing and the worker pool that drives it.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use annulus_common::SnapshotId;
use field_loader::{load_fields, points_per_row, ExtractionRequest, FieldExtractor};
use rayon::prelude::*;
use renderer::{write_frame, Font, FrameData, FrameSpec};
use tracing::{debug, error, info};

use crate::config::RunConfig;

/// What happened to a single timestep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestepOutcome {
    Rendered(PathBuf),
    SkippedMissingInput,
    SkippedExisting,
}

/// Counts of timestep outcomes for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rendered: usize,
    pub skipped_missing: usize,
    pub skipped_existing: usize,
    pub failed: usize,
    /// Lowest failing timestep and its error chain
    pub first_failure: Option<(usize, String)>,
}

#[derive(Default)]
struct Counters {
    rendered: AtomicUsize,
    skipped_missing: AtomicUsize,
    skipped_existing: AtomicUsize,
    failures: Mutex<Vec<(usize, String)>>,
}

impl Counters {
    fn record(&self, outcome: &TimestepOutcome) {
        let counter = match outcome {
            TimestepOutcome::Rendered(_) => &self.rendered,
            TimestepOutcome::SkippedMissingInput => &self.skipped_missing,
            TimestepOutcome::SkippedExisting => &self.skipped_existing,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failure(&self, index: usize, message: String) {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        failures.push((index, message));
    }

    fn into_summary(self) -> RunSummary {
        let failures = self.failures.into_inner().unwrap_or_else(|e| e.into_inner());
        RunSummary {
            rendered: self.rendered.into_inner(),
            skipped_missing: self.skipped_missing.into_inner(),
            skipped_existing: self.skipped_existing.into_inner(),
            failed: failures.len(),
            first_failure: failures.into_iter().min_by_key(|(index, _)| *index),
        }
    }
}

/// Loads, renders and writes frames for a range of timesteps.
pub struct Pipeline<E> {
    config: RunConfig,
    extractor: E,
    frame: FrameSpec,
    font: Option<Font<'static>>,
    points_per_row: usize,
}

impl<E: FieldExtractor> Pipeline<E> {
    pub fn new(config: RunConfig, extractor: E, frame: FrameSpec, font: Option<Font<'static>>) -> Result<Self> {
        config.validate()?;
        let points_per_row = points_per_row(config.grids_per_r, config.bounds.r_max)?;

        Ok(Self {
            config,
            extractor,
            frame,
            font,
            points_per_row,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Process every timestep `0..n_gfs` on a pool of `workers` threads.
    ///
    /// Failed timesteps are logged and counted; the remaining ones still run.
    pub fn run(&self) -> Result<RunSummary> {
        std::fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!("creating output folder {}", self.config.output_dir.display())
        })?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("frames-worker-{i}"))
            .build()
            .context("building worker pool")?;

        info!(
            workers = self.config.workers,
            timesteps = self.config.n_gfs,
            points_per_row = self.points_per_row,
            case = %self.config.case_dir.display(),
            output = %self.config.output_dir.display(),
            "Starting frame rendering"
        );

        let start = Instant::now();
        let counters = Counters::default();

        pool.install(|| {
            (0..self.config.n_gfs).into_par_iter().for_each(|index| {
                match self.process_timestep(index) {
                    Ok(outcome) => counters.record(&outcome),
                    Err(e) => {
                        let message = format!("{e:#}");
                        error!(timestep = index, error = %message, "Timestep failed");
                        counters.record_failure(index, message);
                    }
                }
            })
        });

        let summary = counters.into_summary();
        info!(
            rendered = summary.rendered,
            skipped_missing = summary.skipped_missing,
            skipped_existing = summary.skipped_existing,
            failed = summary.failed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Frame rendering complete"
        );
        Ok(summary)
    }

    /// Render the frame for timestep `index` unless its input is missing or
    /// its output already exists.
    pub fn process_timestep(&self, index: usize) -> Result<TimestepOutcome> {
        let snapshot = SnapshotId::new(index, self.config.tsnap);
        let input = snapshot.input_path(&self.config.case_dir);
        let output = snapshot.output_path(&self.config.output_dir);

        if !input.exists() {
            info!("{} File not found!", input.display());
            return Ok(TimestepOutcome::SkippedMissingInput);
        }
        if output.exists() {
            info!("{} Image present!", output.display());
            return Ok(TimestepOutcome::SkippedExisting);
        }

        let request = ExtractionRequest::new(&input, self.config.bounds, self.points_per_row);
        let fields = load_fields(&self.extractor, &request)
            .with_context(|| format!("loading fields from {}", input.display()))?;
        debug!(timestep = index, nz = fields.nz, nr = fields.nr, "Loaded fields");

        let extent = fields
            .extent()
            .ok_or_else(|| anyhow!("{} has no finite coordinates", input.display()))?;
        let title = snapshot.title();
        let data = FrameData {
            temperature: &fields.temperature,
            extent,
            title: &title,
        };

        write_frame(&output, &data, &self.frame, self.font.as_ref())
            .with_context(|| format!("writing {}", output.display()))?;

        info!(timestep = index, t = snapshot.time(), path = %output.display(), "Rendered frame");
        Ok(TimestepOutcome::Rendered(output))
    }
}
