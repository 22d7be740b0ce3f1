//! Command-line configuration.
//!
//! Every option can also be set through an environment variable. The
//! camel-case names used by the Python post-processing scripts (`--CPUs`,
//! `--nGFS`, `--GridsPerR`, ...) are accepted as aliases.

use std::path::PathBuf;

use annulus_common::{AnnulusGeometry, DomainBounds, FramesError, FramesResult};
use anyhow::Context;
use clap::Parser;
use field_loader::DEFAULT_EXTRACTOR;
use renderer::{Colormap, FrameSpec, StyleDefinition};
use tracing::info;

#[derive(Parser, Debug, Clone)]
#[command(name = "annulus-frames")]
#[command(about = "Render temperature frames from annulus conduction snapshots")]
pub struct Args {
    /// Worker threads (default: all logical CPUs)
    #[arg(long, alias = "CPUs", env = "FRAMES_CPUS")]
    pub cpus: Option<usize>,

    /// Number of timesteps to process, starting at 0
    #[arg(long, alias = "nGFS", env = "FRAMES_N_GFS", default_value_t = 100)]
    pub n_gfs: usize,

    /// Grid points per unit length along r
    #[arg(long, alias = "GridsPerR", env = "FRAMES_GRIDS_PER_R", default_value_t = 64)]
    pub grids_per_r: u32,

    #[arg(long, alias = "ZMAX", env = "FRAMES_ZMAX", default_value_t = 4.0, allow_negative_numbers = true)]
    pub zmax: f64,

    #[arg(long, alias = "RMAX", env = "FRAMES_RMAX", default_value_t = 4.0, allow_negative_numbers = true)]
    pub rmax: f64,

    #[arg(long, alias = "ZMIN", env = "FRAMES_ZMIN", default_value_t = -4.0, allow_negative_numbers = true)]
    pub zmin: f64,

    #[arg(long, alias = "RMIN", env = "FRAMES_RMIN", default_value_t = -4.0, allow_negative_numbers = true)]
    pub rmin: f64,

    /// Simulation time between snapshots
    #[arg(long, env = "FRAMES_TSNAP", default_value_t = 1.0)]
    pub tsnap: f64,

    /// Case directory holding `intermediate/snapshot-*`
    #[arg(
        long,
        alias = "caseToProcess",
        env = "FRAMES_CASE",
        default_value = "../testCases/1-conduction-2D-annulus"
    )]
    pub case_to_process: PathBuf,

    /// Output folder for PNG frames
    #[arg(
        long,
        alias = "folderToSave",
        env = "FRAMES_OUTPUT",
        default_value = "1-conduction-2D-annulus"
    )]
    pub folder_to_save: PathBuf,

    /// Field extraction executable
    #[arg(long, env = "FRAMES_EXTRACTOR", default_value = DEFAULT_EXTRACTOR)]
    pub extractor: PathBuf,

    /// Radius of the blanked inner disk
    #[arg(long, env = "FRAMES_INNER_RADIUS", default_value_t = 1.0)]
    pub inner_radius: f64,

    /// Radius beyond which the field is not drawn
    #[arg(long, env = "FRAMES_OUTER_RADIUS", default_value_t = 4.0)]
    pub outer_radius: f64,

    /// Built-in colormap (coolwarm, custom_hot)
    #[arg(long, env = "FRAMES_COLORMAP", default_value = "coolwarm")]
    pub colormap: String,

    /// JSON style file; overrides --colormap
    #[arg(long, env = "FRAMES_STYLE_FILE")]
    pub style_file: Option<PathBuf>,

    /// TrueType font for titles and labels
    #[arg(long, env = "FRAMES_FONT")]
    pub font: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

/// Settings for one run of the pipeline.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub workers: usize,
    pub n_gfs: usize,
    pub grids_per_r: u32,
    pub tsnap: f64,
    pub bounds: DomainBounds,
    pub annulus: AnnulusGeometry,
    pub case_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl RunConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            workers: args.cpus.unwrap_or_else(num_cpus::get),
            n_gfs: args.n_gfs,
            grids_per_r: args.grids_per_r,
            tsnap: args.tsnap,
            bounds: DomainBounds::new(args.rmin, args.rmax, args.zmin, args.zmax),
            annulus: AnnulusGeometry::new(args.inner_radius, args.outer_radius),
            case_dir: args.case_to_process.clone(),
            output_dir: args.folder_to_save.clone(),
        }
    }

    pub fn validate(&self) -> FramesResult<()> {
        if self.workers == 0 {
            return Err(FramesError::invalid("cpus", "at least one worker is required"));
        }
        if !(self.tsnap.is_finite() && self.tsnap > 0.0) {
            return Err(FramesError::invalid(
                "tsnap",
                format!("must be a positive number, got {}", self.tsnap),
            ));
        }
        self.bounds.validate()?;
        self.annulus.validate()?;
        if (self.grids_per_r as f64 * self.bounds.r_max).floor() < 1.0 {
            return Err(FramesError::invalid(
                "grids-per-r",
                format!(
                    "{} grids per unit r over rmax {} gives no points per row",
                    self.grids_per_r, self.bounds.r_max
                ),
            ));
        }
        Ok(())
    }

    /// Frame appearance from `--style-file` when given, else the built-in
    /// `--colormap`. The colormap name is not looked up when a style is used.
    pub fn frame_spec(&self, args: &Args) -> anyhow::Result<FrameSpec> {
        let Some(path) = &args.style_file else {
            let colormap = Colormap::by_name(&args.colormap)?;
            return Ok(FrameSpec::new(self.bounds, self.annulus, colormap));
        };
        let style = StyleDefinition::from_file(path)
            .with_context(|| format!("loading style {}", path.display()))?;
        info!(style = %style.name, "Using style file");
        Ok(FrameSpec::new(self.bounds, self.annulus, Colormap::default()).with_style(&style)?)
    }
}
