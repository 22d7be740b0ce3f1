//! Annulus frame renderer.
//!
//! Renders one temperature frame per simulation snapshot, skipping
//! snapshots that do not exist and frames that were already written.

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use annulus_frames::{Args, Pipeline, RunConfig};
use field_loader::CommandExtractor;
use renderer::load_font;

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level, args.log_json)?;

    let config = RunConfig::from_args(&args);
    config.validate()?;

    let frame = config.frame_spec(&args)?;
    let font = load_font(args.font.as_deref())?;
    let extractor = CommandExtractor::new(&args.extractor);
    info!(extractor = %extractor.program().display(), "Using field extractor");

    let pipeline = Pipeline::new(config, extractor, frame, font)?;
    let summary = pipeline.run()?;

    if let Some((index, message)) = &summary.first_failure {
        bail!(
            "{} of {} timesteps failed; first failure at timestep {}: {}",
            summary.failed,
            pipeline.config().n_gfs,
            index,
            message
        );
    }

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_names(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
