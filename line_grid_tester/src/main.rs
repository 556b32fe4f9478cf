mod output;
mod settings;
mod sources;

use anyhow::{Context, Result};
use clap::Parser;
use line_grid::{LinePipeline, StopReason, run_frames};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "line_grid_tester")]
#[command(about = "Run the line-following perception pipeline over stills or a video")]
#[command(version)]
struct Cli {
    /// Directory of still images, or a video file (needs the `video` feature).
    input: PathBuf,

    /// Directory that receives overlay and grid images.
    #[arg(short, long, default_value = "line_grid_out")]
    output: PathBuf,

    /// Optional TOML file with pipeline settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write one JSON line per frame to grids.jsonl.
    #[arg(long)]
    emit_grids: bool,

    #[command(flatten)]
    overrides: settings::Overrides,
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Logging & Arguments ---
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // --- 2. Pipeline Initialization ---
    let mut config = settings::load(cli.config.as_deref())?;
    cli.overrides.apply(&mut config);
    info!("pipeline settings: {config:?}");
    let pipeline = LinePipeline::new(config).context("invalid pipeline settings")?;

    // --- 3. Input & Output ---
    let mut source = sources::open(&cli.input)
        .with_context(|| format!("cannot open input {}", cli.input.display()))?;
    let mut output =
        output::OutputWriter::create(&cli.output, pipeline.config().grid_view_size, cli.emit_grids)
            .with_context(|| format!("cannot prepare output {}", cli.output.display()))?;

    // --- 4. Stop Signal ---
    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing current frame");
            let _ = stop_tx.send(true);
        }
    });

    // --- 5. Main Processing Loop ---
    let output_dir = cli.output.clone();
    let summary = tokio::task::spawn_blocking(move || -> Result<_> {
        let summary = run_frames(
            source.as_mut(),
            &pipeline,
            || *stop_rx.borrow(),
            |index, report| output.write(index, &report),
        )?;
        output.finish()?;
        Ok(summary)
    })
    .await
    .context("processing task panicked")??;

    if summary.reason == StopReason::StopRequested {
        info!("stopped early on request");
    }
    info!(
        "Processing complete. {} frames ({} with a guide line) saved to {}",
        summary.frames_processed,
        summary.frames_with_line,
        output_dir.display()
    );
    Ok(())
}
