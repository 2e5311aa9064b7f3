use anyhow::Context;
use clap::{CommandFactory, Parser};
use fitscolor::cli::Args;
use fitscolor::error::ProcessError;
use fitscolor::fits::FitsFile;
use fitscolor::output::BmpWriter;
use fitscolor::render::Renderer;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let args = Args::parse();

    if args.files.is_empty() {
        let _ = Args::command().print_help();
        println!();
        return;
    }

    init_tracing(args.verbose);

    let renderer = match build_renderer(&args) {
        Ok(renderer) => renderer,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(2);
        }
    };

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        error!(dir = %args.output_dir.display(), "Cannot create output directory: {e}");
        std::process::exit(2);
    }

    let mut any_failed = false;

    for file_path in &args.files {
        if let Err(e) = process_file(file_path, &args, &renderer) {
            error!(file = %file_path.display(), "{e}");
            any_failed = true;
        }
    }

    if any_failed {
        std::process::exit(1);
    }
}

fn build_renderer(args: &Args) -> anyhow::Result<Renderer> {
    let config = args.render_config().context("Invalid render options")?;
    Renderer::new(config).context("Cannot start renderer")
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "fitscolor=debug" } else { "fitscolor=info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// What one input file produced
#[derive(Debug, Default, PartialEq, Eq)]
struct FileSummary {
    frames: usize,
    jobs: usize,
}

/// Convert every image HDU of one FITS file
fn process_file(file_path: &Path, args: &Args, renderer: &Renderer) -> Result<FileSummary, ProcessError> {
    // Stage 1: Open FITS file
    let fits = FitsFile::open(file_path).map_err(ProcessError::NotAFitsFile)?;

    let mut summary = FileSummary::default();
    let mut failed = 0;

    // Stage 2: Decode frames one at a time; each frame fans out to its render jobs
    for frame in fits.frames() {
        let frame = frame.map_err(ProcessError::DecodeFailed)?;

        if args.verbose {
            fitscolor::print_frame_info(&frame);
        }

        // Stage 3: Render and write
        let writer = BmpWriter::new(&args.output_dir, file_path, frame.hdu_index);
        let outcomes = renderer.render_frame(&frame.image, &writer);

        summary.frames += 1;
        summary.jobs += outcomes.len();
        failed += outcomes.iter().filter(|o| !o.is_ok()).count();
    }

    if failed > 0 {
        return Err(ProcessError::JobsFailed {
            failed,
            total: summary.jobs,
        });
    }

    info!(
        file = %file_path.display(),
        frames = summary.frames,
        images = summary.jobs,
        "Converted"
    );

    Ok(summary)
}
