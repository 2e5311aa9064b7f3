use crate::image::{ColorizeError, PaletteMode};
use crate::render::{DEFAULT_FACTORS, RenderConfig, RenderPlan};
use clap::Parser;
use std::path::PathBuf;

/// Render FITS image planes as false-color BMP files
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// FITS file path(s) to convert
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Directory the BMP files are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Banding factors (stripe counts) to render, comma separated
    #[arg(short, long, value_name = "N", value_delimiter = ',', default_values_t = DEFAULT_FACTORS)]
    pub stripes: Vec<f64>,

    /// Palettes to render: nickrgb, snrgb, roygbiv, greyscale, binary
    #[arg(short, long, value_name = "MODE", value_delimiter = ',', default_values_t = PaletteMode::ALL)]
    pub modes: Vec<PaletteMode>,

    /// Start of the view window as a fraction of the data range
    #[arg(long, default_value_t = 0.0)]
    pub window_start: f64,

    /// End of the view window as a fraction of the data range
    #[arg(long, default_value_t = 1.0)]
    pub window_end: f64,

    /// Number of render workers (default: one per CPU)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Show FITS header details and debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the renderer settings, validating factors before anything runs
    ///
    /// # Errors
    ///
    /// Returns `ColorizeError::InvalidArgument` for non-positive banding factors
    pub fn render_config(&self) -> Result<RenderConfig, ColorizeError> {
        Ok(RenderConfig {
            plan: RenderPlan::new(&self.stripes, &self.modes)?,
            window_start: self.window_start,
            window_end: self.window_end,
            threads: self.threads,
        })
    }
}
