//! Render plans: which banding factors and palettes each frame gets

use crate::image::{ColorizeError, PaletteMode};
use crate::types::BandingFactor;
use std::fmt;

/// Banding factors rendered when none are configured
pub const DEFAULT_FACTORS: [f64; 6] = [1.0, 2.0, 10.0, 20.0, 50.0, 100.0];

/// One (banding factor, palette) render of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderJob {
    pub factor: BandingFactor,
    pub mode: PaletteMode,
}

impl RenderJob {
    #[must_use]
    pub fn new(factor: BandingFactor, mode: PaletteMode) -> Self {
        Self { factor, mode }
    }
}

impl fmt::Display for RenderJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{mode} with {factor} band(s)", mode = self.mode, factor = self.factor)
    }
}

/// Validated cross product of banding factors and palette modes
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    factors: Vec<BandingFactor>,
    modes: Vec<PaletteMode>,
}

impl RenderPlan {
    /// Validate factors and drop duplicates, keeping first-seen order
    ///
    /// # Errors
    ///
    /// Returns `ColorizeError::InvalidArgument` for any factor that is not a
    /// finite positive number
    pub fn new(factors: &[f64], modes: &[PaletteMode]) -> Result<Self, ColorizeError> {
        let mut unique_factors: Vec<BandingFactor> = Vec::with_capacity(factors.len());
        for &value in factors {
            let factor = BandingFactor::new(value)?;
            if !unique_factors.contains(&factor) {
                unique_factors.push(factor);
            }
        }

        let mut unique_modes: Vec<PaletteMode> = Vec::with_capacity(modes.len());
        for &mode in modes {
            if !unique_modes.contains(&mode) {
                unique_modes.push(mode);
            }
        }

        Ok(Self {
            factors: unique_factors,
            modes: unique_modes,
        })
    }

    #[must_use]
    pub fn factors(&self) -> &[BandingFactor] {
        &self.factors
    }

    #[must_use]
    pub fn modes(&self) -> &[PaletteMode] {
        &self.modes
    }

    /// Jobs per frame
    #[inline]
    #[must_use]
    pub fn job_count(&self) -> usize {
        self.factors.len() * self.modes.len()
    }

    /// Every job, grouped by factor
    pub fn jobs(&self) -> impl Iterator<Item = RenderJob> + '_ {
        self.factors
            .iter()
            .flat_map(|&factor| self.modes.iter().map(move |&mode| RenderJob::new(factor, mode)))
    }
}

impl Default for RenderPlan {
    fn default() -> Self {
        Self {
            factors: DEFAULT_FACTORS.iter().map(|&f| BandingFactor(f)).collect(),
            modes: PaletteMode::ALL.to_vec(),
        }
    }
}
