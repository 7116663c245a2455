// Synthetic Transmission Spectrum
// Mock spectrum over the near-infrared with fixed molecular absorption lines

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ExoError, ExoResult};

pub const DEFAULT_START_UM: f64 = 1.0;
pub const DEFAULT_END_UM: f64 = 5.0;
pub const DEFAULT_STEP_UM: f64 = 0.05;
pub const DEFAULT_SPECTRAL_NOISE: f64 = 0.02;

/// Largest wavelength grid a config may request
pub const MAX_SPECTRUM_POINTS: usize = 1_000_000;

// =============================================================================
// MOLECULES & LINES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Molecule {
    H2O,
    CO2,
    CH4,
    N2,
    O2,
    Others,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsorptionLine {
    pub molecule: Molecule,
    /// Line centre (µm)
    pub center_um: f64,
    /// Flux is multiplied by `transmittance` strictly within this distance of the centre
    pub half_width_um: f64,
    pub transmittance: f64,
}

impl AbsorptionLine {
    pub fn factor_at(&self, wavelength_um: f64) -> f64 {
        if (wavelength_um - self.center_um).abs() < self.half_width_um {
            self.transmittance
        } else {
            1.0
        }
    }
}

pub const ABSORPTION_LINES: [AbsorptionLine; 4] = [
    AbsorptionLine {
        molecule: Molecule::H2O,
        center_um: 1.4,
        half_width_um: 0.02,
        transmittance: 0.85,
    },
    AbsorptionLine {
        molecule: Molecule::CO2,
        center_um: 2.0,
        half_width_um: 0.015,
        transmittance: 0.90,
    },
    AbsorptionLine {
        molecule: Molecule::CH4,
        center_um: 3.3,
        half_width_um: 0.01,
        transmittance: 0.92,
    },
    AbsorptionLine {
        molecule: Molecule::CO2,
        center_um: 4.3,
        half_width_um: 0.02,
        transmittance: 0.88,
    },
];

/// Reference atmospheric composition shown next to the spectrum (percent)
pub const REFERENCE_COMPOSITION: [(Molecule, f64); 6] = [
    (Molecule::H2O, 15.2),
    (Molecule::CO2, 8.7),
    (Molecule::CH4, 3.1),
    (Molecule::N2, 45.3),
    (Molecule::O2, 0.8),
    (Molecule::Others, 26.9),
];

// =============================================================================
// SPECTRUM
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralSample {
    pub wavelength_um: f64,
    pub flux: f64,
    /// Transmission in percent
    pub transmission: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumConfig {
    pub start_um: f64,
    pub end_um: f64,
    pub step_um: f64,
    pub noise_amplitude: f64,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            start_um: DEFAULT_START_UM,
            end_um: DEFAULT_END_UM,
            step_um: DEFAULT_STEP_UM,
            noise_amplitude: DEFAULT_SPECTRAL_NOISE,
        }
    }
}

impl SpectrumConfig {
    pub fn validate(&self) -> ExoResult<()> {
        if !(self.start_um.is_finite() && self.start_um > 0.0) {
            return Err(ExoError::invalid(
                "start_um",
                format!("must be a positive wavelength, got {}", self.start_um),
            ));
        }
        if !(self.end_um.is_finite() && self.end_um >= self.start_um) {
            return Err(ExoError::invalid(
                "end_um",
                format!("must not be below start_um ({}), got {}", self.start_um, self.end_um),
            ));
        }
        if !(self.step_um.is_finite() && self.step_um > 0.0) {
            return Err(ExoError::invalid(
                "step_um",
                format!("must be positive, got {}", self.step_um),
            ));
        }
        let points = self.grid_points();
        if !(points <= MAX_SPECTRUM_POINTS as f64) {
            return Err(ExoError::invalid(
                "step_um",
                format!(
                    "grid of {} points exceeds the {} point limit",
                    points, MAX_SPECTRUM_POINTS
                ),
            ));
        }
        if !(self.noise_amplitude.is_finite() && self.noise_amplitude >= 0.0) {
            return Err(ExoError::invalid(
                "noise_amplitude",
                format!("must be non-negative, got {}", self.noise_amplitude),
            ));
        }
        Ok(())
    }

    /// Number of grid points, end inclusive. Only meaningful for a validated config.
    pub fn point_count(&self) -> usize {
        self.grid_points().min(MAX_SPECTRUM_POINTS as f64) as usize
    }

    fn grid_points(&self) -> f64 {
        // Small epsilon so an end that lands on the grid is kept despite rounding
        ((self.end_um - self.start_um) / self.step_um + 1e-9).floor() + 1.0
    }
}

/// Noise-free flux at a wavelength after all absorption lines
pub fn absorbed_flux(wavelength_um: f64) -> f64 {
    ABSORPTION_LINES
        .iter()
        .fold(1.0, |flux, line| flux * line.factor_at(wavelength_um))
}

pub fn generate_spectrum<R: Rng + ?Sized>(
    config: &SpectrumConfig,
    rng: &mut R,
) -> ExoResult<Vec<SpectralSample>> {
    config.validate()?;

    let spectrum = (0..config.point_count())
        .map(|k| {
            let wavelength_um = config.start_um + k as f64 * config.step_um;
            let flux = absorbed_flux(wavelength_um)
                + (rng.gen::<f64>() - 0.5) * config.noise_amplitude;
            SpectralSample {
                wavelength_um,
                flux,
                transmission: flux * 100.0,
            }
        })
        .collect();

    Ok(spectrum)
}

/// Lines whose centre sample dips below `threshold`
pub fn detected_lines(spectrum: &[SpectralSample], threshold: f64) -> Vec<AbsorptionLine> {
    ABSORPTION_LINES
        .iter()
        .filter(|line| {
            spectrum.iter().any(|s| {
                (s.wavelength_um - line.center_um).abs() < line.half_width_um && s.flux < threshold
            })
        })
        .copied()
        .collect()
}
