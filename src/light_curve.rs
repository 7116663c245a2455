// Synthetic Flux Generator - Mock transit light curves
// Produces normalized brightness series with an injected transit dip and noise

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{ExoError, ExoResult};

// =============================================================================
// DEFAULT SCENARIO
// =============================================================================

pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// 20 minute cadence, in days
pub const DEFAULT_CADENCE_DAYS: f64 = 0.02;

/// 1% transit depth
pub const DEFAULT_TRANSIT_DEPTH: f64 = 0.01;

pub const DEFAULT_TRANSIT_DURATION_SAMPLES: usize = 30;

pub const DEFAULT_NOISE_AMPLITUDE: f64 = 0.001;

/// Undimmed stellar flux
pub const BASELINE_FLUX: f64 = 1.0;

// =============================================================================
// SAMPLES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightCurveSample {
    /// Days since the start of the series
    pub time: f64,
    /// Normalized flux (1.0 = baseline)
    pub flux: f64,
    /// Noise amplitude applied to every sample
    pub error: f64,
}

/// Generated light curve. Read-only once built; regenerate to change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightCurve {
    samples: Vec<LightCurveSample>,
}

impl LightCurve {
    pub fn samples(&self) -> &[LightCurveSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn fluxes(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.flux)
    }

    /// Samples within `half_width` indices of `center`, clamped to the series
    pub fn window(&self, center: usize, half_width: usize) -> &[LightCurveSample] {
        let start = center.saturating_sub(half_width).min(self.samples.len());
        let end = center
            .saturating_add(half_width)
            .min(self.samples.len())
            .max(start);
        &self.samples[start..end]
    }

    /// Sample with the lowest flux (first one on ties)
    pub fn minimum(&self) -> Option<(usize, &LightCurveSample)> {
        self.samples
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.flux.total_cmp(&b.flux))
    }
}

// =============================================================================
// TRANSIT SCENARIO
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitScenario {
    pub sample_count: usize,
    /// Days between samples
    pub cadence: f64,
    /// Fractional flux drop at mid-transit (0 <= depth < 1)
    pub transit_depth: f64,
    /// Transit length in samples
    pub transit_duration_samples: usize,
    /// Peak-to-peak amplitude of uniform noise
    pub noise_amplitude: f64,
    pub inject_transit: bool,
}

impl Default for TransitScenario {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            cadence: DEFAULT_CADENCE_DAYS,
            transit_depth: DEFAULT_TRANSIT_DEPTH,
            transit_duration_samples: DEFAULT_TRANSIT_DURATION_SAMPLES,
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            inject_transit: true,
        }
    }
}

impl TransitScenario {
    /// Same series without the transit, for comparison plots
    pub fn without_transit(&self) -> Self {
        Self {
            inject_transit: false,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> ExoResult<()> {
        if self.sample_count == 0 {
            return Err(ExoError::invalid(
                "sample_count",
                "must be greater than zero",
            ));
        }
        if !(self.cadence.is_finite() && self.cadence > 0.0) {
            return Err(ExoError::invalid(
                "cadence",
                format!("must be a positive finite interval, got {}", self.cadence),
            ));
        }
        // Last timestamp must stay finite or the series stops increasing
        if !((self.sample_count - 1) as f64 * self.cadence).is_finite() {
            return Err(ExoError::invalid(
                "cadence",
                format!(
                    "{} samples at cadence {} overflow the time axis",
                    self.sample_count, self.cadence
                ),
            ));
        }
        if !(0.0..1.0).contains(&self.transit_depth) {
            return Err(ExoError::invalid(
                "transit_depth",
                format!("must be in [0, 1), got {}", self.transit_depth),
            ));
        }
        if self.transit_duration_samples >= self.sample_count {
            return Err(ExoError::invalid(
                "transit_duration_samples",
                format!(
                    "must be less than sample_count ({}), got {}",
                    self.sample_count, self.transit_duration_samples
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

    /// Series midpoint in sample-index units
    pub fn midpoint(&self) -> f64 {
        self.sample_count as f64 / 2.0
    }

    /// Flux removed by the transit at sample `index` (half-ellipse profile)
    pub fn transit_dip(&self, index: usize) -> f64 {
        if !self.inject_transit {
            return 0.0;
        }
        let half_duration = self.transit_duration_samples as f64 / 2.0;
        let offset = index as f64 - self.midpoint();
        if offset.abs() < half_duration {
            let phase = offset / half_duration;
            self.transit_depth * (1.0 - phase * phase).sqrt()
        } else {
            0.0
        }
    }

    pub fn transit_duration_days(&self) -> f64 {
        self.transit_duration_samples as f64 * self.cadence
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// Generate a light curve, drawing noise from `rng`.
///
/// Parameters are validated before any sample is produced.
pub fn generate<R: Rng + ?Sized>(scenario: &TransitScenario, rng: &mut R) -> ExoResult<LightCurve> {
    scenario.validate()?;

    let samples = (0..scenario.sample_count)
        .map(|i| {
            let noise = (rng.gen::<f64>() - 0.5) * scenario.noise_amplitude;
            let flux = BASELINE_FLUX + noise - scenario.transit_dip(i);
            LightCurveSample {
                time: i as f64 * scenario.cadence,
                flux,
                error: scenario.noise_amplitude,
            }
        })
        .collect();

    log::debug!(
        "event=light_curve_generated samples={} inject_transit={} depth={}",
        scenario.sample_count,
        scenario.inject_transit,
        scenario.transit_depth
    );

    Ok(LightCurve { samples })
}

/// Reproducible generation from a fixed seed
pub fn generate_seeded(scenario: &TransitScenario, seed: u64) -> ExoResult<LightCurve> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(scenario, &mut rng)
}

// =============================================================================
// TRANSIT SUMMARY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitSummary {
    pub min_flux: f64,
    pub min_time: f64,
    /// Observed fractional depth (baseline - min flux)
    pub depth: f64,
    /// Planet/star radius ratio, sqrt(depth)
    pub radius_ratio: f64,
    pub duration_days: f64,
}

impl TransitSummary {
    pub fn from_curve(curve: &LightCurve, scenario: &TransitScenario) -> Option<Self> {
        let (_, min) = curve.minimum()?;
        let depth = (BASELINE_FLUX - min.flux).max(0.0);
        Some(Self {
            min_flux: min.flux,
            min_time: min.time,
            depth,
            radius_ratio: depth.sqrt(),
            duration_days: scenario.transit_duration_days(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
