// Mock Analysis Pipeline
// Timed progress sequence that resolves to the hardcoded candidate list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::catalog::{mock_discoveries, ExoplanetData};
use crate::error::{ExoError, ExoResult};

/// Progress percentages reported, in order
pub const PROGRESS_STEPS: [u8; 7] = [10, 25, 40, 60, 75, 90, 100];

pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelescopeSource {
    Tess,
    Kepler,
    Jwst,
    K2,
}

impl TelescopeSource {
    pub fn description(&self) -> &'static str {
        match self {
            TelescopeSource::Tess => "TESS (Transiting Exoplanet Survey Satellite)",
            TelescopeSource::Kepler => "Kepler Space Telescope",
            TelescopeSource::Jwst => "JWST (James Webb Space Telescope)",
            TelescopeSource::K2 => "K2 Mission",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Names of the observation files the user supplied
    pub files: Vec<String>,
    pub telescope: Option<TelescopeSource>,
}

impl AnalysisRequest {
    pub fn validate(&self) -> ExoResult<TelescopeSource> {
        if self.files.is_empty() {
            return Err(ExoError::NoInputFiles);
        }
        self.telescope.ok_or(ExoError::MissingTelescopeSource)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub telescope: TelescopeSource,
    pub file_count: usize,
    pub candidates: Vec<ExoplanetData>,
    pub completed_at: DateTime<Utc>,
}

/// Run the analysis, reporting each progress step after `step_delay`.
///
/// The request is checked before any progress is reported.
pub async fn run_analysis<F>(
    request: &AnalysisRequest,
    step_delay: Duration,
    mut on_progress: F,
) -> ExoResult<AnalysisReport>
where
    F: FnMut(u8),
{
    let telescope = request.validate()?;

    log::info!(
        "event=analysis_start telescope={:?} files={}",
        telescope,
        request.files.len()
    );

    for progress in PROGRESS_STEPS {
        tokio::time::sleep(step_delay).await;
        log::debug!("event=analysis_step progress={}", progress);
        on_progress(progress);
    }

    let candidates = mock_discoveries();
    log::info!(
        "event=analysis_complete candidates={}",
        candidates.len()
    );

    Ok(AnalysisReport {
        telescope,
        file_count: request.files.len(),
        candidates,
        completed_at: Utc::now(),
    })
}
