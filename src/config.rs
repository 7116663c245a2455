// Configuration - Environment and .env driven settings

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::analysis::DEFAULT_STEP_DELAY;
use crate::error::{ExoError, ExoResult};
use crate::light_curve::TransitScenario;
use crate::logging::default_log_level;
use crate::scheduler::DEFAULT_FRAME_INTERVAL;

const ENV_PREFIX: &str = "EXO_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExoConfig {
    pub log_level: String,
    pub frame_interval_ms: u64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub speed: f64,
    /// Fixed seed for all noise sources; `None` draws from the thread RNG
    pub seed: Option<u64>,
    pub analysis_step_delay_ms: u64,
    pub light_curve: TransitScenario,
}

impl Default for ExoConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL.as_millis() as u64,
            canvas_width: 800.0,
            canvas_height: 400.0,
            speed: 1.0,
            seed: None,
            analysis_step_delay_ms: DEFAULT_STEP_DELAY.as_millis() as u64,
            light_curve: TransitScenario::default(),
        }
    }
}

impl ExoConfig {
    /// Load `.env` if present, then read `EXO_*` variables from the process environment
    pub fn from_env() -> ExoResult<Self> {
        if let Ok(path) = dotenv::dotenv() {
            log::debug!("event=dotenv_loaded path={}", path.display());
        }
        Self::from_vars(std::env::vars())
    }

    /// Read settings from a dotenv file without touching the process environment
    pub fn from_dotenv_file(path: impl AsRef<Path>) -> ExoResult<Self> {
        let path = path.as_ref();
        let iter = dotenv::from_path_iter(path)
            .map_err(|e| ExoError::Config(format!("failed to open {}: {}", path.display(), e)))?;
        let vars = iter
            .collect::<Result<Vec<(String, String)>, _>>()
            .map_err(|e| ExoError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
        Self::from_vars(vars)
    }

    /// Apply `EXO_*` overrides on top of the defaults. Unknown keys are ignored.
    pub fn from_vars<I>(vars: I) -> ExoResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.trim();
            match name {
                "LOG_LEVEL" => config.log_level = value.to_string(),
                "FRAME_INTERVAL_MS" => config.frame_interval_ms = parse(&key, value)?,
                "CANVAS_WIDTH" => config.canvas_width = parse(&key, value)?,
                "CANVAS_HEIGHT" => config.canvas_height = parse(&key, value)?,
                "SPEED" => config.speed = parse(&key, value)?,
                "SEED" => config.seed = Some(parse(&key, value)?),
                "ANALYSIS_STEP_DELAY_MS" => config.analysis_step_delay_ms = parse(&key, value)?,
                "SAMPLE_COUNT" => config.light_curve.sample_count = parse(&key, value)?,
                "CADENCE" => config.light_curve.cadence = parse(&key, value)?,
                "TRANSIT_DEPTH" => config.light_curve.transit_depth = parse(&key, value)?,
                "TRANSIT_DURATION" => {
                    config.light_curve.transit_duration_samples = parse(&key, value)?
                }
                "NOISE" => config.light_curve.noise_amplitude = parse(&key, value)?,
                "INJECT_TRANSIT" => config.light_curve.inject_transit = parse(&key, value)?,
                _ => log::debug!("event=config_key_ignored key={}", key),
            }
        }

        Ok(config)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn analysis_step_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_step_delay_ms)
    }
}

fn parse<T>(key: &str, value: &str) -> ExoResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ExoError::Config(format!("{}={:?}: {}", key, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = ExoConfig::from_vars(Vec::new()).unwrap();
        assert_eq!(config, ExoConfig::default());
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert_eq!(config.analysis_step_delay(), Duration::from_millis(800));
        assert_eq!(config.light_curve.sample_count, 1000);
    }

    #[test]
    fn test_overrides_applied() {
        let config = ExoConfig::from_vars(vars(&[
            ("EXO_SPEED", "2.5"),
            ("EXO_SEED", "42"),
            ("EXO_SAMPLE_COUNT", "200"),
            ("EXO_INJECT_TRANSIT", "false"),
            ("EXO_LOG_LEVEL", "warn"),
            ("PATH", "/usr/bin"),
            ("EXO_UNKNOWN", "1"),
        ]))
        .unwrap();

        assert_eq!(config.speed, 2.5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.light_curve.sample_count, 200);
        assert!(!config.light_curve.inject_transit);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let err = ExoConfig::from_vars(vars(&[("EXO_CADENCE", "fast")])).unwrap_err();
        match err {
            ExoError::Config(msg) => assert!(msg.contains("EXO_CADENCE")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_dotenv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "EXO_CANVAS_WIDTH=1024").unwrap();
        writeln!(file, "EXO_NOISE=0").unwrap();
        file.flush().unwrap();

        let config = ExoConfig::from_dotenv_file(file.path()).unwrap();
        assert_eq!(config.canvas_width, 1024.0);
        assert_eq!(config.light_curve.noise_amplitude, 0.0);
        assert_eq!(config.canvas_height, 400.0);
    }

    #[test]
    fn test_missing_dotenv_file() {
        let err = ExoConfig::from_dotenv_file("/nonexistent/exodiscover.env").unwrap_err();
        assert!(matches!(err, ExoError::Config(_)));
    }
}
