// ExoDiscover - Orbit & Transit simulation core
// Ephemeris, synthetic light curves and the session plumbing a renderer drives

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod light_curve;
pub mod logging;
pub mod scheduler;
pub mod session;
pub mod spectrum;

pub use analysis::{run_analysis, AnalysisReport, AnalysisRequest, TelescopeSource};
pub use catalog::{mock_discoveries, CatalogSummary, Classification, ExoplanetData, PlanetType};
pub use config::ExoConfig;
pub use ephemeris::{position, OrbitalParameters, PlanetState, Vector2};
pub use error::{ExoError, ExoResult};
pub use light_curve::{
    generate, generate_seeded, LightCurve, LightCurveSample, TransitScenario, TransitSummary,
};
pub use logging::{default_log_level, init_logging};
pub use scheduler::{CancelHandle, FrameScheduler, ManualScheduler, Scheduler};
pub use session::{start_session, FrameSnapshot, SimulationSession};
pub use spectrum::{generate_spectrum, SpectralSample, SpectrumConfig};
