// ExoDiscover demo host
// Runs the mock analysis, builds the charts' data and animates one orbit headlessly

use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::sync::Arc;

use exodiscover::{
    generate, generate_spectrum, init_logging, run_analysis, start_session, AnalysisRequest,
    CatalogSummary, ExoConfig, ExoResult, FrameScheduler, SimulationSession, SpectrumConfig,
    TelescopeSource, TransitSummary,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        log::error!("event=demo_failed error={}", err);
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> ExoResult<()> {
    let config = ExoConfig::from_env()?;
    init_logging(&config.log_level)?;

    let request = AnalysisRequest {
        files: vec!["kplr011904151_lc.fits".to_string()],
        telescope: Some(TelescopeSource::Kepler),
    };
    let report = run_analysis(&request, config.analysis_step_delay(), |progress| {
        log::info!("event=analysis_progress progress={}", progress);
    })
    .await?;
    let summary = CatalogSummary::from_results(&report.candidates);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let curve = generate(&config.light_curve, &mut rng)?;
    let transit = TransitSummary::from_curve(&curve, &config.light_curve);
    let spectrum = generate_spectrum(&SpectrumConfig::default(), &mut rng)?;

    let Some(planet) = summary.top_discoveries.first().cloned() else {
        log::warn!("event=no_candidates");
        return Ok(());
    };
    let session = Arc::new(RwLock::new(SimulationSession::new(
        planet,
        config.canvas_width,
        config.canvas_height,
        config.speed,
    )?));
    session.write().play();

    let scheduler = FrameScheduler::new(config.frame_interval());
    let handle = start_session(session.clone(), &scheduler);
    tokio::time::sleep(config.frame_interval() * 60).await;
    handle.cancel();

    let frame = session.read().snapshot();
    let output = json!({
        "summary": summary,
        "transit": transit,
        "light_curve_samples": curve.len(),
        "spectrum_points": spectrum.len(),
        "frame": frame,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
