use exodiscover::ephemeris::{semi_minor_axis, PHASE_SCALE};
use exodiscover::{
    generate_seeded, mock_discoveries, position, start_session, CatalogSummary, ExoError,
    ManualScheduler, SimulationSession, TransitScenario,
};
use parking_lot::RwLock;
use std::sync::Arc;

#[test]
fn selected_candidate_animates_along_its_ellipse() {
    let summary = CatalogSummary::from_results(&mock_discoveries());
    let planet = summary.top_discoveries[0].clone();

    let session = Arc::new(RwLock::new(
        SimulationSession::new(planet, 600.0, 600.0, 1.5).unwrap(),
    ));
    let scheduler = ManualScheduler::new();
    let handle = start_session(session.clone(), &scheduler);

    session.write().play();
    scheduler.advance(240);
    handle.cancel();

    let frame = session.read().snapshot();
    let a = frame.semi_major_axis;
    let b = semi_minor_axis(a, 0.05);
    let expected = position(240.0, 1.5, a, 0.05);

    assert_eq!(frame.label, "TRAPPIST-1d");
    assert!((frame.position[0] - expected.x).abs() < 1e-6);
    assert!((frame.position[1] - expected.y).abs() < 1e-6);
    let r = (frame.position[0] / a).powi(2) + (frame.position[1] / b).powi(2);
    assert!((r - 1.0).abs() < 1e-9);
    assert!((frame.phase_angle - 240.0 * 1.5 * PHASE_SCALE).abs() < 1e-9);
}

#[test]
fn reset_and_reselect_between_frames() {
    let mut session =
        SimulationSession::new(mock_discoveries()[1].clone(), 800.0, 400.0, 1.0).unwrap();
    session.play();
    for _ in 0..30 {
        session.tick();
    }
    assert!(session.snapshot().phase_angle > 0.0);

    session.reset();
    assert_eq!(session.snapshot().phase_angle, 0.0);
    assert!(!session.snapshot().is_playing);
}

#[test]
fn light_curve_scenario_from_the_chart() {
    let scenario = TransitScenario {
        sample_count: 1000,
        cadence: 0.02,
        transit_depth: 0.01,
        transit_duration_samples: 30,
        noise_amplitude: 0.0,
        inject_transit: true,
    };
    let curve = generate_seeded(&scenario, 2024).unwrap();
    assert_eq!(curve.len(), 1000);
    assert!((curve.samples()[500].flux - 0.99).abs() < 1e-12);
    assert_eq!(curve.samples()[0].flux, 1.0);

    let json = serde_json::to_value(&curve.samples()[500]).unwrap();
    assert!((json["time"].as_f64().unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn invalid_scenario_produces_no_curve() {
    let scenario = TransitScenario {
        transit_depth: 1.2,
        ..TransitScenario::default()
    };
    match generate_seeded(&scenario, 1) {
        Err(ExoError::InvalidParameter { name, .. }) => assert_eq!(name, "transit_depth"),
        other => panic!("expected InvalidParameter, got {other:?}"),
    }
}
