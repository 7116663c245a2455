// Simulation Session - Orbit animation state for one selected planet
// Owned by the caller and advanced by an injected scheduler

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::ExoplanetData;
use crate::ephemeris::{
    phase_fraction, OrbitalParameters, PlanetState, MAX_SPEED, MIN_SPEED,
};
use crate::error::{ExoError, ExoResult};
use crate::scheduler::{CancelHandle, Scheduler};

/// Simulated time advanced per animation frame
pub const FRAME_TIME_STEP: f64 = 1.0;

/// Clamp a speed multiplier to the slider range. Non-finite values are rejected.
pub fn clamp_speed(speed: f64) -> ExoResult<f64> {
    if speed.is_finite() {
        Ok(speed.clamp(MIN_SPEED, MAX_SPEED))
    } else {
        Err(ExoError::invalid(
            "speed_multiplier",
            format!("must be finite, got {}", speed),
        ))
    }
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, Clone)]
pub struct SimulationSession {
    planet: ExoplanetData,
    params: OrbitalParameters,
    state: PlanetState,
    is_playing: bool,
}

impl SimulationSession {
    /// Start a paused session for `planet`, with its orbit sized to the canvas
    pub fn new(
        planet: ExoplanetData,
        canvas_width: f64,
        canvas_height: f64,
        speed: f64,
    ) -> ExoResult<Self> {
        let params = OrbitalParameters::for_canvas(canvas_width, canvas_height, clamp_speed(speed)?)?;
        log::info!(
            "event=session_start planet={} semi_major_axis={:.1}",
            planet.name,
            params.semi_major_axis
        );

        Ok(Self {
            planet,
            params,
            state: PlanetState::new(),
            is_playing: false,
        })
    }

    pub fn planet(&self) -> &ExoplanetData {
        &self.planet
    }

    pub fn params(&self) -> &OrbitalParameters {
        &self.params
    }

    pub fn state(&self) -> &PlanetState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn speed(&self) -> f64 {
        self.params.speed_multiplier()
    }

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Returns the new playing state
    pub fn toggle_play(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.is_playing
    }

    /// Set the speed multiplier, clamped to [MIN_SPEED, MAX_SPEED]. Returns the applied value.
    pub fn set_speed(&mut self, speed: f64) -> ExoResult<f64> {
        let clamped = clamp_speed(speed)?;
        self.params = self.params.with_speed(clamped)?;
        Ok(clamped)
    }

    /// Back to phase zero, paused
    pub fn reset(&mut self) {
        self.state.reset();
        self.is_playing = false;
    }

    /// Switch to another planet; the orbit restarts from phase zero
    pub fn select(&mut self, planet: ExoplanetData) {
        log::info!("event=session_select planet={}", planet.name);
        self.planet = planet;
        self.reset();
    }

    /// Advance one frame if playing. Returns whether the planet moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_playing {
            return false;
        }
        self.state.advance(FRAME_TIME_STEP, &self.params);
        true
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let phase = self.state.phase_angle;
        FrameSnapshot {
            planet_id: self.planet.id.clone(),
            label: self.planet.name.clone(),
            position: self.state.position(&self.params).to_array(),
            phase_angle: phase,
            phase_percent: phase_fraction(phase) * 100.0,
            elapsed: self.state.elapsed,
            speed: self.speed(),
            is_playing: self.is_playing,
            semi_major_axis: self.params.semi_major_axis,
            semi_minor_axis: self.params.semi_minor_axis(),
            display_radius: self.planet.display_radius(),
            color: self.planet.planet_type.color().to_string(),
            habitable_zone: self.planet.habitable_zone,
            trail: self
                .params
                .trail(phase)
                .iter()
                .map(|p| p.to_array())
                .collect(),
        }
    }
}

// =============================================================================
// SERIALIZABLE FRAME FOR THE DRAWING SURFACE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub planet_id: String,
    pub label: String,
    /// Offset from the star, same units as the axes
    pub position: [f64; 2],
    pub phase_angle: f64,
    pub phase_percent: f64,
    pub elapsed: f64,
    pub speed: f64,
    pub is_playing: bool,
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    pub display_radius: f64,
    pub color: String,
    pub habitable_zone: bool,
    pub trail: Vec<[f64; 2]>,
}

/// Tick `session` on every frame of `scheduler`
pub fn start_session(
    session: Arc<RwLock<SimulationSession>>,
    scheduler: &dyn Scheduler,
) -> CancelHandle {
    scheduler.schedule(Box::new(move || {
        session.write().tick();
    }))
}
