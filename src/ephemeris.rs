// Ephemeris Calculator - Parametric orbit kinematics
// Computes a planet's offset from its host star along a display ellipse

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::error::{ExoError, ExoResult};

// =============================================================================
// ORBIT CONSTANTS
// =============================================================================

/// Radians of phase advanced per unit of simulated time at 1x speed
pub const PHASE_SCALE: f64 = 0.01;

/// Eccentricity used for every rendered orbit
pub const DEFAULT_ECCENTRICITY: f64 = 0.05;

/// Semi-major axis as a fraction of the smaller canvas dimension
pub const CANVAS_AXIS_FRACTION: f64 = 0.3;

/// Speed slider bounds
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 5.0;

/// Orbital trail: number of points and phase spacing between them (radians)
pub const TRAIL_POINTS: usize = 50;
pub const TRAIL_STEP: f64 = 0.1;

// =============================================================================
// 2D VECTOR MATHEMATICS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn sub(&self, other: &Vector2) -> Vector2 {
        Vector2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

// =============================================================================
// PHASE HELPERS
// =============================================================================

/// Wrap an angle into [0, 2π)
pub fn wrap_phase(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Phase angle reached after `time` units at the given speed multiplier
pub fn phase_angle(time: f64, speed_multiplier: f64) -> f64 {
    wrap_phase(time * speed_multiplier * PHASE_SCALE)
}

/// Fraction of a full orbit completed, in [0, 1)
pub fn phase_fraction(phase: f64) -> f64 {
    wrap_phase(phase) / TAU
}

pub fn semi_minor_axis(semi_major_axis: f64, eccentricity: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt()
}

/// Planet offset from the star focus after `time` units.
///
/// This is a constant-angular-speed ellipse, not a Kepler solver; it is only
/// physically accurate as eccentricity approaches zero. Inputs are expected
/// to be within their constrained ranges (see [`OrbitalParameters::new`]).
pub fn position(time: f64, speed_multiplier: f64, axis_length: f64, eccentricity: f64) -> Vector2 {
    let phase = phase_angle(time, speed_multiplier);
    Vector2::new(
        axis_length * phase.cos(),
        semi_minor_axis(axis_length, eccentricity) * phase.sin(),
    )
}

// =============================================================================
// ORBITAL PARAMETERS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalParameters {
    /// Semi-major axis (display units, usually pixels)
    pub semi_major_axis: f64,
    /// Eccentricity (0 <= e < 1)
    pub eccentricity: f64,
    /// Radians per unit simulated time
    pub angular_speed: f64,
}

impl OrbitalParameters {
    pub fn new(semi_major_axis: f64, eccentricity: f64, speed_multiplier: f64) -> ExoResult<Self> {
        if !(semi_major_axis.is_finite() && semi_major_axis > 0.0) {
            return Err(ExoError::invalid(
                "semi_major_axis",
                format!("must be a positive finite length, got {}", semi_major_axis),
            ));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ExoError::invalid(
                "eccentricity",
                format!("must be in [0, 1), got {}", eccentricity),
            ));
        }
        let angular_speed = validate_speed(speed_multiplier)? * PHASE_SCALE;

        Ok(Self {
            semi_major_axis,
            eccentricity,
            angular_speed,
        })
    }

    /// Orbit sized to a drawing surface, centred on the star
    pub fn for_canvas(width: f64, height: f64, speed_multiplier: f64) -> ExoResult<Self> {
        Self::new(
            width.min(height) * CANVAS_AXIS_FRACTION,
            DEFAULT_ECCENTRICITY,
            speed_multiplier,
        )
    }

    pub fn with_speed(&self, speed_multiplier: f64) -> ExoResult<Self> {
        Ok(Self {
            angular_speed: validate_speed(speed_multiplier)? * PHASE_SCALE,
            ..*self
        })
    }

    pub fn semi_minor_axis(&self) -> f64 {
        semi_minor_axis(self.semi_major_axis, self.eccentricity)
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.angular_speed / PHASE_SCALE
    }

    /// Simulated time units for one full revolution
    pub fn period(&self) -> f64 {
        TAU / self.angular_speed
    }

    pub fn position_at_phase(&self, phase: f64) -> Vector2 {
        Vector2::new(
            self.semi_major_axis * phase.cos(),
            self.semi_minor_axis() * phase.sin(),
        )
    }

    pub fn position(&self, time: f64) -> Vector2 {
        self.position_at_phase(wrap_phase(time * self.angular_speed))
    }

    /// Trail of past positions, newest first
    pub fn trail(&self, phase: f64) -> Vec<Vector2> {
        (0..TRAIL_POINTS)
            .map(|i| self.position_at_phase(phase - i as f64 * TRAIL_STEP))
            .collect()
    }
}

fn validate_speed(speed_multiplier: f64) -> ExoResult<f64> {
    if speed_multiplier.is_finite() && speed_multiplier > 0.0 {
        Ok(speed_multiplier)
    } else {
        Err(ExoError::invalid(
            "speed_multiplier",
            format!("must be positive, got {}", speed_multiplier),
        ))
    }
}

// =============================================================================
// PLANET STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PlanetState {
    /// Current phase angle, wrapped into [0, 2π)
    pub phase_angle: f64,
    /// Simulated time units since creation or the last reset
    pub elapsed: f64,
}

impl PlanetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `dt` units of simulated time at the orbit's angular speed
    pub fn advance(&mut self, dt: f64, params: &OrbitalParameters) {
        self.elapsed += dt;
        self.phase_angle = wrap_phase(self.phase_angle + dt * params.angular_speed);
    }

    pub fn position(&self, params: &OrbitalParameters) -> Vector2 {
        params.position_at_phase(self.phase_angle)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_semi_minor_axis_never_exceeds_major() {
        for e in [0.0, 0.05, 0.5, 0.99] {
            let b = semi_minor_axis(100.0, e);
            assert!(b <= 100.0);
        }
        assert!((semi_minor_axis(100.0, 0.0) - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_position_stays_on_ellipse() {
        let a = 120.0;
        let e = 0.05;
        let b = semi_minor_axis(a, e);
        for step in 0..500 {
            let t = step as f64 * 7.3;
            for speed in [0.1, 1.0, 2.7, 5.0] {
                let p = position(t, speed, a, e);
                let r = (p.x / a).powi(2) + (p.y / b).powi(2);
                assert!((r - 1.0).abs() < 1e-9, "off ellipse at t={} s={}: {}", t, speed, r);
            }
        }
    }

    #[test]
    fn test_position_is_periodic() {
        let a = 90.0;
        let e = 0.3;
        for speed in [0.1, 1.0, 3.3] {
            let period = TAU / (speed * PHASE_SCALE);
            for t in [0.0, 12.5, 400.0, 1234.5] {
                let p1 = position(t, speed, a, e);
                let p2 = position(t + period, speed, a, e);
                assert!(p1.sub(&p2).magnitude() < 1e-6);
            }
        }
    }

    #[test]
    fn test_position_at_time_zero_is_periapsis_axis() {
        let p = position(0.0, 1.0, 100.0, 0.05);
        assert!((p.x - 100.0).abs() < TOLERANCE);
        assert!(p.y.abs() < TOLERANCE);
    }

    #[test]
    fn test_quarter_orbit_reaches_minor_axis() {
        let params = OrbitalParameters::new(100.0, 0.05, 1.0).unwrap();
        let p = params.position(params.period() / 4.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - params.semi_minor_axis()).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_phase_range() {
        assert!((wrap_phase(3.0 * PI) - PI).abs() < TOLERANCE);
        assert!((wrap_phase(-PI / 2.0) - 1.5 * PI).abs() < TOLERANCE);
        assert_eq!(wrap_phase(0.0), 0.0);
        assert!(wrap_phase(-1e-18) < TAU);
    }

    #[test]
    fn test_phase_fraction() {
        assert!((phase_fraction(PI) - 0.5).abs() < TOLERANCE);
        assert!((phase_fraction(TAU + PI / 2.0) - 0.25).abs() < TOLERANCE);
    }

    #[test]
    fn test_parameters_validation() {
        assert!(OrbitalParameters::new(0.0, 0.05, 1.0).is_err());
        assert!(OrbitalParameters::new(-5.0, 0.05, 1.0).is_err());
        assert!(OrbitalParameters::new(f64::NAN, 0.05, 1.0).is_err());
        assert!(OrbitalParameters::new(100.0, 1.0, 1.0).is_err());
        assert!(OrbitalParameters::new(100.0, -0.1, 1.0).is_err());
        assert!(OrbitalParameters::new(100.0, 0.05, 0.0).is_err());

        let err = OrbitalParameters::new(100.0, 1.2, 1.0).unwrap_err();
        assert_eq!(err.parameter(), Some("eccentricity"));
    }

    #[test]
    fn test_for_canvas_uses_smaller_side() {
        let params = OrbitalParameters::for_canvas(800.0, 400.0, 1.0).unwrap();
        assert!((params.semi_major_axis - 120.0).abs() < TOLERANCE);
        assert!((params.eccentricity - DEFAULT_ECCENTRICITY).abs() < TOLERANCE);
        assert!((params.angular_speed - PHASE_SCALE).abs() < TOLERANCE);
    }

    #[test]
    fn test_with_speed_keeps_geometry() {
        let params = OrbitalParameters::for_canvas(500.0, 500.0, 1.0).unwrap();
        let faster = params.with_speed(2.5).unwrap();
        assert_eq!(faster.semi_major_axis, params.semi_major_axis);
        assert!((faster.speed_multiplier() - 2.5).abs() < TOLERANCE);
        assert!(params.with_speed(-1.0).is_err());
    }

    #[test]
    fn test_planet_state_matches_closed_form() {
        let params = OrbitalParameters::new(100.0, 0.05, 1.7).unwrap();
        let mut state = PlanetState::new();
        for _ in 0..1000 {
            state.advance(1.0, &params);
        }
        let expected = params.position(1000.0);
        assert!(state.position(&params).sub(&expected).magnitude() < 1e-6);
        assert!((state.elapsed - 1000.0).abs() < TOLERANCE);
        assert!(state.phase_angle >= 0.0 && state.phase_angle < TAU);
    }

    #[test]
    fn test_planet_state_reset() {
        let params = OrbitalParameters::new(100.0, 0.05, 1.0).unwrap();
        let mut state = PlanetState::new();
        state.advance(42.0, &params);
        state.reset();
        assert_eq!(state, PlanetState::default());
    }

    #[test]
    fn test_trail_starts_at_current_position() {
        let params = OrbitalParameters::new(100.0, 0.05, 1.0).unwrap();
        let trail = params.trail(1.0);
        assert_eq!(trail.len(), TRAIL_POINTS);
        assert_eq!(trail[0], params.position_at_phase(1.0));
        let last = params.position_at_phase(1.0 - 49.0 * TRAIL_STEP);
        assert!(trail[49].sub(&last).magnitude() < TOLERANCE);
    }
}
