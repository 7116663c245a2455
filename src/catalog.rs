// Candidate Catalog
// Exoplanet candidate records, classification and dashboard summaries

use serde::{Deserialize, Serialize};

/// Confidence above which a candidate counts as confirmed
pub const CONFIRMED_THRESHOLD: f64 = 0.8;

/// Confidence below which a candidate is treated as a false positive
pub const CANDIDATE_THRESHOLD: f64 = 0.6;

/// Number of entries in the dashboard's recent-discoveries list
pub const TOP_DISCOVERIES: usize = 5;

/// Smallest planet disc drawn on the orbit canvas (pixels)
pub const MIN_DISPLAY_RADIUS: f64 = 5.0;
const DISPLAY_RADIUS_SCALE: f64 = 8.0;

// =============================================================================
// PLANET TYPE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    #[serde(rename = "Super Earth")]
    SuperEarth,
    #[serde(rename = "Rocky Planet")]
    RockyPlanet,
    Terrestrial,
    #[serde(rename = "Gas Giant")]
    GasGiant,
    #[serde(rename = "Ice Giant")]
    IceGiant,
}

impl PlanetType {
    /// Fill colour used when drawing the planet
    pub fn color(&self) -> &'static str {
        match self {
            PlanetType::RockyPlanet | PlanetType::Terrestrial => "#ef4444",
            PlanetType::SuperEarth => "#10b981",
            PlanetType::GasGiant => "#f59e0b",
            PlanetType::IceGiant => "#06b6d4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanetType::SuperEarth => "Super Earth",
            PlanetType::RockyPlanet => "Rocky Planet",
            PlanetType::Terrestrial => "Terrestrial",
            PlanetType::GasGiant => "Gas Giant",
            PlanetType::IceGiant => "Ice Giant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Confirmed,
    Candidate,
    FalsePositive,
}

impl Classification {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > CONFIRMED_THRESHOLD {
            Classification::Confirmed
        } else if confidence >= CANDIDATE_THRESHOLD {
            Classification::Candidate
        } else {
            Classification::FalsePositive
        }
    }
}

// =============================================================================
// EXOPLANET RECORD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExoplanetData {
    pub id: String,
    pub name: String,
    /// Detection confidence (0.0 - 1.0)
    pub confidence: f64,
    pub planet_type: PlanetType,
    /// Earth radii
    pub radius_earth: f64,
    pub orbital_period_days: f64,
    /// Equilibrium temperature (K)
    pub temperature_k: f64,
    pub habitable_zone: bool,
    pub detection_method: String,
    pub stellar_magnitude: f64,
}

impl ExoplanetData {
    pub fn classification(&self) -> Classification {
        Classification::from_confidence(self.confidence)
    }

    /// Rough mass estimate in Earth masses
    pub fn estimated_mass_earth(&self) -> f64 {
        self.radius_earth.powi(3) * 1.2
    }

    /// m/s²
    pub fn surface_gravity(&self) -> f64 {
        self.radius_earth * 9.8
    }

    /// km/s
    pub fn escape_velocity(&self) -> f64 {
        self.radius_earth * 11.2
    }

    /// Planet disc radius on the orbit canvas (pixels)
    pub fn display_radius(&self) -> f64 {
        (self.radius_earth * DISPLAY_RADIUS_SCALE).max(MIN_DISPLAY_RADIUS)
    }

    pub fn is_transit_detection(&self) -> bool {
        self.detection_method == "Transit"
    }
}

/// Candidates returned by the mock analysis pipeline
pub fn mock_discoveries() -> Vec<ExoplanetData> {
    vec![
        ExoplanetData {
            id: "1".to_string(),
            name: "Kepler-442b".to_string(),
            confidence: 0.92,
            planet_type: PlanetType::SuperEarth,
            radius_earth: 1.34,
            orbital_period_days: 112.3,
            temperature_k: 233.0,
            habitable_zone: true,
            detection_method: "Transit".to_string(),
            stellar_magnitude: 14.76,
        },
        ExoplanetData {
            id: "2".to_string(),
            name: "TOI-715b".to_string(),
            confidence: 0.87,
            planet_type: PlanetType::RockyPlanet,
            radius_earth: 1.55,
            orbital_period_days: 19.3,
            temperature_k: 347.0,
            habitable_zone: false,
            detection_method: "Transit".to_string(),
            stellar_magnitude: 12.43,
        },
        ExoplanetData {
            id: "3".to_string(),
            name: "TRAPPIST-1d".to_string(),
            confidence: 0.95,
            planet_type: PlanetType::Terrestrial,
            radius_earth: 0.77,
            orbital_period_days: 4.05,
            temperature_k: 288.0,
            habitable_zone: true,
            detection_method: "Transit".to_string(),
            stellar_magnitude: 18.8,
        },
    ]
}

pub fn by_classification(
    results: &[ExoplanetData],
    classification: Classification,
) -> Vec<&ExoplanetData> {
    results
        .iter()
        .filter(|p| p.classification() == classification)
        .collect()
}

pub fn transit_detections(results: &[ExoplanetData]) -> Vec<&ExoplanetData> {
    results.iter().filter(|p| p.is_transit_detection()).collect()
}

// =============================================================================
// DASHBOARD SUMMARY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total_analyzed: usize,
    pub confirmed: usize,
    pub habitable: usize,
    pub average_confidence: f64,
    /// Highest-confidence candidates, best first
    pub top_discoveries: Vec<ExoplanetData>,
}

impl CatalogSummary {
    pub fn from_results(results: &[ExoplanetData]) -> Self {
        let total_analyzed = results.len();
        let confirmed = results
            .iter()
            .filter(|p| p.classification() == Classification::Confirmed)
            .count();
        let habitable = results.iter().filter(|p| p.habitable_zone).count();
        let average_confidence = if total_analyzed > 0 {
            results.iter().map(|p| p.confidence).sum::<f64>() / total_analyzed as f64
        } else {
            0.0
        };

        let mut top_discoveries = results.to_vec();
        top_discoveries.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        top_discoveries.truncate(TOP_DISCOVERIES);

        Self {
            total_analyzed,
            confirmed,
            habitable,
            average_confidence,
            top_discoveries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(Classification::from_confidence(0.95), Classification::Confirmed);
        assert_eq!(Classification::from_confidence(0.8), Classification::Candidate);
        assert_eq!(Classification::from_confidence(0.6), Classification::Candidate);
        assert_eq!(Classification::from_confidence(0.59), Classification::FalsePositive);
    }

    #[test]
    fn test_mock_discoveries() {
        let results = mock_discoveries();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "Kepler-442b");
        assert!(results.iter().all(|p| p.is_transit_detection()));
        assert_eq!(transit_detections(&results).len(), 3);
        assert_eq!(by_classification(&results, Classification::Confirmed).len(), 3);
        assert!(by_classification(&results, Classification::FalsePositive).is_empty());
    }

    #[test]
    fn test_derived_properties() {
        let kepler = &mock_discoveries()[0];
        assert!((kepler.estimated_mass_earth() - 1.34f64.powi(3) * 1.2).abs() < 1e-12);
        assert!((kepler.surface_gravity() - 13.132).abs() < 1e-9);
        assert!((kepler.escape_velocity() - 15.008).abs() < 1e-9);
        assert!((kepler.display_radius() - 10.72).abs() < 1e-9);

        let trappist = &mock_discoveries()[2];
        assert!((trappist.display_radius() - 6.16).abs() < 1e-9);

        let tiny = ExoplanetData {
            radius_earth: 0.3,
            ..trappist.clone()
        };
        assert_eq!(tiny.display_radius(), MIN_DISPLAY_RADIUS);
    }

    #[test]
    fn test_summary() {
        let summary = CatalogSummary::from_results(&mock_discoveries());
        assert_eq!(summary.total_analyzed, 3);
        assert_eq!(summary.confirmed, 3);
        assert_eq!(summary.habitable, 2);
        assert!((summary.average_confidence - (0.92 + 0.87 + 0.95) / 3.0).abs() < 1e-12);
        let names: Vec<&str> = summary.top_discoveries.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["TRAPPIST-1d", "Kepler-442b", "TOI-715b"]);
    }

    #[test]
    fn test_summary_of_empty_results() {
        let summary = CatalogSummary::from_results(&[]);
        assert_eq!(summary.total_analyzed, 0);
        assert_eq!(summary.average_confidence, 0.0);
        assert!(summary.top_discoveries.is_empty());
    }

    #[test]
    fn test_summary_keeps_top_five() {
        let base = mock_discoveries()[0].clone();
        let results: Vec<ExoplanetData> = (0..8)
            .map(|i| ExoplanetData {
                id: i.to_string(),
                confidence: 0.5 + i as f64 * 0.05,
                ..base.clone()
            })
            .collect();
        let summary = CatalogSummary::from_results(&results);
        assert_eq!(summary.top_discoveries.len(), TOP_DISCOVERIES);
        assert_eq!(summary.top_discoveries[0].id, "7");
    }

    #[test]
    fn test_planet_type_wire_names() {
        let json = serde_json::to_string(&PlanetType::SuperEarth).unwrap();
        assert_eq!(json, "\"Super Earth\"");
        let parsed: PlanetType = serde_json::from_str("\"Ice Giant\"").unwrap();
        assert_eq!(parsed, PlanetType::IceGiant);
        assert_eq!(parsed.label(), "Ice Giant");
        assert_eq!(PlanetType::Terrestrial.color(), PlanetType::RockyPlanet.color());
    }
}
