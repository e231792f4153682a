//! Incident records and the simulated incident reporter

use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::time::Duration;

use super::map_overlay::GeoCoord;
use super::types::{clock_label, IncidentCategory, IncidentId, Severity};

/// A simulated traffic event, visible for a fixed time after creation
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub id: IncidentId,
    pub location: String,
    pub severity: Severity,
    pub category: IncidentCategory,
    /// Simulated time the incident was recorded at
    pub created_at: Duration,
    /// Where the incident happened, for the map overlay
    pub coordinate: Option<GeoCoord>,
}

impl Incident {
    /// One-line description as shown in the incident panel
    pub fn summary(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.category,
            self.location,
            self.severity,
            clock_label(self.created_at)
        )
    }
}

/// Everything needed to record an incident, minus id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentReport {
    pub location: String,
    pub severity: Severity,
    pub category: IncidentCategory,
    pub coordinate: Option<GeoCoord>,
}

impl IncidentReport {
    pub fn new(
        location: impl Into<String>,
        severity: Severity,
        category: IncidentCategory,
    ) -> Self {
        Self {
            location: location.into(),
            severity,
            category,
            coordinate: None,
        }
    }

    pub fn at(mut self, coordinate: GeoCoord) -> Self {
        self.coordinate = Some(coordinate);
        self
    }
}

/// Produces reports for the "simulate incident" action
pub trait IncidentSource {
    fn next_report(&mut self) -> IncidentReport;
}

/// Number of distinct "Location N" labels the generator picks from
pub const LOCATION_COUNT: u32 = 100;

/// Random incident reporter
pub struct IncidentGenerator {
    /// Optional seeded RNG for reproducible runs
    rng: Option<StdRng>,
    /// Center and half-width (degrees) of the area coordinates are drawn from
    area: Option<(GeoCoord, f64)>,
}

impl Default for IncidentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IncidentGenerator {
    pub fn new() -> Self {
        Self { rng: None, area: None }
    }

    /// Create a generator with a seeded RNG for reproducible runs
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
            area: None,
        }
    }

    /// Also attach a coordinate within `radius_deg` of `center` to each report
    pub fn with_area(mut self, center: GeoCoord, radius_deg: f64) -> Result<Self> {
        ensure!(
            center.lat.is_finite() && center.lng.is_finite(),
            "area center must be finite, got ({}, {})",
            center.lat,
            center.lng
        );
        ensure!(radius_deg.is_finite(), "area radius must be finite, got {}", radius_deg);
        self.area = Some((center, radius_deg.abs()));
        Ok(self)
    }

    fn random_index(&mut self, len: usize) -> usize {
        match &mut self.rng {
            Some(rng) => rng.random_range(0..len),
            None => rand::rng().random_range(0..len),
        }
    }

    fn random_offset(&mut self, radius: f64) -> f64 {
        if radius == 0.0 {
            return 0.0;
        }
        match &mut self.rng {
            Some(rng) => rng.random_range(-radius..=radius),
            None => rand::rng().random_range(-radius..=radius),
        }
    }
}

impl IncidentSource for IncidentGenerator {
    fn next_report(&mut self) -> IncidentReport {
        let location = format!("Location {}", self.random_index(LOCATION_COUNT as usize));
        let severity = Severity::ALL[self.random_index(Severity::ALL.len())];
        let category = IncidentCategory::ALL[self.random_index(IncidentCategory::ALL.len())];

        let mut report = IncidentReport::new(location, severity, category);
        if let Some((center, radius)) = self.area {
            let lat = center.lat + self.random_offset(radius);
            let lng = center.lng + self.random_offset(radius);
            report = report.at(GeoCoord::new(lat, lng));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_generators_agree() {
        let mut a = IncidentGenerator::new_with_seed(7);
        let mut b = IncidentGenerator::new_with_seed(7);
        for _ in 0..20 {
            assert_eq!(a.next_report(), b.next_report());
        }
    }

    #[test]
    fn locations_are_in_range() {
        let mut generator = IncidentGenerator::new_with_seed(1);
        for _ in 0..200 {
            let report = generator.next_report();
            let n: u32 = report
                .location
                .strip_prefix("Location ")
                .and_then(|s| s.parse().ok())
                .expect("location label");
            assert!(n < LOCATION_COUNT);
            assert!(report.coordinate.is_none());
        }
    }

    #[test]
    fn area_bounds_coordinates() {
        let center = GeoCoord::new(37.7749, -122.4194);
        let mut generator = IncidentGenerator::new_with_seed(3)
            .with_area(center, 0.015)
            .unwrap();
        for _ in 0..200 {
            let coord = generator.next_report().coordinate.expect("coordinate");
            assert!((coord.lat - center.lat).abs() <= 0.015 + 1e-9);
            assert!((coord.lng - center.lng).abs() <= 0.015 + 1e-9);
        }
    }

    #[test]
    fn non_finite_area_is_rejected() {
        let center = GeoCoord::new(37.7749, -122.4194);
        for radius in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(IncidentGenerator::new().with_area(center, radius).is_err());
        }
        let nowhere = GeoCoord::new(f64::NAN, 0.0);
        assert!(IncidentGenerator::new().with_area(nowhere, 0.01).is_err());
    }

    #[test]
    fn summary_matches_panel_format() {
        let incident = Incident {
            id: IncidentId(42),
            location: "Location 9".to_string(),
            severity: Severity::High,
            category: IncidentCategory::Breakdown,
            created_at: Duration::from_secs(65),
            coordinate: None,
        };
        assert_eq!(incident.summary(), "Breakdown | Location 9 | High | 00:01:05");
    }
}
