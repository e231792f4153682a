//! Dashboard behavior test
//!
//! Drives the public simulation API through the incident lifecycle and the
//! alert override, the way the UI and headless runner do.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use traffic_watch::simulation::{
    Axis, Dashboard, Incident, IncidentCategory, IncidentGenerator, IncidentRegister,
    IncidentReport, IncidentSink, IncidentSource, MapOverlay, MapProjection, MovingObject,
    Position, RegisterConfig, Rgb, SceneAnimator, Severity, TrafficStatus, DEFAULT_MAP_CENTER,
};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

/// Hands out prepared reports in order
struct ScriptedSource(Vec<IncidentReport>);

impl IncidentSource for ScriptedSource {
    fn next_report(&mut self) -> IncidentReport {
        self.0.remove(0)
    }
}

/// Records every render and status change for inspection
#[derive(Clone, Default)]
struct RecordingSink {
    renders: Arc<Mutex<Vec<Vec<Incident>>>>,
    statuses: Arc<Mutex<Vec<TrafficStatus>>>,
}

impl IncidentSink for RecordingSink {
    fn render(&mut self, incidents: &[Incident]) {
        self.renders.lock().unwrap().push(incidents.to_vec());
    }

    fn status_changed(&mut self, status: TrafficStatus) {
        self.statuses.lock().unwrap().push(status);
    }
}

#[test]
fn test_bounded_coordinate_never_escapes() {
    let mut scene = SceneAnimator::demo().unwrap();
    scene
        .add_vehicle(Position::new(0.0, 0.0, 0.0), Axis::Z, -0.37, Rgb(0xffffff))
        .unwrap();

    for _ in 0..10_000 {
        scene.tick();
        for vehicle in &scene.vehicles {
            let c = vehicle.bounded_coordinate();
            assert!(c >= vehicle.lower && c <= vehicle.upper, "escaped to {c}");
        }
    }
}

#[test]
fn test_custom_bounds_wrap() {
    let mut object =
        MovingObject::new(Position::new(2.0, 0.0, 9.0), Axis::Z, 1.5, 0.0, 10.0, Rgb(0)).unwrap();
    object.update();
    assert_eq!(object.position.z, 0.0);
    assert_eq!(object.position.x, 2.0);
}

#[test]
fn test_record_then_congested() {
    let mut register = IncidentRegister::default();
    register.record_incident("Location 12", Severity::Low, IncidentCategory::Breakdown);
    assert_eq!(register.current_status(), TrafficStatus::Congested);
}

#[test]
fn test_expire_last_incident_restores_normal_and_is_idempotent() {
    let mut register = IncidentRegister::default();
    let incident = register.record_incident("Location 40", Severity::Medium, IncidentCategory::Obstruction);

    assert!(register.expire(incident.id));
    assert_eq!(register.current_status(), TrafficStatus::Normal);
    assert!(!register.expire(incident.id));
    assert_eq!(register.current_status(), TrafficStatus::Normal);
}

#[test]
fn test_alert_reverts_to_derived_status() {
    let mut register = IncidentRegister::default();
    register.acknowledge_alert();
    assert_eq!(register.displayed_status(), TrafficStatus::Alerted);

    register.advance(Duration::from_millis(2_999));
    assert_eq!(register.displayed_status(), TrafficStatus::Alerted);
    register.advance(Duration::from_millis(1));
    assert_eq!(register.displayed_status(), register.current_status());
    assert_eq!(register.displayed_status(), TrafficStatus::Normal);
}

#[test]
fn test_second_acknowledge_does_not_extend_alert() {
    let mut register = IncidentRegister::default();
    register.acknowledge_alert();
    register.advance(secs(2));
    register.acknowledge_alert();

    register.advance(secs(1));
    assert_eq!(register.displayed_status(), TrafficStatus::Normal);
}

#[test]
fn test_scenario_incident_auto_expires_at_twenty_seconds() {
    let mut register = IncidentRegister::default();
    register.record_incident("Location 1", Severity::High, IncidentCategory::Accident);
    assert_eq!(register.displayed_status(), TrafficStatus::Congested);

    register.advance(secs(19));
    assert_eq!(register.displayed_status(), TrafficStatus::Congested);
    register.advance(secs(1));
    assert_eq!(register.displayed_status(), TrafficStatus::Normal);
    assert!(register.is_empty());
}

#[test]
fn test_scenario_alert_while_congested() {
    let mut register = IncidentRegister::default();
    register.record_incident("Location 1", Severity::High, IncidentCategory::Accident);

    register.advance(secs(5));
    register.acknowledge_alert();
    assert_eq!(register.displayed_status(), TrafficStatus::Alerted);

    register.advance(Duration::from_millis(2_999));
    assert_eq!(register.displayed_status(), TrafficStatus::Alerted);

    register.advance(Duration::from_millis(1));
    assert_eq!(register.now(), secs(8));
    assert_eq!(register.displayed_status(), TrafficStatus::Congested);
}

#[test]
fn test_sink_sees_ordered_list_after_each_mutation() {
    let mut register = IncidentRegister::default();
    let sink = RecordingSink::default();
    register.subscribe(sink.clone());

    let a = register.record_incident("Location 1", Severity::High, IncidentCategory::Accident);
    register.advance(secs(1));
    let b = register.record_incident("Location 2", Severity::Low, IncidentCategory::Breakdown);
    register.advance(secs(19));
    register.advance(secs(1));

    let renders = sink.renders.lock().unwrap();
    let ids: Vec<Vec<_>> = renders
        .iter()
        .map(|frame| frame.iter().map(|i| i.id).collect())
        .collect();
    assert_eq!(
        ids,
        vec![vec![], vec![a.id], vec![a.id, b.id], vec![b.id], vec![]]
    );

    let statuses = sink.statuses.lock().unwrap();
    assert_eq!(
        *statuses,
        vec![
            TrafficStatus::Normal,
            TrafficStatus::Congested,
            TrafficStatus::Normal
        ]
    );
}

#[test]
fn test_short_ttl_config() {
    let mut register = IncidentRegister::new(RegisterConfig {
        incident_ttl: secs(2),
        alert_duration: secs(1),
    });
    register.record_incident("Location 3", Severity::Low, IncidentCategory::Accident);
    register.acknowledge_alert();

    register.advance(secs(1));
    assert_eq!(register.displayed_status(), TrafficStatus::Congested);
    register.advance(secs(1));
    assert_eq!(register.displayed_status(), TrafficStatus::Normal);
}

#[test]
fn test_dashboard_with_overlay_places_markers() {
    let mut dashboard = Dashboard::create_demo(RegisterConfig::default())
        .unwrap()
        .with_overlay(MapOverlay::new(
            MapProjection::new(DEFAULT_MAP_CENTER, 1000.0).unwrap(),
        ));

    let mut source = ScriptedSource(vec![
        IncidentReport::new("Location 1", Severity::High, IncidentCategory::Accident)
            .at(DEFAULT_MAP_CENTER),
        IncidentReport::new("Location 2", Severity::Low, IncidentCategory::Breakdown),
    ]);
    let first = dashboard.simulate_incident(&mut source);
    dashboard.frame(secs(1));
    dashboard.simulate_incident(&mut source);

    let markers = dashboard.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].id, first.id);
    assert_eq!(markers[0].severity, Severity::High);

    for _ in 0..19 {
        dashboard.frame(secs(1));
    }
    assert!(dashboard.markers().is_empty());
    assert_eq!(dashboard.status(), TrafficStatus::Congested);
}

#[test]
fn test_seeded_generator_is_reproducible_through_dashboard() {
    let run = |seed| {
        let mut dashboard = Dashboard::create_demo(RegisterConfig::default()).unwrap();
        let mut generator = IncidentGenerator::new_with_seed(seed);
        (0..5)
            .map(|_| {
                let incident = dashboard.simulate_incident(&mut generator);
                (incident.location, incident.severity, incident.category)
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(11), run(11));
}
