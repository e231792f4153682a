//! Systems for syncing Bevy entities with dashboard state

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{
    to_color, DashboardResource, IncidentList, MarkerLink, MarkerMappings, StatusText, VehicleLink,
};
use super::spawner::spawn_marker_visual;
use crate::simulation::{Incident, IncidentId, VEHICLE_SIZE};

/// System to run one dashboard frame per display refresh
pub fn tick_dashboard(time: Res<Time>, mut dashboard: ResMut<DashboardResource>) {
    dashboard.dashboard.frame(time.delta());
}

/// System to move vehicle visuals to their scene positions
pub fn sync_vehicles(
    dashboard: Res<DashboardResource>,
    mut vehicle_query: Query<(&VehicleLink, &mut Transform)>,
) {
    let vehicles = &dashboard.dashboard.scene.vehicles;
    for (link, mut transform) in vehicle_query.iter_mut() {
        if let Some(vehicle) = vehicles.get(link.0) {
            transform.translation = Vec3::new(
                vehicle.position.x,
                VEHICLE_SIZE.1 / 2.0,
                vehicle.position.z,
            );
            transform.rotation = Quat::from_rotation_y(vehicle.heading());
        }
    }
}

/// System to spawn and despawn map markers as incidents come and go
pub fn sync_markers(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    dashboard: Res<DashboardResource>,
    mut mappings: ResMut<MarkerMappings>,
    marker_query: Query<(Entity, &MarkerLink)>,
) {
    let markers = dashboard.dashboard.markers();
    let live: HashSet<IncidentId> = markers.iter().map(|m| m.id).collect();

    for (entity, link) in marker_query.iter() {
        if !live.contains(&link.0) {
            commands.entity(entity).despawn();
            mappings.markers.remove(&link.0);
        }
    }

    for marker in &markers {
        if !mappings.markers.contains_key(&marker.id) {
            spawn_marker_visual(&mut commands, &mut meshes, &mut materials, marker, &mut mappings);
        }
    }
}

/// System to apply register changes to the status label and incident list
pub fn refresh_panel(
    mut commands: Commands,
    dashboard: Res<DashboardResource>,
    mut status_query: Query<&mut Text, With<StatusText>>,
    list_query: Query<Entity, With<IncidentList>>,
) {
    let update = dashboard.feed.take_update();
    if update.is_empty() {
        return;
    }

    if let Some(status) = update.status {
        for mut text in status_query.iter_mut() {
            **text = status.to_string();
        }
    }

    if let Some(incidents) = update.incidents {
        let Ok(list) = list_query.single() else {
            return;
        };
        commands.entity(list).despawn_related::<Children>();
        commands.entity(list).with_children(|parent| {
            if incidents.is_empty() {
                parent.spawn((
                    Text::new("No active incidents"),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.7, 0.7, 0.7)),
                ));
            }
            for incident in &incidents {
                spawn_incident_row(parent, incident);
            }
        });
    }
}

fn spawn_incident_row(parent: &mut ChildSpawnerCommands, incident: &Incident) {
    parent
        .spawn((
            Node {
                padding: UiRect::all(Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(to_color(incident.severity.band())),
        ))
        .with_children(|row| {
            row.spawn((
                Text::new(incident.summary()),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.1, 0.1, 0.1)),
            ));
        });
}
