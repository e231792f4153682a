//! Systems for spawning visual entities from dashboard state

use bevy::prelude::*;

use super::components::{
    to_color, DashboardResource, MarkerLink, MarkerMappings, SceneProp, VehicleLink,
};
use crate::simulation::{
    MapMarker, RoadSlab, SceneAnimator, SensorMarker, ROAD_COLOR, SENSOR_COLOR, SENSOR_SIZE,
    VEHICLE_SIZE,
};

/// System to create the scene visuals: roads, sensors and vehicles
pub fn spawn_scene_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    dashboard: Res<DashboardResource>,
) {
    let scene = &dashboard.dashboard.scene;

    for road in &scene.roads {
        spawn_road_visual(&mut commands, &mut meshes, &mut materials, road);
    }
    for sensor in &scene.sensors {
        spawn_sensor_visual(&mut commands, &mut meshes, &mut materials, sensor);
    }
    spawn_vehicles(&mut commands, &mut meshes, &mut materials, scene);
}

fn spawn_road_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    road: &RoadSlab,
) {
    let (sx, sy, sz) = road.size;
    commands.spawn((
        SceneProp,
        Mesh3d(meshes.add(Cuboid::new(sx, sy, sz))),
        MeshMaterial3d(materials.add(to_color(ROAD_COLOR))),
        Transform::from_xyz(road.center.x, road.center.y, road.center.z),
    ));
}

fn spawn_sensor_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    sensor: &SensorMarker,
) {
    let (radius, height) = SENSOR_SIZE;
    let pos = sensor.position;
    commands.spawn((
        SceneProp,
        Mesh3d(meshes.add(Cylinder::new(radius, height))),
        MeshMaterial3d(materials.add(to_color(SENSOR_COLOR))),
        Transform::from_xyz(pos.x, pos.y, pos.z),
    ));
}

fn spawn_vehicles(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    scene: &SceneAnimator,
) {
    let (width, height, depth) = VEHICLE_SIZE;
    let mesh = meshes.add(Cuboid::new(width, height, depth));

    for (index, vehicle) in scene.vehicles.iter().enumerate() {
        let pos = vehicle.position;
        commands.spawn((
            VehicleLink(index),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials.add(to_color(vehicle.color))),
            Transform::from_xyz(pos.x, height / 2.0, pos.z)
                .with_rotation(Quat::from_rotation_y(vehicle.heading())),
        ));
    }
}

/// Spawn a single incident marker above its projected position
pub fn spawn_marker_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    marker: &MapMarker,
    mappings: &mut ResMut<MarkerMappings>,
) {
    const MARKER_RADIUS: f32 = 0.4;
    let pos = marker.position;

    let entity = commands
        .spawn((
            MarkerLink(marker.id),
            Mesh3d(meshes.add(Sphere::new(MARKER_RADIUS))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: to_color(marker.severity.band()),
                emissive: LinearRgba::from(to_color(marker.severity.band())) * 0.5,
                ..default()
            })),
            Transform::from_xyz(pos.x, pos.y, pos.z),
        ))
        .id();
    mappings.markers.insert(marker.id, entity);
}
