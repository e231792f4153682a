//! World setup systems for camera and lighting

use bevy::prelude::*;

use super::components::{to_color, MainCamera};
use crate::simulation::BACKGROUND_COLOR;

/// System to setup the world environment (background, lighting, camera)
pub fn setup_world(mut commands: Commands) {
    commands.insert_resource(ClearColor(to_color(BACKGROUND_COLOR)));

    // Perspective camera looking down at the crossroads
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(20.0, 20.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
        AmbientLight {
            color: Color::srgb_u8(0x40, 0x40, 0x40),
            brightness: 400.0,
            ..default()
        },
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
