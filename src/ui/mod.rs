//! UI module that visualizes the dashboard using Bevy
//!
//! This module is purely for visualization - all dashboard logic is in the `simulation` module.
//! The UI reads state from `Dashboard` and renders it using Bevy's 3D graphics.

mod components;
mod panel;
mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{DashboardResource, IncidentSourceResource, MarkerMappings};

use panel::{handle_action_buttons, handle_action_keyboard, handle_exit, setup_panel};
use spawner::spawn_scene_visuals;
use sync::{refresh_panel, sync_markers, sync_vehicles, tick_dashboard};
use world::setup_world;

/// Plugin to register all UI systems
///
/// Expects `DashboardResource` to be inserted before the app runs.
pub struct TrafficWatchUIPlugin;

impl Plugin for TrafficWatchUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IncidentSourceResource>()
            .init_resource::<MarkerMappings>()
            .add_systems(
                Startup,
                (setup_world, spawn_scene_visuals.after(setup_world), setup_panel),
            )
            .add_systems(
                Update,
                (
                    (handle_action_buttons, handle_action_keyboard),
                    tick_dashboard,
                    (sync_vehicles, sync_markers, refresh_panel),
                )
                    .chain(),
            )
            .add_systems(Update, handle_exit);
    }
}
