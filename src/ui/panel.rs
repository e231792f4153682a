//! The incident panel: status label, incident list and action buttons

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::components::{
    ActionButton, DashboardResource, IncidentList, IncidentSourceResource, StatusText,
};

/// System to setup the panel UI
pub fn setup_panel(mut commands: Commands, dashboard: Res<DashboardResource>) {
    let status = dashboard.dashboard.status();

    commands
        .spawn((
            Node {
                width: Val::Px(380.0),
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                right: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(status.to_string()),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                StatusText,
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(10.0),
                    ..default()
                })
                .with_children(|buttons| {
                    spawn_action_button(
                        buttons,
                        ActionButton::SimulateIncident,
                        "Simulate Incident [S]",
                    );
                    spawn_action_button(buttons, ActionButton::Alert, "Alert [A]");
                });

            parent.spawn((
                IncidentList,
                Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(4.0),
                    ..default()
                },
            ));
        });
}

fn spawn_action_button(parent: &mut ChildSpawnerCommands, action: ActionButton, text: &str) {
    parent
        .spawn((
            action,
            Button,
            Node {
                padding: UiRect::all(Val::Px(8.0)),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(Color::WHITE),
            BackgroundColor(action.base_color()),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn perform(
    action: ActionButton,
    dashboard: &mut DashboardResource,
    source: &mut IncidentSourceResource,
) {
    match action {
        ActionButton::SimulateIncident => {
            let incident = dashboard.dashboard.simulate_incident(&mut source.0);
            bevy::log::info!("Simulated incident {}: {}", incident.id, incident.summary());
        }
        ActionButton::Alert => dashboard.dashboard.acknowledge_alert(),
    }
}

/// System to handle action button clicks
pub fn handle_action_buttons(
    mut dashboard: ResMut<DashboardResource>,
    mut source: ResMut<IncidentSourceResource>,
    mut interaction_query: Query<
        (&Interaction, &ActionButton, &mut BorderColor),
        Changed<Interaction>,
    >,
) {
    for (interaction, action, mut border_color) in interaction_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                perform(*action, &mut dashboard, &mut source);
                *border_color = BorderColor::all(Color::srgb(0.0, 1.0, 0.0));
            }
            Interaction::Hovered => {
                *border_color = BorderColor::all(Color::srgb(1.0, 1.0, 0.0));
            }
            Interaction::None => {
                *border_color = BorderColor::all(Color::WHITE);
            }
        }
    }
}

/// System to handle keyboard shortcuts for the actions
pub fn handle_action_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut dashboard: ResMut<DashboardResource>,
    mut source: ResMut<IncidentSourceResource>,
) {
    if keyboard.just_pressed(KeyCode::KeyS) {
        perform(ActionButton::SimulateIncident, &mut dashboard, &mut source);
    }
    if keyboard.just_pressed(KeyCode::KeyA) {
        perform(ActionButton::Alert, &mut dashboard, &mut source);
    }
}

/// Exit on Escape
pub fn handle_exit(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
