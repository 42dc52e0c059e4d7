mod components;
mod physics;
mod resources;
mod session;
mod state;
#[cfg(test)]
mod testing;
mod ui;

use components::*;
use resources::*;
use session::*;
use state::*;
use ui::UiPlugin;

use bevy::{
    input::common_conditions::input_toggle_active, prelude::*, sprite::MaterialMesh2dBundle,
};
use bevy_inspector_egui::quick::ResourceInspectorPlugin;
use bevy_prototype_debug_lines::{DebugLines, DebugLinesPlugin};

fn main() {
    let config = Config::default();
    let window = config.window_size();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Pendulum Simulation".to_string(),
                resolution: (window.x, window.y).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(config.background))
        .insert_resource(config)
        .add_plugin(
            ResourceInspectorPlugin::<Config>::default()
                .run_if(input_toggle_active(false, KeyCode::F1)),
        )
        .add_plugin(DebugLinesPlugin::default())
        .add_plugin(StatePlugin)
        .add_plugin(UiPlugin)
        .add_plugin(MarkerPlugin)
        .add_startup_system(setup)
        .add_system(draw_string.after(dispatch))
        .register_type::<Config>()
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2dBundle {
        transform: Transform::from_xyz(0., 0., 100.),
        ..Default::default()
    });

    info!("Click to place the pivot, then the bob, then click to run or pause");
    info!("Press 'R' to clear");
    info!("Press 'Escape' to quit");
    info!("Press 'F1' to inspect the config");
}

pub struct MarkerPlugin;

impl Plugin for MarkerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MarkerAssets>()
            .add_system(sync_markers.after(dispatch))
            .add_system(
                follow_bob
                    .in_set(OnUpdate(Mode::Running))
                    .after(dispatch),
            );
    }
}

/// Circle meshes sized from the startup config, shared by every marker.
#[derive(Resource)]
pub struct MarkerAssets {
    pivot_mesh: Handle<Mesh>,
    bob_mesh: Handle<Mesh>,
    material: Handle<ColorMaterial>,
}

impl FromWorld for MarkerAssets {
    fn from_world(world: &mut World) -> Self {
        let config = world.resource::<Config>();
        let (pivot_radius, bob_radius, color) =
            (config.pivot_radius, config.bob_radius, config.color);

        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let pivot_mesh = meshes.add(shape::Circle::new(pivot_radius).into());
        let bob_mesh = meshes.add(shape::Circle::new(bob_radius).into());
        let material = world
            .resource_mut::<Assets<ColorMaterial>>()
            .add(ColorMaterial::from(color));

        Self {
            pivot_mesh,
            bob_mesh,
            material,
        }
    }
}

/// Spawns and removes the pivot and bob circles as the session reports them.
fn sync_markers(
    mut commands: Commands,
    mut outcomes: EventReader<Outcome>,
    markers: Query<Entity, Or<(With<PivotMarker>, With<BobMarker>)>>,
    config: Res<Config>,
    assets: Res<MarkerAssets>,
) {
    let mut spawned = Vec::new();
    let mut existing_cleared = false;

    for outcome in outcomes.iter() {
        match *outcome {
            Outcome::PivotPlaced(pivot) => {
                let id = commands
                    .spawn((
                        MaterialMesh2dBundle {
                            mesh: assets.pivot_mesh.clone().into(),
                            material: assets.material.clone(),
                            transform: Transform::from_translation(
                                config.canvas_to_world(pivot).extend(1.0),
                            ),
                            ..default()
                        },
                        PivotMarker,
                        Name::new("Pivot"),
                    ))
                    .id();
                spawned.push(id);
            }
            Outcome::BobPlaced { bob, .. } => {
                let id = commands
                    .spawn((
                        MaterialMesh2dBundle {
                            mesh: assets.bob_mesh.clone().into(),
                            material: assets.material.clone(),
                            transform: Transform::from_translation(
                                config.canvas_to_world(bob).extend(2.0),
                            ),
                            ..default()
                        },
                        BobMarker,
                        Name::new("Bob"),
                    ))
                    .id();
                spawned.push(id);
            }
            Outcome::Cleared { .. } => {
                if !existing_cleared {
                    for e in markers.iter() {
                        commands.entity(e).despawn();
                    }
                    existing_cleared = true;
                }
                for e in spawned.drain(..) {
                    commands.entity(e).despawn();
                }
            }
            _ => {}
        }
    }
}

fn follow_bob(
    session: Res<PendulumSession>,
    config: Res<Config>,
    mut query: Query<&mut Transform, With<BobMarker>>,
) {
    let Some(bob) = session.bob() else {
        return;
    };
    for mut transform in query.iter_mut() {
        let z = transform.translation.z;
        transform.translation = config.canvas_to_world(bob).extend(z);
    }
}

fn draw_string(
    mut lines: ResMut<DebugLines>,
    session: Res<PendulumSession>,
    config: Res<Config>,
) {
    if let (Some(pivot), Some(bob)) = (session.pivot(), session.bob()) {
        lines.line_colored(
            config.canvas_to_world(pivot).extend(0.0),
            config.canvas_to_world(bob).extend(0.0),
            0.0,
            config.color,
        );
    }
}
