//! Headless app for system tests. Input and time are plain resources the
//! tests drive by hand, with no plugin resetting them between frames.

use std::time::Duration;

use bevy::{core::TaskPoolPlugin, prelude::*, window::PrimaryWindow};

use crate::{
    resources::Config,
    session::{Outcome, PendulumEvent, PendulumSession},
    state::StatePlugin,
};

pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugin(TaskPoolPlugin::default())
        .init_resource::<Time>()
        .init_resource::<Input<MouseButton>>()
        .init_resource::<Input<KeyCode>>()
        .add_plugin(StatePlugin);

    // first update only records the start, the delta stays zero
    let mut time = app.world.resource_mut::<Time>();
    let start = time.startup();
    time.update_with_instant(start);
    app
}

pub fn send(app: &mut App, event: PendulumEvent) {
    app.world
        .resource_mut::<Events<PendulumEvent>>()
        .send(event);
}

pub fn session(app: &App) -> &PendulumSession {
    app.world.resource::<PendulumSession>()
}

/// Runs one frame that is `delta` long, then stops the clock again.
pub fn frame(app: &mut App, delta: Duration) {
    set_delta(app, delta);
    app.update();
    set_delta(app, Duration::ZERO);
}

fn set_delta(app: &mut App, delta: Duration) {
    let mut time = app.world.resource_mut::<Time>();
    let last = time.last_update().unwrap_or_else(|| time.startup());
    time.update_with_instant(last + delta);
}

/// Places pivot and bob and starts the swing, leaving the app one update
/// past the click so the `Mode` state is `Running` too.
pub fn start_running(app: &mut App, pivot: IVec2, bob: IVec2) {
    send(app, PendulumEvent::Click(pivot));
    send(app, PendulumEvent::Click(bob));
    send(app, PendulumEvent::Click(IVec2::ZERO));
    app.update();
    app.update();
}

pub fn spawn_primary_window(app: &mut App) {
    let size = app.world.resource::<Config>().window_size();
    app.world.spawn((
        Window {
            resolution: (size.x, size.y).into(),
            ..default()
        },
        PrimaryWindow,
    ));
}

/// Moves the cursor (bottom-left origin) and clicks the left button.
pub fn release_left_at(app: &mut App, cursor: Vec2) {
    let mut windows = app
        .world
        .query_filtered::<&mut Window, With<PrimaryWindow>>();
    windows
        .single_mut(&mut app.world)
        .set_cursor_position(Some(cursor));

    let mut mouse = app.world.resource_mut::<Input<MouseButton>>();
    mouse.press(MouseButton::Left);
    mouse.release(MouseButton::Left);
    app.update();
    app.world.resource_mut::<Input<MouseButton>>().clear();
}

/// Collects outcomes as they are broadcast, across frames.
pub struct OutcomeLog {
    reader: bevy::ecs::event::ManualEventReader<Outcome>,
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self {
            reader: Default::default(),
        }
    }

    pub fn drain(&mut self, app: &App) -> Vec<Outcome> {
        let events = app.world.resource::<Events<Outcome>>();
        self.reader.iter(events).copied().collect()
    }
}
