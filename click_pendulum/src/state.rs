use bevy::{app::AppExit, prelude::*, window::PrimaryWindow};

use crate::{
    resources::Config,
    session::{Outcome, PendulumEvent, PendulumSession},
};

pub struct StatePlugin;

impl Plugin for StatePlugin {
    fn build(&self, app: &mut App) {
        app.add_state::<Mode>()
            .init_resource::<Config>()
            .init_resource::<PendulumSession>()
            .add_event::<PendulumEvent>()
            .add_event::<Outcome>()
            .add_system(canvas_click_listen.before(dispatch))
            .add_system(reset_listen.before(dispatch))
            .add_system(quit_listen.before(dispatch))
            .add_system(
                drive_tick
                    .in_set(OnUpdate(Mode::Running))
                    .before(dispatch),
            )
            .add_system(dispatch);
    }
}

#[derive(States, PartialEq, Eq, Debug, Clone, Copy, Hash, Default)]
pub enum Mode {
    #[default]
    AwaitingPivot,
    AwaitingBob,
    Paused,
    Running,
}

pub fn canvas_click_listen(
    mouse: Res<Input<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<Config>,
    mut events: EventWriter<PendulumEvent>,
) {
    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    if let Some(at) = window
        .cursor_position()
        .and_then(|cursor| config.cursor_to_canvas(cursor, window.height()))
    {
        events.send(PendulumEvent::Click(at));
    }
}

pub fn reset_listen(keys: Res<Input<KeyCode>>, mut events: EventWriter<PendulumEvent>) {
    if keys.just_pressed(KeyCode::R) {
        events.send(PendulumEvent::Clear);
    }
}

pub fn quit_listen(keys: Res<Input<KeyCode>>, mut events: EventWriter<PendulumEvent>) {
    if keys.just_pressed(KeyCode::Escape) {
        events.send(PendulumEvent::Quit);
    }
}

fn drive_tick(
    time: Res<Time>,
    mut session: ResMut<PendulumSession>,
    mut events: EventWriter<PendulumEvent>,
) {
    for handle in session.advance(time.delta()) {
        events.send(PendulumEvent::Tick(handle));
    }
}

/// Drains the event queue in order, one event at a time.
pub fn dispatch(
    mut events: EventReader<PendulumEvent>,
    mut session: ResMut<PendulumSession>,
    config: Res<Config>,
    mode: Res<State<Mode>>,
    mut next_mode: ResMut<NextState<Mode>>,
    mut outcomes: EventWriter<Outcome>,
    mut exit: EventWriter<AppExit>,
) {
    let mut handled = false;
    for event in events.iter() {
        let outcome = session.handle(*event, &config);
        log_outcome(&outcome);
        if outcome == Outcome::Quit {
            exit.send(AppExit);
        }
        outcomes.send(outcome);
        handled = true;
    }

    if handled && mode.0 != session.mode() {
        next_mode.set(session.mode());
    }
}

fn log_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::PivotPlaced(pivot) => info!("Pivot placed at ({}, {})", pivot.x, pivot.y),
        Outcome::BobPlaced { length, .. } => {
            info!("Pendulum length = {} millimeters", length);
            info!("Click to start");
        }
        Outcome::BobRejected(err) => warn!("{}, click somewhere else", err),
        Outcome::Started(handle) => info!("Running, first tick {:?}", handle),
        Outcome::Paused => info!("Pause"),
        Outcome::Stepped {
            bob,
            angle,
            velocity,
        } => debug!(
            "bob at ({:.2}, {:.2}), angle {:.4}, velocity {:.2}",
            bob.x, bob.y, angle, velocity
        ),
        Outcome::Cleared { canceled } => info!("Cleared, canceled tick {:?}", canceled),
        Outcome::Quit => info!("Quit"),
        Outcome::Ignored => {}
    }
}
