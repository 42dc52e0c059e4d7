use std::{collections::VecDeque, time::Duration};

use bevy::prelude::*;

use crate::{
    physics::{Pendulum, PlacementError},
    resources::Config,
    state::Mode,
};

/// Identifies one tick. Every period of the running timer gets a fresh
/// handle, so a tick that was canceled or already used never matches again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Issues handles; keeps counting across clears.
#[derive(Debug, Default)]
struct HandleIssuer(u64);

impl HandleIssuer {
    fn next_handle(&mut self) -> TickHandle {
        let handle = TickHandle(self.0);
        self.0 += 1;
        handle
    }
}

/// The recurring tick of a running session. `upcoming` is the handle the
/// next period will fire with, `fired` holds periods that elapsed but were
/// not dispatched yet, oldest first.
#[derive(Debug, Clone)]
pub struct ScheduledTick {
    upcoming: TickHandle,
    fired: VecDeque<TickHandle>,
    timer: Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendulumEvent {
    /// Primary button release, in whole canvas pixels
    Click(IVec2),
    Clear,
    Quit,
    Tick(TickHandle),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    PivotPlaced(Vec2),
    BobPlaced { bob: Vec2, length: f32 },
    BobRejected(PlacementError),
    Started(TickHandle),
    Paused,
    Stepped { bob: Vec2, angle: f32, velocity: f32 },
    Cleared { canceled: Option<TickHandle> },
    Quit,
    Ignored,
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    AwaitingPivot,
    AwaitingBob {
        pivot: IVec2,
    },
    Paused {
        pendulum: Pendulum,
    },
    Running {
        pendulum: Pendulum,
        tick: ScheduledTick,
    },
}

#[derive(Resource, Debug, Default)]
pub struct PendulumSession {
    phase: Phase,
    handles: HandleIssuer,
}

impl PendulumSession {
    pub fn mode(&self) -> Mode {
        match self.phase {
            Phase::AwaitingPivot => Mode::AwaitingPivot,
            Phase::AwaitingBob { .. } => Mode::AwaitingBob,
            Phase::Paused { .. } => Mode::Paused,
            Phase::Running { .. } => Mode::Running,
        }
    }

    pub fn pendulum(&self) -> Option<&Pendulum> {
        match &self.phase {
            Phase::Paused { pendulum } | Phase::Running { pendulum, .. } => Some(pendulum),
            Phase::AwaitingPivot | Phase::AwaitingBob { .. } => None,
        }
    }

    pub fn pivot(&self) -> Option<Vec2> {
        match &self.phase {
            Phase::AwaitingPivot => None,
            Phase::AwaitingBob { pivot } => Some(pivot.as_vec2()),
            Phase::Paused { pendulum } | Phase::Running { pendulum, .. } => Some(pendulum.pivot),
        }
    }

    pub fn bob(&self) -> Option<Vec2> {
        self.pendulum().map(|p| p.bob)
    }

    pub fn length(&self) -> Option<f32> {
        self.pendulum().map(|p| p.length)
    }

    pub fn scheduled_tick(&self) -> Option<TickHandle> {
        match &self.phase {
            Phase::Running { tick, .. } => Some(tick.upcoming),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: PendulumEvent, config: &Config) -> Outcome {
        match event {
            PendulumEvent::Click(at) => self.click(at, config),
            PendulumEvent::Clear => self.clear(),
            PendulumEvent::Quit => Outcome::Quit,
            PendulumEvent::Tick(handle) => self.tick(handle, config),
        }
    }

    pub fn click(&mut self, at: IVec2, config: &Config) -> Outcome {
        let (phase, outcome) = match std::mem::take(&mut self.phase) {
            Phase::AwaitingPivot => (
                Phase::AwaitingBob { pivot: at },
                Outcome::PivotPlaced(at.as_vec2()),
            ),
            Phase::AwaitingBob { pivot } => match Pendulum::new(pivot, at) {
                Ok(pendulum) => {
                    let outcome = Outcome::BobPlaced {
                        bob: pendulum.bob,
                        length: pendulum.length,
                    };
                    (Phase::Paused { pendulum }, outcome)
                }
                Err(err) => (Phase::AwaitingBob { pivot }, Outcome::BobRejected(err)),
            },
            Phase::Paused { pendulum } => {
                let tick = self.arm(config.tick_interval());
                let outcome = Outcome::Started(tick.upcoming);
                (Phase::Running { pendulum, tick }, outcome)
            }
            // dropping the scheduled tick cancels it
            Phase::Running { pendulum, .. } => (Phase::Paused { pendulum }, Outcome::Paused),
        };
        self.phase = phase;
        outcome
    }

    /// Back to a fresh session, canceling whatever tick was pending.
    /// Handles keep counting so ticks from the discarded session stay stale.
    pub fn clear(&mut self) -> Outcome {
        let canceled = self.scheduled_tick();
        self.phase = Phase::AwaitingPivot;
        Outcome::Cleared { canceled }
    }

    /// Steps the pendulum if `handle` is the oldest fired tick.
    pub fn tick(&mut self, handle: TickHandle, config: &Config) -> Outcome {
        let Phase::Running { pendulum, tick } = &mut self.phase else {
            return Outcome::Ignored;
        };
        if tick.fired.front() != Some(&handle) {
            return Outcome::Ignored;
        }
        tick.fired.pop_front();

        pendulum.step(config.gravity, config.dt());
        Outcome::Stepped {
            bob: pendulum.bob,
            angle: pendulum.angle(),
            velocity: pendulum.velocity,
        }
    }

    /// Runs the tick timer forward by `delta` and returns one handle per
    /// period that elapsed, in firing order. Time past the last period is
    /// carried into the next call.
    pub fn advance(&mut self, delta: Duration) -> Vec<TickHandle> {
        let Phase::Running { tick, .. } = &mut self.phase else {
            return Vec::new();
        };
        tick.timer.tick(delta);

        let mut handles = Vec::new();
        for _ in 0..tick.timer.times_finished_this_tick() {
            let handle = std::mem::replace(&mut tick.upcoming, self.handles.next_handle());
            tick.fired.push_back(handle);
            handles.push(handle);
        }
        handles
    }

    fn arm(&mut self, interval: Duration) -> ScheduledTick {
        ScheduledTick {
            upcoming: self.handles.next_handle(),
            fired: VecDeque::new(),
            timer: Timer::new(interval, TimerMode::Repeating),
        }
    }
}
