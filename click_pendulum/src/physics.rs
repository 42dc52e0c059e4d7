use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("bob placed on the pivot at {0}")]
    Degenerate(IVec2),
}

/// A single bob swinging about a fixed pivot, in canvas coordinates
/// (top-left origin, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pendulum {
    pub pivot: Vec2,
    pub bob: Vec2,
    /// Fixed at placement, the stepper never re-measures it.
    pub length: f32,
    pub velocity: f32,
}

impl Pendulum {
    pub fn new(pivot: IVec2, bob: IVec2) -> Result<Self, PlacementError> {
        let (pivot_pos, bob_pos) = (pivot.as_vec2(), bob.as_vec2());
        let length = pivot_pos.distance(bob_pos);
        if !(length.is_finite() && length > 0.0) {
            return Err(PlacementError::Degenerate(bob));
        }

        Ok(Self {
            pivot: pivot_pos,
            bob: bob_pos,
            length,
            velocity: 0.0,
        })
    }

    /// Angle recovered from the horizontal offset alone, always in `[0, PI]`.
    pub fn angle(&self) -> f32 {
        ((self.bob.x - self.pivot.x) / self.length)
            .clamp(-1.0, 1.0)
            .acos()
    }

    /// One explicit-Euler tick. The `cos(angle) * gravity` acceleration is
    /// not the textbook restoring term and is kept as is.
    pub fn step(&mut self, gravity: f32, dt: f32) {
        let mut angle = self.angle();

        let acceleration = angle.cos() * gravity;
        self.velocity += acceleration * dt;

        let distance = self.velocity * dt;
        angle += (distance / self.length).atan();

        self.bob = self.pivot + Vec2::new(angle.cos(), angle.sin()) * self.length;
    }
}
