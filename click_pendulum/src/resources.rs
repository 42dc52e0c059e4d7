use std::time::Duration;

use bevy::prelude::*;
use bevy_inspector_egui::{prelude::ReflectInspectorOptions, InspectorOptions};

#[derive(Reflect, Resource, InspectorOptions)]
#[reflect(Resource, InspectorOptions)]
pub struct Config {
    /// Canvas pixels are read as millimeters, so 9800 mm/s^2
    pub gravity: f32,
    #[inspector(min = 1, max = 1000)]
    pub tick_millis: u32,
    pub pivot_radius: f32,
    pub bob_radius: f32,
    pub canvas_size: Vec2,
    pub button_bar_height: f32,
    pub color: Color,
    pub background: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity: 9800.0,
            tick_millis: 10,
            pivot_radius: 10.0,
            bob_radius: 20.0,
            canvas_size: Vec2::new(500.0, 500.0),
            button_bar_height: 40.0,
            color: Color::RED,
            background: Color::WHITE,
        }
    }
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_millis))
    }

    /// Tick interval in seconds, the `dt` fed to the stepper.
    pub fn dt(&self) -> f32 {
        self.tick_millis as f32 / 1000.0
    }

    pub fn window_size(&self) -> Vec2 {
        Vec2::new(
            self.canvas_size.x,
            self.canvas_size.y + self.button_bar_height,
        )
    }

    /// Canvas has its origin at the top-left of the window with y pointing
    /// down; the 2d camera sits at the window center with y pointing up.
    pub fn canvas_to_world(&self, point: Vec2) -> Vec2 {
        let window = self.window_size();
        Vec2::new(point.x - window.x * 0.5, window.y * 0.5 - point.y)
    }

    /// Maps a bottom-left origin cursor position to whole canvas pixels.
    /// Positions over the button bar or outside the window give `None`.
    pub fn cursor_to_canvas(&self, cursor: Vec2, window_height: f32) -> Option<IVec2> {
        let point = Vec2::new(cursor.x, window_height - cursor.y).floor();
        let inside = point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.canvas_size.x
            && point.y < self.canvas_size.y;
        inside.then(|| point.as_ivec2())
    }
}
