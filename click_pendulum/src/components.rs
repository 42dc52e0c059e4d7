use bevy::prelude::*;

#[derive(Component)]
pub struct PivotMarker;

#[derive(Component)]
pub struct BobMarker;
