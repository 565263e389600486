use bevy::prelude::*;

/// Marker for the enlarged, invisible hit-test node that owns the joystick
/// visuals and receives pointer interaction.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct VjoyTouchArea;
