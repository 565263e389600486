use bevy::prelude::*;

/// Marker for the inner moving knob of the virtual joystick.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct VjoyKnob;
