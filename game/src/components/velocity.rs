use bevy::prelude::*;

/// Linear velocity in world units per second, integrated into the entity's
/// `Transform` every fixed tick.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct LinearVelocity(pub Vec2);
