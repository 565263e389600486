use bevy::prelude::*;

/// Animation parameters driven by the movement controller each fixed tick
/// and consumed by the sprite animation system.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct MotionAnimator {
    /// Whether the walk animation should play.
    pub walking: bool,
    /// Current speed in world units per second, scales the walk cycle.
    pub speed: f32,
    /// Accumulated walk-cycle phase in radians.
    pub phase: f32,
}
