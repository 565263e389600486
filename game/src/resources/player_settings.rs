use bevy::prelude::*;

#[derive(Resource, Reflect, Debug)]
#[reflect(Resource)]
pub struct PlayerSettings {
    /// Top speed in world units per second at full joystick deflection.
    pub move_speed: f32,
    /// Lerp rate toward the target velocity while input is held.
    pub acceleration: f32,
    /// Lerp rate back toward zero once input stops.
    pub deceleration: f32,
    /// Mirror the sprite horizontally when facing left.
    pub flip_sprite: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            move_speed: 250.0,
            acceleration: 10.0,
            deceleration: 10.0,
            flip_sprite: true,
        }
    }
}

/// Imperative movement overrides, bypassing the joystick.
#[derive(Message, Debug, Clone, Copy)]
pub enum PlayerCommand {
    /// Halt immediately, skipping deceleration.
    Stop,
    /// Start moving in `direction` at `speed` immediately, skipping
    /// acceleration. `direction` is normalized before use.
    Snap { direction: Vec2, speed: f32 },
}
