use bevy::prelude::*;

/// Joystick magnitude above which the player counts as moving.
pub const MOVE_THRESHOLD: f32 = 0.1;

/// Movement state of the player character.
///
/// `target_velocity` is written only from joystick input; `current_velocity`
/// is owned by the fixed-tick movement system and chases the target.
#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct PlayerMotion {
    pub current_velocity: Vec2,
    pub target_velocity: Vec2,
    pub is_moving: bool,
    pub facing_right: bool,
}

impl Default for PlayerMotion {
    fn default() -> Self {
        Self {
            current_velocity: Vec2::ZERO,
            target_velocity: Vec2::ZERO,
            is_moving: false,
            facing_right: true,
        }
    }
}

impl PlayerMotion {
    /// Applies one joystick sample: sets the velocity target, the moving
    /// flag, and flips facing when the horizontal sign of a moving sample
    /// disagrees with the stored direction. Facing is left untouched when
    /// `flip_enabled` is off, so toggling it at runtime never inherits a
    /// stale direction.
    pub fn apply_input(&mut self, input: Vec2, move_speed: f32, flip_enabled: bool) {
        self.target_velocity = input * move_speed;
        self.is_moving = input.length() > MOVE_THRESHOLD;

        if self.is_moving && flip_enabled {
            let face_right = input.x > 0.0;
            if face_right != self.facing_right {
                self.facing_right = face_right;
            }
        }
    }

    /// Immediately halts all movement, bypassing deceleration.
    pub fn stop(&mut self) {
        self.current_velocity = Vec2::ZERO;
        self.target_velocity = Vec2::ZERO;
        self.is_moving = false;
    }

    /// Snaps to moving in `direction` at `speed`, bypassing acceleration.
    pub fn snap(&mut self, direction: Vec2, speed: f32) {
        let velocity = direction.normalize_or_zero() * speed;
        self.current_velocity = velocity;
        self.target_velocity = velocity;
        self.is_moving = true;
    }
}
