use bevy::prelude::*;

/// The public state of the virtual joystick.
/// Read this from your movement systems to control entities.
#[derive(Resource, Default, Reflect)]
#[reflect(Resource)]
pub struct VjoyOutput {
    /// Normalized direction vector with magnitude 0.0 to 1.0, +y up.
    /// (0,0) represents the center/idle state.
    pub dir: Vec2,
    /// Whether a drag gesture is currently in progress.
    pub active: bool,
}

/// Broadcast once per processed drag sample and once (as zero) on release.
#[derive(Message, Debug, Clone, Copy)]
pub struct JoystickMessage(pub Vec2);
