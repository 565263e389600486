use bevy::prelude::*;

/// Sentinel id used when the gesture is driven by the mouse instead of a
/// real touch point.
pub const MOUSE_POINTER: u64 = u64::MAX;

/// Which pointer currently owns the joystick gesture. `None` between
/// gestures; other pointers are ignored while one is claimed.
#[derive(Resource, Default, Reflect)]
#[reflect(Resource)]
pub struct ActiveTouch {
    pub id: Option<u64>,
}
