use bevy::prelude::*;

/// State of the current drag gesture, in touch-area-local pixels (+y down).
/// Both fields are zero whenever no gesture is in progress.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct VjoyBase {
    /// Where the gesture started; the visual base is recentered here on press.
    pub center: Vec2,
    /// Knob offset from the base center, clamped to the configured range.
    pub knob_offset: Vec2,
}
