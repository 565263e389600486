use bevy::prelude::*;

/// Which screen corner the joystick is anchored to, or a custom offset
/// (see [`VjoyConfig::custom_offset`]).
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VjoyPlacement {
    #[default]
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
    Custom,
}

/// Configuration resource for the Virtual Joystick.
///
/// By updating this resource (via code or the `bevy_inspector_egui`), the
/// joystick will react instantly to changes in size, placement, or
/// appearance.
#[derive(Resource, Reflect, Debug)]
#[reflect(Resource)]
pub struct VjoyConfig {
    /// Maximum distance in pixels the knob may travel from the gesture
    /// center. The visual base circle has a diameter of `2 * range`.
    pub range: f32,

    /// Magnitude threshold (0.0 to 1.0) below which the broadcast direction
    /// is forced to zero. Checked on the *normalized* direction, so values
    /// in (0, 1] only suppress an exactly-centered drag; `> 1.0` mutes the
    /// joystick entirely.
    pub dead_zone: f32,

    /// Corner preset (or `Custom`) the joystick is anchored to.
    pub placement: VjoyPlacement,

    /// Distance in pixels from the anchored screen corner to the joystick
    /// center. Ignored for `VjoyPlacement::Custom`.
    pub margin: f32,

    /// Joystick center offset from the screen center (+y up), used only
    /// with `VjoyPlacement::Custom`.
    pub custom_offset: Vec2,

    /// The invisible hit-test node is this many times larger than the
    /// visual base, so a sloppy thumb press still grabs the joystick.
    pub touch_area_multiplier: f32,

    /// Diameter of the inner moving knob in pixels.
    pub knob_size: f32,

    /// Hide the visuals between gestures and pop them up at the press point.
    pub show_on_touch: bool,

    /// Master switch; `false` hides the joystick and disables its input.
    pub visible: bool,

    /// Transparency of the joystick when it is NOT being touched (0.0 to 1.0).
    pub alpha_idle: f32,

    /// Transparency of the joystick while actively being dragged (0.0 to 1.0).
    pub alpha_active: f32,

    /// The base color (tint) of the joystick background circle.
    pub base_color: Color,

    /// The color of the inner moving knob.
    pub knob_color: Color,

    /// Optional image drawn instead of the flat base circle.
    pub base_image: Option<Handle<Image>>,

    /// Optional image drawn instead of the flat knob circle.
    pub knob_image: Option<Handle<Image>>,
}

impl VjoyConfig {
    /// Diameter of the visual base circle in pixels.
    pub fn base_size(&self) -> f32 {
        self.range * 2.0
    }

    /// Side length of the square hit-test node in pixels.
    pub fn touch_area_size(&self) -> f32 {
        self.base_size() * self.touch_area_multiplier.max(1.0)
    }
}

impl Default for VjoyConfig {
    fn default() -> Self {
        Self {
            range: 75.0,
            dead_zone: 0.1,
            placement: VjoyPlacement::BottomLeft,
            margin: 140.0,
            custom_offset: Vec2::ZERO,
            touch_area_multiplier: 2.0,
            knob_size: 60.0,
            show_on_touch: true,
            visible: true,
            alpha_idle: 0.5,
            alpha_active: 1.0,
            base_color: Color::srgba(1.0, 1.0, 1.0, 1.0),
            knob_color: Color::WHITE,
            base_image: None,
            knob_image: None,
        }
    }
}
