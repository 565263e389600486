pub mod motion_animator;
pub mod player_motion;
pub mod velocity;
pub mod vjoy_base;
pub mod vjoy_knob;
pub mod vjoy_touch_area;
