pub mod camera;
pub mod debug;
pub mod defaults;
pub mod player;
pub mod vjoy;
