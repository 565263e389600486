pub mod active_touch;
pub mod player_settings;
pub mod vjoy_config;
pub mod vjoy_output;
