use bevy::prelude::*;
use dot_survivors::AppPlugin;

fn main() {
    App::new().add_plugins(AppPlugin).run();
}
