//! Player movement driven by the virtual joystick.
//!
//! Joystick samples set a target velocity; every fixed tick the current
//! velocity chases it (accelerating toward input, decelerating toward zero)
//! and is integrated into the transform. The same tick feeds the
//! [MotionAnimator] parameters that the sprite animation consumes.

use bevy::prelude::*;

use crate::prelude::{
    motion_animator::MotionAnimator,
    player_motion::PlayerMotion,
    player_settings::{PlayerCommand, PlayerSettings},
    velocity::LinearVelocity,
    vjoy::VjoyInputSet,
    vjoy_base::VjoyBase,
    vjoy_output::JoystickMessage,
};

const PLAYER_SIZE: f32 = 48.0;
const PLAYER_COLOR: Color = Color::srgb(0.35, 0.85, 0.55);

/// Walk-cycle rate in radians per second at full speed.
const WALK_BOB_RATE: f32 = 18.0;
/// Vertical squash amplitude of the walk cycle.
const WALK_BOB_AMOUNT: f32 = 0.08;

pub(crate) fn plugin(app: &mut App) {
    app.init_resource::<PlayerSettings>()
        .register_type::<PlayerSettings>()
        .register_type::<PlayerMotion>()
        .register_type::<LinearVelocity>()
        .register_type::<MotionAnimator>()
        .add_message::<PlayerCommand>()
        .add_systems(Startup, spawn_player)
        .add_systems(PostStartup, warn_if_no_joystick)
        .add_systems(
            Update,
            (player_input_system, player_command_system, animate_player)
                .chain()
                // Joystick samples from this frame must land on the target
                // before the next fixed tick interpolates toward it.
                .after(VjoyInputSet)
                .run_if(any_with_component::<PlayerMotion>),
        )
        .add_systems(
            FixedUpdate,
            (player_movement_system, apply_velocity_system)
                .chain()
                .run_if(any_with_component::<PlayerMotion>),
        );
}

pub fn spawn_player(mut commands: Commands) {
    commands.spawn((
        PlayerMotion::default(),
        LinearVelocity::default(),
        MotionAnimator::default(),
        Sprite {
            color: PLAYER_COLOR,
            custom_size: Some(Vec2::splat(PLAYER_SIZE)),
            ..default()
        },
    ));
}

/// The player works without a joystick (commands still move it), but that is
/// almost always a setup mistake, so say so once.
fn warn_if_no_joystick(q_joystick: Query<(), With<VjoyBase>>) {
    if q_joystick.is_empty() {
        warn!("no virtual joystick found, the player will not receive input");
    }
}

/// Applies broadcast joystick samples to the velocity target and facing.
fn player_input_system(
    settings: Res<PlayerSettings>,
    mut messages: MessageReader<JoystickMessage>,
    mut q_player: Query<&mut PlayerMotion>,
) {
    let Ok(mut player) = q_player.single_mut() else { return; };

    for JoystickMessage(input) in messages.read() {
        player.apply_input(*input, settings.move_speed, settings.flip_sprite);
    }
}

/// Handles imperative overrides that bypass the joystick.
fn player_command_system(
    mut messages: MessageReader<PlayerCommand>,
    mut q_player: Query<(&mut PlayerMotion, &mut LinearVelocity)>,
) {
    let Ok((mut player, mut velocity)) = q_player.single_mut() else { return; };

    for command in messages.read() {
        match *command {
            PlayerCommand::Stop => player.stop(),
            PlayerCommand::Snap { direction, speed } => player.snap(direction, speed),
        }
        velocity.0 = player.current_velocity;
    }
}

/// One interpolation step toward the target. The lerp factor is clamped so
/// a large `rate * dt` lands exactly on the target instead of overshooting.
pub(crate) fn step_velocity(current: Vec2, target: Vec2, rate: f32, dt: f32) -> Vec2 {
    current.lerp(target, (rate * dt).clamp(0.0, 1.0))
}

/// Fixed-tick velocity smoothing and animator parameter update.
fn player_movement_system(
    time: Res<Time>,
    settings: Res<PlayerSettings>,
    mut q_player: Query<(&mut PlayerMotion, &mut LinearVelocity, &mut MotionAnimator)>,
) {
    let Ok((mut player, mut velocity, mut animator)) = q_player.single_mut() else { return; };

    let (target, rate) = if player.is_moving {
        (player.target_velocity, settings.acceleration)
    } else {
        (Vec2::ZERO, settings.deceleration)
    };
    player.current_velocity =
        step_velocity(player.current_velocity, target, rate, time.delta_secs());
    velocity.0 = player.current_velocity;

    animator.walking = player.is_moving;
    animator.speed = player.current_velocity.length();
}

/// Integrates [LinearVelocity] into the transform every fixed tick.
fn apply_velocity_system(time: Res<Time>, mut q_bodies: Query<(&LinearVelocity, &mut Transform)>) {
    let dt = time.delta_secs();
    for (velocity, mut transform) in q_bodies.iter_mut() {
        transform.translation.x += velocity.0.x * dt;
        transform.translation.y += velocity.0.y * dt;
    }
}

/// Mirrors the sprite to the facing direction and plays a speed-scaled
/// squash-and-stretch walk cycle while moving.
fn animate_player(
    time: Res<Time>,
    settings: Res<PlayerSettings>,
    mut q_player: Query<(&PlayerMotion, &mut MotionAnimator, &mut Sprite, &mut Transform)>,
) {
    let Ok((player, mut animator, mut sprite, mut transform)) = q_player.single_mut() else {
        return;
    };

    if settings.flip_sprite {
        sprite.flip_x = !player.facing_right;
    }

    if animator.walking {
        let cycle = (animator.speed / settings.move_speed.max(f32::EPSILON)).min(1.0);
        animator.phase += time.delta_secs() * WALK_BOB_RATE * cycle;
        transform.scale.y = 1.0 + WALK_BOB_AMOUNT * animator.phase.sin();
    } else {
        animator.phase = 0.0;
        transform.scale.y = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::player_motion::MOVE_THRESHOLD;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn step_velocity_takes_the_expected_fraction() {
        // rate 10, dt 0.02 -> 20% of the remaining delta per tick.
        let next = step_velocity(Vec2::ZERO, Vec2::new(5.0, 0.0), 10.0, 0.02);
        assert!(approx(next, Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn step_velocity_never_overshoots() {
        // rate * dt > 1 lands exactly on the target.
        let next = step_velocity(Vec2::ZERO, Vec2::new(5.0, 0.0), 10.0, 1.0);
        assert!(approx(next, Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn step_velocity_converges_monotonically() {
        let target = Vec2::new(3.0, -4.0);
        let mut current = Vec2::new(-10.0, 2.0);
        let mut remaining = (target - current).length();

        for _ in 0..400 {
            current = step_velocity(current, target, 5.0, 0.02);
            let next_remaining = (target - current).length();
            assert!(next_remaining <= remaining);
            remaining = next_remaining;
        }
        assert!(remaining < 1e-3);
    }

    #[test]
    fn facing_flips_only_on_horizontal_sign_change() {
        let mut player = PlayerMotion::default();
        assert!(player.facing_right);

        player.apply_input(Vec2::new(-0.5, 0.0), 100.0, true);
        assert!(!player.facing_right);

        // Same sign again: no change.
        player.apply_input(Vec2::new(-0.9, 0.3), 100.0, true);
        assert!(!player.facing_right);

        player.apply_input(Vec2::new(0.4, -0.2), 100.0, true);
        assert!(player.facing_right);
    }

    #[test]
    fn facing_is_frozen_while_flipping_is_disabled() {
        let mut player = PlayerMotion::default();

        player.apply_input(Vec2::new(-1.0, 0.0), 100.0, false);
        assert!(player.is_moving);
        assert!(player.facing_right);

        // Re-enabling picks up the direction from the next moving sample.
        player.apply_input(Vec2::new(-1.0, 0.0), 100.0, true);
        assert!(!player.facing_right);
    }

    #[test]
    fn broadcast_samples_reach_the_velocity_target() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<MouseButton>>();
        app.init_resource::<Touches>();
        app.add_plugins((crate::plugins::vjoy::plugin, super::plugin));
        app.update();

        app.world_mut()
            .resource_mut::<Messages<JoystickMessage>>()
            .write(JoystickMessage(Vec2::new(0.6, 0.8)));
        app.update();

        let world = app.world_mut();
        let mut q_player = world.query::<&PlayerMotion>();
        let player = q_player.single(world).unwrap();
        let expected = Vec2::new(0.6, 0.8) * PlayerSettings::default().move_speed;
        assert!(player.is_moving);
        assert!(approx(player.target_velocity, expected));
    }

    #[test]
    fn sub_threshold_input_is_idle_and_keeps_facing() {
        let mut player = PlayerMotion::default();
        player.apply_input(Vec2::new(-1.0, 0.0), 100.0, true);
        assert!(!player.facing_right);

        let nudge = Vec2::new(MOVE_THRESHOLD * 0.5, 0.0);
        player.apply_input(nudge, 100.0, true);
        assert!(!player.is_moving);
        // Idle samples never flip facing, even with a positive x.
        assert!(!player.facing_right);
        assert!(approx(player.target_velocity, nudge * 100.0));
    }

    #[test]
    fn input_scales_target_by_move_speed() {
        let mut player = PlayerMotion::default();
        player.apply_input(Vec2::new(0.6, 0.8), 250.0, true);
        assert!(player.is_moving);
        assert!(approx(player.target_velocity, Vec2::new(150.0, 200.0)));
    }

    #[test]
    fn stop_clears_all_motion_state() {
        let mut player = PlayerMotion::default();
        player.snap(Vec2::X, 120.0);
        assert!(player.is_moving);

        player.stop();
        assert_eq!(player.current_velocity, Vec2::ZERO);
        assert_eq!(player.target_velocity, Vec2::ZERO);
        assert!(!player.is_moving);
    }

    #[test]
    fn snap_normalizes_the_direction() {
        let mut player = PlayerMotion::default();
        player.snap(Vec2::new(3.0, 4.0), 10.0);
        assert!(approx(player.current_velocity, Vec2::new(6.0, 8.0)));
        assert!(approx(player.target_velocity, player.current_velocity));
        assert!(player.is_moving);
    }
}
