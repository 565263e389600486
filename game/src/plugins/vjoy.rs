//! # Virtual Joystick Plugin
//!
//! Provides a responsive 2D virtual joystick for cross-platform mouse and touch input.
//!
//! This plugin manages:
//! 1. Spawning the UI elements.
//! 2. Capturing input and calculating a normalized `Vec2`.
//! 3. Rendering the visual "Knob" movement.
//!
//! ## Requirements
//! - Requires a `Camera2d` or `Camera3d` to be present in the world for UI rendering.

use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;
use bevy::window::PrimaryWindow;

use crate::prelude::{
    active_touch::{ActiveTouch, MOUSE_POINTER},
    vjoy_base::VjoyBase,
    vjoy_config::{VjoyConfig, VjoyPlacement},
    vjoy_knob::VjoyKnob,
    vjoy_output::{JoystickMessage, VjoyOutput},
    vjoy_touch_area::VjoyTouchArea,
};

/// All joystick `Update` systems run in this set. Consumers of
/// [JoystickMessage] order themselves `.after` it so a sample is observed
/// in the frame it is produced, before the next fixed tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VjoyInputSet;

/// Main entry point for the Virtual Joystick functionality.
/// Call `.add_plugins(vjoy::plugin)` in your App setup.
pub(crate) fn plugin(app: &mut App) {
    app.init_resource::<VjoyConfig>()
        .init_resource::<VjoyOutput>()
        .init_resource::<ActiveTouch>()
        .register_type::<VjoyConfig>()
        .register_type::<VjoyOutput>()
        .register_type::<ActiveTouch>()
        .register_type::<VjoyBase>()
        .add_message::<JoystickMessage>()
        .add_systems(Startup, spawn_joystick)
        .add_systems(
            Update,
            (
                joystick_layout_system,
                joystick_input_system,
                joystick_style_system,
                joystick_render_system,
            )
                .chain()
                .in_set(VjoyInputSet)
                .run_if(any_with_component::<VjoyTouchArea>),
        );
}

/// One processed drag sample.
///
/// The knob position is clamped to the range boundary, while the direction
/// stays the plain normalization of the raw offset; the dead zone is then
/// checked against the *normalized* magnitude. This ordering is load-bearing
/// for parity with the classic touch-joystick behavior: a dead zone in
/// (0, 1] only suppresses an exactly-centered drag.
pub(crate) struct JoystickSample {
    pub dir: Vec2,
    pub knob: Vec2,
}

pub(crate) fn joystick_sample(offset: Vec2, range: f32, dead_zone: f32) -> JoystickSample {
    let mut dir = offset.normalize_or_zero();
    let mut knob = offset;

    if offset.length() > range {
        knob = dir * range;
    }

    if dir.length() < dead_zone {
        dir = Vec2::ZERO;
    }

    JoystickSample { dir, knob }
}

/// Joystick center offset from the screen center (+y up) for a placement
/// mode: corner presets sit `margin` pixels in from the corner.
pub(crate) fn anchored_offset(
    placement: VjoyPlacement,
    canvas: Vec2,
    margin: f32,
    custom: Vec2,
) -> Vec2 {
    let half = canvas * 0.5;
    match placement {
        VjoyPlacement::BottomLeft => Vec2::new(-half.x + margin, -half.y + margin),
        VjoyPlacement::BottomRight => Vec2::new(half.x - margin, -half.y + margin),
        VjoyPlacement::TopLeft => Vec2::new(-half.x + margin, half.y - margin),
        VjoyPlacement::TopRight => Vec2::new(half.x - margin, half.y - margin),
        VjoyPlacement::Custom => custom,
    }
}

/// Spawns the node hierarchy of the joystick: an enlarged invisible touch
/// area, the visual base circle, and the moving knob. Base and knob are
/// flex-centered in their parents and displaced via relative `left`/`top`.
pub fn spawn_joystick(mut commands: Commands, config: Res<VjoyConfig>) {
    let base_visibility = if config.show_on_touch {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };

    commands
        .spawn((
            VjoyTouchArea,
            Interaction::default(),
            RelativeCursorPosition::default(),
            Node {
                width: Val::Px(config.touch_area_size()),
                height: Val::Px(config.touch_area_size()),
                position_type: PositionType::Absolute,
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            // The touch area stays transparent; the base carries the visuals.
            BackgroundColor(Color::NONE),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    VjoyBase::default(),
                    Node {
                        width: Val::Px(config.base_size()),
                        height: Val::Px(config.base_size()),
                        position_type: PositionType::Relative,
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(config.base_color.with_alpha(config.alpha_idle)),
                    BorderRadius::all(Val::Percent(50.0)),
                    base_visibility,
                ))
                .with_children(|parent| {
                    parent.spawn((
                        VjoyKnob,
                        Node {
                            width: Val::Px(config.knob_size),
                            height: Val::Px(config.knob_size),
                            position_type: PositionType::Relative,
                            ..default()
                        },
                        BackgroundColor(config.knob_color.with_alpha(config.alpha_idle)),
                        BorderRadius::all(Val::Percent(50.0)),
                    ));
                });
        });
}

/// Reapplies placement and sizes from [VjoyConfig] against the current
/// window size. Runs every frame so config edits and window resizes take
/// effect immediately.
fn joystick_layout_system(
    config: Res<VjoyConfig>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut q_area: Query<&mut Node, (With<VjoyTouchArea>, Without<VjoyBase>, Without<VjoyKnob>)>,
    mut q_base: Query<&mut Node, (With<VjoyBase>, Without<VjoyTouchArea>, Without<VjoyKnob>)>,
    mut q_knob: Query<&mut Node, (With<VjoyKnob>, Without<VjoyTouchArea>, Without<VjoyBase>)>,
) {
    let Ok(window) = q_window.single() else { return; };
    let Ok(mut area_node) = q_area.single_mut() else { return; };

    let canvas = Vec2::new(window.width(), window.height());
    let center = anchored_offset(config.placement, canvas, config.margin, config.custom_offset);
    let area_size = config.touch_area_size();

    area_node.width = Val::Px(area_size);
    area_node.height = Val::Px(area_size);
    area_node.left = Val::Px(canvas.x * 0.5 + center.x - area_size * 0.5);
    area_node.bottom = Val::Px(canvas.y * 0.5 + center.y - area_size * 0.5);

    if let Ok(mut base_node) = q_base.single_mut() {
        base_node.width = Val::Px(config.base_size());
        base_node.height = Val::Px(config.base_size());
    }
    if let Ok(mut knob_node) = q_knob.single_mut() {
        knob_node.width = Val::Px(config.knob_size);
        knob_node.height = Val::Px(config.knob_size);
    }
}

/// Reads mouse and touch input to update [VjoyOutput] and broadcast
/// [JoystickMessage]s.
///
/// ### Gesture lifecycle:
/// - **Press** claims the pointer and recenters the base at the press point.
/// - **Drag** clamps the knob to `range` px while broadcasting the
///   normalized (dead-zone filtered) direction.
/// - **Release** resets everything and broadcasts `Vec2::ZERO`.
fn joystick_input_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    config: Res<VjoyConfig>,
    q_area: Query<(&Interaction, &RelativeCursorPosition, &ComputedNode), With<VjoyTouchArea>>,
    mut q_base: Query<&mut VjoyBase>,
    mut output: ResMut<VjoyOutput>,
    mut active_touch: ResMut<ActiveTouch>,
    mut messages: MessageWriter<JoystickMessage>,
) {
    let Ok((interaction, relative_cursor, computed_node)) = q_area.single() else { return; };
    let Ok(mut base) = q_base.single_mut() else { return; };

    let area_size = computed_node.size();

    if active_touch.id.is_none() && config.visible {
        if *interaction == Interaction::Pressed {
            active_touch.id = Some(MOUSE_POINTER);
        }
        for touch in touches.iter_just_pressed() {
            if relative_cursor.cursor_over() {
                active_touch.id = Some(touch.id());
            }
        }

        if active_touch.id.is_some() {
            // Gesture start: recenter on the press point (local px, +y down).
            if let Some(pos) = relative_cursor.normalized {
                base.center = pos * area_size;
            }
            base.knob_offset = Vec2::ZERO;
            output.active = true;
        }
    }

    let mut input_released = false;
    if let Some(id) = active_touch.id {
        if !config.visible {
            input_released = true;
        } else if id == MOUSE_POINTER {
            if !mouse_buttons.pressed(MouseButton::Left) {
                input_released = true;
            }
        } else if touches.get_pressed(id).is_none() {
            input_released = true;
        }

        if !input_released {
            if let Some(pos) = relative_cursor.normalized {
                let offset = pos * area_size - base.center;
                let sample = joystick_sample(offset, config.range, config.dead_zone);
                base.knob_offset = sample.knob;
                // UI space is +y down; the broadcast direction is +y up.
                output.dir = Vec2::new(sample.dir.x, -sample.dir.y);
                messages.write(JoystickMessage(output.dir));
            }
        }
    }

    if input_released {
        active_touch.id = None;
        messages.write(release_reset(&mut base, &mut output));
    }
}

/// Clears all gesture state back to the origin and returns the zero
/// broadcast that ends the gesture, regardless of what the drag left behind.
pub(crate) fn release_reset(base: &mut VjoyBase, output: &mut VjoyOutput) -> JoystickMessage {
    base.center = Vec2::ZERO;
    base.knob_offset = Vec2::ZERO;
    output.dir = Vec2::ZERO;
    output.active = false;
    JoystickMessage(Vec2::ZERO)
}

/// Swaps the flat circle visuals for the configured images (and back)
/// whenever the config changes.
fn joystick_style_system(
    mut commands: Commands,
    config: Res<VjoyConfig>,
    q_base: Query<Entity, With<VjoyBase>>,
    q_knob: Query<Entity, With<VjoyKnob>>,
) {
    if !config.is_changed() {
        return;
    }
    let Ok(base) = q_base.single() else { return; };
    let Ok(knob) = q_knob.single() else { return; };

    match &config.base_image {
        Some(image) => {
            commands.entity(base).insert(ImageNode::new(image.clone()));
        }
        None => {
            commands.entity(base).remove::<ImageNode>();
        }
    }
    match &config.knob_image {
        Some(image) => {
            commands.entity(knob).insert(ImageNode::new(image.clone()));
        }
        None => {
            commands.entity(knob).remove::<ImageNode>();
        }
    }
}

/// Updates the visual offsets, visibility, and tint/opacity of the joystick.
fn joystick_render_system(
    config: Res<VjoyConfig>,
    output: Res<VjoyOutput>,
    mut q_area_vis: Query<&mut Visibility, (With<VjoyTouchArea>, Without<VjoyBase>)>,
    mut q_base: Query<
        (&VjoyBase, &mut Node, &mut Visibility),
        (With<VjoyBase>, Without<VjoyTouchArea>, Without<VjoyKnob>),
    >,
    mut q_knob: Query<&mut Node, (With<VjoyKnob>, Without<VjoyTouchArea>, Without<VjoyBase>)>,
    mut q_base_paint: Query<
        (&mut BackgroundColor, Option<&mut ImageNode>),
        (With<VjoyBase>, Without<VjoyKnob>),
    >,
    mut q_knob_paint: Query<
        (&mut BackgroundColor, Option<&mut ImageNode>),
        (With<VjoyKnob>, Without<VjoyBase>),
    >,
) {
    let Ok((base, mut base_node, mut base_vis)) = q_base.single_mut() else { return; };
    let Ok(mut knob_node) = q_knob.single_mut() else { return; };

    if let Ok(mut area_vis) = q_area_vis.single_mut() {
        *area_vis = if config.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    *base_vis = if config.show_on_touch && !output.active {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };

    base_node.left = Val::Px(base.center.x);
    base_node.top = Val::Px(base.center.y);
    knob_node.left = Val::Px(base.knob_offset.x);
    knob_node.top = Val::Px(base.knob_offset.y);

    let alpha = if output.active {
        config.alpha_active
    } else {
        config.alpha_idle
    };

    if let Ok((mut bg, image)) = q_base_paint.single_mut() {
        apply_paint(&mut bg, image, config.base_color, alpha);
    }
    if let Ok((mut bg, image)) = q_knob_paint.single_mut() {
        apply_paint(&mut bg, image, config.knob_color, alpha);
    }
}

fn apply_paint(
    background: &mut BackgroundColor,
    image: Option<Mut<ImageNode>>,
    tint: Color,
    alpha: f32,
) {
    match image {
        Some(mut image) => {
            image.color = tint.with_alpha(alpha);
            background.0 = Color::NONE;
        }
        None => {
            background.0 = tint.with_alpha(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn sample_within_range_is_normalized_offset() {
        let sample = joystick_sample(Vec2::new(30.0, 40.0), 50.0, 0.1);
        assert!(approx(sample.dir, Vec2::new(0.6, 0.8)));
        // Already at the boundary, the knob stays put.
        assert!(approx(sample.knob, Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn sample_over_range_clamps_knob_not_direction() {
        let sample = joystick_sample(Vec2::new(60.0, 80.0), 50.0, 0.1);
        assert!(approx(sample.dir, Vec2::new(0.6, 0.8)));
        assert!(approx(sample.knob, Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn dead_zone_checks_the_normalized_vector() {
        // Raw distance ~2.24 would be inside a positional dead band, but the
        // check runs on the normalized magnitude (~1.0), so the direction
        // survives even an aggressive dead zone.
        let sample = joystick_sample(Vec2::new(2.0, 1.0), 50.0, 0.5);
        assert!(approx(sample.dir, Vec2::new(0.894_427, 0.447_213)));
    }

    #[test]
    fn dead_zone_boundary_is_strict() {
        let kept = joystick_sample(Vec2::new(10.0, 0.0), 50.0, 1.0);
        assert!(approx(kept.dir, Vec2::X));

        let muted = joystick_sample(Vec2::new(10.0, 0.0), 50.0, 1.5);
        assert_eq!(muted.dir, Vec2::ZERO);
        // Muting the direction leaves the knob where the finger is.
        assert!(approx(muted.knob, Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn zero_offset_yields_zero_everything() {
        let sample = joystick_sample(Vec2::ZERO, 50.0, 0.1);
        assert_eq!(sample.dir, Vec2::ZERO);
        assert_eq!(sample.knob, Vec2::ZERO);
    }

    #[test]
    fn release_resets_to_origin_and_broadcasts_zero() {
        let mut base = VjoyBase {
            center: Vec2::new(40.0, -25.0),
            knob_offset: Vec2::new(30.0, 40.0),
        };
        let mut output = VjoyOutput {
            dir: Vec2::new(0.6, 0.8),
            active: true,
        };

        let JoystickMessage(broadcast) = release_reset(&mut base, &mut output);

        assert_eq!(broadcast, Vec2::ZERO);
        assert_eq!(output.dir, Vec2::ZERO);
        assert!(!output.active);
        assert_eq!(base.center, Vec2::ZERO);
        assert_eq!(base.knob_offset, Vec2::ZERO);
    }

    #[test]
    fn corner_placements_sit_margin_in_from_each_corner() {
        let canvas = Vec2::new(800.0, 600.0);
        let m = 50.0;
        let custom = Vec2::new(12.0, -34.0);

        assert_eq!(
            anchored_offset(VjoyPlacement::BottomLeft, canvas, m, custom),
            Vec2::new(-350.0, -250.0)
        );
        assert_eq!(
            anchored_offset(VjoyPlacement::BottomRight, canvas, m, custom),
            Vec2::new(350.0, -250.0)
        );
        assert_eq!(
            anchored_offset(VjoyPlacement::TopLeft, canvas, m, custom),
            Vec2::new(-350.0, 250.0)
        );
        assert_eq!(
            anchored_offset(VjoyPlacement::TopRight, canvas, m, custom),
            Vec2::new(350.0, 250.0)
        );
        assert_eq!(
            anchored_offset(VjoyPlacement::Custom, canvas, m, custom),
            custom
        );
    }
}
