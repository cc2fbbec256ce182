use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::simulation::scenario::Scenario;
use crate::simulation::states::RunState;

/// Marker for the ball entity
#[derive(Component)]
struct Ball;

/// Marker for the numeric info strip
#[derive(Component)]
struct InfoText;

const WINDOW_W: f32 = 900.0;
const WINDOW_H: f32 = 560.0;

/// Pixel height of both panels; wired into the unit converter at startup
const PANEL_PX: f32 = 440.0;

/// Screen y of the ground line / plot baseline
const GROUND_Y: f32 = -220.0;

// Simulation panel (left) and plot panel (right), screen coordinates
const SIM_LEFT: f32 = -434.0;
const SIM_RIGHT: f32 = -40.0;
const BALL_X: f32 = -237.0;
const PLOT_LEFT: f32 = 60.0;
const PLOT_RIGHT: f32 = 434.0;

pub fn run_viewer(scenario: Scenario) {
    println!(
        "run_viewer: h0 = {:.2}, r = {:.2}, visible = {:.2}",
        scenario.controller.start_height(),
        scenario.controller.restitution(),
        scenario.controller.visible_height()
    );

    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "rebound".into(),
                resolution: (WINDOW_W, WINDOW_H).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_scene_system)
        .add_systems(
            Update,
            (
                keyboard_input_system,
                physics_step_system,
                sync_ball_system,
                draw_panels_system,
                update_info_text_system,
            ),
        )
        .run();
}

/// Startup system: camera, ball mesh, info text; wires the panel pixel
/// height into the unit converter
fn setup_scene_system(
    mut commands: Commands,
    mut scenario: ResMut<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    scenario.controller.set_panel_px(PANEL_PX as f64);

    // Unit-radius circle; the per-frame sync system scales it to the
    // current render radius so unit-scale changes take effect live
    commands.spawn((
        MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(1.0))),
            material: materials.add(ColorMaterial::from(Color::srgb(1.0, 0.71, 0.0))),
            transform: Transform::from_xyz(BALL_X, GROUND_Y, 1.0),
            ..Default::default()
        },
        Ball,
    ));

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 14.0,
                color: Color::srgb(0.85, 0.85, 0.85),
                ..Default::default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(14.0),
            ..Default::default()
        }),
        InfoText,
    ));
}

/// Keyboard controls, each mapped 1:1 onto a controller operation:
/// Space = play/pause, R = reset, Up/Down = restitution +-0.01,
/// C = clear trace, Left/Right = start height, PageDown/PageUp = visible height
fn keyboard_input_system(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    let ctl = &mut scenario.controller;

    // Adjustment steps scale with the panel so they work at any unit scale
    let h_step = ctl.visible_height() / 20.0;

    if keys.just_pressed(KeyCode::Space) {
        ctl.toggle_play_pause();
        info!("run state -> {:?}", ctl.run_state());
    }
    if keys.just_pressed(KeyCode::KeyR) {
        ctl.reset();
        info!("reset: body released at {:.2}", ctl.start_height());
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        ctl.adjust_restitution(0.01);
        info!("restitution -> {:.2}", ctl.restitution());
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        ctl.adjust_restitution(-0.01);
        info!("restitution -> {:.2}", ctl.restitution());
    }
    if keys.just_pressed(KeyCode::KeyC) {
        ctl.clear_history();
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        ctl.set_start_height(ctl.start_height() + h_step);
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        ctl.set_start_height(ctl.start_height() - h_step);
    }
    if keys.just_pressed(KeyCode::PageUp) {
        ctl.set_visible_height(ctl.visible_height() + h_step * 2.0);
    }
    if keys.just_pressed(KeyCode::PageDown) {
        ctl.set_visible_height(ctl.visible_height() - h_step * 2.0);
    }
}

/// Per-frame physics: hand the controller the elapsed wall-clock delta.
/// The controller clamps it and is a no-op while paused
fn physics_step_system(
    time: Res<Time>,
    mut scenario: ResMut<Scenario>,
    mut was_at_rest: Local<bool>,
) {
    scenario.controller.step(time.delta_seconds() as f64);

    let at_rest = scenario.controller.is_at_rest();
    if at_rest && !*was_at_rest {
        info!(
            "came to rest after {} contacts at t = {:.2} s",
            scenario.controller.contact_count(),
            scenario.controller.clock()
        );
    }
    *was_at_rest = at_rest;
}

/// Place and scale the ball from the controller's state; runs while paused
/// too so the frozen position stays visible
fn sync_ball_system(
    scenario: Res<Scenario>,
    mut query: Query<&mut Transform, With<Ball>>,
) {
    let ctl = &scenario.controller;
    let scale = ctl.scale();
    let radius_px = scale.to_render(ctl.radius()) as f32;
    let center_px = scale.to_render(ctl.height() + ctl.radius()) as f32;

    for mut transform in &mut query {
        transform.translation.x = BALL_X;
        transform.translation.y = GROUND_Y + center_px;
        transform.scale = Vec3::splat(radius_px.max(1.0));
    }
}

/// Gizmo pass: ground line, height axis, plot frame, and the windowed
/// height-vs-time trace
fn draw_panels_system(mut gizmos: Gizmos, scenario: Res<Scenario>) {
    let ctl = &scenario.controller;
    let scale = ctl.scale();

    let grid = Color::srgb(0.25, 0.25, 0.28);
    let axis = Color::srgb(0.55, 0.55, 0.6);
    let trace = Color::srgb(0.95, 0.95, 0.95);

    // Ground
    gizmos.line_2d(
        Vec2::new(SIM_LEFT + 10.0, GROUND_Y),
        Vec2::new(SIM_RIGHT - 10.0, GROUND_Y),
        axis,
    );

    // Height axis with quarter ticks
    let axis_x = SIM_LEFT + 24.0;
    gizmos.line_2d(
        Vec2::new(axis_x, GROUND_Y),
        Vec2::new(axis_x, GROUND_Y + PANEL_PX),
        axis,
    );
    for k in 1..=4 {
        let h = ctl.visible_height() * k as f64 / 4.0;
        let y = GROUND_Y + scale.to_render(h) as f32;
        gizmos.line_2d(Vec2::new(axis_x - 4.0, y), Vec2::new(axis_x, y), axis);
        gizmos.line_2d(Vec2::new(axis_x, y), Vec2::new(SIM_RIGHT - 10.0, y), grid);
    }

    // Plot frame
    gizmos.line_2d(
        Vec2::new(PLOT_LEFT, GROUND_Y),
        Vec2::new(PLOT_LEFT, GROUND_Y + PANEL_PX),
        axis,
    );
    gizmos.line_2d(
        Vec2::new(PLOT_LEFT, GROUND_Y),
        Vec2::new(PLOT_RIGHT, GROUND_Y),
        axis,
    );

    // Trace: read-side window over the ring buffer, newest plot_window
    // seconds mapped onto the panel width
    let window = scenario.display.plot_window;
    let t0 = ctl.clock() - window;
    let points: Vec<Vec2> = ctl
        .samples()
        .filter(|s| s.t >= t0)
        .map(|s| {
            let x = PLOT_LEFT + (((s.t - t0) / window) as f32) * (PLOT_RIGHT - PLOT_LEFT);
            let y = GROUND_Y + scale.to_render(s.h) as f32;
            Vec2::new(x, y)
        })
        .collect();
    if points.len() >= 2 {
        gizmos.linestrip_2d(points, trace);
    }
}

fn update_info_text_system(scenario: Res<Scenario>, mut query: Query<&mut Text, With<InfoText>>) {
    let ctl = &scenario.controller;
    let unit = &scenario.display.unit;

    let state = match (ctl.run_state(), ctl.is_at_rest()) {
        (RunState::Running, _) => "running",
        (RunState::Paused, true) => "at rest",
        (RunState::Paused, false) => "paused",
    };
    let estimate = match ctl.restitution_estimate() {
        Some(r) => format!("{:.3}", r),
        None => "-".to_string(),
    };

    for mut text in &mut query {
        text.sections[0].value = format!(
            "t = {:6.2} s   h = {:6.3} {unit}   v = {:6.2} {unit}/s   contacts = {}   r = {:.2}   r_est = {}   [{}]",
            ctl.clock(),
            ctl.height(),
            ctl.velocity(),
            ctl.contact_count(),
            ctl.restitution(),
            estimate,
            state,
        );
    }
}
