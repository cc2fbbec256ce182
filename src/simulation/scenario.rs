//! Build a fully-initialized runtime scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! inserted into Bevy as a `Resource`:
//! - the [`Controller`] owning body, parameters, clock, and buffers
//! - display settings consumed only by the viewer
//!
//! Every numeric input is sanitized here: restitution is clamped to [0, 1],
//! gravity is normalized to the signed toward-ground convention, heights are
//! pulled into the visible panel. Bad configuration degrades to the nearest
//! sane operating point instead of failing.

use bevy::prelude::Resource;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::controller::Controller;
use crate::simulation::params::Parameters;
use crate::simulation::states::RunState;
use crate::simulation::telemetry::DEFAULT_CAPACITY;

/// Display settings read by the viewer each frame.
#[derive(Debug, Clone)]
pub struct Display {
    pub unit: String,     // length unit label for the info strip
    pub plot_window: f64, // seconds of trace kept on screen
}

/// Bevy resource representing a fully-initialized bounce scenario.
///
/// Inserted as a `Resource` and consumed by the input, physics-step, and
/// drawing systems.
#[derive(Resource)]
pub struct Scenario {
    pub controller: Controller,
    pub display: Display,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        let b_cfg = &cfg.body;
        let p_cfg = &cfg.parameters;

        // Geometry first: the visible height bounds everything else
        let radius = b_cfg.radius.max(f64::MIN_POSITIVE);
        let visible_height = b_cfg.visible_height.max(radius * 2.0);
        let start_height = b_cfg.start_height.clamp(0.0, visible_height - radius);

        let parameters = Parameters {
            // Configured as a magnitude; stored signed so the integrator
            // always accelerates the body toward the ground
            gravity: -p_cfg.gravity.abs(),
            restitution: p_cfg.restitution.clamp(0.0, 1.0),
            start_height,
            visible_height,
            radius,
            dt_max: Parameters::DT_MAX,
            rest_speed: p_cfg.rest_speed.abs(),
            // Apex noise floor scales with the unit system: 1 mm at metric
            // scale, the same physical length at centimeter scale
            peak_eps: 1e-3 * (p_cfg.gravity.abs() / 9.81),
        };

        let initial_state = if p_cfg.autostart.unwrap_or(false) {
            RunState::Running
        } else {
            RunState::Paused
        };

        let capacity = p_cfg.history.unwrap_or(DEFAULT_CAPACITY);
        let controller = Controller::new(parameters, initial_state, capacity);

        let display = Display {
            unit: cfg.display.unit.clone(),
            plot_window: cfg.display.plot_window.unwrap_or(10.0).max(0.1),
        };

        Self {
            controller,
            display,
        }
    }
}
