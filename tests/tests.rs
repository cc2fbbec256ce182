use rebound::simulation::controller::Controller;
use rebound::simulation::integrator::integrate_step;
use rebound::simulation::params::Parameters;
use rebound::simulation::states::{Body, RunState};
use rebound::simulation::telemetry::SampleBuffer;
use rebound::RestitutionEstimator;
use rebound::{Scenario, ScenarioConfig};

/// Default metric parameters for tests
pub fn test_params(restitution: f64) -> Parameters {
    Parameters {
        gravity: -9.81,
        restitution,
        start_height: 1.4,
        visible_height: 2.0,
        radius: 0.05,
        dt_max: Parameters::DT_MAX,
        rest_speed: 0.2,
        peak_eps: 1e-3,
    }
}

/// Controller already switched to Running
pub fn running_controller(restitution: f64) -> Controller {
    let mut ctl = Controller::new(test_params(restitution), RunState::Paused, 600);
    ctl.toggle_play_pause();
    ctl
}

/// Drive the integrator until `n` apexes have been recorded, returning their heights
pub fn collect_peaks(restitution: f64, dt: f64, n: usize) -> Vec<f64> {
    let params = test_params(restitution);
    let mut body = Body::released_at(params.start_height);
    let mut peaks = Vec::new();

    let mut steps = 0usize;
    while peaks.len() < n && steps < 2_000_000 {
        let outcome = integrate_step(&mut body, dt, &params);
        if let Some(p) = outcome.peak {
            peaks.push(p);
        }
        if outcome.at_rest {
            break;
        }
        steps += 1;
    }
    peaks
}

// ==================================================================================
// Integrator invariants
// ==================================================================================

#[test]
fn height_stays_inside_panel_for_all_dt() {
    for dt in [0.0, 0.001, 0.016, 0.05, 0.2] {
        let params = test_params(0.95);
        let mut body = Body::released_at(params.start_height);

        for i in 0..20_000 {
            integrate_step(&mut body, dt, &params);
            assert!(
                body.height >= 0.0,
                "height below ground at step {i}, dt {dt}: {}",
                body.height
            );
            assert!(
                body.height <= params.visible_height - params.radius + 1e-12,
                "height above panel at step {i}, dt {dt}: {}",
                body.height
            );
        }
    }
}

#[test]
fn peaks_decay_for_lossy_restitution() {
    let peaks = collect_peaks(0.9, 0.002, 5);
    assert_eq!(peaks.len(), 5, "expected five apexes, got {}", peaks.len());

    for pair in peaks.windows(2) {
        assert!(
            pair[1] <= pair[0] + 1e-9,
            "peaks must be non-increasing: {} then {}",
            pair[0],
            pair[1]
        );
    }

    // Successive ratio should sit near r^2 = 0.81
    let ratio = peaks[1] / peaks[0];
    assert!(
        (ratio - 0.81).abs() < 0.03,
        "peak ratio should track r^2, got {}",
        ratio
    );
}

#[test]
fn peaks_conserved_for_elastic_restitution() {
    let peaks = collect_peaks(1.0, 0.001, 3);
    assert_eq!(peaks.len(), 3);

    // Position clamping at contact injects at most one step of travel per
    // bounce, so the apex may creep by a few percent but not drift away
    for p in &peaks {
        assert!(
            (p - 1.4).abs() < 0.07,
            "elastic peak should stay near the release height, got {}",
            p
        );
    }
}

#[test]
fn contact_velocity_ratio_matches_restitution() {
    // End-to-end reference scenario: h0 = 1.40 m, g = 9.81, r = 0.90,
    // fixed dt = 0.01 s
    let mut ctl = running_controller(0.9);
    let dt = 0.01;

    let mut v_pre = ctl.velocity();
    let mut checked = false;
    for _ in 0..200 {
        let contacts_before = ctl.contact_count();
        ctl.step(dt);
        if ctl.contact_count() > contacts_before {
            // Impact speed entering the contact is the pre-step velocity
            // plus one gravity kick
            let impact = (v_pre - 9.81 * dt).abs();
            let ratio = ctl.velocity().abs() / impact;
            assert!(ctl.velocity() > 0.0, "velocity sign must flip upward");
            assert!(
                (ratio - 0.9).abs() < 0.009,
                "rebound ratio should be ~0.90, got {}",
                ratio
            );
            checked = true;
            break;
        }
        v_pre = ctl.velocity();
    }
    assert!(checked, "no ground contact within 2 s of simulation");
}

#[test]
fn dead_ball_rests_at_ground_and_pauses() {
    // r = 0: first contact absorbs everything, then the run auto-pauses
    let mut ctl = running_controller(0.0);

    for _ in 0..2_000 {
        ctl.step(0.01);
        if ctl.run_state() == RunState::Paused {
            break;
        }
    }

    assert_eq!(ctl.run_state(), RunState::Paused, "run should stop on rest");
    assert!(ctl.is_at_rest(), "the stop must be marked automatic");
    assert_eq!(ctl.height(), 0.0, "body should rest exactly on the ground");
    assert_eq!(ctl.velocity(), 0.0);

    // Further frames change nothing
    let clock = ctl.clock();
    ctl.step(0.01);
    assert_eq!(ctl.clock(), clock);
    assert_eq!(ctl.height(), 0.0);
}

// ==================================================================================
// Restitution estimator
// ==================================================================================

#[test]
fn estimator_exact_on_noiseless_peaks() {
    let mut est = RestitutionEstimator::new(1e-3);
    est.observe_peak(1.0);
    est.observe_peak(0.64);
    let r = est.estimate().expect("estimate after two peaks");
    assert!((r - 0.8).abs() < 1e-12, "sqrt(0.64/1.0) = 0.8, got {}", r);
}

#[test]
fn estimator_tracks_live_run() {
    let mut ctl = running_controller(0.9);

    // Run until two apexes have been seen
    for _ in 0..600_000 {
        ctl.step(0.001);
        if ctl.peak_count() >= 2 {
            break;
        }
    }

    let r = ctl
        .restitution_estimate()
        .expect("two apexes should publish an estimate");
    assert!(
        (r - 0.9).abs() < 0.02,
        "estimate should track the configured coefficient, got {}",
        r
    );
}

// ==================================================================================
// Telemetry ring buffer
// ==================================================================================

#[test]
fn buffer_keeps_most_recent_capacity_samples() {
    let mut buf = SampleBuffer::with_capacity(600);
    for i in 0..1500 {
        buf.push(i as f64 * 0.01, 1.0);
    }

    assert_eq!(buf.len(), 600, "buffer must hold exactly its capacity");

    let times: Vec<f64> = buf.iter().map(|s| s.t).collect();
    assert_eq!(times.len(), 600);
    assert!(
        (times[0] - 900.0 * 0.01).abs() < 1e-12,
        "oldest live sample should be push 900, got t = {}",
        times[0]
    );
    for pair in times.windows(2) {
        assert!(
            pair[1] > pair[0],
            "times must be strictly increasing: {} then {}",
            pair[0],
            pair[1]
        );
    }
}

// ==================================================================================
// Controller state machine
// ==================================================================================

#[test]
fn paused_frames_change_nothing() {
    let mut ctl = Controller::new(test_params(0.9), RunState::Paused, 600);

    let height = ctl.height();
    let clock = ctl.clock();
    for _ in 0..100 {
        ctl.step(0.016);
    }

    assert_eq!(ctl.height(), height, "body must stay frozen while paused");
    assert_eq!(ctl.velocity(), 0.0);
    assert_eq!(ctl.clock(), clock, "clock must not advance while paused");
    assert_eq!(ctl.samples().count(), 0, "no samples while paused");
}

#[test]
fn reset_is_idempotent() {
    let mut ctl = running_controller(0.9);
    for _ in 0..500 {
        ctl.step(0.016);
    }
    ctl.set_restitution(0.75);

    ctl.reset();
    let once = (
        ctl.height(),
        ctl.velocity(),
        ctl.clock(),
        ctl.contact_count(),
        ctl.samples().count(),
        ctl.restitution_estimate(),
        ctl.run_state(),
    );

    ctl.reset();
    let twice = (
        ctl.height(),
        ctl.velocity(),
        ctl.clock(),
        ctl.contact_count(),
        ctl.samples().count(),
        ctl.restitution_estimate(),
        ctl.run_state(),
    );

    assert_eq!(once, twice, "double reset must equal a single reset");
    assert_eq!(once.0, 1.4, "body back at the start height");
    assert_eq!(once.2, 0.0, "clock zeroed");
    assert!(once.5.is_none(), "estimate cleared");

    // The adjusted coefficient persists across resets
    assert!((ctl.restitution() - 0.75).abs() < 1e-12);
}

#[test]
fn frame_gap_is_clamped_at_the_controller() {
    let mut ctl = running_controller(0.9);

    // A 10 s stall may only advance the simulation by dt_max
    ctl.step(10.0);
    assert!(
        (ctl.clock() - Parameters::DT_MAX).abs() < 1e-12,
        "clock advanced by {} instead of the clamp",
        ctl.clock()
    );
}

#[test]
fn control_inputs_are_clamped_to_sane_ranges() {
    let mut ctl = Controller::new(test_params(0.9), RunState::Paused, 600);

    ctl.set_restitution(1.5);
    assert_eq!(ctl.restitution(), 1.0);
    ctl.adjust_restitution(-3.0);
    assert_eq!(ctl.restitution(), 0.0);

    ctl.set_start_height(100.0);
    assert!(
        ctl.start_height() <= ctl.visible_height() - ctl.radius() + 1e-12,
        "start height must stay inside the panel"
    );
    ctl.set_start_height(-1.0);
    assert_eq!(ctl.start_height(), 0.0);

    // Shrinking the panel pulls the start height back in range
    ctl.set_start_height(1.9);
    ctl.set_visible_height(1.0);
    assert!(ctl.start_height() <= 1.0 - ctl.radius() + 1e-12);
}

#[test]
fn clear_history_leaves_body_and_clock_alone() {
    let mut ctl = running_controller(0.9);
    for _ in 0..50 {
        ctl.step(0.016);
    }

    let height = ctl.height();
    let clock = ctl.clock();
    ctl.clear_history();

    assert_eq!(ctl.samples().count(), 0);
    assert_eq!(ctl.height(), height);
    assert_eq!(ctl.clock(), clock);
}

// ==================================================================================
// Scenario configuration
// ==================================================================================

#[test]
fn scenario_builder_sanitizes_config() {
    let yaml = r#"
display:
  unit: "m"
  plot_window: 10.0

parameters:
  gravity: -9.81      # wrong sign in the file
  restitution: 1.7    # out of range
  rest_speed: 0.2

body:
  start_height: 5.0   # above the panel
  radius: 0.05
  visible_height: 2.0
"#;

    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("valid scenario YAML");
    let scenario = Scenario::build_scenario(cfg);
    let ctl = &scenario.controller;

    assert_eq!(ctl.restitution(), 1.0, "restitution clamped to [0, 1]");
    assert!(
        ctl.start_height() <= ctl.visible_height() - ctl.radius() + 1e-12,
        "start height pulled inside the panel"
    );
    assert_eq!(ctl.run_state(), RunState::Paused, "default is paused");
    assert_eq!(ctl.height(), ctl.start_height());
}

#[test]
fn autostart_scenario_begins_running() {
    let yaml = r#"
display:
  unit: "cm"

parameters:
  gravity: 981.0
  restitution: 0.9
  rest_speed: 5.0
  autostart: true

body:
  start_height: 140.0
  radius: 5.0
  visible_height: 200.0
"#;

    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("valid scenario YAML");
    let mut scenario = Scenario::build_scenario(cfg);

    assert_eq!(scenario.controller.run_state(), RunState::Running);

    // Reset returns to the configured initial state, which is running here
    scenario.controller.step(0.016);
    scenario.controller.reset();
    assert_eq!(scenario.controller.run_state(), RunState::Running);
}
