//! Simulation controller: run/pause state, the simulation clock, and the
//! per-frame orchestration of integrator, estimator, and telemetry
//!
//! The controller is the single owner of all mutable simulation state. The
//! presentation layer calls [`Controller::step`] once per rendered frame
//! with the elapsed wall-clock delta and reads the accessors for display;
//! no other collaborator mutates the body, the clock, or the buffers.

use super::estimator::RestitutionEstimator;
use super::integrator::integrate_step;
use super::params::Parameters;
use super::states::{Body, RunState};
use super::telemetry::{Sample, SampleBuffer};
use super::units::UnitScale;

pub struct Controller {
    body: Body,
    params: Parameters,
    scale: UnitScale,
    state: RunState,
    initial_state: RunState, // restored by reset; configured per scenario
    clock: f64,              // simulation seconds, advances only while running
    contacts: u32,
    at_rest: bool, // last pause was the automatic rest stop, not the user
    estimator: RestitutionEstimator,
    history: SampleBuffer,
}

impl Controller {
    pub fn new(params: Parameters, initial_state: RunState, history_capacity: usize) -> Self {
        let scale = UnitScale::new(params.visible_height, 1.0);
        let peak_eps = params.peak_eps;
        let start_height = params.start_height;
        Self {
            body: Body::released_at(start_height),
            params,
            scale,
            state: initial_state,
            initial_state,
            clock: 0.0,
            contacts: 0,
            at_rest: false,
            estimator: RestitutionEstimator::new(peak_eps),
            history: SampleBuffer::with_capacity(history_capacity),
        }
    }

    /// Advance the simulation by one frame.
    ///
    /// While paused this is a no-op: the body stays frozen, the clock does
    /// not advance, and no sample is recorded. While running, the elapsed
    /// delta is clamped, the body is integrated, the clock advances by the
    /// same clamped delta, any apex feeds the estimator, and the post-step
    /// height is pushed into the trace buffer.
    pub fn step(&mut self, elapsed: f64) {
        if self.state != RunState::Running {
            return;
        }

        let dt = elapsed.clamp(0.0, self.params.dt_max);
        let outcome = integrate_step(&mut self.body, dt, &self.params);
        self.clock += dt;

        if outcome.contact {
            self.contacts += 1;
        }
        if let Some(peak) = outcome.peak {
            self.estimator.observe_peak(peak);
        }

        self.history.push(self.clock, self.body.height.max(0.0));

        if outcome.at_rest {
            // Automatic stop, distinct from a user pause
            self.state = RunState::Paused;
            self.at_rest = true;
        }
    }

    pub fn toggle_play_pause(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
        self.at_rest = false;
    }

    /// Return to the configured initial state: body at the start height with
    /// zero velocity, zero clock, empty history, empty peak record.
    ///
    /// The restitution coefficient and the unit scale persist.
    pub fn reset(&mut self) {
        self.body = Body::released_at(self.params.start_height);
        self.state = self.initial_state;
        self.clock = 0.0;
        self.contacts = 0;
        self.at_rest = false;
        self.estimator.clear();
        self.history.clear();
    }

    pub fn set_restitution(&mut self, value: f64) {
        self.params.restitution = value.clamp(0.0, 1.0);
    }

    pub fn adjust_restitution(&mut self, delta: f64) {
        self.set_restitution(self.params.restitution + delta);
    }

    /// Change the visible panel height in length units. Applies immediately
    /// to the unit scale and the ceiling clamp; the start height is pulled
    /// back into range if the panel shrank below it.
    pub fn set_visible_height(&mut self, value: f64) {
        let floor = self.params.radius * 2.0;
        self.params.visible_height = value.max(floor);
        self.scale.set_visible_height(self.params.visible_height);
        self.params.start_height = self
            .params
            .start_height
            .min(self.params.visible_height - self.params.radius);
    }

    /// Change the release height used by the next `reset`.
    pub fn set_start_height(&mut self, value: f64) {
        let ceiling = self.params.visible_height - self.params.radius;
        self.params.start_height = value.clamp(0.0, ceiling);
    }

    /// Wire the panel's pixel height into the unit converter. Called by the
    /// presentation layer at startup and on window resize.
    pub fn set_panel_px(&mut self, px: f64) {
        self.scale.set_panel_px(px);
    }

    /// Drop the recorded trace without touching the body or the clock.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ---- read accessors for the presentation layer ----

    pub fn height(&self) -> f64 {
        self.body.height
    }

    pub fn velocity(&self) -> f64 {
        self.body.velocity
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// True when the last Running -> Paused transition was the automatic
    /// rest stop rather than a user action.
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    pub fn restitution(&self) -> f64 {
        self.params.restitution
    }

    pub fn restitution_estimate(&self) -> Option<f64> {
        self.estimator.estimate()
    }

    pub fn contact_count(&self) -> u32 {
        self.contacts
    }

    pub fn peak_count(&self) -> usize {
        self.estimator.peak_count()
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.history.iter()
    }

    pub fn scale(&self) -> &UnitScale {
        &self.scale
    }

    pub fn radius(&self) -> f64 {
        self.params.radius
    }

    pub fn visible_height(&self) -> f64 {
        self.params.visible_height
    }

    pub fn start_height(&self) -> f64 {
        self.params.start_height
    }
}
