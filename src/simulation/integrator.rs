//! Fixed-form time integrator for the falling body
//!
//! Semi-implicit (symplectic) Euler: the velocity update from gravity is
//! applied first and the updated velocity then advances the position, which
//! keeps the bounce oscillation stable where naive Euler drifts.
//!
//! One call advances the body by one frame's clamped `dt` and resolves at
//! most one ground contact. Apex detection is edge-triggered on the velocity
//! sign change across the gravity update, so a coarse `dt` can step past the
//! exact apex; the recorded peak is then low by up to one step's travel.

use super::params::Parameters;
use super::states::Body;

/// What a single integration step observed.
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    pub contact: bool,     // ground contact resolved this step
    pub peak: Option<f64>, // local apex height crossed this step, if any
    pub at_rest: bool,     // post-contact speed fell below the rest threshold
}

/// Advance `body` by one step of at most `params.dt_max` seconds.
///
/// Deterministic in its inputs; never reads the wall clock. The caller owns
/// the simulation clock and the contact counter and applies the same clamped
/// `dt` to both.
pub fn integrate_step(body: &mut Body, dt: f64, params: &Parameters) -> StepOutcome {
    // An anomalously long gap between frames (stalled tab, debugger pause)
    // must not tunnel the body through the ground
    let dt = dt.clamp(0.0, params.dt_max);

    let v_before = body.velocity;

    // Kick: v_n+1 = v_n + g dt (g < 0, toward the ground)
    body.velocity += params.gravity * dt;

    // Drift with the updated velocity: x_n+1 = x_n + dt v_n+1
    body.height += body.velocity * dt;

    // Apex: rising before the kick, falling or stationary after it.
    // The current height is the candidate peak; the estimator filters noise
    let peak = if v_before > 0.0 && body.velocity <= 0.0 {
        Some(body.height.max(0.0))
    } else {
        None
    };

    let mut contact = false;
    let mut at_rest = false;

    // Ground contact: clamp the lower surface onto the plane and reverse the
    // velocity scaled by the coefficient of restitution
    if body.height <= 0.0 {
        body.height = 0.0;
        body.velocity = -params.restitution * body.velocity;
        contact = true;

        // Below the rest threshold the rebound is not worth integrating:
        // snap to exact rest and let the controller pause the run
        if body.velocity.abs() < params.rest_speed {
            body.velocity = 0.0;
            at_rest = true;
        }
    }

    // Ceiling: keep the body inside the visible panel even with a
    // mis-configured gravity sign or restitution at the top of its range
    let ceiling = params.visible_height - params.radius;
    if body.height > ceiling {
        body.height = ceiling;
        if body.velocity > 0.0 {
            body.velocity = 0.0;
        }
    }

    StepOutcome {
        contact,
        peak,
        at_rest,
    }
}
