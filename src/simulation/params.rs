//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravity and coefficient of restitution,
//! - start height, visible height, body radius,
//! - the frame-delta clamp and the rest/peak thresholds

#[derive(Debug, Clone)]
pub struct Parameters {
    pub gravity: f64,        // signed; negative = toward the ground (up-positive axis)
    pub restitution: f64,    // coefficient of restitution, [0, 1]
    pub start_height: f64,   // release height used by reset
    pub visible_height: f64, // top of the visible panel, ceiling clamp bound
    pub radius: f64,         // body radius
    pub dt_max: f64,         // upper bound on a single step's dt
    pub rest_speed: f64,     // post-contact speed below which the body snaps to rest
    pub peak_eps: f64,       // minimum height accepted as a real apex
}

impl Parameters {
    /// Frame-delta clamp shared by every scenario: one stalled frame may not
    /// advance physics by more than 50 ms.
    pub const DT_MAX: f64 = 0.05;
}
