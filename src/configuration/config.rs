//! Configuration types for loading bounce scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`DisplayConfig`]    – presentation options (unit label, plot window)
//! - [`ParametersConfig`] – physical and numerical parameters
//! - [`BodyConfig`]       – body geometry and release height
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! The shipped metric scenario:
//!
//! ```yaml
//! display:
//!   unit: "m"            # label shown next to lengths
//!   plot_window: 10.0    # seconds of trace kept on screen
//!
//! parameters:
//!   gravity: 9.81        # magnitude, length-units/s^2
//!   restitution: 0.90    # coefficient of restitution, clamped to [0, 1]
//!   rest_speed: 0.2      # rebound speed below which the body stops
//!   history: 600         # trace buffer capacity (optional)
//!   autostart: false     # begin running instead of paused (optional)
//!
//! body:
//!   start_height: 1.40   # release height
//!   radius: 0.05
//!   visible_height: 2.0  # panel top in length units
//! ```
//!
//! The scenario builder maps this configuration into the runtime controller,
//! sanitizing every numeric input rather than rejecting it.

use serde::Deserialize;

/// Presentation options that never affect the physics.
#[derive(Deserialize, Debug, Clone)]
pub struct DisplayConfig {
    pub unit: String, // length unit label, e.g. "m" or "cm"
    pub plot_window: Option<f64>, // seconds of trace shown, default 10
}

/// Physical and numerical parameters for a scenario.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub gravity: f64,          // magnitude in length-units/s^2; sign is normalized
    pub restitution: f64,      // coefficient of restitution
    pub rest_speed: f64,       // snap-to-rest threshold, length-units/s
    pub history: Option<usize>, // trace buffer capacity, default 600
    pub autostart: Option<bool>, // initial run state, default paused
}

/// Body geometry and release height.
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub start_height: f64,   // release height in length units
    pub radius: f64,         // body radius in length units
    pub visible_height: f64, // panel top in length units, ceiling bound
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub display: DisplayConfig,
    pub parameters: ParametersConfig,
    pub body: BodyConfig,
}
