pub mod states;
pub mod params;
pub mod units;
pub mod integrator;
pub mod estimator;
pub mod telemetry;
pub mod controller;
pub mod scenario;
