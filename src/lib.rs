pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, RunState};
pub use simulation::params::Parameters;
pub use simulation::units::UnitScale;
pub use simulation::integrator::{integrate_step, StepOutcome};
pub use simulation::estimator::RestitutionEstimator;
pub use simulation::telemetry::{Sample, SampleBuffer, DEFAULT_CAPACITY};
pub use simulation::controller::Controller;
pub use simulation::scenario::{Display, Scenario};

pub use configuration::config::{BodyConfig, DisplayConfig, ParametersConfig, ScenarioConfig};

pub use visualization::rebound_vis::run_viewer;

pub use benchmark::benchmark::{bench_step, bench_telemetry};
