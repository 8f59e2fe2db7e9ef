pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;

pub use config::SimulationConfig;
pub use constants::*;
pub use control::environment::EnvironmentConstants;
pub use control::vehicle::VehicleConfig;
pub use errors::{IntegrationError, SimulationError, SolveFailure};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::forces::{AtmosphereSample, FlightModel, StepCoefficients};
pub use trajectory_system::integrator::{resolve_step, CancelToken, TrajectoryIntegrator};
pub use trajectory_system::quadratic::{select_root, solve_quadratic, QuadraticRoots};
pub use trajectory_system::series::{PhaseEnd, TrajectorySeries};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::csv_export::{read_series_file, write_series_file};
pub use telemetry_system::snapshot::{FileSink, FlightSnapshot, LogSink, NullSink, SnapshotSink};
pub use telemetry_system::telemetry::Telemetry;
