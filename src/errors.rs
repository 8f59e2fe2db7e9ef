use thiserror::Error;

use crate::trajectory_system::series::TrajectorySeries;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No valid root at step {step} (t = {time:.5} s): all candidates complex or negative")]
    NoValidRoot { step: usize, time: f64 },

    #[error("Numeric overflow at step {step} (t = {time:.5} s): {quantity} is not finite")]
    NumericOverflow {
        quantity: &'static str,
        step: usize,
        time: f64,
    },

    #[error("Integration cancelled before step {step}")]
    Cancelled { step: usize },
}

impl IntegrationError {
    /// Step index the failure occurred at, if it happened inside the stepping loop.
    pub fn step(&self) -> Option<usize> {
        match self {
            IntegrationError::Configuration(_) => None,
            IntegrationError::NoValidRoot { step, .. }
            | IntegrationError::NumericOverflow { step, .. }
            | IntegrationError::Cancelled { step } => Some(*step),
        }
    }
}

/// A failed `solve()`: the error plus everything computed before it.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SolveFailure {
    #[source]
    pub error: IntegrationError,
    pub partial: TrajectorySeries,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Integration error: {0}")]
    Integration(#[from] IntegrationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Drops the partial series; callers that want it must take it before converting.
impl From<SolveFailure> for SimulationError {
    fn from(failure: SolveFailure) -> Self {
        SimulationError::Integration(failure.error)
    }
}
