use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::SNAPSHOT_INTERVAL;
use crate::control::environment::EnvironmentConstants;
use crate::control::vehicle::VehicleConfig;
use crate::errors::{IntegrationError, SimulationError};
use crate::trajectory_system::integrator::TrajectoryIntegrator;

/// Everything one run needs, loadable from JSON. Missing fields take reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub vehicle: VehicleConfig,
    pub environment: EnvironmentConstants,
    pub snapshot_interval: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vehicle: VehicleConfig::default(),
            environment: EnvironmentConstants::default(),
            snapshot_interval: SNAPSHOT_INTERVAL,
        }
    }
}

impl SimulationConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), IntegrationError> {
        self.vehicle.validate()?;
        self.environment.validate()
    }

    pub fn integrator(&self) -> Result<TrajectoryIntegrator, IntegrationError> {
        Ok(
            TrajectoryIntegrator::new(self.vehicle.clone(), self.environment)?
                .with_snapshot_interval(self.snapshot_interval),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_reference_run() {
        let config = SimulationConfig::from_json("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.snapshot_interval, 100_000);
    }

    #[test]
    fn test_partial_override() {
        let config = SimulationConfig::from_json(
            r#"{
                "vehicle": { "flight_duration": 400.0, "drag_ceiling": null, "zero_drag_after_cutoff": true },
                "environment": { "min_temperature": 180.0 },
                "snapshot_interval": 0
            }"#,
        )
        .unwrap();

        assert_eq!(config.vehicle.flight_duration, 400.0);
        assert_eq!(config.vehicle.drag_ceiling, None);
        assert!(config.vehicle.zero_drag_after_cutoff);
        assert_eq!(config.vehicle.thrust, 9.271e6);
        assert_eq!(config.environment.min_temperature, 180.0);
        assert_eq!(config.environment.body_radius, 6_371_000.0);
        assert_eq!(config.snapshot_interval, 0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = SimulationConfig::from_json(r#"{ "vehicle": { "time_step": -0.1 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Integration(IntegrationError::Configuration(_))
        ));

        let err = SimulationConfig::from_json(r#"{ "vehicle": { "time_step": "fast" } }"#)
            .unwrap_err();
        assert!(matches!(err, SimulationError::Json(_)));
    }
}
