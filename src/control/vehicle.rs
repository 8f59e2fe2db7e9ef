use serde::{Deserialize, Serialize};

use crate::constants::{
    DRAG_CEILING, EXTENDED_FLIGHT_DURATION, FLIGHT_DURATION, MAX_SERIES_LEN,
    ROCKET_BURN_CUTOFF, ROCKET_DRAG_COEFFICIENT, ROCKET_DRY_MASS, ROCKET_FUEL_RATE,
    ROCKET_REFERENCE_VOLUME, ROCKET_THRUST, ROCKET_WET_MASS, SEA_LEVEL_PRESSURE,
    SEA_LEVEL_TEMPERATURE, TIME_STEP,
};
use crate::errors::IntegrationError;

/// Per-run vehicle and launch-site parameters. Never mutated once a run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub initial_height: f64,   // m
    pub flight_duration: f64,  // s
    pub time_step: f64,        // s
    pub fuel_rate: f64,        // kg/s
    pub wet_mass: f64,         // kg
    pub dry_mass: f64,         // kg
    pub drag_coefficient: f64, // dimensionless
    pub reference_volume: f64, // m³
    pub thrust: f64,           // N
    pub sea_level_pressure: f64,
    pub sea_level_temperature: f64,
    pub burn_cutoff: f64, // s
    /// Drag is zero strictly above this height. `None` keeps drag at every altitude.
    pub drag_ceiling: Option<f64>,
    pub zero_drag_after_cutoff: bool,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        VehicleConfig {
            initial_height: 0.0,
            flight_duration: FLIGHT_DURATION,
            time_step: TIME_STEP,
            fuel_rate: ROCKET_FUEL_RATE,
            wet_mass: ROCKET_WET_MASS,
            dry_mass: ROCKET_DRY_MASS,
            drag_coefficient: ROCKET_DRAG_COEFFICIENT,
            reference_volume: ROCKET_REFERENCE_VOLUME,
            thrust: ROCKET_THRUST,
            sea_level_pressure: SEA_LEVEL_PRESSURE,
            sea_level_temperature: SEA_LEVEL_TEMPERATURE,
            burn_cutoff: ROCKET_BURN_CUTOFF,
            drag_ceiling: Some(DRAG_CEILING),
            zero_drag_after_cutoff: false,
        }
    }
}

impl VehicleConfig {
    /// Reference vehicle flown to burn cutoff.
    pub fn reference() -> Self {
        Self::default()
    }

    /// Reference vehicle flown past cutoff into an unpowered coast.
    pub fn extended_coast() -> Self {
        Self::default().with_duration(EXTENDED_FLIGHT_DURATION)
    }

    pub fn with_duration(mut self, flight_duration: f64) -> Self {
        self.flight_duration = flight_duration;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Number of integration steps, `floor(duration / h)`.
    ///
    /// Only meaningful for a config that passed [`validate`](Self::validate), which bounds it.
    pub fn step_count(&self) -> usize {
        (self.flight_duration / self.time_step).floor() as usize
    }

    /// Vehicle mass at `time`, never below the dry mass.
    pub fn mass_at(&self, time: f64) -> f64 {
        let mass = self.wet_mass - self.fuel_rate * time;
        if mass > self.dry_mass {
            mass
        } else {
            self.dry_mass
        }
    }

    pub fn is_burning(&self, time: f64) -> bool {
        time <= self.burn_cutoff
    }

    pub fn reference_area(&self) -> f64 {
        self.reference_volume.powf(2.0 / 3.0)
    }

    pub fn is_above_drag_ceiling(&self, altitude: f64) -> bool {
        self.drag_ceiling.is_some_and(|ceiling| altitude > ceiling)
    }

    pub fn validate(&self) -> Result<(), IntegrationError> {
        let finite = [
            ("initial_height", self.initial_height),
            ("flight_duration", self.flight_duration),
            ("time_step", self.time_step),
            ("fuel_rate", self.fuel_rate),
            ("wet_mass", self.wet_mass),
            ("dry_mass", self.dry_mass),
            ("drag_coefficient", self.drag_coefficient),
            ("reference_volume", self.reference_volume),
            ("thrust", self.thrust),
            ("sea_level_pressure", self.sea_level_pressure),
            ("sea_level_temperature", self.sea_level_temperature),
            ("burn_cutoff", self.burn_cutoff),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(configuration(format!("{} must be finite, got {}", name, value)));
            }
        }

        if self.time_step <= 0.0 {
            return Err(configuration(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        if self.flight_duration <= 0.0 {
            return Err(configuration(format!(
                "flight_duration must be positive, got {}",
                self.flight_duration
            )));
        }

        // The series holds n + 2 samples.
        let steps = (self.flight_duration / self.time_step).floor();
        if !steps.is_finite() || steps + 2.0 > MAX_SERIES_LEN as f64 {
            return Err(configuration(format!(
                "flight_duration / time_step = {} steps exceeds the limit of {} samples",
                steps, MAX_SERIES_LEN
            )));
        }
        if self.dry_mass <= 0.0 {
            return Err(configuration(format!(
                "dry_mass must be positive, got {}",
                self.dry_mass
            )));
        }
        if self.wet_mass < self.dry_mass {
            return Err(configuration(format!(
                "wet_mass ({}) must not be below dry_mass ({})",
                self.wet_mass, self.dry_mass
            )));
        }
        if self.sea_level_temperature <= 0.0 {
            return Err(configuration(format!(
                "sea_level_temperature must be positive, got {}",
                self.sea_level_temperature
            )));
        }

        let non_negative = [
            ("fuel_rate", self.fuel_rate),
            ("drag_coefficient", self.drag_coefficient),
            ("reference_volume", self.reference_volume),
            ("thrust", self.thrust),
            ("sea_level_pressure", self.sea_level_pressure),
            ("burn_cutoff", self.burn_cutoff),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(configuration(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if let Some(ceiling) = self.drag_ceiling {
            if !ceiling.is_finite() || ceiling <= 0.0 {
                return Err(configuration(format!(
                    "drag_ceiling must be finite and positive, got {}",
                    ceiling
                )));
            }
        }

        Ok(())
    }
}

fn configuration(message: String) -> IntegrationError {
    IntegrationError::Configuration(message)
}
