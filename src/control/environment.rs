use serde::{Deserialize, Serialize};

use crate::constants::{
    AIR_MOLAR_MASS, EARTH_MASS, EARTH_RADIUS, GAS_CONSTANT, GRAVITATIONAL_CONSTANT,
    MIN_TEMPERATURE, TEMPERATURE_LAPSE_RATE,
};
use crate::errors::IntegrationError;

/// Physical constants of the primary body and its atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConstants {
    pub gravitational_constant: f64,
    pub body_mass: f64,
    pub gas_constant: f64,
    pub body_radius: f64,
    pub air_molar_mass: f64,
    pub lapse_rate: f64,
    pub min_temperature: f64,
}

impl Default for EnvironmentConstants {
    fn default() -> Self {
        EnvironmentConstants {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            body_mass: EARTH_MASS,
            gas_constant: GAS_CONSTANT,
            body_radius: EARTH_RADIUS,
            air_molar_mass: AIR_MOLAR_MASS,
            lapse_rate: TEMPERATURE_LAPSE_RATE,
            min_temperature: MIN_TEMPERATURE,
        }
    }
}

impl EnvironmentConstants {
    pub fn validate(&self) -> Result<(), IntegrationError> {
        let positive = [
            ("gravitational_constant", self.gravitational_constant),
            ("body_mass", self.body_mass),
            ("gas_constant", self.gas_constant),
            ("body_radius", self.body_radius),
            ("air_molar_mass", self.air_molar_mass),
            ("min_temperature", self.min_temperature),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(IntegrationError::Configuration(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }

        if !self.lapse_rate.is_finite() || self.lapse_rate < 0.0 {
            return Err(IntegrationError::Configuration(format!(
                "lapse_rate must be finite and non-negative, got {}",
                self.lapse_rate
            )));
        }

        Ok(())
    }

    pub fn surface_gravity(&self) -> f64 {
        self.gravity_at(0.0)
    }

    /// Inverse-square free-fall acceleration at height `altitude` above the surface.
    pub fn gravity_at(&self, altitude: f64) -> f64 {
        let distance = self.body_radius + altitude;
        self.gravitational_constant * self.body_mass / distance.powi(2)
    }

    /// Linear lapse from `sea_level_temperature`, never below `min_temperature`.
    pub fn temperature_at(&self, altitude: f64, sea_level_temperature: f64) -> f64 {
        let temperature = sea_level_temperature - self.lapse_rate * altitude;
        if temperature < self.min_temperature {
            self.min_temperature
        } else {
            temperature
        }
    }

    /// Barometric formula evaluated with the local gravity and temperature.
    pub fn pressure_at(
        &self,
        altitude: f64,
        sea_level_pressure: f64,
        sea_level_temperature: f64,
    ) -> f64 {
        let temperature = self.temperature_at(altitude, sea_level_temperature);
        let exponent = -self.air_molar_mass * self.gravity_at(altitude) * altitude
            / (self.gas_constant * temperature);
        sea_level_pressure * exponent.exp()
    }

    /// Ideal-gas density from local pressure and temperature.
    pub fn density_at(
        &self,
        altitude: f64,
        sea_level_pressure: f64,
        sea_level_temperature: f64,
    ) -> f64 {
        let pressure = self.pressure_at(altitude, sea_level_pressure, sea_level_temperature);
        let temperature = self.temperature_at(altitude, sea_level_temperature);
        pressure * self.air_molar_mass / (self.gas_constant * temperature)
    }

    /// Height above which the lapse-rate temperature would cross the floor.
    pub fn temperature_floor_altitude(&self, sea_level_temperature: f64) -> f64 {
        if self.lapse_rate == 0.0 {
            f64::INFINITY
        } else {
            (sea_level_temperature - self.min_temperature) / self.lapse_rate
        }
    }
}
