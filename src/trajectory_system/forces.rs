use crate::control::environment::EnvironmentConstants;
use crate::control::vehicle::VehicleConfig;
use crate::errors::IntegrationError;

/// Environment quantities evaluated at one `(height, time)` point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereSample {
    pub mass: f64,
    pub gravity: f64,
    pub temperature: f64,
    pub pressure: f64,
    pub density: f64,
}

/// Coefficients of the per-step quadratic `a*x^2 + b*x + c = 0` in the next height,
/// together with the linearized estimate used to choose between its roots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub rough: f64,
    pub thrust_accel: f64,
    pub drag_factor: f64,
}

impl StepCoefficients {
    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }
}

/// Forcing terms of `r'' = fi(r, t) + w(r, t) * (r')^2` for one vehicle in one environment.
#[derive(Debug, Clone)]
pub struct FlightModel {
    vehicle: VehicleConfig,
    environment: EnvironmentConstants,
    reference_area: f64,
}

impl FlightModel {
    pub fn new(vehicle: VehicleConfig, environment: EnvironmentConstants) -> Self {
        let reference_area = vehicle.reference_area();
        FlightModel {
            vehicle,
            environment,
            reference_area,
        }
    }

    pub fn vehicle(&self) -> &VehicleConfig {
        &self.vehicle
    }

    pub fn environment(&self) -> &EnvironmentConstants {
        &self.environment
    }

    pub fn sample(&self, altitude: f64, time: f64) -> AtmosphereSample {
        let vehicle = &self.vehicle;
        AtmosphereSample {
            mass: vehicle.mass_at(time),
            gravity: self.environment.gravity_at(altitude),
            temperature: self
                .environment
                .temperature_at(altitude, vehicle.sea_level_temperature),
            pressure: self.environment.pressure_at(
                altitude,
                vehicle.sea_level_pressure,
                vehicle.sea_level_temperature,
            ),
            density: self.environment.density_at(
                altitude,
                vehicle.sea_level_pressure,
                vehicle.sea_level_temperature,
            ),
        }
    }

    /// Net specific force from thrust and gravity (`fi`). Thrust drops out after cutoff.
    pub fn thrust_accel(&self, altitude: f64, time: f64) -> f64 {
        let gravity = self.environment.gravity_at(altitude);
        if self.vehicle.is_burning(time) {
            self.vehicle.thrust / self.vehicle.mass_at(time) - gravity
        } else {
            -gravity
        }
    }

    /// Specific drag factor (`w`), negative so that `w * v^2` opposes the ascent.
    pub fn drag_factor(&self, altitude: f64, time: f64) -> f64 {
        if self.drag_gated(altitude, time) {
            return 0.0;
        }
        let density = self.environment.density_at(
            altitude,
            self.vehicle.sea_level_pressure,
            self.vehicle.sea_level_temperature,
        );
        -self.vehicle.drag_coefficient * self.reference_area * density
            / (2.0 * self.vehicle.mass_at(time))
    }

    fn drag_gated(&self, altitude: f64, time: f64) -> bool {
        self.vehicle.is_above_drag_ceiling(altitude)
            || (self.vehicle.zero_drag_after_cutoff && !self.vehicle.is_burning(time))
    }

    /// Height after the first step, from the initial acceleration with zero initial speed.
    pub fn seed_height(&self) -> f64 {
        let h = self.vehicle.time_step;
        let r0 = self.vehicle.initial_height;
        r0 + self.thrust_accel(r0, h) * h * h / 2.0
    }

    /// Builds the central-difference quadratic for step `step` at time `time`.
    pub fn step_coefficients(
        &self,
        step: usize,
        time: f64,
        previous: f64,
        current: f64,
    ) -> Result<StepCoefficients, IntegrationError> {
        let h = self.vehicle.time_step;
        let fi = self.thrust_accel(current, time);
        let w = self.drag_factor(current, time);
        ensure_finite("thrust acceleration", fi, step, time)
            .and_then(|_| ensure_finite("drag factor", w, step, time))
            .map_err(|err| self.attribute_overflow(err, current, time))?;

        let a = w / 4.0;
        let b = -1.0 - previous * w / 2.0;
        let c = 2.0 * current - previous + w * previous * previous / 4.0 + h * h * fi;
        let delta = current - previous;
        let rough = 2.0 * current - previous + h * h * fi + w * delta * delta;

        ensure_finite("quadratic coefficient b", b, step, time)?;
        ensure_finite("quadratic coefficient c", c, step, time)?;
        ensure_finite("rough estimate", rough, step, time)?;

        Ok(StepCoefficients {
            a,
            b,
            c,
            rough,
            thrust_accel: fi,
            drag_factor: w,
        })
    }

    // Narrows a forcing-term overflow down to the environment quantity that caused it.
    fn attribute_overflow(
        &self,
        err: IntegrationError,
        altitude: f64,
        time: f64,
    ) -> IntegrationError {
        let step = match err {
            IntegrationError::NumericOverflow { step, .. } => step,
            _ => return err,
        };
        let sample = self.sample(altitude, time);
        let quantities = [
            ("mass", sample.mass),
            ("gravity", sample.gravity),
            ("temperature", sample.temperature),
            ("pressure", sample.pressure),
            ("density", sample.density),
        ];
        quantities
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(quantity, _)| IntegrationError::NumericOverflow {
                quantity,
                step,
                time,
            })
            .unwrap_or(err)
    }
}

pub(crate) fn ensure_finite(
    quantity: &'static str,
    value: f64,
    step: usize,
    time: f64,
) -> Result<f64, IntegrationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IntegrationError::NumericOverflow {
            quantity,
            step,
            time,
        })
    }
}
