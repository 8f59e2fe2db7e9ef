use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::constants::{CANCEL_POLL_INTERVAL, SNAPSHOT_INTERVAL};
use crate::control::environment::EnvironmentConstants;
use crate::control::vehicle::VehicleConfig;
use crate::errors::{IntegrationError, SolveFailure};
use crate::telemetry_system::snapshot::{FlightSnapshot, NullSink, SnapshotSink};
use crate::trajectory_system::forces::{ensure_finite, FlightModel, StepCoefficients};
use crate::trajectory_system::quadratic::{select_root, solve_quadratic};
use crate::trajectory_system::series::TrajectorySeries;

/// Shared flag polled between steps; cloning hands out another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Integrates `r'' = fi(r, t) + w(r, t) * (r')^2` for a vertical ascent.
///
/// Each step solves the central-difference quadratic for the next height and keeps
/// the real, non-negative root nearest a linearized estimate.
#[derive(Debug, Clone)]
pub struct TrajectoryIntegrator {
    model: FlightModel,
    snapshot_interval: usize,
    cancel_poll_interval: usize,
    cancel: Option<CancelToken>,
}

impl TrajectoryIntegrator {
    pub fn new(
        vehicle: VehicleConfig,
        environment: EnvironmentConstants,
    ) -> Result<Self, IntegrationError> {
        vehicle.validate()?;
        environment.validate()?;
        Ok(TrajectoryIntegrator {
            model: FlightModel::new(vehicle, environment),
            snapshot_interval: SNAPSHOT_INTERVAL,
            cancel_poll_interval: CANCEL_POLL_INTERVAL,
            cancel: None,
        })
    }

    /// Emit a snapshot every `interval` steps; 0 turns snapshots off.
    pub fn with_snapshot_interval(mut self, interval: usize) -> Self {
        self.snapshot_interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Check the cancel token every `interval` steps (minimum 1).
    pub fn with_cancel_poll_interval(mut self, interval: usize) -> Self {
        self.cancel_poll_interval = interval.max(1);
        self
    }

    pub fn model(&self) -> &FlightModel {
        &self.model
    }

    pub fn vehicle(&self) -> &VehicleConfig {
        self.model.vehicle()
    }

    pub fn step_count(&self) -> usize {
        self.vehicle().step_count()
    }

    pub fn solve(&self) -> Result<TrajectorySeries, SolveFailure> {
        self.solve_with(&mut NullSink)
    }

    /// Runs the full integration, handing periodic snapshots to `sink`.
    ///
    /// On failure the returned [`SolveFailure`] carries the samples computed so far.
    pub fn solve_with(
        &self,
        sink: &mut dyn SnapshotSink,
    ) -> Result<TrajectorySeries, SolveFailure> {
        let vehicle = self.model.vehicle();
        let h = vehicle.time_step;
        let n = vehicle.step_count();

        log::debug!(
            "Integrating {} steps of {} s (duration {} s, burn cutoff {} s)",
            n,
            h,
            vehicle.flight_duration,
            vehicle.burn_cutoff
        );

        let Some(len) = n.checked_add(2) else {
            return Err(SolveFailure {
                error: IntegrationError::Configuration(format!(
                    "{} steps do not fit in a series",
                    n
                )),
                partial: TrajectorySeries::default(),
            });
        };
        let mut series = TrajectorySeries::with_len(len);
        let mut previous = vehicle.initial_height;
        let mut current = self.model.seed_height();
        series.set(0, 0.0, previous);
        series.set(1, h, current);

        if let Err(error) = ensure_finite("seed height", current, 0, 0.0) {
            series.truncate(1);
            return Err(SolveFailure {
                error,
                partial: series,
            });
        }

        for step in 1..=n {
            let time = step as f64 * h;
            series.set_time(step, time);

            let next = match self.advance(step, time, previous, current) {
                Ok(next) => next,
                Err(error) => {
                    log::debug!("Integration stopped: {}", error);
                    series.truncate(step + 1);
                    return Err(SolveFailure {
                        error,
                        partial: series,
                    });
                }
            };
            series.set_height(step + 1, next);

            if self.snapshot_interval != 0 && step % self.snapshot_interval == 0 {
                sink.record(&FlightSnapshot::from_neighbours(
                    step, time, h, previous, current, next,
                ));
            }

            previous = current;
            current = next;
        }
        series.set_time(n + 1, (n + 1) as f64 * h);

        if let Some((time, height)) = series.peak() {
            log::info!(
                "Integration finished: {} samples, peak {:.1} m at {:.3} s",
                series.len(),
                height,
                time
            );
        }
        Ok(series)
    }

    fn advance(
        &self,
        step: usize,
        time: f64,
        previous: f64,
        current: f64,
    ) -> Result<f64, IntegrationError> {
        if let Some(token) = &self.cancel {
            if (step - 1) % self.cancel_poll_interval == 0 && token.is_cancelled() {
                return Err(IntegrationError::Cancelled { step });
            }
        }
        let coefficients = self.model.step_coefficients(step, time, previous, current)?;
        resolve_step(step, time, &coefficients)
    }
}

/// Solves one step's quadratic and selects the next height.
///
/// A quadratic with no `x` terms at step 1 means the configuration itself is unusable;
/// at any later step it is an ordinary root failure.
pub fn resolve_step(
    step: usize,
    time: f64,
    coefficients: &StepCoefficients,
) -> Result<f64, IntegrationError> {
    let roots = solve_quadratic(coefficients.a, coefficients.b, coefficients.c);

    if step == 1 && roots.has_no_leading_terms() {
        return Err(IntegrationError::Configuration(format!(
            "first-step quadratic is degenerate (a = {}, b = {}, c = {})",
            coefficients.a, coefficients.b, coefficients.c
        )));
    }

    if roots
        .real_candidates()
        .into_iter()
        .flatten()
        .any(|root| root.is_infinite() && root > 0.0)
    {
        return Err(IntegrationError::NumericOverflow {
            quantity: "height",
            step,
            time,
        });
    }

    let next = select_root(&roots, coefficients.rough)
        .ok_or(IntegrationError::NoValidRoot { step, time })?;
    ensure_finite("height", next, step, time)
}
