use ascent_simulation::{
    read_series_file, EnvironmentConstants, FlightModel, IntegrationError, Telemetry,
    TrajectoryIntegrator, TrajectorySeries, VehicleConfig,
};

// Captured at h = 1/64 s over the first 20 s of the reference ascent.
const REFERENCE_BASELINE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/reference_h64_20s.csv"
);

// Reference vehicle at a step coarse enough for a debug-build test run.
fn coarse_reference(duration: f64, time_step: f64) -> VehicleConfig {
    VehicleConfig::reference()
        .with_duration(duration)
        .with_time_step(time_step)
}

fn run(vehicle: VehicleConfig) -> Result<TrajectorySeries, ascent_simulation::SolveFailure> {
    TrajectoryIntegrator::new(vehicle, EnvironmentConstants::default())
        .expect("valid configuration")
        .solve()
}

// 1 t test mass with no fuel burn and no drag, hovering at twice its weight.
fn hop_vehicle(duration: f64, time_step: f64) -> VehicleConfig {
    let mut vehicle = VehicleConfig::reference()
        .with_duration(duration)
        .with_time_step(time_step);
    vehicle.wet_mass = 1_000.0;
    vehicle.dry_mass = 1_000.0;
    vehicle.fuel_rate = 0.0;
    vehicle.thrust = 19_640.0;
    vehicle.burn_cutoff = 1.0;
    vehicle.drag_coefficient = 0.0;
    vehicle
}

// Without drag the step is plain Verlet: r[k+1] = 2 r[k] - r[k-1] + h^2 fi.
// Returns the step whose next height would be negative.
fn first_step_below_ground(vehicle: &VehicleConfig) -> Option<usize> {
    let environment = EnvironmentConstants::default();
    let h = vehicle.time_step;
    let forcing = |height: f64, time: f64| {
        let gravity = environment.gravity_at(height);
        if vehicle.is_burning(time) {
            vehicle.thrust / vehicle.mass_at(time) - gravity
        } else {
            -gravity
        }
    };

    let mut previous = vehicle.initial_height;
    let mut current = previous + forcing(previous, h) * h * h / 2.0;
    for step in 1..=vehicle.step_count() {
        let next = 2.0 * current - previous + h * h * forcing(current, step as f64 * h);
        if next < 0.0 {
            return Some(step);
        }
        previous = current;
        current = next;
    }
    None
}

#[test]
fn test_reference_ascent_reaches_flight_altitude() {
    println!("INTEGRATION TEST: Reference ascent to burn cutoff");

    let vehicle = coarse_reference(311.3, 1.0 / 128.0);
    let n = vehicle.step_count();
    assert_eq!(n, 39_846);

    let series = run(vehicle).expect("reference ascent should not fail");
    assert_eq!(series.len(), n + 2);

    let (peak_time, peak_height) = series.peak().unwrap();
    println!("Peak: {:.1} m at {:.2} s", peak_height, peak_time);
    assert!(
        peak_height > 1e5,
        "Vehicle should climb past 100 km, got {:.1} m",
        peak_height
    );

    // Powered ascent: height never decreases.
    for window in series.height()[1..].windows(2) {
        assert!(window[1] >= window[0]);
    }

    let end = series.final_state().unwrap();
    assert!(end.velocity > 1_000.0, "Burnout speed {:.1} m/s", end.velocity);
}

#[test]
fn test_extended_coast_completes() {
    let vehicle = VehicleConfig::extended_coast().with_time_step(1.0 / 128.0);
    let n = vehicle.step_count();
    assert_eq!(n, 51_200);

    let series = run(vehicle).expect("coast past cutoff should not fail");
    assert_eq!(series.len(), n + 2);
    assert_eq!(series.time()[n + 1], 51_201.0 / 128.0);
    assert!(series.height().iter().all(|height| *height >= 0.0));

    // Thrust is gone after cutoff, so the climb decelerates.
    let end = series.final_state().unwrap();
    let burnout_index = (311.3_f64 * 128.0).floor() as usize;
    let burnout_speed = (series.height()[burnout_index] - series.height()[burnout_index - 1])
        * 128.0;
    assert!(end.velocity < burnout_speed);
}

#[test]
fn test_halving_the_step_converges() {
    let coarse = run(coarse_reference(100.0, 1.0 / 64.0)).unwrap();
    let fine = run(coarse_reference(100.0, 1.0 / 128.0)).unwrap();

    assert_eq!(coarse.time()[6_400], 100.0);
    assert_eq!(fine.time()[12_800], 100.0);

    let coarse_height = coarse.height()[6_400];
    let fine_height = fine.height()[12_800];
    let relative = (coarse_height - fine_height).abs() / fine_height;
    println!(
        "Height at 100 s: {:.3} m (h = 1/64) vs {:.3} m (h = 1/128)",
        coarse_height, fine_height
    );
    assert!(relative < 1e-3, "relative difference {}", relative);
}

#[test]
fn test_drag_ceiling_changes_the_trajectory() {
    let with_ceiling = run(coarse_reference(311.3, 1.0 / 64.0)).unwrap();

    let mut vehicle = coarse_reference(311.3, 1.0 / 64.0);
    vehicle.drag_ceiling = None;
    let without_ceiling = run(vehicle).unwrap();

    let (_, peak_with) = with_ceiling.peak().unwrap();
    let (_, peak_without) = without_ceiling.peak().unwrap();
    assert!(
        peak_without < peak_with,
        "drag above 100 km should cost altitude ({} vs {})",
        peak_without,
        peak_with
    );
}

#[test]
fn test_negative_discriminant_is_fatal() {
    let mut vehicle = VehicleConfig::reference()
        .with_duration(1.0)
        .with_time_step(0.125);
    vehicle.wet_mass = 1_000.0;
    vehicle.dry_mass = 1_000.0;
    vehicle.fuel_rate = 0.0;
    vehicle.thrust = 0.0;
    vehicle.reference_volume = 1.0;
    vehicle.drag_coefficient = 2e6;

    let model = FlightModel::new(vehicle.clone(), EnvironmentConstants::default());
    let seed = model.seed_height();
    let coefficients = model.step_coefficients(1, 0.125, 0.0, seed).unwrap();
    assert!(
        coefficients.discriminant() < 0.0,
        "setup should give complex roots, D = {}",
        coefficients.discriminant()
    );

    let failure = run(vehicle).unwrap_err();
    assert_eq!(
        failure.error,
        IntegrationError::NoValidRoot {
            step: 1,
            time: 0.125
        }
    );
    assert_eq!(failure.partial.len(), 2);
    assert_eq!(failure.partial.height()[1], seed);
}

#[test]
fn test_falling_below_ground_is_fatal() {
    let h = 1.0 / 1024.0;
    let failure = run(hop_vehicle(10.0, h)).unwrap_err();

    let step = match failure.error {
        IntegrationError::NoValidRoot { step, time } => {
            assert_eq!(time, step as f64 * h);
            step
        }
        other => panic!("expected NoValidRoot, got {:?}", other),
    };
    println!("Ground contact detected at step {} ({:.4} s)", step, step as f64 * h);

    // Boost for 1 s, coast to ~9.8 m, fall back: contact at 3.414 s.
    assert_eq!(first_step_below_ground(&hop_vehicle(10.0, h)), Some(3_496));
    assert_eq!(step, 3_496, "unexpected failing step {}", step);
    assert_eq!(failure.error.step(), Some(step));

    let partial = &failure.partial;
    assert_eq!(partial.len(), step + 1);
    assert!(partial.height().iter().all(|height| *height >= 0.0));
    assert!(partial.height()[step] < 0.05);

    // The prefix matches a run that stops before contact.
    let airborne = run(hop_vehicle(3.0, h)).unwrap();
    for (a, b) in airborne.height().iter().zip(partial.height()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_runaway_height_is_reported_as_overflow() {
    let mut vehicle = hop_vehicle(1_000.0, 1.0);
    vehicle.thrust = 1e308;
    vehicle.burn_cutoff = 1_000.0;

    let failure = run(vehicle).unwrap_err();
    assert!(
        matches!(failure.error, IntegrationError::NumericOverflow { .. }),
        "expected NumericOverflow, got {:?}",
        failure.error
    );
    assert!(failure.partial.height().iter().all(|height| height.is_finite()));
}

#[test]
fn test_matches_captured_reference_baseline() {
    let baseline = read_series_file(REFERENCE_BASELINE).expect("baseline CSV should load");
    assert_eq!(baseline.len(), 1_282);

    let series = run(coarse_reference(20.0, 1.0 / 64.0)).unwrap();
    assert_eq!(series.time(), baseline.time());

    let deviation = series.max_relative_deviation(&baseline, 1.0).unwrap();
    println!("Max relative deviation from baseline: {:e}", deviation);
    assert!(deviation <= 1e-6, "deviation from baseline {}", deviation);

    let (_, peak_height) = series.peak().unwrap();
    assert!((peak_height - 1_509.96).abs() < 0.01, "peak {}", peak_height);
}

#[test]
#[ignore = "full-resolution reference run: ~31 million steps"]
fn test_full_resolution_reference_ascent() {
    let integrator =
        TrajectoryIntegrator::new(VehicleConfig::reference(), EnvironmentConstants::default())
            .unwrap();
    let n = integrator.step_count();

    let mut telemetry = Telemetry::new();
    let series = integrator
        .solve_with(&mut telemetry)
        .expect("reference ascent should not fail");

    assert_eq!(series.len(), n + 2);
    assert_eq!(telemetry.snapshot_count(), n / 100_000);
    let (_, peak_height) = series.peak().unwrap();
    assert!(peak_height > 1e5);
    println!("{}", telemetry.summary(&series));
}
