use std::path::PathBuf;

use ascent_simulation::*;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Variant {
    /// Fly to burn cutoff (311.3 s)
    Reference,
    /// Keep integrating through an unpowered coast (400 s)
    ExtendedCoast,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Vertical ascent trajectory integrator")]
struct Cli {
    /// JSON run configuration; missing fields take reference values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference vehicle preset, applied when no config file is given
    #[arg(long, value_enum, default_value = "reference")]
    variant: Variant,

    /// Requested flight duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Integration step in seconds
    #[arg(long)]
    step: Option<f64>,

    /// Steps between diagnostic snapshots (0 disables them)
    #[arg(long)]
    snapshot_every: Option<usize>,

    /// Append snapshot lines to this file
    #[arg(long)]
    stats_file: Option<PathBuf>,

    /// Write the time/height series to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Keep every n-th sample in the CSV output
    #[arg(long, default_value_t = 1000)]
    decimate: usize,
}

struct RunSinks {
    telemetry: Telemetry,
    file: Option<FileSink>,
}

impl SnapshotSink for RunSinks {
    fn record(&mut self, snapshot: &FlightSnapshot) {
        LogSink.record(snapshot);
        self.telemetry.record(snapshot);
        if let Some(file) = self.file.as_mut() {
            file.record(snapshot);
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig {
            vehicle: match cli.variant {
                Variant::Reference => VehicleConfig::reference(),
                Variant::ExtendedCoast => VehicleConfig::extended_coast(),
            },
            ..SimulationConfig::default()
        },
    };
    if let Some(v) = cli.duration {
        cfg.vehicle.flight_duration = v;
    }
    if let Some(v) = cli.step {
        cfg.vehicle.time_step = v;
    }
    if let Some(v) = cli.snapshot_every {
        cfg.snapshot_interval = v;
    }

    let integrator = cfg.integrator()?;
    log::info!(
        "Running {} steps (h = {} s, duration = {} s)",
        integrator.step_count(),
        cfg.vehicle.time_step,
        cfg.vehicle.flight_duration
    );

    let mut sinks = RunSinks {
        telemetry: Telemetry::new(),
        file: cli
            .stats_file
            .as_ref()
            .map(|path| FileSink::append(path))
            .transpose()?,
    };

    let series = match integrator.solve_with(&mut sinks) {
        Ok(series) => series,
        Err(failure) => {
            log::error!(
                "Integration failed after {} samples: {}",
                failure.partial.len(),
                failure.error
            );
            if let Some(path) = &cli.output {
                write_series_file(path, &failure.partial, cli.decimate)?;
                log::info!("Partial series written to {}", path.display());
            }
            return Err(SimulationError::from(failure).into());
        }
    };

    if let Some(path) = &cli.output {
        let rows = write_series_file(path, &series, cli.decimate)?;
        log::info!("Wrote {} rows to {}", rows, path.display());
    }

    println!("{}", sinks.telemetry.summary(&series));

    Ok(())
}
