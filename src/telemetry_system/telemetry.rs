use crate::telemetry_system::snapshot::{FlightSnapshot, SnapshotSink};
use crate::trajectory_system::series::TrajectorySeries;

/// Collects snapshot lines and running extremes for an end-of-run report.
pub struct Telemetry {
    pub log: Vec<String>,
    max_velocity: f64,
    max_altitude: f64,
    max_acceleration: f64,
    snapshots: usize,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            log: Vec::new(),
            max_velocity: 0.0,
            max_altitude: 0.0,
            max_acceleration: 0.0,
            snapshots: 0,
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots
    }

    /// Renders the summary block; `series` supplies the exact peak and end state.
    pub fn summary(&self, series: &TrajectorySeries) -> String {
        let mut lines = vec!["--- Simulation Summary ---".to_string()];
        lines.push(format!("Samples: {}", series.len()));
        if let Some((time, height)) = series.peak() {
            lines.push(format!(
                "Peak Altitude: {} at {}",
                Self::format_altitude(height),
                Self::format_time(time)
            ));
        }
        if let Some(end) = series.final_state() {
            lines.push(format!(
                "Final State: {} at {}, {:.2} m/s",
                Self::format_altitude(end.height),
                Self::format_time(end.time),
                end.velocity
            ));
        }
        lines.push(format!("Snapshots: {}", self.snapshots));
        lines.push(format!("Max Sampled Velocity: {:.2} m/s", self.max_velocity));
        lines.push(format!(
            "Max Sampled Acceleration: {:.2} m/s²",
            self.max_acceleration
        ));
        lines.join("\n")
    }

    pub fn display_data(&self, series: &TrajectorySeries) {
        println!("--- Telemetry Data ---");
        for entry in &self.log {
            println!("{}", entry);
        }
        println!("--- End of Telemetry ---");

        println!("\n{}", self.summary(series));
    }
}

impl SnapshotSink for Telemetry {
    fn record(&mut self, snapshot: &FlightSnapshot) {
        self.snapshots += 1;

        if snapshot.velocity.abs() > self.max_velocity {
            self.max_velocity = snapshot.velocity.abs();
        }
        if snapshot.height > self.max_altitude {
            self.max_altitude = snapshot.height;
        }
        if snapshot.acceleration.abs() > self.max_acceleration {
            self.max_acceleration = snapshot.acceleration.abs();
        }

        self.log.push(format!(
            "[{}] {}",
            Self::format_time(snapshot.time),
            snapshot
        ));
    }
}
