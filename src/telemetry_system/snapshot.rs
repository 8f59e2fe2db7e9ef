use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Centered-difference view of the trajectory at one step.
///
/// `height` is `r_i`, the sample the differences are centered on. Legacy
/// `rocket_flight_stats.txt` files printed the freshly solved `r_{i+1}` in that column,
/// so their Height values lead these by one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSnapshot {
    pub step: usize,
    pub time: f64,
    pub height: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl FlightSnapshot {
    /// Snapshot at sample `current`, from its neighbours one step `h` either side.
    pub fn from_neighbours(
        step: usize,
        time: f64,
        h: f64,
        previous: f64,
        current: f64,
        next: f64,
    ) -> Self {
        FlightSnapshot {
            step,
            time,
            height: current,
            velocity: (next - previous) / (2.0 * h),
            acceleration: (next - 2.0 * current + previous) / (h * h),
        }
    }
}

impl fmt::Display for FlightSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {:.5} s, Height: {:.5} m, Speed: {:.5} m / s, Acceleration: {:.5} m / s ^ 2",
            self.time, self.height, self.velocity, self.acceleration
        )
    }
}

/// Receiver for periodic snapshots. Sinks observe the run and never influence it.
pub trait SnapshotSink {
    fn record(&mut self, snapshot: &FlightSnapshot);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn record(&mut self, _snapshot: &FlightSnapshot) {}
}

/// Forwards each snapshot to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SnapshotSink for LogSink {
    fn record(&mut self, snapshot: &FlightSnapshot) {
        log::info!("step {}: {}", snapshot.step, snapshot);
    }
}

impl SnapshotSink for Vec<FlightSnapshot> {
    fn record(&mut self, snapshot: &FlightSnapshot) {
        self.push(*snapshot);
    }
}

/// Appends one line per snapshot to a text file.
///
/// A failed write is logged and the sink goes quiet; the integration carries on.
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn append(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(FileSink {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl SnapshotSink for FileSink {
    fn record(&mut self, snapshot: &FlightSnapshot) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        if let Err(err) = writeln!(writer, "{}", snapshot) {
            log::warn!(
                "Dropping snapshot output to {}: {}",
                self.path.display(),
                err
            );
            self.writer = None;
        }
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            log::warn!("Failed to flush {}: {}", self.path.display(), err);
        }
    }
}
