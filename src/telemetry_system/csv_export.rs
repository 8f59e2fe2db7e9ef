use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;
use crate::trajectory_system::series::TrajectorySeries;

#[derive(Debug, Serialize, Deserialize)]
struct SeriesRow {
    time: f64,
    height: f64,
}

/// Writes `time,height` rows, keeping every `decimate`-th sample plus the last one.
///
/// A `decimate` of 0 or 1 writes every sample.
pub fn write_series<W: Write>(
    writer: W,
    series: &TrajectorySeries,
    decimate: usize,
) -> Result<usize, SimulationError> {
    let stride = decimate.max(1);
    let last = series.len().saturating_sub(1);
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut rows = 0;
    for (index, (time, height)) in series.samples().enumerate() {
        if index % stride == 0 || index == last {
            csv_writer.serialize(SeriesRow { time, height })?;
            rows += 1;
        }
    }
    csv_writer.flush()?;
    Ok(rows)
}

pub fn write_series_file(
    path: impl AsRef<Path>,
    series: &TrajectorySeries,
    decimate: usize,
) -> Result<usize, SimulationError> {
    let file = std::fs::File::create(path)?;
    write_series(file, series, decimate)
}

/// Reads a series written by [`write_series`], e.g. a captured golden baseline.
pub fn read_series<R: Read>(reader: R) -> Result<TrajectorySeries, SimulationError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut series = TrajectorySeries::default();
    for row in csv_reader.deserialize() {
        let row: SeriesRow = row?;
        series.push(row.time, row.height);
    }
    Ok(series)
}

pub fn read_series_file(path: impl AsRef<Path>) -> Result<TrajectorySeries, SimulationError> {
    let file = std::fs::File::open(path)?;
    read_series(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> TrajectorySeries {
        let time = (0..len).map(|k| k as f64 * 0.25).collect();
        let height = (0..len).map(|k| (k * k) as f64).collect();
        TrajectorySeries::from_columns(time, height).unwrap()
    }

    #[test]
    fn test_csv_output_has_header_and_rows() {
        let mut buffer = Vec::new();
        let rows = write_series(&mut buffer, &ramp(3), 1).unwrap();
        assert_eq!(rows, 3);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time,height");
        assert_eq!(lines[1], "0.0,0.0");
        assert_eq!(lines[2], "0.25,1.0");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_decimation_keeps_last_sample() {
        let mut buffer = Vec::new();
        let rows = write_series(&mut buffer, &ramp(10), 4).unwrap();
        // indices 0, 4, 8 and the final 9
        assert_eq!(rows, 4);

        let series = read_series(buffer.as_slice()).unwrap();
        assert_eq!(series.time(), &[0.0, 1.0, 2.0, 2.25]);
        assert_eq!(series.height(), &[0.0, 16.0, 64.0, 81.0]);
    }

    #[test]
    fn test_read_back_is_exact() {
        let original = ramp(50);
        let mut buffer = Vec::new();
        write_series(&mut buffer, &original, 0).unwrap();

        let restored = read_series(buffer.as_slice()).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_malformed_rows_are_errors() {
        let missing_height = "time,height\n0.0,0.0\n0.25\n";
        let err = read_series(missing_height.as_bytes()).unwrap_err();
        assert!(matches!(err, SimulationError::Csv(_)), "got {:?}", err);

        let not_a_number = "time,height\n0.0,high\n";
        assert!(read_series(not_a_number.as_bytes()).is_err());

        let header_only = read_series("time,height\n".as_bytes()).unwrap();
        assert!(header_only.is_empty());
    }
}
