pub mod csv_export;
pub mod snapshot;
pub mod telemetry;
