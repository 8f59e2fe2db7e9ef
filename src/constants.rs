// Environment Constants
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-11; // N⋅m²/kg²
pub const EARTH_MASS: f64 = 5.9742e24; // kg
pub const GAS_CONSTANT: f64 = 8.31; // J/(mol⋅K)
pub const EARTH_RADIUS: f64 = 6_371_000.0; // meters
pub const AIR_MOLAR_MASS: f64 = 28.98e-3; // kg/mol
pub const TEMPERATURE_LAPSE_RATE: f64 = 0.003; // K per meter
pub const MIN_TEMPERATURE: f64 = 173.0; // K, upper-atmosphere floor

// Rocket Constants
pub const ROCKET_WET_MASS: f64 = 539_287.0; // kg
pub const ROCKET_DRY_MASS: f64 = 37_736.0; // kg
pub const ROCKET_FUEL_RATE: f64 = 1510.84; // kg/s
pub const ROCKET_THRUST: f64 = 9.271e6; // N
pub const ROCKET_DRAG_COEFFICIENT: f64 = 0.5;
pub const ROCKET_REFERENCE_VOLUME: f64 = 706.86; // m³
pub const ROCKET_BURN_CUTOFF: f64 = 311.3; // s

// Launch Site Conditions
pub const SEA_LEVEL_PRESSURE: f64 = 1e5; // Pa
pub const SEA_LEVEL_TEMPERATURE: f64 = 293.0; // K
pub const DRAG_CEILING: f64 = 100_000.0; // m, atmosphere treated as absent above

// Simulation Parameters
pub const TIME_STEP: f64 = 1e-5; // s
pub const FLIGHT_DURATION: f64 = 311.3; // s
pub const EXTENDED_FLIGHT_DURATION: f64 = 400.0; // s, burn plus coast
pub const SNAPSHOT_INTERVAL: usize = 100_000; // steps
pub const CANCEL_POLL_INTERVAL: usize = 4096; // steps
pub const MAX_SERIES_LEN: usize = 200_000_000; // samples per column, ~3.2 GB for both
