pub mod environment;
pub mod vehicle;
