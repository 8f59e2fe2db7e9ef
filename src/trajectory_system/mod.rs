pub mod forces;
pub mod integrator;
pub mod quadratic;
pub mod series;
