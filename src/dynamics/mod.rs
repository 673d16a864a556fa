//! Impulse resolution and body integration.

pub mod integrator;
pub mod solver;

pub use solver::ContactSolver;
