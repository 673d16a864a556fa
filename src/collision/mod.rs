//! Narrow-phase collision detection and per-pair contact manifolds.

pub mod manifold;
pub mod narrowphase;

pub use manifold::Manifold;
pub use narrowphase::{ContactGeometry, NarrowPhase};
