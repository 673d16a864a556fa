use thiserror::Error;

use crate::utils::allocator::BodyHandle;

/// Errors surfaced at the simulation boundary.
///
/// Everything fallible *inside* a tick (unsupported shape pairs, degenerate
/// contacts) is resolved locally by skipping the affected pair; only
/// construction-time geometry violations and stale handles are reported.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhysicsError {
    /// Polygon construction was given unusable geometry.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    /// The handle does not refer to a live body (already removed, or never
    /// issued by this scene).
    #[error("body not found for handle {0:?}")]
    BodyNotFound(BodyHandle),
}
