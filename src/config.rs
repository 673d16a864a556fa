//! Global tuning constants for the Impulse2D engine.

/// Default gravity vector applied in a physics scene (Y-up).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, -9.81];

/// Default fixed simulation timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 0.01;

/// Default cap on fixed ticks executed per `update` call. Surplus accumulated
/// time beyond the cap is discarded rather than stalling the caller.
pub const DEFAULT_MAX_STEPS_PER_UPDATE: u32 = 32;

/// Upper bound on convex polygon vertex counts.
pub const MAX_POLYGON_VERTICES: usize = 20;

/// Penetration depth tolerated before positional correction engages.
pub const PENETRATION_SLOP: f32 = 0.05;

/// Fraction of the remaining penetration removed per positional correction.
pub const CORRECTION_PERCENT: f32 = 0.2;

/// Wiggle room when deciding whether a projected point lies on a segment.
pub const SEGMENT_CONTACT_BUFFER: f32 = 0.1;

/// Default friction coefficients for new bodies.
pub const DEFAULT_STATIC_FRICTION: f32 = 0.4;
pub const DEFAULT_DYNAMIC_FRICTION: f32 = 0.2;
