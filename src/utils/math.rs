//! 2D math helpers layered on top of `glam`.

use glam::Vec2;

/// Cross product of a scalar (out-of-plane angular term) with a vector,
/// i.e. `ω × r` collapsed into 2D.
#[inline]
pub fn cross_scalar(a: f32, v: Vec2) -> Vec2 {
    Vec2::new(-a * v.y, a * v.x)
}

/// 2D cross product of two vectors (the out-of-plane z component).
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Biased comparison used when picking the SAT reference face: `a` keeps
/// winning until `b` beats it by a relative + absolute margin, preventing
/// reference-face flicker on near-equal penetrations.
#[inline]
pub fn bias_greater_than(a: f32, b: f32) -> bool {
    const BIAS_RELATIVE: f32 = 0.95;
    const BIAS_ABSOLUTE: f32 = 0.01;

    a >= b * BIAS_RELATIVE + a * BIAS_ABSOLUTE
}
