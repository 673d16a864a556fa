use glam::Vec2;

use crate::collision::narrowphase::NarrowPhase;
use crate::core::rigidbody::RigidBody;
use crate::utils::allocator::BodyHandle;

/// A colliding body pair with its contact geometry, held for one tick.
///
/// The normal always points from body `a` toward body `b`. Mixed material
/// coefficients are filled in by the solver before impulses run.
#[derive(Debug, Clone, Copy)]
pub struct Manifold {
    pub a: BodyHandle,
    pub b: BodyHandle,

    pub normal: Vec2,
    pub penetration: f32,
    pub contacts: [Vec2; 2],
    pub contact_count: u32,

    pub restitution: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl Manifold {
    /// Runs the narrow phase for a body pair; `Some` only on contact.
    pub fn solve(body_a: &RigidBody, body_b: &RigidBody) -> Option<Self> {
        let geometry = NarrowPhase::collide(body_a, body_b)?;
        Some(Self {
            a: body_a.id,
            b: body_b.id,
            normal: geometry.normal,
            penetration: geometry.penetration,
            contacts: geometry.points,
            contact_count: geometry.count,
            restitution: 0.0,
            static_friction: 0.0,
            dynamic_friction: 0.0,
        })
    }

    /// First contact point, for callers that only need one.
    pub fn contact(&self) -> Vec2 {
        self.contacts[0]
    }
}
