use glam::Vec2;

use crate::collision::Manifold;
use crate::config::{CORRECTION_PERCENT, PENETRATION_SLOP};
use crate::core::rigidbody::RigidBody;
use crate::utils::math::{cross, cross_scalar};

/// Single-pass impulse solver over one manifold at a time.
///
/// Each manifold is initialised, impulsed, and positionally corrected once
/// per tick; there is no global iteration over the contact set.
pub struct ContactSolver {
    pub gravity: Vec2,
}

impl ContactSolver {
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }

    /// Mixes the pair's material coefficients into the manifold: averaged
    /// restitution, geometric-mean friction. A pair whose relative contact
    /// velocity is within one gravity step is treated as resting and loses
    /// its bounce.
    pub fn initialise(&self, manifold: &mut Manifold, a: &RigidBody, b: &RigidBody, dt: f32) {
        manifold.restitution = (a.material.restitution + b.material.restitution) / 2.0;
        manifold.static_friction = (a.static_friction * b.static_friction).sqrt();
        manifold.dynamic_friction = (a.dynamic_friction * b.dynamic_friction).sqrt();

        for i in 0..manifold.contact_count as usize {
            let radius_a = manifold.contacts[i] - a.position;
            let radius_b = manifold.contacts[i] - b.position;

            let relative_v = b.linear_velocity + cross_scalar(b.angular_velocity, radius_b)
                - a.linear_velocity
                - cross_scalar(a.angular_velocity, radius_a);

            if relative_v.length_squared() < (self.gravity * dt).length_squared() + f32::EPSILON {
                manifold.restitution = 0.0;
            }
        }
    }

    /// Resolves the contact with a normal impulse and a Coulomb friction
    /// impulse per contact point, split evenly across the points.
    pub fn apply_impulse(&self, manifold: &Manifold, a: &mut RigidBody, b: &mut RigidBody) {
        // Two immovable bodies have nothing to exchange.
        if (a.mass_data.inverse_mass + b.mass_data.inverse_mass).abs() < f32::EPSILON {
            a.set_velocity(Vec2::ZERO);
            b.set_velocity(Vec2::ZERO);
            return;
        }

        let contact_count = manifold.contact_count as f32;

        for i in 0..manifold.contact_count as usize {
            let radius_a = manifold.contacts[i] - a.position;
            let radius_b = manifold.contacts[i] - b.position;

            let relative_v = b.linear_velocity + cross_scalar(b.angular_velocity, radius_b)
                - a.linear_velocity
                - cross_scalar(a.angular_velocity, radius_a);

            let contact_v = relative_v.dot(manifold.normal);

            // Already separating.
            if contact_v > 0.0 {
                return;
            }

            let ra_cross_n = cross(radius_a, manifold.normal);
            let rb_cross_n = cross(radius_b, manifold.normal);
            let inv_mass_sum = a.mass_data.inverse_mass
                + b.mass_data.inverse_mass
                + ra_cross_n * ra_cross_n * a.mass_data.inverse_inertia
                + rb_cross_n * rb_cross_n * b.mass_data.inverse_inertia;

            let mut j = -(1.0 + manifold.restitution) * contact_v;
            j /= inv_mass_sum;
            j /= contact_count;

            let impulse = manifold.normal * j;
            a.apply_impulse(-impulse, radius_a);
            b.apply_impulse(impulse, radius_b);

            // The normal impulse changed the velocities, so friction works
            // from a fresh relative velocity.
            let relative_v = b.linear_velocity + cross_scalar(b.angular_velocity, radius_b)
                - a.linear_velocity
                - cross_scalar(a.angular_velocity, radius_a);

            let mut tangent = relative_v - manifold.normal * relative_v.dot(manifold.normal);
            if tangent.length_squared() > f32::EPSILON {
                tangent = tangent.normalize();
            }

            let mut jt = -relative_v.dot(tangent);
            jt /= inv_mass_sum;
            jt /= contact_count;

            // Skip friction on negligible impulses.
            if jt.abs() < f32::EPSILON {
                return;
            }

            // Coulomb's law: exact cancellation within the static cone,
            // otherwise slide against dynamic friction.
            let tangent_impulse = if jt.abs() < j * manifold.static_friction {
                tangent * jt
            } else {
                tangent * -j * manifold.dynamic_friction
            };

            a.apply_impulse(-tangent_impulse, radius_a);
            b.apply_impulse(tangent_impulse, radius_b);
        }
    }

    /// Baumgarte-style linear projection: translates the pair apart by a
    /// fraction of the penetration beyond the slop, split by inverse mass.
    pub fn positional_correction(&self, manifold: &Manifold, a: &mut RigidBody, b: &mut RigidBody) {
        let inv_mass_sum = a.mass_data.inverse_mass + b.mass_data.inverse_mass;
        if inv_mass_sum == 0.0 {
            return;
        }

        let correction = (manifold.penetration - PENETRATION_SLOP).max(0.0) / inv_mass_sum
            * CORRECTION_PERCENT
            * manifold.normal;

        a.translate(-(correction * a.mass_data.inverse_mass));
        b.translate(correction * b.mass_data.inverse_mass);
    }
}
