use glam::Vec2;

use crate::core::rigidbody::RigidBody;
use crate::utils::allocator::Arena;

/// Scene-wide integration passes, one body at a time in arena order.
pub fn integrate_forces(bodies: &mut Arena<RigidBody>, gravity: Vec2, dt: f32) {
    for body in bodies.iter_mut() {
        body.integrate_forces(gravity, dt);
    }
}

pub fn integrate_velocities(bodies: &mut Arena<RigidBody>, gravity: Vec2, dt: f32) {
    for body in bodies.iter_mut() {
        body.integrate_velocity(gravity, dt);
    }
}

/// Clears the per-tick force and torque accumulators.
pub fn reset_forces(bodies: &mut Arena<RigidBody>) {
    for body in bodies.iter_mut() {
        body.reset_force();
    }
}
