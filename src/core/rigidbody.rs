use glam::{Mat2, Vec2};

use crate::config::{DEFAULT_DYNAMIC_FRICTION, DEFAULT_STATIC_FRICTION};
use crate::core::shape::{Polygon, Segment, Shape, ShapeKind, Sphere};
use crate::core::types::{Colour, MassData, Material};
use crate::error::PhysicsError;
use crate::utils::allocator::BodyHandle;
use crate::utils::math::cross;

/// A simulated body: one shape plus the kinematic and material state shared
/// by every shape variant.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// Arena handle, assigned when the body is added to a scene.
    pub id: BodyHandle,
    pub shape: Shape,
    pub material: Material,
    pub mass_data: MassData,
    pub colour: Colour,

    pub position: Vec2,
    /// Orientation in radians.
    pub orientation: f32,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,

    pub force: Vec2,
    pub torque: f32,

    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl RigidBody {
    fn new(mut shape: Shape, position: Vec2, material: Material, colour: Colour) -> Self {
        let mass_data = shape.compute_mass(material.density);
        Self {
            id: BodyHandle::default(),
            shape,
            material,
            mass_data,
            colour,
            position,
            orientation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            static_friction: DEFAULT_STATIC_FRICTION,
            dynamic_friction: DEFAULT_DYNAMIC_FRICTION,
        }
    }

    pub fn sphere(radius: f32, position: Vec2, material: Material, colour: Colour) -> Self {
        Self::new(Shape::Sphere(Sphere::new(radius)), position, material, colour)
    }

    /// Axis-aligned box body.
    pub fn rectangle(
        half_width: f32,
        half_height: f32,
        position: Vec2,
        material: Material,
        colour: Colour,
    ) -> Self {
        Self::new(
            Shape::Polygon(Polygon::rectangle(half_width, half_height)),
            position,
            material,
            colour,
        )
    }

    /// Convex polygon body hulled from a point cloud in local space.
    pub fn polygon(
        points: &[Vec2],
        position: Vec2,
        material: Material,
        colour: Colour,
    ) -> Result<Self, PhysicsError> {
        let polygon = Polygon::from_points(points)?;
        Ok(Self::new(Shape::Polygon(polygon), position, material, colour))
    }

    /// Static line segment from `begin` to `end`.
    pub fn segment(begin: Vec2, end: Vec2, restitution: f32, colour: Colour) -> Self {
        Self::new(
            Shape::Segment(Segment::new(begin, end)),
            begin,
            Material::fixed(restitution),
            colour,
        )
    }

    /// Static segment that flags itself when externally translated.
    pub fn barrier(begin: Vec2, end: Vec2, restitution: f32, colour: Colour) -> Self {
        Self::new(
            Shape::Segment(Segment::barrier(begin, end)),
            begin,
            Material::fixed(restitution),
            colour,
        )
    }

    /// Sets the initial velocity; ignored for static bodies, which never
    /// carry velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        if !self.is_static() {
            self.linear_velocity = velocity;
        }
        self
    }

    pub fn with_orientation(mut self, radians: f32) -> Self {
        self.set_orientation(radians);
        self
    }

    pub fn with_friction(mut self, static_friction: f32, dynamic_friction: f32) -> Self {
        self.static_friction = static_friction;
        self.dynamic_friction = dynamic_friction;
        self
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Zero inverse mass and inertia: the body never integrates.
    pub fn is_static(&self) -> bool {
        self.mass_data.inverse_mass == 0.0 && self.mass_data.inverse_inertia == 0.0
    }

    /// Semi-implicit Euler velocity update from accumulated force/torque and
    /// gravity. No-op for static bodies.
    pub fn integrate_forces(&mut self, gravity: Vec2, dt: f32) {
        if self.mass_data.inverse_mass == 0.0 {
            return;
        }

        self.linear_velocity += (self.force * self.mass_data.inverse_mass + gravity) * dt;
        self.angular_velocity += self.torque * self.mass_data.inverse_inertia * dt;
    }

    /// Advances position and orientation, then runs a second force
    /// integration pass with the same `gravity` and `dt`.
    pub fn integrate_velocity(&mut self, gravity: Vec2, dt: f32) {
        if self.mass_data.inverse_mass == 0.0 {
            return;
        }

        self.position += self.linear_velocity * dt;
        self.orientation += self.angular_velocity * dt;
        self.set_orientation(self.orientation);

        // Forces go in a second time each tick, once in the scene's force
        // pass and once here after the position update.
        self.integrate_forces(gravity, dt);
    }

    /// Applies an impulse at an offset from the centroid, affecting both
    /// linear and angular velocity.
    pub fn apply_impulse(&mut self, impulse: Vec2, contact_offset: Vec2) {
        self.linear_velocity += self.mass_data.inverse_mass * impulse;
        self.angular_velocity += self.mass_data.inverse_inertia * cross(contact_offset, impulse);
    }

    /// Accumulates a force for the next tick's integration.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    pub fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }

    /// Clears accumulated force and torque; called once per tick.
    pub fn reset_force(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    pub fn set_position(&mut self, position: Vec2) {
        let delta = position - self.position;
        self.translate(delta);
    }

    /// Moves the body by `delta`. Segments carry their end point along, and
    /// barriers record any non-zero displacement.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        if let Shape::Segment(segment) = &mut self.shape {
            segment.end += delta;
            if segment.barrier && delta != Vec2::ZERO {
                segment.displaced = true;
            }
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.linear_velocity = velocity;
    }

    pub fn add_velocity(&mut self, velocity: Vec2) {
        self.linear_velocity += velocity;
    }

    /// Sets the orientation and refreshes the polygon rotation cache;
    /// spheres and segments only store the angle.
    pub fn set_orientation(&mut self, radians: f32) {
        self.orientation = radians;
        if let Shape::Polygon(polygon) = &mut self.shape {
            polygon.rotation = Mat2::from_angle(radians);
        }
    }
}
