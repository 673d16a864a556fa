//! Impulse2D – a 2D impulse-based rigid-body physics engine.
//!
//! The engine simulates spheres, convex polygons, and static line segments
//! on a fixed timestep: pairwise narrow-phase detection, single-pass impulse
//! resolution with Coulomb friction, and positional correction to keep
//! resting stacks from sinking. A [`PhysicsScene`] owns the bodies and hands
//! out generation-checked [`BodyHandle`]s.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod scene;
pub mod utils;

pub use glam::{Mat2, Vec2};

pub use collision::{ContactGeometry, Manifold, NarrowPhase};
pub use crate::core::{
    rigidbody::RigidBody,
    shape::{Polygon, Segment, Shape, ShapeKind, Sphere},
    types::{Colour, MassData, Material},
};
pub use dynamics::ContactSolver;
pub use error::PhysicsError;
pub use scene::PhysicsScene;
pub use utils::allocator::{Arena, BodyHandle};
