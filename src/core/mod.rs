//! Core types describing bodies, shapes, and shared value data.

pub mod rigidbody;
pub mod shape;
pub mod types;

pub use rigidbody::RigidBody;
pub use shape::{Polygon, Segment, Shape, ShapeKind, Sphere};
pub use types::{Colour, MassData, Material};
