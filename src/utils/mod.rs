//! Utility helpers: the body arena, 2D math extensions, and trace logging.

pub mod allocator;
pub mod logging;
pub mod math;

pub use allocator::{Arena, BodyHandle};
pub use math::*;
