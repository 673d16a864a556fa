use serde::{Deserialize, Serialize};

/// Common math types re-exported for convenience.
pub use glam::{Mat2, Vec2};

/// Material coefficients fed into mass computation and contact response.
///
/// A density of zero marks the body as static: infinite mass and inertia,
/// velocity forced to zero at construction and never integrated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub density: f32,
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.2,
            restitution: 0.05,
        }
    }
}

impl Material {
    pub fn new(density: f32, restitution: f32) -> Self {
        Self {
            density,
            restitution,
        }
    }

    /// Material for static geometry (walls, platforms): zero density with a
    /// chosen bounciness.
    pub fn fixed(restitution: f32) -> Self {
        Self {
            density: 0.0,
            restitution,
        }
    }

    pub fn is_static(&self) -> bool {
        self.density == 0.0
    }
}

/// Derived inverse mass and inverse rotational inertia.
///
/// Only the inverses are stored, since those are what the solver consumes;
/// zero inverses encode an immovable body. Never set directly by callers —
/// each shape's mass computation produces it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MassData {
    pub inverse_mass: f32,
    pub inverse_inertia: f32,
}

impl MassData {
    /// Infinite mass and inertia.
    pub const STATIC: MassData = MassData {
        inverse_mass: 0.0,
        inverse_inertia: 0.0,
    };

    /// Builds inverse data from plain mass and inertia, mapping zero (and
    /// thus static bodies) to zero inverses.
    pub fn from_mass(mass: f32, inertia: f32) -> Self {
        Self {
            inverse_mass: if mass == 0.0 { 0.0 } else { 1.0 / mass },
            inverse_inertia: if inertia == 0.0 { 0.0 } else { 1.0 / inertia },
        }
    }
}

/// Presentation-only RGBA colour carried per body for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Colour {
    pub const WHITE: Colour = Colour::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    /// Builds a colour from hue (degrees), saturation, and value in `0..=1`.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let hue = hue.rem_euclid(360.0);
        let c = value * saturation;
        let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
        let m = value - c;

        let (r, g, b) = match (hue / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::new(r + m, g + m, b + m)
    }
}
