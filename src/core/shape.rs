use glam::{Mat2, Vec2};

use crate::config::MAX_POLYGON_VERTICES;
use crate::core::types::MassData;
use crate::error::PhysicsError;

/// Discriminant of the closed shape set, used for collision dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Polygon,
    Segment,
}

/// Geometry attached to a rigid body.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Polygon(Polygon),
    Segment(Segment),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere(_) => ShapeKind::Sphere,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Segment(_) => ShapeKind::Segment,
        }
    }

    pub fn as_sphere(&self) -> Option<&Sphere> {
        match self {
            Shape::Sphere(sphere) => Some(sphere),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Shape::Segment(segment) => Some(segment),
            _ => None,
        }
    }

    /// Derives mass data for the shape at the given density.
    ///
    /// For polygons this also recentres the stored vertices so the local
    /// origin coincides with the mass centroid.
    pub fn compute_mass(&mut self, density: f32) -> MassData {
        match self {
            Shape::Sphere(sphere) => sphere.compute_mass(density),
            Shape::Polygon(polygon) => polygon.compute_mass(density),
            // Segments are pure static geometry.
            Shape::Segment(_) => MassData::STATIC,
        }
    }
}

/// A circle, named sphere throughout for parity with the renderer's meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    fn compute_mass(&self, density: f32) -> MassData {
        let mass = std::f32::consts::PI * self.radius * self.radius * density;
        let inertia = mass * self.radius * self.radius;
        MassData::from_mass(mass, inertia)
    }
}

/// Convex polygon in local space, wound counter-clockwise, with one outward
/// unit normal per edge and a cached rotation matrix for the owning body's
/// orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
    pub normals: Vec<Vec2>,
    pub rotation: Mat2,
}

impl Polygon {
    /// Axis-aligned box of the given half extents.
    pub fn rectangle(half_width: f32, half_height: f32) -> Self {
        let vertices = vec![
            Vec2::new(-half_width, -half_height),
            Vec2::new(half_width, -half_height),
            Vec2::new(half_width, half_height),
            Vec2::new(-half_width, half_height),
        ];
        let normals = vec![Vec2::NEG_Y, Vec2::X, Vec2::Y, Vec2::NEG_X];
        Self {
            vertices,
            normals,
            rotation: Mat2::IDENTITY,
        }
    }

    /// Builds the convex hull of a point cloud by gift wrapping.
    pub fn from_points(points: &[Vec2]) -> Result<Self, PhysicsError> {
        if points.len() < 3 {
            return Err(PhysicsError::InvalidGeometry(
                "a convex hull needs at least 3 points",
            ));
        }
        if points.len() > MAX_POLYGON_VERTICES {
            return Err(PhysicsError::InvalidGeometry(
                "point cloud exceeds the polygon vertex limit",
            ));
        }

        // Start from the rightmost point, taking the lowest y on ties.
        let mut right_most = 0;
        let mut highest_x = points[0].x;
        for (i, point) in points.iter().enumerate().skip(1) {
            if point.x > highest_x {
                highest_x = point.x;
                right_most = i;
            } else if point.x == highest_x && point.y < points[right_most].y {
                right_most = i;
            }
        }

        // Wrap around the cloud: from each hull vertex pick the candidate
        // every other point lies to the right of; collinear ties go to the
        // farther point.
        let mut hull: Vec<usize> = Vec::with_capacity(points.len());
        let mut current_index = right_most;
        loop {
            hull.push(current_index);
            let current = points[current_index];

            let mut next = 0;
            for i in 0..points.len() {
                if next == current_index {
                    next = i;
                    continue;
                }
                let e1 = points[next] - current;
                let e2 = points[i] - current;
                let turn = e1.perp_dot(e2);
                if turn < 0.0 || (turn == 0.0 && e2.length_squared() > e1.length_squared()) {
                    next = i;
                }
            }

            if next == right_most {
                break;
            }
            current_index = next;
        }

        if hull.len() < 3 {
            return Err(PhysicsError::InvalidGeometry(
                "hull collapsed to fewer than 3 vertices",
            ));
        }

        let vertices: Vec<Vec2> = hull.into_iter().map(|i| points[i]).collect();

        let mut normals = Vec::with_capacity(vertices.len());
        for i1 in 0..vertices.len() {
            let i2 = (i1 + 1) % vertices.len();
            let face = vertices[i2] - vertices[i1];
            if face.length_squared() <= f32::EPSILON * f32::EPSILON {
                return Err(PhysicsError::InvalidGeometry(
                    "hull produced a near-zero length edge",
                ));
            }
            normals.push(Vec2::new(face.y, -face.x).normalize());
        }

        Ok(Self {
            vertices,
            normals,
            rotation: Mat2::IDENTITY,
        })
    }

    /// The extreme local-space vertex along a local-space direction.
    pub fn support(&self, direction: Vec2) -> Vec2 {
        let mut best_projection = f32::MIN;
        let mut best_vertex = Vec2::ZERO;

        for vertex in &self.vertices {
            let projection = vertex.dot(direction);
            if projection > best_projection {
                best_projection = projection;
                best_vertex = *vertex;
            }
        }

        best_vertex
    }

    fn compute_mass(&mut self, density: f32) -> MassData {
        const INV3: f32 = 1.0 / 3.0;

        let mut centroid = Vec2::ZERO;
        let mut area = 0.0f32;
        let mut second_moment = 0.0f32;

        // Fan triangulation from the local origin; each edge closes a
        // triangle whose third vertex is implied at (0, 0).
        for i1 in 0..self.vertices.len() {
            let p1 = self.vertices[i1];
            let i2 = if i1 + 1 < self.vertices.len() { i1 + 1 } else { 0 };
            let p2 = self.vertices[i2];

            let d = p1.perp_dot(p2);
            let triangle_area = 0.5 * d;
            area += triangle_area;

            // Weight the centroid by triangle area, not raw vertex position.
            centroid += triangle_area * INV3 * (p1 + p2);

            let int_x2 = p1.x * p1.x + p2.x * p1.x + p2.x * p2.x;
            let int_y2 = p1.y * p1.y + p2.y * p1.y + p2.y * p2.y;
            second_moment += (0.25 * INV3 * d) * (int_x2 + int_y2);
        }

        debug_assert!(area.abs() > f32::EPSILON, "degenerate zero-area polygon");
        centroid *= 1.0 / area;

        // Recentre so the local origin is the mass centroid.
        for vertex in &mut self.vertices {
            *vertex -= centroid;
        }

        MassData::from_mass(density * area, density * second_moment)
    }
}

/// Line segment from the owning body's position to `end`. Always static.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub end: Vec2,
    pub length: f32,
    /// Barrier segments record when an external translation displaces them.
    pub barrier: bool,
    pub displaced: bool,
}

impl Segment {
    pub fn new(begin: Vec2, end: Vec2) -> Self {
        Self {
            end,
            length: begin.distance(end),
            barrier: false,
            displaced: false,
        }
    }

    pub fn barrier(begin: Vec2, end: Vec2) -> Self {
        Self {
            barrier: true,
            ..Self::new(begin, end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hull_drops_interior_points_and_winds_ccw() {
        let cloud = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(2.0, 2.0),
        ];
        let polygon = Polygon::from_points(&cloud).unwrap();

        assert_eq!(polygon.vertices.len(), 4);
        assert!(!polygon.vertices.contains(&Vec2::new(2.0, 2.0)));

        // CCW winding has positive signed area.
        let mut signed_area = 0.0;
        for i in 0..polygon.vertices.len() {
            let a = polygon.vertices[i];
            let b = polygon.vertices[(i + 1) % polygon.vertices.len()];
            signed_area += a.perp_dot(b);
        }
        assert!(signed_area > 0.0);
    }

    #[test]
    fn hull_normals_point_outward() {
        let cloud = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        let mut polygon = Polygon::from_points(&cloud).unwrap();
        polygon.compute_mass(1.0);

        // Centred on the centroid, every vertex projects positively onto its
        // edge normal.
        for (i, normal) in polygon.normals.iter().enumerate() {
            assert!(normal.dot(polygon.vertices[i]) > 0.0);
            assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn hull_rejects_bad_point_counts() {
        let two = [Vec2::ZERO, Vec2::X];
        assert!(matches!(
            Polygon::from_points(&two),
            Err(PhysicsError::InvalidGeometry(_))
        ));

        let many: Vec<Vec2> = (0..21)
            .map(|i| {
                let theta = i as f32 * std::f32::consts::TAU / 21.0;
                Vec2::new(theta.cos(), theta.sin())
            })
            .collect();
        assert!(matches!(
            Polygon::from_points(&many),
            Err(PhysicsError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn hull_rejects_collinear_cloud() {
        let collinear = [Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0)];
        assert!(Polygon::from_points(&collinear).is_err());
    }

    #[test]
    fn rectangle_mass_matches_closed_form() {
        let mut polygon = Polygon::rectangle(1.0, 1.0);
        let mass_data = polygon.compute_mass(1.0);

        // 2x2 box at density 1: mass 4, inertia m(w² + h²)/12 = 8/3.
        assert_relative_eq!(mass_data.inverse_mass, 0.25, epsilon = 1e-6);
        assert_relative_eq!(mass_data.inverse_inertia, 3.0 / 8.0, epsilon = 1e-6);
    }

    #[test]
    fn mass_computation_recentres_vertices() {
        let offset_square = [
            Vec2::new(1.0, 1.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(1.0, 3.0),
        ];
        let mut polygon = Polygon::from_points(&offset_square).unwrap();
        polygon.compute_mass(1.0);

        for vertex in &polygon.vertices {
            assert_relative_eq!(vertex.x.abs(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(vertex.y.abs(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn sphere_mass_is_area_times_density() {
        let sphere = Sphere::new(2.0);
        let mass_data = sphere.compute_mass(1.0);

        let mass = std::f32::consts::PI * 4.0;
        assert_relative_eq!(mass_data.inverse_mass, 1.0 / mass, epsilon = 1e-6);
        assert_relative_eq!(mass_data.inverse_inertia, 1.0 / (mass * 4.0), epsilon = 1e-6);
    }

    #[test]
    fn zero_density_shapes_are_static() {
        let sphere = Sphere::new(5.0);
        assert_eq!(sphere.compute_mass(0.0), MassData::STATIC);

        let mut polygon = Polygon::rectangle(2.0, 3.0);
        assert_eq!(polygon.compute_mass(0.0), MassData::STATIC);

        let mut segment = Shape::Segment(Segment::new(Vec2::ZERO, Vec2::X * 10.0));
        assert_eq!(segment.compute_mass(5.0), MassData::STATIC);
    }

    #[test]
    fn support_returns_extreme_vertex() {
        let polygon = Polygon::rectangle(2.0, 1.0);
        assert_eq!(polygon.support(Vec2::new(1.0, 0.5)), Vec2::new(2.0, 1.0));
        assert_eq!(polygon.support(Vec2::new(-1.0, -0.5)), Vec2::new(-2.0, -1.0));
    }
}
