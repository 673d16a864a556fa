use glam::Vec2;

use crate::config::SEGMENT_CONTACT_BUFFER;
use crate::core::rigidbody::RigidBody;
use crate::core::shape::{Polygon, ShapeKind};
use crate::utils::math::bias_greater_than;

/// Raw geometric result of a narrow-phase test: contact normal (pointing
/// from the first body toward the second), penetration depth, and up to two
/// contact points in world space.
#[derive(Debug, Clone, Copy)]
pub struct ContactGeometry {
    pub normal: Vec2,
    pub penetration: f32,
    pub points: [Vec2; 2],
    pub count: u32,
}

impl ContactGeometry {
    fn single(normal: Vec2, penetration: f32, point: Vec2) -> Self {
        Self {
            normal,
            penetration,
            points: [point, Vec2::ZERO],
            count: 1,
        }
    }
}

/// Narrow-phase dispatcher over the closed shape set.
pub struct NarrowPhase;

impl NarrowPhase {
    /// Exact contact test for a body pair. The lower triangle of the shape
    /// pair table reuses the transposed detector with the normal negated, so
    /// the normal always points from `a` toward `b`.
    ///
    /// Segment–polygon and segment–segment pairs are not implemented and
    /// report no contact; those combinations interpenetrate freely.
    pub fn collide(a: &RigidBody, b: &RigidBody) -> Option<ContactGeometry> {
        use ShapeKind::*;

        match (a.shape_kind(), b.shape_kind()) {
            (Sphere, Sphere) => sphere_sphere(a, b),
            (Sphere, Polygon) => sphere_polygon(a, b),
            (Sphere, Segment) => sphere_segment(a, b),
            (Polygon, Sphere) => flipped(sphere_polygon(b, a)),
            (Polygon, Polygon) => polygon_polygon(a, b),
            (Segment, Sphere) => flipped(sphere_segment(b, a)),
            (Polygon, Segment) | (Segment, Polygon) | (Segment, Segment) => None,
        }
    }
}

fn flipped(contact: Option<ContactGeometry>) -> Option<ContactGeometry> {
    contact.map(|mut geometry| {
        geometry.normal = -geometry.normal;
        geometry
    })
}

fn sphere_sphere(a: &RigidBody, b: &RigidBody) -> Option<ContactGeometry> {
    let s1 = a.shape.as_sphere()?;
    let s2 = b.shape.as_sphere()?;

    let normal = b.position - a.position;
    let dist_sqr = normal.length_squared();
    let radius_total = s1.radius + s2.radius;

    if dist_sqr >= radius_total * radius_total {
        return None;
    }

    let distance = dist_sqr.sqrt();
    if distance == 0.0 {
        // Coincident centres: any axis works, pick +X.
        Some(ContactGeometry::single(Vec2::X, s1.radius, a.position))
    } else {
        let normal = normal / distance;
        Some(ContactGeometry::single(
            normal,
            radius_total - distance,
            normal * s1.radius + a.position,
        ))
    }
}

fn sphere_polygon(a: &RigidBody, b: &RigidBody) -> Option<ContactGeometry> {
    let sphere = a.shape.as_sphere()?;
    let polygon = b.shape.as_polygon()?;

    // Sphere centre in polygon model space.
    let center = polygon.rotation.transpose() * (a.position - b.position);

    // Face of maximum signed separation, the same support-point idea as the
    // polygon-polygon axis search.
    let mut separation = f32::MIN;
    let mut face_index = 0;
    for i in 0..polygon.vertices.len() {
        let s = polygon.normals[i].dot(center - polygon.vertices[i]);

        if s > sphere.radius {
            return None;
        }
        if s > separation {
            separation = s;
            face_index = i;
        }
    }

    let v1 = polygon.vertices[face_index];
    let i2 = if face_index + 1 < polygon.vertices.len() {
        face_index + 1
    } else {
        0
    };
    let v2 = polygon.vertices[i2];

    // Centre inside the polygon: push out along the best face.
    if separation < f32::EPSILON {
        let normal = -(polygon.rotation * polygon.normals[face_index]);
        return Some(ContactGeometry::single(
            normal,
            sphere.radius,
            normal * sphere.radius + a.position,
        ));
    }

    // Voronoi region of the nearest face.
    let dot1 = (center - v1).dot(v2 - v1);
    let dot2 = (center - v2).dot(v1 - v2);
    let penetration = sphere.radius - separation;

    if dot1 < 0.0 {
        // Closest to v1.
        if center.distance_squared(v1) > sphere.radius * sphere.radius {
            return None;
        }
        let normal = (polygon.rotation * (v1 - center)).normalize();
        let contact = polygon.rotation * v1 + b.position;
        Some(ContactGeometry::single(normal, penetration, contact))
    } else if dot2 <= 0.0 {
        // Closest to v2.
        if center.distance_squared(v2) > sphere.radius * sphere.radius {
            return None;
        }
        let normal = (polygon.rotation * (v2 - center)).normalize();
        let contact = polygon.rotation * v2 + b.position;
        Some(ContactGeometry::single(normal, penetration, contact))
    } else {
        // Closest to the face itself.
        let face_normal = polygon.normals[face_index];
        if (center - v1).dot(face_normal) > sphere.radius {
            return None;
        }
        let normal = -(polygon.rotation * face_normal);
        Some(ContactGeometry::single(
            normal,
            penetration,
            normal * sphere.radius + a.position,
        ))
    }
}

fn sphere_segment(a: &RigidBody, b: &RigidBody) -> Option<ContactGeometry> {
    let sphere = a.shape.as_sphere()?;
    let segment = b.shape.as_segment()?;

    let radius_sqr = sphere.radius * sphere.radius;

    // Either endpoint overlapping the sphere settles it immediately.
    if let Some(contact) = point_contact(a.position, sphere.radius, radius_sqr, b.position) {
        return Some(contact);
    }
    if let Some(contact) = point_contact(a.position, sphere.radius, radius_sqr, segment.end) {
        return Some(contact);
    }

    // Project the centre onto the carrier line.
    let along = segment.end - b.position;
    let t = (a.position - b.position).dot(along) / (segment.length * segment.length);
    let projected = b.position + t * along;

    // The projection counts only if it lies on the segment: its distances to
    // the endpoints must sum to the segment length, within the buffer.
    let endpoint_distances = projected.distance(b.position) + projected.distance(segment.end);
    if endpoint_distances < segment.length - SEGMENT_CONTACT_BUFFER
        || endpoint_distances > segment.length + SEGMENT_CONTACT_BUFFER
    {
        return None;
    }

    point_contact(a.position, sphere.radius, radius_sqr, projected)
}

/// Sphere-versus-point test shared by the segment endpoint and projection
/// cases.
fn point_contact(
    center: Vec2,
    radius: f32,
    radius_sqr: f32,
    point: Vec2,
) -> Option<ContactGeometry> {
    let dist_sqr = center.distance_squared(point);
    if dist_sqr > radius_sqr {
        return None;
    }

    let distance = dist_sqr.sqrt();
    let normal = (point - center) / distance;
    Some(ContactGeometry::single(
        normal,
        radius - distance,
        normal * radius + center,
    ))
}

fn polygon_polygon(a: &RigidBody, b: &RigidBody) -> Option<ContactGeometry> {
    let poly_a = a.shape.as_polygon()?;
    let poly_b = b.shape.as_polygon()?;

    // A separating axis along either polygon's face normals means no contact.
    let (penetration_a, face_a) =
        find_axis_least_penetration(poly_a, a.position, poly_b, b.position);
    if penetration_a >= 0.0 {
        return None;
    }
    let (penetration_b, face_b) =
        find_axis_least_penetration(poly_b, b.position, poly_a, a.position);
    if penetration_b >= 0.0 {
        return None;
    }

    // The polygon with the shallower penetration owns the reference face;
    // the biased comparison keeps the choice sticky on near ties.
    let (ref_poly, ref_position, inc_poly, inc_position, mut reference_index, flip) =
        if bias_greater_than(penetration_a, penetration_b) {
            (poly_a, a.position, poly_b, b.position, face_a, false)
        } else {
            (poly_b, b.position, poly_a, a.position, face_b, true)
        };

    let mut incident_face = find_incident_face(ref_poly, inc_poly, inc_position, reference_index);

    // Reference face vertices in world space.
    let v1 = ref_poly.vertices[reference_index];
    reference_index = if reference_index + 1 == ref_poly.vertices.len() {
        0
    } else {
        reference_index + 1
    };
    let v2 = ref_poly.vertices[reference_index];

    let v1 = ref_poly.rotation * v1 + ref_position;
    let v2 = ref_poly.rotation * v2 + ref_position;

    let side_plane_normal = (v2 - v1).normalize();
    let ref_face_normal = Vec2::new(side_plane_normal.y, -side_plane_normal.x);

    // ax + by = c, with c the face's distance from the origin.
    let ref_c = ref_face_normal.dot(v1);
    let neg_side = -side_plane_normal.dot(v1);
    let pos_side = side_plane_normal.dot(v2);

    // Clip the incident face to the reference face's side planes. Floating
    // point error can leave fewer than two points; treat that as no contact.
    if clip(-side_plane_normal, neg_side, &mut incident_face) < 2 {
        return None;
    }
    if clip(side_plane_normal, pos_side, &mut incident_face) < 2 {
        return None;
    }

    let normal = if flip {
        -ref_face_normal
    } else {
        ref_face_normal
    };

    // Keep clipped points behind the reference face as actual contacts.
    let mut points = [Vec2::ZERO; 2];
    let mut count = 0;
    let mut penetration = 0.0;

    let separation = ref_face_normal.dot(incident_face[0]) - ref_c;
    if separation <= 0.0 {
        points[count] = incident_face[0];
        penetration = -separation;
        count += 1;
    }

    let separation = ref_face_normal.dot(incident_face[1]) - ref_c;
    if separation <= 0.0 {
        points[count] = incident_face[1];
        penetration += -separation;
        count += 1;
        penetration /= count as f32;
    }

    Some(ContactGeometry {
        normal,
        penetration,
        points,
        count: count as u32,
    })
}

/// For each face of `poly_a`, measures how far `poly_b`'s support point along
/// the negated face normal sits in front of the face, all in `poly_b`'s model
/// space. Returns the greatest (least negative) distance and its face index;
/// a non-negative result is a separating axis.
fn find_axis_least_penetration(
    poly_a: &Polygon,
    position_a: Vec2,
    poly_b: &Polygon,
    position_b: Vec2,
) -> (f32, usize) {
    let mut best_distance = f32::MIN;
    let mut best_index = 0;

    let into_b = poly_b.rotation.transpose();
    for i in 0..poly_a.vertices.len() {
        // Face normal of A in B's model space.
        let world_normal = poly_a.rotation * poly_a.normals[i];
        let normal = into_b * world_normal;

        let support = poly_b.support(-normal);

        // Face vertex of A, also brought into B's model space.
        let mut vertex = poly_a.rotation * poly_a.vertices[i] + position_a;
        vertex -= position_b;
        vertex = into_b * vertex;

        let distance = normal.dot(support - vertex);
        if distance > best_distance {
            best_distance = distance;
            best_index = i;
        }
    }

    (best_distance, best_index)
}

/// The incident face is the one on the non-reference polygon whose normal is
/// most anti-parallel to the reference face normal. Returns its endpoints in
/// world space.
fn find_incident_face(
    ref_poly: &Polygon,
    inc_poly: &Polygon,
    inc_position: Vec2,
    reference_index: usize,
) -> [Vec2; 2] {
    let mut reference_normal = ref_poly.rotation * ref_poly.normals[reference_index];
    reference_normal = inc_poly.rotation.transpose() * reference_normal;

    let mut incident_index = 0;
    let mut min_dot = f32::MAX;
    for i in 0..inc_poly.vertices.len() {
        let d = reference_normal.dot(inc_poly.normals[i]);
        if d < min_dot {
            min_dot = d;
            incident_index = i;
        }
    }

    let first = inc_poly.rotation * inc_poly.vertices[incident_index] + inc_position;
    let incident_index = if incident_index + 1 >= inc_poly.vertices.len() {
        0
    } else {
        incident_index + 1
    };
    let second = inc_poly.rotation * inc_poly.vertices[incident_index] + inc_position;

    [first, second]
}

/// Sutherland–Hodgman clip of a two-point face against the half-plane
/// `n · x <= c`. Returns how many points survived.
fn clip(n: Vec2, c: f32, face: &mut [Vec2; 2]) -> usize {
    let mut kept = 0;
    let mut out = [face[0], face[1]];

    // Signed distances from each endpoint to the plane.
    let d1 = n.dot(face[0]) - c;
    let d2 = n.dot(face[1]) - c;

    if d1 <= 0.0 {
        out[kept] = face[0];
        kept += 1;
    }
    if d2 <= 0.0 {
        out[kept] = face[1];
        kept += 1;
    }

    // Endpoints on opposite sides: keep the crossing point. Strict less-than
    // ignores -0.0.
    if d1 * d2 < 0.0 {
        let alpha = d1 / (d1 - d2);
        out[kept] = face[0] + alpha * (face[1] - face[0]);
        kept += 1;
    }

    face[0] = out[0];
    face[1] = out[1];

    kept
}
