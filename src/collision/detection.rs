//! Narrow-phase tests for every pair of shape kinds.
//!
//! Each test returns a [`Manifold`]; an invalid (empty) one means the bodies
//! do not touch. Body indices are passed through to the manifold untouched.

use super::manifold::Manifold;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use crate::shapes::{LineSegment, Polygon};

/// Normal used when two centers coincide and no direction can be derived.
const FALLBACK_NORMAL: Vec2 = Vec2 { x: 1.0, y: 0.0 };

/// Circle against circle. `a` is the reference body.
pub fn circle_vs_circle(a: &RigidBody, a_idx: usize, b: &RigidBody, b_idx: usize) -> Manifold {
    let (Some(radius_a), Some(radius_b)) = (a.radius(), b.radius()) else {
        return Manifold::empty(a_idx, b_idx);
    };

    let offset = b.position - a.position;
    let distance = offset.magnitude();
    let radii_sum = radius_a + radius_b;
    if distance >= radii_sum {
        return Manifold::empty(a_idx, b_idx);
    }

    let normal = if distance > 0.0 {
        offset / distance
    } else {
        FALLBACK_NORMAL
    };
    let penetration = radii_sum - distance;
    let contact = a.position + normal * (radius_a - penetration / 2.0);

    Manifold::new(a_idx, b_idx, normal, penetration, vec![contact], &[])
}

/// Circle against polygon.
///
/// `circle_is_reference` picks the reference body; the normal always points
/// from the reference to the incident body.
pub fn circle_vs_polygon(
    circle: &RigidBody,
    circle_idx: usize,
    polygon: &RigidBody,
    polygon_idx: usize,
    circle_is_reference: bool,
) -> Manifold {
    let (reference, incident) = if circle_is_reference {
        (circle_idx, polygon_idx)
    } else {
        (polygon_idx, circle_idx)
    };

    let radius = circle.radius().unwrap_or(0.0);
    let center = circle.position;
    let Some(closest) = closest_point_on_boundary(&polygon.world_vertices, center) else {
        return Manifold::empty(reference, incident);
    };

    let distance = closest.distance(center);
    if distance >= radius {
        return Manifold::empty(reference, incident);
    }

    // Points from the polygon surface toward the circle center
    let mut normal = if distance > 0.0 {
        (center - closest) / distance
    } else {
        FALLBACK_NORMAL
    };
    if circle_is_reference {
        normal = -normal;
    }

    let reference_vertices: &[Vec2] = if circle_is_reference {
        &[]
    } else {
        polygon.world_vertices.points()
    };
    Manifold::new(
        reference,
        incident,
        normal,
        radius - distance,
        vec![closest],
        reference_vertices,
    )
}

/// Closest point to `point` over all edges of `polygon`, or `None` if it has no vertices.
pub fn closest_point_on_boundary(polygon: &Polygon, point: Vec2) -> Option<Vec2> {
    let n = polygon.len();
    let mut best: Option<(Vec2, f64)> = None;
    for i in 0..n {
        let edge = LineSegment::new(polygon.at(i), polygon.at(i + 1));
        let candidate = edge.closest_point(point);
        let distance_sq = candidate.distance_squared(point);
        if best.map_or(true, |(_, d)| distance_sq < d) {
            best = Some((candidate, distance_sq));
        }
    }
    best.map(|(p, _)| p)
}

/// Polygon against polygon using the separating axis theorem.
///
/// The candidate axes are both polygons' edge normals. The axis with the
/// smallest overlap wins, and the body that owns it becomes the reference.
/// Contact points come from clipping the incident polygon against the
/// reference polygon.
pub fn polygon_vs_polygon(a: &RigidBody, a_idx: usize, b: &RigidBody, b_idx: usize) -> Manifold {
    let poly_a = &a.world_vertices;
    let poly_b = &b.world_vertices;
    if poly_a.len() < 3 || poly_b.len() < 3 {
        return Manifold::empty(a_idx, b_idx);
    }

    let direction = b.position - a.position;
    let mut min_overlap = f64::INFINITY;
    let mut min_axis = Vec2::ZERO;
    let mut min_axis_index = 0;

    for (index, &axis) in poly_a.normals().iter().chain(poly_b.normals()).enumerate() {
        let overlap = poly_a.project(axis).overlap(&poly_b.project(axis));
        if overlap <= 0.0 {
            return Manifold::empty(a_idx, b_idx);
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            // Orient from A toward B
            min_axis = if axis.dot(direction) < 0.0 { -axis } else { axis };
            min_axis_index = index;
        }
    }

    let a_is_reference = min_axis_index < poly_a.len();
    let (reference_idx, incident_idx, reference, incident, normal) = if a_is_reference {
        (a_idx, b_idx, poly_a, poly_b, min_axis)
    } else {
        (b_idx, a_idx, poly_b, poly_a, -min_axis)
    };

    let contacts = find_contact_points(reference, incident);
    Manifold::new(
        reference_idx,
        incident_idx,
        normal,
        min_overlap,
        contacts,
        reference.points(),
    )
}

/// Sutherland-Hodgman: clips the incident polygon against every edge of the
/// reference polygon and returns what is left.
pub fn find_contact_points(reference: &Polygon, incident: &Polygon) -> Vec<Vec2> {
    let mut output = incident.points().to_vec();
    for (i, &normal) in reference.normals().iter().enumerate() {
        let edge = LineSegment::new(reference.at(i), reference.at(i + 1));
        // Stored normals point inward for counter-clockwise winding
        output = clip_against_edge(&output, &edge, -normal);
        if output.is_empty() {
            break;
        }
    }
    output
}

/// Keeps the part of a closed vertex loop on the inner side of `edge`.
///
/// A vertex is inside when `outward_normal . (vertex - edge.a) <= 0`.
/// Crossing points are found with the infinite line through `edge`; near
/// parallel crossings are dropped.
pub fn clip_against_edge(vertices: &[Vec2], edge: &LineSegment, outward_normal: Vec2) -> Vec<Vec2> {
    let n = vertices.len();
    let mut output = Vec::with_capacity(n + 1);
    if n == 0 {
        return output;
    }

    let is_inside = |v: Vec2| outward_normal.dot(v - edge.a) <= 0.0;

    for i in 0..n {
        let current = vertices[i];
        let previous = vertices[(i + n - 1) % n];
        let current_inside = is_inside(current);
        let previous_inside = is_inside(previous);

        if current_inside {
            if !previous_inside {
                output.extend(LineSegment::new(previous, current).line_intersection(edge));
            }
            output.push(current);
        } else if previous_inside {
            output.extend(LineSegment::new(previous, current).line_intersection(edge));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{BodyOptions, Shapes};
    const EPSILON: f64 = 1e-9;

    fn circle(x: f64, y: f64, radius: f64) -> RigidBody {
        Shapes::circle(x, y, radius, BodyOptions::default()).unwrap()
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> RigidBody {
        Shapes::rect(x, y, w, h, BodyOptions::default()).unwrap()
    }

    #[test]
    fn test_circle_circle_colliding() {
        let a = circle(0.0, 0.0, 5.0);
        let b = circle(8.0, 0.0, 5.0);
        let m = circle_vs_circle(&a, 0, &b, 1);
        assert!(m.is_valid());
        assert_eq!((m.reference, m.incident), (0, 1));
        assert!((m.penetration - 2.0).abs() < EPSILON);
        assert!((m.normal.x - 1.0).abs() < EPSILON);
        assert!(m.normal.y.abs() < EPSILON);
        // A.pos + n * (rA - pen / 2)
        assert!((m.contacts()[0].x - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_circle_touching_is_not_a_collision() {
        let a = circle(0.0, 0.0, 5.0);
        let b = circle(10.0, 0.0, 5.0);
        assert!(!circle_vs_circle(&a, 0, &b, 1).is_valid());
    }

    #[test]
    fn test_circle_circle_concentric() {
        let a = circle(3.0, 3.0, 1.0);
        let b = circle(3.0, 3.0, 2.0);
        let m = circle_vs_circle(&a, 0, &b, 1);
        assert!(m.is_valid());
        assert_eq!(m.normal, Vec2::new(1.0, 0.0));
        assert!((m.penetration - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_polygon_polygon_reference() {
        let c = circle(0.0, -4.0, 5.0);
        let ground = rect(0.0, 0.0, 20.0, 2.0);
        let m = circle_vs_polygon(&c, 0, &ground, 1, false);
        assert!(m.is_valid());
        assert_eq!((m.reference, m.incident), (1, 0));
        assert!((m.penetration - 2.0).abs() < EPSILON);
        // Polygon toward circle
        assert!((m.normal.y - -1.0).abs() < EPSILON);
        assert!((m.contacts()[0] - Vec2::new(0.0, -1.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_circle_polygon_circle_reference() {
        let c = circle(0.0, -4.0, 5.0);
        let ground = rect(0.0, 0.0, 20.0, 2.0);
        let m = circle_vs_polygon(&c, 0, &ground, 1, true);
        assert!(m.is_valid());
        assert_eq!((m.reference, m.incident), (0, 1));
        // Circle toward polygon
        assert!((m.normal.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_polygon_no_collision() {
        let c = circle(0.0, -10.0, 5.0);
        let ground = rect(0.0, 0.0, 20.0, 2.0);
        assert!(!circle_vs_polygon(&c, 0, &ground, 1, false).is_valid());
    }

    #[test]
    fn test_circle_polygon_near_corner() {
        let c = circle(12.0, -3.0, 3.0);
        let ground = rect(0.0, 0.0, 20.0, 2.0);
        let m = circle_vs_polygon(&c, 0, &ground, 1, false);
        // Closest point is the corner (10, -1)
        assert!(m.is_valid());
        assert!((m.contacts()[0] - Vec2::new(10.0, -1.0)).magnitude() < EPSILON);
        let expected_normal = Vec2::new(2.0, -2.0).normalize();
        assert!((m.normal - expected_normal).magnitude() < EPSILON);
        assert!((m.penetration - (3.0 - 8.0_f64.sqrt())).abs() < EPSILON);
    }

    #[test]
    fn test_polygon_polygon_overlapping_boxes() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(1.5, 0.5, 2.0, 2.0);
        let m = polygon_vs_polygon(&a, 0, &b, 1);
        assert!(m.is_valid());
        assert_eq!((m.reference, m.incident), (0, 1));
        assert!((m.penetration - 0.5).abs() < EPSILON);
        assert!((m.normal - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
        assert_eq!(m.all_contacts().len(), 4);

        let contacts = m.contacts();
        assert_eq!(contacts.len(), 2);
        for c in contacts {
            assert!((c.x - 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn test_polygon_polygon_normal_points_reference_to_incident() {
        // Same overlap as above with the argument order swapped
        let a = rect(1.5, 0.5, 2.0, 2.0);
        let b = rect(0.0, 0.0, 2.0, 2.0);
        let m = polygon_vs_polygon(&a, 0, &b, 1);
        assert!(m.is_valid());
        let reference = if m.reference == 0 { &a } else { &b };
        let incident = if m.incident == 0 { &a } else { &b };
        let towards_incident = incident.position() - reference.position();
        assert!(m.normal.dot(towards_incident) > 0.0);
    }

    #[test]
    fn test_polygon_polygon_stacked_boxes_contact_count() {
        let ground = rect(0.0, 0.0, 10.0, 2.0);
        let block = rect(0.0, -1.9, 2.0, 2.0);
        let m = polygon_vs_polygon(&ground, 0, &block, 1);
        assert!(m.is_valid());
        assert!((m.penetration - 0.1).abs() < EPSILON);
        assert!(!m.contacts().is_empty() && m.contacts().len() <= 2);
    }

    #[test]
    fn test_polygon_polygon_separated_despite_bounds_overlap() {
        let options = BodyOptions::default();
        let a = Shapes::polygon(
            0.0,
            0.0,
            vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)],
            options,
        )
        .unwrap();
        let b = Shapes::polygon(
            0.0,
            0.0,
            vec![Vec2::new(3.0, 3.0), Vec2::new(5.0, 3.0), Vec2::new(5.0, 5.0)],
            options,
        )
        .unwrap();
        assert!(a.bounds().unwrap().overlaps(b.bounds().unwrap()));
        assert!(!polygon_vs_polygon(&a, 0, &b, 1).is_valid());
    }

    #[test]
    fn test_clip_against_edge() {
        // Keep everything with x <= 1
        let edge = LineSegment::new(Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0));
        let square = [
            Vec2::new(0.5, -0.5),
            Vec2::new(2.5, -0.5),
            Vec2::new(2.5, 1.5),
            Vec2::new(0.5, 1.5),
        ];
        let clipped = clip_against_edge(&square, &edge, Vec2::new(1.0, 0.0));
        assert_eq!(clipped.len(), 4);
        assert_eq!(clipped[0], Vec2::new(0.5, -0.5));
        assert!((clipped[1] - Vec2::new(1.0, -0.5)).magnitude() < EPSILON);
        assert!((clipped[2] - Vec2::new(1.0, 1.5)).magnitude() < EPSILON);
        assert_eq!(clipped[3], Vec2::new(0.5, 1.5));
    }

    #[test]
    fn test_clip_against_edge_everything_outside() {
        let edge = LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0));
        let points = [Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(2.0, 1.0)];
        assert!(clip_against_edge(&points, &edge, Vec2::new(-1.0, 0.0)).len() == 3);
        assert!(clip_against_edge(&points, &edge, Vec2::new(1.0, 0.0)).is_empty());
        assert!(clip_against_edge(&[], &edge, Vec2::new(1.0, 0.0)).is_empty());
    }
}
