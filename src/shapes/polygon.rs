use crate::math::vec2::Vec2;

/// Fallback inertia factor for polygons whose area-weighted sum degenerates.
pub const DEGENERATE_INERTIA_FACTOR: f64 = 0.01;

/// The interval covered by a shape projected onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f64,
    pub max: f64,
}

impl Projection {
    /// Length of the shared part of two intervals. Zero or negative means disjoint.
    pub fn overlap(&self, other: &Projection) -> f64 {
        self.max.min(other.max) - self.min.max(other.min)
    }
}

/// An ordered vertex list describing a convex polygon.
///
/// With three or more points the winding is normalized to counter-clockwise
/// (positive signed area). Edge normals are kept in sync with the points:
/// rotating invalidates and rebuilds them, translating leaves them untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Creates a polygon from a vertex list, reversing it if it winds clockwise.
    ///
    /// Fewer than three points are accepted as-is (no winding fix-up); such
    /// polygons have no meaningful area or normals.
    pub fn new(mut points: Vec<Vec2>) -> Self {
        if points.len() >= 3 && signed_area(&points) < 0.0 {
            points.reverse();
        }
        let normals = edge_normals(&points);
        Polygon { points, normals }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Vertex at `index`, wrapping around the end of the list.
    ///
    /// Panics on an empty polygon.
    pub fn at(&self, index: usize) -> Vec2 {
        self.points[index % self.points.len()]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec2> {
        self.points.iter()
    }

    /// Unit normal of every edge `(p[i], p[i+1])`, computed as the edge's
    /// left-hand perpendicular. For counter-clockwise winding these point
    /// into the polygon.
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Projects every vertex onto `axis` and returns the covered interval.
    pub fn project(&self, axis: Vec2) -> Projection {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for vertex in &self.points {
            let projection = vertex.dot(axis);
            min = min.min(projection);
            max = max.max(projection);
        }
        Projection { min, max }
    }

    /// Rotates all points about the local origin.
    pub fn rotate_in_place(&mut self, angle: f64) {
        if angle == 0.0 {
            return;
        }
        let (sin_a, cos_a) = angle.sin_cos();
        for p in self.points.iter_mut() {
            *p = Vec2::new(p.x * cos_a - p.y * sin_a, p.x * sin_a + p.y * cos_a);
        }
        self.normals = edge_normals(&self.points);
    }

    /// Moves all points by `offset`. Edge directions are unchanged, so the normals stay valid.
    pub fn translate_in_place(&mut self, offset: Vec2) {
        for p in self.points.iter_mut() {
            *p += offset;
        }
    }

    /// Signed area via the Shoelace formula. Positive for counter-clockwise winding.
    pub fn area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// True when no vertex turns clockwise. Collinear vertices are allowed.
    ///
    /// Meaningful only after the winding was normalized to counter-clockwise.
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        (0..n).all(|i| {
            let edge = self.at(i + 1) - self.at(i);
            let next = self.at(i + 2) - self.at(i + 1);
            edge.cross(next) >= 0.0
        })
    }

    /// Moment of inertia about the local origin for a polygon of the given mass.
    ///
    /// Falls back to `mass * 0.01` for fewer than three vertices or when the
    /// weighted sum collapses.
    pub fn inertia(&self, mass: f64) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return mass * DEGENERATE_INERTIA_FACTOR;
        }

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for i in 0..n {
            let p0 = self.points[i];
            let p1 = self.points[(i + 1) % n];
            let cross = p0.cross(p1).abs();
            let term = p0.dot(p0) + p0.dot(p1) + p1.dot(p1);
            numerator += cross * term;
            denominator += cross;
        }

        if denominator > 0.0 {
            mass / 6.0 * (numerator / denominator)
        } else {
            mass * DEGENERATE_INERTIA_FACTOR
        }
    }
}

fn signed_area(points: &[Vec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        area += points[i].cross(points[(i + 1) % n]);
    }
    area / 2.0
}

fn edge_normals(points: &[Vec2]) -> Vec<Vec2> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .map(|i| (points[(i + 1) % n] - points[i]).perpendicular().normalize())
        .collect()
}
