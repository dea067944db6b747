use crate::math::vec2::Vec2;

/// Determinant magnitude below which two lines are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    pub fn length_squared(&self) -> f64 {
        self.a.distance_squared(self.b)
    }

    /// Direction vector from `a` to `b` (not normalized).
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    /// Closest point on the segment to `point`.
    ///
    /// The projection parameter is clamped to [0, 1]. A zero-length segment returns `a`.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let ab = self.direction();
        let len_sq = ab.magnitude_squared();
        if len_sq == 0.0 {
            return self.a;
        }
        let t = (point - self.a).dot(ab) / len_sq;
        if t <= 0.0 {
            self.a
        } else if t >= 1.0 {
            self.b
        } else {
            self.a + ab * t
        }
    }

    /// Intersection of the infinite lines through `self` and `other`.
    ///
    /// The result may lie outside either segment. Returns `None` when the
    /// lines are parallel or nearly so.
    pub fn line_intersection(&self, other: &LineSegment) -> Option<Vec2> {
        let d1 = self.direction();
        let d2 = other.direction();
        let denom = d2.y * d1.x - d2.x * d1.y;
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let offset = self.a - other.a;
        let ua = (d2.x * offset.y - d2.y * offset.x) / denom;
        Some(self.a + d1 * ua)
    }
}
