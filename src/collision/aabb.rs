// Axis-aligned bounding boxes for the broad phase

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB, sorting the corner coordinates so that `min <= max`.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Box of a circle: center +/- radius on both axes.
    pub fn from_circle(center: Vec2, radius: f64) -> Self {
        let extent = Vec2::new(radius, radius);
        AABB {
            min: center - extent,
            max: center + extent,
        }
    }

    /// Smallest box containing every point, or `None` for an empty set.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = AABB {
            min: *first,
            max: *first,
        };
        aabb.extend(rest);
        Some(aabb)
    }

    /// Recomputes the box in place from a point set. An empty set leaves it unchanged.
    pub fn update_from_vertices(&mut self, points: &[Vec2]) {
        if let Some(aabb) = AABB::from_points(points) {
            *self = aabb;
        }
    }

    fn extend(&mut self, points: &[Vec2]) {
        for point in points {
            self.min.x = self.min.x.min(point.x);
            self.min.y = self.min.y.min(point.y);
            self.max.x = self.max.x.max(point.x);
            self.max.y = self.max.y.max(point.y);
        }
    }

    /// Strict overlap test: boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        let x_overlap = self.max.x > other.min.x && self.min.x < other.max.x;
        let y_overlap = self.max.y > other.min.y && self.min.y < other.max.y;
        x_overlap && y_overlap
    }

    /// Inclusive containment test: points on the boundary are inside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}
