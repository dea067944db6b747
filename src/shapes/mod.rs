pub mod circle;
pub mod factory;
pub mod line_segment;
pub mod polygon;

pub use circle::Circle;
pub use factory::{BodyOptions, Shapes};
pub use line_segment::LineSegment;
pub use polygon::{Polygon, Projection};

use crate::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;
use std::f64::consts::TAU;
use std::fmt;

/// Smallest side length accepted for an equilateral triangle.
pub const MIN_TRIANGLE_SIZE: f64 = 1.0;

/// Type tag of a body's shape, as seen by renderers and the collision dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle,
    Polygon,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

/// Local-space geometry of a rigid body.
///
/// Everything except `Circle` carries a counter-clockwise polygon centered on
/// the body origin. Circles collide by radius and have no vertices.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Rectangle {
        width: f64,
        height: f64,
        vertices: Polygon,
    },
    Triangle {
        size: f64,
        vertices: Polygon,
    },
    Polygon(Polygon),
}

impl Shape {
    pub fn circle(radius: f64) -> Result<Self> {
        Ok(Shape::Circle(Circle::new(radius)?))
    }

    /// Axis-aligned rectangle centered on the origin.
    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        if !(positive_finite(width) && positive_finite(height)) {
            return Err(invalid(ShapeKind::Rectangle, "width and height must be positive finite numbers"));
        }
        let (hw, hh) = (width / 2.0, height / 2.0);
        let vertices = Polygon::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ]);
        Ok(Shape::Rectangle {
            width,
            height,
            vertices,
        })
    }

    /// Equilateral triangle with side `size`, its centroid on the origin.
    pub fn triangle(size: f64) -> Result<Self> {
        if !(size.is_finite() && size >= MIN_TRIANGLE_SIZE) {
            return Err(invalid(ShapeKind::Triangle, "size must be a finite number of at least 1"));
        }
        let h = size * 3.0_f64.sqrt() / 2.0;
        let vertices = Polygon::new(vec![
            Vec2::new(-size / 2.0, -h / 3.0),
            Vec2::new(size / 2.0, -h / 3.0),
            Vec2::new(0.0, 2.0 * h / 3.0),
        ]);
        Ok(Shape::Triangle { size, vertices })
    }

    /// Regular polygon inscribed in a circle of `radius`, used to approximate a
    /// circle with vertices.
    pub fn regular_polygon(radius: f64, segments: usize) -> Result<Self> {
        if !positive_finite(radius) {
            return Err(invalid(ShapeKind::Polygon, "radius must be a positive finite number"));
        }
        if segments < 3 {
            return Err(invalid(ShapeKind::Polygon, "a circle approximation needs at least 3 segments"));
        }
        let step = TAU / segments as f64;
        let points = (0..segments)
            .map(|i| {
                let (sin, cos) = (step * i as f64).sin_cos();
                Vec2::new(radius * cos, radius * sin)
            })
            .collect();
        Ok(Shape::Polygon(Polygon::new(points)))
    }

    /// Arbitrary convex polygon given in local space around the body origin.
    pub fn polygon(points: Vec<Vec2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(invalid(ShapeKind::Polygon, "a polygon needs at least 3 vertices"));
        }
        if !points.iter().all(|p| p.is_finite()) {
            return Err(invalid(ShapeKind::Polygon, "vertices must be finite"));
        }
        let polygon = Polygon::new(points);
        if polygon.area() <= 0.0 {
            return Err(invalid(ShapeKind::Polygon, "vertices must enclose a non-zero area"));
        }
        if !polygon.is_convex() {
            return Err(invalid(ShapeKind::Polygon, "vertices must form a convex polygon"));
        }
        Ok(Shape::Polygon(polygon))
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
            Shape::Triangle { .. } => ShapeKind::Triangle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// The local polygon, or `None` for a circle.
    pub fn local_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Circle(_) => None,
            Shape::Rectangle { vertices, .. } | Shape::Triangle { vertices, .. } => Some(vertices),
            Shape::Polygon(polygon) => Some(polygon),
        }
    }

    /// Local-space vertices; empty for a circle.
    pub fn local_vertices(&self) -> &[Vec2] {
        self.local_polygon().map(Polygon::points).unwrap_or(&[])
    }

    pub fn radius(&self) -> Option<f64> {
        match self {
            Shape::Circle(circle) => Some(circle.radius),
            _ => None,
        }
    }

    /// Moment of inertia about the body origin for the given mass.
    pub fn inertia(&self, mass: f64) -> f64 {
        match self {
            Shape::Circle(circle) => circle.inertia(mass),
            Shape::Rectangle { width, height, .. } => mass / 12.0 * (width * width + height * height),
            Shape::Triangle { vertices, .. } | Shape::Polygon(vertices) => vertices.inertia(mass),
        }
    }
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(shape: ShapeKind, reason: &'static str) -> PhysicsError {
    PhysicsError::InvalidShape { shape, reason }
}
