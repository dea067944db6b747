//! Convenience constructors that turn geometry plus an option bag into bodies.

use super::Shape;
use crate::common::Material;
use crate::error::Result;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Segment count used when a circle is approximated by a polygon and none is given.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 24;

/// Physical options recognized when building a body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BodyOptions {
    pub is_static: bool,
    /// Ignored for static bodies.
    pub mass: f64,
    pub restitution: f64,
    pub friction: f64,
    pub velocity: Vec2,
    pub angle: f64,
    pub angular_velocity: f64,
}

impl BodyOptions {
    /// Default options with `is_static` set.
    pub fn fixed() -> Self {
        BodyOptions {
            is_static: true,
            ..BodyOptions::default()
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }
}

impl Default for BodyOptions {
    fn default() -> Self {
        let material = Material::default();
        BodyOptions {
            is_static: false,
            mass: 1.0,
            restitution: material.restitution,
            friction: material.friction,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
        }
    }
}

/// Body constructors by shape kind. Every local polygon is counter-clockwise
/// and centered on the body position.
pub struct Shapes;

impl Shapes {
    pub fn rect(x: f64, y: f64, width: f64, height: f64, options: BodyOptions) -> Result<RigidBody> {
        Self::body(Shape::rectangle(width, height)?, Vec2::new(x, y), options)
    }

    /// A true circle, colliding by radius.
    pub fn circle(x: f64, y: f64, radius: f64, options: BodyOptions) -> Result<RigidBody> {
        Self::body(Shape::circle(radius)?, Vec2::new(x, y), options)
    }

    /// A circle approximated by a regular polygon of `segments` sides (at least 3).
    pub fn regular_polygon(
        x: f64,
        y: f64,
        radius: f64,
        segments: usize,
        options: BodyOptions,
    ) -> Result<RigidBody> {
        Self::body(Shape::regular_polygon(radius, segments)?, Vec2::new(x, y), options)
    }

    pub fn triangle(x: f64, y: f64, size: f64, options: BodyOptions) -> Result<RigidBody> {
        Self::body(Shape::triangle(size)?, Vec2::new(x, y), options)
    }

    /// A custom convex polygon. Vertices are local to `(x, y)`.
    pub fn polygon(x: f64, y: f64, vertices: Vec<Vec2>, options: BodyOptions) -> Result<RigidBody> {
        Self::body(Shape::polygon(vertices)?, Vec2::new(x, y), options)
    }

    /// Builds a body from any shape and an option bag.
    pub fn body(shape: Shape, position: Vec2, options: BodyOptions) -> Result<RigidBody> {
        let material = Material::new(options.restitution, options.friction);
        let mut body = if options.is_static {
            RigidBody::new_static(shape, position)
        } else {
            RigidBody::new(shape, position, options.mass)?
        };
        body.set_material(material);
        body.set_angle(options.angle);
        body.set_velocity(options.velocity);
        body.set_angular_velocity(options.angular_velocity);
        Ok(body)
    }
}
