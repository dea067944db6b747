use super::ShapeKind;
use crate::error::{PhysicsError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    /// Creates a circle. The radius must be positive and finite.
    pub fn new(radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::InvalidShape {
                shape: ShapeKind::Circle,
                reason: "radius must be a positive finite number",
            });
        }
        Ok(Self { radius })
    }

    /// Moment of inertia about the center: `mass / 2 * r^2`.
    pub fn inertia(&self, mass: f64) -> f64 {
        mass / 2.0 * self.radius * self.radius
    }
}
