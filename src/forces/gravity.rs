use super::{Force, ForceEffect};
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

pub const GRAVITY_NAME: &str = "gravity";
pub const DEFAULT_GRAVITY_STRENGTH: f64 = 100.0;

/// Uniform gravitational field: `direction * strength * mass` on every dynamic body.
///
/// The default direction is +y, which points down in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Gravity {
    strength: f64,
    direction: Vec2,
    enabled: bool,
}

impl Gravity {
    /// Creates an enabled gravity force. `direction` is normalized.
    pub fn new(strength: f64, direction: Vec2) -> Self {
        Gravity {
            strength,
            direction: direction.normalize(),
            enabled: true,
        }
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn set_strength(&mut self, strength: f64) {
        self.strength = strength;
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Sets the field direction. A zero vector switches the field off in effect.
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.normalize();
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Gravity::new(DEFAULT_GRAVITY_STRENGTH, Vec2::new(0.0, 1.0))
    }
}

impl Force for Gravity {
    fn name(&self) -> &str {
        GRAVITY_NAME
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn apply(&self, body: &RigidBody, _dt: f64) -> Option<ForceEffect> {
        if !self.should_apply_to(body) {
            return None;
        }
        Some(ForceEffect::Force(self.direction * (self.strength * body.mass())))
    }
}
