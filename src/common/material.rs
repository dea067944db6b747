//! Surface properties used when two bodies touch.

/// Restitution and friction of a body's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Material {
    /// Coefficient of restitution in [0, 1]. 0 absorbs the impact, 1 bounces fully.
    pub restitution: f64,
    /// Coulomb friction coefficient, never negative.
    pub friction: f64,
}

impl Material {
    /// Creates a material, clamping restitution into [0, 1] and friction to >= 0.
    /// NaN restitution becomes 0.
    pub fn new(restitution: f64, friction: f64) -> Self {
        let restitution = if restitution.is_nan() { 0.0 } else { restitution.clamp(0.0, 1.0) };
        Material {
            restitution,
            friction: friction.max(0.0),
        }
    }

    /// Restitution used for a contact between two materials: the smaller one.
    pub fn combined_restitution(&self, other: &Material) -> f64 {
        self.restitution.min(other.restitution)
    }

    /// Friction used for a contact between two materials: the geometric mean.
    pub fn combined_friction(&self, other: &Material) -> f64 {
        (self.friction * other.friction).sqrt()
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            restitution: 0.2,
            friction: 0.5,
        }
    }
}
