//! Force generators applied to bodies before every integration step.

pub mod gravity;

pub use gravity::Gravity;

use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use std::fmt;

/// What a force generator produces for one body during one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceEffect {
    /// Force through the center of mass.
    Force(Vec2),
    /// Force applied at a world-space point, producing torque as well.
    ForceAtPoint { force: Vec2, point: Vec2 },
    Torque(f64),
}

impl ForceEffect {
    /// Accumulates the effect into the body's pending force and torque.
    pub fn apply_to(self, body: &mut RigidBody) {
        match self {
            ForceEffect::Force(force) => body.apply_force(force),
            ForceEffect::ForceAtPoint { force, point } => body.apply_force_at_point(force, point),
            ForceEffect::Torque(torque) => body.apply_torque(torque),
        }
    }
}

/// A named force generator that can be switched on and off.
///
/// The world calls [`Force::update`] once per step on every enabled force, then
/// [`Force::apply`] for each non-static body the force applies to.
pub trait Force: fmt::Debug {
    /// Registry key. Registering another force under the same name replaces this one.
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    fn enable(&mut self) {
        self.set_enabled(true);
    }

    fn disable(&mut self) {
        self.set_enabled(false);
    }

    /// Static bodies never receive forces.
    fn should_apply_to(&self, body: &RigidBody) -> bool {
        !body.is_static()
    }

    /// Advances internal time-based state.
    fn update(&mut self, _dt: f64) {}

    /// Effect on `body` for a step of `dt`, or `None` when nothing applies.
    fn apply(&self, body: &RigidBody, dt: f64) -> Option<ForceEffect>;
}
