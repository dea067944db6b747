//! Sequential impulse contact solver.

use super::get_mutable_body_pair;
use crate::collision::Manifold;
use crate::config::SolverConfig;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use tracing::trace;

/// Tangent directions shorter than this produce no friction.
const MIN_TANGENT_LENGTH: f64 = 1e-6;

/// Resolves contacts with velocity impulses (normal plus Coulomb friction)
/// followed by a single partial positional correction per manifold.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: SolverConfig,
}

impl Resolver {
    pub fn new(config: SolverConfig) -> Self {
        Resolver { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Runs the configured number of velocity passes over all manifolds, then
    /// corrects positions once per manifold.
    ///
    /// Manifold indices refer to `bodies`; manifolds with stale indices are skipped.
    pub fn resolve(&self, bodies: &mut [RigidBody], manifolds: &[Manifold]) {
        if manifolds.is_empty() {
            return;
        }

        let mut total_impulse = 0.0;
        for _ in 0..self.config.iterations {
            for manifold in manifolds {
                if let Some((a, b)) = get_mutable_body_pair(bodies, manifold.reference, manifold.incident) {
                    total_impulse += self.resolve_velocity(a, b, manifold);
                }
            }
        }

        for manifold in manifolds {
            if let Some((a, b)) = get_mutable_body_pair(bodies, manifold.reference, manifold.incident) {
                self.correct_position(a, b, manifold);
            }
        }

        trace!(
            manifolds = manifolds.len(),
            iterations = self.config.iterations,
            total_impulse,
            "contacts resolved"
        );
    }

    /// One velocity pass over the contacts of a manifold. `a` is the reference
    /// body, `b` the incident one. Returns the sum of normal impulses applied.
    pub fn resolve_velocity(&self, a: &mut RigidBody, b: &mut RigidBody, manifold: &Manifold) -> f64 {
        if a.is_static && b.is_static {
            return 0.0;
        }

        let normal = manifold.normal;
        let restitution = a.material.combined_restitution(&b.material);
        let friction = a.material.combined_friction(&b.material);
        let mut applied = 0.0;

        for &contact in manifold.contacts() {
            let r_a = contact - a.position;
            let r_b = contact - b.position;

            let relative_velocity = relative_velocity_at(a, b, r_a, r_b);
            let velocity_along_normal = relative_velocity.dot(normal);
            if velocity_along_normal > 0.0 {
                continue;
            }

            let Some(normal_mass) = effective_mass(a, b, r_a, r_b, normal) else {
                continue;
            };
            let j = -(1.0 + restitution) * velocity_along_normal / normal_mass;
            apply_impulse(a, b, r_a, r_b, normal * j);
            applied += j;

            // --- Friction --- //
            let relative_velocity = relative_velocity_at(a, b, r_a, r_b);
            let tangent = relative_velocity - normal * relative_velocity.dot(normal);
            if tangent.magnitude() < MIN_TANGENT_LENGTH {
                continue;
            }
            let tangent = tangent.normalize();
            let velocity_along_tangent = relative_velocity.dot(tangent);
            if velocity_along_tangent.abs() < self.config.friction_speed_threshold {
                continue;
            }

            let Some(effective_mass_tangent) = effective_mass(a, b, r_a, r_b, tangent) else {
                continue;
            };
            let max_friction = j.abs() * friction;
            let jt = (-velocity_along_tangent / effective_mass_tangent).clamp(-max_friction, max_friction);
            apply_impulse(a, b, r_a, r_b, tangent * jt);
        }

        applied
    }

    /// Pushes the bodies apart along the normal by a fraction of the
    /// penetration beyond the slop, split by inverse mass.
    pub fn correct_position(&self, a: &mut RigidBody, b: &mut RigidBody, manifold: &Manifold) {
        let inv_mass_sum = a.inv_mass + b.inv_mass;
        if inv_mass_sum == 0.0 {
            return;
        }

        let excess = (manifold.penetration - self.config.slop).max(0.0);
        if excess == 0.0 {
            return;
        }
        let correction = manifold.normal * (excess / inv_mass_sum * self.config.correction_percent);

        if a.inv_mass > 0.0 {
            a.translate(-correction * a.inv_mass);
        }
        if b.inv_mass > 0.0 {
            b.translate(correction * b.inv_mass);
        }
    }
}

/// Velocity of `b` relative to `a` at the contact, including spin.
fn relative_velocity_at(a: &RigidBody, b: &RigidBody, r_a: Vec2, r_b: Vec2) -> Vec2 {
    let v_a = a.velocity + Vec2::cross_scalar(a.angular_velocity, r_a);
    let v_b = b.velocity + Vec2::cross_scalar(b.angular_velocity, r_b);
    v_b - v_a
}

/// Inverse effective mass along `direction`, or `None` when both bodies are immovable.
fn effective_mass(a: &RigidBody, b: &RigidBody, r_a: Vec2, r_b: Vec2, direction: Vec2) -> Option<f64> {
    let ra_cross = r_a.cross(direction);
    let rb_cross = r_b.cross(direction);
    let value = a.inv_mass
        + b.inv_mass
        + a.inv_inertia * ra_cross * ra_cross
        + b.inv_inertia * rb_cross * rb_cross;
    (value > 0.0).then_some(value)
}

/// Applies `-impulse` to `a` and `+impulse` to `b` at their lever arms.
fn apply_impulse(a: &mut RigidBody, b: &mut RigidBody, r_a: Vec2, r_b: Vec2, impulse: Vec2) {
    a.velocity -= impulse * a.inv_mass;
    a.angular_velocity -= r_a.cross(impulse) * a.inv_inertia;
    b.velocity += impulse * b.inv_mass;
    b.angular_velocity += r_b.cross(impulse) * b.inv_inertia;
}
