use super::detection::{circle_vs_circle, circle_vs_polygon, polygon_vs_polygon};
use super::manifold::Manifold;
use crate::objects::rigid_body::RigidBody;
use crate::shapes::ShapeKind;
use tracing::trace;

/// Brute-force broad phase plus shape-pair dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detector;

impl Detector {
    pub fn new() -> Self {
        Detector
    }

    /// Returns the valid manifolds for every unordered pair `i < j`.
    ///
    /// Pairs of two static bodies and pairs missing bounds are skipped, and
    /// pairs whose bounds do not overlap never reach the narrow phase.
    pub fn detect(&self, bodies: &[RigidBody]) -> Vec<Manifold> {
        let mut manifolds = Vec::new();
        let mut narrow_tests = 0usize;

        for (i, body_a) in bodies.iter().enumerate() {
            for (j, body_b) in bodies.iter().enumerate().skip(i + 1) {
                if body_a.is_static && body_b.is_static {
                    continue;
                }
                let (Some(bounds_a), Some(bounds_b)) = (&body_a.bounds, &body_b.bounds) else {
                    continue;
                };
                if !bounds_a.overlaps(bounds_b) {
                    continue;
                }

                narrow_tests += 1;
                let manifold = Self::narrow_phase(body_a, i, body_b, j);
                if manifold.is_valid() {
                    manifolds.push(manifold);
                }
            }
        }

        trace!(bodies = bodies.len(), narrow_tests, contacts = manifolds.len(), "detection pass");
        manifolds
    }

    /// Dispatches on the shape kinds of the pair. The first body is the
    /// reference for mixed circle and polygon pairs.
    pub fn narrow_phase(a: &RigidBody, a_idx: usize, b: &RigidBody, b_idx: usize) -> Manifold {
        match (a.kind() == ShapeKind::Circle, b.kind() == ShapeKind::Circle) {
            (true, true) => circle_vs_circle(a, a_idx, b, b_idx),
            (true, false) => circle_vs_polygon(a, a_idx, b, b_idx, true),
            (false, true) => circle_vs_polygon(b, b_idx, a, a_idx, false),
            (false, false) => polygon_vs_polygon(a, a_idx, b, b_idx),
        }
    }
}
