use crate::objects::rigid_body::RigidBody;

pub mod resolver;

pub use resolver::Resolver;

/// Mutable references to two distinct bodies of a slice, in argument order.
///
/// Returns `None` if the indices are equal or out of bounds.
pub(crate) fn get_mutable_body_pair(
    bodies: &mut [RigidBody],
    idx_a: usize,
    idx_b: usize,
) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if idx_a == idx_b || idx_a >= bodies.len() || idx_b >= bodies.len() {
        return None;
    }

    if idx_a < idx_b {
        let (head, tail) = bodies.split_at_mut(idx_b);
        Some((&mut head[idx_a], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(idx_a);
        Some((&mut tail[0], &mut head[idx_b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::shapes::Shape;

    fn bodies() -> Vec<RigidBody> {
        (0..3)
            .map(|i| RigidBody::new(Shape::circle(1.0).unwrap(), Vec2::new(i as f64, 0.0), 1.0).unwrap())
            .collect()
    }

    #[test]
    fn test_pair_in_argument_order() {
        let mut bodies = bodies();
        let (a, b) = get_mutable_body_pair(&mut bodies, 2, 0).unwrap();
        assert_eq!(a.position(), Vec2::new(2.0, 0.0));
        assert_eq!(b.position(), Vec2::new(0.0, 0.0));

        let (a, b) = get_mutable_body_pair(&mut bodies, 0, 1).unwrap();
        assert_eq!(a.position(), Vec2::new(0.0, 0.0));
        assert_eq!(b.position(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_pair_rejects_same_or_missing_index() {
        let mut bodies = bodies();
        assert!(get_mutable_body_pair(&mut bodies, 1, 1).is_none());
        assert!(get_mutable_body_pair(&mut bodies, 0, 3).is_none());
    }
}
