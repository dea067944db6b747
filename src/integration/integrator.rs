use crate::math::normalize_angle;
use crate::objects::rigid_body::RigidBody;

/// Advances a body by `dt` using semi-implicit Euler.
///
/// Angular state is integrated first, then linear state, each velocity before
/// its position. World geometry is rebuilt and the pending force and torque are
/// cleared afterwards. Static bodies are left untouched.
pub fn integrate(body: &mut RigidBody, dt: f64) {
    if body.is_static {
        return;
    }

    // --- Angular Motion --- //
    body.angular_velocity += body.torque * body.inv_inertia * dt;
    body.angle = normalize_angle(body.angle + body.angular_velocity * dt);

    // --- Linear Motion --- //
    let acceleration = body.force * body.inv_mass;
    body.velocity += acceleration * dt;
    body.position += body.velocity * dt;

    body.update_geometry();
    body.clear_accumulators();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::shapes::Shape;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    fn circle_body(mass: f64) -> RigidBody {
        RigidBody::new(Shape::circle(1.0).unwrap(), Vec2::ZERO, mass).unwrap()
    }

    #[test]
    fn test_integrate_linear_motion_no_force() {
        let mut rb = circle_body(1.0);
        rb.set_velocity(Vec2::new(10.0, -5.0));

        integrate(&mut rb, 0.1);

        assert!((rb.position().x - 1.0).abs() < EPSILON);
        assert!((rb.position().y - -0.5).abs() < EPSILON);
        assert_eq!(rb.velocity(), Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_integrate_linear_motion_constant_force() {
        let mut rb = circle_body(2.0);
        rb.apply_force(Vec2::new(10.0, 0.0));

        integrate(&mut rb, 0.1);

        // v = a*dt = (5, 0) * 0.1, then p = v*dt
        assert!((rb.velocity().x - 0.5).abs() < EPSILON);
        assert!((rb.position().x - 0.05).abs() < EPSILON);
        assert_eq!(rb.force(), Vec2::ZERO);
    }

    #[test]
    fn test_integrate_angular_motion_constant_torque() {
        let mut rb = circle_body(1.0);
        let expected_alpha = 5.0 / rb.inertia();
        rb.apply_torque(5.0);

        integrate(&mut rb, 0.1);

        assert!((rb.angular_velocity() - expected_alpha * 0.1).abs() < EPSILON);
        assert!((rb.angle() - expected_alpha * 0.01).abs() < EPSILON);
        assert_eq!(rb.torque(), 0.0);
    }

    #[test]
    fn test_integrate_wraps_angle() {
        let mut rb = circle_body(1.0);
        rb.set_angular_velocity(-PI);
        integrate(&mut rb, 0.5);
        assert!((rb.angle() - 1.5 * PI).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_moves_world_geometry() {
        let mut rb = RigidBody::new(Shape::rectangle(2.0, 2.0).unwrap(), Vec2::ZERO, 1.0).unwrap();
        rb.set_velocity(Vec2::new(10.0, 0.0));
        integrate(&mut rb, 1.0);
        let bounds = rb.bounds().unwrap();
        assert!((bounds.min.x - 9.0).abs() < EPSILON);
        assert!((bounds.max.x - 11.0).abs() < EPSILON);
        assert_eq!(rb.world_vertices().at(0), Vec2::new(9.0, -1.0));
    }

    #[test]
    fn test_integrate_static_object() {
        let mut rb = RigidBody::new_static(Shape::circle(1.0).unwrap(), Vec2::new(1.0, 1.0));
        rb.set_angle(1.0);
        let initial_state = rb.clone();

        integrate(&mut rb, 0.1);

        assert_eq!(rb, initial_state);
    }
}
