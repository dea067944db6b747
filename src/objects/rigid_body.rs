use crate::collision::AABB;
use crate::common::Material;
use crate::error::{PhysicsError, Result};
use crate::integration::integrator;
use crate::math::{normalize_angle, vec2::Vec2};
use crate::shapes::{Polygon, Shape, ShapeKind};

/// A rigid body: transform, motion, mass properties, material and shape.
///
/// World-space vertices and bounds are recomputed by every mutator before it
/// returns, so they always match the current position and angle. The angle is
/// kept in `[0, 2*PI)`.
///
/// Static bodies have infinite mass and inertia, zero inverse mass and inertia,
/// and zero velocity at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    // Geometry
    pub(crate) shape: Shape,
    pub(crate) material: Material,

    // Transform and motion
    pub(crate) position: Vec2,
    pub(crate) angle: f64,
    pub(crate) velocity: Vec2,
    pub(crate) angular_velocity: f64,

    // Pending force and torque, drained by every integration step
    pub(crate) force: Vec2,
    pub(crate) torque: f64,

    // Mass properties
    pub(crate) mass: f64,
    pub(crate) inv_mass: f64,
    pub(crate) inertia: f64,
    pub(crate) inv_inertia: f64,
    pub(crate) is_static: bool,

    // Cached world geometry
    pub(crate) world_vertices: Polygon,
    pub(crate) bounds: Option<AABB>,
}

impl RigidBody {
    /// Creates a dynamic body at `position` with the given mass.
    ///
    /// Inertia is derived from the shape. Fails with `InvalidMass` unless the
    /// mass is a positive finite number.
    pub fn new(shape: Shape, position: Vec2, mass: f64) -> Result<Self> {
        validate_mass(mass)?;
        let inertia = shape.inertia(mass);
        let mut body = RigidBody {
            shape,
            material: Material::default(),
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass,
            inv_mass: 1.0 / mass,
            inertia,
            inv_inertia: inverse_inertia(inertia),
            is_static: false,
            world_vertices: Polygon::default(),
            bounds: None,
        };
        body.update_geometry();
        Ok(body)
    }

    /// Creates a static body at `position`.
    pub fn new_static(shape: Shape, position: Vec2) -> Self {
        let mut body = RigidBody {
            shape,
            material: Material::default(),
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass: f64::INFINITY,
            inv_mass: 0.0,
            inertia: f64::INFINITY,
            inv_inertia: 0.0,
            is_static: true,
            world_vertices: Polygon::default(),
            bounds: None,
        };
        body.update_geometry();
        body
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    // --- Read access --- //

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Radius of a circle body, `None` for polygonal shapes.
    pub fn radius(&self) -> Option<f64> {
        self.shape.radius()
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Orientation in radians, within `[0, 2*PI)`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Force accumulated since the last integration step.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Torque accumulated since the last integration step.
    pub fn torque(&self) -> f64 {
        self.torque
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// World-space vertices. Empty for circles.
    pub fn world_vertices(&self) -> &Polygon {
        &self.world_vertices
    }

    pub fn bounds(&self) -> Option<&AABB> {
        self.bounds.as_ref()
    }

    // --- Forces --- //

    /// Accumulates a force through the center of mass. Ignored by static bodies.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.is_static {
            return;
        }
        self.force += force;
    }

    /// Accumulates a force applied at a world-space point, which also produces torque.
    pub fn apply_force_at_point(&mut self, force: Vec2, point: Vec2) {
        if self.is_static {
            return;
        }
        self.force += force;
        self.torque += (point - self.position).cross(force);
    }

    pub fn apply_torque(&mut self, torque: f64) {
        if self.is_static {
            return;
        }
        self.torque += torque;
    }

    pub(crate) fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    // --- Transform --- //

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_geometry();
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = normalize_angle(angle);
        self.update_geometry();
    }

    pub fn set_transform(&mut self, position: Vec2, angle: f64) {
        self.position = position;
        self.angle = normalize_angle(angle);
        self.update_geometry();
    }

    /// Rotates by `delta` radians about the body position.
    pub fn rotate(&mut self, delta: f64) {
        self.set_angle(self.angle + delta);
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.set_position(self.position + offset);
    }

    // --- Motion --- //

    /// Sets the linear velocity. Ignored by static bodies.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        if !self.is_static {
            self.velocity = velocity;
        }
    }

    /// Sets the angular velocity. Ignored by static bodies.
    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        if !self.is_static {
            self.angular_velocity = angular_velocity;
        }
    }

    // --- Mass --- //

    /// Turns the body static: infinite mass and inertia, no motion.
    pub fn make_static(&mut self) {
        self.is_static = true;
        self.mass = f64::INFINITY;
        self.inv_mass = 0.0;
        self.inertia = f64::INFINITY;
        self.inv_inertia = 0.0;
        self.velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
        self.clear_accumulators();
    }

    /// Turns the body dynamic with the given mass.
    ///
    /// On `InvalidMass` the body is left exactly as it was.
    pub fn make_dynamic(&mut self, mass: f64) -> Result<()> {
        validate_mass(mass)?;
        self.is_static = false;
        self.assign_mass(mass);
        Ok(())
    }

    /// Changes the mass of a dynamic body and rescales its inertia.
    ///
    /// Static bodies ignore the call and return `Ok(())`.
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        if self.is_static {
            return Ok(());
        }
        validate_mass(mass)?;
        self.assign_mass(mass);
        Ok(())
    }

    fn assign_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.inv_mass = 1.0 / mass;
        self.inertia = self.shape.inertia(mass);
        self.inv_inertia = inverse_inertia(self.inertia);
    }

    // --- Simulation --- //

    /// Advances the body by `dt` with semi-implicit Euler and drains the
    /// pending force and torque. Static bodies are untouched.
    pub fn update(&mut self, dt: f64) {
        integrator::integrate(self, dt);
    }

    /// Rebuilds world vertices and bounds from the local shape and the current transform.
    pub(crate) fn update_geometry(&mut self) {
        match self.shape.local_polygon() {
            Some(local) => {
                self.world_vertices.clone_from(local);
                self.world_vertices.rotate_in_place(self.angle);
                self.world_vertices.translate_in_place(self.position);
                self.bounds = AABB::from_points(self.world_vertices.points());
            }
            None => {
                let radius = self.shape.radius().unwrap_or(0.0);
                self.world_vertices = Polygon::default();
                self.bounds = Some(AABB::from_circle(self.position, radius));
            }
        }
    }
}

fn validate_mass(mass: f64) -> Result<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}

fn inverse_inertia(inertia: f64) -> f64 {
    if inertia == 0.0 {
        0.0
    } else {
        1.0 / inertia
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    fn circle_body(radius: f64, mass: f64) -> RigidBody {
        RigidBody::new(Shape::circle(radius).unwrap(), Vec2::ZERO, mass).unwrap()
    }

    fn box_body(width: f64, height: f64, mass: f64) -> RigidBody {
        RigidBody::new(Shape::rectangle(width, height).unwrap(), Vec2::ZERO, mass).unwrap()
    }

    #[test]
    fn test_rigidbody_new_circle() {
        let rb = circle_body(10.0, 4.0);
        assert_eq!(rb.mass(), 4.0);
        assert!((rb.inv_mass() - 0.25).abs() < EPSILON);
        assert!((rb.inertia() - 200.0).abs() < EPSILON);
        assert!((rb.inv_inertia() - 1.0 / 200.0).abs() < EPSILON);
        assert_eq!(rb.kind(), ShapeKind::Circle);
        assert!(rb.world_vertices().is_empty());
        assert_eq!(rb.velocity(), Vec2::ZERO);
        assert_eq!(rb.force(), Vec2::ZERO);
    }

    #[test]
    fn test_rigidbody_new_rectangle() {
        let rb = box_body(4.0, 6.0, 12.0);
        assert!((rb.inertia() - 52.0).abs() < EPSILON);
        assert_eq!(rb.world_vertices().len(), 4);
    }

    #[test]
    fn test_rigidbody_new_rejects_bad_mass() {
        let shape = Shape::circle(1.0).unwrap();
        assert_eq!(
            RigidBody::new(shape.clone(), Vec2::ZERO, 0.0).unwrap_err(),
            PhysicsError::InvalidMass(0.0)
        );
        assert!(RigidBody::new(shape.clone(), Vec2::ZERO, -3.0).is_err());
        assert!(RigidBody::new(shape, Vec2::ZERO, f64::INFINITY).is_err());
    }

    #[test]
    fn test_rigidbody_new_static() {
        let rb = RigidBody::new_static(Shape::rectangle(10.0, 2.0).unwrap(), Vec2::new(1.0, 2.0));
        assert!(rb.is_static());
        assert!(rb.mass().is_infinite());
        assert_eq!(rb.inv_mass(), 0.0);
        assert!(rb.inertia().is_infinite());
        assert_eq!(rb.inv_inertia(), 0.0);
        assert_eq!(rb.position(), Vec2::new(1.0, 2.0));
        let bounds = rb.bounds().unwrap();
        assert_eq!(bounds.min, Vec2::new(-4.0, 1.0));
        assert_eq!(bounds.max, Vec2::new(6.0, 3.0));
    }

    #[test]
    fn test_apply_force() {
        let mut rb = circle_body(1.0, 1.0);
        rb.apply_force(Vec2::new(10.0, 0.0));
        rb.apply_force(Vec2::new(0.0, 5.0));
        assert_eq!(rb.force(), Vec2::new(10.0, 5.0));
        assert_eq!(rb.torque(), 0.0);
    }

    #[test]
    fn test_apply_force_at_point_offset_body() {
        let mut rb = circle_body(1.0, 1.0);
        rb.set_position(Vec2::new(5.0, 5.0));
        rb.apply_force_at_point(Vec2::new(0.0, 10.0), Vec2::new(10.0, 5.0));
        assert_eq!(rb.force(), Vec2::new(0.0, 10.0));
        // r = (5, 0), r x F = 5 * 10
        assert!((rb.torque() - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_static_body_ignores_forces_and_velocity() {
        let mut rb = RigidBody::new_static(Shape::circle(1.0).unwrap(), Vec2::ZERO);
        rb.apply_force(Vec2::new(1.0, 1.0));
        rb.apply_force_at_point(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        rb.apply_torque(3.0);
        rb.set_velocity(Vec2::new(5.0, 0.0));
        rb.set_angular_velocity(2.0);
        assert_eq!(rb.force(), Vec2::ZERO);
        assert_eq!(rb.torque(), 0.0);
        assert_eq!(rb.velocity(), Vec2::ZERO);
        assert_eq!(rb.angular_velocity(), 0.0);
    }

    #[test]
    fn test_transform_mutators_refresh_geometry() {
        let mut rb = box_body(2.0, 2.0, 1.0);
        rb.set_position(Vec2::new(10.0, 0.0));
        assert_eq!(rb.bounds().unwrap().center(), Vec2::new(10.0, 0.0));

        rb.translate(Vec2::new(0.0, 5.0));
        assert_eq!(rb.position(), Vec2::new(10.0, 5.0));
        assert_eq!(rb.world_vertices().at(0), Vec2::new(9.0, 4.0));

        rb.set_angle(PI / 4.0);
        let half_diagonal = 2.0_f64.sqrt();
        let bounds = rb.bounds().unwrap();
        assert!((bounds.width() - 2.0 * half_diagonal).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_keeps_position_and_normalizes_angle() {
        let mut rb = box_body(2.0, 2.0, 1.0);
        rb.set_position(Vec2::new(3.0, 4.0));
        rb.rotate(-PI / 2.0);
        assert_eq!(rb.position(), Vec2::new(3.0, 4.0));
        assert!((rb.angle() - 1.5 * PI).abs() < EPSILON);

        rb.set_transform(Vec2::new(1.0, 1.0), 5.0 * PI);
        assert!((rb.angle() - PI).abs() < 1e-9);
        assert_eq!(rb.position(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_make_static_and_dynamic() {
        let mut rb = circle_body(5.0, 2.0);
        rb.set_velocity(Vec2::new(3.0, 3.0));
        rb.set_angular_velocity(1.0);
        rb.make_static();
        assert!(rb.is_static());
        assert_eq!(rb.inv_mass(), 0.0);
        assert_eq!(rb.velocity(), Vec2::ZERO);
        assert_eq!(rb.angular_velocity(), 0.0);

        rb.make_dynamic(8.0).unwrap();
        assert!(!rb.is_static());
        assert!((rb.inv_mass() - 0.125).abs() < EPSILON);
        assert!((rb.inertia() - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_make_dynamic_invalid_mass_leaves_body_unchanged() {
        let mut rb = RigidBody::new_static(Shape::circle(5.0).unwrap(), Vec2::ZERO);
        let before = rb.clone();
        assert!(rb.make_dynamic(f64::NAN).is_err());
        assert_eq!(rb.make_dynamic(-1.0), Err(PhysicsError::InvalidMass(-1.0)));
        assert!(rb.is_static());
        assert!(rb.mass().is_infinite());
        assert_eq!(rb.inv_mass(), before.inv_mass());
    }

    #[test]
    fn test_set_mass() {
        let mut rb = circle_body(5.0, 1.0);
        rb.set_mass(8.0).unwrap();
        assert_eq!(rb.mass(), 8.0);
        assert!((rb.inertia() - 100.0).abs() < EPSILON);
        assert!((rb.inv_inertia() - 0.01).abs() < EPSILON);

        assert!(rb.set_mass(0.0).is_err());
        assert_eq!(rb.mass(), 8.0);
    }

    #[test]
    fn test_set_mass_on_static_is_ignored() {
        let mut rb = RigidBody::new_static(Shape::circle(5.0).unwrap(), Vec2::ZERO);
        assert_eq!(rb.set_mass(10.0), Ok(()));
        assert!(rb.mass().is_infinite());
        assert_eq!(rb.inv_mass(), 0.0);
    }
}
