use crate::{
    collision::{Detector, Manifold},
    config::WorldConfig,
    constraints::Resolver,
    error::{PhysicsError, Result},
    forces::Force,
    objects::rigid_body::RigidBody,
};
use std::fmt;
use tracing::{debug, instrument, trace, warn};

/// Stable identifier of a body in a [`PhysicsWorld`].
///
/// Handles are never reused, so a handle stays valid (or becomes `None` on
/// lookup) across removals of other bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(u64);

impl BodyHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns the bodies and forces and runs the step pipeline:
/// forces, integration, detection, resolution.
#[derive(Debug)]
pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    handles: Vec<BodyHandle>,
    next_handle: u64,
    forces: Vec<Box<dyn Force>>,
    detector: Detector,
    resolver: Resolver,
    config: WorldConfig,
    // Manifolds from the last step, kept for inspection
    manifolds: Vec<Manifold>,
}

impl PhysicsWorld {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            bodies: Vec::new(),
            handles: Vec::new(),
            next_handle: 0,
            forces: Vec::new(),
            detector: Detector::new(),
            resolver: Resolver::new(config.solver),
            config,
            manifolds: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: WorldConfig) {
        self.resolver.set_config(config.solver);
        self.config = config;
    }

    pub fn set_collisions_enabled(&mut self, enabled: bool) {
        self.config.collisions_enabled = enabled;
    }

    // --- Bodies --- //

    /// Adds a body and returns its handle.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        debug!(%handle, kind = %body.kind(), is_static = body.is_static(), "body added");
        self.bodies.push(body);
        self.handles.push(handle);
        handle
    }

    /// Removes a body, keeping the order of the others.
    ///
    /// Stored manifolds are cleared since their indices no longer line up.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        let index = self.index_of(handle).ok_or(PhysicsError::BodyNotFound(handle))?;
        self.handles.remove(index);
        self.manifolds.clear();
        debug!(%handle, "body removed");
        Ok(self.bodies.remove(index))
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.index_of(handle).map(|index| &self.bodies[index])
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let index = self.index_of(handle)?;
        Some(&mut self.bodies[index])
    }

    /// Bodies in insertion order. Manifold indices refer to this slice.
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Handles in the same order as [`PhysicsWorld::bodies`].
    pub fn handles(&self) -> &[BodyHandle] {
        &self.handles
    }

    pub fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        self.handles.iter().position(|&h| h == handle)
    }

    pub fn handle_at(&self, index: usize) -> Option<BodyHandle> {
        self.handles.get(index).copied()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // --- Forces --- //

    /// Registers a force. A force with the same name is replaced in place.
    pub fn add_force(&mut self, force: Box<dyn Force>) {
        match self.forces.iter().position(|f| f.name() == force.name()) {
            Some(index) => {
                debug!(name = force.name(), "force replaced");
                self.forces[index] = force;
            }
            None => {
                debug!(name = force.name(), "force added");
                self.forces.push(force);
            }
        }
    }

    pub fn remove_force(&mut self, name: &str) -> Option<Box<dyn Force>> {
        let index = self.forces.iter().position(|f| f.name() == name)?;
        debug!(name, "force removed");
        Some(self.forces.remove(index))
    }

    pub fn force(&self, name: &str) -> Option<&dyn Force> {
        self.forces.iter().find(|f| f.name() == name).map(|f| f.as_ref())
    }

    pub fn force_mut(&mut self, name: &str) -> Option<&mut (dyn Force + 'static)> {
        self.forces.iter_mut().find(|f| f.name() == name).map(|f| f.as_mut())
    }

    /// Names of the registered forces in registration order.
    pub fn force_names(&self) -> impl Iterator<Item = &str> {
        self.forces.iter().map(|f| f.name())
    }

    // --- Simulation --- //

    /// Manifolds produced by the last step.
    pub fn manifolds(&self) -> &[Manifold] {
        &self.manifolds
    }

    /// Advances the simulation by `dt`, split into the configured number of sub-steps.
    ///
    /// Non-positive or non-finite `dt` is ignored.
    #[instrument(level = "trace", skip(self))]
    pub fn update(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "ignoring update with invalid time step");
            return;
        }

        let sub_steps = self.config.effective_sub_steps();
        let sub_dt = dt / sub_steps as f64;
        for _ in 0..sub_steps {
            self.step(sub_dt);
        }
    }

    fn step(&mut self, dt: f64) {
        for force in self.forces.iter_mut().filter(|f| f.is_enabled()) {
            force.update(dt);
        }

        for body in self.bodies.iter_mut().filter(|b| !b.is_static()) {
            for force in self.forces.iter().filter(|f| f.is_enabled()) {
                if !force.should_apply_to(body) {
                    continue;
                }
                if let Some(effect) = force.apply(body, dt) {
                    effect.apply_to(body);
                }
            }
        }

        for body in self.bodies.iter_mut() {
            body.update(dt);
        }

        let manifolds = self.detector.detect(&self.bodies);
        if self.config.collisions_enabled {
            self.resolver.resolve(&mut self.bodies, &manifolds);
        } else {
            trace!(skipped = manifolds.len(), "collision resolution disabled");
        }
        self.manifolds = manifolds;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        PhysicsWorld::new(WorldConfig::default())
    }
}
