//! 2D rigid-body physics: semi-implicit Euler integration, brute-force AABB
//! broad phase, SAT and circle narrow phase with clipped contact points, and a
//! sequential impulse solver with friction and positional correction.
//!
//! Coordinates follow screen conventions: +y points down, so the default
//! [`Gravity`] pulls along +y.

pub mod collision;
pub mod common;
pub mod config;
pub mod constraints;
pub mod error;
pub mod forces;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{Detector, Manifold, AABB};
pub use common::Material;
pub use config::{SolverConfig, WorldConfig};
pub use constraints::Resolver;
pub use error::{PhysicsError, Result};
pub use forces::{Force, ForceEffect, Gravity};
pub use math::vec2::Vec2;
pub use objects::rigid_body::RigidBody;
pub use shapes::{BodyOptions, Circle, Polygon, Shape, ShapeKind, Shapes};
pub use world::{BodyHandle, PhysicsWorld};
