pub mod aabb;
pub mod detection;
pub mod detector;
pub mod manifold;

pub use aabb::AABB;
pub use detector::Detector;
pub use manifold::Manifold;
