pub mod vec2;

pub use vec2::Vec2;

use std::f64::consts::TAU;

/// Wraps an angle in radians into `[0, 2*PI)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
