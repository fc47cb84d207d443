use skipstone_core::Vec3;

/// Gravitational acceleration (m/s^2).
pub const GRAVITY: f64 = 9.8;

/// Weight of a body of the given mass, pointing down the height axis.
pub fn gravity_force(mass: f64, gravity: f64) -> Vec3 {
    Vec3::new(0.0, -mass * gravity, 0.0)
}
