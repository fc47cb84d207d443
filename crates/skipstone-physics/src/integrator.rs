use skipstone_core::Vec3;

use crate::stone::Stone;

/// Advance `stone` by one semi-implicit Euler step under `net_force`.
///
/// Momentum is updated first and the new velocity moves the position. `dt`
/// is expected to be small (<= ~0.02 s); clamping is the caller's job.
pub fn advance(stone: &mut Stone, net_force: Vec3, dt: f64) {
    let momentum = stone.velocity * stone.mass + net_force * dt;
    stone.velocity = momentum / stone.mass;
    stone.position += stone.velocity * dt;
}
