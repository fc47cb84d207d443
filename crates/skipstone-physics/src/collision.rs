//! Impact resolution at the water surface.
//!
//! Two independent tests decide whether a skip continues:
//!
//! - **Linear**: the stone planes along a contact path of length `l` and
//!   loses `u * m * g * l` of its horizontal kinetic energy, where `u` is the
//!   drag-to-lift ratio of the wetted face. No energy left means it sinks.
//! - **Circular**: spin keeps the tilt stable for at most
//!   `4 * pi^2 * r * spin^2 / g` bounces; past that the stone tumbles.
//!
//! Both tests always run since each may clear `skip_continues`.

use std::f64::consts::PI;

use skipstone_core::Medium;

use crate::config::PhysicsConfig;
use crate::stone::Stone;

/// Horizontal speed left on a stone whose energy ran out. Kept above zero so
/// the next drag evaluation still has a direction to work with.
pub const EXHAUSTED_SPEED: f64 = 1e-10;

/// Energy-loss test. Flips the vertical velocity (rebound), accumulates the
/// contact path into `distance_traveled` and rescales horizontal speed.
/// Returns whether the stone may keep skipping.
pub fn linear_collision(stone: &mut Stone, medium: Medium, config: &PhysicsConfig) -> bool {
    let fluid = config.fluids.get(medium);
    let water = config.fluids.water;
    let lift = water.density / fluid.density;
    let friction = fluid.viscosity / water.viscosity;

    let (sin_theta, cos_theta) = stone.theta.sin_cos();
    let cy = lift * cos_theta - friction * sin_theta;
    let cx = lift * sin_theta + friction * cos_theta;

    if cy <= 0.0 {
        tracing::debug!(theta = stone.theta, cy, "No lift at this tilt, stone sinks");
        stone.skip_continues = false;
        stone.velocity.y = -stone.velocity.y;
        return stone.skip_continues;
    }
    let u = cx / cy;

    // A face tilted below the horizontal has no contact path to plane along.
    let path_term =
        (2.0 * stone.mass * sin_theta / (2.0 * cy * fluid.density * stone.radius)).max(0.0);
    let contact_length = 2.0 * PI * path_term.sqrt();
    stone.distance_traveled += contact_length;

    let energy_loss = -u * stone.mass * config.gravity * contact_length;
    let initial_energy = stone.mass * stone.velocity.x * stone.velocity.x / 2.0;
    let final_energy = initial_energy + energy_loss;

    stone.velocity.y = -stone.velocity.y;

    if final_energy <= 0.0 {
        tracing::debug!(
            initial_energy,
            energy_loss,
            "Horizontal energy exhausted, stone sinks"
        );
        stone.skip_continues = false;
        stone.velocity.x = EXHAUSTED_SPEED;
    } else {
        stone.velocity.x = (2.0 * final_energy / stone.mass).sqrt();
    }

    stone.skip_continues
}

/// Number of bounces the stone's spin can keep its tilt stable for.
pub fn max_stable_bounces(stone: &Stone, gravity: f64) -> f64 {
    4.0 * PI * PI * stone.radius * stone.spin * stone.spin / gravity
}

/// Gyroscopic-stability test. Returns whether the stone may keep skipping.
pub fn circular_collision(stone: &mut Stone, config: &PhysicsConfig) -> bool {
    let n_max = max_stable_bounces(stone, config.gravity);
    if f64::from(stone.bounce_count + 1) >= n_max {
        if stone.skip_continues {
            tracing::debug!(
                bounces = stone.bounce_count,
                n_max,
                "Spin too low to hold the tilt, stone tumbles"
            );
        }
        stone.skip_continues = false;
    }
    stone.skip_continues
}

/// Run both tests and report whether either one passed.
///
/// Each test reads the shared flag when it returns, so a linear pass
/// followed by a spin failure still reports `true` while `skip_continues`
/// is already cleared. Impact handling reads the flag, not this result.
pub fn collision(stone: &mut Stone, medium: Medium, config: &PhysicsConfig) -> bool {
    let linear = linear_collision(stone, medium, config);
    let circular = circular_collision(stone, config);
    linear || circular
}

/// Full impact handling for one submerged step.
///
/// A continuing skip keeps the rebound from the linear test and counts a
/// bounce. A failed skip flips the vertical velocity back, so the stone
/// carries on downward.
pub fn resolve_impact(stone: &mut Stone, medium: Medium, config: &PhysicsConfig) -> bool {
    collision(stone, medium, config);
    if stone.skip_continues {
        stone.bounce_count += 1;
        tracing::debug!(
            bounces = stone.bounce_count,
            vx = stone.velocity.x,
            "Stone skipped"
        );
    } else {
        stone.velocity.y = -stone.velocity.y;
    }
    stone.skip_continues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_close, stone_at_height};
    use skipstone_core::Vec3;

    fn cfg() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    #[test]
    fn default_stone_skips_on_linear_test() {
        let mut stone = stone_at_height(-0.01);
        stone.velocity.y = -2.0;

        assert!(linear_collision(&mut stone, Medium::Water, &cfg()));
        assert!(stone.skip_continues);
        assert_eq!(stone.velocity.y, 2.0, "rebound flips vertical velocity");
        assert_close(stone.velocity.x, 5.688655231905003, 1e-9);
        assert_close(stone.distance_traveled, 0.13001002194691927, 1e-12);
    }

    #[test]
    fn default_stone_skips_on_combined_test() {
        let mut stone = stone_at_height(-0.01);
        assert!(collision(&mut stone, Medium::Water, &cfg()));
        assert!(stone.skip_continues);
    }

    #[test]
    fn steep_tilt_cannot_lift() {
        let mut stone = stone_at_height(-0.01);
        stone.theta = 1.0;
        stone.velocity.y = -1.5;

        assert!(!linear_collision(&mut stone, Medium::Water, &cfg()));
        assert!(!stone.skip_continues);
        assert_eq!(stone.velocity.y, 1.5);
        assert_eq!(stone.distance_traveled, 0.0, "no contact path without lift");
        assert_eq!(stone.velocity.x, 6.0);
    }

    #[test]
    fn slow_stone_runs_out_of_energy() {
        let mut stone = stone_at_height(-0.01);
        stone.velocity = Vec3::new(0.5, -1.0, 0.0);

        assert!(!linear_collision(&mut stone, Medium::Water, &cfg()));
        assert_eq!(stone.velocity.x, EXHAUSTED_SPEED);
        assert_eq!(stone.velocity.y, 1.0);
        assert!(stone.distance_traveled > 0.0);
    }

    #[test]
    fn default_spin_allows_nine_bounces() {
        let stone = Stone::default();
        assert_close(max_stable_bounces(&stone, 9.8), 9.869604401089358, 1e-12);

        let mut stone = Stone::default();
        stone.bounce_count = 8;
        assert!(circular_collision(&mut stone, &cfg()));

        stone.bounce_count = 9;
        assert!(!circular_collision(&mut stone, &cfg()));
        assert!(!stone.skip_continues);
    }

    #[test]
    fn no_spin_means_no_stability() {
        let mut stone = Stone::default();
        stone.spin = 0.0;
        assert!(!circular_collision(&mut stone, &cfg()));
    }

    #[test]
    fn both_tests_run_even_when_linear_fails() {
        let mut stone = stone_at_height(-0.01);
        stone.theta = 1.0;
        stone.bounce_count = 20;
        let distance = stone.distance_traveled;

        assert!(!collision(&mut stone, Medium::Water, &cfg()));
        assert_eq!(stone.distance_traveled, distance);
        assert!(!stone.skip_continues);
    }

    #[test]
    fn linear_test_runs_even_when_spin_fails() {
        let mut stone = stone_at_height(-0.01);
        stone.bounce_count = 20;

        assert!(collision(&mut stone, Medium::Water, &cfg()), "linear pass is reported");
        assert!(!stone.skip_continues, "spin failure still ends the skip");
        assert!(stone.distance_traveled > 0.0, "contact path still accumulated");
    }

    #[test]
    fn spin_failure_after_linear_pass_still_sinks() {
        let mut stone = stone_at_height(-0.01);
        stone.velocity.y = -2.0;
        stone.bounce_count = 20;

        assert!(!resolve_impact(&mut stone, Medium::Water, &cfg()));
        assert_eq!(stone.bounce_count, 20);
        assert_eq!(stone.velocity.y, -2.0, "net effect is a single flip back down");
    }

    #[test]
    fn failed_skip_is_terminal() {
        let mut stone = stone_at_height(-0.01);
        stone.skip_continues = false;
        for _ in 0..5 {
            assert!(!collision(&mut stone, Medium::Water, &cfg()));
            assert!(!stone.skip_continues);
        }
    }

    #[test]
    fn resolve_counts_successful_bounce() {
        let mut stone = stone_at_height(-0.01);
        stone.velocity.y = -3.0;

        assert!(resolve_impact(&mut stone, Medium::Water, &cfg()));
        assert_eq!(stone.bounce_count, 1);
        assert_eq!(stone.velocity.y, 3.0);
    }

    #[test]
    fn resolve_keeps_failed_stone_sinking() {
        let mut stone = stone_at_height(-0.01);
        stone.velocity = Vec3::new(0.3, -3.0, 0.0);

        assert!(!resolve_impact(&mut stone, Medium::Water, &cfg()));
        assert_eq!(stone.bounce_count, 0);
        assert_eq!(stone.velocity.y, -3.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn skip_never_resumes(
                vx in -20.0f64..20.0,
                vy in -10.0f64..0.0,
                theta in -0.5f64..1.5,
                spin in 0.0f64..20.0,
                bounces in 0u32..30,
            ) {
                let mut stone = stone_at_height(-0.01);
                stone.velocity = Vec3::new(vx, vy, 0.0);
                stone.theta = theta;
                stone.spin = spin;
                stone.bounce_count = bounces;
                stone.skip_continues = false;

                prop_assert!(!collision(&mut stone, Medium::Water, &cfg()));
                prop_assert!(!resolve_impact(&mut stone, Medium::Water, &cfg()));
                prop_assert!(!stone.skip_continues);
                prop_assert_eq!(stone.bounce_count, bounces);
            }

            #[test]
            fn bounce_count_never_decreases(
                vx in 0.0f64..20.0,
                vy in -10.0f64..0.0,
                theta in 0.0f64..1.0,
            ) {
                let mut stone = stone_at_height(-0.01);
                stone.velocity = Vec3::new(vx, vy, 0.0);
                stone.theta = theta;
                let before = stone.bounce_count;
                resolve_impact(&mut stone, Medium::Water, &cfg());
                prop_assert!(stone.bounce_count >= before);
                prop_assert!(stone.velocity.is_finite());
                prop_assert!(stone.distance_traveled.is_finite());
            }
        }
    }
}
