pub mod collision;
pub mod config;
pub mod drag;
pub mod gravity;
pub mod integrator;
pub mod simulation;
pub mod stone;

pub use collision::{circular_collision, collision, linear_collision};
pub use config::PhysicsConfig;
pub use drag::{air_drag, drag_force, water_drag};
pub use simulation::{FlightPhase, Simulation, simulate_one_step};
pub use stone::{Stone, StoneParams, reset};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::simulation::{DEFAULT_MIN_HEIGHT, Simulation};
    use crate::stone::Stone;

    /// Default stone moved to the given height (negative = below the water plane).
    pub fn stone_at_height(height: f64) -> Stone {
        let mut stone = Stone::default();
        stone.position.y = height;
        stone
    }

    /// Step until the stone reaches the default floor or `max_steps` run out.
    /// Returns the number of steps taken.
    pub fn run_until_settled(
        sim: &Simulation,
        stone: &mut Stone,
        dt: f64,
        max_steps: usize,
    ) -> usize {
        let mut steps = 0;
        while steps < max_steps && stone.position.y > DEFAULT_MIN_HEIGHT {
            sim.step(stone, dt, true, DEFAULT_MIN_HEIGHT);
            steps += 1;
        }
        steps
    }

    /// Assert two floats agree within `tolerance`.
    pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual} (tolerance {tolerance})"
        );
    }
}
