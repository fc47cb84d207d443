use serde::{Deserialize, Serialize};
use skipstone_core::{Medium, Vec3};

use crate::collision::resolve_impact;
use crate::config::PhysicsConfig;
use crate::drag::drag_force;
use crate::gravity::gravity_force;
use crate::integrator::advance;
use crate::stone::Stone;

/// Height below which stepping stops when the caller has no floor of its own.
pub const DEFAULT_MIN_HEIGHT: f64 = -2.0;
/// Largest time step the explicit integration stays stable for.
pub const MAX_STABLE_DT: f64 = 0.02;

/// Which side of the water plane the stone is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    Flying,
    Submerged,
}

impl FlightPhase {
    pub fn of(stone: &Stone) -> Self {
        match Medium::at_height(stone.position.y) {
            Medium::Air => Self::Flying,
            Medium::Water => Self::Submerged,
        }
    }
}

/// Stepping driver. Owns its parameters; all flight state lives in the
/// `Stone` passed to each call.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    config: PhysicsConfig,
}

impl Simulation {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// A fresh stone at the configured launch parameters.
    pub fn new_stone(&self) -> Stone {
        Stone::new(&self.config.stone)
    }

    /// Restore `stone` to the configured launch parameters.
    pub fn reset(&self, stone: &mut Stone) {
        stone.reset_to(&self.config.stone);
    }

    /// Advance `stone` by `dt` seconds and return its new position.
    ///
    /// No-op when the stone is at or below `min_height` or `dt` is not
    /// positive. Drag uses air above the water plane and water at or below
    /// it. Every step that ends at or below the plane with `skipping_enabled`
    /// goes through impact resolution, including for a stone that already
    /// failed: it keeps losing horizontal energy and adding contact path
    /// while it sinks. `distance_traveled` follows the throw axis, plus the
    /// contact paths added by impacts.
    pub fn step(
        &self,
        stone: &mut Stone,
        dt: f64,
        skipping_enabled: bool,
        min_height: f64,
    ) -> Vec3 {
        if stone.position.y <= min_height || dt.is_nan() || dt <= 0.0 {
            return stone.position;
        }

        let medium = Medium::at_height(stone.position.y);
        let net_force = drag_force(stone, medium, &self.config)
            + gravity_force(stone.mass, self.config.gravity);

        let start_x = stone.position.x;
        advance(stone, net_force, dt);

        if skipping_enabled && stone.position.y <= 0.0 {
            resolve_impact(stone, Medium::Water, &self.config);
        }
        stone.distance_traveled += stone.position.x - start_x;

        stone.position
    }
}

/// Advance `stone` one step with the default physics parameters.
pub fn simulate_one_step(
    stone: &mut Stone,
    dt: f64,
    skipping_enabled: bool,
    min_height: f64,
) -> Vec3 {
    Simulation::default().step(stone, dt, skipping_enabled, min_height)
}
