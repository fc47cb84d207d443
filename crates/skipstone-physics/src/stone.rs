use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use skipstone_core::{SkipError, Vec3};

/// Default stone mass (kg).
pub const DEFAULT_MASS: f64 = 0.1;
/// Default stone radius (m).
pub const DEFAULT_RADIUS: f64 = 0.05;
/// Default spin rate (rev/s).
pub const DEFAULT_SPIN: f64 = 7.0;
/// Default tilt between the flat face and the water plane (10 degrees, in radians).
pub const DEFAULT_THETA: f64 = 10.0 / 180.0 * PI;
/// Launch point: roughly the height a person releases a sidearm throw.
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.5, 0.0);
/// Launch velocity (m/s).
pub const DEFAULT_VELOCITY: Vec3 = Vec3::new(6.0, 0.0, 0.0);

/// Launch parameters a stone is (re)initialized from.
///
/// All fields are plain values, so every `Stone` built from the same params
/// owns its own copy; there is no shared template to mutate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoneParams {
    pub mass: f64,
    pub radius: f64,
    pub spin: f64,
    pub theta: f64,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl StoneParams {
    pub const DEFAULT: Self = Self {
        mass: DEFAULT_MASS,
        radius: DEFAULT_RADIUS,
        spin: DEFAULT_SPIN,
        theta: DEFAULT_THETA,
        position: DEFAULT_POSITION,
        velocity: DEFAULT_VELOCITY,
    };

    pub fn validate(&self) -> Result<(), SkipError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SkipError::InvalidParameter {
                name: "mass",
                value: self.mass,
            });
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SkipError::InvalidParameter {
                name: "radius",
                value: self.radius,
            });
        }
        if !(self.spin.is_finite() && self.spin >= 0.0) {
            return Err(SkipError::InvalidParameter {
                name: "spin",
                value: self.spin,
            });
        }
        if !self.theta.is_finite() {
            return Err(SkipError::InvalidParameter {
                name: "theta",
                value: self.theta,
            });
        }
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(SkipError::InvalidParameter {
                name: "launch vector",
                value: f64::NAN,
            });
        }
        Ok(())
    }
}

impl Default for StoneParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The simulated stone: physical parameters, kinematic state and the
/// outcome counters a HUD reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stone {
    pub mass: f64,
    pub radius: f64,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Angular rate about the face normal (rev/s).
    pub spin: f64,
    /// Tilt between the flat face and the water plane (radians).
    pub theta: f64,
    /// Cleared once a collision decides the stone sinks. Never set again
    /// until the next reset.
    pub skip_continues: bool,
    pub bounce_count: u32,
    /// Distance covered along the throw axis, including contact paths.
    pub distance_traveled: f64,
}

impl Stone {
    pub fn new(params: &StoneParams) -> Self {
        Self {
            mass: params.mass,
            radius: params.radius,
            position: params.position,
            velocity: params.velocity,
            spin: params.spin,
            theta: params.theta,
            skip_continues: true,
            bounce_count: 0,
            distance_traveled: 0.0,
        }
    }

    /// Validated constructor for parameters coming from outside the crate.
    pub fn try_new(params: &StoneParams) -> Result<Self, SkipError> {
        params.validate()?;
        Ok(Self::new(params))
    }

    /// Restore launch parameters and clear the outcome counters.
    pub fn reset_to(&mut self, params: &StoneParams) {
        *self = Self::new(params);
    }

    /// Whether the stone has struck the water plane and stayed in play.
    pub fn has_skipped(&self) -> bool {
        self.skip_continues && self.bounce_count > 0
    }
}

impl Default for Stone {
    fn default() -> Self {
        Self::new(&StoneParams::DEFAULT)
    }
}

/// Restore `stone` to the default launch parameters.
pub fn reset(stone: &mut Stone) {
    stone.reset_to(&StoneParams::DEFAULT);
}
