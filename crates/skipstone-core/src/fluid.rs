use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SkipError;

/// Density (kg/m^3) of air.
pub const AIR_DENSITY: f64 = 1.29;
/// Dynamic viscosity (Pa*s) of air.
pub const AIR_VISCOSITY: f64 = 1.78e-5;
/// Density (kg/m^3) of water.
pub const WATER_DENSITY: f64 = 1000.0;
/// Dynamic viscosity (Pa*s) of water.
pub const WATER_VISCOSITY: f64 = 1.0e-3;

/// The two fluids a stone can move through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    /// Above the water plane.
    Air,
    /// Below the water plane, during the contact phase of a bounce.
    Water,
}

impl Medium {
    /// Medium the stone is in at the given height above the water plane.
    pub fn at_height(height: f64) -> Self {
        if height > 0.0 { Self::Air } else { Self::Water }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Water => "water",
        }
    }
}

impl FromStr for Medium {
    type Err = SkipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "air" => Ok(Self::Air),
            "water" => Ok(Self::Water),
            other => Err(SkipError::UnknownMedium(other.to_string())),
        }
    }
}

impl std::fmt::Display for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable density/viscosity pair for one fluid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidProperties {
    pub density: f64,
    pub viscosity: f64,
}

impl FluidProperties {
    /// Kinematic viscosity (m^2/s).
    pub fn kinematic_viscosity(&self) -> f64 {
        self.viscosity / self.density
    }

    pub fn validate(&self, medium: Medium) -> Result<(), SkipError> {
        for value in [self.density, self.viscosity] {
            if !is_positive(value) {
                return Err(SkipError::InvalidParameter {
                    name: medium.name(),
                    value,
                });
            }
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Property lookup for both media.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidTable {
    pub air: FluidProperties,
    pub water: FluidProperties,
}

impl Default for FluidTable {
    fn default() -> Self {
        Self {
            air: FluidProperties {
                density: AIR_DENSITY,
                viscosity: AIR_VISCOSITY,
            },
            water: FluidProperties {
                density: WATER_DENSITY,
                viscosity: WATER_VISCOSITY,
            },
        }
    }
}

impl FluidTable {
    pub fn get(&self, medium: Medium) -> FluidProperties {
        match medium {
            Medium::Air => self.air,
            Medium::Water => self.water,
        }
    }

    /// Look up a medium by name. Unknown names are an error, never a default.
    pub fn by_name(&self, name: &str) -> Result<FluidProperties, SkipError> {
        Ok(self.get(name.parse()?))
    }

    pub fn validate(&self) -> Result<(), SkipError> {
        self.air.validate(Medium::Air)?;
        self.water.validate(Medium::Water)
    }
}
