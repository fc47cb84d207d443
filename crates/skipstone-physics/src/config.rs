use std::path::Path;

use serde::{Deserialize, Serialize};
use skipstone_core::{FluidTable, SkipError};

use crate::drag::{MAX_CD, MIN_CD};
use crate::gravity::GRAVITY;
use crate::stone::StoneParams;

/// Environment variable naming an alternative physics config file.
pub const CONFIG_ENV: &str = "SKIPSTONE_PHYSICS_CONFIG";
/// Config file read when the environment variable is unset or unusable.
pub const DEFAULT_CONFIG_PATH: &str = "config/physics.toml";

/// Data-driven physics parameters, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational acceleration (m/s^2, magnitude).
    pub gravity: f64,
    /// Shape factor when the face is broadside to the flow.
    pub max_cd: f64,
    /// Shape factor when the face is edge-on to the flow.
    pub min_cd: f64,
    pub fluids: FluidTable,
    /// Launch parameters used by resets.
    pub stone: StoneParams,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_cd: MAX_CD,
            min_cd: MIN_CD,
            fluids: FluidTable::default(),
            stone: StoneParams::DEFAULT,
        }
    }
}

impl PhysicsConfig {
    /// Load config from the file named by the environment variable, then
    /// from the default path, falling back to defaults.
    pub fn load() -> Self {
        let override_path = std::env::var(CONFIG_ENV).ok();
        Self::load_with(override_path.as_deref().map(Path::new), Path::new(DEFAULT_CONFIG_PATH))
    }

    fn load_with(override_path: Option<&Path>, default_path: &Path) -> Self {
        if let Some(path) = override_path
            && let Some(cfg) = Self::load_from(path)
        {
            return cfg;
        }
        Self::load_from(default_path).unwrap_or_default()
    }

    /// Read and validate one config file. `None` if it is missing or rejected.
    pub fn load_from(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match Self::from_toml_str(&content) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::warn!("Failed to load {}: {e}, skipping", path.display());
                None
            },
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SkipError> {
        let cfg: Self = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SkipError> {
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(SkipError::InvalidParameter {
                name: "gravity",
                value: self.gravity,
            });
        }
        if !(self.min_cd >= 0.0 && self.max_cd >= self.min_cd) {
            return Err(SkipError::InvalidParameter {
                name: "max_cd",
                value: self.max_cd,
            });
        }
        self.fluids.validate()?;
        self.stone.validate()
    }
}
