use std::path::Path;

use serde::{Deserialize, Serialize};
use skipstone_core::SkipError;
use skipstone_physics::simulation::{DEFAULT_MIN_HEIGHT, MAX_STABLE_DT};

/// Environment variable naming an alternative session config file.
pub const CONFIG_ENV: &str = "SKIPSTONE_SESSION_CONFIG";
/// Config file read when the environment variable is unset or unusable.
pub const DEFAULT_CONFIG_PATH: &str = "config/session.toml";

/// Data-driven session parameters, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Upper bound on the per-frame physics step (seconds).
    pub max_dt: f64,
    /// Physics height at which stepping stops.
    pub min_height: f64,
    /// Scene height of the water plane; added to the physics height for rendering.
    pub water_height: f64,
    /// Scene height of the lake floor.
    pub floor_height: f64,
    /// The throw ends once the stone is below `floor_height * floor_margin`.
    pub floor_margin: f64,
    /// The throw ends once the stone is this far down the throw axis.
    pub max_distance: f64,
    /// Time spent in the finished state before the stone resets (seconds).
    pub reset_delay_secs: f64,
    /// Vertical drag (px) ignored before the tilt starts to change.
    pub tilt_drag_threshold_px: f64,
    /// Tilt change per pixel of drag (radians).
    pub tilt_per_px: f64,
    /// Largest tilt change a single drag event may apply (radians).
    pub max_tilt_step: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_dt: MAX_STABLE_DT,
            min_height: DEFAULT_MIN_HEIGHT,
            water_height: 0.8,
            floor_height: -1.0,
            floor_margin: 1.1,
            max_distance: 90.0,
            reset_delay_secs: 5.0,
            tilt_drag_threshold_px: 5.0,
            tilt_per_px: 0.005,
            max_tilt_step: 0.03,
        }
    }
}

impl SessionConfig {
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
        if !(self.max_dt > 0.0 && self.max_dt <= MAX_STABLE_DT) {
            return Err(SkipError::InvalidParameter {
                name: "max_dt",
                value: self.max_dt,
            });
        }
        if self.max_distance <= 0.0 {
            return Err(SkipError::InvalidParameter {
                name: "max_distance",
                value: self.max_distance,
            });
        }
        if self.reset_delay_secs < 0.0 {
            return Err(SkipError::InvalidParameter {
                name: "reset_delay_secs",
                value: self.reset_delay_secs,
            });
        }
        if self.max_tilt_step < 0.0 {
            return Err(SkipError::InvalidParameter {
                name: "max_tilt_step",
                value: self.max_tilt_step,
            });
        }
        Ok(())
    }

    /// Scene height at or below which a throw is over.
    pub fn floor_threshold(&self) -> f64 {
        self.floor_height * self.floor_margin
    }
}
