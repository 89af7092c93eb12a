//! Kart tuning (drive, drift, boost, ground, visual). Loaded from a RON file at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading, saving or validating a [`KartConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access config at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config syntax at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Complete tuning for one kart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KartConfig {
    #[serde(default)]
    pub drive: DriveTuning,
    #[serde(default)]
    pub drift: DriftTuning,
    #[serde(default)]
    pub boost: BoostTuning,
    #[serde(default)]
    pub ground: GroundTuning,
    #[serde(default)]
    pub visual: VisualTuning,
}

/// Throttle, steering and body parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveTuning {
    /// Requested speed while accelerate is held.
    pub acceleration: f32,
    /// Turn rate in degrees for a full steer input.
    pub steering: f32,
    /// Extra downward acceleration applied every physics tick.
    pub gravity: f32,
    /// Blend rate (per second) of the speed smoothstep.
    pub speed_smoothing: f32,
    /// Blend rate (per second) of the turn-rate lerp.
    pub turn_smoothing: f32,
    /// Blend rate (per second) of the chassis heading toward heading + turn rate.
    pub heading_rate: f32,
    /// Radius of the rolling sphere.
    pub sphere_radius: f32,
    /// Linear damping of the rolling sphere.
    pub linear_damping: f32,
}

impl Default for DriveTuning {
    fn default() -> Self {
        Self {
            acceleration: 30.0,
            steering: 80.0,
            gravity: 10.0,
            speed_smoothing: 12.0,
            turn_smoothing: 4.0,
            heading_rate: 5.0,
            sphere_radius: 0.5,
            linear_damping: 1.0,
        }
    }
}

/// Drift charge accumulation and tier thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftTuning {
    /// Charge needed for tiers 1, 2 and 3.
    pub tier_thresholds: [f32; 3],
    /// Charge per reference tick when steering fully into the drift.
    pub min_charge_per_tick: f32,
    /// Charge per reference tick when fully counter-steering.
    pub max_charge_per_tick: f32,
    /// Steering multiplier when steering fully into the drift.
    pub max_turn_control: f32,
    /// Steering multiplier when fully counter-steering.
    pub min_turn_control: f32,
    /// Tick rate the per-tick charge values are tuned for.
    pub reference_hz: f32,
}

impl Default for DriftTuning {
    fn default() -> Self {
        Self {
            tier_thresholds: [50.0, 100.0, 150.0],
            min_charge_per_tick: 0.2,
            max_charge_per_tick: 1.0,
            max_turn_control: 2.0,
            min_turn_control: 0.0,
            reference_hz: 60.0,
        }
    }
}

/// Release boost and chromatic pulse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostTuning {
    /// Speed multiplier at the start of the boost ramp.
    pub multiplier: f32,
    /// Ramp duration per achieved tier, in seconds.
    pub seconds_per_tier: f32,
    /// Chromatic pulse rise time, in seconds.
    pub chromatic_rise: f32,
    /// Chromatic pulse fall time, in seconds.
    pub chromatic_fall: f32,
}

impl Default for BoostTuning {
    fn default() -> Self {
        Self {
            multiplier: 3.0,
            seconds_per_tier: 0.3,
            chromatic_rise: 0.5,
            chromatic_fall: 0.5,
        }
    }
}

/// Ground probes and surface alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTuning {
    /// How far the chassis sits below the sphere center.
    pub chassis_offset: f32,
    /// Probe origin height above the chassis.
    pub probe_lift: f32,
    /// Short probe length, used for the grounded flag.
    pub contact_probe: f32,
    /// Long probe length, used for surface alignment.
    pub align_probe: f32,
    /// Blend rate (per second) of the up-normal toward the surface normal.
    pub align_rate: f32,
}

impl Default for GroundTuning {
    fn default() -> Self {
        Self {
            chassis_offset: 0.4,
            probe_lift: 0.1,
            contact_probe: 1.1,
            align_probe: 2.0,
            align_rate: 8.0,
        }
    }
}

/// Visual model yaw offsets relative to the chassis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualTuning {
    /// Model yaw in degrees for a full steer input while not drifting.
    pub steer_yaw: f32,
    /// Model yaw in degrees per unit of drift control.
    pub drift_yaw: f32,
    /// Drift control when steering fully into the drift.
    pub max_drift_control: f32,
    /// Drift control when fully counter-steering.
    pub min_drift_control: f32,
    /// Per-frame follow factor at `reference_hz`.
    pub follow_factor: f32,
    pub reference_hz: f32,
    /// Time for the drift yaw to settle back to zero after a drift.
    pub settle_seconds: f32,
}

impl Default for VisualTuning {
    fn default() -> Self {
        Self {
            steer_yaw: 15.0,
            drift_yaw: 15.0,
            max_drift_control: 2.0,
            min_drift_control: 0.5,
            follow_factor: 0.2,
            reference_hz: 60.0,
            settle_seconds: 0.5,
        }
    }
}

impl KartConfig {
    /// Load config from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No kart config at {:?}, using defaults", path);
                Self::default()
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save config to `path` as pretty RON.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let s = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, s).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject tunings the control core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [t1, t2, t3] = self.drift.tier_thresholds;
        if !(t1 > 0.0 && t1 < t2 && t2 < t3) {
            return Err(ConfigError::Invalid(format!(
                "tier thresholds must be positive and ascending, got {:?}",
                self.drift.tier_thresholds
            )));
        }
        if self.drift.min_charge_per_tick < 0.0 || self.drift.max_charge_per_tick < 0.0 {
            return Err(ConfigError::Invalid(
                "charge per tick must not be negative".to_string(),
            ));
        }

        let rates = [
            ("drive.speed_smoothing", self.drive.speed_smoothing),
            ("drive.turn_smoothing", self.drive.turn_smoothing),
            ("drive.heading_rate", self.drive.heading_rate),
            ("drift.reference_hz", self.drift.reference_hz),
            ("ground.align_rate", self.ground.align_rate),
            ("visual.reference_hz", self.visual.reference_hz),
            ("drive.sphere_radius", self.drive.sphere_radius),
        ];
        if let Some((name, value)) = rates.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
        }

        if self.ground.contact_probe <= 0.0 || self.ground.align_probe <= 0.0 {
            return Err(ConfigError::Invalid("probe lengths must be positive".to_string()));
        }
        if self.boost.multiplier < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "boost multiplier must be at least 1, got {}",
                self.boost.multiplier
            )));
        }
        Ok(())
    }
}

/// Default config location: `kart.ron` in the current directory.
pub fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("kart.ron")
}
