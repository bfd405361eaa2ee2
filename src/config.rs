//! # Timer Configuration
//!
//! Kinematic limits used by the estimator, loaded from a TOML file. Every key
//! is optional; anything missing takes the default shown below.
//!
//! ```toml
//! jerk_efficiency = 1.0
//! accel_efficiency = 1.0
//! speed_multiplier = 1.0
//!
//! [max_print_accel]
//! x = 200.0
//! y = 200.0
//! z = 30.0
//! e = 1000.0
//!
//! [max_move_accel]
//! x = 200.0
//! y = 200.0
//! z = 30.0
//!
//! [max_jerk]
//! x = 15.0
//! y = 15.0
//! z = 0.0
//! e = 1000.0
//! ```

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::motion::{KinematicLimits, Vector4};

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "gcodetimer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimerConfig {
    #[serde(default = "default_efficiency")]
    pub jerk_efficiency: f64,
    #[serde(default = "default_efficiency")]
    pub accel_efficiency: f64,
    #[serde(default = "default_speed_multiplier")]
    pub speed_multiplier: f64,
    #[serde(default)]
    pub max_print_accel: PrintAccelConfig,
    #[serde(default)]
    pub max_move_accel: MoveAccelConfig,
    #[serde(default)]
    pub max_jerk: JerkConfig,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            jerk_efficiency: default_efficiency(),
            accel_efficiency: default_efficiency(),
            speed_multiplier: default_speed_multiplier(),
            max_print_accel: PrintAccelConfig::default(),
            max_move_accel: MoveAccelConfig::default(),
            max_jerk: JerkConfig::default(),
        }
    }
}

/// Acceleration ceilings for extruding moves, mm/s².
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PrintAccelConfig {
    #[serde(default = "default_xy_accel")]
    pub x: f64,
    #[serde(default = "default_xy_accel")]
    pub y: f64,
    #[serde(default = "default_z_accel")]
    pub z: f64,
    #[serde(default = "default_e_accel")]
    pub e: f64,
}

impl Default for PrintAccelConfig {
    fn default() -> Self {
        Self {
            x: default_xy_accel(),
            y: default_xy_accel(),
            z: default_z_accel(),
            e: default_e_accel(),
        }
    }
}

/// Acceleration ceilings for travel moves, mm/s². Travel never extrudes, so
/// there is no E entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MoveAccelConfig {
    #[serde(default = "default_xy_accel")]
    pub x: f64,
    #[serde(default = "default_xy_accel")]
    pub y: f64,
    #[serde(default = "default_z_accel")]
    pub z: f64,
}

impl Default for MoveAccelConfig {
    fn default() -> Self {
        Self {
            x: default_xy_accel(),
            y: default_xy_accel(),
            z: default_z_accel(),
        }
    }
}

/// Per-axis jerk, mm/s.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JerkConfig {
    #[serde(default = "default_xy_jerk")]
    pub x: f64,
    #[serde(default = "default_xy_jerk")]
    pub y: f64,
    #[serde(default = "default_z_jerk")]
    pub z: f64,
    #[serde(default = "default_e_jerk")]
    pub e: f64,
}

impl Default for JerkConfig {
    fn default() -> Self {
        Self {
            x: default_xy_jerk(),
            y: default_xy_jerk(),
            z: default_z_jerk(),
            e: default_e_jerk(),
        }
    }
}

impl TimerConfig {
    /// Check efficiencies, multiplier and ceilings before any file is timed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("jerk_efficiency", self.jerk_efficiency),
            ("accel_efficiency", self.accel_efficiency),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        if !(self.speed_multiplier > 0.0 && self.speed_multiplier.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "speed_multiplier must be > 0, got {}",
                self.speed_multiplier
            )));
        }
        let limits = KinematicLimits::from(self);
        for (name, v) in [
            ("max_print_accel", limits.max_print_accel),
            ("max_move_accel", limits.max_move_accel),
            ("max_jerk", limits.max_jerk),
        ] {
            for (axis, c) in ["x", "y", "z", "e"].iter().zip(v.components()) {
                if !(c.is_finite() && c >= 0.0) {
                    return Err(ConfigError::Invalid(format!(
                        "{}.{} must be a non-negative number, got {}",
                        name, axis, c
                    )));
                }
            }
        }
        Ok(())
    }
}

impl From<&TimerConfig> for KinematicLimits {
    fn from(config: &TimerConfig) -> Self {
        let p = &config.max_print_accel;
        let m = &config.max_move_accel;
        let j = &config.max_jerk;
        Self {
            max_print_accel: Vector4::new(p.x, p.y, p.z, p.e),
            max_move_accel: Vector4::new(m.x, m.y, m.z, 0.0),
            max_jerk: Vector4::new(j.x, j.y, j.z, j.e),
            jerk_efficiency: config.jerk_efficiency,
            accel_efficiency: config.accel_efficiency,
            speed_multiplier: config.speed_multiplier,
        }
    }
}

// Default value functions
fn default_efficiency() -> f64 { 1.0 }
fn default_speed_multiplier() -> f64 { 1.0 }
fn default_xy_accel() -> f64 { 200.0 }
fn default_z_accel() -> f64 { 30.0 }
fn default_e_accel() -> f64 { 1000.0 }
fn default_xy_jerk() -> f64 { 15.0 }
fn default_z_jerk() -> f64 { 0.0 }
fn default_e_jerk() -> f64 { 1000.0 }

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<TimerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path.display(), e);
            Err(ConfigError::Io(e))
        }
    }
}

/// Load the file if it exists, otherwise fall back to defaults.
pub fn load_or_default(path: &Path) -> Result<TimerConfig, ConfigError> {
    if path.exists() {
        tracing::info!("Loading configuration from: {}", path.display());
        load_config(path)
    } else {
        tracing::info!("No configuration at {}, using defaults", path.display());
        Ok(TimerConfig::default())
    }
}

/// Write the complete configuration, creating parent directories as needed.
pub fn save_config(path: &Path, config: &TimerConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    tracing::info!("Wrote configuration to {}", path.display());
    Ok(())
}
