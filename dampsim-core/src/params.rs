//! Oscillator parameters and stepping configuration
//!
//! Both structs are immutable once built. Their `Default` impls carry the
//! constants the interactive model runs with; `new` validates overrides.

use glam::DMat2;
use std::f64::consts::PI;
use thiserror::Error;

/// Invalid parameter or configuration value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("horizon {horizon} is shorter than one time step of {dt}")]
    HorizonTooShort { horizon: f64, dt: f64 },

    #[error("horizon {horizon} with time step {dt} needs more than {max} steps")]
    TooManySteps { horizon: f64, dt: f64, max: usize },
}

fn finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    let value = finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Damping ratio and natural frequency of the mass-spring-damper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorParameters {
    damping_ratio: f64,
    natural_frequency: f64,
}

impl OscillatorParameters {
    pub const DEFAULT_DAMPING_RATIO: f64 = 0.25;
    pub const DEFAULT_NATURAL_FREQUENCY: f64 = 2.0 * PI;

    pub fn new(damping_ratio: f64, natural_frequency: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            damping_ratio: finite("damping ratio", damping_ratio)?,
            natural_frequency: finite("natural frequency", natural_frequency)?,
        })
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    pub fn natural_frequency(&self) -> f64 {
        self.natural_frequency
    }

    /// State matrix A of x' = A x for x = (position, velocity)
    ///
    /// ```text
    /// [   0      1   ]
    /// [ -w^2  -2 z w ]
    /// ```
    pub fn system_matrix(&self) -> DMat2 {
        let w = self.natural_frequency;
        let z = self.damping_ratio;
        // glam matrices are column-major
        DMat2::from_cols_array(&[0.0, -w * w, 1.0, -2.0 * z * w])
    }
}

impl Default for OscillatorParameters {
    fn default() -> Self {
        Self {
            damping_ratio: Self::DEFAULT_DAMPING_RATIO,
            natural_frequency: Self::DEFAULT_NATURAL_FREQUENCY,
        }
    }
}

/// Fixed time step and horizon of one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    dt: f64,
    horizon: f64,
}

impl SimulationConfig {
    pub const DEFAULT_DT: f64 = 0.01;
    pub const DEFAULT_HORIZON: f64 = 10.0;
    /// Largest trajectory a single release may allocate
    pub const MAX_STEPS: usize = 10_000_000;

    pub fn new(dt: f64, horizon: f64) -> Result<Self, ConfigError> {
        let dt = positive("time step", dt)?;
        let horizon = positive("horizon", horizon)?;
        if horizon < dt {
            return Err(ConfigError::HorizonTooShort { horizon, dt });
        }
        if horizon / dt > Self::MAX_STEPS as f64 {
            return Err(ConfigError::TooManySteps {
                horizon,
                dt,
                max: Self::MAX_STEPS,
            });
        }
        Ok(Self { dt, horizon })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Number of samples in a trajectory, floor(T / dt)
    pub fn steps(&self) -> usize {
        (self.horizon / self.dt) as usize
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: Self::DEFAULT_DT,
            horizon: Self::DEFAULT_HORIZON,
        }
    }
}

/// Presentation-facing playback settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    settle_threshold: f64,
    display_scale: f64,
}

impl PlaybackConfig {
    /// Speed below which the mass counts as at rest
    pub const DEFAULT_SETTLE_THRESHOLD: f64 = 1e-4;
    /// Display units per simulation unit of displacement
    pub const DEFAULT_DISPLAY_SCALE: f64 = 50.0;

    pub fn new(settle_threshold: f64, display_scale: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            settle_threshold: positive("settle threshold", settle_threshold)?,
            display_scale: positive("display scale", display_scale)?,
        })
    }

    pub fn settle_threshold(&self) -> f64 {
        self.settle_threshold
    }

    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            settle_threshold: Self::DEFAULT_SETTLE_THRESHOLD,
            display_scale: Self::DEFAULT_DISPLAY_SCALE,
        }
    }
}
