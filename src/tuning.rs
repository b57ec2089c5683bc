//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::is_positive_finite;

/// Errors produced while loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` must be {expected}, got {value}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    /// Fixed simulation step (seconds)
    pub sim_dt: f32,
    /// Maximum fixed steps run for one host frame
    pub max_substeps: u32,
    /// Host frame deltas above this are clamped (seconds)
    pub max_frame_dt: f32,

    // === Player physics ===
    pub gravity: f32,
    pub flap_impulse: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub start_x_fraction: f32,
    pub start_y_fraction: f32,
    pub hover_amplitude: f32,
    pub hover_period: f32,

    // === Obstacles ===
    pub scroll_speed: f32,
    pub spawn_interval: f32,
    pub opening_height: f32,
    pub opening_jitter: f32,
    pub spawn_margin: f32,
    pub segment_width: f32,
    pub segment_height: f32,

    // === Ground ===
    pub ground_seam_overlap: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sim_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,

            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            start_x_fraction: START_X_FRACTION,
            start_y_fraction: START_Y_FRACTION,
            hover_amplitude: HOVER_AMPLITUDE,
            hover_period: HOVER_PERIOD,

            scroll_speed: SCROLL_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            opening_height: OPENING_HEIGHT,
            opening_jitter: OPENING_JITTER,
            spawn_margin: SPAWN_MARGIN,
            segment_width: SEGMENT_WIDTH,
            segment_height: SEGMENT_HEIGHT,

            ground_seam_overlap: GROUND_SEAM_OVERLAP,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field against the range the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("sim_dt", self.sim_dt),
            ("max_frame_dt", self.max_frame_dt),
            ("gravity", self.gravity),
            ("flap_impulse", self.flap_impulse),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("hover_period", self.hover_period),
            ("scroll_speed", self.scroll_speed),
            ("spawn_interval", self.spawn_interval),
            ("opening_height", self.opening_height),
            ("segment_width", self.segment_width),
            ("segment_height", self.segment_height),
        ];
        for (field, value) in positive {
            if !is_positive_finite(value) {
                return Err(TuningError::Invalid {
                    field,
                    expected: "finite and positive",
                    value,
                });
            }
        }

        let non_negative = [
            ("hover_amplitude", self.hover_amplitude),
            ("spawn_margin", self.spawn_margin),
            ("ground_seam_overlap", self.ground_seam_overlap),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    expected: "finite and non-negative",
                    value,
                });
            }
        }

        let fractions = [
            ("start_x_fraction", self.start_x_fraction),
            ("start_y_fraction", self.start_y_fraction),
        ];
        for (field, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Invalid {
                    field,
                    expected: "within [0, 1]",
                    value,
                });
            }
        }

        if !(0.0..=0.5).contains(&self.opening_jitter) {
            return Err(TuningError::Invalid {
                field: "opening_jitter",
                expected: "within [0, 0.5]",
                value: self.opening_jitter,
            });
        }

        if self.max_substeps == 0 {
            return Err(TuningError::Invalid {
                field: "max_substeps",
                expected: "at least 1",
                value: 0.0,
            });
        }

        Ok(())
    }

    /// Player box size
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    /// Obstacle segment box size
    pub fn segment_size(&self) -> Vec2 {
        Vec2::new(self.segment_width, self.segment_height)
    }
}
