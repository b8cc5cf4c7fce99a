//! # Model Configuration
//!
//! Every tunable constant of the pitch control model lives here.
//!
//! ## Usage
//! ```rust
//! use pc_core::config::{ModelParams, PitchConfig};
//!
//! let params = ModelParams::default();
//! let cautious = ModelParams::cautious();
//! let pitch = PitchConfig::default();
//! assert!(params.validate().is_ok() && cautious.validate().is_ok() && pitch.validate().is_ok());
//! ```

mod pitch_config;

pub use pitch_config::PitchConfig;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{PitchControlError, Result};
use crate::model::constants::{control, integration, motion};

/// Pitch control model parameters.
///
/// Only primary values are stored. Rates and time-to-control thresholds are
/// derived on every call, so overriding e.g. `tti_sigma` is picked up
/// everywhere without recomputing anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    // === Kinematics ===
    /// 최대 달리기 속도 (m/s) (기본: 5.0)
    pub max_player_speed: f64,
    /// Seconds a player keeps drifting on the current velocity (기본: 0.7)
    pub reaction_time: f64,
    /// Ground pass speed (m/s) (기본: 15.0)
    pub average_ball_speed: f64,

    // === Time to control ===
    /// Arrival-time uncertainty (s) (기본: 0.45)
    pub tti_sigma: f64,
    /// Defender rate multiplier (기본: 1.0)
    pub kappa_def: f64,
    /// Attacking control rate (1/s) (기본: 4.3)
    pub lambda_att: f64,
    /// Defending goalkeeper rate relative to outfield defenders (기본: 3.0)
    pub lambda_gk_multiplier: f64,
    /// Convergence threshold for ruling a side out, log10 units (기본: 3.0)
    pub time_to_control_veto: f64,

    // === Integration ===
    /// Step (s) (기본: 0.04)
    pub int_dt: f64,
    /// Horizon after the ball arrives (s) (기본: 10.0)
    pub max_int_time: f64,
    /// 수렴 허용 오차 (기본: 0.01)
    pub model_converge_tol: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            max_player_speed: motion::MAX_PLAYER_SPEED,
            reaction_time: motion::REACTION_TIME,
            average_ball_speed: motion::AVERAGE_BALL_SPEED,

            tti_sigma: control::TTI_SIGMA,
            kappa_def: control::KAPPA_DEF,
            lambda_att: control::LAMBDA_ATT,
            lambda_gk_multiplier: control::LAMBDA_GK_MULTIPLIER,
            time_to_control_veto: control::TIME_TO_CONTROL_VETO,

            int_dt: integration::INT_DT,
            max_int_time: integration::MAX_INT_TIME,
            model_converge_tol: integration::MODEL_CONVERGE_TOL,
        }
    }
}

impl ModelParams {
    /// Slower, later-reacting players. Useful as a pessimistic bound.
    pub fn cautious() -> Self {
        Self {
            max_player_speed: 4.5,
            reaction_time: 0.9,
            ..Self::default()
        }
    }

    /// Coarser integration for parameter sweeps (e.g. relocation grids).
    pub fn fast_integration() -> Self {
        Self {
            int_dt: 0.1,
            model_converge_tol: 0.02,
            ..Self::default()
        }
    }

    /// Load a (possibly partial) parameter bundle from JSON and range-check it.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: ModelParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Defending control rate (1/s)
    #[inline]
    pub fn lambda_def(&self) -> f64 {
        self.lambda_att * self.kappa_def
    }

    /// Defending goalkeeper control rate (1/s)
    #[inline]
    pub fn lambda_gk(&self) -> f64 {
        self.lambda_def() * self.lambda_gk_multiplier
    }

    /// Logistic steepness of the arrival-time distribution: π / (√3·σ)
    #[inline]
    pub fn arrival_steepness(&self) -> f64 {
        PI / 3f64.sqrt() / self.tti_sigma
    }

    /// Time after which an attacker is considered to control the ball with
    /// (1 - 10^-veto) probability.
    pub fn time_to_control_att(&self) -> f64 {
        self.time_to_control(self.lambda_att)
    }

    pub fn time_to_control_def(&self) -> f64 {
        self.time_to_control(self.lambda_def())
    }

    fn time_to_control(&self, lambda: f64) -> f64 {
        self.time_to_control_veto
            * std::f64::consts::LN_10
            * (3f64.sqrt() * self.tti_sigma / PI + 1.0 / lambda)
    }

    /// Upper bound on race model integration steps
    pub fn max_integration_steps(&self) -> usize {
        (self.max_int_time / self.int_dt).ceil() as usize
    }

    /// Range checks only; parameters are independent of each other apart
    /// from the integration step fitting in the horizon.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_player_speed", self.max_player_speed),
            ("average_ball_speed", self.average_ball_speed),
            ("tti_sigma", self.tti_sigma),
            ("kappa_def", self.kappa_def),
            ("lambda_att", self.lambda_att),
            ("lambda_gk_multiplier", self.lambda_gk_multiplier),
            ("time_to_control_veto", self.time_to_control_veto),
            ("int_dt", self.int_dt),
            ("max_int_time", self.max_int_time),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PitchControlError::InvalidParameter(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if !(self.reaction_time.is_finite() && self.reaction_time >= 0.0) {
            return Err(PitchControlError::InvalidParameter(format!(
                "reaction_time must be >= 0, got {}",
                self.reaction_time
            )));
        }
        if !(self.model_converge_tol > 0.0 && self.model_converge_tol < 1.0) {
            return Err(PitchControlError::InvalidParameter(format!(
                "model_converge_tol must be in (0, 1), got {}",
                self.model_converge_tol
            )));
        }
        if self.int_dt > self.max_int_time {
            return Err(PitchControlError::InvalidParameter(format!(
                "int_dt ({}) must not exceed max_int_time ({})",
                self.int_dt, self.max_int_time
            )));
        }
        Ok(())
    }
}

// ========== Tests ==========
