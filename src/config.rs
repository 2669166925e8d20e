use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Rating used when a team has no usable history (league-average form).
pub const DEFAULT_FORM_RATING: f64 = 1.0;
/// Floor for EMA ratings so they stay usable as divisors.
pub const MIN_FORM_RATING: f64 = 0.1;
/// Floor for composite strength factors.
pub const MIN_STRENGTH: f64 = 0.05;
/// Expected-goals clip range; the cap keeps pathological Elo/rank inputs
/// from blowing up simulation variance.
pub const MIN_LAMBDA: f64 = 0.05;
pub const MAX_LAMBDA: f64 = 10.0;
/// League-average goals per side used until real history overrides it.
pub const DEFAULT_GOALS_BASELINE: f64 = 1.4;
/// Corners count less than shots when proxying attacking volume.
pub const CORNER_WEIGHT: f64 = 0.8;
/// Possession share clamp, in percent.
pub const POSSESSION_FLOOR: f64 = 20.0;
pub const POSSESSION_CEIL: f64 = 80.0;
/// Starting Elo rating for unseen teams.
pub const ELO_BASE: f64 = 1500.0;

/// Tunables consumed (not owned) by the prediction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Sliding window of recent matches feeding the form EMA.
    pub ema_window: usize,
    /// EMA smoothing factor, must be in (0, 1).
    pub ema_alpha: f64,
    /// Monte Carlo iteration count.
    pub iterations: usize,
    /// Shared-component correlation strength kappa, in [0, 1).
    pub correlation: f64,
    /// Multiplicative home-side boost, >= 1.
    pub home_advantage: f64,
    /// Rank weight bounds: rank 1 maps to `rank_weight_max`, bottom rank
    /// to `rank_weight_min`.
    pub rank_weight_min: f64,
    pub rank_weight_max: f64,
    /// Conventional rating-difference normalization.
    pub elo_scale: f64,
    /// Sensitivity of the logistic Elo weight.
    pub elo_sensitivity: f64,
    /// Explicit seed for reproducible runs; `None` seeds from entropy.
    pub random_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ema_window: 10,
            ema_alpha: 0.3,
            iterations: 6000,
            correlation: 0.15,
            home_advantage: 1.15,
            rank_weight_min: 0.7,
            rank_weight_max: 1.3,
            elo_scale: 400.0,
            elo_sensitivity: 0.3,
            random_seed: None,
        }
    }
}

impl SimConfig {
    /// Rejects out-of-range tunables before any pipeline stage runs.
    pub fn validate(&self) -> Result<()> {
        if self.ema_window == 0 {
            return Err(invalid("ema_window", "must be at least 1"));
        }
        if !(self.ema_alpha > 0.0 && self.ema_alpha < 1.0) {
            return Err(invalid("ema_alpha", "must be in (0, 1)"));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations", "must be positive"));
        }
        if !(0.0..1.0).contains(&self.correlation) {
            return Err(invalid("correlation", "must be in [0, 1)"));
        }
        if !self.home_advantage.is_finite() || self.home_advantage < 1.0 {
            return Err(invalid("home_advantage", "must be >= 1"));
        }
        if !(self.rank_weight_min > 0.0 && self.rank_weight_min <= 1.0) {
            return Err(invalid("rank_weight_min", "must be in (0, 1]"));
        }
        if !(self.rank_weight_max >= 1.0 && self.rank_weight_max.is_finite()) {
            return Err(invalid("rank_weight_max", "must be >= 1"));
        }
        if !(self.elo_scale > 0.0 && self.elo_scale.is_finite()) {
            return Err(invalid("elo_scale", "must be positive"));
        }
        if !(self.elo_sensitivity >= 0.0 && self.elo_sensitivity.is_finite()) {
            return Err(invalid("elo_sensitivity", "must be non-negative"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &str) -> EngineError {
    EngineError::InvalidParameter {
        name,
        reason: reason.to_string(),
    }
}
