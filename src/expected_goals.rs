use log::warn;
use serde::Serialize;

use crate::config::{MAX_LAMBDA, MIN_LAMBDA, SimConfig};
use crate::league::LeagueBaselines;
use crate::strength::StrengthPair;

/// Poisson intensities for one fixture. Always finite and inside
/// `[MIN_LAMBDA, MAX_LAMBDA]` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedGoals {
    pub lambda_home: f64,
    pub lambda_away: f64,
}

/// Pure, deterministic derivation: the league baseline scaled by the side's
/// composite strength, with the fixed home-advantage multiplier applied to
/// the home side only.
pub fn expected_goals(
    strength: StrengthPair,
    baselines: LeagueBaselines,
    cfg: &SimConfig,
) -> ExpectedGoals {
    let lambda_home = clip_lambda(
        "lambda_home",
        baselines.avg_home_goals * strength.home * cfg.home_advantage,
        baselines.avg_home_goals,
    );
    let lambda_away = clip_lambda(
        "lambda_away",
        baselines.avg_away_goals * strength.away,
        baselines.avg_away_goals,
    );
    ExpectedGoals {
        lambda_home,
        lambda_away,
    }
}

/// Non-finite values are a recoverable anomaly: fall back to the league
/// baseline and log, rather than poisoning the sampler.
fn clip_lambda(name: &str, value: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        warn!("{name} computed as {value}, falling back to baseline {fallback}");
        return fallback.clamp(MIN_LAMBDA, MAX_LAMBDA);
    }
    value.clamp(MIN_LAMBDA, MAX_LAMBDA)
}
