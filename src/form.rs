use serde::Serialize;

use crate::config::{DEFAULT_FORM_RATING, MIN_FORM_RATING, SimConfig};
use crate::league::{LeagueBaselines, MatchRecord, TeamId};

/// Smoothed attack/defense strength for one team, recomputed per request
/// from its sliding window of recent matches. Both ratings are strictly
/// positive: ~1.0 is league average, above 1.0 means scoring (attack) or
/// conceding (defense) more than average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TeamForm {
    pub team_id: TeamId,
    pub attack_ema: f64,
    pub defense_ema: f64,
}

/// Exponential moving average seeded with the first observation:
/// `ema = alpha * v + (1 - alpha) * ema`.
pub fn ema(values: &[f64], alpha: f64, default: f64) -> f64 {
    let mut iter = values.iter().copied();
    let Some(seed) = iter.next() else {
        return default;
    };
    iter.fold(seed, |acc, v| alpha * v + (1.0 - alpha) * acc)
}

/// Turns a team's chronological recent matches into attack/defense EMAs.
/// Goals are normalized by the league-average goals-per-side so ratings are
/// comparable across leagues. Empty history degrades to the league-average
/// default rather than failing; an unresolvable identity is an error, but
/// that is caught before this point.
pub fn estimate_form(
    team: TeamId,
    recent: &[&MatchRecord],
    baselines: LeagueBaselines,
    cfg: &SimConfig,
) -> TeamForm {
    let norm = baselines.overall_avg().max(0.1);

    let mut scored = Vec::with_capacity(recent.len());
    let mut conceded = Vec::with_capacity(recent.len());
    for m in recent {
        let (gf, ga) = if m.home_team_id == team {
            (m.goals_home, m.goals_away)
        } else {
            (m.goals_away, m.goals_home)
        };
        scored.push(f64::from(gf) / norm);
        conceded.push(f64::from(ga) / norm);
    }

    TeamForm {
        team_id: team,
        attack_ema: ema(&scored, cfg.ema_alpha, DEFAULT_FORM_RATING).max(MIN_FORM_RATING),
        defense_ema: ema(&conceded, cfg.ema_alpha, DEFAULT_FORM_RATING).max(MIN_FORM_RATING),
    }
}
