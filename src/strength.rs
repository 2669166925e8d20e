use serde::Serialize;

use crate::config::{MIN_STRENGTH, SimConfig};
use crate::form::TeamForm;
use crate::league::TeamId;

/// Everything the strength/expected-goals stages need for one fixture.
/// Built per request and dropped when the prediction is done.
#[derive(Debug, Clone)]
pub struct FixtureContext {
    pub home: TeamId,
    pub away: TeamId,
    pub home_form: TeamForm,
    pub away_form: TeamForm,
    pub home_rank: Option<u32>,
    pub away_rank: Option<u32>,
    pub league_size: u32,
    /// Elo rating differential, home minus away.
    pub home_elo_delta: f64,
}

/// Composite multiplicative strength per side, with the individual factors
/// kept around for the prediction breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrengthPair {
    pub home: f64,
    pub away: f64,
    pub rank_weight_home: f64,
    pub rank_weight_away: f64,
    pub elo_weight_home: f64,
    pub elo_weight_away: f64,
}

/// `strength = (attack_ema / opp_defense_ema) * rank_weight * elo_weight`,
/// clamped away from zero so downstream intensities stay positive.
pub fn resolve_strength(ctx: &FixtureContext, cfg: &SimConfig) -> StrengthPair {
    let rank_weight_home = rank_weight(ctx.home_rank, ctx.league_size, cfg);
    let rank_weight_away = rank_weight(ctx.away_rank, ctx.league_size, cfg);
    let elo_weight_home = elo_weight(ctx.home_elo_delta, cfg);
    let elo_weight_away = elo_weight(-ctx.home_elo_delta, cfg);

    let home = (ctx.home_form.attack_ema / ctx.away_form.defense_ema.max(1e-3))
        * rank_weight_home
        * elo_weight_home;
    let away = (ctx.away_form.attack_ema / ctx.home_form.defense_ema.max(1e-3))
        * rank_weight_away
        * elo_weight_away;

    StrengthPair {
        home: home.max(MIN_STRENGTH),
        away: away.max(MIN_STRENGTH),
        rank_weight_home,
        rank_weight_away,
        elo_weight_home,
        elo_weight_away,
    }
}

/// Linear in table position: rank 1 gets the upper bound, the bottom rank
/// the lower bound. No standing (cup sides, promoted teams before round 1)
/// is neutral.
pub fn rank_weight(rank: Option<u32>, league_size: u32, cfg: &SimConfig) -> f64 {
    let Some(rank) = rank else {
        return 1.0;
    };
    if league_size <= 1 {
        return 1.0;
    }
    let span = cfg.rank_weight_max - cfg.rank_weight_min;
    let frac = f64::from(rank.saturating_sub(1)) / f64::from(league_size - 1);
    (cfg.rank_weight_max - span * frac).clamp(cfg.rank_weight_min, cfg.rank_weight_max)
}

/// Logistic expectation of the rating gap, recentered around 1.0:
/// `1 + k * (logistic(diff / scale) - 0.5)`. A 0 diff is exactly neutral
/// and the weight stays inside `[1 - k/2, 1 + k/2]`.
pub fn elo_weight(elo_diff: f64, cfg: &SimConfig) -> f64 {
    1.0 + cfg.elo_sensitivity * (logistic(elo_diff / cfg.elo_scale) - 0.5)
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(team: u32, attack: f64, defense: f64) -> TeamForm {
        TeamForm {
            team_id: TeamId(team),
            attack_ema: attack,
            defense_ema: defense,
        }
    }

    fn ctx() -> FixtureContext {
        FixtureContext {
            home: TeamId(1),
            away: TeamId(2),
            home_form: form(1, 1.0, 1.0),
            away_form: form(2, 1.0, 1.0),
            home_rank: None,
            away_rank: None,
            league_size: 20,
            home_elo_delta: 0.0,
        }
    }

    #[test]
    fn rank_weight_is_monotone_and_bounded() {
        let cfg = SimConfig::default();
        let top = rank_weight(Some(1), 20, &cfg);
        let mid = rank_weight(Some(10), 20, &cfg);
        let bottom = rank_weight(Some(20), 20, &cfg);
        assert!(top > 1.0 && top <= 1.3);
        assert!(bottom < 1.0 && bottom >= 0.7);
        assert!(top > mid && mid > bottom);
        assert!((rank_weight(None, 20, &cfg) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn elo_weight_is_symmetric_around_neutral() {
        let cfg = SimConfig::default();
        assert!((elo_weight(0.0, &cfg) - 1.0).abs() < 1e-12);
        let up = elo_weight(200.0, &cfg);
        let down = elo_weight(-200.0, &cfg);
        assert!(up > 1.0 && down < 1.0);
        assert!(((up - 1.0) + (down - 1.0)).abs() < 1e-12);
        // bounded by the sensitivity constant
        assert!(elo_weight(1e6, &cfg) <= 1.0 + cfg.elo_sensitivity / 2.0 + 1e-12);
    }

    #[test]
    fn neutral_fixture_has_equal_strengths() {
        let cfg = SimConfig::default();
        let s = resolve_strength(&ctx(), &cfg);
        assert!((s.home - s.away).abs() < 1e-12);
        assert!((s.home - 1.0).abs() < 1e-12);
    }

    #[test]
    fn better_attack_means_more_strength() {
        let cfg = SimConfig::default();
        let mut c = ctx();
        c.home_form.attack_ema = 1.4;
        let s = resolve_strength(&c, &cfg);
        assert!(s.home > s.away);
    }

    #[test]
    fn strength_is_floored_for_degenerate_inputs() {
        let cfg = SimConfig::default();
        let mut c = ctx();
        c.home_form.attack_ema = 1e-9;
        c.away_form.defense_ema = 100.0;
        let s = resolve_strength(&c, &cfg);
        assert!(s.home >= MIN_STRENGTH);
    }
}
