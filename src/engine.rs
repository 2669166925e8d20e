use log::debug;
use serde::Serialize;

use crate::aggregate::{attacking_volume, possession_split, summarize};
use crate::config::SimConfig;
use crate::elo::{EloConfig, compute_elo, rating_delta};
use crate::error::{EngineError, Result};
use crate::expected_goals::{ExpectedGoals, expected_goals};
use crate::form::{TeamForm, estimate_form};
use crate::league::{LeagueData, TeamId};
use crate::sampler::sample_scores;
use crate::strength::{FixtureContext, StrengthPair, resolve_strength};

/// Model internals exposed alongside the aggregates so presentation layers
/// can explain a prediction (and so an entropy-seeded run can be replayed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionBreakdown {
    pub expected: ExpectedGoals,
    pub strength: StrengthPair,
    pub home_form: TeamForm,
    pub away_form: TeamForm,
    pub home_rank: Option<u32>,
    pub away_rank: Option<u32>,
    pub home_elo_delta: f64,
    pub kappa: f64,
    pub seed: u64,
}

/// Final prediction for one fixture. Either the whole pipeline succeeds and
/// produces this, or the request fails; there is no partial result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub home: TeamId,
    pub away: TeamId,
    pub score_raw: (f64, f64),
    pub score_rounded: (u32, u32),
    pub p_home: f64,
    pub p_draw: f64,
    pub p_away: f64,
    pub possession_home: f64,
    pub possession_away: f64,
    pub breakdown: PredictionBreakdown,
}

/// Synchronous prediction pipeline: form -> strength -> expected goals ->
/// correlated sampling -> aggregation. Holds only validated configuration;
/// all match data arrives per call through `LeagueData`.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    cfg: SimConfig,
}

impl MatchEngine {
    pub fn new(cfg: SimConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn with_defaults() -> Self {
        Self {
            cfg: SimConfig::default(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// Resolves free-form team names at the boundary, then predicts.
    pub fn predict_by_name(
        &self,
        league: &LeagueData,
        home: &str,
        away: &str,
    ) -> Result<PredictionResult> {
        let home = league.require_team(home)?;
        let away = league.require_team(away)?;
        self.predict(league, home, away)
    }

    pub fn predict(
        &self,
        league: &LeagueData,
        home: TeamId,
        away: TeamId,
    ) -> Result<PredictionResult> {
        if home == away {
            return Err(EngineError::InvalidParameter {
                name: "fixture",
                reason: format!("{home} cannot play itself"),
            });
        }
        for team in [home, away] {
            if !league.is_known(team) {
                return Err(EngineError::InsufficientData(format!(
                    "{team} is not part of this league feed"
                )));
            }
        }

        let baselines = league.baselines();
        let recent_home = league.recent_matches(home, self.cfg.ema_window);
        let recent_away = league.recent_matches(away, self.cfg.ema_window);

        let ctx = FixtureContext {
            home,
            away,
            home_form: estimate_form(home, &recent_home, baselines, &self.cfg),
            away_form: estimate_form(away, &recent_away, baselines, &self.cfg),
            home_rank: league.standing(home).map(|s| s.rank),
            away_rank: league.standing(away).map(|s| s.rank),
            league_size: league.table_size(),
            home_elo_delta: rating_delta(
                &compute_elo(league.matches(), EloConfig::default()),
                home,
                away,
            ),
        };

        let strength = resolve_strength(&ctx, &self.cfg);
        let expected = expected_goals(strength, baselines, &self.cfg);
        debug!(
            "{home} vs {away}: lambda=({:.3}, {:.3}) strength=({:.3}, {:.3}) elo_delta={:.1}",
            expected.lambda_home,
            expected.lambda_away,
            strength.home,
            strength.away,
            ctx.home_elo_delta
        );

        let seed = self.cfg.random_seed.unwrap_or_else(rand::random::<u64>);
        let samples = sample_scores(expected, self.cfg.correlation, self.cfg.iterations, seed)?;
        let outcome = summarize(&samples);

        let (possession_home, possession_away) = possession_split(
            attacking_volume(home, &recent_home),
            attacking_volume(away, &recent_away),
        );

        Ok(PredictionResult {
            home,
            away,
            score_raw: outcome.score_raw,
            score_rounded: outcome.score_rounded,
            p_home: outcome.p_home,
            p_draw: outcome.p_draw,
            p_away: outcome.p_away,
            possession_home,
            possession_away,
            breakdown: PredictionBreakdown {
                expected,
                strength,
                home_form: ctx.home_form,
                away_form: ctx.away_form,
                home_rank: ctx.home_rank,
                away_rank: ctx.away_rank,
                home_elo_delta: ctx.home_elo_delta,
                kappa: self.cfg.correlation,
                seed,
            },
        })
    }
}
