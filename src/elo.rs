use std::collections::HashMap;

use crate::config::ELO_BASE;
use crate::league::{MatchRecord, TeamId};

#[derive(Debug, Clone, Copy)]
pub struct EloConfig {
    pub k: f64,
    /// Home advantage in rating points, applied to the expected score only.
    pub home_adv_pts: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k: 20.0,
            home_adv_pts: 60.0,
        }
    }
}

/// Replays the league history in order and returns each team's final rating.
/// Unseen teams sit at the 1500 baseline.
pub fn compute_elo(matches: &[MatchRecord], cfg: EloConfig) -> HashMap<TeamId, f64> {
    let mut elo: HashMap<TeamId, f64> = HashMap::new();
    for m in matches {
        let eh = *elo.entry(m.home_team_id).or_insert(ELO_BASE);
        let ea = *elo.entry(m.away_team_id).or_insert(ELO_BASE);

        let expected_home = expected_score(eh + cfg.home_adv_pts, ea);
        let s_home = if m.goals_home > m.goals_away {
            1.0
        } else if m.goals_home < m.goals_away {
            0.0
        } else {
            0.5
        };

        let delta = cfg.k * (s_home - expected_home);
        elo.insert(m.home_team_id, eh + delta);
        elo.insert(m.away_team_id, ea - delta);
    }
    elo
}

/// Rating differential (home minus away) for one fixture.
pub fn rating_delta(ratings: &HashMap<TeamId, f64>, home: TeamId, away: TeamId) -> f64 {
    let eh = ratings.get(&home).copied().unwrap_or(ELO_BASE);
    let ea = ratings.get(&away).copied().unwrap_or(ELO_BASE);
    eh - ea
}

fn expected_score(r_a: f64, r_b: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf(-(r_a - r_b) / 400.0))
}
