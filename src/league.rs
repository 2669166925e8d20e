use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_GOALS_BASELINE;
use crate::error::{EngineError, Result};

/// Opaque team identity, resolved once at the data-collaborator boundary.
/// The core never reasons about free-form names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team#{}", self.0)
    }
}

/// One finished match as delivered by the data feed. Shots and corners are
/// optional because older CSV seasons omit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub goals_home: u32,
    pub goals_away: u32,
    pub shots_home: Option<u32>,
    pub shots_away: Option<u32>,
    pub corners_home: Option<u32>,
    pub corners_away: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub team_id: TeamId,
    /// 1-based position in the table, unique within a season.
    pub rank: u32,
    pub season: String,
}

/// League-average goals per side, fitted from history with outlier clipping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LeagueBaselines {
    pub avg_home_goals: f64,
    pub avg_away_goals: f64,
}

impl LeagueBaselines {
    pub fn overall_avg(&self) -> f64 {
        (self.avg_home_goals + self.avg_away_goals) / 2.0
    }
}

impl Default for LeagueBaselines {
    fn default() -> Self {
        Self {
            avg_home_goals: DEFAULT_GOALS_BASELINE,
            avg_away_goals: DEFAULT_GOALS_BASELINE,
        }
    }
}

/// In-memory feed of one league: chronological match history, the current
/// standings table and a normalized name lookup. This is the whole surface
/// the prediction pipeline consumes; fetching and caching live elsewhere.
#[derive(Debug, Clone)]
pub struct LeagueData {
    season: String,
    matches: Vec<MatchRecord>,
    standings: HashMap<TeamId, StandingsEntry>,
    names: HashMap<TeamId, String>,
    lookup: HashMap<String, TeamId>,
    baselines: LeagueBaselines,
}

impl LeagueData {
    pub fn new(
        season: impl Into<String>,
        teams: Vec<(TeamId, String)>,
        mut matches: Vec<MatchRecord>,
        standings: Vec<StandingsEntry>,
    ) -> Self {
        matches.sort_by(|a, b| a.date.cmp(&b.date));
        let baselines = fit_baselines(&matches);

        let mut names = HashMap::new();
        let mut lookup = HashMap::new();
        for (id, name) in teams {
            lookup.insert(normalize_name(&name), id);
            names.insert(id, name);
        }

        Self {
            season: season.into(),
            matches,
            standings: standings.into_iter().map(|s| (s.team_id, s)).collect(),
            names,
            lookup,
            baselines,
        }
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn baselines(&self) -> LeagueBaselines {
        self.baselines
    }

    pub fn table_size(&self) -> u32 {
        self.standings.len() as u32
    }

    pub fn team_name(&self, team: TeamId) -> Option<&str> {
        self.names.get(&team).map(String::as_str)
    }

    /// Case- and punctuation-insensitive name lookup.
    pub fn resolve_team(&self, name: &str) -> Option<TeamId> {
        self.lookup.get(&normalize_name(name)).copied()
    }

    /// Fails with `InsufficientData` when the name maps to nothing; callers
    /// must not silently default past an unresolvable identity.
    pub fn require_team(&self, name: &str) -> Result<TeamId> {
        self.resolve_team(name)
            .ok_or_else(|| EngineError::InsufficientData(format!("unknown team `{name}`")))
    }

    pub fn is_known(&self, team: TeamId) -> bool {
        self.names.contains_key(&team)
    }

    /// Last `limit` finished matches involving `team`, oldest first.
    pub fn recent_matches(&self, team: TeamId, limit: usize) -> Vec<&MatchRecord> {
        let mut recent: Vec<&MatchRecord> = self
            .matches
            .iter()
            .rev()
            .filter(|m| m.home_team_id == team || m.away_team_id == team)
            .take(limit)
            .collect();
        recent.reverse();
        recent
    }

    pub fn standing(&self, team: TeamId) -> Option<&StandingsEntry> {
        self.standings.get(&team)
    }
}

/// Lowercase, strip dots, fold dashes to spaces, spell out ampersands.
/// "Brighton & Hove Albion" and "brighton and hove albion" must collide.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        match ch {
            '.' => {}
            '-' => out.push(' '),
            '&' => out.push_str("and"),
            c => out.extend(c.to_lowercase()),
        }
    }
    // collapse whitespace runs left by the folding above
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Mean goals per side with individual scores clipped to 0..=6 so a single
/// freak result cannot drag the baseline. Falls back to the global default
/// when there is no history.
fn fit_baselines(matches: &[MatchRecord]) -> LeagueBaselines {
    if matches.is_empty() {
        return LeagueBaselines::default();
    }
    let n = matches.len() as f64;
    let (mut home_sum, mut away_sum) = (0.0, 0.0);
    for m in matches {
        home_sum += f64::from(m.goals_home.min(6));
        away_sum += f64::from(m.goals_away.min(6));
    }
    LeagueBaselines {
        avg_home_goals: (home_sum / n).max(0.1),
        avg_away_goals: (away_sum / n).max(0.1),
    }
}
