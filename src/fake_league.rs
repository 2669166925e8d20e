//! Deterministic synthetic league feed for tests, benches and the demo
//! binary. Teams get a hidden quality level; a double round-robin season is
//! simulated from it, and standings are derived from the results. No network,
//! no files.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};

use crate::league::{LeagueData, MatchRecord, StandingsEntry, TeamId};

const CLUB_NAMES: [&str; 20] = [
    "Harbour City",
    "Oakfield United",
    "Redbrook Rovers",
    "Stonegate FC",
    "Millhaven Town",
    "Ashworth Athletic",
    "Northgate Wanderers",
    "Silverdale FC",
    "Brackenford City",
    "Eastmoor United",
    "Westcliff Albion",
    "Thornbury FC",
    "Greystone Rangers",
    "Larkfield Town",
    "Fenwick Athletic",
    "Duncastle FC",
    "Holloway Park",
    "Kingsmere United",
    "Wrenfield Rovers",
    "Saltmarsh Town",
];

/// Builds a full synthetic league: `team_count` clubs (at most 20), one
/// double round-robin of simulated results and a standings table. The same
/// seed always yields the same league.
pub fn synthetic_league(team_count: usize, seed: u64) -> LeagueData {
    let team_count = team_count.clamp(2, CLUB_NAMES.len());
    let mut rng = StdRng::seed_from_u64(seed);

    let teams: Vec<(TeamId, String)> = (0..team_count)
        .map(|i| (TeamId(i as u32 + 1), CLUB_NAMES[i].to_string()))
        .collect();

    // Hidden quality: best club ~1.35, worst ~0.65, with a little jitter so
    // the table is not a foregone conclusion.
    let quality: Vec<f64> = (0..team_count)
        .map(|i| {
            let base = 1.35 - 0.7 * (i as f64 / (team_count - 1) as f64);
            base + rng.gen_range(-0.05..0.05)
        })
        .collect();

    let mut matches = Vec::new();
    let mut date = NaiveDate::from_ymd_opt(2025, 8, 2).expect("valid kickoff date");
    for round in 0..2 {
        for h in 0..team_count {
            for a in 0..team_count {
                if h == a || (round == 0) != (h < a) {
                    continue;
                }
                matches.push(play(&mut rng, &teams, &quality, h, a, date));
            }
            date = date + Duration::days(7);
        }
    }

    let standings = table_from_results(&teams, &matches);
    LeagueData::new("2025/2026", teams, matches, standings)
}

fn play(
    rng: &mut StdRng,
    teams: &[(TeamId, String)],
    quality: &[f64],
    h: usize,
    a: usize,
    date: NaiveDate,
) -> MatchRecord {
    let lambda_home = (1.5 * quality[h] / quality[a] * 1.1).clamp(0.2, 4.0);
    let lambda_away = (1.1 * quality[a] / quality[h]).clamp(0.2, 4.0);
    let goals_home = draw_goals(rng, lambda_home);
    let goals_away = draw_goals(rng, lambda_away);

    // Shot and corner counts loosely track the scoreline.
    let shots_home = goals_home * 3 + rng.gen_range(4..12);
    let shots_away = goals_away * 3 + rng.gen_range(4..12);
    MatchRecord {
        date,
        home_team_id: teams[h].0,
        away_team_id: teams[a].0,
        goals_home,
        goals_away,
        shots_home: Some(shots_home),
        shots_away: Some(shots_away),
        corners_home: Some(rng.gen_range(1..10)),
        corners_away: Some(rng.gen_range(1..10)),
    }
}

fn draw_goals(rng: &mut StdRng, lambda: f64) -> u32 {
    let dist = Poisson::new(lambda).expect("lambda is clamped positive");
    (dist.sample(rng) as u32).min(8)
}

fn table_from_results(teams: &[(TeamId, String)], matches: &[MatchRecord]) -> Vec<StandingsEntry> {
    let mut points: HashMap<TeamId, (u32, i64)> = teams.iter().map(|(id, _)| (*id, (0, 0))).collect();
    for m in matches {
        let diff = i64::from(m.goals_home) - i64::from(m.goals_away);
        let (home_pts, away_pts) = if diff > 0 {
            (3, 0)
        } else if diff < 0 {
            (0, 3)
        } else {
            (1, 1)
        };
        if let Some(e) = points.get_mut(&m.home_team_id) {
            e.0 += home_pts;
            e.1 += diff;
        }
        if let Some(e) = points.get_mut(&m.away_team_id) {
            e.0 += away_pts;
            e.1 -= diff;
        }
    }

    let mut order: Vec<(TeamId, (u32, i64))> = points.into_iter().collect();
    // points, then goal difference, then id for a stable table
    order.sort_by(|(id_a, (pts_a, gd_a)), (id_b, (pts_b, gd_b))| {
        pts_b.cmp(pts_a).then(gd_b.cmp(gd_a)).then(id_a.cmp(id_b))
    });

    order
        .into_iter()
        .enumerate()
        .map(|(i, (team_id, _))| StandingsEntry {
            team_id,
            rank: i as u32 + 1,
            season: "2025/2026".to_string(),
        })
        .collect()
}
