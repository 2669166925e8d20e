use serde::Serialize;

use crate::config::{CORNER_WEIGHT, POSSESSION_CEIL, POSSESSION_FLOOR};
use crate::league::{MatchRecord, TeamId};
use crate::sampler::ScoreSample;

/// Reduction of one simulation run: average scorelines plus outcome shares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeSummary {
    pub score_raw: (f64, f64),
    pub score_rounded: (u32, u32),
    pub p_home: f64,
    pub p_draw: f64,
    pub p_away: f64,
}

/// Reduces the sample set. The three outcome fractions partition the
/// samples; the away share is derived as the complement of the other two so
/// `p_home + p_draw + p_away` sums to exactly 1.0, not merely within an ulp.
pub fn summarize(samples: &[ScoreSample]) -> OutcomeSummary {
    if samples.is_empty() {
        return OutcomeSummary {
            score_raw: (0.0, 0.0),
            score_rounded: (0, 0),
            p_home: 0.0,
            p_draw: 1.0,
            p_away: 0.0,
        };
    }

    let n = samples.len() as f64;
    let mut sum_home = 0u64;
    let mut sum_away = 0u64;
    let mut wins_home = 0usize;
    let mut draws = 0usize;
    for s in samples {
        sum_home += u64::from(s.home);
        sum_away += u64::from(s.away);
        if s.home > s.away {
            wins_home += 1;
        } else if s.home == s.away {
            draws += 1;
        }
    }

    let mean_home = sum_home as f64 / n;
    let mean_away = sum_away as f64 / n;
    let p_home = wins_home as f64 / n;
    let p_draw = draws as f64 / n;

    OutcomeSummary {
        score_raw: (mean_home, mean_away),
        // f64::round is half-away-from-zero, which is half-up for the
        // non-negative means we have here.
        score_rounded: (mean_home.round() as u32, mean_away.round() as u32),
        p_home,
        p_draw,
        p_away: 1.0 - (p_home + p_draw),
    }
}

/// Average attacking volume (shots plus down-weighted corners) per recent
/// match, read from whichever side of each record the team played.
pub fn attacking_volume(team: TeamId, recent: &[&MatchRecord]) -> f64 {
    if recent.is_empty() {
        return 0.0;
    }
    let total: f64 = recent
        .iter()
        .map(|m| {
            let (shots, corners) = if m.home_team_id == team {
                (m.shots_home, m.corners_home)
            } else {
                (m.shots_away, m.corners_away)
            };
            f64::from(shots.unwrap_or(0)) + CORNER_WEIGHT * f64::from(corners.unwrap_or(0))
        })
        .sum();
    total / recent.len() as f64
}

/// Possession split in percent from the two sides' attacking volumes,
/// clamped so sparse shot data never produces an all-or-nothing split.
/// No volume on either side is an even 50/50, not a division by zero.
pub fn possession_split(home_volume: f64, away_volume: f64) -> (f64, f64) {
    let total = home_volume + away_volume;
    if total <= 0.0 {
        return (50.0, 50.0);
    }
    let home = (home_volume / total * 100.0).clamp(POSSESSION_FLOOR, POSSESSION_CEIL);
    (home, 100.0 - home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(home: u32, away: u32) -> ScoreSample {
        ScoreSample { home, away }
    }

    #[test]
    fn outcome_fractions_partition_exactly() {
        let samples = vec![sample(2, 0), sample(1, 1), sample(0, 3), sample(2, 1)];
        let s = summarize(&samples);
        assert!((s.p_home - 0.5).abs() < 1e-12);
        assert!((s.p_draw - 0.25).abs() < 1e-12);
        assert!((s.p_away - 0.25).abs() < 1e-12);
        assert_eq!(s.p_home + s.p_draw + s.p_away, 1.0);
    }

    #[test]
    fn partition_is_exact_for_awkward_sample_counts() {
        // 3 outcomes over 7 samples: 1/7 + 2/7 + 4/7 does not sum to 1.0
        // in floating point unless one share is derived as the complement.
        let samples = vec![
            sample(1, 0),
            sample(0, 1),
            sample(0, 2),
            sample(1, 1),
            sample(2, 2),
            sample(0, 4),
            sample(1, 3),
        ];
        let s = summarize(&samples);
        assert_eq!(s.p_home + s.p_draw + s.p_away, 1.0);
    }

    #[test]
    fn score_rounding_is_half_up() {
        let samples = vec![sample(1, 0), sample(2, 1)];
        let s = summarize(&samples);
        assert!((s.score_raw.0 - 1.5).abs() < 1e-12);
        assert_eq!(s.score_rounded, (2, 1));
    }

    #[test]
    fn possession_defaults_to_even_split_without_data() {
        assert_eq!(possession_split(0.0, 0.0), (50.0, 50.0));
    }

    #[test]
    fn possession_is_clamped() {
        let (home, away) = possession_split(100.0, 1.0);
        assert!((home - 80.0).abs() < 1e-12);
        assert!((away - 20.0).abs() < 1e-12);
        assert!((home + away - 100.0).abs() < 1e-12);
    }

    #[test]
    fn attacking_volume_reads_the_right_side() {
        let (a, b) = (TeamId(1), TeamId(2));
        let m = MatchRecord {
            date: NaiveDate::from_ymd_opt(2025, 10, 4).unwrap(),
            home_team_id: a,
            away_team_id: b,
            goals_home: 1,
            goals_away: 0,
            shots_home: Some(10),
            shots_away: Some(4),
            corners_home: Some(5),
            corners_away: Some(2),
        };
        let va = attacking_volume(a, &[&m]);
        let vb = attacking_volume(b, &[&m]);
        assert!((va - (10.0 + 0.8 * 5.0)).abs() < 1e-12);
        assert!((vb - (4.0 + 0.8 * 2.0)).abs() < 1e-12);
        assert_eq!(attacking_volume(a, &[]), 0.0);
    }
}
