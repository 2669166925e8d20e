use matchcast::config::SimConfig;
use matchcast::engine::MatchEngine;
use matchcast::error::EngineError;
use matchcast::expected_goals::ExpectedGoals;
use matchcast::fake_league::synthetic_league;
use matchcast::league::TeamId;
use matchcast::sampler::sample_scores;

fn seeded_engine(seed: u64) -> MatchEngine {
    MatchEngine::new(SimConfig {
        random_seed: Some(seed),
        ..SimConfig::default()
    })
    .expect("default config with a seed is valid")
}

#[test]
fn fixed_seed_gives_bit_identical_predictions() {
    let league = synthetic_league(18, 7);
    let engine = seeded_engine(42);

    let first = engine.predict(&league, TeamId(1), TeamId(18)).unwrap();
    let second = engine.predict(&league, TeamId(1), TeamId(18)).unwrap();
    assert_eq!(first, second);

    // A different seed must change the sampled aggregates.
    let other = seeded_engine(43).predict(&league, TeamId(1), TeamId(18)).unwrap();
    assert_ne!(first.score_raw, other.score_raw);
}

#[test]
fn outcome_probabilities_partition_exactly() {
    let league = synthetic_league(18, 7);
    let result = seeded_engine(42)
        .predict(&league, TeamId(3), TeamId(11))
        .unwrap();
    assert_eq!(result.p_home + result.p_draw + result.p_away, 1.0);
    assert!(result.p_home >= 0.0 && result.p_draw >= 0.0 && result.p_away >= 0.0);
}

#[test]
fn possession_percentages_sum_to_one_hundred() {
    let league = synthetic_league(18, 7);
    let result = seeded_engine(1)
        .predict(&league, TeamId(5), TeamId(9))
        .unwrap();
    assert!((result.possession_home + result.possession_away - 100.0).abs() < 1e-9);
    assert!(result.possession_home >= 20.0 && result.possession_home <= 80.0);
}

#[test]
fn top_club_at_home_is_favored_over_bottom_club() {
    // Team ids are assigned best-to-worst by the generator, so club 1
    // hosts a much weaker club 18.
    let league = synthetic_league(18, 7);
    let result = seeded_engine(42)
        .predict(&league, TeamId(1), TeamId(18))
        .unwrap();
    assert!(
        result.p_home > result.p_away,
        "expected home favourite, got p_home={} p_away={}",
        result.p_home,
        result.p_away
    );
    assert!(result.p_home > 0.45);
}

#[test]
fn unknown_team_name_fails_with_insufficient_data() {
    let league = synthetic_league(10, 7);
    let err = seeded_engine(42)
        .predict_by_name(&league, "Harbour City", "Atlantis FC")
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData(_)));
}

#[test]
fn name_resolution_ignores_case_and_punctuation() {
    let league = synthetic_league(10, 7);
    let engine = seeded_engine(42);
    let a = engine
        .predict_by_name(&league, "Harbour City", "Oakfield United")
        .unwrap();
    let b = engine
        .predict_by_name(&league, "  harbour-city ", "OAKFIELD UNITED")
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn higher_attack_raises_lambda_and_home_win_probability() {
    // Hold everything fixed except the home side's intensity and compare
    // two seeded runs of the sampler directly.
    let n = 6000;
    let weaker = sample_scores(
        ExpectedGoals {
            lambda_home: 1.5,
            lambda_away: 1.0,
        },
        0.15,
        n,
        42,
    )
    .unwrap();
    let stronger = sample_scores(
        ExpectedGoals {
            lambda_home: 2.0,
            lambda_away: 1.0,
        },
        0.15,
        n,
        42,
    )
    .unwrap();

    let p_home = |samples: &[matchcast::sampler::ScoreSample]| {
        samples.iter().filter(|s| s.home > s.away).count() as f64 / samples.len() as f64
    };
    assert!(p_home(&stronger) > p_home(&weaker) + 0.05);
}

#[test]
fn reference_scenario_is_stable_across_runs() {
    // lambda 2.0 / 1.0, N = 6000, seed 42: the exact aggregates are pinned
    // by the seed stream, so two computations must agree bit for bit.
    let xg = ExpectedGoals {
        lambda_home: 2.0,
        lambda_away: 1.0,
    };
    let a = sample_scores(xg, 0.15, 6000, 42).unwrap();
    let b = sample_scores(xg, 0.15, 6000, 42).unwrap();
    assert_eq!(a, b);

    let mean_home = a.iter().map(|s| f64::from(s.home)).sum::<f64>() / 6000.0;
    let mean_away = a.iter().map(|s| f64::from(s.away)).sum::<f64>() / 6000.0;
    assert!((mean_home - 2.0).abs() < 0.1, "home mean {mean_home}");
    assert!((mean_away - 1.0).abs() < 0.1, "away mean {mean_away}");
}

#[test]
fn entropy_seeded_runs_record_their_seed() {
    let league = synthetic_league(10, 7);
    let engine = MatchEngine::with_defaults();
    let result = engine.predict(&league, TeamId(2), TeamId(6)).unwrap();

    // Replaying with the recorded seed reproduces the run.
    let replay = MatchEngine::new(SimConfig {
        random_seed: Some(result.breakdown.seed),
        ..SimConfig::default()
    })
    .unwrap()
    .predict(&league, TeamId(2), TeamId(6))
    .unwrap();
    assert_eq!(result, replay);
}
