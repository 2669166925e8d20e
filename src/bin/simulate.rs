use matchcast::config::SimConfig;
use matchcast::engine::MatchEngine;
use matchcast::fake_league::synthetic_league;

// This binary is intentionally simple: it builds a synthetic league, runs
// one fixture through the engine and prints the model output. It avoids
// network calls and is meant for quick manual tuning iterations.
fn main() -> anyhow::Result<()> {
    let seed = std::env::var("SIM_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(42);

    let league = synthetic_league(18, seed);
    let mut args = std::env::args().skip(1);
    let home = args.next().unwrap_or_else(|| "Harbour City".to_string());
    let away = args.next().unwrap_or_else(|| "Kingsmere United".to_string());

    let engine = MatchEngine::new(SimConfig {
        random_seed: Some(seed),
        ..SimConfig::default()
    })?;
    let result = engine.predict_by_name(&league, &home, &away)?;

    let home_name = league.team_name(result.home).unwrap_or(&home);
    let away_name = league.team_name(result.away).unwrap_or(&away);
    println!("{home_name} vs {away_name} (seed {seed})");
    println!(
        "Score: {}-{} (avg {:.2}-{:.2})",
        result.score_rounded.0, result.score_rounded.1, result.score_raw.0, result.score_raw.1
    );
    println!("Home: {:.1}%", result.p_home * 100.0);
    println!("Draw: {:.1}%", result.p_draw * 100.0);
    println!("Away: {:.1}%", result.p_away * 100.0);
    println!(
        "Possession: {:.0}% / {:.0}%",
        result.possession_home, result.possession_away
    );
    println!(
        "Model: lambda=({:.2}, {:.2}) elo_delta={:+.0} ranks={:?}/{:?}",
        result.breakdown.expected.lambda_home,
        result.breakdown.expected.lambda_away,
        result.breakdown.home_elo_delta,
        result.breakdown.home_rank,
        result.breakdown.away_rank,
    );
    Ok(())
}
