use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Poisson};
use rayon::prelude::*;

use crate::error::{EngineError, Result};
use crate::expected_goals::ExpectedGoals;

/// One Monte Carlo scoreline draw; discarded after aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSample {
    pub home: u32,
    pub away: u32,
}

/// Draws are generated in fixed-size batches so rayon can spread them over
/// workers while the output stays bit-identical for a given seed: each batch
/// derives its own rng seed from the run seed and the batch index, and the
/// batches are concatenated in index order regardless of which worker
/// finished first.
const BATCH_SIZE: usize = 512;

/// Draws `iterations` correlated scoreline samples from a bivariate-Poisson
/// model. Each lambda is split into an independent component and a shared
/// component with mean `kappa * min(lambda_home, lambda_away)`; the shared
/// draw is added to both sides, so marginal expectations are preserved
/// exactly while `kappa` controls the covariance (shared match tempo).
///
/// Intensities out of range are upstream contract violations and surface
/// immediately instead of being repaired here.
pub fn sample_scores(
    xg: ExpectedGoals,
    kappa: f64,
    iterations: usize,
    seed: u64,
) -> Result<Vec<ScoreSample>> {
    validate_lambda("lambda_home", xg.lambda_home)?;
    validate_lambda("lambda_away", xg.lambda_away)?;
    if !(0.0..1.0).contains(&kappa) {
        return Err(EngineError::InvalidParameter {
            name: "correlation",
            reason: format!("kappa {kappa} outside [0, 1)"),
        });
    }
    if iterations == 0 {
        return Err(EngineError::InvalidParameter {
            name: "iterations",
            reason: "must be positive".to_string(),
        });
    }

    let shared_mean = kappa * xg.lambda_home.min(xg.lambda_away);
    let independent_home = poisson_opt("lambda_home", xg.lambda_home - shared_mean)?;
    let independent_away = poisson_opt("lambda_away", xg.lambda_away - shared_mean)?;
    let shared = poisson_opt("shared", shared_mean)?;

    let batches = iterations.div_ceil(BATCH_SIZE);
    let out: Vec<Vec<ScoreSample>> = (0..batches)
        .into_par_iter()
        .map(|batch| {
            let len = BATCH_SIZE.min(iterations - batch * BATCH_SIZE);
            let mut rng = StdRng::seed_from_u64(batch_seed(seed, batch as u64));
            (0..len)
                .map(|_| {
                    let x = draw(&mut rng, independent_home);
                    let y = draw(&mut rng, independent_away);
                    let z = draw(&mut rng, shared);
                    ScoreSample {
                        home: x + z,
                        away: y + z,
                    }
                })
                .collect()
        })
        .collect();

    Ok(out.into_iter().flatten().collect())
}

fn validate_lambda(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::NumericOverflow { name, value });
    }
    Ok(())
}

/// A zero-mean component never fires; rand_distr rejects lambda <= 0, so it
/// is represented as `None` instead.
fn poisson_opt(name: &'static str, mean: f64) -> Result<Option<Poisson<f64>>> {
    if mean <= 1e-12 {
        return Ok(None);
    }
    Poisson::new(mean)
        .map(Some)
        .map_err(|_| EngineError::NumericOverflow { name, value: mean })
}

fn draw(rng: &mut StdRng, dist: Option<Poisson<f64>>) -> u32 {
    dist.map_or(0, |d| d.sample(rng) as u32)
}

/// Splitmix-style per-batch seed derivation; batch 0 does not reuse the run
/// seed verbatim so adjacent runs with seed and seed+1 do not share streams.
fn batch_seed(seed: u64, batch: u64) -> u64 {
    seed.wrapping_add((batch + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
