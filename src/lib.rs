//! Football match outcome prediction from historical results and league
//! standings.
//!
//! The pipeline per fixture: recent-form EMAs and standings feed a composite
//! strength factor per side, strengths become Poisson intensities, a seeded
//! Monte Carlo run draws correlated scorelines from them, and the sample set
//! is reduced into score averages, win/draw/loss probabilities and a
//! possession split.
//!
//! ```
//! use matchcast::config::SimConfig;
//! use matchcast::engine::MatchEngine;
//! use matchcast::fake_league::synthetic_league;
//!
//! let league = synthetic_league(18, 42);
//! let engine = MatchEngine::new(SimConfig {
//!     random_seed: Some(42),
//!     ..SimConfig::default()
//! })
//! .unwrap();
//! let result = engine
//!     .predict_by_name(&league, "Harbour City", "Kingsmere United")
//!     .unwrap();
//! assert!((result.p_home + result.p_draw + result.p_away - 1.0).abs() < 1e-12);
//! ```

pub mod aggregate;
pub mod config;
pub mod elo;
pub mod engine;
pub mod error;
pub mod expected_goals;
pub mod fake_league;
pub mod form;
pub mod league;
pub mod sampler;
pub mod strength;

pub use crate::config::SimConfig;
pub use crate::engine::{MatchEngine, PredictionResult};
pub use crate::error::EngineError;
pub use crate::league::{LeagueData, MatchRecord, StandingsEntry, TeamId};
