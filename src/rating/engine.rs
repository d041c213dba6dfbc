//! TrueSkill rating engine
//!
//! Closed-form Bayesian skill updates for the symmetric two-team,
//! win/lose case, plus win-probability and match-quality estimation
//! under the same Gaussian performance model. The engine is a pure
//! numerical component: no I/O, no mutable state beyond its constant
//! parameters.

use crate::error::MatchmakingError;
use crate::rating::gaussian;
use crate::types::{PlayerId, Rating, Winner};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Constants of the TrueSkill engine
///
/// The defaults follow the canonical parameterization: a mean skill of
/// 25 with an uncertainty of a third of that, a skill-class width of
/// half the initial uncertainty, and a dynamics factor of a hundredth
/// of it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrueSkillConfig {
    /// Mean skill estimate assigned to new players (mu0)
    pub initial_mean: f64,
    /// Uncertainty assigned to new players (sigma0)
    pub initial_uncertainty: f64,
    /// The skill-class width: performance variance per player per match
    pub beta: f64,
    /// Dynamics factor (tau): skill drift allowed between matches
    pub dynamics_factor: f64,
    /// Prior probability that any match ends in a draw, used to derive
    /// the truncation margin
    pub draw_probability: f64,
    /// Lower floor for sigma, guarding the sigma > 0 invariant against
    /// floating-point underflow
    pub uncertainty_tolerance: f64,
}

impl Default for TrueSkillConfig {
    fn default() -> Self {
        let initial_mean = 25.0;
        let initial_uncertainty = initial_mean / 3.0;
        Self {
            initial_mean,
            initial_uncertainty,
            beta: initial_uncertainty / 2.0,
            dynamics_factor: initial_uncertainty / 100.0,
            draw_probability: 0.10,
            uncertainty_tolerance: 0.000_001,
        }
    }
}

impl TrueSkillConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.initial_mean.is_finite() {
            return Err(MatchmakingError::ConfigurationError {
                message: "Initial mean must be finite".to_string(),
            }
            .into());
        }

        if self.initial_uncertainty <= 0.0 {
            return Err(MatchmakingError::ConfigurationError {
                message: "Initial uncertainty must be positive".to_string(),
            }
            .into());
        }

        if self.beta <= 0.0 {
            return Err(MatchmakingError::ConfigurationError {
                message: "Beta must be positive".to_string(),
            }
            .into());
        }

        if self.dynamics_factor < 0.0 {
            return Err(MatchmakingError::ConfigurationError {
                message: "Dynamics factor must be non-negative".to_string(),
            }
            .into());
        }

        if self.draw_probability <= 0.0 || self.draw_probability >= 1.0 {
            return Err(MatchmakingError::ConfigurationError {
                message: "Draw probability must be strictly between 0 and 1".to_string(),
            }
            .into());
        }

        if self.uncertainty_tolerance < 0.0 {
            return Err(MatchmakingError::ConfigurationError {
                message: "Uncertainty tolerance must be non-negative".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// TrueSkill rating engine for two-team matches
#[derive(Debug, Clone)]
pub struct TrueSkillEngine {
    config: TrueSkillConfig,
}

impl TrueSkillEngine {
    /// Create a new engine from a validated configuration
    pub fn new(config: TrueSkillConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Get the rating assigned to newly registered players
    pub fn create_rating(&self) -> Rating {
        Rating {
            mu: self.config.initial_mean,
            sigma: self.config.initial_uncertainty,
        }
    }

    /// Widen a rating's uncertainty to model skill drift over time
    ///
    /// Applied once per elapsed match to every rating before it
    /// participates in an update. Deliberately non-idempotent: each
    /// application strictly increases sigma.
    pub fn apply_dynamics(&self, rating: Rating) -> Rating {
        let tau = self.config.dynamics_factor;
        Rating {
            mu: rating.mu,
            sigma: rating.sigma.hypot(tau),
        }
    }

    /// Bayesian update of both teams' ratings after a decided match
    ///
    /// Returns the replacement ratings for both teams in input order.
    /// Winning players' mu strictly increases, losing players' mu
    /// strictly decreases, and every participant's sigma strictly
    /// decreases.
    ///
    /// Fails with `InvalidInput` if either team is empty or any player
    /// id occurs on both sides.
    pub fn update(
        &self,
        team_one: &[(PlayerId, Rating)],
        team_two: &[(PlayerId, Rating)],
        winner: Winner,
    ) -> crate::error::Result<(Vec<Rating>, Vec<Rating>)> {
        if team_one.is_empty() || team_two.is_empty() {
            return Err(MatchmakingError::InvalidInput {
                reason: "Both teams must have at least one player".to_string(),
            }
            .into());
        }

        let ids_one: HashSet<PlayerId> = team_one.iter().map(|(id, _)| *id).collect();
        let overlap: Vec<PlayerId> = team_two
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| ids_one.contains(id))
            .collect();
        if !overlap.is_empty() {
            return Err(MatchmakingError::InvalidInput {
                reason: format!("Player ids {overlap:?} appear on both sides"),
            }
            .into());
        }

        let (winners, losers) = match winner {
            Winner::TeamOne => (team_one, team_two),
            Winner::TeamTwo => (team_two, team_one),
        };

        let total_players = (team_one.len() + team_two.len()) as f64;
        let beta_sq = self.config.beta * self.config.beta;

        let sum_sigma_sq: f64 = team_one
            .iter()
            .chain(team_two.iter())
            .map(|(_, r)| r.sigma * r.sigma)
            .sum();

        // Combined uncertainty of the performance difference
        let c_sq = sum_sigma_sq + total_players * beta_sq;
        let c = c_sq.sqrt();

        let delta_mu: f64 = winners.iter().map(|(_, r)| r.mu).sum::<f64>()
            - losers.iter().map(|(_, r)| r.mu).sum::<f64>();

        let draw_margin = self.draw_margin(total_players);

        let diff = delta_mu / c;
        let margin = draw_margin / c;

        let v = gaussian::v_win(diff, margin);
        let w = gaussian::w_win(diff, margin);

        debug!(
            delta_mu,
            c, draw_margin, v, w, "computed two-team update corrections"
        );

        let rate_team = |team: &[(PlayerId, Rating)], sign: f64| -> Vec<Rating> {
            team.iter()
                .map(|(_, rating)| {
                    let sigma_sq = rating.sigma * rating.sigma;
                    let mu = rating.mu + sign * (sigma_sq / c) * v;
                    let sigma = (sigma_sq * (1.0 - (sigma_sq / c_sq) * w))
                        .sqrt()
                        .max(self.config.uncertainty_tolerance);
                    Rating { mu, sigma }
                })
                .collect()
        };

        let rated_one = match winner {
            Winner::TeamOne => rate_team(team_one, 1.0),
            Winner::TeamTwo => rate_team(team_one, -1.0),
        };
        let rated_two = match winner {
            Winner::TeamOne => rate_team(team_two, -1.0),
            Winner::TeamTwo => rate_team(team_two, 1.0),
        };

        Ok((rated_one, rated_two))
    }

    /// Probability that `team_one` beats `team_two` under the current belief
    ///
    /// Symmetric: `win_probability(a, b) == 1 - win_probability(b, a)`.
    pub fn win_probability(
        &self,
        team_one: &[Rating],
        team_two: &[Rating],
    ) -> crate::error::Result<f64> {
        self.ensure_teams_non_empty(team_one, team_two)?;

        let delta_mu: f64 = team_one.iter().map(|r| r.mu).sum::<f64>()
            - team_two.iter().map(|r| r.mu).sum::<f64>();
        let denom = self.performance_variance(team_one, team_two).sqrt();

        Ok(gaussian::cdf(delta_mu / denom))
    }

    /// Predicted probability that the matchup ends in a draw
    ///
    /// Used as the fairness score: it is maximized when the teams' mean
    /// skills cancel out and uncertainty is low. Symmetric in its
    /// arguments, always in (0, 1].
    pub fn match_quality(
        &self,
        team_one: &[Rating],
        team_two: &[Rating],
    ) -> crate::error::Result<f64> {
        self.ensure_teams_non_empty(team_one, team_two)?;

        let beta_sq = self.config.beta * self.config.beta;
        let delta_mu: f64 = team_one.iter().map(|r| r.mu).sum::<f64>()
            - team_two.iter().map(|r| r.mu).sum::<f64>();
        let denom = self.performance_variance(team_one, team_two);

        Ok((2.0 * beta_sq / denom).sqrt() * (-delta_mu * delta_mu / (2.0 * denom)).exp())
    }

    /// Engine parameters
    pub fn config(&self) -> &TrueSkillConfig {
        &self.config
    }

    /// Current configuration as JSON
    pub fn config_json(&self) -> serde_json::Value {
        serde_json::to_value(self.config).unwrap_or(serde_json::Value::Null)
    }

    /// Truncation margin derived from the draw-probability prior
    fn draw_margin(&self, total_players: f64) -> f64 {
        gaussian::inv_cdf((self.config.draw_probability + 1.0) / 2.0)
            * total_players.sqrt()
            * self.config.beta
    }

    /// `n * beta^2 + sum(sigma_i^2)` over both teams
    fn performance_variance(&self, team_one: &[Rating], team_two: &[Rating]) -> f64 {
        let total_players = (team_one.len() + team_two.len()) as f64;
        let sum_sigma_sq: f64 = team_one
            .iter()
            .chain(team_two.iter())
            .map(|r| r.sigma * r.sigma)
            .sum();
        total_players * self.config.beta * self.config.beta + sum_sigma_sq
    }

    fn ensure_teams_non_empty(
        &self,
        team_one: &[Rating],
        team_two: &[Rating],
    ) -> crate::error::Result<()> {
        if team_one.is_empty() || team_two.is_empty() {
            return Err(MatchmakingError::InvalidInput {
                reason: "Both teams must have at least one player".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for TrueSkillEngine {
    fn default() -> Self {
        Self {
            config: TrueSkillConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TrueSkillEngine {
        TrueSkillEngine::new(TrueSkillConfig::default()).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = TrueSkillConfig::default();
        assert_eq!(config.initial_mean, 25.0);
        assert!((config.initial_uncertainty - 25.0 / 3.0).abs() < 1e-12);
        assert!((config.beta - 25.0 / 6.0).abs() < 1e-12);
        assert!((config.dynamics_factor - 25.0 / 300.0).abs() < 1e-12);
        assert_eq!(config.draw_probability, 0.10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TrueSkillConfig::default();
        config.beta = 0.0;
        assert!(config.validate().is_err());

        config = TrueSkillConfig::default();
        config.initial_uncertainty = -1.0;
        assert!(config.validate().is_err());

        config = TrueSkillConfig::default();
        config.draw_probability = 1.0;
        assert!(config.validate().is_err());

        config = TrueSkillConfig::default();
        config.dynamics_factor = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_create_rating() {
        let rating = engine().create_rating();
        assert_eq!(rating.mu, 25.0);
        assert!((rating.sigma - 8.333).abs() < 1e-3);
    }

    #[test]
    fn test_apply_dynamics_widens_sigma() {
        let engine = engine();
        let rating = engine.create_rating();

        let once = engine.apply_dynamics(rating);
        assert_eq!(once.mu, rating.mu);
        assert!(once.sigma > rating.sigma);

        // Not idempotent: every application widens further
        let twice = engine.apply_dynamics(once);
        assert!(twice.sigma > once.sigma);
    }

    #[test]
    fn test_reference_one_on_one_update() {
        let engine = engine();
        let team_one = vec![(1, Rating::default())];
        let team_two = vec![(2, Rating::default())];

        let (winners, losers) = engine.update(&team_one, &team_two, Winner::TeamOne).unwrap();

        // Standard closed-form TrueSkill two-player result
        assert!((winners[0].mu - 29.39).abs() < 0.1);
        assert!((winners[0].sigma - 7.17).abs() < 0.1);
        assert!((losers[0].mu - 20.61).abs() < 0.1);
        assert!((losers[0].sigma - 7.17).abs() < 0.1);
    }

    #[test]
    fn test_update_monotonicity_two_on_two() {
        let engine = engine();
        let team_one = vec![
            (1, Rating::new(28.0, 6.5)),
            (2, Rating::new(22.0, 8.1)),
        ];
        let team_two = vec![
            (3, Rating::new(31.0, 4.2)),
            (4, Rating::new(25.5, 7.7)),
        ];

        let (rated_one, rated_two) = engine.update(&team_one, &team_two, Winner::TeamTwo).unwrap();

        for (before, after) in team_one.iter().zip(&rated_one) {
            assert!(after.mu < before.1.mu, "losers' mu must strictly decrease");
            assert!(after.sigma < before.1.sigma);
        }
        for (before, after) in team_two.iter().zip(&rated_two) {
            assert!(after.mu > before.1.mu, "winners' mu must strictly increase");
            assert!(after.sigma < before.1.sigma);
        }
    }

    #[test]
    fn test_update_rejects_empty_team() {
        let engine = engine();
        let team = vec![(1, Rating::default())];
        let result = engine.update(&team, &[], Winner::TeamOne);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_rejects_overlapping_ids() {
        let engine = engine();
        let team_one = vec![(1, Rating::default()), (2, Rating::default())];
        let team_two = vec![(2, Rating::default()), (3, Rating::default())];

        let err = engine
            .update(&team_one, &team_two, Winner::TeamOne)
            .unwrap_err();
        let err = err.downcast_ref::<MatchmakingError>().unwrap();
        assert!(matches!(err, MatchmakingError::InvalidInput { .. }));
    }

    #[test]
    fn test_win_probability_even_match() {
        let engine = engine();
        let team_one = vec![Rating::default()];
        let team_two = vec![Rating::default()];

        let p = engine.win_probability(&team_one, &team_two).unwrap();
        assert!((p - 0.5).abs() < 1e-7);
    }

    #[test]
    fn test_win_probability_complementarity() {
        let engine = engine();
        let team_one = vec![Rating::new(31.2, 5.0), Rating::new(24.0, 8.0)];
        let team_two = vec![Rating::new(27.0, 6.1), Rating::new(22.4, 7.3)];

        let p_one = engine.win_probability(&team_one, &team_two).unwrap();
        let p_two = engine.win_probability(&team_two, &team_one).unwrap();
        assert!((p_one + p_two - 1.0).abs() < 1e-9);
        assert!(p_one > 0.5, "stronger team should be favored");
    }

    #[test]
    fn test_match_quality_symmetry() {
        let engine = engine();
        let team_one = vec![Rating::new(29.0, 4.0), Rating::new(21.0, 9.0)];
        let team_two = vec![Rating::new(26.0, 5.5), Rating::new(23.5, 6.2)];

        let q_ab = engine.match_quality(&team_one, &team_two).unwrap();
        let q_ba = engine.match_quality(&team_two, &team_one).unwrap();
        assert!((q_ab - q_ba).abs() < 1e-12);
        assert!(q_ab > 0.0 && q_ab <= 1.0);
    }

    #[test]
    fn test_match_quality_prefers_balanced_teams() {
        let engine = engine();
        let balanced = engine
            .match_quality(&[Rating::default()], &[Rating::default()])
            .unwrap();
        let lopsided = engine
            .match_quality(&[Rating::new(40.0, 3.0)], &[Rating::new(15.0, 3.0)])
            .unwrap();
        assert!(balanced > lopsided);
    }

    #[test]
    fn test_config_json_snapshot() {
        let value = engine().config_json();
        assert_eq!(value["initial_mean"], 25.0);
        assert_eq!(value["draw_probability"], 0.1);
    }
}
