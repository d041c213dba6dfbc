//! Common types used throughout the rating and matchmaking core

use serde::{Deserialize, Serialize};

/// Unique identifier for players, allocated by the player store
pub type PlayerId = u64;

/// Gaussian belief over a player's latent skill
///
/// `mu` is the mean skill estimate, `sigma` the uncertainty of that
/// estimate. `sigma` is strictly positive at all times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub sigma: f64,
}

impl Rating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            mu: 25.0,
            sigma: 25.0 / 3.0,
        }
    }
}

/// Player information for rating and matchmaking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: Rating,
}

/// Which side won a two-team match
///
/// Draws are not a valid outcome for rating updates; the draw model only
/// feeds the quality and truncation-margin math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    TeamOne,
    TeamTwo,
}

/// Rating change information for a player after a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub old_rating: Rating,
    pub new_rating: Rating,
}

impl RatingChange {
    /// How much the mean skill estimate moved (+/-)
    pub fn mu_delta(&self) -> f64 {
        self.new_rating.mu - self.old_rating.mu
    }
}
