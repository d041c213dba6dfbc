//! Fair-matchup search over a player pool
//!
//! Enumerates candidate team splits and ranks them by the rating
//! engine's match-quality score. The enumeration is combinatorial and
//! intended for small pools only; `SearchConfig::max_pool_size` bounds
//! the pool a full search will accept.

use crate::error::MatchmakingError;
use crate::rating::engine::TrueSkillEngine;
use crate::types::{Player, Rating};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the matchup search
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Players per team; candidate teams are k-combinations of the pool
    pub team_size: usize,
    /// Largest pool `fairest_overall` will enumerate. The full search is
    /// O(n^4) for doubles, so the ceiling keeps CPU use bounded.
    pub max_pool_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            team_size: 2,
            max_pool_size: 16,
        }
    }
}

impl SearchConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.team_size == 0 {
            return Err(MatchmakingError::ConfigurationError {
                message: "Team size must be at least 1".to_string(),
            }
            .into());
        }

        if self.max_pool_size < 2 * self.team_size {
            return Err(MatchmakingError::ConfigurationError {
                message: "Max pool size must fit two full teams".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// A candidate opposing team with its fairness score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredOpponents {
    pub opponents: Vec<Player>,
    pub quality: f64,
}

/// A full candidate matchup with its fairness score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatchup {
    pub team_one: Vec<Player>,
    pub team_two: Vec<Player>,
    pub quality: f64,
}

/// All k-combinations of `items`, in lexicographic input order
///
/// Elements within each combination keep their relative input order.
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if k > items.len() {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();

    loop {
        result.push(indices.iter().map(|&i| items[i].clone()).collect());

        // Advance to the next combination, rightmost index first
        let mut pos = k;
        while pos > 0 {
            pos -= 1;
            if indices[pos] != pos + items.len() - k {
                break;
            }
            if pos == 0 {
                return result;
            }
        }

        indices[pos] += 1;
        for i in pos + 1..k {
            indices[i] = indices[i - 1] + 1;
        }
    }
}

/// Combinatorial search for the fairest matchups in a player pool
#[derive(Debug, Clone)]
pub struct MatchmakingSearch {
    engine: TrueSkillEngine,
    config: SearchConfig,
}

impl MatchmakingSearch {
    /// Create a new search over the given engine and configuration
    pub fn new(engine: TrueSkillEngine, config: SearchConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { engine, config })
    }

    /// Search configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// All unordered player pairs drawn from the pool
    pub fn generate_pairs(&self, players: &[Player]) -> Vec<Vec<Player>> {
        combinations(players, 2)
    }

    /// Rank candidate opponents for a fixed team, fairest first
    ///
    /// Members of the fixed team are removed from the pool before
    /// candidate teams are drawn. Every candidate is returned; callers
    /// truncate to taste. Ties keep generation order (stable sort).
    pub fn fairest_against(
        &self,
        pool: &[Player],
        fixed_team: &[Player],
    ) -> crate::error::Result<Vec<ScoredOpponents>> {
        if fixed_team.is_empty() {
            return Err(MatchmakingError::EmptyTeam.into());
        }

        let fixed_ids: Vec<_> = fixed_team.iter().map(|p| p.id).collect();
        let remaining: Vec<Player> = pool
            .iter()
            .filter(|p| !fixed_ids.contains(&p.id))
            .cloned()
            .collect();

        if remaining.len() < self.config.team_size {
            return Err(MatchmakingError::InsufficientPlayers {
                required: self.config.team_size,
                found: remaining.len(),
            }
            .into());
        }

        let fixed_ratings = team_ratings(fixed_team);

        let mut scored = Vec::new();
        for opponents in combinations(&remaining, self.config.team_size) {
            let quality = self
                .engine
                .match_quality(&fixed_ratings, &team_ratings(&opponents))?;
            scored.push(ScoredOpponents { opponents, quality });
        }

        debug!(
            candidates = scored.len(),
            pool = pool.len(),
            "scored opposing teams"
        );

        sort_by_quality_desc(&mut scored, |s| s.quality);
        Ok(scored)
    }

    /// Rank every way to split the pool into two teams, fairest first
    ///
    /// Each unordered split is scored exactly once; the team holding the
    /// earliest pool member is listed as `team_one`. Every matchup is
    /// returned; callers truncate to taste. Ties keep generation order.
    pub fn fairest_overall(&self, pool: &[Player]) -> crate::error::Result<Vec<ScoredMatchup>> {
        let required = 2 * self.config.team_size;
        if pool.len() < required {
            return Err(MatchmakingError::InsufficientPlayers {
                required,
                found: pool.len(),
            }
            .into());
        }

        if pool.len() > self.config.max_pool_size {
            return Err(MatchmakingError::InvalidInput {
                reason: format!(
                    "Pool of {} players exceeds the search ceiling of {}",
                    pool.len(),
                    self.config.max_pool_size
                ),
            }
            .into());
        }

        let indices: Vec<usize> = (0..pool.len()).collect();
        let mut scored = Vec::new();

        for first in combinations(&indices, self.config.team_size) {
            let rest: Vec<usize> = indices
                .iter()
                .copied()
                .filter(|i| !first.contains(i))
                .collect();

            let team_one: Vec<Player> = first.iter().map(|&i| pool[i].clone()).collect();
            let one_ratings = team_ratings(&team_one);

            for second in combinations(&rest, self.config.team_size) {
                // Mirror-image splits are scored once: the side holding
                // the earliest pool member is always team one
                if second[0] < first[0] {
                    continue;
                }

                let team_two: Vec<Player> = second.iter().map(|&i| pool[i].clone()).collect();
                let quality = self
                    .engine
                    .match_quality(&one_ratings, &team_ratings(&team_two))?;
                scored.push(ScoredMatchup {
                    team_one: team_one.clone(),
                    team_two,
                    quality,
                });
            }
        }

        debug!(
            matchups = scored.len(),
            pool = pool.len(),
            "scored full-pool matchups"
        );

        sort_by_quality_desc(&mut scored, |s| s.quality);
        Ok(scored)
    }
}

impl Default for MatchmakingSearch {
    fn default() -> Self {
        Self {
            engine: TrueSkillEngine::default(),
            config: SearchConfig::default(),
        }
    }
}

fn team_ratings(team: &[Player]) -> Vec<Rating> {
    team.iter().map(|p| p.rating).collect()
}

fn sort_by_quality_desc<T>(items: &mut [T], quality: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| {
        quality(b)
            .partial_cmp(&quality(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
