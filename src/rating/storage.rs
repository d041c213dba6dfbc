//! Player store interface and in-memory implementation
//!
//! The core never constructs or destroys players on its own; it resolves
//! them through this capability and proposes replacement ratings for the
//! store to persist. Store implementations own the single-writer
//! serialization obligation: a batch of rating changes from one match is
//! applied under a single write lock so that concurrent matches touching
//! overlapping players cannot interleave.

use crate::error::MatchmakingError;
use crate::types::{Player, PlayerId, Rating, RatingChange};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Stored record for a player with bookkeeping metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub player: Player,
    pub games_played: u64,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl PlayerEntry {
    /// Create a new entry for a newly registered player
    pub fn new(player: Player) -> Self {
        let now = current_timestamp();
        Self {
            player,
            games_played: 0,
            created_at: now,
            last_updated: now,
        }
    }

    /// Replace the rating atomically and increment games played
    pub fn update_rating(&mut self, new_rating: Rating) {
        self.player.rating = new_rating;
        self.games_played += 1;
        self.last_updated = current_timestamp();
    }
}

/// Trait for player store operations
pub trait PlayerStore: Send + Sync {
    /// Resolve players by id, preserving input order
    ///
    /// Fails with `PlayerNotFound` listing every unresolved id.
    fn get_players(&self, player_ids: &[PlayerId]) -> crate::error::Result<Vec<Player>>;

    /// Get all known players
    fn get_all_players(&self) -> crate::error::Result<Vec<Player>>;

    /// Persist a replacement rating for a single player
    fn persist_rating(&self, player_id: PlayerId, rating: Rating) -> crate::error::Result<()>;

    /// Persist the rating changes of one match atomically
    fn persist_ratings(&self, changes: &[RatingChange]) -> crate::error::Result<()>;
}

/// In-memory player store implementation
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    inner: RwLock<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    entries: HashMap<PlayerId, PlayerEntry>,
    next_id: PlayerId,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player, assigning the given initial rating
    ///
    /// Registration is idempotent on the name: if a player with the same
    /// name already exists (compared case-insensitively), their existing
    /// id is returned and the rating is left untouched.
    pub fn register_player(
        &self,
        name: &str,
        initial_rating: Rating,
    ) -> crate::error::Result<PlayerId> {
        let mut state = self.write_state()?;

        if let Some(existing) = state
            .entries
            .values()
            .find(|e| e.player.name.eq_ignore_ascii_case(name))
        {
            return Ok(existing.player.id);
        }

        state.next_id += 1;
        let id = state.next_id;
        let entry = PlayerEntry::new(Player {
            id,
            name: name.to_string(),
            rating: initial_rating,
        });
        state.entries.insert(id, entry);

        Ok(id)
    }

    /// Full entry for a player, including bookkeeping metadata
    pub fn get_entry(&self, player_id: PlayerId) -> crate::error::Result<Option<PlayerEntry>> {
        let state = self.read_state()?;
        Ok(state.entries.get(&player_id).cloned())
    }

    /// Number of registered players
    pub fn player_count(&self) -> crate::error::Result<usize> {
        let state = self.read_state()?;
        Ok(state.entries.len())
    }

    fn read_state(&self) -> crate::error::Result<std::sync::RwLockReadGuard<'_, StoreState>> {
        self.inner
            .read()
            .map_err(|_| {
                MatchmakingError::StoreUnavailable {
                    message: "Failed to acquire store read lock".to_string(),
                }
                .into()
            })
    }

    fn write_state(&self) -> crate::error::Result<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.inner
            .write()
            .map_err(|_| {
                MatchmakingError::StoreUnavailable {
                    message: "Failed to acquire store write lock".to_string(),
                }
                .into()
            })
    }
}

impl PlayerStore for InMemoryPlayerStore {
    fn get_players(&self, player_ids: &[PlayerId]) -> crate::error::Result<Vec<Player>> {
        let state = self.read_state()?;

        let missing: Vec<PlayerId> = player_ids
            .iter()
            .copied()
            .filter(|id| !state.entries.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(MatchmakingError::PlayerNotFound {
                player_ids: missing,
            }
            .into());
        }

        Ok(player_ids
            .iter()
            .map(|id| state.entries[id].player.clone())
            .collect())
    }

    fn get_all_players(&self) -> crate::error::Result<Vec<Player>> {
        let state = self.read_state()?;
        let mut players: Vec<Player> = state.entries.values().map(|e| e.player.clone()).collect();
        players.sort_by_key(|p| p.id);
        Ok(players)
    }

    fn persist_rating(&self, player_id: PlayerId, rating: Rating) -> crate::error::Result<()> {
        let mut state = self.write_state()?;

        match state.entries.get_mut(&player_id) {
            Some(entry) => {
                entry.update_rating(rating);
                Ok(())
            }
            None => Err(MatchmakingError::PlayerNotFound {
                player_ids: vec![player_id],
            }
            .into()),
        }
    }

    fn persist_ratings(&self, changes: &[RatingChange]) -> crate::error::Result<()> {
        let mut state = self.write_state()?;

        // Reject the whole batch before mutating anything
        let missing: Vec<PlayerId> = changes
            .iter()
            .map(|c| c.player_id)
            .filter(|id| !state.entries.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(MatchmakingError::PlayerNotFound {
                player_ids: missing,
            }
            .into());
        }

        for change in changes {
            if let Some(entry) = state.entries.get_mut(&change.player_id) {
                entry.update_rating(change.new_rating);
            }
        }

        Ok(())
    }
}
