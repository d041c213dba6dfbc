//! Team and match validation
//!
//! Shared checks that run before any rating update or matchmaking
//! search: teams must be non-empty, every id must resolve through the
//! player store, and no player may appear on both sides of a match.

use crate::error::MatchmakingError;
use crate::rating::storage::PlayerStore;
use crate::types::{Player, PlayerId};
use std::collections::HashSet;

/// Resolve a team's ids into players, in input order
///
/// Fails with `EmptyTeam` for an empty id list and `PlayerNotFound`
/// (listing every unresolved id) when the store cannot resolve them all.
pub fn validate_team(
    player_ids: &[PlayerId],
    store: &dyn PlayerStore,
) -> crate::error::Result<Vec<Player>> {
    if player_ids.is_empty() {
        return Err(MatchmakingError::EmptyTeam.into());
    }

    store.get_players(player_ids)
}

/// Validate a decided match between two teams
///
/// Runs per-team validation on both sides, then rejects any player id
/// appearing more than once across the combined roster with
/// `DuplicatePlayer`. Returns the resolved winning and losing teams.
pub fn validate_match(
    winner_ids: &[PlayerId],
    loser_ids: &[PlayerId],
    store: &dyn PlayerStore,
) -> crate::error::Result<(Vec<Player>, Vec<Player>)> {
    let winners = validate_team(winner_ids, store)?;
    let losers = validate_team(loser_ids, store)?;

    let mut seen = HashSet::new();
    let mut duplicates: Vec<PlayerId> = Vec::new();
    for id in winner_ids.iter().chain(loser_ids.iter()) {
        if !seen.insert(*id) && !duplicates.contains(id) {
            duplicates.push(*id);
        }
    }
    if !duplicates.is_empty() {
        return Err(MatchmakingError::DuplicatePlayer {
            player_ids: duplicates,
        }
        .into());
    }

    Ok((winners, losers))
}
