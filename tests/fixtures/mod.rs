//! Shared fixtures for the integration tests

use matchpoint::rating::InMemoryPlayerStore;
use matchpoint::types::{Player, PlayerId, Rating};

/// Install a test subscriber so `RUST_LOG` surfaces core tracing output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Build a store seeded with players at explicit ratings
pub fn seeded_store(players: &[(&str, f64, f64)]) -> (InMemoryPlayerStore, Vec<PlayerId>) {
    let store = InMemoryPlayerStore::new();
    let ids = players
        .iter()
        .map(|(name, mu, sigma)| {
            store
                .register_player(name, Rating::new(*mu, *sigma))
                .unwrap()
        })
        .collect();
    (store, ids)
}

/// Build a store seeded with default-rated players
pub fn default_store(names: &[&str]) -> (InMemoryPlayerStore, Vec<PlayerId>) {
    let store = InMemoryPlayerStore::new();
    let ids = names
        .iter()
        .map(|name| store.register_player(name, Rating::default()).unwrap())
        .collect();
    (store, ids)
}

/// Pair each player with their id for an engine update call
pub fn as_update_team(players: &[Player]) -> Vec<(PlayerId, Rating)> {
    players.iter().map(|p| (p.id, p.rating)).collect()
}
