//! Error types for the rating and matchmaking core
//!
//! This module defines all error types using anyhow for consistent error
//! handling throughout the crate. Every variant carries enough structured
//! detail (offending ids, counts) for a caller to build a user-facing
//! message without re-deriving it.

use crate::types::PlayerId;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating and matchmaking scenarios
#[derive(Debug, thiserror::Error)]
pub enum MatchmakingError {
    #[error("a team cannot be empty")]
    EmptyTeam,

    #[error("players not found: {player_ids:?}")]
    PlayerNotFound { player_ids: Vec<PlayerId> },

    #[error("players appear more than once in the match: {player_ids:?}")]
    DuplicatePlayer { player_ids: Vec<PlayerId> },

    #[error("insufficient players: {required} required, {found} found")]
    InsufficientPlayers { required: usize, found: usize },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("player store unavailable: {message}")]
    StoreUnavailable { message: String },
}
