//! Skill-rating engine and the player-store boundary
//!
//! This module provides the closed-form TrueSkill two-team calculations,
//! the Gaussian numeric helpers behind them, and the store interface the
//! core resolves players through.

pub mod engine;
mod gaussian;
pub mod storage;

// Re-export commonly used types
pub use engine::{TrueSkillConfig, TrueSkillEngine};
pub use storage::{InMemoryPlayerStore, PlayerEntry, PlayerStore};
