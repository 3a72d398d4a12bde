//! High-score persistence
//!
//! The engine only knows about the [`HighScoreStore`] trait. The terminal
//! shell plugs in a [`FileHighScore`]; tests use [`MemoryHighScore`].

pub mod high_score;

pub use high_score::{DEFAULT_HIGH_SCORE_FILE, FileHighScore, HighScoreStore, MemoryHighScore};
