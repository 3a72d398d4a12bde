//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal shell drives it through [`GameEngine`] and reads back [`GameState`].

pub mod action;
pub mod config;
pub mod engine;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use speed::TickSpeed;
pub use state::{CollisionType, GameOutcome, GameState, Position, RunState, Snake};
