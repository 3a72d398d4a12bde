//! Grid Snake - a terminal snake game
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - High-score persistence behind a small trait (persistence module)
//! - Key mapping, TUI rendering and session metrics (input, render, metrics modules)
//! - The interactive terminal shell that drives the engine on a timer (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
