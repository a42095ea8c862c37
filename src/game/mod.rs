//! Dice game engine - core FSM and game logic.
//!
//! This module provides the foundational game implementation including:
//! - Type-safe finite state machine with 5 game states
//! - Player management (joining, rolling, holding)
//! - Game flow and state transitions
//! - Event generation and views

// Submodules
pub mod constants;
pub mod entities;
pub mod functional;
pub mod state_machine;
pub mod states;

pub use state_machine::*;
