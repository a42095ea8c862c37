//! # Lowball Dice
//!
//! A dice wagering game implementation using a type-safe finite state machine (FSM) design.
//!
//! This library provides a complete game engine with dice scoring, pot management,
//! and game state handling. The core game is implemented as an FSM using
//! `enum_dispatch` for zero-cost trait dispatch.
//!
//! The rules are simple: everyone antes, everyone rolls up to five times while
//! holding the dice they like, and the lowest hand takes the pot. Threes count
//! for nothing, which is what makes the game worth playing.
//!
//! ## Architecture
//!
//! The game consists of 5 distinct phases (states), each representing a specific point
//! in the game lifecycle:
//!
//! - **Lobby**: Waiting for players to join
//! - **CollectAnte**: Collecting the ante from every stack
//! - **Roll**: Players roll and hold dice until everyone stands
//! - **DistributePot**: Scoring hands and distributing winnings
//! - **RoundOver**: Waiting on another round or the end of the game
//!
//! ## Core Modules
//!
//! - [`game`]: Game state machine, entities, and scoring logic
//! - [`bot`]: Hold-and-stand decision-making for automated players
//!
//! ## Example
//!
//! ```
//! use lowball_dice::LowballState;
//!
//! // Create a new game in the lobby state
//! let game = LowballState::new();
//! ```

/// Hold-and-stand decision-making for automated players.
pub mod bot;
pub use bot::{BotDecisionMaker, HoldPolicy};

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    GameSettings, LowballState, UserError,
    constants::{self, DICE_PER_HAND, MAX_PLAYERS, MAX_ROLLS},
    entities::{self, DEFAULT_ANTE, DEFAULT_BUY_IN},
    functional,
};
