//! Game state definitions for the dice game FSM.
//!
//! Each state represents a specific phase of the game lifecycle.

use crate::game::entities::RoundOutcome;

/// Lobby state - waiting for players to join and the game to start
#[derive(Debug)]
pub struct Lobby {
    pub(crate) start_game: bool,
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new()
    }
}

impl Lobby {
    #[must_use]
    pub fn new() -> Self {
        Self { start_game: false }
    }
}

/// Collecting the ante from every seated player
#[derive(Debug)]
pub struct CollectAnte {}

/// Players roll and hold dice until everyone stands or runs out of rolls
#[derive(Debug)]
pub struct Roll {
    pub(crate) end_round: bool,
}

impl Default for Roll {
    fn default() -> Self {
        Self::new()
    }
}

impl Roll {
    #[must_use]
    pub fn new() -> Self {
        Self { end_round: false }
    }
}

/// Scoring hands and working out who takes the pot
#[derive(Debug)]
pub struct DistributePot {
    pub(crate) outcome: Option<RoundOutcome>,
}

/// Round is settled - waiting on a call for another round or the end of
/// the game
#[derive(Debug)]
pub struct RoundOver {
    pub(crate) next_round: bool,
}

impl Default for RoundOver {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundOver {
    #[must_use]
    pub fn new() -> Self {
        Self { next_round: false }
    }
}
