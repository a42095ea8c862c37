//! Dice game state machine implementation.
//!
//! This module contains the core FSM logic: state management, player
//! action traits, and the game data structures shared across states.

use enum_dispatch::enum_dispatch;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt, mem};
use thiserror::Error;

use super::constants::{MAX_PLAYERS, MAX_ROLLS, MIN_PLAYERS};
use super::entities::{
    Color, DEFAULT_ANTE, DEFAULT_BUY_IN, GameView, Player, PlayerId, PlayerName, PlayerState,
    PlayerView, Pot, PotView, Score, Usd,
};
use super::functional;
use super::states::{CollectAnte, DistributePot, Lobby, Roll, RoundOver};

/// Errors that can occur during player operations
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum UserError {
    #[error("game is full")]
    CapacityReached,
    #[error("player name can't be empty")]
    EmptyPlayerName,
    #[error("game already in progress")]
    GameAlreadyInProgress,
    #[error("game already starting")]
    GameAlreadyStarting,
    #[error("game hasn't started")]
    GameNotStarted,
    #[error("invalid action")]
    InvalidAction,
    #[error("no die at index {0}")]
    InvalidDieIndex(usize),
    #[error("can't release the only held die")]
    LastHeldDie,
    #[error("hold at least one die before re-rolling")]
    NoHeldDie,
    #[error("need 2+ players")]
    NotEnoughPlayers,
    #[error("nothing has been rolled yet")]
    NothingRolledYet,
    #[error("player does not exist")]
    PlayerDoesNotExist,
    #[error("player already finished rolling")]
    PlayerFinished,
    #[error("player is sitting this round out")]
    PlayerSittingOut,
    #[error("round already ending")]
    RoundAlreadyEnding,
    #[error("round already starting")]
    RoundAlreadyStarting,
}

/// Events that occur during gameplay
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    GameOver {
        winner: PlayerName,
        money: Usd,
    },
    PlayerJoined(PlayerName),
    RoundComplete {
        winners: Vec<PlayerName>,
        score: Score,
        prize: Usd,
    },
    SatOut(PlayerName),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::GameOver { winner, money } => {
                format!("game over! {winner} wins with ${money}")
            }
            Self::PlayerJoined(name) => format!("{name} joined the table"),
            Self::RoundComplete {
                winners,
                score,
                prize,
            } => match winners.as_slice() {
                [] => "round complete! the pot goes unclaimed".to_string(),
                [winner] => {
                    format!("round complete! {winner} wins with {score} points and takes ${prize}")
                }
                many => {
                    let names = many
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!(
                        "round complete! {names} tie with {score} points and take ${prize} each"
                    )
                }
            },
            Self::SatOut(name) => {
                format!("{name} can't cover the ante and sits out this round")
            }
        };
        write!(f, "{repr}")
    }
}

/// Game configuration settings
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameSettings {
    pub ante: Usd,
    pub buy_in: Usd,
    pub max_players: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(DEFAULT_ANTE, DEFAULT_BUY_IN, MAX_PLAYERS)
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(ante: Usd, buy_in: Usd, max_players: usize) -> Self {
        Self {
            ante,
            buy_in,
            max_players,
        }
    }
}

/// Mutable game data shared across all states
#[derive(Debug)]
pub struct GameData {
    pub players: Vec<Player>,
    pub pot: Pot,
    /// Stack of game events that give more insight as to what kind
    /// of game updates occur due to player actions or game state
    /// changes.
    pub(super) events: VecDeque<GameEvent>,
    /// Next id to hand out. Ids count up in join order and are never
    /// reused within a game.
    pub(super) next_player_id: usize,
    /// If this is set, someone asked to end the game, so the table
    /// winds down to the lobby at the next step.
    pub(super) end_game: bool,
    pub(super) settings: GameSettings,
}

impl Default for GameData {
    fn default() -> Self {
        let settings = GameSettings::default();
        settings.into()
    }
}

impl GameData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anyone at the table can still cover the ante.
    #[must_use]
    pub fn anyone_can_afford_ante(&self) -> bool {
        self.players
            .iter()
            .any(|player| player.money >= self.settings.ante)
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, UserError> {
        self.players
            .iter_mut()
            .find(|player| player.id == id)
            .ok_or(UserError::PlayerDoesNotExist)
    }

    /// Tear the table down to an empty lobby, keeping settings and any
    /// unread events.
    fn reset(self) -> Self {
        let Self {
            events, settings, ..
        } = self;
        let mut fresh = Self::from(settings);
        fresh.events = events;
        fresh
    }
}

impl From<GameSettings> for GameData {
    fn from(value: GameSettings) -> Self {
        Self {
            players: Vec::with_capacity(value.max_players),
            pot: Pot::new(value.max_players),
            events: VecDeque::new(),
            next_player_id: 0,
            end_game: false,
            settings: value,
        }
    }
}

/// Trait for managing game state (views, events)
#[enum_dispatch]
pub trait GameStateManagement {
    fn drain_events(&mut self) -> VecDeque<GameEvent>;

    /// Get a view of the whole table
    ///
    /// # Important
    /// This function's return value should be used - ignoring it wastes computation
    #[must_use]
    fn get_view(&self) -> GameView;
}

/// Trait for player operations that depend on game phase. Defaults reject;
/// each state overrides the operations it accepts.
#[enum_dispatch]
pub trait PhaseDependentPlayerManagement {
    /// Seat a new player. Color and buy-in fall back to the palette and
    /// the table's configured buy-in.
    fn new_player(
        &mut self,
        _name: &str,
        _color: Option<Color>,
        _buy_in: Option<Usd>,
    ) -> Result<PlayerId, UserError> {
        Err(UserError::GameAlreadyInProgress)
    }

    /// Signal that the table is ready to play.
    fn init_start(&mut self) -> Result<(), UserError> {
        Err(UserError::GameAlreadyInProgress)
    }

    /// Roll the player's unheld dice.
    fn roll_dice(&mut self, _id: PlayerId) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    /// Flip whether a die sits out re-rolls.
    fn toggle_hold(&mut self, _id: PlayerId, _die_idx: usize) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    /// Signal that the round should be scored as the dice lie.
    fn init_end_round(&mut self) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    /// Signal that the next round should begin.
    fn start_new_round(&mut self) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    /// Wind the game down and return the table to the lobby.
    fn end_game(&mut self) -> Result<(), UserError> {
        Err(UserError::GameNotStarted)
    }
}

/// A dice game with data and logic for running it end-to-end.
///
/// This struct wraps game data and the current state, providing the core
/// game loop functionality.
#[derive(Debug)]
pub struct Game<T> {
    pub data: GameData,
    pub state: T,
}

impl<T> GameStateManagement for Game<T> {
    fn drain_events(&mut self) -> VecDeque<GameEvent> {
        mem::take(&mut self.data.events)
    }

    fn get_view(&self) -> GameView {
        let players = self
            .data
            .players
            .iter()
            .map(|player| PlayerView {
                id: player.id,
                name: player.name.clone(),
                color: player.color.clone(),
                money: player.money,
                state: player.state,
                dice: player.dice,
                rolls_used: player.rolls_used,
                score: functional::score(&player.dice),
                is_winner: player.is_winner,
            })
            .collect();
        GameView {
            ante: self.data.settings.ante,
            pot: PotView {
                size: self.data.pot.get_size(),
            },
            players,
        }
    }
}

impl Game<Lobby> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: GameData::new(),
            state: Lobby::new(),
        }
    }
}

impl Default for Game<Lobby> {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseDependentPlayerManagement for Game<Lobby> {
    fn new_player(
        &mut self,
        name: &str,
        color: Option<Color>,
        buy_in: Option<Usd>,
    ) -> Result<PlayerId, UserError> {
        if self.data.players.len() >= self.data.settings.max_players {
            return Err(UserError::CapacityReached);
        }
        let name = PlayerName::new(name);
        if name.is_empty() {
            return Err(UserError::EmptyPlayerName);
        }
        let color = color.unwrap_or_else(|| Color::palette(self.data.players.len()));
        let buy_in = buy_in.unwrap_or(self.data.settings.buy_in);
        let id = PlayerId(self.data.next_player_id);
        self.data.next_player_id += 1;
        self.data
            .events
            .push_back(GameEvent::PlayerJoined(name.clone()));
        self.data.players.push(Player::new(id, name, color, buy_in));
        Ok(id)
    }

    fn init_start(&mut self) -> Result<(), UserError> {
        if self.data.players.len() < MIN_PLAYERS {
            return Err(UserError::NotEnoughPlayers);
        }
        if self.state.start_game {
            return Err(UserError::GameAlreadyStarting);
        }
        self.state.start_game = true;
        Ok(())
    }
}

impl PhaseDependentPlayerManagement for Game<CollectAnte> {
    fn end_game(&mut self) -> Result<(), UserError> {
        self.data.end_game = true;
        Ok(())
    }
}

impl Game<Roll> {
    /// Whether every player has either finished their rolls or sat out.
    fn is_round_over(&self) -> bool {
        self.data.players.iter().all(Player::is_done)
    }
}

impl PhaseDependentPlayerManagement for Game<Roll> {
    fn roll_dice(&mut self, id: PlayerId) -> Result<(), UserError> {
        let player = self.data.player_mut(id)?;
        match player.state {
            PlayerState::SittingOut => return Err(UserError::PlayerSittingOut),
            PlayerState::Finished => return Err(UserError::PlayerFinished),
            PlayerState::Waiting | PlayerState::Rolling => {}
        }
        if player.rolls_used > 0 && player.held_count() == 0 {
            return Err(UserError::NoHeldDie);
        }
        for die in &mut player.dice {
            die.roll();
        }
        player.rolls_used += 1;
        player.state = if player.rolls_used >= MAX_ROLLS {
            PlayerState::Finished
        } else {
            PlayerState::Rolling
        };
        Ok(())
    }

    fn toggle_hold(&mut self, id: PlayerId, die_idx: usize) -> Result<(), UserError> {
        let player = self.data.player_mut(id)?;
        match player.state {
            PlayerState::SittingOut => return Err(UserError::PlayerSittingOut),
            PlayerState::Finished => return Err(UserError::PlayerFinished),
            PlayerState::Waiting => return Err(UserError::NothingRolledYet),
            PlayerState::Rolling => {}
        }
        let held_count = player.held_count();
        let die = player
            .dice
            .get_mut(die_idx)
            .ok_or(UserError::InvalidDieIndex(die_idx))?;
        if die.held && held_count == 1 {
            return Err(UserError::LastHeldDie);
        }
        die.held = !die.held;
        Ok(())
    }

    fn init_end_round(&mut self) -> Result<(), UserError> {
        if !self.data.players.iter().any(|player| player.rolls_used > 0) {
            return Err(UserError::NothingRolledYet);
        }
        if self.state.end_round {
            return Err(UserError::RoundAlreadyEnding);
        }
        self.state.end_round = true;
        Ok(())
    }

    fn end_game(&mut self) -> Result<(), UserError> {
        self.data.end_game = true;
        Ok(())
    }
}

impl PhaseDependentPlayerManagement for Game<DistributePot> {
    fn end_game(&mut self) -> Result<(), UserError> {
        self.data.end_game = true;
        Ok(())
    }
}

impl PhaseDependentPlayerManagement for Game<RoundOver> {
    fn start_new_round(&mut self) -> Result<(), UserError> {
        if self.state.next_round {
            return Err(UserError::RoundAlreadyStarting);
        }
        self.state.next_round = true;
        Ok(())
    }

    fn end_game(&mut self) -> Result<(), UserError> {
        self.data.end_game = true;
        Ok(())
    }
}

/// Pass-through to ante collection.
impl From<Game<Lobby>> for Game<CollectAnte> {
    fn from(value: Game<Lobby>) -> Self {
        Self {
            data: value.data,
            state: CollectAnte {},
        }
    }
}

/// Antes come out of every stack whether the player can cover them or not.
/// Players whose stack couldn't cover the ante sit the round out.
impl From<Game<CollectAnte>> for Game<Roll> {
    fn from(mut value: Game<CollectAnte>) -> Self {
        let ante = value.data.settings.ante;
        let GameData {
            players,
            pot,
            events,
            ..
        } = &mut value.data;
        for player in players.iter_mut() {
            player.reset();
            player.state = if player.money >= ante {
                PlayerState::Waiting
            } else {
                events.push_back(GameEvent::SatOut(player.name.clone()));
                PlayerState::SittingOut
            };
            player.money -= ante;
            pot.collect(player.id, ante);
        }
        Self {
            data: value.data,
            state: Roll::new(),
        }
    }
}

/// Score the table as the dice lie and record who takes the pot.
impl From<Game<Roll>> for Game<DistributePot> {
    fn from(value: Game<Roll>) -> Self {
        let outcome = functional::resolve_round(&value.data.players, value.data.pot.get_size());
        Self {
            data: value.data,
            state: DistributePot { outcome },
        }
    }
}

/// Pay out the winners, clear the pot, and ready hands for another round.
/// Dice keep their faces but lose their holds.
impl From<Game<DistributePot>> for Game<RoundOver> {
    fn from(mut value: Game<DistributePot>) -> Self {
        let pot = value.data.pot.take();
        if let Some(outcome) = value.state.outcome.take() {
            let GameData {
                players, events, ..
            } = &mut value.data;
            let mut winner_names = Vec::with_capacity(outcome.winners.len());
            for player in players.iter_mut() {
                let won = outcome.winners.contains(&player.id);
                if won {
                    player.money += outcome.prize;
                    winner_names.push(player.name.clone());
                }
                player.is_winner = won;
                for die in &mut player.dice {
                    die.held = false;
                }
                player.rolls_used = 0;
                if player.state != PlayerState::SittingOut {
                    player.state = PlayerState::Waiting;
                }
            }
            if winner_names.len() != outcome.winners.len() {
                error!("round winners missing from the table: {:?}", outcome.winners);
            }
            events.push_back(GameEvent::RoundComplete {
                winners: winner_names,
                score: outcome.winning_score,
                prize: outcome.prize,
            });
        } else if pot > 0 {
            debug!("round had no contenders, discarding ${pot}");
        }
        Self {
            data: value.data,
            state: RoundOver::new(),
        }
    }
}

/// Pass-through to ante collection for the next round.
impl From<Game<RoundOver>> for Game<CollectAnte> {
    fn from(value: Game<RoundOver>) -> Self {
        Self {
            data: value.data,
            state: CollectAnte {},
        }
    }
}

/// End of the game. If the table played itself broke, the richest player
/// is crowned; a manual wind-down skips the ceremony. Everything but
/// settings and unread events resets.
impl From<Game<RoundOver>> for Game<Lobby> {
    fn from(mut value: Game<RoundOver>) -> Self {
        if !value.data.end_game {
            let mut game_winner: Option<&Player> = None;
            for player in &value.data.players {
                if game_winner.is_none_or(|leader| player.money > leader.money) {
                    game_winner = Some(player);
                }
            }
            if let Some(winner) = game_winner {
                value.data.events.push_back(GameEvent::GameOver {
                    winner: winner.name.clone(),
                    money: winner.money,
                });
            }
        }
        Self {
            data: value.data.reset(),
            state: Lobby::new(),
        }
    }
}

/// Manual wind-down mid-round. No winner is crowned.
impl From<Game<Roll>> for Game<Lobby> {
    fn from(value: Game<Roll>) -> Self {
        Self {
            data: value.data.reset(),
            state: Lobby::new(),
        }
    }
}

/// The dice game state machine, dispatching player actions to whichever
/// phase the table is in.
#[enum_dispatch(GameStateManagement, PhaseDependentPlayerManagement)]
#[derive(Debug)]
pub enum LowballState {
    Lobby(Game<Lobby>),
    CollectAnte(Game<CollectAnte>),
    Roll(Game<Roll>),
    DistributePot(Game<DistributePot>),
    RoundOver(Game<RoundOver>),
}

impl LowballState {
    #[must_use]
    pub fn new() -> Self {
        Self::Lobby(Game::<Lobby>::new())
    }

    /// Step the game forward one state transition.
    #[must_use]
    pub fn step(self) -> Self {
        match self {
            Self::Lobby(game) => {
                if game.state.start_game {
                    Self::CollectAnte(game.into())
                } else {
                    Self::Lobby(game)
                }
            }
            Self::CollectAnte(game) => Self::Roll(game.into()),
            Self::Roll(game) => {
                if game.data.end_game {
                    Self::Lobby(game.into())
                } else if game.state.end_round || game.is_round_over() {
                    Self::DistributePot(game.into())
                } else {
                    Self::Roll(game)
                }
            }
            Self::DistributePot(game) => Self::RoundOver(game.into()),
            Self::RoundOver(game) => {
                if game.data.end_game || !game.data.anyone_can_afford_ante() {
                    Self::Lobby(game.into())
                } else if game.state.next_round {
                    Self::CollectAnte(game.into())
                } else {
                    Self::RoundOver(game)
                }
            }
        }
    }
}

impl Default for LowballState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<GameSettings> for LowballState {
    fn from(value: GameSettings) -> Self {
        Self::Lobby(Game {
            data: value.into(),
            state: Lobby::new(),
        })
    }
}
