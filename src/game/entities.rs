use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::HashMap, fmt};

use super::constants;

/// A die face. Faces run 1 through 6; fresh dice show 1.
pub type Face = u8;

/// Faces showing this value score zero. The one non-obvious rule of the
/// game: threes are free.
pub const FREE_FACE: Face = 3;

/// A round score: the sum of a hand's faces with threes counting zero.
/// Lower is better.
pub type Score = u32;

/// A single six-sided die. Held dice are skipped by re-rolls.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Die {
    pub value: Face,
    pub held: bool,
}

impl Die {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: 1,
            held: false,
        }
    }

    /// Re-roll the die in place. Held dice don't move.
    pub fn roll(&mut self) {
        if !self.held {
            self.value = rand::rng().random_range(1..=6);
        }
    }
}

impl Default for Die {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = if self.held {
            format!("[{}]", self.value)
        } else {
            format!(" {} ", self.value)
        };
        write!(f, "{repr}")
    }
}

/// Type alias for whole dollars. All antes, pots, and player stacks are
/// represented as whole dollars (there's no point arguing over pennies).
///
/// Signed, because the ante is collected even from players who can't cover
/// it, so a stack can dip below zero before the game-end check clears the
/// table.
pub type Usd = i64;

pub const DEFAULT_ANTE: Usd = 50;
pub const DEFAULT_BUY_IN: Usd = 1000;

/// Stable player identifier, assigned in join order and never reused within
/// a game. The sole key for lookups; roster position means nothing.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: &str) -> Self {
        Self(s.trim().chars().take(constants::MAX_NAME_LENGTH).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for PlayerName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// A display color as a hex string, e.g. "#EF4444".
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Color(String);

impl Color {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_string())
    }

    /// Palette color for the nth player to join.
    #[must_use]
    pub fn palette(n: usize) -> Self {
        Self(constants::DEFAULT_COLORS[n % constants::DEFAULT_COLORS.len()].to_string())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::palette(0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a player stands within the current round.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlayerState {
    // Player couldn't cover the ante and skips the round.
    SittingOut,
    // Player is in but hasn't rolled yet.
    Waiting,
    // Player is mid-round with rolls remaining.
    Rolling,
    // Player used all their rolls.
    Finished,
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::SittingOut => "sit out",
            Self::Waiting => "waiting",
            Self::Rolling => "rolling",
            Self::Finished => "done",
        };
        write!(f, "{repr:7}")
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    pub color: Color,
    pub money: Usd,
    pub state: PlayerState,
    pub dice: [Die; constants::DICE_PER_HAND],
    pub rolls_used: u8,
    pub is_winner: bool,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: PlayerName, color: Color, buy_in: Usd) -> Self {
        Self {
            id,
            name,
            color,
            money: buy_in,
            state: PlayerState::Waiting,
            dice: [Die::new(); constants::DICE_PER_HAND],
            rolls_used: 0,
            is_winner: false,
        }
    }

    /// Number of dice currently held.
    #[must_use]
    pub fn held_count(&self) -> usize {
        self.dice.iter().filter(|die| die.held).count()
    }

    /// Whether the player has no moves left this round.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self.state, PlayerState::SittingOut | PlayerState::Finished)
    }

    /// Fresh dice and roll budget for a new round. The caller decides the
    /// player's state from ante affordability.
    pub fn reset(&mut self) {
        self.dice = [Die::new(); constants::DICE_PER_HAND];
        self.rolls_used = 0;
    }
}

/// The round's shared pot.
#[derive(Clone, Debug)]
pub struct Pot {
    // Map player ids to what they've put in this round.
    pub antes: HashMap<PlayerId, Usd>,
}

impl Default for Pot {
    fn default() -> Self {
        Self::new(constants::MAX_PLAYERS)
    }
}

impl Pot {
    /// Record a player's ante. Antes go in even from players who can't
    /// cover them.
    pub fn collect(&mut self, id: PlayerId, ante: Usd) {
        let investment = self.antes.entry(id).or_default();
        *investment += ante;
    }

    #[must_use]
    pub fn get_size(&self) -> Usd {
        self.antes.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.get_size() == 0
    }

    #[must_use]
    pub fn new(max_players: usize) -> Self {
        Self {
            antes: HashMap::with_capacity(max_players),
        }
    }

    /// Empty the pot, returning what was in it.
    pub fn take(&mut self) -> Usd {
        let size = self.get_size();
        self.antes.clear();
        size
    }
}

/// The result of resolving a round: who won, with what score, and what each
/// winner takes. Pure data; the distribution phase applies it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoundOutcome {
    pub winners: Vec<PlayerId>,
    pub winning_score: Score,
    /// Each winner's share, floor division of the pot.
    pub prize: Usd,
    pub pot: Usd,
}

/// Snapshot of one player for presentation.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: PlayerName,
    pub color: Color,
    pub money: Usd,
    pub state: PlayerState,
    pub dice: [Die; constants::DICE_PER_HAND],
    pub rolls_used: u8,
    pub score: Score,
    pub is_winner: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PotView {
    pub size: Usd,
}

impl fmt::Display for PotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.size)
    }
}

/// Full table snapshot handed to the presentation layer. Everything is
/// public information, so there's a single view rather than one per player.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GameView {
    pub ante: Usd,
    pub pot: PotView,
    pub players: Vec<PlayerView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Die Tests ===

    #[test]
    fn test_die_starts_at_one_unheld() {
        let die = Die::new();
        assert_eq!(die.value, 1);
        assert!(!die.held);
        assert_eq!(die, Die::default());
    }

    #[test]
    fn test_die_roll_stays_in_range() {
        let mut die = Die::new();
        for _ in 0..200 {
            die.roll();
            assert!((1..=6).contains(&die.value));
        }
    }

    #[test]
    fn test_die_roll_held_is_noop() {
        let mut die = Die { value: 4, held: true };
        for _ in 0..50 {
            die.roll();
        }
        assert_eq!(die.value, 4);
        assert!(die.held);
    }

    #[test]
    fn test_die_roll_covers_all_faces() {
        let mut seen = [false; 6];
        let mut die = Die::new();
        for _ in 0..1000 {
            die.roll();
            seen[(die.value - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "all faces should come up: {seen:?}");
    }

    #[test]
    fn test_die_display() {
        let held = Die { value: 3, held: true };
        let free = Die { value: 3, held: false };
        assert_eq!(held.to_string(), "[3]");
        assert_eq!(free.to_string(), " 3 ");
    }

    // === PlayerName Tests ===

    #[test]
    fn test_name_trims_whitespace() {
        let name = PlayerName::new("  alice  ");
        assert_eq!(name.to_string(), "alice");
    }

    #[test]
    fn test_name_truncates_to_max_length() {
        let name = PlayerName::new("abcdefghijklmnop");
        assert_eq!(name.to_string(), "abcdefghijkl");
        assert_eq!(name.to_string().chars().count(), constants::MAX_NAME_LENGTH);
    }

    #[test]
    fn test_name_truncates_by_chars_not_bytes() {
        let name = PlayerName::new("äöüäöüäöüäöüäöü");
        assert_eq!(name.to_string().chars().count(), constants::MAX_NAME_LENGTH);
    }

    #[test]
    fn test_name_empty_after_trim() {
        assert!(PlayerName::new("   ").is_empty());
        assert!(PlayerName::new("").is_empty());
        assert!(!PlayerName::new("x").is_empty());
    }

    #[test]
    fn test_name_from_string() {
        let name: PlayerName = "bob".to_string().into();
        assert_eq!(name, PlayerName::new("bob"));
    }

    // === Color Tests ===

    #[test]
    fn test_color_palette_cycles() {
        assert_eq!(Color::palette(0), Color::palette(6));
        assert_eq!(Color::palette(1), Color::palette(7));
        assert_ne!(Color::palette(0), Color::palette(1));
    }

    #[test]
    fn test_color_default_is_first_palette_entry() {
        assert_eq!(Color::default(), Color::new(constants::DEFAULT_COLORS[0]));
    }

    #[test]
    fn test_color_keeps_custom_hex() {
        let color = Color::new(" #123ABC ");
        assert_eq!(color.to_string(), "#123ABC");
    }

    // === PlayerId Tests ===

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(0).to_string(), "p0");
        assert_eq!(PlayerId(5).to_string(), "p5");
    }

    #[test]
    fn test_player_id_ordering() {
        assert!(PlayerId(0) < PlayerId(1));
        assert_eq!(PlayerId(3), PlayerId(3));
    }

    // === PlayerState Tests ===

    #[test]
    fn test_player_state_display_is_padded() {
        assert_eq!(PlayerState::SittingOut.to_string(), "sit out");
        assert_eq!(PlayerState::Finished.to_string(), "done   ");
        assert_eq!(PlayerState::Waiting.to_string(), "waiting");
    }

    // === Player Tests ===

    #[test]
    fn test_player_new_defaults() {
        let player = Player::new(
            PlayerId(2),
            PlayerName::new("carol"),
            Color::default(),
            DEFAULT_BUY_IN,
        );
        assert_eq!(player.money, DEFAULT_BUY_IN);
        assert_eq!(player.state, PlayerState::Waiting);
        assert_eq!(player.dice.len(), constants::DICE_PER_HAND);
        assert!(player.dice.iter().all(|d| d.value == 1 && !d.held));
        assert_eq!(player.rolls_used, 0);
        assert!(!player.is_winner);
    }

    #[test]
    fn test_player_held_count() {
        let mut player = Player::new(
            PlayerId(0),
            PlayerName::new("alice"),
            Color::default(),
            DEFAULT_BUY_IN,
        );
        assert_eq!(player.held_count(), 0);
        player.dice[0].held = true;
        player.dice[3].held = true;
        assert_eq!(player.held_count(), 2);
    }

    #[test]
    fn test_player_is_done() {
        let mut player = Player::new(
            PlayerId(0),
            PlayerName::new("alice"),
            Color::default(),
            DEFAULT_BUY_IN,
        );
        assert!(!player.is_done());
        player.state = PlayerState::Rolling;
        assert!(!player.is_done());
        player.state = PlayerState::Finished;
        assert!(player.is_done());
        player.state = PlayerState::SittingOut;
        assert!(player.is_done());
    }

    #[test]
    fn test_player_reset_clears_round_fields_only() {
        let mut player = Player::new(
            PlayerId(0),
            PlayerName::new("alice"),
            Color::default(),
            300,
        );
        player.dice[1] = Die { value: 6, held: true };
        player.rolls_used = 4;
        player.is_winner = true;
        player.reset();
        assert!(player.dice.iter().all(|d| d.value == 1 && !d.held));
        assert_eq!(player.rolls_used, 0);
        assert_eq!(player.money, 300);
        assert!(player.is_winner, "reset shouldn't clear the crown");
    }

    // === Pot Tests ===

    #[test]
    fn test_pot_starts_empty() {
        let pot = Pot::default();
        assert!(pot.is_empty());
        assert_eq!(pot.get_size(), 0);
    }

    #[test]
    fn test_pot_collect_accumulates() {
        let mut pot = Pot::default();
        for i in 0..4 {
            pot.collect(PlayerId(i), 50);
        }
        assert_eq!(pot.get_size(), 200);
        assert!(!pot.is_empty());
    }

    #[test]
    fn test_pot_collect_same_player_adds() {
        let mut pot = Pot::default();
        pot.collect(PlayerId(0), 50);
        pot.collect(PlayerId(0), 25);
        assert_eq!(pot.get_size(), 75);
        assert_eq!(pot.antes.len(), 1);
    }

    #[test]
    fn test_pot_take_empties() {
        let mut pot = Pot::default();
        pot.collect(PlayerId(0), 50);
        pot.collect(PlayerId(1), 50);
        assert_eq!(pot.take(), 100);
        assert!(pot.is_empty());
        assert_eq!(pot.take(), 0);
    }

    // === View Tests ===

    #[test]
    fn test_pot_view_display() {
        let view = PotView { size: 150 };
        assert_eq!(view.to_string(), "$150");
    }

    #[test]
    fn test_game_view_serializes() {
        let view = GameView {
            ante: 50,
            pot: PotView { size: 100 },
            players: vec![PlayerView {
                id: PlayerId(0),
                name: PlayerName::new("alice"),
                color: Color::default(),
                money: 950,
                state: PlayerState::Waiting,
                dice: [Die::new(); constants::DICE_PER_HAND],
                rolls_used: 0,
                score: 5,
                is_winner: false,
            }],
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"ante\":50"));
        assert!(json.contains("alice"));
        let back: GameView = serde_json::from_str(&json).unwrap();
        assert_eq!(back.players.len(), 1);
        assert_eq!(back.players[0].money, 950);
    }
}
