//! Table-wide limits and presentation defaults.

/// Fewest players a game can start with.
pub const MIN_PLAYERS: usize = 2;

/// Most players a table can seat.
pub const MAX_PLAYERS: usize = 6;

/// Dice in every player's hand.
pub const DICE_PER_HAND: usize = 5;

/// Rolls a player gets per round.
pub const MAX_ROLLS: u8 = 5;

/// Longest player name kept after trimming.
pub const MAX_NAME_LENGTH: usize = 12;

/// Default player color palette, cycled for players who don't pick one.
pub const DEFAULT_COLORS: [&str; 6] = [
    "#EF4444", // red
    "#FFA500", // orange
    "#FFFF00", // yellow
    "#22C55E", // green
    "#3B82F6", // blue
    "#A855F7", // purple
];
