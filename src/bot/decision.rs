//! Bot decision-making logic for automated players.

use rand::Rng;

use crate::game::constants::{DICE_PER_HAND, MAX_ROLLS};
use crate::game::entities::{Die, FREE_FACE, Face, Score};
use crate::game::functional;

/// Configuration for bot hold-and-stand thresholds.
///
/// Threes always get held since they score zero. Everything else is a
/// judgment call tuned by these knobs.
#[derive(Debug, Clone)]
pub struct HoldPolicy {
    /// Keep dice showing this face or lower.
    ///
    /// **Range**: 1-2 (typical: 2)
    /// **Effect**: 2 = holds ones and twos alongside threes
    /// **Higher** = settles for mediocre dice instead of re-rolling
    pub keep_at_most: Face,

    /// Stand once the hand scores at or below this.
    ///
    /// **Range**: 4-10 (typical: 7)
    /// **Effect**: 7 = stops rolling once the hand is decent
    /// **Lower** = chases near-perfect hands and burns rolls doing it
    pub stand_score: Score,

    /// Chance of rolling again on a hand that already made `stand_score`.
    ///
    /// **Range**: 0.0-0.5 (typical: 0.1)
    /// **Effect**: 0.1 = gambles a made hand once in ten
    pub gamble_odds: f64,
}

impl Default for HoldPolicy {
    fn default() -> Self {
        Self {
            keep_at_most: 2,
            stand_score: 7,
            gamble_odds: 0.1,
        }
    }
}

impl HoldPolicy {
    /// Stands early and never gambles a made hand.
    #[must_use]
    pub fn cautious() -> Self {
        Self {
            keep_at_most: 2,
            stand_score: 9,
            gamble_odds: 0.0,
        }
    }

    /// Chases near-perfect hands and gambles made ones.
    #[must_use]
    pub fn bold() -> Self {
        Self {
            keep_at_most: 1,
            stand_score: 5,
            gamble_odds: 0.25,
        }
    }
}

/// Bot decision maker
pub struct BotDecisionMaker {
    /// Random number generator
    rng: rand::rngs::ThreadRng,
    /// Configuration for decision-making
    policy: HoldPolicy,
}

impl BotDecisionMaker {
    /// Create a new decision maker with the default policy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: rand::rng(),
            policy: HoldPolicy::default(),
        }
    }

    /// Create a new decision maker with a custom policy
    #[must_use]
    pub fn with_policy(policy: HoldPolicy) -> Self {
        Self {
            rng: rand::rng(),
            policy,
        }
    }

    /// Which dice the bot wants held before its next roll.
    ///
    /// Threes and faces at or below the policy's keep threshold are held.
    /// When nothing qualifies, the single lowest die is held instead, so
    /// the result always has at least one hold in it.
    ///
    /// # Arguments
    ///
    /// * `dice` - The bot's current hand
    ///
    /// # Returns
    ///
    /// * `[bool; DICE_PER_HAND]` - Per-die hold decisions
    #[must_use]
    pub fn desired_holds(&self, dice: &[Die; DICE_PER_HAND]) -> [bool; DICE_PER_HAND] {
        let mut holds =
            dice.map(|die| die.value == FREE_FACE || die.value <= self.policy.keep_at_most);
        if !holds.iter().any(|&held| held) {
            let mut lowest = 0;
            for (i, die) in dice.iter().enumerate() {
                if die.value < dice[lowest].value {
                    lowest = i;
                }
            }
            holds[lowest] = true;
        }
        holds
    }

    /// Whether the bot wants to roll again.
    ///
    /// Bots stand on perfect hands, stand on made hands apart from the
    /// occasional gamble, and otherwise keep rolling while rolls remain.
    ///
    /// # Arguments
    ///
    /// * `dice` - The bot's current hand
    /// * `rolls_used` - How many of its rolls the bot has burned
    ///
    /// # Returns
    ///
    /// * `bool` - Whether to roll again
    pub fn wants_reroll(&mut self, dice: &[Die; DICE_PER_HAND], rolls_used: u8) -> bool {
        if rolls_used >= MAX_ROLLS {
            return false;
        }
        let score = functional::score(dice);
        if score == 0 {
            return false;
        }
        score > self.policy.stand_score || self.rng.random_bool(self.policy.gamble_odds)
    }
}

impl Default for BotDecisionMaker {
    fn default() -> Self {
        Self::new()
    }
}
