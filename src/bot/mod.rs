//! Bot module providing automatic players with hold-and-stand presets.
//!
//! This module implements:
//! - BotDecisionMaker: Per-turn hold and re-roll decisions
//! - HoldPolicy presets (Cautious, Standard, Bold) with distinct play styles
//!
//! ## Policy Presets
//!
//! ### Cautious
//! - Stands at 9 points or better
//! - Never gambles a made hand
//!
//! ### Standard (default)
//! - Holds ones, twos, and threes
//! - Stands at 7 points or better
//! - Gambles a made hand 10% of the time
//!
//! ### Bold
//! - Holds only ones and threes
//! - Stands at 5 points or better
//! - Gambles a made hand 25% of the time
//!
//! ## Example
//!
//! ```
//! use lowball_dice::bot::BotDecisionMaker;
//! use lowball_dice::entities::Die;
//!
//! let bot = BotDecisionMaker::new();
//! let dice = [Die::new(); 5];
//! let holds = bot.desired_holds(&dice);
//!
//! // The bot always keeps at least one die.
//! assert!(holds.iter().any(|&held| held));
//! ```

pub mod decision;

pub use decision::{BotDecisionMaker, HoldPolicy};
