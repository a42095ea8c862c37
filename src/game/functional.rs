//! Pure functions for scoring hands and resolving rounds.

use super::entities::{Die, FREE_FACE, Player, PlayerId, PlayerState, RoundOutcome, Score, Usd};

/// Score a hand: the sum of its faces, with threes counting zero. Lower is
/// better.
#[must_use]
pub fn score(dice: &[Die]) -> Score {
    dice.iter()
        .filter(|die| die.value != FREE_FACE)
        .map(|die| Score::from(die.value))
        .sum()
}

/// Indices of all minima in `items`, in order. Ties all make the cut; an
/// empty slice yields an empty result.
#[must_use]
pub fn argmin<T: Ord>(items: &[T]) -> Vec<usize> {
    let mut current_min = None;
    let mut indices = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match current_min {
            Some(min) if item > min => {}
            Some(min) if item == min => indices.push(i),
            _ => {
                current_min = Some(item);
                indices.clear();
                indices.push(i);
            }
        }
    }
    indices
}

/// Each winner's share of the pot. Floor division; any remainder is
/// discarded rather than carried over.
#[must_use]
pub fn split_pot(pot: Usd, num_winners: usize) -> Usd {
    if num_winners == 0 {
        return 0;
    }
    pot / num_winners as Usd
}

/// Resolve a round. Every player who isn't sitting out is a contender and
/// gets scored as their dice lie, rolled or not. Returns `None` when the
/// round had no contenders.
#[must_use]
pub fn resolve_round(players: &[Player], pot: Usd) -> Option<RoundOutcome> {
    let contenders: Vec<&Player> = players
        .iter()
        .filter(|player| player.state != PlayerState::SittingOut)
        .collect();
    if contenders.is_empty() {
        return None;
    }
    let scores: Vec<Score> = contenders
        .iter()
        .map(|player| score(&player.dice))
        .collect();
    let winner_indices = argmin(&scores);
    let winning_score = scores[winner_indices[0]];
    let winners: Vec<PlayerId> = winner_indices.iter().map(|&i| contenders[i].id).collect();
    let prize = split_pot(pot, winners.len());
    Some(RoundOutcome {
        winners,
        winning_score,
        prize,
        pot,
    })
}
