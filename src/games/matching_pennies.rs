//! Matching pennies as a two-round public tree with a hidden first move.
//!
//! Player 1 picks heads or tails, then player 2 picks without seeing it.
//! Player 1 wins a chip when the coins match, player 2 when they differ.
//! Both player-2 decision nodes carry the same public history, so they share
//! one strategy. The unique equilibrium is 50/50 for both players, worth 0.

use crate::cfr::game::{Game, GameNode};

/// Heads.
pub const HEADS: usize = 0;

/// Tails.
pub const TAILS: usize = 1;

/// Matching pennies game.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingPennies;

/// A node of the matching pennies tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PenniesNode {
    /// Number of coins shown so far; the only public information.
    round: usize,
    /// Actual choices, hidden from the public history.
    choices: Vec<usize>,
}

impl MatchingPennies {
    /// Create a new matching pennies game.
    pub fn new() -> Self {
        Self
    }
}

impl Game for MatchingPennies {
    type Node = PenniesNode;

    fn num_actions(&self) -> usize {
        2
    }

    fn num_private_hands(&self) -> usize {
        1
    }

    fn root(&self) -> PenniesNode {
        PenniesNode::default()
    }

    fn evaluate(&self, node: &PenniesNode, player: usize, pmi: &[f64]) -> Vec<f64> {
        let matched = node.choices[0] == node.choices[1];
        let payoff = match (matched, player) {
            (true, 0) | (false, 1) => 1.0,
            _ => -1.0,
        };
        vec![payoff * pmi[0]]
    }
}

impl GameNode for PenniesNode {
    type PublicHistory = usize;

    fn is_terminal(&self) -> bool {
        self.round == 2
    }

    fn public_history(&self) -> &usize {
        &self.round
    }

    fn current_player(&self) -> usize {
        self.round
    }

    fn num_actions(&self) -> usize {
        2
    }

    fn play(&self, action: usize) -> Self {
        let mut choices = self.choices.clone();
        choices.push(action);
        Self {
            round: self.round + 1,
            choices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_player_cannot_see_first_coin() {
        let root = MatchingPennies::new().root();
        let heads = root.play(HEADS);
        let tails = root.play(TAILS);
        assert_eq!(heads.public_history(), tails.public_history());
        assert_eq!(heads.current_player(), 1);
        assert!(heads.play(TAILS).is_terminal());
    }

    #[test]
    fn test_payoffs() {
        let game = MatchingPennies::new();
        let root = game.root();
        let matched = root.play(HEADS).play(HEADS);
        let mismatched = root.play(HEADS).play(TAILS);

        assert_eq!(game.evaluate(&matched, 0, &[0.25]), vec![0.25]);
        assert_eq!(game.evaluate(&matched, 1, &[0.25]), vec![-0.25]);
        assert_eq!(game.evaluate(&mismatched, 0, &[1.0]), vec![-1.0]);
        assert_eq!(game.evaluate(&mismatched, 1, &[1.0]), vec![1.0]);
    }
}
