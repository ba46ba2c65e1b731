//! Kuhn Poker in public-tree form.
//!
//! Kuhn Poker is a simplified poker game used to validate CFR implementations
//! because it has a known, mathematically proven Nash equilibrium.
//!
//! ## Game Rules
//!
//! - 3 cards: Jack (0), Queen (1), King (2)
//! - 2 players, each antes 1 chip
//! - Each player receives 1 card
//! - Player 1 acts first: Pass or Bet (1 chip)
//! - Player 2 responds based on P1's action
//! - Higher card wins at showdown
//!
//! ## Public Tree
//!
//! The deal is private, so the public tree only branches on actions. The
//! private hand of each player is an index into `[J, Q, K]`.
//!
//! ```text
//! P1 (first to act)
//! ├── Pass
//! │   └── P2
//! │       ├── Pass → Showdown (pot = 2)
//! │       └── Bet
//! │           └── P1
//! │               ├── Pass → P2 wins (pot = 3)
//! │               └── Bet → Showdown (pot = 4)
//! └── Bet
//!     └── P2
//!         ├── Pass → P1 wins (pot = 3)
//!         └── Bet → Showdown (pot = 4)
//! ```
//!
//! ## Known Nash Equilibrium
//!
//! - **Player 1 with Jack**: Bet with probability α ∈ [0, 1/3]
//! - **Player 1 with Queen**: Always Pass; call a bet with probability α + 1/3
//! - **Player 1 with King**: Bet with probability 3α
//! - **Player 2 facing Bet with Jack**: Always Fold
//! - **Player 2 facing Bet with Queen**: Call with probability 1/3
//! - **Player 2 facing Bet with King**: Always Call
//! - **Player 2 facing Pass**: Bet a Jack 1/3 of the time, never a Queen, always a King
//!
//! **Expected Value**: Player 1 EV = -1/18 ≈ -0.0556

use crate::cfr::game::{Game, GameNode};

/// Pass: check, or fold when facing a bet.
pub const PASS: usize = 0;

/// Bet: bet, or call when facing a bet.
pub const BET: usize = 1;

/// Number of cards in the deck, and of private hands per player.
pub const NUM_CARDS: usize = 3;

/// Card names indexed by private hand.
pub const CARD_NAMES: [&str; NUM_CARDS] = ["J", "Q", "K"];

/// Probability of one specific deal (ordered pair of distinct cards).
const DEAL_PROB: f64 = 1.0 / 6.0;

/// Kuhn Poker game.
#[derive(Debug, Clone, Copy, Default)]
pub struct KuhnGame;

/// A node of the Kuhn public tree: the action sequence so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KuhnNode {
    history: Vec<usize>,
}

impl KuhnGame {
    /// Create a new Kuhn Poker game.
    pub fn new() -> Self {
        Self
    }

    /// Renders a public history with `p`/`b`, e.g. `"pb"`.
    pub fn history_str(history: &[usize]) -> String {
        history
            .iter()
            .map(|&action| if action == PASS { 'p' } else { 'b' })
            .collect()
    }

    /// Payoff to player 0 holding `card` against `opponent`, at a terminal history.
    fn payoff(history: &[usize], card: usize, opponent: usize) -> f64 {
        let showdown = |stake: f64| if card > opponent { stake } else { -stake };
        match history {
            [PASS, PASS] => showdown(1.0),
            [BET, PASS] => 1.0,
            [PASS, BET, PASS] => -1.0,
            [BET, BET] | [PASS, BET, BET] => showdown(2.0),
            _ => unreachable!("not a terminal history: {:?}", history),
        }
    }
}

impl Game for KuhnGame {
    type Node = KuhnNode;

    fn num_actions(&self) -> usize {
        2
    }

    fn num_private_hands(&self) -> usize {
        NUM_CARDS
    }

    fn root(&self) -> KuhnNode {
        KuhnNode::default()
    }

    fn evaluate(&self, node: &KuhnNode, player: usize, pmi: &[f64]) -> Vec<f64> {
        let sign = if player == 0 { 1.0 } else { -1.0 };
        (0..NUM_CARDS)
            .map(|card| {
                (0..NUM_CARDS)
                    .filter(|&opponent| opponent != card)
                    .map(|opponent| {
                        // payoff is stated from player 0's seat
                        let (p0, p1) = if player == 0 { (card, opponent) } else { (opponent, card) };
                        sign * Self::payoff(&node.history, p0, p1) * pmi[opponent]
                    })
                    .sum::<f64>()
                    * DEAL_PROB
            })
            .collect()
    }
}

impl GameNode for KuhnNode {
    type PublicHistory = Vec<usize>;

    fn is_terminal(&self) -> bool {
        matches!(
            self.history.as_slice(),
            [PASS, PASS] | [BET, PASS] | [BET, BET] | [PASS, BET, PASS] | [PASS, BET, BET]
        )
    }

    fn public_history(&self) -> &Vec<usize> {
        &self.history
    }

    fn current_player(&self) -> usize {
        self.history.len() % 2
    }

    fn num_actions(&self) -> usize {
        2
    }

    fn play(&self, action: usize) -> Self {
        let mut history = self.history.clone();
        history.push(action);
        Self { history }
    }
}
