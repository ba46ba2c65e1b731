//! Game trait definitions for the DCFR minimizer.
//!
//! The minimizer works on the *public* game tree: every decision node is
//! identified by what all players can observe, and private information is
//! carried as vectors with one entry per possible private hand. Any game that
//! implements [`Game`] and [`GameNode`] can be solved.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Range;

/// A node of the public game tree.
///
/// A node is either a decision node (it has an acting player and at least one
/// action) or a terminal node. Nodes are produced on demand by [`GameNode::play`];
/// the minimizer never stores them beyond the current traversal path.
pub trait GameNode: Clone {
    /// Key identifying what is publicly visible at a decision node.
    ///
    /// Decision nodes reached by different action sequences but carrying the
    /// same public information must return equal keys. They then share one
    /// regret/strategy matrix.
    type PublicHistory: Clone + Eq + Hash + Debug;

    /// Returns whether this node ends the game.
    fn is_terminal(&self) -> bool;

    /// Returns the public history of this node.
    fn public_history(&self) -> &Self::PublicHistory;

    /// Returns the acting player (0 or 1).
    ///
    /// Only meaningful on non-terminal nodes.
    fn current_player(&self) -> usize;

    /// Returns the number of actions available at this node.
    fn num_actions(&self) -> usize;

    /// Returns the available action ids, which are contiguous and 0-indexed.
    fn actions(&self) -> Range<usize> {
        0..self.num_actions()
    }

    /// Plays `action` and returns the resulting child node.
    fn play(&self, action: usize) -> Self;
}

/// A two-player zero-sum game in public-tree form.
///
/// # Example
/// ```ignore
/// struct MyGame;
///
/// impl Game for MyGame {
///     type Node = MyNode;
///
///     fn num_actions(&self) -> usize { 2 }
///     fn num_private_hands(&self) -> usize { 3 }
///     fn root(&self) -> MyNode { MyNode::default() }
///     fn evaluate(&self, node: &MyNode, player: usize, pmi: &[f64]) -> Vec<f64> {
///         // ...
///     }
/// }
/// ```
pub trait Game {
    /// The public tree node type.
    type Node: GameNode;

    /// Maximum number of actions at any node of this game.
    fn num_actions(&self) -> usize;

    /// Number of private hand assignments, i.e. the length of every per-hand vector.
    fn num_private_hands(&self) -> usize;

    /// Returns the root node.
    fn root(&self) -> Self::Node;

    /// Computes `player`'s counterfactual values at a terminal node.
    ///
    /// `pmi` is the opponent's reach probability per private hand. The result
    /// has one entry per private hand of `player`, already weighted by the
    /// opponent's reach and by the chance of the deal.
    fn evaluate(&self, node: &Self::Node, player: usize, pmi: &[f64]) -> Vec<f64>;
}

/// The public history key type of a game.
pub type PublicHistory<G> = <<G as Game>::Node as GameNode>::PublicHistory;
