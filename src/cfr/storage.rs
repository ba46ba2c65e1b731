//! Storage for cumulative regrets and cumulative strategy weights.
//!
//! Both tables are keyed by public history. Each history is assigned a dense
//! slot when it is first seen, and both tables hold an
//! (actions × private hands) matrix at that slot.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::cfr::error::{describe, SolverError};

/// A matrix of shape (actions × private hands), stored row per action.
pub type Matrix = Vec<Vec<f64>>;

/// Creates a zeroed (actions × hands) matrix.
pub fn zero_matrix(num_actions: usize, num_hands: usize) -> Matrix {
    vec![vec![0.0; num_hands]; num_actions]
}

/// Cumulative regret and cumulative strategy tables.
///
/// The two tables always cover the same set of public histories: a slot is
/// created in both or in neither. Matrix shapes are fixed once allocated.
#[derive(Debug, Clone)]
pub struct StrategyTables<H> {
    /// Public history -> slot
    index: FxHashMap<H, usize>,

    /// Slot -> public history, in first-seen order
    histories: Vec<H>,

    /// Cumulative regret per slot
    regret: Vec<Matrix>,

    /// Cumulative strategy weight per slot
    strategy: Vec<Matrix>,

    num_hands: usize,
}

impl<H: Clone + Eq + Hash + std::fmt::Debug> StrategyTables<H> {
    /// Create empty tables for vectors of `num_hands` entries.
    pub fn new(num_hands: usize) -> Self {
        Self {
            index: FxHashMap::default(),
            histories: Vec::new(),
            regret: Vec::new(),
            strategy: Vec::new(),
            num_hands,
        }
    }

    /// Returns the slot for `history`, allocating zeroed matrices in both
    /// tables if it has not been seen yet.
    ///
    /// Calling this again for a known history is a no-op that returns the
    /// existing slot, provided the action count agrees.
    pub fn ensure(&mut self, history: &H, num_actions: usize) -> Result<usize, SolverError> {
        if let Some(&slot) = self.index.get(history) {
            let expected = self.regret[slot].len();
            if expected != num_actions {
                return Err(SolverError::ShapeMismatch {
                    history: describe(history),
                    expected,
                    actual: num_actions,
                });
            }
            return Ok(slot);
        }

        let slot = self.histories.len();
        self.index.insert(history.clone(), slot);
        self.histories.push(history.clone());
        self.regret.push(zero_matrix(num_actions, self.num_hands));
        self.strategy.push(zero_matrix(num_actions, self.num_hands));
        Ok(slot)
    }

    /// Get the slot assigned to a public history.
    pub fn slot(&self, history: &H) -> Option<usize> {
        self.index.get(history).copied()
    }

    /// Number of public histories stored.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Returns whether no history has been allocated.
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// Length of every per-hand vector.
    pub fn num_hands(&self) -> usize {
        self.num_hands
    }

    /// Public histories in slot order.
    pub fn histories(&self) -> &[H] {
        &self.histories
    }

    /// Cumulative regret matrix at `slot`.
    pub fn regret(&self, slot: usize) -> &Matrix {
        &self.regret[slot]
    }

    /// Cumulative strategy matrix at `slot`.
    pub fn strategy(&self, slot: usize) -> &Matrix {
        &self.strategy[slot]
    }

    /// Mutable access to both matrices at `slot`, for the regret and strategy update.
    pub fn slot_mut(&mut self, slot: usize) -> (&mut Matrix, &mut Matrix) {
        (&mut self.regret[slot], &mut self.strategy[slot])
    }

    /// All cumulative strategy matrices in slot order.
    pub fn strategies(&self) -> &[Matrix] {
        &self.strategy
    }

    /// Estimated memory used by the matrices, in bytes.
    pub fn memory_usage(&self) -> usize {
        let floats: usize = self
            .regret
            .iter()
            .chain(&self.strategy)
            .map(|m| m.iter().map(Vec::len).sum::<usize>())
            .sum();
        floats * std::mem::size_of::<f64>()
    }
}
