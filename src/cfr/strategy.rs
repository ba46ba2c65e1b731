//! Regret matching and average-strategy extraction.
//!
//! Both reductions work column by column: every private hand gets its own
//! distribution over the actions of a public history.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::cfr::storage::{Matrix, StrategyTables};
use crate::cfr::vector::{div_assign, nonneg_assign, sum_rows};

/// Converts a cumulative-regret matrix into the current strategy.
///
/// For each hand, actions are played in proportion to their positive regret.
/// A hand with no positive regret at all plays uniformly.
pub fn regret_matching(regrets: &Matrix, num_hands: usize) -> Matrix {
    let num_actions = regrets.len();
    let mut strategy = regrets.clone();
    strategy.iter_mut().for_each(|row| nonneg_assign(row));

    let denom = sum_rows(&strategy, num_hands);
    let uniform = 1.0 / num_actions as f64;
    strategy
        .iter_mut()
        .for_each(|row| div_assign(row, &denom, uniform));

    strategy
}

/// Normalizes a cumulative-strategy matrix into an average strategy.
///
/// Hands whose cumulative weight is zero are reported as all-zero, not uniform.
pub fn normalize_average(cum_strategy: &Matrix, num_hands: usize) -> Matrix {
    let mut average = cum_strategy.clone();
    let denom = sum_rows(&average, num_hands);
    average
        .iter_mut()
        .for_each(|row| div_assign(row, &denom, 0.0));
    average
}

/// Normalizes every cumulative-strategy matrix of `tables`.
pub fn compute_average_strategy<H>(tables: &StrategyTables<H>) -> StrategyProfile<H>
where
    H: Clone + Eq + Hash + std::fmt::Debug,
{
    let num_hands = tables.num_hands();
    let matrices = tables
        .strategies()
        .iter()
        .map(|cum| normalize_average(cum, num_hands))
        .collect();
    StrategyProfile::new(tables.histories().to_vec(), matrices, num_hands)
}

/// Average strategy per public history: the solver's output.
///
/// Each matrix has shape (actions × private hands); column `h` is the
/// distribution played with hand `h`. Iteration follows the order in which the
/// tree build first met each history.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyProfile<H: Eq + Hash> {
    histories: Vec<H>,
    index: FxHashMap<H, usize>,
    matrices: Vec<Matrix>,
    num_hands: usize,
}

/// Borrowed view of one profile entry, for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyEntry<'a, H> {
    /// The public history.
    pub history: &'a H,
    /// The (actions × hands) average strategy.
    pub strategy: &'a Matrix,
}

impl<H: Clone + Eq + Hash> StrategyProfile<H> {
    /// Assemble a profile from histories and their matrices, in matching order.
    pub fn new(histories: Vec<H>, matrices: Vec<Matrix>, num_hands: usize) -> Self {
        debug_assert_eq!(histories.len(), matrices.len());
        let index = histories
            .iter()
            .enumerate()
            .map(|(slot, history)| (history.clone(), slot))
            .collect();
        Self {
            histories,
            index,
            matrices,
            num_hands,
        }
    }

    /// Strategy matrix of a public history.
    pub fn get(&self, history: &H) -> Option<&Matrix> {
        self.index.get(history).map(|&slot| &self.matrices[slot])
    }

    /// Probability of playing `action` with `hand` at `history`.
    pub fn probability(&self, history: &H, action: usize, hand: usize) -> Option<f64> {
        self.get(history)
            .and_then(|m| m.get(action))
            .and_then(|row| row.get(hand))
            .copied()
    }

    /// Iterates over `(history, matrix)` pairs in tree order.
    pub fn iter(&self) -> impl Iterator<Item = (&H, &Matrix)> {
        self.histories.iter().zip(&self.matrices)
    }

    /// Serializable entries in tree order.
    pub fn entries(&self) -> Vec<StrategyEntry<'_, H>> {
        self.iter()
            .map(|(history, strategy)| StrategyEntry { history, strategy })
            .collect()
    }

    /// Public histories in tree order.
    pub fn histories(&self) -> &[H] {
        &self.histories
    }

    /// Number of public histories.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Returns whether the profile is empty.
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// Length of every per-hand vector.
    pub fn num_hands(&self) -> usize {
        self.num_hands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_regret_matching_proportional_to_positive_regret() {
        let regrets = vec![vec![3.0, -1.0], vec![1.0, 2.0], vec![-5.0, 2.0]];
        let strategy = regret_matching(&regrets, 2);
        assert_eq!(
            strategy,
            vec![vec![0.75, 0.0], vec![0.25, 0.5], vec![0.0, 0.5]]
        );
    }

    #[test]
    fn test_regret_matching_uniform_without_positive_regret() {
        let regrets = vec![vec![0.0, -2.0, 4.0], vec![0.0, -1.0, 0.0], vec![0.0, 0.0, 0.0]];
        let strategy = regret_matching(&regrets, 3);
        let third = 1.0 / 3.0;
        assert_eq!(strategy[0], vec![third, third, 1.0]);
        assert_eq!(strategy[1], vec![third, third, 0.0]);
        assert_eq!(strategy[2], vec![third, third, 0.0]);
    }

    #[test]
    fn test_regret_matching_columns_sum_to_one() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let num_actions = rng.gen_range(1..6);
            let num_hands = rng.gen_range(1..10);
            let regrets: Matrix = (0..num_actions)
                .map(|_| {
                    (0..num_hands)
                        .map(|_| {
                            if rng.gen_bool(0.3) {
                                0.0
                            } else {
                                rng.gen_range(-10.0..10.0)
                            }
                        })
                        .collect()
                })
                .collect();

            let strategy = regret_matching(&regrets, num_hands);
            for hand in 0..num_hands {
                let total: f64 = strategy.iter().map(|row| row[hand]).sum();
                assert!((total - 1.0).abs() < 1e-12, "hand {} sums to {}", hand, total);
                assert!(strategy.iter().all(|row| row[hand] >= 0.0));
            }
        }
    }

    #[test]
    fn test_average_falls_back_to_zero() {
        let cum = vec![vec![2.0, 0.0, 0.0], vec![6.0, 0.0, 1.0]];
        let average = normalize_average(&cum, 3);
        assert_eq!(average, vec![vec![0.25, 0.0, 0.0], vec![0.75, 0.0, 1.0]]);
    }

    #[test]
    fn test_average_does_not_touch_tables() {
        let mut tables: StrategyTables<Vec<usize>> = StrategyTables::new(2);
        let slot = tables.ensure(&vec![], 2).unwrap();
        tables.slot_mut(slot).1[0] = vec![1.0, 0.0];
        tables.slot_mut(slot).1[1] = vec![3.0, 0.0];

        let profile = compute_average_strategy(&tables);
        assert_eq!(profile.get(&vec![]), Some(&vec![vec![0.25, 0.0], vec![0.75, 0.0]]));
        assert_eq!(tables.strategy(slot)[1], vec![3.0, 0.0]);
    }

    #[test]
    fn test_profile_lookup_and_entries() {
        let profile = StrategyProfile::new(
            vec![vec![], vec![1usize]],
            vec![vec![vec![1.0], vec![0.0]], vec![vec![0.5], vec![0.5]]],
            1,
        );
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.probability(&vec![1], 1, 0), Some(0.5));
        assert_eq!(profile.probability(&vec![1], 2, 0), None);
        assert_eq!(profile.probability(&vec![0], 0, 0), None);

        let json = serde_json::to_string(&profile.entries()).unwrap();
        assert_eq!(
            json,
            r#"[{"history":[],"strategy":[[1.0],[0.0]]},{"history":[1],"strategy":[[0.5],[0.5]]}]"#
        );
    }
}
