//! Discounted Counterfactual Regret Minimization (DCFR).
//!
//! The minimizer performs full-width traversals of the public tree with
//! vectorized reach probabilities: every quantity is a vector with one entry
//! per private hand. Each iteration runs one traversal per player; the
//! traversing player's regrets and cumulative strategy are updated at the
//! decision nodes they own.
//!
//! Execution is single-threaded and deterministic.

use std::time::Instant;

use crate::cfr::config::{CFRStats, DcfrConfig, DiscountWeights};
use crate::cfr::error::SolverError;
use crate::cfr::game::{Game, GameNode, PublicHistory};
use crate::cfr::storage::StrategyTables;
use crate::cfr::strategy::{compute_average_strategy, regret_matching, StrategyProfile};
use crate::cfr::tree::{PublicTree, TreeBuilder};
use crate::cfr::vector::{
    add_assign, mul, mul_assign, mul_assign_by_sign, mul_assign_scalar, sub_assign,
};

/// The DCFR minimizer.
///
/// It owns its regret and strategy tables exclusively; each call to
/// [`compute`](Self::compute) starts from freshly allocated tables.
///
/// # Example
/// ```
/// use dcfr_solver::cfr::CFRMinimizer;
/// use dcfr_solver::games::kuhn::KuhnGame;
///
/// let game = KuhnGame::new();
/// let mut minimizer = CFRMinimizer::new(&game);
/// let strategy = minimizer.compute(1_000).unwrap();
///
/// // The second player never calls a bet with a Jack.
/// let call = strategy.probability(&vec![1], 1, 0).unwrap();
/// assert!(call < 0.01);
/// ```
pub struct CFRMinimizer<'a, G: Game> {
    /// The game being solved.
    game: &'a G,

    /// Configuration for the minimizer.
    config: DcfrConfig,

    /// Tables of the most recent run.
    tables: StrategyTables<PublicHistory<G>>,

    /// Public tree of the most recent run.
    tree: PublicTree,

    /// Statistics of the most recent run.
    stats: CFRStats,
}

impl<'a, G: Game> CFRMinimizer<'a, G> {
    /// Create a minimizer with the default `(1.5, 0, 2)` schedule.
    pub fn new(game: &'a G) -> Self {
        Self::with_config(game, DcfrConfig::default())
    }

    /// Create a minimizer with a custom configuration.
    pub fn with_config(game: &'a G, config: DcfrConfig) -> Self {
        Self {
            game,
            config,
            tables: StrategyTables::new(game.num_private_hands()),
            tree: PublicTree::default(),
            stats: CFRStats::new(),
        }
    }

    /// Runs `num_iterations` iterations and returns the average strategy.
    ///
    /// Zero iterations yield an all-zero profile covering every public history.
    pub fn compute(
        &mut self,
        num_iterations: u64,
    ) -> Result<StrategyProfile<PublicHistory<G>>, SolverError> {
        self.compute_with_callback(num_iterations, 0, |_| {})
    }

    /// Like [`compute`](Self::compute), calling `callback` every
    /// `callback_interval` iterations (never if the interval is 0).
    pub fn compute_with_callback<F>(
        &mut self,
        num_iterations: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> Result<StrategyProfile<PublicHistory<G>>, SolverError>
    where
        F: FnMut(&CFRStats),
    {
        self.config.validate()?;

        let mut tables = StrategyTables::new(self.game.num_private_hands());
        let tree = TreeBuilder::new(self.game).build(&mut tables)?;
        log::info!(
            "built public tree: {} decision nodes, {} terminal nodes, {} public histories, {} hands ({} bytes of tables)",
            tree.num_nodes(),
            tree.num_terminals(),
            tree.num_slots(),
            tables.num_hands(),
            tables.memory_usage()
        );

        self.stats = CFRStats {
            public_histories: tree.num_slots(),
            decision_nodes: tree.num_nodes(),
            terminal_nodes: tree.num_terminals(),
            ..CFRStats::new()
        };

        let ones = vec![1.0; self.game.num_private_hands()];
        let root = self.game.root();
        let start_time = Instant::now();

        for t in 1..=num_iterations {
            let weights = DiscountWeights::at(t, &self.config);
            let mut traversal = Traversal {
                game: self.game,
                tree: &tree,
                tables: &mut tables,
                weights,
            };
            for player in 0..2 {
                traversal.cfr_recursive(&root, tree.root(), player, &ones, &ones);
            }

            let log_due = self.config.log_interval > 0 && t % self.config.log_interval == 0;
            let callback_due = callback_interval > 0 && t % callback_interval == 0;
            if log_due || callback_due {
                self.stats.iterations = t;
                self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
                self.stats.update_rate();
                if log_due {
                    log::debug!(
                        "iteration {} ({:.0} it/s, alpha_t = {:.6}, gamma_t = {:.3e})",
                        t,
                        self.stats.iterations_per_second,
                        weights.alpha,
                        weights.gamma
                    );
                }
                if callback_due {
                    callback(&self.stats);
                }
            }
        }

        self.stats.iterations = num_iterations;
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        self.stats.update_rate();
        log::info!(
            "finished {} iterations in {:.3}s",
            num_iterations,
            self.stats.elapsed_seconds
        );

        self.tables = tables;
        self.tree = tree;
        Ok(self.average_strategy())
    }

    /// Average strategy of the most recent run.
    pub fn average_strategy(&self) -> StrategyProfile<PublicHistory<G>> {
        compute_average_strategy(&self.tables)
    }

    /// Tables of the most recent run.
    pub fn tables(&self) -> &StrategyTables<PublicHistory<G>> {
        &self.tables
    }

    /// Public tree of the most recent run.
    pub fn tree(&self) -> &PublicTree {
        &self.tree
    }

    /// Statistics of the most recent run.
    pub fn stats(&self) -> &CFRStats {
        &self.stats
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &DcfrConfig {
        &self.config
    }
}

/// State of one iteration: the tables being updated and the weights in effect.
struct Traversal<'t, G: Game> {
    game: &'t G,
    tree: &'t PublicTree,
    tables: &'t mut StrategyTables<PublicHistory<G>>,
    weights: DiscountWeights,
}

impl<'t, G: Game> Traversal<'t, G> {
    /// Returns `player`'s counterfactual values at `node`, one per private hand.
    ///
    /// `at` is the arena id of `node` in the public tree, `None` for terminals.
    /// `pi` and `pmi` are the reach probabilities of the traversing player and
    /// of the opponent.
    fn cfr_recursive(
        &mut self,
        node: &G::Node,
        at: Option<usize>,
        player: usize,
        pi: &[f64],
        pmi: &[f64],
    ) -> Vec<f64> {
        let Some(at) = at else {
            debug_assert!(node.is_terminal());
            let cfvalue = self.game.evaluate(node, player, pmi);
            debug_assert_eq!(cfvalue.len(), pi.len());
            return cfvalue;
        };

        let tree = self.tree;
        let tree_node = tree.node(at);
        let num_hands = pi.len();
        let mut strategy = regret_matching(self.tables.regret(tree_node.slot), num_hands);
        let mut cfvalue = vec![0.0; num_hands];

        if node.current_player() == player {
            let mut cfvalue_actions = Vec::with_capacity(strategy.len());

            for action in node.actions() {
                let pi = mul(pi, &strategy[action]);
                let mut cfvalue_action = self.cfr_recursive(
                    &node.play(action),
                    tree_node.children[action],
                    player,
                    &pi,
                    pmi,
                );
                // kept unweighted for the regret update below
                cfvalue_actions.push(cfvalue_action.clone());
                mul_assign(&mut cfvalue_action, &strategy[action]);
                add_assign(&mut cfvalue, &cfvalue_action);
            }

            let DiscountWeights { alpha, beta, gamma } = self.weights;
            let (cum_regret, cum_strategy) = self.tables.slot_mut(tree_node.slot);
            for action in node.actions() {
                // discount by the sign of the regret before this update
                mul_assign_by_sign(&mut cum_regret[action], alpha, beta);
                add_assign(&mut cum_regret[action], &cfvalue_actions[action]);
                sub_assign(&mut cum_regret[action], &cfvalue);

                mul_assign_scalar(&mut strategy[action], gamma);
                mul_assign(&mut strategy[action], pi);
                add_assign(&mut cum_strategy[action], &strategy[action]);
            }
        } else {
            for action in node.actions() {
                let pmi = mul(pmi, &strategy[action]);
                let child_value = self.cfr_recursive(
                    &node.play(action),
                    tree_node.children[action],
                    player,
                    pi,
                    &pmi,
                );
                add_assign(&mut cfvalue, &child_value);
            }
        }

        cfvalue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::evaluation::compute_ev;
    use crate::games::kuhn::{KuhnGame, BET, PASS};
    use crate::games::matching_pennies::MatchingPennies;

    #[test]
    fn test_zero_iterations_yield_zero_profile() {
        let game = KuhnGame::new();
        let mut minimizer = CFRMinimizer::new(&game);
        let profile = minimizer.compute(0).unwrap();

        assert_eq!(profile.len(), 4);
        for (_, matrix) in profile.iter() {
            assert_eq!(matrix, &vec![vec![0.0; 3]; 2]);
        }
        assert_eq!(minimizer.stats().iterations, 0);
        assert_eq!(minimizer.stats().public_histories, 4);
        assert_eq!(minimizer.stats().terminal_nodes, 5);
        assert_eq!(minimizer.tables().memory_usage(), 4 * 2 * 2 * 3 * 8);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let game = KuhnGame::new();
        let first = CFRMinimizer::new(&game).compute(300).unwrap();
        let second = CFRMinimizer::new(&game).compute(300).unwrap();
        assert_eq!(first, second);

        // repeated runs on one minimizer start over from fresh tables
        let mut minimizer = CFRMinimizer::new(&game);
        minimizer.compute(300).unwrap();
        let again = minimizer.compute(300).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_average_columns_sum_to_one_or_zero() {
        let game = KuhnGame::new();
        let mut minimizer = CFRMinimizer::new(&game);
        let profile = minimizer.compute(200).unwrap();

        for (history, matrix) in profile.iter() {
            let slot = minimizer.tables().slot(history).unwrap();
            let cum = minimizer.tables().strategy(slot);
            for hand in 0..3 {
                let total: f64 = matrix.iter().map(|row| row[hand]).sum();
                let weight: f64 = cum.iter().map(|row| row[hand]).sum();
                if weight > 0.0 {
                    assert!((total - 1.0).abs() < 1e-9, "{:?} hand {}", history, hand);
                } else {
                    assert_eq!(total, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_first_iteration_updates() {
        // After one iteration from uniform play, betting at the root is worth
        // 1/4 more than passing for every card, since the opponent folds half
        // the time. Each action's regret is half that difference.
        let game = KuhnGame::new();
        let mut minimizer = CFRMinimizer::new(&game);
        minimizer.compute(1).unwrap();

        let tables = minimizer.tables();
        let root = tables.slot(&vec![]).unwrap();

        // gamma_1 * uniform * pi(=1)
        assert_eq!(tables.strategy(root), &vec![vec![2.0; 3], vec![2.0; 3]]);

        let regret = tables.regret(root);
        for hand in 0..3 {
            assert!((regret[PASS][hand] + 0.125).abs() < 1e-12);
            assert!((regret[BET][hand] - 0.125).abs() < 1e-12);
        }

        // facing a bet: folding a Jack gains 1/6, calling with a King gains 1/2
        let after_bet = tables.slot(&vec![BET]).unwrap();
        assert_eq!(tables.strategy(after_bet), &vec![vec![2.0; 3], vec![2.0; 3]]);
        let regret = tables.regret(after_bet);
        assert!((regret[PASS][0] - 1.0 / 6.0).abs() < 1e-12);
        assert!((regret[BET][2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_matching_pennies_converges_to_half() {
        let game = MatchingPennies::new();
        let mut minimizer = CFRMinimizer::new(&game);
        let profile = minimizer.compute(5000).unwrap();

        for history in profile.histories() {
            let matrix = profile.get(history).unwrap();
            for action in 0..2 {
                assert!(
                    (matrix[action][0] - 0.5).abs() < 0.02,
                    "history {:?} action {} has probability {}",
                    history,
                    action,
                    matrix[action][0]
                );
            }
        }

        let ev0 = compute_ev(&game, 0, &profile).unwrap();
        let ev1 = compute_ev(&game, 1, &profile).unwrap();
        assert!((ev0 + ev1).abs() < 1e-9);
        assert!(ev0.abs() < 0.01);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let game = KuhnGame::new();
        let config = DcfrConfig::default().with_beta(f64::NAN);
        let mut minimizer = CFRMinimizer::with_config(&game, config);
        assert!(minimizer.config().beta.is_nan());
        assert!(matches!(minimizer.compute(10), Err(SolverError::Config(_))));
    }

    #[test]
    fn test_callback_interval() {
        let game = KuhnGame::new();
        let mut minimizer = CFRMinimizer::new(&game);
        let mut seen = Vec::new();
        minimizer
            .compute_with_callback(10, 4, |stats| seen.push(stats.iterations))
            .unwrap();
        assert_eq!(seen, vec![4, 8]);
        assert_eq!(minimizer.stats().iterations, 10);
    }
}
