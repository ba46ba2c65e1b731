//! DCFR (Discounted Counterfactual Regret Minimization) Solver Module.
//!
//! This module provides a generic, vectorized DCFR minimizer for two-player
//! zero-sum imperfect-information games described as public trees.
//!
//! # Overview
//!
//! The minimizer converges to a Nash equilibrium by:
//! 1. Walking the public tree once per player per iteration, carrying one
//!    reach probability per private hand
//! 2. Accumulating discounted counterfactual regret at each public history
//! 3. Playing regret matching on the accumulated regret
//! 4. Averaging strategies across iterations with growing weights
//!
//! # Usage
//!
//! 1. Implement [`Game`] and [`GameNode`] for your game
//! 2. Create a [`CFRMinimizer`] with your game and, optionally, a [`DcfrConfig`]
//! 3. Call [`CFRMinimizer::compute`] to obtain a [`StrategyProfile`]
//! 4. Measure it with [`compute_ev`] and [`compute_exploitability`]
//!
//! # Example
//!
//! ```
//! use dcfr_solver::cfr::{compute_exploitability, CFRMinimizer, DcfrConfig};
//! use dcfr_solver::games::kuhn::KuhnGame;
//!
//! let game = KuhnGame::new();
//! let config = DcfrConfig::default().with_log_interval(0);
//! let mut minimizer = CFRMinimizer::with_config(&game, config);
//!
//! let profile = minimizer.compute(500).unwrap();
//! println!("{} public histories", profile.len());
//!
//! let exploitability = compute_exploitability(&game, &profile).unwrap();
//! assert!(exploitability < 1e-2);
//! ```
//!
//! # Theory
//!
//! **Discounting**: before each update, positive cumulative regret is scaled
//! by `t^α / (t^α + 1)` and negative regret by `t^β / (t^β + 1)`.
//!
//! **Averaging**: the current strategy is added to the cumulative strategy
//! with weight `(t + 1)^γ`, so late iterations dominate.
//!
//! With `(α, β, γ) = (1.5, 0, 2)` this is the schedule recommended by Brown
//! and Sandholm.
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete Information" (2007)
//! - Brown, N., Sandholm, T. "Solving Imperfect-Information Games via Discounted Regret Minimization" (2019)

pub mod config;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod solver;
pub mod storage;
pub mod strategy;
pub mod tree;
pub mod vector;

// Re-export main types for convenient access
pub use config::{CFRStats, DcfrConfig, DiscountWeights};
pub use error::{ConfigError, SolverError};
pub use evaluation::{best_response_value, compute_ev, compute_exploitability};
pub use game::{Game, GameNode, PublicHistory};
pub use solver::CFRMinimizer;
pub use storage::{Matrix, StrategyTables};
pub use strategy::{compute_average_strategy, regret_matching, StrategyEntry, StrategyProfile};
pub use tree::{PublicTree, TreeBuilder};
