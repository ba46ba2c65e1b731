//! # DCFR Solver
//!
//! A Discounted Counterfactual Regret Minimization (DCFR) solver for
//! computing Nash equilibrium strategies in two-player zero-sum games with
//! imperfect information.
//!
//! ## Features
//!
//! - **Generic Engine**: Works with any game implementing the `Game` trait
//! - **Vectorized Traversal**: One reach probability per private hand
//! - **Arena Tree**: Public histories resolved to dense slots before solving
//! - **Exploitability Calculation**: Measure strategy quality
//!
//! ## Quick Start
//!
//! ```
//! use dcfr_solver::cfr::{compute_ev, CFRMinimizer};
//! use dcfr_solver::games::kuhn::KuhnGame;
//!
//! // 1. Pick a game implementing `Game`
//! let game = KuhnGame::new();
//!
//! // 2. Create a minimizer and run it
//! let mut minimizer = CFRMinimizer::new(&game);
//! let strategy = minimizer.compute(1_000).unwrap();
//!
//! // 3. Inspect the average strategy
//! let ev = compute_ev(&game, 0, &strategy).unwrap();
//! assert!((ev + 1.0 / 18.0).abs() < 1e-3);
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: Core DCFR algorithm, tables and evaluation
//! - [`games`]: Game implementations (Kuhn Poker, push/fold, ...)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     DCFR Minimizer (Generic)                    │
//! │  - Public tree arena      - Discounted regret updates           │
//! │  - Regret matching        - EV / exploitability                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements Game trait
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌───────────┐         ┌───────────┐
//!    │  Kuhn   │         │ Matching  │         │ Push/Fold │
//!    │  Poker  │         │  Pennies  │         │  Hold'em  │
//!    └─────────┘         └───────────┘         └───────────┘
//! ```

#![warn(missing_docs)]

/// DCFR (Discounted Counterfactual Regret Minimization) module.
///
/// This is the core module containing the generic algorithm.
pub mod cfr;

/// Game implementations module.
///
/// Contains games like Kuhn Poker for testing and validation.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use cfr::{CFRMinimizer, CFRStats, DcfrConfig, Game, GameNode, SolverError, StrategyProfile};
