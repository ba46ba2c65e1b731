//! Game implementations for the DCFR minimizer.
//!
//! These serve as:
//!
//! 1. **Validation**: Games with known Nash equilibria (Kuhn Poker, matching
//!    pennies) verify that the minimizer is correct.
//!
//! 2. **Examples**: Demonstrate how to implement the `Game` and `GameNode`
//!    traits for new games.
//!
//! 3. **Benchmarks**: Provide standardized games for performance testing.
//!
//! ## Available Games
//!
//! - [`kuhn`]: Kuhn Poker, a 3-card poker game with a known equilibrium family
//! - [`matching_pennies`]: two hidden moves sharing one public history
//! - [`push_fold`]: heads-up push/fold Hold'em over all 1326 combos

pub mod kuhn;
pub mod matching_pennies;
pub mod push_fold;
