//! Strategy evaluation: expected value, best response and exploitability.
//!
//! These walk the public tree with per-hand reach vectors, the same way the
//! minimizer does, but read a fixed [`StrategyProfile`] instead of updating
//! tables.

use crate::cfr::error::{describe, SolverError};
use crate::cfr::game::{Game, GameNode, PublicHistory};
use crate::cfr::storage::{Matrix, StrategyTables};
use crate::cfr::strategy::StrategyProfile;
use crate::cfr::tree::TreeBuilder;
use crate::cfr::vector::{add_assign, dot, mul};

/// Expected value of `player` when both players follow `profile`.
///
/// # Example
/// ```
/// use dcfr_solver::cfr::{compute_ev, CFRMinimizer};
/// use dcfr_solver::games::kuhn::KuhnGame;
///
/// let game = KuhnGame::new();
/// let profile = CFRMinimizer::new(&game).compute(1_000).unwrap();
/// let ev = compute_ev(&game, 0, &profile).unwrap();
/// assert!((ev + 1.0 / 18.0).abs() < 1e-3);
/// ```
pub fn compute_ev<G: Game>(
    game: &G,
    player: usize,
    profile: &StrategyProfile<PublicHistory<G>>,
) -> Result<f64, SolverError> {
    let ones = vec![1.0; game.num_private_hands()];
    ev_recursive(game, &game.root(), player, &ones, &ones, profile)
}

fn ev_recursive<G: Game>(
    game: &G,
    node: &G::Node,
    player: usize,
    pi: &[f64],
    pmi: &[f64],
    profile: &StrategyProfile<PublicHistory<G>>,
) -> Result<f64, SolverError> {
    if node.is_terminal() {
        return Ok(dot(pi, &game.evaluate(node, player, pmi)));
    }

    let strategy = lookup::<G>(profile, node)?;
    let mut ev = 0.0;
    for action in node.actions() {
        let child = node.play(action);
        ev += if node.current_player() == player {
            ev_recursive(game, &child, player, &mul(pi, &strategy[action]), pmi, profile)?
        } else {
            ev_recursive(game, &child, player, pi, &mul(pmi, &strategy[action]), profile)?
        };
    }
    Ok(ev)
}

/// Value `player` obtains by best-responding to the opponent's part of `profile`.
///
/// The result is summed over `player`'s private hands, so it is on the same
/// scale as [`compute_ev`].
pub fn best_response_value<G: Game>(
    game: &G,
    player: usize,
    profile: &StrategyProfile<PublicHistory<G>>,
) -> Result<f64, SolverError> {
    let ones = vec![1.0; game.num_private_hands()];
    let values = best_response_recursive(game, &game.root(), player, &ones, profile)?;
    Ok(values.iter().sum())
}

fn best_response_recursive<G: Game>(
    game: &G,
    node: &G::Node,
    player: usize,
    pmi: &[f64],
    profile: &StrategyProfile<PublicHistory<G>>,
) -> Result<Vec<f64>, SolverError> {
    if node.is_terminal() {
        return Ok(game.evaluate(node, player, pmi));
    }

    if node.current_player() == player {
        let mut best = vec![f64::NEG_INFINITY; pmi.len()];
        for action in node.actions() {
            let values = best_response_recursive(game, &node.play(action), player, pmi, profile)?;
            best.iter_mut()
                .zip(&values)
                .for_each(|(b, v)| *b = b.max(*v));
        }
        Ok(best)
    } else {
        let strategy = lookup::<G>(profile, node)?;
        let mut values = vec![0.0; pmi.len()];
        for action in node.actions() {
            let pmi = mul(pmi, &strategy[action]);
            let child = best_response_recursive(game, &node.play(action), player, &pmi, profile)?;
            add_assign(&mut values, &child);
        }
        Ok(values)
    }
}

/// Exploitability of `profile`: the mean of both players' best-response values.
///
/// Zero at a Nash equilibrium of a zero-sum game. The two best responses are
/// computed concurrently.
///
/// Fails with [`SolverError::AmbiguousPublicHistory`] when a public history
/// labels several decision nodes, since a per-node best response would then
/// see moves the responding player cannot observe.
pub fn compute_exploitability<G>(
    game: &G,
    profile: &StrategyProfile<PublicHistory<G>>,
) -> Result<f64, SolverError>
where
    G: Game + Sync,
    PublicHistory<G>: Sync,
{
    let mut tables = StrategyTables::new(game.num_private_hands());
    let tree = TreeBuilder::new(game).build(&mut tables)?;
    if let Some(slot) = tree.first_shared_slot() {
        return Err(SolverError::AmbiguousPublicHistory {
            history: describe(&tables.histories()[slot]),
        });
    }

    let (br0, br1) = rayon::join(
        || best_response_value(game, 0, profile),
        || best_response_value(game, 1, profile),
    );
    Ok((br0? + br1?) / 2.0)
}

fn lookup<'p, G: Game>(
    profile: &'p StrategyProfile<PublicHistory<G>>,
    node: &G::Node,
) -> Result<&'p Matrix, SolverError> {
    profile
        .get(node.public_history())
        .ok_or_else(|| SolverError::MissingHistory {
            history: describe(node.public_history()),
        })
}
