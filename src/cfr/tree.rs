//! Allocation pass over the public game tree.
//!
//! Before any iteration runs, [`TreeBuilder`] walks the whole tree once,
//! allocating a zeroed matrix in both [`StrategyTables`] for every reachable
//! public history. It records the walk as an arena of decision nodes so that
//! the per-iteration traversal can find table slots by index instead of by
//! hashing public histories.

use crate::cfr::error::{describe, SolverError};
use crate::cfr::game::{Game, GameNode, PublicHistory};
use crate::cfr::storage::StrategyTables;

/// A decision node of the public tree arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Table slot of this node's public history.
    pub slot: usize,
    /// Acting player.
    pub player: usize,
    /// Arena id of the child reached by each action; `None` for terminal children.
    pub children: Vec<Option<usize>>,
}

/// Arena of decision nodes mirroring the game tree, in depth-first order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicTree {
    nodes: Vec<TreeNode>,
    root: Option<usize>,
    num_slots: usize,
    num_terminals: usize,
}

impl PublicTree {
    /// Arena id of the root, or `None` if the root is terminal.
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// Decision node with arena id `id`.
    pub fn node(&self, id: usize) -> &TreeNode {
        &self.nodes[id]
    }

    /// Number of decision nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of terminal nodes reached by the build.
    pub fn num_terminals(&self) -> usize {
        self.num_terminals
    }

    /// Number of distinct public histories seen by the build.
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Returns whether some public history labels more than one decision node.
    pub fn has_shared_histories(&self) -> bool {
        self.nodes.len() != self.num_slots
    }

    /// Returns the slot of the first public history shared by several decision nodes.
    pub fn first_shared_slot(&self) -> Option<usize> {
        let mut seen = vec![false; self.num_slots];
        self.nodes.iter().find_map(|node| {
            if std::mem::replace(&mut seen[node.slot], true) {
                Some(node.slot)
            } else {
                None
            }
        })
    }
}

/// Builds a [`PublicTree`] and allocates table entries for a game.
pub struct TreeBuilder<'a, G: Game> {
    game: &'a G,
    nodes: Vec<TreeNode>,
    num_terminals: usize,
}

impl<'a, G: Game> TreeBuilder<'a, G> {
    /// Create a builder for `game`.
    pub fn new(game: &'a G) -> Self {
        Self {
            game,
            nodes: Vec::new(),
            num_terminals: 0,
        }
    }

    /// Walks the tree from the game's root, allocating every public history in `tables`.
    ///
    /// Histories already present in `tables` are left untouched, so running the
    /// build twice over the same tables changes nothing.
    pub fn build(
        mut self,
        tables: &mut StrategyTables<PublicHistory<G>>,
    ) -> Result<PublicTree, SolverError> {
        let root = self.game.root();
        let root_id = self.visit(&root, tables)?;
        Ok(PublicTree {
            nodes: self.nodes,
            root: root_id,
            num_slots: tables.len(),
            num_terminals: self.num_terminals,
        })
    }

    fn visit(
        &mut self,
        node: &G::Node,
        tables: &mut StrategyTables<PublicHistory<G>>,
    ) -> Result<Option<usize>, SolverError> {
        if node.is_terminal() {
            self.num_terminals += 1;
            return Ok(None);
        }

        let history = node.public_history();
        let num_actions = node.num_actions();
        if num_actions == 0 {
            return Err(SolverError::NoActions {
                history: describe(history),
            });
        }
        let player = node.current_player();
        if player > 1 {
            return Err(SolverError::InvalidPlayer {
                history: describe(history),
                player,
            });
        }

        let slot = tables.ensure(history, num_actions)?;
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            slot,
            player,
            children: Vec::with_capacity(num_actions),
        });

        for action in node.actions() {
            let child = self.visit(&node.play(action), tables)?;
            self.nodes[id].children.push(child);
        }

        Ok(Some(id))
    }
}
