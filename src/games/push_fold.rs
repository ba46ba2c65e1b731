//! Heads-up push/fold No-Limit Hold'em.
//!
//! The small blind either folds (losing 0.5bb) or pushes all-in; facing a
//! push, the big blind folds (losing 1bb) or calls and the hand goes to a
//! five-card showdown for the effective stack.
//!
//! Private hands are the 1326 two-card combos, indexed in lexicographic order
//! of `(low card, high card)`. Card `c` has rank `c / 4` (deuce = 0, ace = 12)
//! and suit `c % 4`.
//!
//! Showdown equities come from an [`EquityTable`] supplied by the caller.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::cfr::game::{Game, GameNode};

/// Fold.
pub const FOLD: usize = 0;

/// Push for the small blind, call for the big blind.
pub const PUSH_CALL: usize = 1;

/// Cards in the deck.
pub const NUM_CARDS: usize = 52;

/// Two-card combos: the private hands of each player.
pub const NUM_COMBOS: usize = NUM_CARDS * (NUM_CARDS - 1) / 2;

/// Five-card boards left once both players hold two cards: C(48, 5).
pub const NUM_BOARDS: i32 = 1_712_304;

/// Number of ranks.
pub const NUM_RANKS: usize = 13;

/// Rank characters, deuce first.
pub const RANK_CHARS: [char; NUM_RANKS] =
    ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Probability of one specific pair of non-overlapping combos: 1 / (1326 · 1225).
const DEAL_PROB: f64 = 1.0 / (NUM_COMBOS as f64 * 1225.0);

/// Errors raised while loading an [`EquityTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum EquityTableError {
    /// The table file could not be read.
    Io(String),
    /// The table file is not a JSON array of integers.
    Parse(String),
    /// The table does not have one entry per ordered combo pair.
    Size {
        /// Required number of entries.
        expected: usize,
        /// Number of entries found.
        actual: usize,
    },
}

impl fmt::Display for EquityTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquityTableError::Io(e) => write!(f, "IO error: {}", e),
            EquityTableError::Parse(e) => write!(f, "Parse error: {}", e),
            EquityTableError::Size { expected, actual } => {
                write!(f, "equity table has {} entries, expected {}", actual, expected)
            }
        }
    }
}

impl std::error::Error for EquityTableError {}

/// Preflop all-in win frequencies for every ordered pair of combos.
///
/// Entry `hero * 1326 + villain` counts, over all [`NUM_BOARDS`] boards, two
/// for each board the hero wins and one for each tie. Pairs of overlapping
/// combos are never read.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityTable {
    win_freq: Vec<i32>,
}

impl EquityTable {
    /// Wrap a table of half-board win counts.
    pub fn from_win_frequencies(win_freq: Vec<i32>) -> Result<Self, EquityTableError> {
        let expected = NUM_COMBOS * NUM_COMBOS;
        if win_freq.len() != expected {
            return Err(EquityTableError::Size {
                expected,
                actual: win_freq.len(),
            });
        }
        Ok(Self { win_freq })
    }

    /// Load a table stored as a flat JSON array of integers.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, EquityTableError> {
        let file = File::open(path.as_ref()).map_err(|e| EquityTableError::Io(e.to_string()))?;
        let win_freq: Vec<i32> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| EquityTableError::Parse(e.to_string()))?;
        Self::from_win_frequencies(win_freq)
    }

    /// Build a table from an equity function `(hero, villain) -> [0, 1]`.
    ///
    /// Equities outside `[0, 1]` are clamped to the nearest bound.
    pub fn from_fn<F>(equity: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let scale = 2.0 * NUM_BOARDS as f64;
        let mut win_freq = Vec::with_capacity(NUM_COMBOS * NUM_COMBOS);
        for hero in 0..NUM_COMBOS {
            for villain in 0..NUM_COMBOS {
                let share = equity(hero, villain).clamp(0.0, 1.0);
                win_freq.push((share * scale).round() as i32);
            }
        }
        Self { win_freq }
    }

    /// Half-board win count of `hero` against `villain`.
    #[inline]
    pub fn win_frequency(&self, hero: usize, villain: usize) -> i32 {
        self.win_freq[hero * NUM_COMBOS + villain]
    }
}

/// Returns the two cards of every combo, in combo-index order.
pub fn combos() -> Vec<(usize, usize)> {
    (0..NUM_CARDS)
        .flat_map(|low| ((low + 1)..NUM_CARDS).map(move |high| (low, high)))
        .collect()
}

/// Heads-up push/fold game at a fixed effective stack (in big blinds).
#[derive(Debug, Clone)]
pub struct PushFoldGame {
    effective_stack: f64,
    equity: Arc<EquityTable>,
    combos: Vec<(usize, usize)>,
}

/// A node of the push/fold tree: the action sequence so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PushFoldNode {
    history: Vec<usize>,
}

impl PushFoldGame {
    /// Create a game with `effective_stack` big blinds behind.
    pub fn new(effective_stack: f64, equity: Arc<EquityTable>) -> Self {
        Self {
            effective_stack,
            equity,
            combos: combos(),
        }
    }

    /// Effective stack in big blinds.
    pub fn effective_stack(&self) -> f64 {
        self.effective_stack
    }

    /// Values when someone folded: every compatible opponent combo pays the same.
    fn evaluate_fold(&self, node: &PushFoldNode, player: usize, pmi: &[f64]) -> Vec<f64> {
        let payoff = match node.history.len() {
            // small blind folded
            1 => [-0.5, 0.5][player],
            // big blind folded to the push
            _ => [1.0, -1.0][player],
        } * DEAL_PROB;

        // inclusion-exclusion over the opponent combos sharing a card with ours
        let pmi_sum: f64 = pmi.iter().sum();
        let mut pmi_sum_card = [0.0; NUM_CARDS];
        for (&(low, high), &reach) in self.combos.iter().zip(pmi) {
            pmi_sum_card[low] += reach;
            pmi_sum_card[high] += reach;
        }

        self.combos
            .iter()
            .zip(pmi)
            .map(|(&(low, high), &reach)| {
                payoff * (pmi_sum - pmi_sum_card[low] - pmi_sum_card[high] + reach)
            })
            .collect()
    }

    /// Values at the all-in showdown; identical from both seats.
    fn evaluate_showdown(&self, pmi: &[f64]) -> Vec<f64> {
        let scale = DEAL_PROB * 0.5 / NUM_BOARDS as f64;
        self.combos
            .iter()
            .enumerate()
            .map(|(hero, &(low, high))| {
                let mut cfvalue = 0.0;
                for (villain, &(v_low, v_high)) in self.combos.iter().enumerate() {
                    if low == v_low || low == v_high || high == v_low || high == v_high {
                        continue;
                    }
                    let win = self.equity.win_frequency(hero, villain);
                    let lose = 2 * NUM_BOARDS - win;
                    cfvalue += self.effective_stack * (win - lose) as f64 * pmi[villain];
                }
                scale * cfvalue
            })
            .collect()
    }
}

impl Game for PushFoldGame {
    type Node = PushFoldNode;

    fn num_actions(&self) -> usize {
        2
    }

    fn num_private_hands(&self) -> usize {
        NUM_COMBOS
    }

    fn root(&self) -> PushFoldNode {
        PushFoldNode::default()
    }

    fn evaluate(&self, node: &PushFoldNode, player: usize, pmi: &[f64]) -> Vec<f64> {
        if node.history.last() == Some(&FOLD) {
            self.evaluate_fold(node, player, pmi)
        } else {
            self.evaluate_showdown(pmi)
        }
    }
}

impl GameNode for PushFoldNode {
    type PublicHistory = Vec<usize>;

    fn is_terminal(&self) -> bool {
        !matches!(self.history.as_slice(), [] | [PUSH_CALL])
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

/// Averages a per-combo frequency into the 13×13 starting-hand chart.
///
/// `chart[r1][r2]` with `r1 < r2` is the suited hand, `r1 > r2` the offsuit
/// hand and `r1 == r2` the pocket pair (ranks indexed deuce first).
pub fn hand_chart(frequencies: &[f64]) -> Vec<Vec<f64>> {
    let mut chart = vec![vec![0.0; NUM_RANKS]; NUM_RANKS];
    for (&(low, high), &freq) in combos().iter().zip(frequencies) {
        let (low_rank, high_rank) = (low / 4, high / 4);
        if low % 4 == high % 4 {
            chart[low_rank][high_rank] += freq;
        } else {
            chart[high_rank][low_rank] += freq;
        }
    }

    for (r1, row) in chart.iter_mut().enumerate() {
        for (r2, cell) in row.iter_mut().enumerate() {
            let count = match r1.cmp(&r2) {
                std::cmp::Ordering::Equal => 6.0,
                std::cmp::Ordering::Less => 4.0,
                std::cmp::Ordering::Greater => 12.0,
            };
            *cell /= count;
        }
    }
    chart
}

/// Mean of a per-combo frequency over all combos.
pub fn overall_rate(frequencies: &[f64]) -> f64 {
    frequencies.iter().sum::<f64>() / NUM_COMBOS as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::{compute_ev, CFRMinimizer};

    fn coin_flip_table() -> Arc<EquityTable> {
        Arc::new(EquityTable::from_fn(|_, _| 0.5))
    }

    #[test]
    fn test_combo_enumeration() {
        let combos = combos();
        assert_eq!(combos.len(), NUM_COMBOS);
        assert_eq!(combos[0], (0, 1));
        assert_eq!(combos[50], (0, 51));
        assert_eq!(combos[51], (1, 2));
        assert_eq!(combos[NUM_COMBOS - 1], (50, 51));
    }

    #[test]
    fn test_push_fold_tree() {
        let game = PushFoldGame::new(10.0, coin_flip_table());
        assert_eq!(game.effective_stack(), 10.0);
        let root = game.root();
        assert!(!root.is_terminal());
        assert_eq!(root.current_player(), 0);
        assert!(root.play(FOLD).is_terminal());

        let push = root.play(PUSH_CALL);
        assert!(!push.is_terminal());
        assert_eq!(push.current_player(), 1);
        assert!(push.play(FOLD).is_terminal());
        assert!(push.play(PUSH_CALL).is_terminal());
    }

    #[test]
    fn test_fold_values_respect_card_removal() {
        let game = PushFoldGame::new(10.0, coin_flip_table());
        let ones = vec![1.0; NUM_COMBOS];

        // every combo meets 1225 compatible opponent combos
        let sb_fold = game.evaluate(&game.root().play(FOLD), 0, &ones);
        assert!(sb_fold.iter().all(|&v| (v * NUM_COMBOS as f64 + 0.5).abs() < 1e-12));
        assert!((sb_fold.iter().sum::<f64>() + 0.5).abs() < 1e-9);

        let bb_fold = game.evaluate(&game.root().play(PUSH_CALL).play(FOLD), 1, &ones);
        assert!((bb_fold.iter().sum::<f64>() + 1.0).abs() < 1e-9);

        // an opponent who only ever holds the deuce of clubs with the deuce of diamonds
        let mut pmi = vec![0.0; NUM_COMBOS];
        pmi[0] = 1.0;
        let values = game.evaluate(&game.root().play(FOLD), 1, &pmi);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[1], 0.0); // (0, 2) shares the deuce of clubs
        assert!((values[NUM_COMBOS - 1] - 0.5 * DEAL_PROB).abs() < 1e-18);
    }

    #[test]
    fn test_showdown_scales_with_stack() {
        let game = PushFoldGame::new(8.0, Arc::new(EquityTable::from_fn(|_, _| 1.0)));
        let ones = vec![1.0; NUM_COMBOS];
        let values = game.evaluate(&game.root().play(PUSH_CALL).play(PUSH_CALL), 0, &ones);
        assert!((values.iter().sum::<f64>() - 8.0).abs() < 1e-9);

        let values = PushFoldGame::new(8.0, coin_flip_table()).evaluate_showdown(&ones);
        assert!(values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_coin_flip_always_push_and_call() {
        // With no edge at showdown, pushing (worth 0) beats folding (-0.5) and
        // calling (worth 0) beats folding (-1).
        let game = PushFoldGame::new(10.0, coin_flip_table());
        let mut minimizer = CFRMinimizer::new(&game);
        let strategy = minimizer.compute(10).unwrap();

        let push = &strategy.get(&vec![]).unwrap()[PUSH_CALL];
        let call = &strategy.get(&vec![PUSH_CALL]).unwrap()[PUSH_CALL];
        assert!(overall_rate(push) > 0.99);
        assert!(overall_rate(call) > 0.99);
        assert!(push.iter().chain(call).all(|&p| p > 0.99));

        let ev = compute_ev(&game, 0, &strategy).unwrap();
        assert!(ev.abs() < 0.01, "EV {}", ev);
    }

    #[test]
    fn test_hand_chart_averages_each_class() {
        let chart = hand_chart(&vec![1.0; NUM_COMBOS]);
        assert!(chart.iter().flatten().all(|&v| (v - 1.0).abs() < 1e-12));

        // only the suited A-K combos
        let frequencies: Vec<f64> = combos()
            .iter()
            .map(|&(low, high)| {
                let suited_ak = low / 4 == 11 && high / 4 == 12 && low % 4 == high % 4;
                if suited_ak { 1.0 } else { 0.0 }
            })
            .collect();
        let chart = hand_chart(&frequencies);
        assert_eq!(chart[11][12], 1.0);
        assert_eq!(chart[12][11], 0.0);
        assert!((overall_rate(&frequencies) - 4.0 / NUM_COMBOS as f64).abs() < 1e-15);
    }

    #[test]
    fn test_table_size_is_checked() {
        assert_eq!(
            EquityTable::from_win_frequencies(vec![0; 3]),
            Err(EquityTableError::Size {
                expected: NUM_COMBOS * NUM_COMBOS,
                actual: 3
            })
        );
        assert!(matches!(
            EquityTable::from_json_file("/nonexistent/equity.json"),
            Err(EquityTableError::Io(_))
        ));
    }

    #[test]
    fn test_equity_is_clamped_to_unit_interval() {
        let table = EquityTable::from_fn(|hero, _| if hero == 0 { 1.5 } else { -0.2 });
        assert_eq!(table.win_frequency(0, NUM_COMBOS - 1), 2 * NUM_BOARDS);
        assert_eq!(table.win_frequency(1, NUM_COMBOS - 1), 0);
    }
}
