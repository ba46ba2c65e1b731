//! Heads-up push/fold solver binary.
//!
//! Solves one push/fold game per effective stack, in parallel, and prints the
//! pusher's and caller's starting-hand charts for each.
//!
//! The all-in equity table is read from a JSON file holding a flat array of
//! 1326 × 1326 half-board win counts (see `EquityTable`).

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use dcfr_solver::cfr::{compute_ev, compute_exploitability, CFRMinimizer, DcfrConfig, SolverError};
use dcfr_solver::games::push_fold::{
    hand_chart, overall_rate, EquityTable, PushFoldGame, NUM_RANKS, PUSH_CALL, RANK_CHARS,
};

/// Outcome of one solved stack depth.
struct StackResult {
    stack: f64,
    ev: f64,
    exploitability: f64,
    terminal_nodes: usize,
    push: Vec<f64>,
    call: Vec<f64>,
    elapsed_secs: f64,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut equity_file: Option<String> = None;
    let mut stacks: Vec<f64> = vec![10.0];
    let mut iterations: u64 = 1000;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--equity" | "-e" => {
                i += 1;
                if i < args.len() {
                    equity_file = Some(args[i].clone());
                }
            }
            "--stacks" | "-s" => {
                i += 1;
                if i < args.len() {
                    stacks = args[i]
                        .split(',')
                        .filter_map(|s| s.trim().parse().ok())
                        .collect();
                }
            }
            "--iterations" | "-i" => {
                i += 1;
                if i < args.len() {
                    iterations = args[i].parse().unwrap_or(iterations);
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    let Some(equity_file) = equity_file else {
        eprintln!("Missing --equity <FILE>");
        print_help();
        return;
    };
    if stacks.is_empty() {
        eprintln!("No valid stack sizes given");
        return;
    }

    println!("=== Heads-up Push/Fold Solver ===");
    println!("Loading equity table from: {}", equity_file);
    let equity = match EquityTable::from_json_file(&equity_file) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            eprintln!("Error loading equity table: {}", e);
            return;
        }
    };

    println!("Stacks to solve: {:?}", stacks);
    println!("Iterations per stack: {}\n", iterations);

    let total_start = Instant::now();
    let completed = AtomicUsize::new(0);
    let total_stacks = stacks.len();

    let results: Vec<Result<StackResult, SolverError>> = stacks
        .par_iter()
        .map(|&stack| {
            let result = solve_stack(stack, Arc::clone(&equity), iterations);
            let count = completed.fetch_add(1, Ordering::Relaxed) + 1;
            match &result {
                Ok(r) => println!(
                    "[{}/{}] {}bb - exploitability: {:+.3e}, time: {:.2}s",
                    count, total_stacks, stack, r.exploitability, r.elapsed_secs
                ),
                Err(e) => eprintln!("[{}/{}] {}bb - failed: {}", count, total_stacks, stack, e),
            }
            result
        })
        .collect();

    println!("\nTotal time: {:.2}s", total_start.elapsed().as_secs_f64());

    for result in results.iter().flatten() {
        print_result(result);
    }
}

fn solve_stack(
    stack: f64,
    equity: Arc<EquityTable>,
    iterations: u64,
) -> Result<StackResult, SolverError> {
    let start = Instant::now();
    let game = PushFoldGame::new(stack, equity);
    let config = DcfrConfig::default().with_log_interval(100);
    let mut minimizer = CFRMinimizer::with_config(&game, config);
    let strategy = minimizer.compute(iterations)?;

    let ev = compute_ev(&game, 0, &strategy)?;
    let exploitability = compute_exploitability(&game, &strategy)?;

    let row = |history: Vec<usize>| -> Result<Vec<f64>, SolverError> {
        strategy
            .get(&history)
            .map(|matrix| matrix[PUSH_CALL].clone())
            .ok_or_else(|| SolverError::MissingHistory {
                history: format!("{:?}", history),
            })
    };

    Ok(StackResult {
        stack: game.effective_stack(),
        ev,
        exploitability,
        terminal_nodes: minimizer.stats().terminal_nodes,
        push: row(vec![])?,
        call: row(vec![PUSH_CALL])?,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

fn print_result(result: &StackResult) {
    println!();
    println!(
        "[Heads-up Push/Fold Hold'em] (effective stack = {}[bb])",
        result.stack
    );
    println!("- Exploitability: {:+.3e}[bb]", result.exploitability);
    println!("- Terminal nodes: {}", result.terminal_nodes);

    println!();
    println!("[Pusher (Small blind)]");
    println!("- EV: {:+.4}[bb]", result.ev);
    println!("- Overall push rate: {:.2}%", 100.0 * overall_rate(&result.push));
    print_chart(&hand_chart(&result.push));

    println!();
    println!("[Caller (Big blind)]");
    println!("- EV: {:+.4}[bb]", -result.ev);
    println!("- Overall call rate: {:.2}%", 100.0 * overall_rate(&result.call));
    print_chart(&hand_chart(&result.call));
}

/// Prints a 13×13 chart with aces first; suited hands above the diagonal.
fn print_chart(chart: &[Vec<f64>]) {
    print!(" |");
    for rank in (0..NUM_RANKS).rev() {
        print!("   {}  ", RANK_CHARS[rank]);
    }
    println!();
    println!("-+{}", "-".repeat(6 * NUM_RANKS));

    for row_rank in (0..NUM_RANKS).rev() {
        print!("{}|", RANK_CHARS[row_rank]);
        for col_rank in (0..NUM_RANKS).rev() {
            let rate = chart[col_rank][row_rank];
            if rate >= 0.9995 {
                print!(" 100.%");
            } else if rate < 0.0005 {
                print!("   -  ");
            } else {
                print!(" {:>4.1}%", 100.0 * rate);
            }
        }
        println!();
    }
}

fn print_help() {
    println!("Heads-up Push/Fold DCFR Solver");
    println!();
    println!("USAGE:");
    println!("    solve_push_fold --equity <FILE> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -e, --equity <FILE>       Equity table JSON (1326 x 1326 win counts)");
    println!("    -s, --stacks <LIST>       Comma-separated effective stacks in bb (default: 10)");
    println!("    -i, --iterations <N>      Iterations per stack (default: 1000)");
    println!("    -h, --help                Print help");
}
