//! Kuhn Poker solver binary.
//!
//! Runs DCFR on Kuhn Poker and prints both players' strategies, the first
//! player's EV and the exploitability of the result.
//!
//! Set `RUST_LOG=debug` to see per-iteration progress in the log.

use std::env;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use dcfr_solver::cfr::{
    compute_ev, compute_exploitability, CFRMinimizer, DcfrConfig, StrategyProfile,
};
use dcfr_solver::games::kuhn::{KuhnGame, BET, CARD_NAMES, NUM_CARDS, PASS};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut iterations: u64 = 10_000;
    let mut config_file: Option<String> = None;
    let mut json_output = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--iterations" | "-i" => {
                i += 1;
                if i < args.len() {
                    iterations = args[i].parse().unwrap_or(iterations);
                }
            }
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            }
            "--json" => {
                json_output = true;
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

    let config = match &config_file {
        Some(path) => match DcfrConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                return;
            }
        },
        None => DcfrConfig::default(),
    };

    let game = KuhnGame::new();
    let mut minimizer = CFRMinimizer::with_config(&game, config);

    let progress = ProgressBar::new(iterations);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Solving [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let result = minimizer.compute_with_callback(iterations, 100, |stats| {
        progress.set_position(stats.iterations);
    });
    progress.finish_and_clear();
    let duration = start.elapsed();

    let strategy = match result {
        Ok(strategy) => strategy,
        Err(e) => {
            eprintln!("Error solving: {}", e);
            return;
        }
    };

    if json_output {
        match serde_json::to_string_pretty(&strategy.entries()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing strategy: {}", e),
        }
        return;
    }

    let ev = compute_ev(&game, 0, &strategy);
    let exploitability = compute_exploitability(&game, &strategy);
    let (ev, exploitability) = match (ev, exploitability) {
        (Ok(ev), Ok(exploitability)) => (ev, exploitability),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error evaluating strategy: {}", e);
            return;
        }
    };

    let schedule = minimizer.config();
    let stats = minimizer.stats();
    println!("Solved {} iterations in {:.3}s", iterations, duration.as_secs_f64());
    println!(
        "Schedule: alpha = {}, beta = {}, gamma = {}",
        schedule.alpha, schedule.beta, schedule.gamma
    );
    println!(
        "Tree: {} decision nodes, {} terminal nodes",
        stats.decision_nodes, stats.terminal_nodes
    );
    println!();
    println!("[Kuhn Poker]");
    println!("- Exploitability: {:+.3e}", exploitability);

    print_section(
        &strategy,
        "First player",
        ev,
        &[
            (vec![], "", "Bet"),
            (vec![PASS, BET], "(Check => Bet => ?)", "Call"),
        ],
    );
    print_section(
        &strategy,
        "Second player",
        -ev,
        &[
            (vec![PASS], "(Check => ?)", "Bet"),
            (vec![BET], "(Bet => ?)", "Call"),
        ],
    );
}

/// Prints the betting (or calling) frequency of each card at `spots`.
fn print_section(
    strategy: &StrategyProfile<Vec<usize>>,
    title: &str,
    ev: f64,
    spots: &[(Vec<usize>, &str, &str)],
) {
    println!();
    println!("[{}]", title);
    println!("- EV: {:+.4}", ev);
    for (history, label, action) in spots {
        println!("- {}% {}", action, label);
        for card in (0..NUM_CARDS).rev() {
            let p = strategy.probability(history, BET, card).unwrap_or(0.0);
            println!("    {}: {:.2}%", CARD_NAMES[card], 100.0 * p);
        }
    }
}

fn print_help() {
    println!("Kuhn Poker DCFR Solver");
    println!();
    println!("USAGE:");
    println!("    solve_kuhn [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -i, --iterations <N>    Number of iterations (default: 10000)");
    println!("    -c, --config <FILE>     DCFR config JSON (alpha, beta, gamma, log_interval)");
    println!("        --json              Print the average strategy as JSON");
    println!("    -h, --help              Print help");
}
