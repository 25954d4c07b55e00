//! yacht: CLI binary for the yacht dice game.
//!
//! Subcommands:
//! - play (default): interactive terminal game
//! - sim: seeded random playouts through the engine

use std::env;
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use yacht_core::{validate_config, Config, GameSession, DICE_COUNT};

const DEFAULT_CONFIG: &str = "yacht.yaml";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let rest: &[String] = if args.is_empty() { &[] } else { &args[1..] };
    match args.first().map(String::as_str) {
        None | Some("play") => cmd_play(rest),
        Some("sim") => cmd_sim(rest),
        Some("--help") | Some("-h") | Some("help") => print_usage(),
        Some(other) => {
            eprintln!("Unknown subcommand: {}", other);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"yacht - single-player dice game

USAGE:
    yacht [play] [--config PATH] [--no-restore]
    yacht sim [--games N] [--seed S] [--no-hist]

Run `yacht <subcommand> --help` for details.
"#
    );
}

fn cmd_play(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut restore = true;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yacht play

USAGE:
    yacht play [--config PATH] [--no-restore]

OPTIONS:
    --config PATH    Config file (default: ./{DEFAULT_CONFIG} if present)
    --no-restore     Start fresh instead of resuming the saved game
"#
                );
                return;
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --config");
                    process::exit(1);
                }
                config_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--no-restore" => {
                restore = false;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `yacht play`: {}", other);
                eprintln!("Run `yacht play --help` for usage.");
                process::exit(1);
            }
        }
    }

    let cfg = match &config_path {
        Some(p) => Config::load(p).unwrap_or_else(|e| {
            eprintln!("Failed to load {}: {}", p, e);
            process::exit(1);
        }),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Config::load(DEFAULT_CONFIG).unwrap_or_else(|e| {
                eprintln!("Failed to load {}: {}", DEFAULT_CONFIG, e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };
    if let Err(e) = validate_config(&cfg) {
        eprintln!("Invalid config: {}", e);
        process::exit(1);
    }

    if let Err(e) = yacht_tui::run(&cfg, restore) {
        eprintln!("Terminal error: {}", e);
        process::exit(1);
    }
}

fn cmd_sim(args: &[String]) {
    let mut games: usize = 1000;
    let mut seed: u64 = 0;
    let mut no_hist = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yacht sim

USAGE:
    yacht sim [--games N] [--seed S] [--no-hist]

OPTIONS:
    --games N    Number of games to simulate (default: 1000)
    --seed S     RNG seed (default: 0)
    --no-hist    Skip printing the histogram
"#
                );
                return;
            }
            "--games" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --games");
                    process::exit(1);
                }
                games = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --games value: {}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            "--seed" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --seed");
                    process::exit(1);
                }
                seed = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --seed value: {}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            "--no-hist" => {
                no_hist = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `yacht sim`: {}", other);
                eprintln!("Run `yacht sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    if games == 0 {
        eprintln!("--games must be >= 1");
        process::exit(1);
    }

    println!("Simulating {} games (seed {})...", games, seed);
    let totals = run_sim(games, seed);

    let n = totals.len() as f64;
    let mean = totals.iter().map(|&t| t as f64).sum::<f64>() / n;
    let min = totals.iter().copied().min().unwrap_or(0);
    let max = totals.iter().copied().max().unwrap_or(0);
    println!();
    println!("mean {:.2}  min {}  max {}", mean, min, max);

    if !no_hist {
        println!();
        print_histogram(&totals);
    }
}

/// Play `games` full games with a greedy-random policy and return the
/// final score of each.
fn run_sim(games: usize, seed: u64) -> Vec<i32> {
    let mut totals = Vec::with_capacity(games);
    for g in 0..games {
        let game_seed = seed ^ (g as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        totals.push(play_one(game_seed));
    }
    totals
}

/// One full game: roll, sometimes hold-and-reroll, then commit the
/// best-scoring empty category. Exercises every engine operation.
fn play_one(seed: u64) -> i32 {
    let mut chooser = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let mut session = GameSession::with_seed(seed);
    session.set_reset_delay(Duration::ZERO);

    while !session.is_game_over() {
        if !session.roll().applied() {
            break;
        }
        while session.can_roll() && chooser.gen_bool(0.5) {
            for i in 0..DICE_COUNT {
                if chooser.gen_bool(0.5) {
                    session.toggle_hold(i);
                }
            }
            session.roll();
        }
        session.clear_holds();

        let Some(cat) = session.best_category() else {
            break;
        };
        let now = Instant::now();
        if !session.commit(cat, now).applied() {
            break;
        }
        session.tick(now);
    }
    session.total_score()
}

fn print_histogram(totals: &[i32]) {
    const BUCKET: i32 = 25;
    let max = totals.iter().copied().max().unwrap_or(0);
    let mut buckets = vec![0usize; (max / BUCKET + 1) as usize];
    for &t in totals {
        buckets[(t / BUCKET) as usize] += 1;
    }
    let peak = buckets.iter().copied().max().unwrap_or(1).max(1);
    for (i, &count) in buckets.iter().enumerate() {
        let lo = i as i32 * BUCKET;
        let bar = "#".repeat(count * 40 / peak);
        println!("{:>3}-{:<3} {:>6} {}", lo, lo + BUCKET - 1, count, bar);
    }
}
