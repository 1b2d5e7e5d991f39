//! Perft throughput on standard and variant boards, for profiling.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p variant_core -- [depth] [position]
//!
//! Without a position every suite entry runs. Entries that name a preset go
//! through the full rule chain, so they are much slower than plain perft.

use std::env;
use std::time::{Duration, Instant};

use variant_core::{new_game, perft, perft_with_rules, preset, Position};

enum Case {
    /// Plain legal move tree from a position text.
    Plain(&'static str),
    /// Rule-chain tree from a preset's start position.
    Preset(&'static str),
}

const SUITE: &[(&str, Case)] = &[
    (
        "Starting position",
        Case::Plain("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    ),
    (
        "Kiwipete",
        Case::Plain("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"),
    ),
    (
        "10x8 filled",
        Case::Plain("rnqbkbnnnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNQBKBNNNR w KQkq - 0 1"),
    ),
    ("5x5", Case::Plain("rnbqk/ppppp/5/PPPPP/RNBQK w - - 0 1")),
    ("Bureaucrat", Case::Preset("Bureaucrat")),
    ("Double move x2", Case::Preset("Double move x2")),
];

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn run(case: &Case, depth: u8) -> Result<u64, String> {
    match case {
        Case::Plain(fen) => {
            let mut pos = Position::from_fen(fen).map_err(|e| e.to_string())?;
            Ok(perft(&mut pos, depth))
        }
        Case::Preset(name) => {
            let p = preset(name).map_err(|e| e.to_string())?;
            let game = new_game(&p, &p.configuration()).map_err(|e| e.to_string())?;
            Ok(perft_with_rules(game.position(), game.rules(), depth))
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    if let Some(fen) = args.get(2) {
        let mut pos = match Position::from_fen(fen) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("bad position: {e}");
                std::process::exit(2);
            }
        };
        let start = Instant::now();
        let nodes = perft(&mut pos, depth);
        let elapsed = start.elapsed();
        println!("Nodes: {nodes}");
        println!("Time: {elapsed:.3?}");
        println!("NPS: {:.0}", nps(nodes, elapsed));
        return;
    }

    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;
    for (name, case) in SUITE {
        print!("{name:.<30}");
        let start = Instant::now();
        match run(case, depth) {
            Ok(nodes) => {
                let elapsed = start.elapsed();
                total_nodes += nodes;
                total_time += elapsed;
                println!(
                    " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
                    nps(nodes, elapsed)
                );
            }
            Err(e) => println!(" failed: {e}"),
        }
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
}
