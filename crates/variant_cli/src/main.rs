//! Console front-end
//!
//! Plays a variant game from stdin. Clicks are given as grid coordinates
//! (`4 6`), moves as coordinate text (`e2e4`, `e2 e4`, `e7e8n`).

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use variant_core::{
    move_to_uci, new_game, preset, presets, ClickOutcome, Configuration, GameController,
    ViewState,
};

fn print_usage() {
    println!("Variant chess console");
    println!();
    println!("Usage:");
    println!("  variant_cli [--preset NAME] [--config FILE.toml] [--json]");
    println!();
    println!("Input, one command per line:");
    println!("  X Y        click grid cell (x = file, y = row from the top)");
    println!("  e2e4       play a move (also e2 e4, e7e8n to under-promote)");
    println!("  board      print the board");
    println!("  fen        print the current position text");
    println!("  moves      list legal moves as typeable text");
    println!("  presets    list scenario presets");
    println!("  quit");
    println!();
    println!("Set RUST_LOG=debug to trace rule and move events.");
}

struct Options {
    preset: Option<String>,
    config: Option<PathBuf>,
    json: bool,
}

/// `Ok(None)` means usage was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut opts = Options {
        preset: None,
        config: None,
        json: false,
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--preset" | "-p" => {
                i += 1;
                let name = args.get(i).context("--preset needs a name")?;
                opts.preset = Some(name.clone());
            }
            "--config" | "-c" => {
                i += 1;
                let path = args.get(i).context("--config needs a file")?;
                opts.config = Some(PathBuf::from(path));
            }
            "--json" => opts.json = true,
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument '{other}'"),
        }
        i += 1;
    }
    Ok(Some(opts))
}

/// Preset defaults first, then every key the file sets. A `preset` key in
/// the file picks the preset unless `--preset` was given.
fn resolve_configuration(
    cli_preset: Option<&str>,
    file: Option<&Path>,
) -> Result<(variant_core::ScenarioPreset, Configuration)> {
    let table = match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            text.parse::<toml::Table>()
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => toml::Table::new(),
    };

    let name = cli_preset
        .map(str::to_string)
        .or_else(|| table.get("preset").and_then(|v| v.as_str()).map(str::to_string))
        .unwrap_or_else(|| "Standard".to_string());
    let scenario = preset(&name)?;

    let mut merged = match toml::Value::try_from(scenario.configuration())
        .context("failed to serialize preset configuration")?
    {
        toml::Value::Table(t) => t,
        other => bail!("preset configuration is not a table: {other}"),
    };
    for (key, value) in table {
        if key != "preset" {
            merged.insert(key, value);
        }
    }
    let cfg = Configuration::from_toml_str(&merged.to_string())?;
    Ok((scenario, cfg))
}

#[derive(Serialize)]
struct Report<'a> {
    outcome: &'a ClickOutcome,
    view: &'a ViewState,
    position: String,
}

fn report(game: &GameController, outcome: &ClickOutcome, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(&Report {
            outcome,
            view: game.view_state(),
            position: game.encode_position(),
        })?;
        println!("{line}");
        return Ok(());
    }

    match outcome {
        ClickOutcome::Select {
            square,
            legal_targets,
        } => {
            let targets: Vec<&str> = legal_targets.iter().map(String::as_str).collect();
            println!("selected {square}: {}", targets.join(" "));
        }
        ClickOutcome::MoveApplied { from, to } => {
            println!("moved {from}-{to}");
            println!("{}", game.position());
            if game.legal_moves().is_empty() {
                // The core does not adjudicate; this is just a hint for the player.
                if game.in_check() {
                    println!("{} has no legal moves and is in check", game.side_to_move());
                } else {
                    println!("{} has no legal moves", game.side_to_move());
                }
            } else if game.in_check() {
                println!("{} is in check", game.side_to_move());
            }
        }
        ClickOutcome::MoveRejected { reason } => println!("rejected: {reason}"),
        ClickOutcome::Noop => println!("-"),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let opts = match parse_args(&args)? {
        Some(opts) => opts,
        None => {
            print_usage();
            return Ok(());
        }
    };

    let (scenario, cfg) = resolve_configuration(opts.preset.as_deref(), opts.config.as_deref())?;
    let mut game = new_game(&scenario, &cfg)
        .with_context(|| format!("failed to start '{}'", scenario.name))?;
    info!(preset = %scenario.name, "console game started");

    println!("{} | {}", scenario.name, game.rules().names().join(", "));
    println!("{}", game.position());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["board"] => println!("{}", game.position()),
            ["fen"] => println!("{}", game.encode_position()),
            ["moves"] => {
                let dims = game.position().dims;
                let moves: Vec<String> = game
                    .legal_moves()
                    .into_iter()
                    .map(|mv| move_to_uci(&dims, mv))
                    .collect();
                println!("{} legal: {}", moves.len(), moves.join(" "));
            }
            ["presets"] => {
                for p in presets() {
                    println!("{}", p.name);
                }
            }
            [a, b] => {
                let outcome = match (a.parse::<usize>(), b.parse::<usize>()) {
                    (Ok(x), Ok(y)) => game.handle_click(x, y),
                    _ => game.play_move_text(&format!("{a}{b}")),
                };
                report(&game, &outcome, opts.json)?;
            }
            [text] => {
                let outcome = game.play_move_text(text);
                report(&game, &outcome, opts.json)?;
            }
            _ => println!("unrecognised input, try --help"),
        }
        stdout.flush()?;
    }
    Ok(())
}
