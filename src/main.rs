use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use tile_merge::config::{SessionConfig, SpawnPolicy};
use tile_merge::engine::Move;
use tile_merge::session::{GameSession, SessionState};

/// Play 2048 from the terminal: one command per line on stdin.
///
/// Commands: left/right/up/down (or h/j/k/l, w/a/s/d), undo, new, quit.
#[derive(Parser, Debug)]
#[command(name = "tile-merge", version, about = "Terminal front-end for the tile-merge engine")]
struct Args {
    /// TOML session config (seed, spawn_policy, undo_penalty)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for tile spawns (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// When to spawn a tile: "always" or "on-change" (overrides the config file)
    #[arg(long, value_name = "POLICY")]
    spawn_policy: Option<SpawnPolicy>,
    /// Points lost per undo (overrides the config file)
    #[arg(long, value_name = "POINTS")]
    undo_penalty: Option<u64>,
    /// Emit one JSON state object per line instead of drawing the board
    #[arg(long)]
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Move(Move),
    Undo,
    New,
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_ascii_lowercase().as_str() {
        "undo" | "u" => Some(Command::Undo),
        "new" | "n" | "restart" => Some(Command::New),
        "quit" | "q" | "exit" => Some(Command::Quit),
        other => other.parse().ok().map(Command::Move),
    }
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut cfg = match &args.config {
        Some(path) => SessionConfig::from_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed { cfg.seed = Some(seed); }
    if let Some(policy) = args.spawn_policy { cfg.spawn_policy = policy; }
    if let Some(penalty) = args.undo_penalty { cfg.undo_penalty = penalty; }
    Ok(cfg)
}

fn render<W: Write>(out: &mut W, state: &SessionState, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, state)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", state.board)?;
        writeln!(out, "Score: {} | High Score: {}", state.score, state.high_score)?;
        if state.game_over {
            writeln!(out, "Game Over!")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cfg = load_config(&args)?;
    info!("starting session with {:?}", cfg);
    let mut session = GameSession::with_config(cfg);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &session.state(), args.json)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let state = match parse_command(&line) {
            Some(Command::Move(direction)) => session.on_direction(direction),
            Some(Command::Undo) => match session.undo() {
                Ok(state) => state,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            },
            Some(Command::New) => session.start(),
            Some(Command::Quit) => break,
            None => {
                warn!("unrecognised command {:?}", line.trim());
                continue;
            }
        };
        render(&mut out, &state, args.json)?;
    }
    Ok(())
}
