//! Headless self-play runner (demo binary).
//!
//! Drives a full session through the drag protocol with random placements
//! until no hand piece fits anywhere, then prints the result. Useful for
//! smoke-testing the engine and for generating high-score files.
//!
//! Usage: selfplay [--mode classic|chaos] [--seed N] [--scores FILE]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use rand::Rng;

use blockfall::core::{GameSession, SimpleRng};
use blockfall::highscores::{HighScoreStore, JsonFileStore, ScoreTracker};
use blockfall::types::Mode;

#[derive(Debug, Clone)]
struct Config {
    mode: Mode,
    seed: u32,
    scores_path: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Config> {
    let mut config = Config {
        mode: Mode::Classic,
        seed: 1,
        scores_path: None,
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --mode"))?;
                config.mode =
                    Mode::parse(v).ok_or_else(|| anyhow!("invalid --mode value: {}", v))?;
            }
            "--seed" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--scores" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --scores"))?;
                config.scores_path = Some(PathBuf::from(v));
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;
    run(config)
}

fn run(config: Config) -> Result<()> {
    let mut session = GameSession::with_seed(config.mode, config.seed);
    // Placement choices get their own stream so the piece sequence stays
    // a pure function of the session seed.
    let mut chooser = SimpleRng::new(config.seed.wrapping_add(0x9E37));

    let mut tracker = match &config.scores_path {
        Some(path) => {
            let store = JsonFileStore::open(path)
                .with_context(|| format!("opening score store {}", path.display()))?;
            Some(ScoreTracker::new(store, config.mode))
        }
        None => None,
    };

    let mut moves = 0u32;
    'game: loop {
        // Find a slot whose piece still fits somewhere.
        let hand_size = session.hand().size();
        let mut placed = false;
        for slot in 0..hand_size {
            if !session.begin_drag(slot) {
                continue;
            }
            let fit_map = session.drag_fit_map().expect("drag is active");
            if !fit_map.any() {
                session.end_drag(None);
                continue;
            }

            // Pick a random fitting origin.
            let len = fit_map.len();
            let candidates: Vec<(usize, usize)> = (0..len)
                .flat_map(|y| (0..len).map(move |x| (x, y)))
                .filter(|&(x, y)| session.drag_fit_map().is_some_and(|m| m.at(x, y)))
                .collect();
            let &(x, y) = &candidates[chooser.gen_range(0..candidates.len())];

            session.update_drag(x, y);
            let event = session
                .end_drag(Some((x, y)))
                .ok_or_else(|| anyhow!("commit at ({}, {}) produced no event", x, y))?;

            if event.lines_broken > 0 {
                println!(
                    "move {moves}: broke {} line(s), combo {}, score {:.1}",
                    event.lines_broken, event.combo, event.score
                );
            }
            if let Some(tracker) = tracker.as_mut() {
                tracker.record(event.score, now_ms())?;
            }

            moves += 1;
            placed = true;
            break;
        }

        if !placed {
            break 'game;
        }
    }

    println!(
        "game over after {moves} moves: score {:.1} ({})",
        session.score(),
        session.mode().as_str()
    );

    if let Some(tracker) = tracker {
        println!("top scores:");
        let store = tracker.into_store();
        for (rank, (_, entry)) in store.list_top(5)?.iter().enumerate() {
            println!("  {}. {:>8.1}  ({})", rank + 1, entry.score, entry.mode.as_str());
        }
    }

    Ok(())
}
