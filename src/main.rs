//! Terminal match-three runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `match_three::term`. Options: `--config <path>` (JSON board config),
//! `--seed <u32>`, `--log <path>` (log file; `RUST_LOG` sets the filter).

use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use match_three::cli::{load_config, parse_args, RunOptions};
use match_three::core::{BoardEvent, Game, GameSnapshot};
use match_three::input::{handle_key_event, should_quit, SelectionHandler, SelectionOutcome};
use match_three::term::{BoardView, FrameBuffer, Marks, TerminalRenderer, Viewport};
use match_three::types::{BoardAction, BoardConfig, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_args(&args)?;
    init_logging(opts.log.as_deref())?;

    let config = match &opts.config {
        Some(path) => load_config(path)?,
        None => BoardConfig::default(),
    };
    let seed = opts.seed.unwrap_or_else(clock_seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed, &opts);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = path {
        let file = File::create(path).with_context(|| format!("create log {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(
    term: &mut TerminalRenderer,
    config: BoardConfig,
    seed: u32,
    opts: &RunOptions,
) -> Result<()> {
    info!(
        "starting {}x{} board with {} tile types (seed {}, config {:?})",
        config.width, config.height, config.tile_types, seed, opts.config
    );
    let mut selection = SelectionHandler::new(config.width, config.height);
    let mut game = Game::new(config, seed)?;

    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let marks = Marks {
            cursor: Some(selection.cursor()),
            selected: selection.selected(),
        };
        view.render_into(&snap, marks, Viewport::new(w, h), &mut fb);
        term.present(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(BoardAction::Restart) => {
                            game.restart()?;
                            selection.reset();
                        }
                        Some(action) => {
                            if let SelectionOutcome::SwapRequested { from, to } =
                                selection.apply(action, game.accepts_input())
                            {
                                if let Err(e) = game.request_swap(from, to) {
                                    debug!("swap {:?} <-> {:?} rejected: {}", from, to, e);
                                }
                            }
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);
            for ev in game.take_events() {
                if let BoardEvent::Matched { combo, .. } = ev {
                    // No audio in the terminal; keep the cue visible in the log.
                    debug!("score cue (combo: {})", combo > 1);
                }
            }
        }
    }
}
