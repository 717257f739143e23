//! Terminal runner (default binary).
//!
//! Loads `stacktris.toml`, sets up file logging, and drives the engine at a
//! fixed frame cadence with crossterm for input and the framebuffer renderer
//! for output.

use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;

use stacktris::config::{Config, LogConfig};
use stacktris::core::{GameSnapshot, GameState, SimpleRng};
use stacktris::input::{handle_key_event, should_quit};
use stacktris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = Config::load()?;
    setup_logging(&config.log)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let restored = term.exit();
    if let Err(e) = &result {
        tracing::error!("exiting with error: {e:#}");
    }
    result.and(restored)
}

/// File-only logging; the terminal belongs to the game.
fn setup_logging(log: &LogConfig) -> Result<()> {
    let Some(path) = &log.file else {
        return Ok(());
    };
    let level = Level::from_str(&log.level)
        .map_err(|_| anyhow::anyhow!("unknown log level {:?}", log.level))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .finish()
        .try_init()
        .context("install log subscriber")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let seed = config.game.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, tick_ms = config.game.tick_ms, "starting");

    let mut game = GameState::new(SimpleRng::new(seed), config.settings());
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick_duration = Duration::from_millis(config.game.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key, game.status()) {
                        let outcome = game.apply(command)?;
                        tracing::trace!(command = command.as_str(), applied = outcome.applied, "key");
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick()?;
        }
    }
}
