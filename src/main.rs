//! Terminal runner (default binary).
//!
//! Owns the fixed-rate clock: key presses are queued as they arrive and handed to the game
//! once per tick, followed by a redraw of the framebuffer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::info;

use blockfall::config::AppConfig;
use blockfall::core::{GameSnapshot, GameState, RandomSource, TickOutcome};
use blockfall::input::EventQueue;
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    logging::init(config.log_path.as_deref(), config.log_level)?;

    let board = config.board()?;
    info!(
        "starting: board {}x{}, seed {:?}",
        board.width(),
        board.height(),
        config.seed
    );
    let game = GameState::with_board(board, config.random_source());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    log::logger().flush();
    result
}

fn run(term: &mut TerminalRenderer, mut game: GameState<Box<dyn RandomSource>>) -> Result<()> {
    let view = GameView::default();
    let mut queue = EventQueue::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            game.snapshot_into(&mut snap);
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    queue.handle_key(key);
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() < tick_duration {
            continue;
        }
        last_tick = Instant::now();

        if queue.quit_requested() {
            info!(
                "quit after {} tick(s), score {}",
                game.ticks(),
                game.score()
            );
            return Ok(());
        }

        // After game over the final screen stays up; input other than quit is dropped.
        let events = queue.drain();
        if game.step(&events) != TickOutcome::Halted {
            dirty = true;
        }
    }
}
