//! Terminal falling-blocks runner (default binary).
//!
//! Uses crossterm for input and a custom framebuffer-based renderer.
//! Starting difficulty is the first CLI argument (`easy`, `medium`,
//! `hard`); the best score persists across sessions.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use block_drop::core::GameState;
use block_drop::input::{handle_key_event, should_quit};
use block_drop::store::HighScoreStore;
use block_drop::term::{GameView, SessionView, TerminalRenderer, Viewport};
use block_drop::types::{Difficulty, GameAction, TICK_MS};

fn main() -> Result<()> {
    let difficulty = parse_difficulty()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, difficulty);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn parse_difficulty() -> Result<Difficulty> {
    match std::env::args().nth(1) {
        None => Ok(Difficulty::default()),
        Some(arg) => Difficulty::from_str(&arg)
            .ok_or_else(|| anyhow::anyhow!("unknown difficulty {arg:?} (easy, medium, hard)")),
    }
}

/// Seed from wall-clock nanoseconds; good enough for gameplay variety.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, difficulty: Difficulty) -> Result<()> {
    let mut game_state = GameState::new_with_difficulty(clock_seed(), difficulty);
    game_state.start();

    let store = HighScoreStore::open();
    let mut high_score = store.load();
    let mut saved_this_game = false;

    let view = GameView::default();
    let mut snapshot = game_state.snapshot();

    let mut last_frame = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let session = SessionView {
            high_score,
            difficulty,
        };
        game_state.snapshot_into(&mut snapshot);
        let fb = view.render(&snapshot, &session, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until next frame.
        let timeout = tick_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        // Past game over only restart (and quit) get through.
                        if game_state.game_over() && action != GameAction::Restart {
                            continue;
                        }
                        if action == GameAction::Restart {
                            saved_this_game = false;
                        }
                        game_state.apply_action(action);
                    }
                }
            }
        }

        // Advance gravity by real elapsed time.
        let elapsed = last_frame.elapsed();
        if elapsed >= tick_duration {
            last_frame = Instant::now();
            game_state.tick(elapsed.as_millis() as u32);
        }

        // Persist the best score once per finished game.
        if game_state.game_over() && !saved_this_game {
            high_score = store.save_if_best(game_state.score());
            saved_this_game = true;
        }
    }
}
