//! Terminal stacker runner (default binary).
//!
//! Reads keys with crossterm, feeds press/release edges and frame time into a
//! [`Game`], and redraws a plain character view every frame.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEventKind};

use stacker::core::{BoardSnapshot, Game};
use stacker::input::{should_quit, TerminalInput};
use stacker::types::ActionEvent;
use stacker::view::{render_lines, Terminal};

const FRAME: Duration = Duration::from_millis(16);

/// Edges buffered per frame before they are applied early.
const EDGE_BATCH: usize = 64;

type EdgeBatch = ArrayVec<ActionEvent, EDGE_BATCH>;

fn main() -> Result<()> {
    let mut term = Terminal::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        eprintln!("failed to restore terminal: {err:#}");
    }

    let score = result?;
    eprintln!("final score: {score}");
    Ok(())
}

fn seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Play until a quit key. Returns the final score.
fn run(term: &mut Terminal) -> Result<u64> {
    let mut game = Game::new(seed());
    let mut input = TerminalInput::default().with_release_events(term.reports_releases());
    let mut snapshot = BoardSnapshot::default();
    let mut events = EdgeBatch::new();
    let mut last_frame = Instant::now();

    loop {
        game.snapshot_into(&mut snapshot);
        term.draw(&render_lines(&snapshot, game.board().catalog()))?;

        // Collect input until the next frame is due.
        loop {
            let timeout = FRAME.saturating_sub(last_frame.elapsed());
            if !event::poll(timeout).context("poll terminal events")? {
                break;
            }
            match event::read().context("read terminal event")? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(game.board().score());
                    }
                    if let Some(edge) = input.handle_key(key, Instant::now()) {
                        queue_edge(&mut game, &mut events, edge);
                    }
                }
                Event::FocusLost => {
                    for edge in input.release_all() {
                        queue_edge(&mut game, &mut events, edge);
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();
        for edge in input.expire(now) {
            queue_edge(&mut game, &mut events, edge);
        }
        let dt = now.duration_since(last_frame);
        last_frame = now;

        game.tick(events.drain(..), dt);
    }
}

/// Buffer `edge` for this frame's tick. A full batch is applied first so no
/// edge is lost; arrival order is kept either way.
fn queue_edge(game: &mut Game, events: &mut EdgeBatch, edge: ActionEvent) {
    if events.is_full() {
        game.handle_events(events.drain(..));
    }
    events.push(edge);
}
