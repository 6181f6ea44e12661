//! Plain character view of a board snapshot and the terminal it is drawn on.
//!
//! Each matrix cell is two columns wide. The frame is built as a list of
//! styled text runs per line so it can be tested without a terminal.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::{BoardSnapshot, Catalog, CellView, Rgb};
use crate::types::{PieceKind, MATRIX_WIDTH, VISIBLE_HEIGHT};

/// Buffer rows drawn above the playfield so a fresh piece is visible.
const BUFFER_ROWS_SHOWN: usize = 3;

/// Matrix rows in a frame.
pub const FRAME_ROWS: usize = VISIBLE_HEIGHT + BUFFER_ROWS_SHOWN;

const FRAME_COLOR: Rgb = Rgb::new(150, 150, 150);
const GHOST_COLOR: Rgb = Rgb::new(90, 90, 90);
const PREVIEW_COLOR: Rgb = Rgb::new(255, 255, 255);

/// One styled piece of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub color: Rgb,
    pub dim: bool,
}

impl Span {
    fn new(text: impl Into<String>, color: Rgb) -> Self {
        Self {
            text: text.into(),
            color,
            dim: false,
        }
    }
}

pub type Line = Vec<Span>;

/// Two-column glyph for a cell.
pub fn glyph(cell: CellView) -> &'static str {
    match cell {
        CellView::Empty => " .",
        CellView::Locked(_) | CellView::Active(_) => "[]",
        CellView::Ghost(_) => "::",
    }
}

fn cell_color(catalog: &Catalog, cell: CellView, preview_row: bool) -> Rgb {
    match cell {
        CellView::Empty => GHOST_COLOR,
        CellView::Locked(_) if preview_row => PREVIEW_COLOR,
        CellView::Locked(kind) | CellView::Active(kind) => catalog.color(kind),
        CellView::Ghost(_) => GHOST_COLOR,
    }
}

fn side_text(snapshot: &BoardSnapshot, row: usize) -> Option<String> {
    let next = |i: usize| snapshot.next.get(i).map(|k| format!("  {}", k.letter()));
    match row {
        0 => Some("HOLD".to_string()),
        1 => Some(format!(
            "  {}",
            snapshot.hold.map_or('-', PieceKind::letter)
        )),
        3 => Some("NEXT".to_string()),
        4..=8 => next(row - 4),
        10 => Some("SCORE".to_string()),
        11 => Some(format!("  {}", snapshot.score)),
        _ => None,
    }
}

/// Build the whole frame: the matrix with borders on the left, hold, next,
/// score and feedback on the right.
pub fn render_lines(snapshot: &BoardSnapshot, catalog: &Catalog) -> Vec<Line> {
    let mut lines = Vec::with_capacity(FRAME_ROWS + 1);
    let feedback = if snapshot.feedback_alpha > 0 {
        snapshot.feedback.texts()
    } else {
        Vec::new()
    };
    let feedback_color = snapshot
        .feedback
        .piece
        .map_or(FRAME_COLOR, |kind| catalog.color(kind));

    for (screen_row, y) in snapshot.rows_top_down(FRAME_ROWS).enumerate() {
        let preview_row = snapshot.is_preview_row(y);
        let mut line = vec![Span::new("|", FRAME_COLOR)];
        for x in 0..MATRIX_WIDTH as i32 {
            let cell = snapshot.view(x, y as i32);
            line.push(Span::new(glyph(cell), cell_color(catalog, cell, preview_row)));
        }
        line.push(Span::new("|  ", FRAME_COLOR));

        if let Some(text) = side_text(snapshot, screen_row) {
            line.push(Span::new(text, FRAME_COLOR));
        } else if let Some(text) = screen_row
            .checked_sub(13)
            .and_then(|i| feedback.get(i))
        {
            line.push(Span {
                text: text.clone(),
                color: feedback_color,
                dim: snapshot.feedback_alpha < 128,
            });
        }
        lines.push(line);
    }

    let floor = format!("+{}+", "-".repeat(MATRIX_WIDTH * 2));
    lines.push(vec![Span::new(floor, FRAME_COLOR)]);
    lines
}

/// Raw-mode alternate screen. Leaving restores the terminal, and so does
/// dropping it while raw mode is still on.
pub struct Terminal {
    stdout: io::Stdout,
    buf: Vec<u8>,
    enhanced: bool,
    raw: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
            enhanced: false,
            raw: false,
        }
    }

    /// Whether key releases are being reported.
    pub fn reports_releases(&self) -> bool {
        self.enhanced
    }

    /// Whether raw mode is on and [`Terminal::exit`] has work to do.
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.raw = true;
        self.enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);

        if let Err(err) = self.enter_screen() {
            if let Err(restore) = self.exit() {
                return Err(err.context(format!("restore failed: {restore:#}")));
            }
            return Err(err);
        }
        Ok(())
    }

    fn enter_screen(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.enhanced {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
            ))?;
        }
        self.flush_buf().context("enter alternate screen")
    }

    /// Restore the terminal. A no-op unless raw mode is on.
    pub fn exit(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        // raw mode goes even when the screen could not be restored
        let screen = self.leave_screen();
        let raw = terminal::disable_raw_mode().context("disable raw mode");
        self.raw = false;
        self.enhanced = false;
        screen.and(raw)
    }

    fn leave_screen(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf().context("leave alternate screen")
    }

    /// Full redraw of `lines`.
    pub fn draw(&mut self, lines: &[Line]) -> Result<()> {
        self.buf.clear();
        self.buf.queue(cursor::MoveTo(0, 0))?;
        self.buf
            .queue(terminal::Clear(terminal::ClearType::All))?;
        for line in lines {
            for span in line {
                self.buf.queue(SetAttribute(Attribute::Reset))?;
                if span.dim {
                    self.buf.queue(SetAttribute(Attribute::Dim))?;
                }
                self.buf.queue(SetForegroundColor(Color::Rgb {
                    r: span.color.r,
                    g: span.color.g,
                    b: span.color.b,
                }))?;
                self.buf.queue(Print(&span.text))?;
            }
            self.buf.queue(Print("\r\n"))?;
        }
        self.buf.queue(ResetColor)?;
        self.flush_buf().context("draw frame")
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.raw {
            let _ = self.exit();
        }
    }
}
