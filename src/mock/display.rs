use std::io::{self, Write};

use shakmaty::Color;

use crate::GameDisplay;
use crate::board::{BOARD_SIZE, Square, piece_char};
use crate::clock::format_clock;
use crate::events::GameEvent;
use crate::game_logic::{GameController, GameStatus};

/// Terminal-based game display for development and testing.
///
/// Renders the board as an 8×8 grid with ANSI color-coded squares for the
/// last move and a pending promotion, followed by both clocks and a log of
/// the events since the previous frame.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl GameDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, game: &GameController, events: &[GameEvent]) -> Result<(), Self::Error> {
        let mut out = io::stdout();
        render_game(&mut out, game)?;
        render_events(&mut out, events)
    }
}

/// Render the board and clocks to any writer. Extracted for testability.
fn render_game(w: &mut impl Write, game: &GameController) -> Result<(), DisplayError> {
    let last = game.history().last().copied();
    let promotion = game.pending_promotion();

    for row in 0..BOARD_SIZE {
        write!(w, " {} ", BOARD_SIZE - row)?;
        for col in 0..BOARD_SIZE {
            let square = Square::new(row, col);
            let glyph = game.piece_at(square).map_or('·', piece_char);
            let cell = if promotion == Some(square) {
                format!("\x1b[45m {glyph} \x1b[0m")
            } else if last.is_some_and(|mv| mv.to == square) {
                format!("\x1b[42m {glyph} \x1b[0m")
            } else if last.is_some_and(|mv| mv.from == square) {
                format!("\x1b[44m {glyph} \x1b[0m")
            } else {
                format!(" {glyph} ")
            };
            write!(w, "{cell}")?;
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    writeln!(w)?;

    for color in [Color::White, Color::Black] {
        let marker = if game.clock().running() == Some(color) { '▶' } else { ' ' };
        let taken: String = game.captured_by(color).iter().copied().map(piece_char).collect();
        writeln!(
            w,
            "{marker} {:<5} {}  {}",
            color_name(color),
            format_clock(game.clock().remaining_ms(color)),
            taken
        )?;
    }

    match game.status() {
        GameStatus::InProgress(turn) => {
            let state = if turn.move_made { "moved, type done" } else { "to move" };
            writeln!(w, "{} {state}", color_name(turn.side_to_move))?;
        }
        GameStatus::Finished(result) => writeln!(w, "{result}")?,
    }
    if game.is_debug() {
        writeln!(w, "[debug: rules bypassed]")?;
    }
    w.flush()?;
    Ok(())
}

/// Render one line per event. Clock ticks are omitted.
fn render_events(w: &mut impl Write, events: &[GameEvent]) -> Result<(), DisplayError> {
    for event in events {
        if let Some(line) = describe(event) {
            writeln!(w, "{line}")?;
        }
    }
    w.flush()?;
    Ok(())
}

fn describe(event: &GameEvent) -> Option<String> {
    let line = match event {
        GameEvent::MoveAccepted { from, to } => format!("✅ {from}-{to}"),
        GameEvent::MoveRejected { reason } => format!("❌ {reason}"),
        GameEvent::PieceCaptured { piece, square, .. } => {
            format!("⚔ {} taken on {square}", piece_char(*piece))
        }
        GameEvent::PromotionRequired { square, .. } => {
            format!("👑 pawn on {square}: promote q|r|b|n")
        }
        GameEvent::PiecePromoted { square, piece } => {
            format!("👑 {square} is now {}", piece_char(*piece))
        }
        GameEvent::TurnChanged { side } => format!("{} to move", color_name(*side)),
        GameEvent::ClockUpdated { .. } => return None,
        GameEvent::GameOver(result) => format!("🏁 {result}"),
        GameEvent::DebugModeChanged { enabled } => {
            format!("debug mode {}", if *enabled { "on" } else { "off" })
        }
        GameEvent::GameReset => "🔄 Reset to initial state".to_string(),
    };
    Some(line)
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
