use std::fmt;

use log::{debug, info};
use shakmaty::{ByColor, Color, Piece, Role};
use thiserror::Error;

use crate::board::{Board, Square};
use crate::clock::ClockState;
use crate::config::GameConfig;
use crate::events::{EventQueue, GameEvent};
use crate::rules::{self, promotion_row};

/// Reasons an inbound call is refused.
///
/// Every variant is recoverable: the state is left exactly as it was
/// before the call.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("destination is outside the board")]
    OutOfBounds,
    #[error("no piece on the origin square")]
    NoPieceSelected,
    #[error("a piece has already been moved this turn")]
    TurnAlreadyUsed,
    #[error("it is not that side's turn")]
    WrongSideMoved,
    #[error("the piece cannot move there")]
    IllegalMove,
    #[error("cannot capture a piece of your own color")]
    FriendlyCapture,
    #[error("a move must be made before ending the turn")]
    TurnNotReady,
    #[error("the game is over")]
    GameOver,
    #[error("a pawn promotion must be resolved first")]
    PromotionPending,
    #[error("no pawn is waiting for promotion")]
    NoPromotionPending,
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(Role),
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// A king was captured.
    Capture,
    Resignation,
    Timeout,
}

/// Final outcome of a game. `winner` is `None` for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameResult {
    pub winner: Option<Color>,
    pub reason: EndReason,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            EndReason::Capture => "king capture",
            EndReason::Resignation => "resignation",
            EndReason::Timeout => "timeout",
        };
        match self.winner {
            Some(Color::White) => write!(f, "White wins by {reason}"),
            Some(Color::Black) => write!(f, "Black wins by {reason}"),
            None => write!(f, "Draw by {reason}"),
        }
    }
}

/// Whose turn it is and whether they have used their move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub side_to_move: Color,
    pub move_made: bool,
}

impl TurnState {
    const fn new() -> Self {
        Self {
            side_to_move: Color::White,
            move_made: false,
        }
    }
}

/// Lifecycle of a game. `Finished` is left only through a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress(TurnState),
    Finished(GameResult),
}

/// A relocation request from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

/// Result of an accepted [`GameController::attempt_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was applied and counts as this turn's move.
    Accepted,
    /// The move was applied; the pawn on `square` needs
    /// [`GameController::resolve_promotion`] before the turn can end.
    PromotionRequired { square: Square },
    /// The move captured a king and ended the game.
    GameOver(GameResult),
}

/// Turn, clock and termination state machine for a two-player game.
///
/// Owns the [`Board`] and is the only thing that mutates it. Every inbound
/// call either succeeds or returns a [`MoveError`] without touching state.
/// Outbound notifications accumulate in an internal queue, read with
/// [`GameController::drain_events`].
///
/// The controller is single-threaded. Sharing it across threads means
/// wrapping the whole thing in one `Mutex`.
pub struct GameController {
    board: Board,
    status: GameStatus,
    clock: ClockState,
    debug: bool,
    pending_promotion: Option<Square>,
    history: Vec<Move>,
    /// Pieces taken, keyed by the side that took them.
    captured: ByColor<Vec<Piece>>,
    events: EventQueue,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameController {
    /// A new game: starting layout, White to move, White's clock running.
    pub fn new(config: GameConfig) -> Self {
        let mut game = Self::from_board(Board::new(), config);
        game.clock.start(Color::White);
        game
    }

    /// A game in progress from an arbitrary layout, White to move, clocks
    /// stopped.
    pub fn from_board(board: Board, config: GameConfig) -> Self {
        Self {
            board,
            status: GameStatus::InProgress(TurnState::new()),
            clock: ClockState::new(config.clock_ms),
            debug: config.debug,
            pending_promotion: None,
            history: Vec::new(),
            captured: ByColor::default(),
            events: EventQueue::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Turn state while the game is in progress.
    #[inline]
    pub fn turn(&self) -> Option<TurnState> {
        match self.status {
            GameStatus::InProgress(turn) => Some(turn),
            GameStatus::Finished(_) => None,
        }
    }

    /// Final result once the game has finished.
    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        match self.status {
            GameStatus::InProgress(_) => None,
            GameStatus::Finished(result) => Some(result),
        }
    }

    #[inline]
    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    #[inline]
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Square of a pawn waiting for a promotion choice.
    #[inline]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Every applied move since the last reset, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Pieces captured by `color` since the last reset.
    #[inline]
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        self.captured.get(color)
    }

    /// Hand every pending event to `on_event`, oldest first.
    pub fn drain_events<F>(&mut self, on_event: F)
    where
        F: FnMut(GameEvent),
    {
        self.events.drain(on_event);
    }

    /// Remove and return all pending events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.take_all()
    }

    /// Try to move the piece on `from` to `to`.
    ///
    /// Rejections are also reported as [`GameEvent::MoveRejected`].
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        let outcome = self.try_move(from, to);
        if let Err(reason) = outcome {
            debug!("Rejected {from}-{to}: {reason}");
            self.events.push(GameEvent::MoveRejected { reason });
        }
        outcome
    }

    fn try_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        let turn = self.turn().ok_or(MoveError::GameOver)?;
        if self.pending_promotion.is_some() {
            return Err(MoveError::PromotionPending);
        }

        // Validate everything before touching the board.
        let piece = self.board.piece_at(from).ok_or(MoveError::NoPieceSelected)?;
        if !to.is_on_board() {
            return Err(MoveError::OutOfBounds);
        }
        if !self.debug {
            if turn.move_made {
                return Err(MoveError::TurnAlreadyUsed);
            }
            if piece.color != turn.side_to_move {
                return Err(MoveError::WrongSideMoved);
            }
            if !rules::is_legal_move(&self.board, piece.role, piece.color, from, to) {
                return Err(MoveError::IllegalMove);
            }
        } else if from == to {
            return Err(MoveError::IllegalMove);
        }
        let victim = self.board.piece_at(to);
        if !self.debug && victim.is_some_and(|v| v.color == piece.color) {
            return Err(MoveError::FriendlyCapture);
        }

        if let Some(victim) = victim {
            self.board.remove(to);
            self.captured.get_mut(piece.color).push(victim);
            self.events.push(GameEvent::PieceCaptured {
                piece: victim,
                square: to,
                captured_by: piece.color,
            });
        }
        self.board.move_piece(from, to);
        self.history.push(Move { from, to });
        self.events.push(GameEvent::MoveAccepted { from, to });
        debug!("{:?} {:?} {from}-{to}", piece.color, piece.role);

        if victim.is_some_and(|v| v.role == Role::King) {
            let result = self.finish(Some(piece.color), EndReason::Capture);
            return Ok(MoveOutcome::GameOver(result));
        }

        if self.debug {
            return Ok(MoveOutcome::Accepted);
        }

        if piece.role == Role::Pawn && to.row == promotion_row(piece.color) {
            self.pending_promotion = Some(to);
            self.events.push(GameEvent::PromotionRequired {
                square: to,
                color: piece.color,
            });
            return Ok(MoveOutcome::PromotionRequired { square: to });
        }

        self.mark_move_made();
        Ok(MoveOutcome::Accepted)
    }

    /// Replace the waiting pawn with a piece of `kind`.
    ///
    /// Only Queen, Rook, Bishop and Knight are accepted. Completes the turn's
    /// move.
    pub fn resolve_promotion(&mut self, kind: Role) -> Result<Piece, MoveError> {
        let turn = self.turn().ok_or(MoveError::GameOver)?;
        let square = self.pending_promotion.ok_or(MoveError::NoPromotionPending)?;
        if matches!(kind, Role::Pawn | Role::King) {
            return Err(MoveError::InvalidPromotion(kind));
        }

        let color = self
            .board
            .piece_at(square)
            .map_or(turn.side_to_move, |pawn| pawn.color);
        let piece = Piece { role: kind, color };
        self.board.place(square, piece);
        self.pending_promotion = None;
        self.mark_move_made();
        self.events.push(GameEvent::PiecePromoted { square, piece });
        debug!("{color:?} pawn on {square} promoted to {kind:?}");
        Ok(piece)
    }

    fn mark_move_made(&mut self) {
        if let GameStatus::InProgress(turn) = &mut self.status {
            turn.move_made = true;
        }
    }

    /// Hand the move to the other side and switch clocks.
    ///
    /// Refused with [`MoveError::TurnNotReady`] until a move has been made.
    /// Returns the new side to move.
    pub fn end_turn(&mut self) -> Result<Color, MoveError> {
        let GameStatus::InProgress(turn) = &mut self.status else {
            return Err(MoveError::GameOver);
        };
        if self.pending_promotion.is_some() {
            return Err(MoveError::PromotionPending);
        }
        if !turn.move_made {
            return Err(MoveError::TurnNotReady);
        }

        let next = turn.side_to_move.other();
        turn.side_to_move = next;
        turn.move_made = false;
        self.clock.stop();
        self.clock.start(next);
        self.events.push(GameEvent::TurnChanged { side: next });
        info!("{next:?} to move");
        Ok(next)
    }

    /// Start the side-to-move's clock if no clock is running.
    ///
    /// Returns whether a clock was started.
    pub fn start_clock(&mut self) -> bool {
        let Some(turn) = self.turn() else {
            return false;
        };
        if self.clock.running().is_some() {
            return false;
        }
        self.clock.start(turn.side_to_move);
        debug!("{:?} clock started", turn.side_to_move);
        self.clock.running().is_some()
    }

    /// Run the active clock down by `elapsed_ms`.
    ///
    /// Returns the running side's remaining time, or `None` when no clock
    /// is running or the game is over. A clock reaching zero loses the game
    /// for its side.
    pub fn tick_clock(&mut self, elapsed_ms: u64) -> Option<u64> {
        self.turn()?;
        let (color, remaining_ms) = self.clock.tick(elapsed_ms)?;
        self.events.push(GameEvent::ClockUpdated {
            color,
            remaining_ms,
        });
        if remaining_ms == 0 {
            self.finish(Some(color.other()), EndReason::Timeout);
        }
        Some(remaining_ms)
    }

    /// `color` gives up; the opponent wins.
    pub fn resign(&mut self, color: Color) -> Result<GameResult, MoveError> {
        self.turn().ok_or(MoveError::GameOver)?;
        Ok(self.finish(Some(color.other()), EndReason::Resignation))
    }

    fn finish(&mut self, winner: Option<Color>, reason: EndReason) -> GameResult {
        let result = GameResult { winner, reason };
        self.clock.stop();
        self.pending_promotion = None;
        self.status = GameStatus::Finished(result);
        self.events.push(GameEvent::GameOver(result));
        info!("Game over: {result}");
        result
    }

    /// Turn the rule bypass on or off. Turning it off resets the game.
    pub fn set_debug_mode(&mut self, enabled: bool) {
        if self.debug == enabled {
            return;
        }
        self.debug = enabled;
        self.events.push(GameEvent::DebugModeChanged { enabled });
        info!("Debug mode {}", if enabled { "on" } else { "off" });
        if !enabled {
            self.reset();
        }
    }

    /// Back to the starting layout with White to move and both clocks full
    /// and stopped. Debug mode is left as it is.
    pub fn reset(&mut self) {
        self.board.reset();
        self.status = GameStatus::InProgress(TurnState::new());
        self.clock.reset();
        self.pending_promotion = None;
        self.history.clear();
        self.captured = ByColor::default();
        self.events.push(GameEvent::GameReset);
        info!("Game reset");
    }
}

impl fmt::Debug for GameController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board.to_string().replace('\n', "/");
        f.debug_struct("GameController")
            .field("board", &board)
            .field("status", &self.status)
            .field("clock", &self.clock)
            .field("debug", &self.debug)
            .field("pending_promotion", &self.pending_promotion)
            .field("moves", &self.history.len())
            .finish()
    }
}
