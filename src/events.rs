use std::collections::VecDeque;

use shakmaty::{Color, Piece};

use crate::board::Square;
use crate::game_logic::{GameResult, MoveError};

/// Notification from the engine to whatever is presenting the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    MoveAccepted { from: Square, to: Square },
    MoveRejected { reason: MoveError },
    /// `piece` was taken off `square` by a piece of `captured_by`.
    PieceCaptured {
        piece: Piece,
        square: Square,
        captured_by: Color,
    },
    /// A pawn reached its far rank and waits for a promotion choice.
    PromotionRequired { square: Square, color: Color },
    PiecePromoted { square: Square, piece: Piece },
    TurnChanged { side: Color },
    ClockUpdated { color: Color, remaining_ms: u64 },
    GameOver(GameResult),
    DebugModeChanged { enabled: bool },
    GameReset,
}

/// Ordered buffer of events waiting to be picked up by the presenter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
}

impl EventQueue {
    #[inline]
    pub const fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Remove and return all pending events, oldest first.
    pub fn take_all(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }

    /// Hand every pending event to `on_event`, oldest first.
    pub fn drain<F>(&mut self, mut on_event: F)
    where
        F: FnMut(GameEvent),
    {
        while let Some(event) = self.pending.pop_front() {
            on_event(event);
        }
    }
}
