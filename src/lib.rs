pub mod board;
pub mod clock;
pub mod command;
pub mod config;
pub mod events;
pub mod game_logic;
pub mod rules;

pub use board::{Board, Square};
pub use command::Command;
pub use config::GameConfig;
pub use events::GameEvent;
pub use game_logic::{GameController, MoveError, MoveOutcome};

/// The six piece kinds; promotion replaces a piece with a new one.
pub use shakmaty::Role as PieceKind;
pub use shakmaty::{Color, Piece};

/// Trait for reading player input as engine commands.
///
/// Abstracts over interactive and scripted input, providing a uniform
/// interface for driving a [`GameController`].
pub trait CommandSource {
    /// Error type for input failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Next command, or `None` when the input is exhausted.
    fn next_command(&mut self) -> Result<Option<Command>, Self::Error>;
}

/// Trait for presenting the game to the players.
///
/// Mirrors [`CommandSource`] on the output side: implementations render
/// the current game and react to the events drained from it.
pub trait GameDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the game after `events` were emitted.
    fn show(&mut self, game: &GameController, events: &[GameEvent]) -> Result<(), Self::Error>;
}

pub mod mock;
