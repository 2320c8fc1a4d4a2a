use std::str::FromStr;

use shakmaty::{Color, Role};
use thiserror::Error;

use crate::board::Square;
use crate::game_logic::{GameController, MoveError};

/// Error when parsing a command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid command: '{0}'")]
pub struct ParseError(pub String);

/// One inbound call from the presenter to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { from: Square, to: Square },
    EndTurn,
    Promote(Role),
    Resign(Color),
    Tick(u64),
    Debug(bool),
    Reset,
    StartClock,
}

impl FromStr for Command {
    type Err = ParseError;

    /// Parse a single command.
    ///
    /// Accepted forms:
    /// - `e2e4` or `e2 e4` - move
    /// - `done` - end turn
    /// - `promote q` - resolve promotion (`q`, `r`, `b`, `n`)
    /// - `resign w` / `resign black`
    /// - `tick 10` - advance the running clock
    /// - `debug on` / `debug off`
    /// - `reset`, `start`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError(s.trim().to_string());
        let words: Vec<&str> = s.split_whitespace().collect();

        match words.as_slice() {
            ["done"] => Ok(Command::EndTurn),
            ["reset"] => Ok(Command::Reset),
            ["start"] => Ok(Command::StartClock),
            ["promote", role] => parse_role(role).map(Command::Promote).ok_or_else(err),
            ["resign", color] => parse_color(color).map(Command::Resign).ok_or_else(err),
            ["tick", ms] => ms.parse().map(Command::Tick).map_err(|_| err()),
            ["debug", "on"] => Ok(Command::Debug(true)),
            ["debug", "off"] => Ok(Command::Debug(false)),
            [from, to] => parse_move(from, to).ok_or_else(err),
            [mv] if mv.len() == 4 && mv.is_char_boundary(2) => {
                let (from, to) = mv.split_at(2);
                parse_move(from, to).ok_or_else(err)
            }
            _ => Err(err()),
        }
    }
}

fn parse_move(from: &str, to: &str) -> Option<Command> {
    Some(Command::Move {
        from: from.parse().ok()?,
        to: to.parse().ok()?,
    })
}

fn parse_role(s: &str) -> Option<Role> {
    match s.to_ascii_lowercase().as_str() {
        "q" | "queen" => Some(Role::Queen),
        "r" | "rook" => Some(Role::Rook),
        "b" | "bishop" => Some(Role::Bishop),
        "n" | "knight" => Some(Role::Knight),
        _ => None,
    }
}

fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "w" | "white" => Some(Color::White),
        "b" | "black" => Some(Color::Black),
        _ => None,
    }
}

impl GameController {
    /// Dispatch a parsed command to the matching inbound call.
    ///
    /// Clock commands never fail; an idle clock is simply left alone.
    pub fn apply(&mut self, command: Command) -> Result<(), MoveError> {
        match command {
            Command::Move { from, to } => self.attempt_move(from, to).map(|_| ()),
            Command::EndTurn => self.end_turn().map(|_| ()),
            Command::Promote(kind) => self.resolve_promotion(kind).map(|_| ()),
            Command::Resign(color) => self.resign(color).map(|_| ()),
            Command::Tick(ms) => {
                self.tick_clock(ms);
                Ok(())
            }
            Command::Debug(enabled) => {
                self.set_debug_mode(enabled);
                Ok(())
            }
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::StartClock => {
                self.start_clock();
                Ok(())
            }
        }
    }
}
