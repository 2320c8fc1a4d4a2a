use std::collections::VecDeque;
use std::convert::Infallible;

use crate::CommandSource;
use crate::command::{Command, ParseError};

/// A scriptable command source.
///
/// Holds parsed commands and hands them out on demand. New script can be
/// appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<Command>,
}

impl ScriptedInput {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional script for execution.
    ///
    /// Format:
    /// - Commands are separated by `.`, `;` or newlines
    /// - Each command uses the [`Command`] text form (`e2e4`, `done`, ...)
    ///
    /// Examples:
    /// - `"e2e4. done. e7e5. done."`
    /// - `"tick 500; resign b"`
    ///
    /// Nothing is queued if any command fails to parse.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let commands = parse_script(script)?;
        self.pending.extend(commands);
        Ok(())
    }
}

impl CommandSource for ScriptedInput {
    type Error = Infallible;

    fn next_command(&mut self) -> Result<Option<Command>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}

/// Parse a script into commands, skipping blank entries.
fn parse_script(script: &str) -> Result<Vec<Command>, ParseError> {
    script
        .split(['.', ';', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse)
        .collect()
}
