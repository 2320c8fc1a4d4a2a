use std::str::FromStr;

use thiserror::Error;

/// Error when parsing a time control.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown time control '{0}', expected bullet, blitz, rapid or milliseconds")]
pub struct ConfigError(String);

/// Settings a [`crate::game_logic::GameController`] is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Starting time on each side's clock.
    pub clock_ms: u64,
    /// Start with rule bypass enabled.
    pub debug: bool,
}

impl GameConfig {
    /// One minute per side.
    pub const BULLET: Self = Self::with_clock(60_000);
    /// Five minutes per side.
    pub const BLITZ: Self = Self::with_clock(300_000);
    /// Ten minutes per side.
    pub const RAPID: Self = Self::with_clock(600_000);

    #[inline]
    pub const fn with_clock(clock_ms: u64) -> Self {
        Self {
            clock_ms,
            debug: false,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::BLITZ
    }
}

impl FromStr for GameConfig {
    type Err = ConfigError;

    /// Accepts a preset name or a positive millisecond count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bullet" => Ok(Self::BULLET),
            "blitz" => Ok(Self::BLITZ),
            "rapid" => Ok(Self::RAPID),
            other => match other.parse::<u64>() {
                Ok(ms) if ms > 0 => Ok(Self::with_clock(ms)),
                _ => Err(ConfigError(s.to_string())),
            },
        }
    }
}
