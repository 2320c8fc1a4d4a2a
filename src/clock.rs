use shakmaty::{ByColor, Color};

/// Granularity of the external clock driver, in milliseconds.
pub const TICK_MS: u64 = 10;

/// The two game clocks.
///
/// At most one side's clock runs at a time. Remaining time never goes
/// below zero, and a clock that reaches zero stops itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    duration_ms: u64,
    remaining: ByColor<u64>,
    running: Option<Color>,
}

impl ClockState {
    /// Both clocks at `duration_ms`, neither running.
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            remaining: ByColor {
                white: duration_ms,
                black: duration_ms,
            },
            running: None,
        }
    }

    /// Configured starting time per side.
    #[inline]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    #[inline]
    pub fn remaining_ms(&self, color: Color) -> u64 {
        *self.remaining.get(color)
    }

    /// The side whose clock is running, if any.
    #[inline]
    pub fn running(&self) -> Option<Color> {
        self.running
    }

    /// Start `color`'s clock, stopping the other one.
    ///
    /// A flagged clock (zero remaining) does not start.
    pub fn start(&mut self, color: Color) {
        if self.remaining_ms(color) == 0 {
            self.running = None;
            return;
        }
        self.running = Some(color);
    }

    pub fn stop(&mut self) {
        self.running = None;
    }

    /// Refill both clocks and stop them.
    pub fn reset(&mut self) {
        *self = Self::new(self.duration_ms);
    }

    /// Run the active clock down by `elapsed_ms`.
    ///
    /// Returns the running side and its remaining time, or `None` when no
    /// clock is running. Reaching zero stops the clock.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<(Color, u64)> {
        let color = self.running?;
        let remaining = self.remaining.get_mut(color);
        *remaining = remaining.saturating_sub(elapsed_ms);
        let left = *remaining;
        if left == 0 {
            self.running = None;
        }
        Some((color, left))
    }
}

/// Format a remaining time as `MM:SS.cc`.
///
/// Minutes wrap at 60, matching a two-digit clock face.
pub fn format_clock(ms: u64) -> String {
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1_000) % 60;
    let centis = (ms % 1_000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}
