use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::warn;

use super::TerminalDisplay;
use crate::GameDisplay;
use crate::clock::TICK_MS;
use crate::command::Command;
use crate::config::GameConfig;
use crate::game_logic::{GameController, MoveError};

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Feeds wall-clock time to the engine in whole [`TICK_MS`] steps.
///
/// Elapsed time is caught up in one batch of ticks whenever the loop
/// wakes, at least once per tick.
#[derive(Debug)]
struct ClockDriver {
    last: Instant,
}

impl ClockDriver {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn catch_up(&mut self, game: &mut GameController) {
        let elapsed = self.last.elapsed().as_millis() as u64;
        let steps = elapsed / TICK_MS;
        // Keep the sub-tick remainder for next time
        self.last += Duration::from_millis(steps * TICK_MS);
        for _ in 0..steps {
            if game.tick_clock(TICK_MS).is_none() {
                break;
            }
        }
    }

    /// Forget elapsed time, e.g. after a reset.
    fn restart(&mut self) {
        self.last = Instant::now();
    }
}

/// Runs an interactive two-player game in the terminal.
///
/// Both players share the keyboard. Input is read on its own thread so the
/// running clock keeps ticking, and a flag falls, while nobody types.
pub fn run_interactive_terminal(config: GameConfig) {
    let mut game = GameController::new(config);
    let mut display = TerminalDisplay::new();
    let mut driver = ClockDriver::new();
    let lines = spawn_input_reader();

    redraw(&mut display, &mut game);
    prompt();

    loop {
        let input = match lines.recv_timeout(Duration::from_millis(TICK_MS)) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => {
                let was_running = game.result().is_none();
                driver.catch_up(&mut game);
                if was_running && game.result().is_some() {
                    redraw(&mut display, &mut game);
                    prompt();
                }
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        };
        driver.catch_up(&mut game);

        let mut notice = None;
        match input.trim() {
            "" => {
                prompt();
                continue;
            }
            "q" => break,
            "p" => {}
            "h" | "help" => {
                print_help();
                prompt();
                continue;
            }
            line => match line.parse::<Command>() {
                Ok(command) => {
                    notice = rejection_notice(command, game.apply(command));
                    if matches!(command, Command::Reset | Command::Debug(false)) {
                        driver.restart();
                    }
                }
                Err(e) => {
                    println!("{e} (h for help)");
                    prompt();
                    continue;
                }
            },
        }

        redraw(&mut display, &mut game);
        if let Some(notice) = notice {
            println!("{notice}");
        }
        prompt();
    }
}

/// Read stdin lines on a background thread until EOF or a read error.
fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    eprintln!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

fn prompt() {
    print!("> ");
    if let Err(e) = io::stdout().flush() {
        warn!("Failed to flush stdout: {e}");
    }
}

/// Line to print for a refused command.
///
/// Move rejections are already reported through
/// [`crate::GameEvent::MoveRejected`]; every other refusal only comes back
/// as the call's result.
fn rejection_notice(command: Command, result: Result<(), MoveError>) -> Option<String> {
    match (command, result) {
        (_, Ok(())) | (Command::Move { .. }, Err(_)) => None,
        (_, Err(e)) => Some(format!("❌ {e}")),
    }
}

fn redraw(display: &mut TerminalDisplay, game: &mut GameController) {
    let events = game.take_events();
    clear_screen();
    println!("♟️  Hotseat Chess");
    println!();
    if let Err(e) = display.show(game, &events) {
        warn!("Display update failed: {e}");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  e2e4            move a piece");
    println!("  done            end your turn");
    println!("  promote q|r|b|n choose a promotion piece");
    println!("  resign w|b      resign for a side");
    println!("  start           start the clock after a reset");
    println!("  debug on|off    bypass rules (off resets the game)");
    println!("  reset | p (refresh) | q (quit)");
}
