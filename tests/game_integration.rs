use hotseat_chess::clock::TICK_MS;
use hotseat_chess::game_logic::{EndReason, GameResult, GameStatus};
use hotseat_chess::mock::ScriptedInput;
use hotseat_chess::{
    Board, Color, CommandSource, GameConfig, GameController, GameEvent, MoveError, MoveOutcome,
    Piece, PieceKind, Square,
};

fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

/// Helper: run a script against a game, collecting every command's result.
fn run(game: &mut GameController, script: &str) -> Vec<Result<(), MoveError>> {
    let mut input = ScriptedInput::new();
    input.push_script(script).expect("valid script");
    let mut results = Vec::new();
    while let Ok(Some(command)) = input.next_command() {
        results.push(game.apply(command));
    }
    results
}

/// Helper: run a script that must succeed step by step.
fn run_ok(game: &mut GameController, script: &str) {
    for (i, result) in run(game, script).into_iter().enumerate() {
        assert_eq!(result, Ok(()), "command {i} of '{script}'");
    }
}

// ---------------------------------------------------------------
// Turn ownership: attempt_move never advances the turn
// ---------------------------------------------------------------

#[test]
fn opponent_cannot_reply_before_done() {
    let mut game = GameController::default();

    assert_eq!(
        game.attempt_move(Square::new(6, 4), Square::new(4, 4)),
        Ok(MoveOutcome::Accepted)
    );
    assert_eq!(
        game.attempt_move(Square::new(1, 4), Square::new(3, 4)),
        Err(MoveError::WrongSideMoved)
    );
    assert_eq!(game.turn().map(|t| t.side_to_move), Some(Color::White));
}

#[test]
fn full_exchange_through_script() {
    let mut game = GameController::default();

    run_ok(&mut game, "e2e4. done. d7d5. done. e4d5. done.");

    assert_eq!(
        game.piece_at(sq("d5")),
        Some(Piece {
            role: PieceKind::Pawn,
            color: Color::White
        })
    );
    assert_eq!(game.board().count(), 31);
    assert_eq!(game.turn().map(|t| t.side_to_move), Some(Color::Black));
    assert_eq!(game.clock().running(), Some(Color::Black));
}

#[test]
fn rejected_moves_never_mutate_board() {
    let mut game = GameController::default();
    let before = game.board().clone();

    let results = run(&mut game, "e2e5. a1a4. e7e6. g1e2. done. b1d2");

    assert_eq!(
        results,
        vec![
            Err(MoveError::IllegalMove),
            Err(MoveError::IllegalMove),
            Err(MoveError::WrongSideMoved),
            Err(MoveError::FriendlyCapture),
            Err(MoveError::TurnNotReady),
            Err(MoveError::FriendlyCapture),
        ]
    );
    assert_eq!(game.board(), &before);
    let rejections = game
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::MoveRejected { .. }))
        .count();
    assert_eq!(rejections, 5, "end_turn is refused without an event");
}

// ---------------------------------------------------------------
// Terminal conditions
// ---------------------------------------------------------------

#[test]
fn capturing_white_king_wins_for_black() {
    let mut board = Board::empty();
    board.place(
        Square::new(7, 4),
        Piece {
            role: PieceKind::King,
            color: Color::White,
        },
    );
    board.place(
        sq("e8"),
        Piece {
            role: PieceKind::King,
            color: Color::Black,
        },
    );
    board.place(
        sq("e5"),
        Piece {
            role: PieceKind::Rook,
            color: Color::Black,
        },
    );
    board.place(
        sq("a2"),
        Piece {
            role: PieceKind::Pawn,
            color: Color::White,
        },
    );
    let mut game = GameController::from_board(board, GameConfig::default());

    run_ok(&mut game, "a2a3. done. e5e1");

    assert_eq!(
        game.status(),
        GameStatus::Finished(GameResult {
            winner: Some(Color::Black),
            reason: EndReason::Capture
        })
    );
    assert_eq!(
        game.attempt_move(sq("a3"), sq("a4")),
        Err(MoveError::GameOver)
    );
    assert_eq!(game.result().map(|r| r.reason), Some(EndReason::Capture));
}

#[test]
fn ticking_to_zero_times_out() {
    let mut game = GameController::new(GameConfig::with_clock(1_000));

    let mut ticks = 0;
    while game.result().is_none() {
        game.tick_clock(TICK_MS);
        ticks += 1;
        assert!(ticks <= 100, "clock must run out after 100 ticks");
    }

    assert_eq!(ticks, 100);
    assert_eq!(
        game.result(),
        Some(GameResult {
            winner: Some(Color::Black),
            reason: EndReason::Timeout
        })
    );
    assert_eq!(game.clock().remaining_ms(Color::White), 0);
    assert_eq!(game.clock().remaining_ms(Color::Black), 1_000);
}

#[test]
fn resignation_mid_turn() {
    let mut game = GameController::default();

    run_ok(&mut game, "e2e4. resign white");

    assert_eq!(
        game.result(),
        Some(GameResult {
            winner: Some(Color::Black),
            reason: EndReason::Resignation
        })
    );
    assert_eq!(game.clock().running(), None);
}

// ---------------------------------------------------------------
// Debug mode
// ---------------------------------------------------------------

#[test]
fn debug_mode_allows_friendly_capture_then_resets() {
    let mut game = GameController::default();

    run_ok(&mut game, "debug on. a8a7");
    assert_eq!(
        game.piece_at(sq("a7")),
        Some(Piece {
            role: PieceKind::Rook,
            color: Color::Black
        })
    );

    run_ok(&mut game, "debug off");

    assert_eq!(game.board(), &Board::new());
    assert_eq!(game.turn().map(|t| t.side_to_move), Some(Color::White));
    assert!(!game.is_debug());
}

// ---------------------------------------------------------------
// Promotion
// ---------------------------------------------------------------

#[test]
fn promotion_round_trip_through_script() {
    let mut board = Board::empty();
    board.place(
        sq("g7"),
        Piece {
            role: PieceKind::Pawn,
            color: Color::White,
        },
    );
    let mut game = GameController::from_board(board, GameConfig::default());

    let results = run(&mut game, "g7g8. done. promote r. done");

    assert_eq!(
        results,
        vec![Ok(()), Err(MoveError::PromotionPending), Ok(()), Ok(())]
    );
    assert_eq!(
        game.piece_at(sq("g8")),
        Some(Piece {
            role: PieceKind::Rook,
            color: Color::White
        })
    );
    let events = game.take_events();
    assert!(events.contains(&GameEvent::PromotionRequired {
        square: sq("g8"),
        color: Color::White
    }));
    assert!(events.contains(&GameEvent::TurnChanged { side: Color::Black }));
}

// ---------------------------------------------------------------
// Reset
// ---------------------------------------------------------------

#[test]
fn reset_after_game_over_starts_fresh() {
    let mut game = GameController::new(GameConfig::BULLET);
    run_ok(&mut game, "e2e4. done. tick 5000. resign b. reset");

    assert_eq!(game.board(), &Board::new());
    assert!(game.result().is_none());
    assert_eq!(game.clock().remaining_ms(Color::Black), 60_000);
    assert_eq!(game.clock().running(), None);

    run_ok(&mut game, "start. tick 10");
    assert_eq!(game.clock().remaining_ms(Color::White), 59_990);
}
