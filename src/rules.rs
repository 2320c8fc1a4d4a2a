//! Per-piece move geometry and path obstruction.
//!
//! These checks are purely geometric: they never look at turn order and
//! never reject a capture of a same-colored piece. That is left to
//! [`crate::game_logic::GameController`], which applies them.

use shakmaty::{Color, Role};

use crate::board::{Board, Square};

/// Row a pawn of this color starts on and may double-step from.
#[inline]
pub const fn pawn_home_row(color: Color) -> i8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row a pawn of this color promotes on.
#[inline]
pub const fn promotion_row(color: Color) -> i8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

/// Row delta of a single forward pawn step.
#[inline]
const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// Decide whether `kind` of `color` may move from `from` to `to` on `board`.
///
/// A move onto its own square is never legal.
pub fn is_legal_move(board: &Board, kind: Role, color: Color, from: Square, to: Square) -> bool {
    if !to.is_on_board() || !from.is_on_board() || from == to {
        return false;
    }

    let d_row = to.row - from.row;
    let d_col = to.col - from.col;

    match kind {
        Role::Pawn => is_legal_pawn_move(board, color, from, to),
        Role::Knight => matches!((d_row.abs(), d_col.abs()), (2, 1) | (1, 2)),
        Role::King => d_row.abs() <= 1 && d_col.abs() <= 1,
        Role::Rook => is_straight(d_row, d_col) && is_path_clear(board, from, to),
        Role::Bishop => is_diagonal(d_row, d_col) && is_path_clear(board, from, to),
        Role::Queen => {
            (is_straight(d_row, d_col) || is_diagonal(d_row, d_col))
                && is_path_clear(board, from, to)
        }
    }
}

fn is_legal_pawn_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let dir = pawn_direction(color);
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;

    match (d_row, d_col.abs()) {
        // Single push
        (r, 0) if r == dir => !board.is_occupied(to),
        // Double push from the home row, both squares empty
        (r, 0) if r == 2 * dir => {
            from.row == pawn_home_row(color)
                && !board.is_occupied(from.offset(dir, 0))
                && !board.is_occupied(to)
        }
        // Diagonal step only onto an enemy piece
        (r, 1) if r == dir => board.piece_at(to).is_some_and(|p| p.color != color),
        _ => false,
    }
}

#[inline]
fn is_straight(d_row: i8, d_col: i8) -> bool {
    (d_row == 0) != (d_col == 0)
}

#[inline]
fn is_diagonal(d_row: i8, d_col: i8) -> bool {
    d_row != 0 && d_row.abs() == d_col.abs()
}

/// True when no square strictly between `from` and `to` is occupied.
///
/// Any occupant blocks, whatever its color. Adjacent squares have no
/// interior and are always clear. Only meaningful for straight or diagonal
/// lines. Off-board endpoints are never clear.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    if !from.is_on_board() || !to.is_on_board() {
        return false;
    }
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;
    let step = (d_row.signum(), d_col.signum());
    let distance = d_row.abs().max(d_col.abs());

    (1..distance)
        .map(|i| from.offset(step.0 * i, step.1 * i))
        .all(|square| !board.is_occupied(square))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Piece;
    use test_case::test_case;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    /// Build a board from `(square, role, color)` triples.
    fn board_with(pieces: &[(&str, Role, Color)]) -> Board {
        let mut board = Board::empty();
        for &(name, role, color) in pieces {
            board.place(sq(name), Piece { role, color });
        }
        board
    }

    fn legal(board: &Board, from: &str, to: &str) -> bool {
        let piece = board.piece_at(sq(from)).expect("piece on origin");
        is_legal_move(board, piece.role, piece.color, sq(from), sq(to))
    }

    #[test_case("e2", "e3", true; "single push")]
    #[test_case("e2", "e4", true; "double push from home")]
    #[test_case("e2", "e5", false; "triple push")]
    #[test_case("e2", "e1", false; "backwards")]
    #[test_case("e2", "d3", false; "diagonal onto empty")]
    #[test_case("e2", "f2", false; "sideways")]
    fn test_white_pawn_from_start(from: &str, to: &str, expected: bool) {
        assert_eq!(legal(&Board::new(), from, to), expected);
    }

    #[test_case("d7", "d6", true; "single push")]
    #[test_case("d7", "d5", true; "double push from home")]
    #[test_case("d7", "d8", false; "backwards")]
    fn test_black_pawn_from_start(from: &str, to: &str, expected: bool) {
        assert_eq!(legal(&Board::new(), from, to), expected);
    }

    #[test]
    fn test_pawn_double_push_only_from_home_row() {
        let board = board_with(&[("e3", Role::Pawn, Color::White)]);
        assert!(legal(&board, "e3", "e4"));
        assert!(!legal(&board, "e3", "e5"));
    }

    #[test_case("e3"; "intermediate occupied")]
    #[test_case("e4"; "destination occupied")]
    fn test_pawn_double_push_blocked(blocker: &str) {
        let board = board_with(&[
            ("e2", Role::Pawn, Color::White),
            (blocker, Role::Knight, Color::Black),
        ]);
        assert!(!legal(&board, "e2", "e4"));
    }

    #[test]
    fn test_pawn_cannot_capture_straight_ahead() {
        let board = board_with(&[
            ("e4", Role::Pawn, Color::White),
            ("e5", Role::Pawn, Color::Black),
        ]);
        assert!(!legal(&board, "e4", "e5"));
        assert!(!legal(&board, "e5", "e4"));
    }

    #[test]
    fn test_pawn_captures_diagonally_forward_only() {
        let board = board_with(&[
            ("e4", Role::Pawn, Color::White),
            ("d5", Role::Pawn, Color::Black),
            ("f3", Role::Pawn, Color::Black),
        ]);
        assert!(legal(&board, "e4", "d5"));
        assert!(!legal(&board, "e4", "f3"), "white pawn cannot capture backwards");
        assert!(!legal(&board, "f3", "e2"), "diagonal onto an empty square");
        assert!(legal(&board, "d5", "e4"), "black pawn captures towards row 7");
    }

    #[test]
    fn test_pawn_diagonal_onto_own_piece_is_illegal() {
        let board = board_with(&[
            ("e4", Role::Pawn, Color::White),
            ("d5", Role::Knight, Color::White),
        ]);
        assert!(!legal(&board, "e4", "d5"));
    }

    #[test_case("g1", "f3", true)]
    #[test_case("g1", "h3", true)]
    #[test_case("g1", "e2", true; "onto own pawn is geometrically fine")]
    #[test_case("g1", "g3", false)]
    #[test_case("b8", "c6", true)]
    fn test_knight_jumps(from: &str, to: &str, expected: bool) {
        assert_eq!(legal(&Board::new(), from, to), expected);
    }

    #[test_case("e4", "e5", true)]
    #[test_case("e4", "f5", true)]
    #[test_case("e4", "d3", true)]
    #[test_case("e4", "e6", false)]
    #[test_case("e4", "g4", false; "no castling-like jumps")]
    fn test_king_steps(from: &str, to: &str, expected: bool) {
        let board = board_with(&[("e4", Role::King, Color::White)]);
        assert_eq!(legal(&board, from, to), expected);
    }

    #[test_case(Role::Rook, "d4", "d8", true)]
    #[test_case(Role::Rook, "d4", "a4", true)]
    #[test_case(Role::Rook, "d4", "e5", false)]
    #[test_case(Role::Bishop, "d4", "h8", true)]
    #[test_case(Role::Bishop, "d4", "a1", true)]
    #[test_case(Role::Bishop, "d4", "d5", false)]
    #[test_case(Role::Queen, "d4", "d1", true)]
    #[test_case(Role::Queen, "d4", "g7", true)]
    #[test_case(Role::Queen, "d4", "e6", false)]
    fn test_slider_geometry_on_empty_board(role: Role, from: &str, to: &str, expected: bool) {
        let board = board_with(&[(from, role, Color::White)]);
        assert_eq!(legal(&board, from, to), expected);
    }

    #[test_case(Role::Rook, "d4", "d8", "d6")]
    #[test_case(Role::Bishop, "d4", "h8", "f6")]
    #[test_case(Role::Queen, "d4", "a4", "b4")]
    #[test_case(Role::Queen, "d4", "a7", "b6")]
    fn test_slider_blocked_by_any_color(role: Role, from: &str, to: &str, blocker: &str) {
        for color in [Color::White, Color::Black] {
            let board = board_with(&[(from, role, Color::White), (blocker, Role::Pawn, color)]);
            assert!(!legal(&board, from, to), "{color:?} blocker at {blocker} must block");

            let capture = board_with(&[
                (from, role, Color::White),
                (blocker, Role::Pawn, color),
                (to, Role::Pawn, Color::Black),
            ]);
            assert!(!legal(&capture, from, to), "blocked capture must be illegal");
        }
    }

    #[test]
    fn test_slider_may_land_on_occupied_destination() {
        let board = board_with(&[
            ("a1", Role::Rook, Color::White),
            ("a8", Role::Rook, Color::Black),
        ]);
        assert!(legal(&board, "a1", "a8"));
    }

    #[test]
    fn test_sliders_blocked_in_starting_position() {
        let board = Board::new();
        assert!(!legal(&board, "a1", "a3"));
        assert!(!legal(&board, "c1", "e3"));
        assert!(!legal(&board, "d1", "d3"));
    }

    #[test]
    fn test_off_board_destination_is_illegal() {
        let board = board_with(&[("a1", Role::Queen, Color::White)]);
        let from = sq("a1");
        assert!(!is_legal_move(&board, Role::Queen, Color::White, from, Square::new(8, 0)));
        assert!(!is_legal_move(&board, Role::Knight, Color::White, from, Square::new(9, -1)));
    }

    #[test]
    fn test_null_move_is_illegal() {
        let board = board_with(&[("d4", Role::King, Color::White)]);
        assert!(!legal(&board, "d4", "d4"));
    }

    #[test_case(Square::new(127, 0), Square::new(-128, 0); "extreme rows")]
    #[test_case(Square::new(0, -128), Square::new(0, 127); "extreme columns")]
    #[test_case(Square::new(3, 3), Square::new(3, 9); "destination off board")]
    fn test_path_clear_off_board_is_false(from: Square, to: Square) {
        assert!(!is_path_clear(&Board::empty(), from, to));
        assert!(!is_path_clear(&Board::empty(), to, from));
    }

    #[test]
    fn test_path_clear_adjacent_squares() {
        let board = Board::new();
        assert!(is_path_clear(&board, sq("a1"), sq("a2")));
        assert!(is_path_clear(&board, sq("e1"), sq("f2")));
    }

    #[test]
    fn test_path_clear_ignores_endpoints() {
        let board = Board::new();
        // a2 and a7 both occupied, interior a3..a6 empty
        assert!(is_path_clear(&board, sq("a2"), sq("a7")));
        assert!(!is_path_clear(&board, sq("a1"), sq("a7")));
    }
}
