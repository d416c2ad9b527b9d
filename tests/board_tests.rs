//! Board tests - grid access, collision rules, freezing and line clearing

use blockfall::core::{get_shape, Board, Piece};
use blockfall::types::{ConfigError, PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row_except(board: &mut Board, y: i16, skip: &[i16], color: Rgb) {
    for x in 0..board.width() as i16 {
        if !skip.contains(&x) {
            board.set(x, y, Some(color));
        }
    }
}

#[test]
fn test_board_standard_empty() {
    let board = Board::standard();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i16 {
        for x in 0..BOARD_WIDTH as i16 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
            assert!(board.is_empty(x, y));
        }
    }
}

#[test]
fn test_board_new_custom_size() {
    let board = Board::new(6, 8).unwrap();
    assert_eq!(board.width(), 6);
    assert_eq!(board.height(), 8);
    assert_eq!(board.cells().len(), 48);
    assert_eq!(board.rows().count(), 8);
}

#[test]
fn test_board_zero_dimension_is_config_error() {
    let err = Board::new(10, 0).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidDimensions {
            width: 10,
            height: 0
        }
    );
    assert_eq!(err.code(), "invalid_dimensions");
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::standard();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i16, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i16), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::standard();

    assert!(board.set(5, 10, Some(Rgb::MAGENTA)));
    assert_eq!(board.get(5, 10), Some(Some(Rgb::MAGENTA)));
    assert!(board.is_occupied(5, 10));
    assert!(!board.is_empty(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(Rgb::RED)));
    assert!(!board.set(0, 20, Some(Rgb::RED)));
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_can_place_walls_and_floor() {
    let board = Board::standard();
    let i = get_shape(PieceKind::I).occupancy;

    assert!(board.can_place(&i, 0, 0));
    assert!(board.can_place(&i, 6, 19));
    assert!(!board.can_place(&i, -1, 0));
    assert!(!board.can_place(&i, 7, 0));
    assert!(!board.can_place(&i, 0, 20));
}

#[test]
fn test_can_place_above_the_top_edge() {
    let board = Board::standard();
    let vertical_i = get_shape(PieceKind::I).occupancy.rotated_cw();

    // Three cells above the grid, one on row 0.
    assert!(board.can_place(&vertical_i, 4, -3));
    // Entirely above the grid is still allowed.
    assert!(board.can_place(&vertical_i, 4, -10));
    // But never past the side walls.
    assert!(!board.can_place(&vertical_i, 10, -10));
}

#[test]
fn test_can_place_blocked_by_occupied_cell() {
    let mut board = Board::standard();
    board.set(5, 1, Some(Rgb::BLUE));
    let t = get_shape(PieceKind::T).occupancy;

    // T at (4, 0) covers (5, 0), (4, 1), (5, 1), (6, 1).
    assert!(!board.can_place(&t, 4, 0));
    assert!(board.can_place(&t, 0, 0));
}

#[test]
fn test_freeze_then_position_is_blocked() {
    let mut board = Board::standard();
    let mut piece = Piece::spawn(get_shape(PieceKind::S), board.width());
    piece.y = 18;

    assert!(board.can_place(&piece.occupancy, piece.x, piece.y));
    board.freeze(&piece);
    assert!(!board.can_place(&piece.occupancy, piece.x, piece.y));
    assert_eq!(board.filled_count(), 4);
    for (x, y) in piece.filled_cells() {
        assert_eq!(board.get(x, y), Some(Some(Rgb::GREEN)));
    }
}

#[test]
fn test_is_row_full() {
    let mut board = Board::standard();
    fill_row_except(&mut board, 19, &[3], Rgb::RED);
    assert!(!board.is_row_full(19));

    board.set(3, 19, Some(Rgb::RED));
    assert!(board.is_row_full(19));
    assert!(!board.is_row_full(20));
}

#[test]
fn test_clear_no_full_rows_is_identity() {
    let mut board = Board::standard();
    fill_row_except(&mut board, 19, &[0], Rgb::RED);
    fill_row_except(&mut board, 17, &[9], Rgb::BLUE);
    let before = board.clone();

    assert_eq!(board.clear_full_lines(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_clear_single_line_shifts_rows_down() {
    let mut board = Board::standard();
    fill_row_except(&mut board, 19, &[], Rgb::RED);
    board.set(2, 18, Some(Rgb::CYAN));

    assert_eq!(board.clear_full_lines(), 1);
    assert_eq!(board.get(2, 19), Some(Some(Rgb::CYAN)));
    assert_eq!(board.filled_count(), 1);
    assert!(board.row(0).iter().all(|c| c.is_none()));
}

#[test]
fn test_clear_adjacent_full_rows() {
    // Two neighbouring full rows must both go, including the one shifted into place.
    let mut board = Board::standard();
    fill_row_except(&mut board, 18, &[], Rgb::RED);
    fill_row_except(&mut board, 19, &[], Rgb::BLUE);
    board.set(7, 17, Some(Rgb::YELLOW));

    assert_eq!(board.clear_full_lines(), 2);
    assert_eq!(board.get(7, 19), Some(Some(Rgb::YELLOW)));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_clear_four_lines() {
    let mut board = Board::standard();
    for y in 16..20 {
        fill_row_except(&mut board, y, &[], Rgb::CYAN);
    }
    assert_eq!(board.clear_full_lines(), 4);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_clear_board() {
    let mut board = Board::standard();
    fill_row_except(&mut board, 10, &[4], Rgb::ORANGE);
    board.clear();
    assert_eq!(board, Board::default());
}
