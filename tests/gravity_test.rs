//! Gravity tests - drop tables per column

use match_three::core::{compute_drops, Board};
use match_three::types::{BoardConfig, CellIndex, TileId, DESTROYED_ID};

const D: TileId = DESTROYED_ID;

/// One column, listed bottom to top.
fn column(bottom_up: &[TileId]) -> Board {
    let rows: Vec<[TileId; 1]> = bottom_up.iter().rev().map(|&id| [id]).collect();
    let config = BoardConfig::with_size(1, bottom_up.len() as u8, 5);
    Board::from_rows(&config, &rows).unwrap()
}

fn drop_of(board: &Board, y: u8) -> u8 {
    let table = compute_drops(board.grid());
    table.distance(board.grid().key_at(CellIndex::new(0, y)))
}

#[test]
fn test_holes_at_rows_one_and_three() {
    let board = column(&[0, D, 1, D, 2, 3]);
    assert_eq!(drop_of(&board, 0), 0);
    assert_eq!(drop_of(&board, 2), 1);
    assert_eq!(drop_of(&board, 4), 2);
    assert_eq!(drop_of(&board, 5), 2);
    // zero distances are not stored
    assert_eq!(compute_drops(board.grid()).len(), 3);
}

#[test]
fn test_full_column_of_holes_has_no_drops() {
    let board = column(&[D, D, D]);
    assert!(compute_drops(board.grid()).is_empty());
}

#[test]
fn test_only_columns_with_holes_drop() {
    let rows: [&[TileId]; 3] = [&[0, 1, 2], &[1, D, 0], &[2, 0, 1]];
    let board = Board::from_rows(&BoardConfig::with_size(3, 3, 3), &rows).unwrap();
    let table = compute_drops(board.grid());

    assert_eq!(table.len(), 1);
    let (key, distance) = table.iter().next().unwrap();
    assert_eq!(board.grid().tile(key).cell(), CellIndex::new(1, 2));
    assert_eq!(distance, 1);
}
