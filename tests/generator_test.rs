//! Generator tests - constrained random population

use match_three::core::{find_all_matches, Board, RandomSource, SimpleRng, TileGenerator};
use match_three::types::{BoardConfig, TileId};

struct Always(u32);

impl RandomSource for Always {
    fn next_below(&mut self, max: u32) -> u32 {
        self.0 % max
    }
}

#[test]
fn test_no_match_on_init() {
    for tile_types in 3..=8u8 {
        for seed in 1..=25u32 {
            let config = BoardConfig::with_size(9, 7, tile_types);
            let board = Board::new(&config, &mut SimpleRng::new(seed)).unwrap();
            assert!(
                find_all_matches(board.grid()).is_empty(),
                "types {} seed {}: {:?}",
                tile_types,
                seed,
                board.grid().to_rows()
            );
        }
    }
}

#[test]
fn test_ids_stay_in_range() {
    let config = BoardConfig::with_size(10, 10, 4);
    let board = Board::new(&config, &mut SimpleRng::new(77)).unwrap();
    assert!(board.grid().ids().iter().all(|&id| (0..4).contains(&id)));
}

#[test]
fn test_same_seed_same_board() {
    let config = BoardConfig::default();
    let a = Board::new(&config, &mut SimpleRng::new(5)).unwrap();
    let b = Board::new(&config, &mut SimpleRng::new(5)).unwrap();
    assert_eq!(a.grid().ids(), b.grid().ids());
}

#[test]
fn test_degenerate_exclusion_with_two_types() {
    let generator = TileGenerator::new(2);
    // Left pair is 0 0 and lower pair is 1 1: nothing is left to pick.
    let id_at = |x: i16, y: i16| -> Option<TileId> {
        match (x, y) {
            (0, 2) | (1, 2) => Some(0),
            (2, 1) | (2, 0) => Some(1),
            _ => None,
        }
    };
    for v in 0..4 {
        assert_eq!(generator.pick_id(&mut Always(v), 2, 2, id_at), 1);
    }
}

#[test]
fn test_two_type_boards_always_populate() {
    for seed in 1..=50u32 {
        let config = BoardConfig::with_size(8, 8, 2);
        let board = Board::new(&config, &mut SimpleRng::new(seed)).unwrap();
        for cell in board.grid().cells() {
            let id = board.id_at(cell);
            assert!(id == 0 || id == 1, "seed {} cell {:?}", seed, cell);
        }
    }
}
