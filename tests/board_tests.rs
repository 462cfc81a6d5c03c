use battleship_client::{Board, BoardError, Cell, Coord, Orientation, ShotOutcome, BOARD_SIZE};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn at(row: usize, col: usize) -> Coord {
    Coord::new(row, col).unwrap()
}

#[test]
fn test_place_ship_marks_exact_cells() {
    let mut board = Board::new();
    assert!(board.place_ship("Cruiser", 3, 2, 4, Orientation::Horizontal));
    for col in 4..7 {
        assert_eq!(board.cell(at(2, col)), Cell::Ship);
    }
    assert_eq!(board.count(Cell::Ship), 3);
    assert_eq!(board.cell(at(2, 3)), Cell::Water);
    assert_eq!(board.cell(at(2, 7)), Cell::Water);
    assert_eq!(board.ships().len(), 1);
}

#[test]
fn test_overlapping_placement_fails_in_any_orientation() {
    let mut board = Board::new();
    assert!(board.place_ship("Cruiser", 3, 2, 4, Orientation::Horizontal));
    let before = board.clone();

    assert_eq!(
        board.try_place_ship("Destroyer", 2, 2, 5, Orientation::Horizontal),
        Err(BoardError::ShipOverlaps)
    );
    assert_eq!(
        board.try_place_ship("Destroyer", 2, 2, 5, Orientation::Vertical),
        Err(BoardError::ShipOverlaps)
    );
    assert_eq!(board, before);
}

#[test]
fn test_out_of_bounds_placement_leaves_board_unchanged() {
    let mut board = Board::new();
    assert!(!board.place_ship("Carrier", 5, 0, 6, Orientation::Horizontal));
    assert!(!board.place_ship("Carrier", 5, 7, 0, Orientation::Vertical));
    assert!(!board.place_ship("Carrier", 5, 10, 0, Orientation::Vertical));
    assert_eq!(
        board.try_place_ship("Raft", 0, 0, 0, Orientation::Vertical),
        Err(BoardError::ZeroSizedShip)
    );
    assert_eq!(board.count(Cell::Water), 100);
    assert!(board.ships().is_empty());

    // Touching the far edge is fine.
    assert!(board.place_ship("Carrier", 5, 9, 5, Orientation::Horizontal));
    assert!(board.place_ship("Battleship", 4, 6, 0, Orientation::Vertical));
}

#[test]
fn test_coord_bounds() {
    assert!(Coord::new(9, 9).is_ok());
    assert_eq!(
        Coord::new(10, 0),
        Err(BoardError::OutOfBounds { row: 10, col: 0 })
    );
    assert_eq!(Coord::parse("3,4"), Some(at(3, 4)));
    assert_eq!(Coord::parse(" 3 , 4 "), Some(at(3, 4)));
    assert_eq!(Coord::parse("3,10"), None);
    assert_eq!(Coord::parse("x,y"), None);
    assert_eq!(Coord::parse("34"), None);
}

#[test]
fn test_record_shot_outcome_touches_one_cell() {
    let mut view = Board::new();
    view.record_shot_outcome(at(3, 4), ShotOutcome::Hit);
    assert_eq!(view.cell(at(3, 4)), Cell::Hit);
    assert_eq!(view.count(Cell::Water), 99);

    view.record_shot_outcome(at(0, 0), ShotOutcome::Miss);
    view.record_shot_outcome(at(3, 5), ShotOutcome::Sunk);
    assert_eq!(view.cell(at(0, 0)), Cell::Miss);
    assert_eq!(view.cell(at(3, 5)), Cell::Sunk);
    assert_eq!(view.count(Cell::Ship), 0);
}

#[test]
fn test_incoming_hits_sink_ship() {
    let mut board = Board::new();
    assert!(board.place_ship("Destroyer", 2, 5, 5, Orientation::Vertical));
    assert!(board.has_living_ships());

    assert!(board.record_incoming_hit(at(0, 0)).is_none());
    assert_eq!(board.cell(at(0, 0)), Cell::Hit);

    let ship = board.record_incoming_hit(at(5, 5)).unwrap();
    assert_eq!(ship.name(), "Destroyer");
    assert!(!ship.is_sunk());
    assert!(board.has_living_ships());

    let ship = board.record_incoming_hit(at(6, 5)).unwrap();
    assert!(ship.is_sunk());
    assert!(!board.has_living_ships());
    assert_eq!(board.count(Cell::Ship), 0);
}

#[test]
fn test_random_placement_fits() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(42);
    for (name, size) in [("Carrier", 5), ("Battleship", 4), ("Cruiser", 3), ("Submarine", 3), ("Destroyer", 2)] {
        let (origin, orientation) = board.random_placement(&mut rng, size).unwrap();
        board
            .try_place_ship(name, size, origin.row as usize, origin.col as usize, orientation)
            .unwrap();
    }
    assert_eq!(board.count(Cell::Ship), 17);
    assert_eq!(
        board.random_placement(&mut rng, BOARD_SIZE as usize + 1),
        Err(BoardError::ShipOutOfBounds)
    );
}

#[test]
fn test_render_symbols() {
    let mut board = Board::new();
    assert!(board.place_ship("Destroyer", 2, 0, 0, Orientation::Horizontal));
    board.record_incoming_hit(at(0, 0));
    board.record_shot_outcome(at(1, 0), ShotOutcome::Miss);
    board.record_shot_outcome(at(1, 1), ShotOutcome::Sunk);

    let text = board.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "  0 1 2 3 4 5 6 7 8 9");
    assert_eq!(lines[1], "0 X O ~ ~ ~ ~ ~ ~ ~ ~");
    assert_eq!(lines[2], "1 A # ~ ~ ~ ~ ~ ~ ~ ~");
}
