use battleship_client::{BoardError, Coord, Orientation, Ship, ShipRequest};

#[test]
fn test_new_lays_out_cells() -> Result<(), BoardError> {
    let ship = Ship::new("Battleship", 4, Coord::new(0, 0)?, Orientation::Vertical)?;
    let cells: Vec<_> = ship.cells().iter().map(|c| (c.row, c.col)).collect();
    assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert!(ship.occupies(Coord::new(3, 0)?));
    assert!(!ship.occupies(Coord::new(4, 0)?));
    assert_eq!(ship.size(), 4);
    assert_eq!(ship.orientation(), Orientation::Vertical);
    Ok(())
}

#[test]
fn test_new_rejects_bad_ships() -> Result<(), BoardError> {
    let origin = Coord::new(9, 8)?;
    assert_eq!(
        Ship::new("Cruiser", 3, origin, Orientation::Horizontal).unwrap_err(),
        BoardError::ShipOutOfBounds
    );
    assert_eq!(
        Ship::new("Raft", 0, origin, Orientation::Horizontal).unwrap_err(),
        BoardError::ZeroSizedShip
    );
    Ok(())
}

#[test]
fn test_take_hit_until_sunk() -> Result<(), BoardError> {
    let mut ship = Ship::new("Destroyer", 2, Coord::new(4, 4)?, Orientation::Horizontal)?;
    assert!(!ship.take_hit(Coord::new(5, 4)?));
    assert!(ship.take_hit(Coord::new(4, 5)?));
    assert!(!ship.take_hit(Coord::new(4, 5)?));
    assert!(!ship.is_sunk());
    assert!(ship.take_hit(Coord::new(4, 4)?));
    assert!(ship.is_sunk());
    Ok(())
}

#[test]
fn test_request_display() {
    assert_eq!(ShipRequest::new("Cruiser", 3).to_string(), "Cruiser (size 3)");
}
