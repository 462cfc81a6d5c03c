use battleship_client::command::{parse_placement, parse_turn};
use battleship_client::{
    ClientFrame, Coord, FrameError, InputError, LocalCommand, Orientation, ServerFrame,
    ShipRequest, ShotOutcome, ShotReport,
};

fn at(row: usize, col: usize) -> Coord {
    Coord::new(row, col).unwrap()
}

#[test]
fn test_decode_server_frames() {
    let table = [
        ("LOGIN|OK", ServerFrame::LoginOk),
        ("LOGIN|TAKEN", ServerFrame::LoginRejected("TAKEN".into())),
        (
            "PLACE_SHIP|Cruiser|3",
            ServerFrame::PlaceShip(ShipRequest::new("Cruiser", 3)),
        ),
        ("YOUR_TURN|fire", ServerFrame::YourTurn("fire".into())),
        ("TURN|", ServerFrame::YourTurn(String::new())),
        ("WAIT_TURN|", ServerFrame::WaitTurn(String::new())),
        (
            "RESULT|HIT",
            ServerFrame::Result(ShotReport::Outcome(ShotOutcome::Hit)),
        ),
        (
            "RESULT|MISS",
            ServerFrame::Result(ShotReport::Outcome(ShotOutcome::Miss)),
        ),
        (
            "RESULT|SUNK",
            ServerFrame::Result(ShotReport::Outcome(ShotOutcome::Sunk)),
        ),
        (
            "RESULT|3,4,T",
            ServerFrame::Result(ShotReport::At(at(3, 4), ShotOutcome::Hit)),
        ),
        ("RESULT|SHIP_PLACED", ServerFrame::Result(ShotReport::ShipPlaced)),
        ("ENEMY_HIT|7,1", ServerFrame::EnemyHit(at(7, 1))),
        ("TURN_END|timeout", ServerFrame::TurnEnd("timeout".into())),
        ("GAME_OVER|YOU WIN", ServerFrame::GameOver("YOU WIN".into())),
        ("VICTORY|all sunk", ServerFrame::GameOver("VICTORY: all sunk".into())),
        ("DEFEAT|", ServerFrame::GameOver("DEFEAT: ".into())),
        ("ERROR|bad shot", ServerFrame::Error("bad shot".into())),
        (
            "WAITING|for opponent",
            ServerFrame::Info {
                tag: "WAITING".into(),
                note: "for opponent".into(),
            },
        ),
    ];
    for (line, expected) in table {
        assert_eq!(ServerFrame::decode(line), Ok(expected), "decoding {:?}", line);
    }
}

#[test]
fn test_decode_rejects_bad_frames() {
    assert_eq!(
        ServerFrame::decode("HELLO|there"),
        Err(FrameError::UnknownTag("HELLO|there".into()))
    );
    for line in [
        "ENEMY_HIT|x,y",
        "ENEMY_HIT|10,0",
        "PLACE_SHIP|Cruiser",
        "PLACE_SHIP|Cruiser|0",
        "PLACE_SHIP||3",
        "RESULT|MAYBE",
        "RESULT|3,4,Q",
    ] {
        assert!(
            matches!(ServerFrame::decode(line), Err(FrameError::Malformed { .. })),
            "{:?} should be malformed",
            line
        );
    }
}

#[test]
fn test_encode_client_frames() {
    assert_eq!(
        ClientFrame::Login {
            name: "alice".into(),
            email: None
        }
        .encode(),
        "LOGIN|alice\n"
    );
    assert_eq!(
        ClientFrame::Login {
            name: "alice".into(),
            email: Some("a@example.org".into())
        }
        .encode(),
        "LOGIN|alice|a@example.org\n"
    );
    assert_eq!(
        ClientFrame::ShipPos {
            at: at(2, 4),
            orientation: Orientation::Vertical
        }
        .encode(),
        "SHIP_POS|2,4,V\n"
    );
    assert_eq!(ClientFrame::Shot(at(3, 4)).encode(), "3,4\n");
    assert_eq!(ClientFrame::Quit.encode(), "QUIT|\n");
    assert_eq!(ClientFrame::Shot(at(0, 9)).to_string(), "0,9");
}

#[test]
fn test_parse_placement_lines() {
    assert_eq!(parse_placement(""), Ok(LocalCommand::PlaceRandom));
    assert_eq!(parse_placement("   "), Ok(LocalCommand::PlaceRandom));
    assert_eq!(
        parse_placement("2 4 h"),
        Ok(LocalCommand::Place {
            at: at(2, 4),
            orientation: Orientation::Horizontal
        })
    );
    assert_eq!(
        parse_placement("2,4,V"),
        Ok(LocalCommand::Place {
            at: at(2, 4),
            orientation: Orientation::Vertical
        })
    );
    assert_eq!(parse_placement("2 4"), Err(InputError::MissingField));
    assert_eq!(
        parse_placement("2 4 X"),
        Err(InputError::BadOrientation("X".into()))
    );
    assert_eq!(
        parse_placement("2 11 H"),
        Err(InputError::OutOfRange { row: 2, col: 11 })
    );
    assert_eq!(parse_placement("1 2 H V"), Err(InputError::TooManyFields));
}

#[test]
fn test_parse_turn_lines() {
    assert_eq!(parse_turn("3 4"), Ok(LocalCommand::Shoot(at(3, 4))));
    assert_eq!(parse_turn(" 3,4 "), Ok(LocalCommand::Shoot(at(3, 4))));
    assert_eq!(parse_turn("Q"), Ok(LocalCommand::Surrender));
    assert_eq!(parse_turn("surrender"), Ok(LocalCommand::Surrender));
    assert_eq!(parse_turn(""), Err(InputError::Empty));
    assert_eq!(parse_turn("3"), Err(InputError::MissingField));
    assert_eq!(parse_turn("a 4"), Err(InputError::NotANumber("a".into())));
    assert_eq!(
        parse_turn("10 0"),
        Err(InputError::OutOfRange { row: 10, col: 0 })
    );
    assert_eq!(parse_turn("-1 0"), Err(InputError::NotANumber("-1".into())));
}
