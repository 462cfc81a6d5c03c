use std::io::{self, Write};

use crate::{
    board::Board,
    command::InputError,
    controller::{InputRequest, Notice},
    game::Session,
};

fn flush() {
    if let Err(e) = io::stdout().flush() {
        log::debug!("stdout flush failed: {}", e);
    }
}

/// Render two boards side by side, own board first.
pub fn side_by_side(own: &Board, opponent: &Board) -> String {
    let left = own.to_string();
    let right = opponent.to_string();
    let mut out = format!("{:<24}{}\n", "Your board", "Opponent");
    for (l, r) in left.lines().zip(right.lines()) {
        out.push_str(&format!("{:<24}{}\n", l, r));
    }
    out
}

pub fn print_boards(session: &Session) {
    println!();
    print!(
        "{}",
        side_by_side(session.own_board(), session.opponent_view())
    );
}

pub fn print_notice(notice: &Notice) {
    match notice {
        Notice::YourTurn(_) | Notice::GameOver(_) => println!("\n{}", notice),
        _ => println!("{}", notice),
    }
}

/// Show what the player is being asked for.
pub fn prompt(request: &InputRequest, session: &Session) {
    match request {
        InputRequest::Placement(ship) => {
            println!();
            print!("{}", session.own_board());
            print!(
                "Place your {}: row col H|V (ENTER for random): ",
                ship
            );
        }
        InputRequest::Shot => {
            print_boards(session);
            print!("Target: row col (or 'q' to surrender): ");
        }
    }
    flush();
}

pub fn print_input_error(e: &InputError) {
    println!("✗ {}", e);
}

/// Ask for the player name on the terminal.
pub fn prompt_name() {
    print!("Player name: ");
    flush();
}
