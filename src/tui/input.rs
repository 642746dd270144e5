//! Keyboard navigation over the board.

use crossterm::event::KeyCode;
use quantum_tictactoe::Position;

/// Moves cursor based on arrow keys, staying put at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, column) = (cursor.row(), cursor.column());
    let next = match key {
        KeyCode::Up => row.checked_sub(1).and_then(|r| Position::at(r, column)),
        KeyCode::Down => Position::at(row + 1, column),
        KeyCode::Left => column.checked_sub(1).and_then(|c| Position::at(row, c)),
        KeyCode::Right => Position::at(row, column + 1),
        _ => None,
    };
    next.unwrap_or(cursor)
}

/// Maps the number keys 1-9 to boxes.
pub fn digit_position(key: KeyCode) -> Option<Position> {
    match key {
        KeyCode::Char(c) => Position::from_number(c.encode_utf8(&mut [0; 4])),
        _ => None,
    }
}
