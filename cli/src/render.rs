use sweeper_core::{BoardEngine, Cell, Coord2, GameState, GameStatus, MinePlacer, TickSource};

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Hidden,
    Revealed(u8),
    Flagged,
    Mine,
    TriggeredMine,
}

impl ViewCellState {
    fn glyph(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Revealed(0) => '.',
            Self::Revealed(count) => char::from(b'0' + count),
            Self::Flagged => 'F',
            Self::Mine => '*',
            Self::TriggeredMine => 'X',
        }
    }
}

fn view_cell(
    cell: Cell,
    coords: Coord2,
    status: GameStatus,
    exploded_at: Option<Coord2>,
) -> ViewCellState {
    match status {
        // a won board shows every mine as flagged
        GameStatus::Won if cell.is_mine() => ViewCellState::Flagged,
        GameStatus::Lost if exploded_at == Some(coords) => ViewCellState::TriggeredMine,
        GameStatus::Lost if cell.is_mine() => ViewCellState::Mine,
        _ if cell.is_revealed() => ViewCellState::Revealed(cell.adjacent_mines()),
        _ if cell.is_flagged() => ViewCellState::Flagged,
        _ => ViewCellState::Hidden,
    }
}

fn face(status: GameStatus) -> &'static str {
    match status {
        GameStatus::NotStarted | GameStatus::Playing => "😊",
        GameStatus::Won => "😎",
        GameStatus::Lost => "😵",
    }
}

/// Counter line: mines left, face, seconds.
pub(crate) fn status_line(state: &GameState) -> String {
    format!(
        "{:03} {} {:03}",
        state.mines_left(),
        face(state.status),
        state.elapsed_secs
    )
}

pub(crate) fn board<P: MinePlacer, T: TickSource>(engine: &BoardEngine<P, T>) -> String {
    let (rows, cols) = engine.size();
    let status = engine.status();
    let exploded_at = engine.exploded_at();
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..cols {
        out.push(char::from(b'0' + col % 10));
    }
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{row:>3} "));
        for col in 0..cols {
            let coords = (row, col);
            let cell = engine.board()[[usize::from(row), usize::from(col)]];
            out.push(view_cell(cell, coords, status, exploded_at).glyph());
        }
        out.push('\n');
    }

    out
}
