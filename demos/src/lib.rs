//! Shared pieces of the tracepath demos: the canonical scenarios and a
//! plain-text renderer for replayed traces.

use tracepath_core::{Cell, Grid, ObstacleArea, Point, Scenario};
use tracepath_paths::{Search, TileState, TracePlayer};

const GLYPH_START: char = 'S';
const GLYPH_END: char = 'E';
const GLYPH_PATH: char = '*';
const GLYPH_VISITED: char = 'o';
const GLYPH_FRONTIER: char = '+';
const GLYPH_JUMPED: char = '-';
const GLYPH_WALL: char = '#';
const GLYPH_FLOOR: char = '.';
const GLYPH_HEAVY: char = '&';

/// The scenarios run by the demo binary, by name.
pub fn scenarios() -> Vec<(&'static str, Scenario)> {
    vec![
        ("open", Scenario::new(5, 5, Point::at(0, 0), Point::at(4, 4))),
        (
            "gap",
            Scenario::new(5, 5, Point::at(0, 0), Point::at(4, 4))
                .with_obstacle(ObstacleArea::wall(0, 2, 1, 4)),
        ),
        (
            "marsh",
            Scenario::new(16, 9, Point::at(4, 0), Point::at(4, 15))
                .with_obstacle(ObstacleArea::wall(0, 5, 1, 7))
                .with_obstacle(ObstacleArea::wall(2, 10, 1, 7))
                .with_obstacle(ObstacleArea {
                    row: 3,
                    col: 6,
                    width: 4,
                    height: 3,
                    weight: 5,
                }),
        ),
    ]
}

/// Character for one tile: the overlay state wins over the terrain.
pub fn glyph(state: TileState, cell: &Cell) -> char {
    match state {
        TileState::Start => GLYPH_START,
        TileState::End => GLYPH_END,
        TileState::Path => GLYPH_PATH,
        TileState::Visited => GLYPH_VISITED,
        TileState::Frontier => GLYPH_FRONTIER,
        TileState::JumpedOver => GLYPH_JUMPED,
        TileState::Empty if !cell.is_passable() => GLYPH_WALL,
        TileState::Empty if cell.weight == 1 => GLYPH_FLOOR,
        TileState::Empty => u32::try_from(cell.weight)
            .ok()
            .and_then(|w| char::from_digit(w, 10))
            .unwrap_or(GLYPH_HEAVY),
    }
}

/// Draw the grid with the player's current overlay, one line per row.
pub fn render(grid: &Grid, player: &TracePlayer<'_>) -> String {
    let mut out = String::with_capacity(grid.len() + grid.height() as usize);
    for cell in grid {
        let state = player.tile(cell.pos).unwrap_or_default();
        out.push(glyph(state, cell));
        if cell.pos.x == grid.width() - 1 {
            out.push('\n');
        }
    }
    out
}

/// Replay the first `position` events of `search` and draw the result.
pub fn frame(grid: &Grid, search: &Search, position: usize) -> String {
    let mut player = TracePlayer::new(&search.trace, grid.bounds());
    player.seek(position);
    render(grid, &player)
}

/// One-line outcome of a search.
pub fn summary(search: &Search) -> String {
    match &search.path {
        Some(path) => format!(
            "{:<9} path of {} cells, cost {}, {} visited, {} events",
            search.algorithm.name(),
            path.len(),
            path.cost(),
            search.visited(),
            search.trace.len()
        ),
        None => format!(
            "{:<9} no path, {} visited, {} events",
            search.algorithm.name(),
            search.visited(),
            search.trace.len()
        ),
    }
}
