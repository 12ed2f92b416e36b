use crate::error::ConfigurationError;

/// A cell on the board. Stored positions are always grid-wrapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Toroidal board of `columns` x `rows` cells. Leaving one edge re-enters from
/// the opposite one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: i32,
    rows: i32,
}

impl Grid {
    pub fn new(columns: i32, rows: i32) -> Result<Self, ConfigurationError> {
        if columns <= 0 || rows <= 0 {
            return Err(ConfigurationError::EmptyGrid { columns, rows });
        }
        Ok(Grid { columns, rows })
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Past the right/bottom edge goes to 0, before the left/top edge goes to
    /// the last column/row. Coordinates already on the board are untouched.
    pub fn wrap(&self, x: i32, y: i32) -> Position {
        Position::new(wrap_axis(x, self.columns), wrap_axis(y, self.rows))
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.columns).contains(&pos.x) && (0..self.rows).contains(&pos.y)
    }

    /// The four wrap-aware orthogonal neighbours of `pos`.
    pub fn neighbors(&self, pos: Position) -> [Position; 4] {
        [
            self.wrap(pos.x + 1, pos.y),
            self.wrap(pos.x - 1, pos.y),
            self.wrap(pos.x, pos.y + 1),
            self.wrap(pos.x, pos.y - 1),
        ]
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| Position::new(x, y)))
    }
}

fn wrap_axis(value: i32, len: i32) -> i32 {
    if value >= len {
        0
    } else if value < 0 {
        len - 1
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_edges() {
        let grid = Grid::new(20, 15).unwrap();
        assert_eq!(grid.wrap(20, 0), Position::new(0, 0));
        assert_eq!(grid.wrap(-1, 0), Position::new(19, 0));
        assert_eq!(grid.wrap(3, 15), Position::new(3, 0));
        assert_eq!(grid.wrap(3, -1), Position::new(3, 14));
        assert_eq!(grid.wrap(7, 8), Position::new(7, 8));
    }

    #[test]
    fn test_wrap_always_in_bounds() {
        for (columns, rows) in [(1, 1), (1, 7), (5, 3), (20, 20)] {
            let grid = Grid::new(columns, rows).unwrap();
            for x in -50..50 {
                for y in -50..50 {
                    assert!(grid.contains(grid.wrap(x, y)), "{}x{} -> ({}, {})", columns, rows, x, y);
                }
            }
            for (x, y) in [(i32::MIN, i32::MAX), (i32::MAX, i32::MIN)] {
                assert!(grid.contains(grid.wrap(x, y)));
            }
        }
    }

    #[test]
    fn test_neighbors_wrap_around_corner() {
        let grid = Grid::new(4, 3).unwrap();
        let neighbors = grid.neighbors(Position::new(0, 0));
        assert!(neighbors.contains(&Position::new(1, 0)));
        assert!(neighbors.contains(&Position::new(3, 0)));
        assert!(neighbors.contains(&Position::new(0, 1)));
        assert!(neighbors.contains(&Position::new(0, 2)));
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert!(Grid::new(0, 10).is_err());
        assert!(Grid::new(10, -2).is_err());
    }

    #[test]
    fn test_cells_covers_board() {
        let grid = Grid::new(3, 2).unwrap();
        let cells: Vec<Position> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[5], Position::new(2, 1));
    }
}
