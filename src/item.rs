use std::collections::HashSet;

use crate::error::GameError;
use crate::grid::{Grid, Position};
use crate::rng::SessionRng;

/// Random draws per grid cell before spawning falls back to scanning the board.
const SPAWN_DRAWS_PER_CELL: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Cherry,
    Poison,
    Shrink,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Cherry, ItemKind::Poison, ItemKind::Shrink];

    pub fn random(rng: &mut SessionRng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A consumable lying on the board. `age` counts ticks since it appeared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    position: Position,
    kind: ItemKind,
    age: u32,
}

impl Item {
    pub fn new(position: Position, kind: ItemKind) -> Self {
        Item { position, kind, age: 0 }
    }

    /// Places a fresh item of random kind on a cell outside `unsafe_cells`.
    ///
    /// Draws uniformly random cells and rejects unsafe ones. After a bounded
    /// number of draws it picks uniformly among whatever safe cells are left,
    /// and reports [`GameError::SpawnExhausted`] when there are none.
    pub fn spawn(
        grid: &Grid,
        unsafe_cells: &HashSet<Position>,
        rng: &mut SessionRng,
    ) -> Result<Self, GameError> {
        let position = pick_safe_cell(grid, unsafe_cells, rng)?;
        let kind = ItemKind::random(rng);
        Ok(Item::new(position, kind))
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn advance_age(&mut self) {
        self.age = self.age.saturating_add(1);
    }

    pub fn is_expired(&self, max_age: u32) -> bool {
        self.age > max_age
    }
}

fn pick_safe_cell(
    grid: &Grid,
    unsafe_cells: &HashSet<Position>,
    rng: &mut SessionRng,
) -> Result<Position, GameError> {
    let attempts = grid.cell_count() * SPAWN_DRAWS_PER_CELL;

    for _ in 0..attempts {
        let pos = Position::new(
            rng.random_range(0..grid.columns()),
            rng.random_range(0..grid.rows()),
        );
        if !unsafe_cells.contains(&pos) {
            return Ok(pos);
        }
    }

    // Nearly full board, sample the leftovers directly
    let safe: Vec<Position> = grid.cells().filter(|pos| !unsafe_cells.contains(pos)).collect();
    if safe.is_empty() {
        return Err(GameError::SpawnExhausted {
            unsafe_cells: unsafe_cells.len(),
            attempts,
        });
    }
    Ok(safe[rng.random_range(0..safe.len())])
}
