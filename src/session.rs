use std::collections::HashSet;

use crate::config::GameConfig;
use crate::error::{ConfigurationError, GameError};
use crate::grid::{Grid, Position};
use crate::item::Item;
use crate::log;
use crate::rng::SessionRng;
use crate::snake::{Direction, Snake, INITIAL_SNAKE_LENGTH};

/// Below this many items a tick may add one more.
const MIN_ACTIVE_ITEMS: usize = 3;

/// The simulation rules a session runs with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionRules {
    pub max_item_age: u32,
    pub item_spawn_chance: f64,
}

impl From<&GameConfig> for SessionRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            max_item_age: config.max_item_age,
            item_spawn_chance: config.item_spawn_chance,
        }
    }
}

/// What a single tick changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub eaten: usize,
    pub expired: usize,
    pub spawned: usize,
    pub died: bool,
}

/// One game: the board, the snake, the items on it and the score.
///
/// Driven from outside, one [`GameSession::tick`] per frame. Input arrives
/// through [`GameSession::set_input`] at any point between ticks and only the
/// most recent direction is kept.
pub struct GameSession {
    grid: Grid,
    snake: Snake,
    items: Vec<Item>,
    score: u32,
    frame: u64,
    pending_direction: Option<Direction>,
    rules: SessionRules,
    rng: SessionRng,
}

impl GameSession {
    /// Seeds from `config.seed`, or from entropy when unset.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigurationError> {
        let rng = match config.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self, ConfigurationError> {
        Self::with_rng(config, SessionRng::new(seed))
    }

    fn with_rng(config: &GameConfig, rng: SessionRng) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let grid = config.grid()?;

        log!(
            "New {}x{} session, seed {}",
            grid.columns(),
            grid.rows(),
            rng.seed()
        );

        Ok(GameSession {
            grid,
            snake: initial_snake(&grid),
            items: Vec::new(),
            score: 0,
            frame: 0,
            pending_direction: None,
            rules: SessionRules::from(config),
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn is_over(&self) -> bool {
        !self.snake.is_alive()
    }

    /// Latest direction request; overwrites one not yet consumed by a tick.
    pub fn set_input(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Direction request as a unit vector. Anything that is not one of the
    /// four unit steps is dropped and leaves the pending input untouched.
    pub fn set_input_delta(&mut self, dx: i32, dy: i32) -> bool {
        match Direction::from_delta(dx, dy) {
            Some(direction) => {
                self.set_input(direction);
                true
            }
            None => {
                log!("Ignored input ({}, {})", dx, dy);
                false
            }
        }
    }

    /// Puts an item on the board as-is.
    pub fn insert_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Fresh snake, no items, zero score and frame. The grid stays.
    pub fn reset(&mut self) {
        self.snake = initial_snake(&self.grid);
        self.items.clear();
        self.score = 0;
        self.frame = 0;
        self.pending_direction = None;
        log!("Session reset");
    }

    /// Cells an item may not spawn on: everything occupied, plus every cell
    /// orthogonally next to something occupied.
    pub fn unsafe_cells(&self) -> HashSet<Position> {
        let occupied = self
            .items
            .iter()
            .map(Item::position)
            .chain(self.snake.body().iter().copied());

        let mut cells = HashSet::new();
        for pos in occupied {
            cells.insert(pos);
            cells.extend(self.grid.neighbors(pos));
        }
        cells
    }

    /// Advances the game by one frame.
    ///
    /// Fails only when an eaten or expired item has nowhere left to respawn.
    /// The frame still counts in that case: score, snake and the items that
    /// could be placed are left as they are, no extra item is attempted, and
    /// the session stays usable (typically followed by [`GameSession::reset`]).
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        let mut outcome = TickOutcome::default();

        if let Some(direction) = self.pending_direction.take() {
            self.snake.handle_input(direction);
        }

        let was_alive = self.snake.is_alive();
        self.snake.tick(&self.grid);
        if was_alive && !self.snake.is_alive() {
            outcome.died = true;
            if let Some(head) = self.snake.head() {
                log!("You died at ({}, {}) with score {}", head.x, head.y, self.score);
            }
        }

        for item in &mut self.items {
            item.advance_age();
        }

        let mut removed = 0;
        let mut kept = Vec::with_capacity(self.items.len());
        for item in std::mem::take(&mut self.items) {
            if self.snake.eat(&item) {
                self.score += 1;
                outcome.eaten += 1;
                removed += 1;
                log!(
                    "Ate {:?} at ({}, {}). Score: {}",
                    item.kind(),
                    item.position().x,
                    item.position().y,
                    self.score
                );
            } else if item.is_expired(self.rules.max_item_age) {
                outcome.expired += 1;
                removed += 1;
            } else {
                kept.push(item);
            }
        }
        self.items = kept;

        let mut exhausted = None;
        for _ in 0..removed {
            match self.spawn_item() {
                Ok(()) => outcome.spawned += 1,
                Err(err) => {
                    exhausted = Some(err);
                    break;
                }
            }
        }

        if exhausted.is_none()
            && self.items.len() < MIN_ACTIVE_ITEMS
            && self.rng.chance(self.rules.item_spawn_chance)
        {
            match self.spawn_item() {
                Ok(()) => outcome.spawned += 1,
                Err(err) => log!("Skipped extra item: {}", err),
            }
        }

        self.frame += 1;
        match exhausted {
            Some(err) => Err(err),
            None => Ok(outcome),
        }
    }

    fn spawn_item(&mut self) -> Result<(), GameError> {
        let unsafe_cells = self.unsafe_cells();
        match Item::spawn(&self.grid, &unsafe_cells, &mut self.rng) {
            Ok(item) => {
                self.items.push(item);
                Ok(())
            }
            Err(err) => {
                log!("Item spawn failed: {}", err);
                Err(err)
            }
        }
    }
}

fn initial_snake(grid: &Grid) -> Snake {
    let center = Position::new(grid.columns() / 2, grid.rows() / 2);
    Snake::new(center, INITIAL_SNAKE_LENGTH, Direction::Right)
}
