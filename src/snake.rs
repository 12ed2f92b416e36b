use std::collections::VecDeque;

use crate::grid::{Grid, Position};
use crate::item::Item;
use Direction::*;

pub const INITIAL_SNAKE_LENGTH: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit step on the board; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// Inverse of [`Direction::delta`]. Diagonals, zero and longer steps are
    /// not directions.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Up),
            (0, 1) => Some(Down),
            (-1, 0) => Some(Left),
            (1, 0) => Some(Right),
            _ => None,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right)
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnakeState {
    Alive,
    Dead,
}

/// Body segments head first. While alive the body is capped at
/// `target_length`; once dead it only loses its tail, one segment per tick.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    target_length: usize,
    state: SnakeState,
}

impl Snake {
    /// A one-segment snake that stretches out to `target_length` as it moves.
    pub fn new(head: Position, target_length: usize, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(head);
        Snake { body, direction, target_length, state: SnakeState::Alive }
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> SnakeState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == SnakeState::Alive
    }

    /// Turns the snake unless `new_direction` would reverse it onto itself.
    /// Dead snakes ignore input.
    pub fn handle_input(&mut self, new_direction: Direction) {
        if self.is_alive() && !new_direction.is_opposite(self.direction) {
            self.direction = new_direction;
        }
    }

    pub fn tick(&mut self, grid: &Grid) {
        if !self.is_alive() {
            self.body.pop_back();
            return;
        }

        let Some(head) = self.head() else {
            return;
        };

        // Leave room for the new head
        while !self.body.is_empty() && self.body.len() >= self.target_length {
            self.body.pop_back();
        }

        let (dx, dy) = self.direction.delta();
        let new_head = grid.wrap(head.x + dx, head.y + dy);
        self.body.push_front(new_head);

        if self.body.iter().skip(1).any(|segment| *segment == new_head) {
            self.state = SnakeState::Dead;
        }
    }

    /// Grows the snake by one if its head sits on `item`.
    pub fn eat(&mut self, item: &Item) -> bool {
        if self.is_alive() && self.head() == Some(item.position()) {
            self.target_length += 1;
            return true;
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn from_segments(segments: &[Position], direction: Direction) -> Self {
        Snake {
            body: segments.iter().copied().collect(),
            direction,
            target_length: segments.len(),
            state: SnakeState::Alive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    fn grid() -> Grid {
        Grid::new(20, 20).unwrap()
    }

    fn positions(snake: &Snake) -> Vec<(i32, i32)> {
        snake.body().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_reverse_input_rejected() {
        let mut snake = Snake::new(Position::new(10, 10), INITIAL_SNAKE_LENGTH, Right);
        snake.handle_input(Left);
        assert_eq!(snake.direction(), Right);
        snake.handle_input(Up);
        assert_eq!(snake.direction(), Up);
        snake.handle_input(Down);
        assert_eq!(snake.direction(), Up);
        snake.handle_input(Up);
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn test_stretches_to_target_length() {
        let grid = grid();
        let mut snake = Snake::new(Position::new(10, 10), INITIAL_SNAKE_LENGTH, Right);
        for expected in [2, 3, 4, 4, 4] {
            snake.tick(&grid);
            assert_eq!(snake.len(), expected);
        }
        assert_eq!(positions(&snake), vec![(15, 10), (14, 10), (13, 10), (12, 10)]);
    }

    #[test]
    fn test_wraps_past_edge() {
        let grid = grid();
        let mut snake = Snake::new(Position::new(19, 0), 2, Right);
        snake.tick(&grid);
        assert_eq!(snake.head(), Some(Position::new(0, 0)));
        snake.handle_input(Up);
        snake.tick(&grid);
        assert_eq!(snake.head(), Some(Position::new(0, 19)));
    }

    #[test]
    fn test_eat_grows_target() {
        let grid = grid();
        let mut snake = Snake::new(Position::new(10, 10), INITIAL_SNAKE_LENGTH, Right);
        snake.tick(&grid);

        let missed = Item::new(Position::new(3, 3), ItemKind::Cherry);
        assert!(!snake.eat(&missed));

        let under_head = Item::new(Position::new(11, 10), ItemKind::Poison);
        assert!(snake.eat(&under_head));
        assert_eq!(snake.target_length(), INITIAL_SNAKE_LENGTH + 1);
    }

    #[test]
    fn test_self_collision_on_exact_tick() {
        let grid = grid();
        // Head at (5,5) moving right, body curling around below it
        let segments = [
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(4, 6),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(7, 6),
        ];
        let mut snake = Snake::from_segments(&segments, Right);
        snake.target_length = 7;

        snake.tick(&grid);
        assert!(snake.is_alive());
        snake.handle_input(Down);
        snake.tick(&grid);
        assert_eq!(snake.head(), Some(Position::new(6, 6)));
        assert_eq!(snake.state(), SnakeState::Dead);
    }

    #[test]
    fn test_tail_chase_without_growth_is_safe() {
        let grid = grid();
        // A 2x2 loop of length 4: the tail leaves the cell the head enters
        let segments = [
            Position::new(1, 0),
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ];
        let mut snake = Snake::from_segments(&segments, Down);
        snake.tick(&grid);
        assert!(snake.is_alive());
        assert_eq!(positions(&snake), vec![(1, 1), (1, 0), (0, 0), (0, 1)]);
    }

    #[test]
    fn test_dead_snake_shrinks_away() {
        let grid = grid();
        let segments = [
            Position::new(2, 2),
            Position::new(3, 2),
            Position::new(3, 3),
            Position::new(2, 3),
            Position::new(1, 3),
        ];
        let mut snake = Snake::from_segments(&segments, Down);
        snake.target_length = 6;
        snake.tick(&grid);
        assert!(!snake.is_alive());
        let len = snake.len();

        snake.handle_input(Left);
        assert_eq!(snake.direction(), Down);

        for remaining in (0..len).rev() {
            snake.tick(&grid);
            assert_eq!(snake.len(), remaining);
        }
        snake.tick(&grid);
        assert!(snake.is_empty());

        let item = Item::new(Position::new(2, 3), ItemKind::Cherry);
        assert!(!snake.eat(&item));
    }

    #[test]
    fn test_direction_delta_round_trip() {
        for dir in [Up, Down, Left, Right] {
            let (dx, dy) = dir.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(dir));
        }
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }
}
