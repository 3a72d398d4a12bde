use std::collections::VecDeque;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake's body, ordered from tail (front) to head (back)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Build a snake from cells listed tail first, head last.
    ///
    /// Returns `None` for an empty list.
    pub fn from_cells<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<Position>,
    {
        let body: VecDeque<Position> = cells.into_iter().map(Into::into).collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// A straight snake whose head is at `head`, body trailing behind it
    pub fn straight(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_front(head);
        for _ in 1..length {
            let behind = body[0].moved_by(-dx, -dy);
            body.push_front(behind);
        }
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        // `body` is never empty: both constructors guarantee at least one cell
        // and `pop_tail` is only called right after `push_head`.
        self.body[self.body.len() - 1]
    }

    /// Get the tail position
    pub fn tail(&self) -> Position {
        self.body[0]
    }

    /// Cells from tail to head
    pub fn cells(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn to_vec(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }

    /// Check if position is any of the snake's cells, tail included
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_back(pos);
    }

    pub(crate) fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_front();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Collision(CollisionType),
    /// The snake filled the whole board
    Won,
}

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver(GameOutcome),
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, RunState::GameOver(_))
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction applied on the last tick
    pub direction: Direction,
    /// Direction requested by input, committed at the start of the next tick
    pub next_direction: Direction,
    pub food: Option<Position>,
    pub cols: usize,
    pub rows: usize,
    pub score: u32,
    pub high_score: u32,
    pub steps: u32,
    pub run_state: RunState,
}

impl GameState {
    /// Create a new game state. The snake keeps moving in `direction`.
    pub fn new(
        snake: Snake,
        direction: Direction,
        food: Option<Position>,
        cols: usize,
        rows: usize,
    ) -> Self {
        Self {
            snake,
            direction,
            next_direction: direction,
            food,
            cols,
            rows,
            score: 0,
            high_score: 0,
            steps: 0,
            run_state: RunState::NotStarted,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && (pos.x as usize) < self.cols && pos.y >= 0 && (pos.y as usize) < self.rows
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }
}
