use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, info};

use super::{
    action::Direction,
    config::GameConfig,
    state::{CollisionType, GameOutcome, GameState, Position, RunState, Snake},
};
use crate::persistence::HighScoreStore;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set when this tick ended the game
    pub outcome: Option<GameOutcome>,
}

/// The game engine: owns the state and applies every rule to it
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    state: GameState,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: rand::Rng> GameEngine<R> {
    /// Create an engine in `NotStarted`, already holding the starting layout
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let snake = Self::initial_snake(&config);
        let state = GameState::new(snake, Direction::Right, None, config.cols, config.rows);
        let mut engine = Self { config, state, rng };
        engine.state.food = engine.spawn_food();
        engine
    }

    /// Resume from an arbitrary state, e.g. one built by hand in a test
    pub fn from_state(config: GameConfig, state: GameState, rng: R) -> Self {
        Self { config, state, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    /// Set the high score shown alongside the current game, e.g. after loading it
    pub fn set_high_score(&mut self, high_score: u32) {
        self.state.high_score = high_score;
    }

    fn initial_snake(config: &GameConfig) -> Snake {
        let head = Position::new(config.start_head_col() as i32, config.start_row() as i32);
        Snake::straight(head, Direction::Right, config.initial_snake_length)
    }

    /// Put a fresh snake on the board, clear the score and start running.
    pub fn reset(&mut self) {
        self.state.snake = Self::initial_snake(&self.config);
        self.state.direction = Direction::Right;
        self.state.next_direction = Direction::Right;
        self.state.score = 0;
        self.state.steps = 0;
        self.state.run_state = RunState::Running;
        self.state.food = self.spawn_food();
        if self.state.food.is_none() {
            self.state.run_state = RunState::GameOver(GameOutcome::Won);
        }
        info!(
            cols = self.config.cols,
            rows = self.config.rows,
            "new game started"
        );
    }

    /// Leave `NotStarted`. Has no effect once a game has begun.
    pub fn start(&mut self) -> RunState {
        if self.state.run_state == RunState::NotStarted {
            self.reset();
        }
        self.state.run_state
    }

    /// Throw away the current game and begin a new one, from any state
    pub fn restart(&mut self) -> RunState {
        self.reset();
        self.state.run_state
    }

    /// Queue a turn for the next tick.
    ///
    /// A turn straight back onto the direction applied last tick is ignored
    /// and `false` is returned.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.state.direction.is_opposite(direction) {
            debug!(?direction, current = ?self.state.direction, "reverse turn ignored");
            return false;
        }
        self.state.next_direction = direction;
        true
    }

    /// Flip between `Running` and `Paused`; other states are left alone
    pub fn toggle_pause(&mut self) -> RunState {
        let paused = self.state.run_state == RunState::Running;
        self.set_paused(paused)
    }

    pub fn set_paused(&mut self, paused: bool) -> RunState {
        self.state.run_state = match (self.state.run_state, paused) {
            (RunState::Running, true) => RunState::Paused,
            (RunState::Paused, false) => RunState::Running,
            (other, _) => other,
        };
        self.state.run_state
    }

    /// Advance the game by one tick. Does nothing unless `Running`.
    pub fn step(&mut self) -> StepResult {
        if !self.state.run_state.is_running() {
            return StepResult::default();
        }

        self.state.direction = self.state.next_direction;
        self.state.steps += 1;

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.direction);

        if let Some(collision) = self.check_collision(new_head) {
            return self.finish(GameOutcome::Collision(collision), false);
        }

        self.state.snake.push_head(new_head);

        let ate_food = self.state.food == Some(new_head);
        if !ate_food {
            self.state.snake.pop_tail();
            return StepResult {
                ate_food,
                outcome: None,
            };
        }

        self.state.score += self.config.food_reward;
        self.state.food = self.spawn_food();
        if self.state.food.is_none() {
            return self.finish(GameOutcome::Won, true);
        }

        StepResult {
            ate_food,
            outcome: None,
        }
    }

    fn finish(&mut self, outcome: GameOutcome, ate_food: bool) -> StepResult {
        self.state.run_state = RunState::GameOver(outcome);
        info!(
            ?outcome,
            score = self.state.score,
            length = self.state.snake.len(),
            steps = self.state.steps,
            "game over"
        );
        StepResult {
            ate_food,
            outcome: Some(outcome),
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail is still in place at this point, so moving into the cell
        // it is about to leave counts as a collision.
        if self.state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a free cell uniformly at random, or `None` if the board is full
    fn spawn_food(&mut self) -> Option<Position> {
        let free: Vec<Position> = (0..self.state.rows as i32)
            .flat_map(|y| (0..self.state.cols as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !self.state.is_occupied_by_snake(*pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    /// Compare the finished game against the high score and persist a new record.
    ///
    /// Returns `true` when the score strictly beat the previous high score.
    /// Outside `GameOver` nothing happens.
    pub fn record_game_over<S: HighScoreStore + ?Sized>(&mut self, store: &mut S) -> bool {
        if !self.state.run_state.is_game_over() || self.state.score <= self.state.high_score {
            return false;
        }
        self.state.high_score = self.state.score;
        store.save(self.state.high_score);
        info!(high_score = self.state.high_score, "new high score");
        true
    }
}
