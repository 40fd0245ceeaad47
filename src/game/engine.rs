use super::{
    config::GameConfig,
    state::{CollisionType, EndReason, GameState, Phase, Position, Snake},
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::collections::HashSet;

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake moved at all this tick
    pub moved: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the game ended on a collision
    pub collided: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// The snake covers the whole grid, so no food could be placed
    pub board_full: bool,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.start_position().into());
        GameState::new(snake, self.config.initial_food().into(), self.config.grid_size)
    }

    /// Execute one tick of the game.
    ///
    /// Does nothing unless the game is running with a committed direction.
    pub fn advance(&mut self, state: &mut GameState) -> StepResult {
        let direction = match (state.phase, state.snake.direction) {
            (Phase::Running, Some(direction)) => direction,
            _ => return StepResult::default(),
        };

        let new_head = state.snake.head().moved_in_direction(direction);
        // Checked before the tail moves: stepping onto the tail's cell is fatal
        let collision = self.check_collision(state, new_head);
        let ate_food = collision.is_none() && new_head == state.food;

        state.snake.advance_to(new_head, ate_food);
        state.snake.last_moved = Some(direction);
        state.ticks += 1;

        if let Some(collision_type) = collision {
            state.phase = Phase::GameOver(EndReason::Collision(collision_type));
            return StepResult {
                moved: true,
                collided: true,
                collision_type: Some(collision_type),
                ..Default::default()
            };
        }

        let mut result = StepResult {
            moved: true,
            ate_food,
            ..Default::default()
        };

        if ate_food {
            state.score += 1;
            match self.spawn_food_avoid_snake(&state.snake, state.grid_size) {
                Some(food) => state.food = food,
                None => {
                    state.phase = Phase::GameOver(EndReason::BoardFull);
                    result.board_full = true;
                }
            }
        }

        result
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a uniformly random cell the snake does not cover.
    ///
    /// Rejection sampling is bounded by `food_attempts`; a crowded board
    /// (half or more occupied) or an exhausted budget falls back to drawing
    /// from the explicit free-cell list. `None` means the board is full.
    pub fn spawn_food_avoid_snake(&mut self, snake: &Snake, grid_size: usize) -> Option<Position> {
        let cells = grid_size * grid_size;

        if snake.len() * 2 < cells {
            for _ in 0..self.config.food_attempts {
                let x = self.rng.gen_range(0..grid_size) as i32;
                let y = self.rng.gen_range(0..grid_size) as i32;
                let pos = Position::new(x, y);

                if !snake.occupies(pos) {
                    return Some(pos);
                }
            }
        }

        let free = free_cells(snake, grid_size);
        free.choose(&mut self.rng).copied()
    }
}

/// Every grid cell not covered by the snake, row by row
pub fn free_cells(snake: &Snake, grid_size: usize) -> Vec<Position> {
    let size = grid_size as i32;
    let taken: HashSet<Position> = snake.body.iter().copied().collect();

    (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|pos| !taken.contains(pos))
        .collect()
}
