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

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Committed direction; `None` until the first turn
    pub direction: Option<Direction>,
    /// Direction of the most recent move
    pub last_moved: Option<Direction>,
}

impl Snake {
    /// A one-segment snake that is not moving yet
    pub fn new(head: Position) -> Self {
        Self {
            body: vec![head],
            direction: None,
            last_moved: None,
        }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(segments: Vec<Position>, direction: Option<Direction>) -> Self {
        Self {
            body: segments,
            direction,
            last_moved: direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend `new_head`, releasing the tail unless the snake grows
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Whether `direction` would fold the snake back onto itself.
    ///
    /// Checked against both the committed direction and the direction of
    /// the last move, so two quick turns inside one tick cannot add up to
    /// a reversal.
    pub fn would_reverse(&self, direction: Direction) -> bool {
        let against =
            |current: Option<Direction>| current.is_some_and(|c| c.is_opposite(direction));
        against(self.direction) || against(self.last_moved)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
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

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// The snake fills every cell and no food can be placed
    BoardFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Freshly reset, waiting for the first directional key
    Ready,
    Running,
    GameOver(EndReason),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_size: usize,
    pub score: u32,
    pub ticks: u32,
    pub phase: Phase,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid_size: usize) -> Self {
        Self {
            snake,
            food,
            grid_size,
            score: 0,
            ticks: 0,
            phase: Phase::Ready,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    /// Commit a new direction unless it reverses the snake.
    ///
    /// Returns whether the turn was accepted. Turns are ignored once the
    /// game is over.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.is_over() || self.snake.would_reverse(direction) {
            return false;
        }

        self.snake.direction = Some(direction);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_snake(direction: Direction) -> Snake {
        Snake::from_segments(
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Some(direction),
        )
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_new_snake_is_idle() {
        let snake = Snake::new(Position::new(10, 10));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.direction, None);
        assert!(snake.occupies(Position::new(10, 10)));
        assert!(!snake.occupies(Position::new(11, 10)));
    }

    #[test]
    fn test_advance_grow_or_shift() {
        let mut snake = moving_snake(Direction::Right);

        snake.advance_to(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.occupies(Position::new(3, 5)));

        snake.advance_to(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.body[3], Position::new(4, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake = moving_snake(Direction::Right);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(Snake::new(Position::new(5, 5)), Position::new(10, 10), 20);

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_reversal_rejected() {
        let mut state = GameState::new(moving_snake(Direction::Right), Position::new(9, 9), 20);

        assert!(!state.steer(Direction::Left));
        assert_eq!(state.snake.direction, Some(Direction::Right));

        assert!(state.steer(Direction::Up));
        assert_eq!(state.snake.direction, Some(Direction::Up));
    }

    #[test]
    fn test_double_turn_within_tick_cannot_reverse() {
        let mut state = GameState::new(moving_snake(Direction::Right), Position::new(9, 9), 20);

        // Up is fine, but Left would still reverse the last actual move
        assert!(state.steer(Direction::Up));
        assert!(!state.steer(Direction::Left));
        assert_eq!(state.snake.direction, Some(Direction::Up));
    }

    #[test]
    fn test_idle_snake_accepts_any_direction() {
        for dir in Direction::ALL {
            let snake = Snake::new(Position::new(5, 5));
            let mut state = GameState::new(snake, Position::new(7, 7), 10);
            assert!(state.steer(dir));
        }
    }

    #[test]
    fn test_pending_direction_blocks_its_reverse_before_first_move() {
        let mut state = GameState::new(Snake::new(Position::new(5, 5)), Position::new(7, 7), 10);
        assert!(state.steer(Direction::Right));
        assert!(!state.steer(Direction::Left));
    }

    #[test]
    fn test_no_steering_after_game_over() {
        let mut state = GameState::new(moving_snake(Direction::Right), Position::new(9, 9), 20);
        state.phase = Phase::GameOver(EndReason::Collision(CollisionType::Wall));
        assert!(!state.steer(Direction::Up));
    }
}
