use log::debug;
use rand::Rng;

use crate::apple::place_apple;
use crate::error::GameError;
use crate::grid::Grid;
use crate::input::Direction;
use crate::pixel::Pixel;
use crate::snake::Snake;
use crate::world::World;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOverWall,
    GameOverSelf,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

/// Complete state of one game. Each step consumes it and returns the next.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Pixel,
    pub status: GameStatus,
}

impl GameState {
    /// Creates the starting state with the apple on a random free cell.
    pub fn new<R: Rng + ?Sized>(world: &World, rng: &mut R) -> Result<Self, GameError> {
        let config = world.config();
        let snake = Snake::initial(config.size, config.snake);
        let apple = place_apple(world.background(), &snake, config.apple, rng)?;

        Ok(Self {
            snake,
            apple,
            status: GameStatus::Running,
        })
    }

    /// Applies one move.
    ///
    /// Checks run in a fixed order: wall, then apple, then self-collision
    /// against the body after the move. A snake may enter the cell its tail
    /// leaves in the same step. On a collision the returned state keeps the
    /// pre-move snake and apple with a terminal status. Terminal states are
    /// returned unchanged.
    pub fn step<R: Rng + ?Sized>(
        self,
        world: &World,
        direction: Direction,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if self.status.is_terminal() {
            return Ok(self);
        }

        let candidate = self.snake.next_head_position(direction);
        if !candidate.is_within_bounds(world.bounds()) {
            debug!("head left the board at ({}, {})", candidate.x, candidate.y);
            return Ok(Self {
                status: GameStatus::GameOverWall,
                ..self
            });
        }

        let ate_apple = candidate == self.apple.coordinate();
        let head = Pixel::at(candidate, self.snake.color());
        let snake = if ate_apple {
            self.snake.grown(head)
        } else {
            self.snake.advanced(head)
        };

        if snake.head_overlaps_body() {
            debug!("head ran into the body at ({}, {})", candidate.x, candidate.y);
            return Ok(Self {
                status: GameStatus::GameOverSelf,
                ..self
            });
        }

        let apple = if ate_apple {
            place_apple(world.background(), &snake, world.config().apple, rng)?
        } else {
            self.apple
        };

        Ok(Self {
            snake,
            apple,
            status: GameStatus::Running,
        })
    }

    /// Full frame for this state.
    #[must_use]
    pub fn frame(&self, world: &World) -> Grid {
        world.compose(&self.snake, self.apple)
    }
}
