use log::info;
use rand::Rng;

use crate::error::GameError;
use crate::game::{GameState, GameStatus};
use crate::input::Command;
use crate::sink::RenderSink;
use crate::world::World;

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    /// A quit command arrived or the input source ran dry.
    Quit,
    WallCollision,
    SelfCollision,
    /// The snake filled the board; there is nowhere left for an apple.
    BoardFull,
}

impl Outcome {
    /// Human-readable line for the end-of-game report.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Quit => "Bye!",
            Self::WallCollision => "Game over: the snake hit the wall.",
            Self::SelfCollision => "Game over: the snake bit itself.",
            Self::BoardFull => "The snake fills the whole board. You win!",
        }
    }
}

/// Result of one finished session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Summary {
    pub outcome: Outcome,
    /// Snake length when the session ended.
    pub length: usize,
    /// Moves applied, including the final one.
    pub steps: u64,
}

/// Plays one game: draws the opening frame, then pulls one command at a time
/// and draws a frame after every surviving move.
///
/// Returns when the game reaches a terminal status, the board fills up, or a
/// quit command arrives. No frame is drawn for a fatal move, so the sink
/// keeps showing the last legal position.
pub fn play<I, S, R>(
    world: &World,
    commands: I,
    sink: &mut S,
    rng: &mut R,
) -> Result<Summary, GameError>
where
    I: IntoIterator<Item = Command>,
    S: RenderSink + ?Sized,
    R: Rng + ?Sized,
{
    let mut state = GameState::new(world, rng)?;
    let mut steps = 0;
    info!(
        "starting game on a {}x{} board",
        world.bounds().width,
        world.bounds().height
    );
    sink.draw(state.frame(world).into_pixels());

    for command in commands {
        let Command::Move(direction) = command else {
            return Ok(finish(Outcome::Quit, state.snake.len(), steps));
        };

        let length = state.snake.len();
        steps += 1;
        state = match state.step(world, direction, rng) {
            Ok(next) => next,
            Err(GameError::NoFreeCell) => {
                return Ok(finish(Outcome::BoardFull, length + 1, steps));
            }
            Err(error) => return Err(error),
        };

        match state.status {
            GameStatus::Running => sink.draw(state.frame(world).into_pixels()),
            GameStatus::GameOverWall => {
                return Ok(finish(Outcome::WallCollision, length, steps));
            }
            GameStatus::GameOverSelf => {
                return Ok(finish(Outcome::SelfCollision, length, steps));
            }
        }
    }

    Ok(finish(Outcome::Quit, state.snake.len(), steps))
}

fn finish(outcome: Outcome, length: usize, steps: u64) -> Summary {
    info!("game ended after {steps} steps: {outcome:?}, length {length}");
    Summary {
        outcome,
        length,
        steps,
    }
}
