use thiserror::Error;

/// Failures of the game core. Collisions are not errors; they are
/// terminal `GameStatus` values.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum GameError {
    /// A symbol outside `left`, `right`, `up`, `down` reached the engine.
    #[error("unsupported direction {0:?}")]
    UnsupportedDirection(String),

    /// Every background cell is covered by the snake.
    #[error("no free cell left for the apple")]
    NoFreeCell,
}
