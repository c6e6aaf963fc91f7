use crate::config::{GameConfig, GridSize};
use crate::grid::Grid;
use crate::pixel::Pixel;
use crate::snake::Snake;

/// Fixed surroundings of one run: the configuration and its background.
#[derive(Debug, Clone)]
pub struct World {
    config: GameConfig,
    background: Grid,
}

impl World {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let background = Grid::fill(config.background, config.size);
        Self { config, background }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.size
    }

    /// Every in-bounds cell painted with the background color.
    #[must_use]
    pub fn background(&self) -> &Grid {
        &self.background
    }

    /// Composes a full frame: background, then snake, then apple on top.
    #[must_use]
    pub fn compose(&self, snake: &Snake, apple: Pixel) -> Grid {
        Grid::merge([&self.background, &Grid::from(snake), &Grid::from(apple)])
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{GameConfig, GridSize};
    use crate::pixel::{Color, Coordinate, Pixel};
    use crate::snake::Snake;

    use super::World;

    #[test]
    fn composed_frame_layers_apple_over_snake_over_background() {
        let config = GameConfig {
            size: GridSize {
                width: 5,
                height: 5,
            },
            ..GameConfig::default()
        };
        let world = World::new(config);
        let snake = Snake::from_segments(vec![
            Pixel::new(2, 2, config.snake),
            Pixel::new(1, 2, config.snake),
        ]);
        // Stale overlap: the apple must stay visible.
        let apple = Pixel::new(1, 2, config.apple);

        let frame = world.compose(&snake, apple);

        assert!(frame.covers(config.size));
        let color_at = |x, y| frame.get(Coordinate::new(x, y)).map(|p| p.color);
        assert_eq!(color_at(2, 2), Some(config.snake));
        assert_eq!(color_at(1, 2), Some(config.apple));
        assert_eq!(color_at(0, 0), Some(config.background));
    }

    #[test]
    fn background_uses_configured_color() {
        let background = Color::rgb(1, 2, 3);
        let world = World::new(GameConfig {
            background,
            ..GameConfig::default()
        });

        assert_eq!(world.background().len(), 625);
        assert!(world.background().pixels().all(|p| p.color == background));
    }
}
