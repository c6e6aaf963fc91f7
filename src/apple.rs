use log::debug;
use rand::Rng;

use crate::error::GameError;
use crate::grid::Grid;
use crate::pixel::{Color, Pixel};
use crate::snake::Snake;

/// Picks a background cell the snake does not cover, uniformly at random,
/// and paints it `color`.
///
/// Fails with [`GameError::NoFreeCell`] when the snake covers the whole
/// background.
pub fn place_apple<R: Rng + ?Sized>(
    background: &Grid,
    snake: &Snake,
    color: Color,
    rng: &mut R,
) -> Result<Pixel, GameError> {
    let free_cells = free_cells(background, snake);
    if free_cells.is_empty() {
        return Err(GameError::NoFreeCell);
    }

    let index = rng.gen_range(0..free_cells.len());
    let apple = free_cells[index].recolored(color);
    debug!(
        "placed apple at ({}, {}) among {} free cells",
        apple.x,
        apple.y,
        free_cells.len()
    );

    Ok(apple)
}

/// Background pixels whose coordinate no snake segment occupies.
#[must_use]
pub fn free_cells(background: &Grid, snake: &Snake) -> Vec<Pixel> {
    let occupied = Grid::from(snake);
    background
        .pixels()
        .filter(|pixel| !occupied.contains(pixel.coordinate()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;
    use crate::error::GameError;
    use crate::grid::Grid;
    use crate::pixel::{Color, Coordinate, Pixel};
    use crate::snake::Snake;

    use super::{free_cells, place_apple};

    const BLUE: Color = Color::rgb(0x64, 0x95, 0xed);
    const GREEN: Color = Color::rgb(0, 0xff, 0);
    const YELLOW: Color = Color::rgb(0xff, 0xff, 0);

    fn background(width: u16, height: u16) -> Grid {
        Grid::fill(BLUE, GridSize { width, height })
    }

    fn snake_at(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(
            cells
                .iter()
                .map(|&(x, y)| Pixel::new(x, y, GREEN))
                .collect(),
        )
    }

    #[test]
    fn apple_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = snake_at(&[(0, 0), (1, 0), (2, 0)]);
        let background = background(8, 6);

        for _ in 0..100 {
            let apple = place_apple(&background, &snake, YELLOW, &mut rng)
                .expect("board has free cells");
            assert!(!snake.occupies(apple.coordinate()));
            assert_eq!(apple.color, YELLOW);
        }
    }

    #[test]
    fn only_free_cell_is_chosen() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = snake_at(&[(0, 0), (1, 0), (1, 1)]);

        let apple = place_apple(&background(2, 2), &snake, YELLOW, &mut rng)
            .expect("one cell is free");

        assert_eq!(apple, Pixel::new(0, 1, YELLOW));
    }

    #[test]
    fn full_board_has_no_free_cell() {
        let mut rng = StdRng::seed_from_u64(2);
        let snake = snake_at(&[(0, 0), (1, 0), (1, 1), (0, 1)]);

        assert_eq!(
            place_apple(&background(2, 2), &snake, YELLOW, &mut rng),
            Err(GameError::NoFreeCell)
        );
    }

    #[test]
    fn free_cells_is_background_minus_snake() {
        let snake = snake_at(&[(12, 12), (11, 12), (10, 12)]);

        let free = free_cells(&background(25, 25), &snake);

        assert_eq!(free.len(), 622);
        assert!(free.iter().all(|pixel| !snake.occupies(pixel.coordinate())));
    }

    #[test]
    fn same_seed_places_the_same_apple() {
        let snake = snake_at(&[(12, 12), (11, 12), (10, 12)]);
        let background = background(25, 25);

        let first = place_apple(&background, &snake, YELLOW, &mut StdRng::seed_from_u64(99));
        let second = place_apple(&background, &snake, YELLOW, &mut StdRng::seed_from_u64(99));

        assert_eq!(first, second);
    }

    #[test]
    fn placement_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let snake = snake_at(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
        let background = background(4, 2);
        let free = free_cells(&background, &snake).len();
        let rounds = 40_000;

        let mut counts: HashMap<Coordinate, usize> = HashMap::new();
        for _ in 0..rounds {
            let apple = place_apple(&background, &snake, YELLOW, &mut rng)
                .expect("bottom row is free");
            *counts.entry(apple.coordinate()).or_default() += 1;
        }

        assert_eq!(counts.len(), free);
        let expected = rounds / free;
        for (coordinate, count) in counts {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation * 20 < expected,
                "{coordinate:?} picked {count} times, expected about {expected}"
            );
        }
    }
}
