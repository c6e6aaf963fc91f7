use std::collections::BTreeMap;

use crate::config::GridSize;
use crate::pixel::{Color, Coordinate, Pixel};
use crate::snake::Snake;

/// Immutable mapping from coordinate to pixel.
///
/// Grids are layers: a background from [`Grid::fill`], the snake and the
/// apple through their `From` conversions, combined with [`Grid::merge`].
/// No operation mutates a grid after it has been built.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Grid {
    cells: BTreeMap<Coordinate, Pixel>,
}

impl Grid {
    /// Builds one pixel of `color` for every coordinate inside `size`.
    #[must_use]
    pub fn fill(color: Color, size: GridSize) -> Self {
        (0..i32::from(size.width))
            .flat_map(|x| (0..i32::from(size.height)).map(move |y| Pixel::new(x, y, color)))
            .collect()
    }

    /// Builds a grid keyed by coordinate. When two pixels share a coordinate
    /// the later one wins.
    #[must_use]
    pub fn from_pixels<I>(pixels: I) -> Self
    where
        I: IntoIterator<Item = Pixel>,
    {
        pixels.into_iter().collect()
    }

    /// Overlays `layers` in order; at every coordinate the pixel of the last
    /// layer defining it wins.
    #[must_use]
    pub fn merge<'a, I>(layers: I) -> Self
    where
        I: IntoIterator<Item = &'a Grid>,
    {
        layers
            .into_iter()
            .flat_map(|layer| layer.cells.values().copied())
            .collect()
    }

    #[must_use]
    pub fn get(&self, coordinate: Coordinate) -> Option<&Pixel> {
        self.cells.get(&coordinate)
    }

    #[must_use]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.cells.contains_key(&coordinate)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true when the grid holds exactly one pixel for every
    /// coordinate of `size` and nothing else.
    #[must_use]
    pub fn covers(&self, size: GridSize) -> bool {
        self.len() == size.total_cells()
            && self
                .cells
                .keys()
                .all(|coordinate| coordinate.is_within_bounds(size))
    }

    /// Iterates pixels in coordinate order.
    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> {
        self.cells.values()
    }

    /// Iterates coordinates in order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells.keys().copied()
    }

    /// Flattens the grid into a pixel sequence in coordinate order.
    #[must_use]
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.cells.into_values().collect()
    }
}

impl FromIterator<Pixel> for Grid {
    fn from_iter<I: IntoIterator<Item = Pixel>>(iter: I) -> Self {
        let cells = iter
            .into_iter()
            .map(|pixel| (pixel.coordinate(), pixel))
            .collect();
        Self { cells }
    }
}

impl From<&Snake> for Grid {
    fn from(snake: &Snake) -> Self {
        snake.segments().copied().collect()
    }
}

/// A single pixel layer, used for the apple.
impl From<Pixel> for Grid {
    fn from(pixel: Pixel) -> Self {
        Self::from_pixels([pixel])
    }
}
