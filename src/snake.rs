use std::collections::VecDeque;

use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::input::Direction;
use crate::pixel::{Color, Coordinate, Pixel};

/// Head-first sequence of pixels.
///
/// Movement never mutates a snake in place; [`Snake::advanced`] and
/// [`Snake::grown`] return the body for the next step.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Pixel>,
}

impl Snake {
    /// Creates the starting snake: horizontal, head on the board centre,
    /// body trailing to the left.
    #[must_use]
    pub fn initial(bounds: GridSize, color: Color) -> Self {
        let head_x = i32::from(bounds.width / 2);
        let y = i32::from(bounds.height / 2);

        Self::from_segments(
            (0_i32..)
                .take(INITIAL_SNAKE_LENGTH)
                .map(|offset| Pixel::new(head_x - offset, y, color))
                .collect(),
        )
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Pixel>) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");
        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Returns the current head.
    #[must_use]
    pub fn head(&self) -> &Pixel {
        self.body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Color new heads are painted with.
    #[must_use]
    pub fn color(&self) -> Color {
        self.head().color
    }

    /// Returns the cell the head would enter moving towards `direction`.
    #[must_use]
    pub fn next_head_position(&self, direction: Direction) -> Coordinate {
        self.head().coordinate().shifted(direction)
    }

    /// Returns the snake after a plain move: `head` prepended, tail dropped.
    #[must_use]
    pub fn advanced(&self, head: Pixel) -> Self {
        let mut body = self.body.clone();
        body.push_front(head);
        let _ = body.pop_back();
        Self { body }
    }

    /// Returns the snake after eating: `head` prepended, nothing dropped.
    #[must_use]
    pub fn grown(&self, head: Pixel) -> Self {
        let mut body = self.body.clone();
        body.push_front(head);
        Self { body }
    }

    /// Returns true if any segment occupies `coordinate`.
    #[must_use]
    pub fn occupies(&self, coordinate: Coordinate) -> bool {
        self.body
            .iter()
            .any(|segment| segment.coordinate() == coordinate)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body
            .iter()
            .skip(1)
            .any(|segment| segment.is_same_cell(head))
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Pixel> {
        self.body.iter()
    }

    /// Segment coordinates from head to tail.
    #[must_use]
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.body.iter().map(Pixel::coordinate).collect()
    }
}
