//! Data structures shared by the placement and routing phases.

use super::canvas::{ARROW_LEFT, ARROW_RIGHT};

/// Placed box on the canvas. Corners are inclusive cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Rect {
    /// Rectangle of a `width` x `height` box whose top-left cell is `(x, y)`.
    pub fn from_origin(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width.max(1) - 1,
            bottom: y + height.max(1) - 1,
        }
    }

    pub fn mid_y(&self) -> usize {
        (self.top + self.bottom) / 2
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }

    /// True for cells strictly inside the border.
    pub fn contains_interior(&self, x: usize, y: usize) -> bool {
        x > self.left && x < self.right && y > self.top && y < self.bottom
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

/// Slot in the fixed-column grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Right,
    Left,
}

impl Arrow {
    pub fn glyph(self) -> char {
        match self {
            Arrow::Right => ARROW_RIGHT,
            Arrow::Left => ARROW_LEFT,
        }
    }
}

/// One routed foreign key, as drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedEdge {
    pub from: String,
    pub to: String,
    /// Cell right outside the source box where the line starts
    pub exit: (isize, isize),
    /// Cell right outside the destination box holding the arrowhead
    pub entry: (isize, isize),
    pub arrow: Arrow,
}
