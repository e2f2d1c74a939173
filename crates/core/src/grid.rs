//! Grid module - the square playfield of colored cells
//!
//! The grid is `size x size` cells stored as a flat row-major vector
//! (`y * size + x`). Every cell always holds a valid color index: the grid is
//! filled completely on creation and cells are only ever replaced, never
//! emptied.
//!
//! All lookups go through `Grid::index`, which bounds-checks and returns
//! `None` for off-grid positions, so malformed positions can never index out
//! of range.

use crate::rng::SimpleRng;
use crate::types::{GridPosition, Square};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    /// Flat array of cells, row-major order (y * size + x)
    cells: Vec<Square>,
}

impl Grid {
    /// Create a grid with every cell drawn uniformly from `[0, number_of_colors)`
    pub fn new(size: usize, number_of_colors: usize, rng: &mut SimpleRng) -> Self {
        let cells = (0..size * size)
            .map(|_| Square::new(rng.next_color(number_of_colors)))
            .collect();
        Self { size, cells }
    }

    /// Build a grid from explicit color rows (`rows[y][x]`)
    ///
    /// Returns `None` unless `rows` is square and non-empty.
    pub fn from_colors(rows: &[Vec<u8>]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return None;
        }
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&c| Square::new(c)))
            .collect();
        Some(Self { size, cells })
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: GridPosition) -> Option<usize> {
        if !self.is_valid(pos) {
            return None;
        }
        Some(pos.y as usize * self.size + pos.x as usize)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Check if position lies inside `[0, size)^2`
    pub fn is_valid(&self, pos: GridPosition) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    /// Get the square at `pos`, `None` if out of bounds
    pub fn get(&self, pos: GridPosition) -> Option<Square> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    pub fn color_index(&self, pos: GridPosition) -> Option<u8> {
        self.get(pos).map(|square| square.color_index)
    }

    /// Replace the square at `pos`
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: GridPosition, square: Square) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = square;
                true
            }
            None => false,
        }
    }

    /// Redraw every cell
    pub fn fill_random(&mut self, number_of_colors: usize, rng: &mut SimpleRng) {
        for cell in &mut self.cells {
            *cell = Square::new(rng.next_color(number_of_colors));
        }
    }

    /// Redraw the given cells, skipping any that are off-grid
    pub fn refill(&mut self, positions: &[GridPosition], number_of_colors: usize, rng: &mut SimpleRng) {
        for &pos in positions {
            if let Some(idx) = self.index(pos) {
                self.cells[idx] = Square::new(rng.next_color(number_of_colors));
            }
        }
    }

    /// True iff exactly four corners were given, all on the grid, all the same color
    pub fn corners_match(&self, corners: &[GridPosition]) -> bool {
        if corners.len() != 4 {
            return false;
        }

        let mut colors = corners.iter().map(|&pos| self.color_index(pos));
        let Some(Some(first)) = colors.next() else {
            return false;
        };
        colors.all(|color| color == Some(first))
    }

    /// Whether the rectangle spanned by `from`/`to` would clear
    pub fn is_match(&self, from: GridPosition, to: GridPosition) -> bool {
        self.corners_match(&GridPosition::corners(from, to))
    }

    /// All rectangles of at least two cells whose corners share a color
    ///
    /// Each rectangle is reported once as (top-left, bottom-right).
    pub fn matching_rectangles(&self) -> Vec<(GridPosition, GridPosition)> {
        let n = self.size as i32;
        let mut found = Vec::new();
        for y0 in 0..n {
            for x0 in 0..n {
                for y1 in y0..n {
                    for x1 in x0..n {
                        if x0 == x1 && y0 == y1 {
                            continue;
                        }
                        let from = GridPosition::new(x0, y0);
                        let to = GridPosition::new(x1, y1);
                        if self.is_match(from, to) {
                            found.push((from, to));
                        }
                    }
                }
            }
        }
        found
    }

    /// The first matching rectangle in scan order, if any
    pub fn find_match(&self) -> Option<(GridPosition, GridPosition)> {
        let n = self.size as i32;
        for y0 in 0..n {
            for x0 in 0..n {
                for y1 in y0..n {
                    for x1 in x0..n {
                        if x0 == x1 && y0 == y1 {
                            continue;
                        }
                        let from = GridPosition::new(x0, y0);
                        let to = GridPosition::new(x1, y1);
                        if self.is_match(from, to) {
                            return Some((from, to));
                        }
                    }
                }
            }
        }
        None
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Square] {
        &self.cells
    }

    /// Color indices as rows (`rows[y][x]`)
    pub fn color_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|square| square.color_index).collect())
            .collect()
    }
}
