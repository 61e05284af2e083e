//! Board module - settled cells of the shared grid
//!
//! The board is a 10x20 grid of occupancy markers stored as a flat array.
//! `0` is an empty cell; `n > 0` is a settled cell of the shape with catalog
//! index `n - 1` (used to recover the color at render time).
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! The board never holds the cells of an active piece: it is written only by
//! [`Board::settle`] and compacted only by [`Board::clear_full_rows`].

use arrayvec::ArrayVec;

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Row-major marker grid, as handed to renderers and snapshots.
pub type MarkerGrid = [[u8; WIDTH]; HEIGHT];

/// Row indices at which a clear happened, in the order they were cleared.
///
/// Every clear removes one full row, so there can never be more clears than rows.
pub type ClearedRows = ArrayVec<u8, HEIGHT>;

/// The settled grid - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of markers, row-major order (y * WIDTH + x)
    cells: [u8; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
        }
    }

    /// Build a board from explicit rows (row 0 is the top).
    ///
    /// Handy for setting up scenarios in tests and benchmarks.
    pub fn from_rows(rows: &MarkerGrid) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            board.cells[y * WIDTH..(y + 1) * WIDTH].copy_from_slice(row);
        }
        board
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= WIDTH as i32 || y < 0 || y >= HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> i32 {
        WIDTH as i32
    }

    pub fn height(&self) -> i32 {
        HEIGHT as i32
    }

    /// Marker at (x, y), or None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set the marker at (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, marker: u8) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = marker;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(0))
    }

    /// In bounds and settled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(m) if m != 0)
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).is_none()
    }

    /// Check if every column of a row is non-zero
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|&m| m != 0)
    }

    /// Clear a row and shift all rows above it down by one.
    /// Row 0 becomes empty.
    pub fn clear_row(&mut self, y: usize) {
        if y >= HEIGHT {
            return;
        }

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * WIDTH;
            self.cells
                .copy_within(src_start..src_start + WIDTH, row * WIDTH);
        }

        self.cells[..WIDTH].fill(0);
    }

    /// Clear every full row, bottom to top.
    ///
    /// After a row is cleared the rows above have shifted into it, so the same
    /// row index is examined again before the scan moves upward.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = HEIGHT;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                let pushed = cleared.try_push(row as u8);
                debug_assert!(pushed.is_ok(), "more clears than rows");
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Write piece cells (absolute coordinates) with the given marker.
    ///
    /// Cells outside the board are skipped. Returns how many cells landed on an
    /// already settled cell; callers check collisions first, so anything other
    /// than 0 means a caller bug.
    pub fn settle(&mut self, cells: &[(i32, i32)], marker: u8) -> usize {
        let mut overlapped = 0;
        for &(x, y) in cells {
            if let Some(idx) = Self::index(x, y) {
                if self.cells[idx] != 0 {
                    overlapped += 1;
                }
                self.cells[idx] = marker;
            }
        }
        overlapped
    }

    /// Copy the markers into a row-major grid.
    pub fn write_marker_grid(&self, out: &mut MarkerGrid) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * WIDTH..(y + 1) * WIDTH]);
        }
    }

    pub fn to_rows(&self) -> MarkerGrid {
        let mut rows = [[0u8; WIDTH]; HEIGHT];
        self.write_marker_grid(&mut rows);
        rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of settled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&m| m != 0).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
