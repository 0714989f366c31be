//! The visible 5×3 symbol grid

use serde::{Deserialize, Serialize};

use crate::symbols::{ReelStrip, SymbolFace};

/// Reel (column) count
pub const REELS: usize = 5;
/// Visible rows per reel
pub const ROWS: usize = 3;
/// Total grid cells
pub const CELLS: usize = REELS * ROWS;

/// The visible grid, row-major: `cell = row * REELS + col`.
///
/// Cell indices 0–4 are the top row, 5–9 the middle row, 10–14 the bottom
/// row; paylines address cells by these indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [SymbolFace; CELLS],
}

impl Grid {
    /// Build from explicit row-major cells.
    pub fn from_cells(cells: [SymbolFace; CELLS]) -> Self {
        Self { cells }
    }

    /// Sample the grid from reel strips at the given stop offsets.
    ///
    /// Column `c`, row `r` reads `strips[c]` at `(offsets[c] + r) % len`.
    /// Deterministic given strips and offsets; all randomness lives in
    /// offset selection and strip generation.
    pub fn sample(strips: &[ReelStrip], offsets: &[usize; REELS]) -> Self {
        debug_assert!(strips.len() >= REELS);
        let mut cells = [SymbolFace::Cherry; CELLS];
        for (col, strip) in strips.iter().take(REELS).enumerate() {
            for row in 0..ROWS {
                cells[row * REELS + col] = strip.symbol_at(offsets[col] + row);
            }
        }
        Self { cells }
    }

    /// Face at a row-major cell index.
    pub fn cell(&self, index: usize) -> SymbolFace {
        self.cells[index]
    }

    /// Face at (row, col).
    pub fn at(&self, row: usize, col: usize) -> SymbolFace {
        self.cells[row * REELS + col]
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[SymbolFace; CELLS] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_of(faces: &[SymbolFace]) -> ReelStrip {
        ReelStrip {
            symbols: faces.to_vec(),
            reel_index: 0,
        }
    }

    #[test]
    fn test_sample_reads_window() {
        let strips: Vec<ReelStrip> = (0..REELS)
            .map(|_| {
                strip_of(&[
                    SymbolFace::Cherry,
                    SymbolFace::Lemon,
                    SymbolFace::Orange,
                    SymbolFace::Grape,
                ])
            })
            .collect();

        let grid = Grid::sample(&strips, &[1, 1, 1, 1, 1]);
        for col in 0..REELS {
            assert_eq!(grid.at(0, col), SymbolFace::Lemon);
            assert_eq!(grid.at(1, col), SymbolFace::Orange);
            assert_eq!(grid.at(2, col), SymbolFace::Grape);
        }
    }

    #[test]
    fn test_sample_wraps_at_strip_end() {
        let strips: Vec<ReelStrip> = (0..REELS)
            .map(|_| {
                strip_of(&[
                    SymbolFace::Cherry,
                    SymbolFace::Lemon,
                    SymbolFace::Orange,
                ])
            })
            .collect();

        // Offset 2 wraps rows 1 and 2 back to the strip head.
        let grid = Grid::sample(&strips, &[2, 2, 2, 2, 2]);
        assert_eq!(grid.at(0, 0), SymbolFace::Orange);
        assert_eq!(grid.at(1, 0), SymbolFace::Cherry);
        assert_eq!(grid.at(2, 0), SymbolFace::Lemon);
    }

    #[test]
    fn test_row_major_indexing() {
        let mut cells = [SymbolFace::Cherry; CELLS];
        cells[7] = SymbolFace::Seven; // middle row, col 2
        let grid = Grid::from_cells(cells);
        assert_eq!(grid.at(1, 2), SymbolFace::Seven);
        assert_eq!(grid.cell(7), SymbolFace::Seven);
    }
}
