//! Paylines and win evaluation

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::symbols::SymbolFace;

/// Number of standard paylines
pub const PAYLINE_COUNT: usize = 25;

/// A payline: five row-major cell indices, scored left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Cell indices (0–14), one per reel
    pub cells: [u8; 5],
}

/// The 25 standard paylines for the 5×3 grid.
///
/// The set covers all shape families the paytable economics are tuned for:
/// horizontals, diagonals, V, W, zigzag, mountain/valley, diamond, X, star,
/// L and T shapes.
pub fn standard_paylines() -> [Payline; PAYLINE_COUNT] {
    const CELLS: [[u8; 5]; PAYLINE_COUNT] = [
        // Horizontals
        [0, 1, 2, 3, 4],
        [5, 6, 7, 8, 9],
        [10, 11, 12, 13, 14],
        // Diagonals
        [0, 6, 12, 8, 4],
        [10, 6, 2, 8, 14],
        // V shapes
        [0, 1, 7, 13, 14],
        [10, 11, 7, 3, 4],
        // W shapes
        [0, 6, 7, 8, 4],
        [10, 6, 7, 8, 14],
        // Zigzags
        [5, 1, 2, 3, 9],
        [5, 11, 12, 13, 9],
        [0, 1, 12, 3, 4],
        [10, 11, 2, 13, 14],
        // Mountain / valley
        [5, 6, 2, 8, 9],
        [5, 6, 12, 8, 9],
        // Diamonds
        [5, 1, 7, 3, 9],
        [5, 11, 7, 13, 9],
        // X patterns
        [0, 6, 2, 8, 14],
        [10, 6, 12, 8, 4],
        // Star patterns
        [0, 11, 7, 3, 14],
        [10, 1, 7, 13, 4],
        // L shapes
        [0, 1, 12, 13, 14],
        [10, 11, 2, 3, 4],
        // T shapes
        [5, 1, 12, 3, 9],
        [5, 11, 2, 13, 9],
    ];
    CELLS.map(|cells| Payline { cells })
}

/// A win on a single payline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineWin {
    /// Payline index (0-based)
    pub line_index: u8,
    /// Matched face
    pub symbol: SymbolFace,
    /// Consecutive matches from the leftmost cell
    pub match_count: u8,
    /// Win amount (pay multiplier × bet)
    pub payout: f64,
    /// Row-major cell indices of the matched symbols
    pub positions: Vec<u8>,
}

/// Count identical faces from the left before the first mismatch.
///
/// Strict prefix rule: `[A, A, B, A, A]` counts 2, never 4. There is no
/// wildcard substitution and no matching across gaps.
pub fn prefix_match_count(faces: &[SymbolFace; 5]) -> u8 {
    let first = faces[0];
    let mut count = 1u8;
    for &face in &faces[1..] {
        if face != first {
            break;
        }
        count += 1;
    }
    count
}

/// Result of evaluating a grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Deduplicated line wins, highest payout first
    pub line_wins: Vec<LineWin>,
    /// Total win amount
    pub total_win: f64,
    /// Win-to-bet ratio
    pub win_ratio: f64,
}

impl EvaluationResult {
    /// Check if this is a winning evaluation
    pub fn is_win(&self) -> bool {
        self.total_win > 0.0
    }
}

/// Payline set plus evaluation rules
#[derive(Debug, Clone)]
pub struct PayTable {
    /// Payline definitions
    pub paylines: Vec<Payline>,
}

impl PayTable {
    /// Standard 25-line paytable
    pub fn standard() -> Self {
        Self {
            paylines: standard_paylines().to_vec(),
        }
    }

    /// Evaluate all paylines against a grid.
    ///
    /// Qualifying lines (3+ consecutive from the left, non-zero pay value)
    /// are sorted by payout descending, then deduplicated: a line is dropped
    /// when an earlier (higher-paying) line already claimed the exact same
    /// set of matched cells. Lines with merely overlapping position sets are
    /// both kept.
    pub fn evaluate(&self, grid: &Grid, bet: f64) -> EvaluationResult {
        let mut wins: Vec<LineWin> = self
            .paylines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| self.evaluate_line(grid, line, idx as u8, bet))
            .collect();

        wins.sort_by(|a, b| {
            b.payout
                .partial_cmp(&a.payout)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut claimed: HashSet<Vec<u8>> = HashSet::new();
        wins.retain(|win| {
            let mut key = win.positions.clone();
            key.sort_unstable();
            claimed.insert(key)
        });

        let total_win: f64 = wins.iter().map(|w| w.payout).sum();
        EvaluationResult {
            line_wins: wins,
            total_win,
            win_ratio: if bet > 0.0 { total_win / bet } else { 0.0 },
        }
    }

    fn evaluate_line(
        &self,
        grid: &Grid,
        payline: &Payline,
        line_index: u8,
        bet: f64,
    ) -> Option<LineWin> {
        let faces = payline.cells.map(|c| grid.cell(c as usize));
        let match_count = prefix_match_count(&faces);
        if match_count < 3 {
            return None;
        }

        // Zero pay value means no win even at 3+ matches.
        let symbol = faces[0];
        let pay_value = symbol.pay(match_count);
        if pay_value <= 0.0 {
            return None;
        }

        Some(LineWin {
            line_index,
            symbol,
            match_count,
            payout: pay_value * bet,
            positions: payline.cells[..match_count as usize].to_vec(),
        })
    }
}

impl Default for PayTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Near-miss check over the three horizontal lines.
///
/// Fires when the first two cells of a horizontal match, the third breaks
/// the run, and the matched face pays at least 50× for 3-of-a-kind. UI
/// feedback only; never scored.
pub fn detect_near_miss(grid: &Grid) -> bool {
    const HORIZONTAL_STARTS: [usize; 3] = [0, 5, 10];
    for start in HORIZONTAL_STARTS {
        let a = grid.cell(start);
        let b = grid.cell(start + 1);
        let c = grid.cell(start + 2);
        if a == b && a != c && a.pay(3) >= 50.0 {
            return true;
        }
    }
    false
}
