//! Spin results

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::paytable::{EvaluationResult, LineWin};
use crate::symbols::SymbolFace;

/// Win size classification, used by the presentation layer to pick
/// celebration intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinClass {
    /// No win
    None,
    /// Any win below 50× bet
    Small,
    /// 50× bet or more
    Big,
    /// A winning line on the jackpot face
    Jackpot,
}

/// Finalized outcome of one spin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinResult {
    /// Final grid
    pub grid: Grid,
    /// Bet amount
    pub bet: f64,
    /// Total win
    pub total_win: f64,
    /// Win-to-bet ratio
    pub win_ratio: f64,
    /// Deduplicated line wins, highest payout first
    pub line_wins: Vec<LineWin>,
    /// Near-miss flag (zero-payout spins only)
    pub near_miss: bool,
}

impl SpinResult {
    /// Create a result with no evaluation applied yet
    pub fn new(grid: Grid, bet: f64) -> Self {
        Self {
            grid,
            bet,
            total_win: 0.0,
            win_ratio: 0.0,
            line_wins: Vec::new(),
            near_miss: false,
        }
    }

    /// Apply an evaluation result
    pub fn with_evaluation(mut self, eval: EvaluationResult) -> Self {
        self.line_wins = eval.line_wins;
        self.total_win = eval.total_win;
        self.win_ratio = eval.win_ratio;
        self
    }

    /// Check if this is a win
    pub fn is_win(&self) -> bool {
        self.total_win > 0.0
    }

    /// Classify the win size
    pub fn win_class(&self) -> WinClass {
        if !self.is_win() {
            WinClass::None
        } else if self
            .line_wins
            .iter()
            .any(|w| w.symbol == SymbolFace::Jackpot)
        {
            WinClass::Jackpot
        } else if self.total_win >= self.bet * 50.0 {
            WinClass::Big
        } else {
            WinClass::Small
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CELLS;

    fn dummy_result(bet: f64, total_win: f64, symbol: SymbolFace) -> SpinResult {
        let mut result = SpinResult::new(Grid::from_cells([SymbolFace::Cherry; CELLS]), bet);
        if total_win > 0.0 {
            result.line_wins.push(LineWin {
                line_index: 0,
                symbol,
                match_count: 3,
                payout: total_win,
                positions: vec![0, 1, 2],
            });
        }
        result.total_win = total_win;
        result.win_ratio = if bet > 0.0 { total_win / bet } else { 0.0 };
        result
    }

    #[test]
    fn test_win_class_thresholds() {
        assert_eq!(
            dummy_result(1.0, 0.0, SymbolFace::Cherry).win_class(),
            WinClass::None
        );
        assert_eq!(
            dummy_result(1.0, 15.0, SymbolFace::Cherry).win_class(),
            WinClass::Small
        );
        assert_eq!(
            dummy_result(1.0, 50.0, SymbolFace::Cherry).win_class(),
            WinClass::Big
        );
        assert_eq!(
            dummy_result(1.0, 1000.0, SymbolFace::Jackpot).win_class(),
            WinClass::Jackpot
        );
    }
}
