//! Symbol definitions and reel strips

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The nine reel faces, ordered from most to least frequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SymbolFace {
    Cherry = 0,
    Lemon = 1,
    Orange = 2,
    Grape = 3,
    Bell = 4,
    Diamond = 5,
    Star = 6,
    Seven = 7,
    Jackpot = 8,
}

impl SymbolFace {
    /// All faces, in weight order.
    pub const ALL: [SymbolFace; 9] = [
        SymbolFace::Cherry,
        SymbolFace::Lemon,
        SymbolFace::Orange,
        SymbolFace::Grape,
        SymbolFace::Bell,
        SymbolFace::Diamond,
        SymbolFace::Star,
        SymbolFace::Seven,
        SymbolFace::Jackpot,
    ];

    /// Base sampling weight (higher = more frequent on the strips).
    pub fn weight(self) -> u32 {
        match self {
            SymbolFace::Cherry => 120,
            SymbolFace::Lemon => 100,
            SymbolFace::Orange => 90,
            SymbolFace::Grape => 80,
            SymbolFace::Bell => 60,
            SymbolFace::Diamond => 40,
            SymbolFace::Star => 25,
            SymbolFace::Seven => 15,
            SymbolFace::Jackpot => 5,
        }
    }

    /// Pay multipliers indexed by consecutive-match count (clamped to 4).
    ///
    /// Counts below 3 never pay, so the leading entries are zero.
    pub fn pay_table(self) -> [f64; 5] {
        match self {
            SymbolFace::Cherry => [0.0, 0.0, 5.0, 15.0, 50.0],
            SymbolFace::Lemon => [0.0, 0.0, 8.0, 20.0, 75.0],
            SymbolFace::Orange => [0.0, 0.0, 12.0, 30.0, 100.0],
            SymbolFace::Grape => [0.0, 0.0, 15.0, 40.0, 150.0],
            SymbolFace::Bell => [0.0, 0.0, 25.0, 75.0, 250.0],
            SymbolFace::Diamond => [0.0, 0.0, 50.0, 150.0, 500.0],
            SymbolFace::Star => [0.0, 0.0, 100.0, 300.0, 750.0],
            SymbolFace::Seven => [0.0, 0.0, 200.0, 750.0, 2000.0],
            SymbolFace::Jackpot => [0.0, 0.0, 1000.0, 5000.0, 10000.0],
        }
    }

    /// Pay multiplier for a given consecutive-match count.
    ///
    /// Returns 0 below 3 matches; counts above 5 clamp to the 5-of-a-kind entry.
    pub fn pay(self, match_count: u8) -> f64 {
        if match_count < 3 {
            return 0.0;
        }
        let idx = (match_count as usize).min(4);
        self.pay_table()[idx]
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            SymbolFace::Cherry => "Cherry",
            SymbolFace::Lemon => "Lemon",
            SymbolFace::Orange => "Orange",
            SymbolFace::Grape => "Grape",
            SymbolFace::Bell => "Bell",
            SymbolFace::Diamond => "Diamond",
            SymbolFace::Star => "Star",
            SymbolFace::Seven => "Lucky 7",
            SymbolFace::Jackpot => "Jackpot",
        }
    }
}

/// Per-reel sampling weights.
///
/// Reel 0 gets a 1.1× boost and reels 3–4 a 0.9× cut (floored), which skews
/// the first reel slightly toward win starts and the last reels away from
/// completing them.
pub fn reel_weights(reel_index: u8) -> [(SymbolFace, u32); 9] {
    let multiplier = match reel_index {
        0 => 1.1,
        3.. => 0.9,
        _ => 1.0,
    };
    SymbolFace::ALL.map(|face| (face, (face.weight() as f64 * multiplier).floor() as u32))
}

/// Sample `length` faces i.i.d., proportional to the given weights.
///
/// Panics if the total weight is zero; the built-in weight tables are always
/// positive, so this only fires on a malformed custom table.
pub fn sample_weighted(
    weights: &[(SymbolFace, u32)],
    length: usize,
    rng: &mut impl Rng,
) -> Vec<SymbolFace> {
    let total: u32 = weights.iter().map(|&(_, w)| w).sum();
    assert!(total > 0, "symbol weights must sum to a positive value");

    let mut symbols = Vec::with_capacity(length);
    for _ in 0..length {
        let mut roll = rng.random_range(0..total);
        for &(face, weight) in weights {
            if roll < weight {
                symbols.push(face);
                break;
            }
            roll -= weight;
        }
    }
    symbols
}

/// Break up runs of 4+ identical faces in a single forward pass.
///
/// Whenever a window of 4 equal faces is found, the 4th entry is replaced by
/// a uniformly random face from the complement set. The scan keeps moving
/// forward over replaced cells rather than iterating to a fixpoint; every
/// window is still checked against its final contents, so no 4-run survives
/// the pass.
pub fn smooth_runs(symbols: &mut [SymbolFace], rng: &mut impl Rng) {
    if symbols.len() < 4 {
        return;
    }
    for i in 0..symbols.len() - 3 {
        let face = symbols[i];
        if symbols[i + 1] == face && symbols[i + 2] == face && symbols[i + 3] == face {
            symbols[i + 3] = complement_face(face, rng);
        }
    }
}

fn complement_face(face: SymbolFace, rng: &mut impl Rng) -> SymbolFace {
    let others: Vec<SymbolFace> = SymbolFace::ALL
        .into_iter()
        .filter(|&f| f != face)
        .collect();
    others[rng.random_range(0..others.len())]
}

/// A circular reel strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelStrip {
    /// Faces in strip order
    pub symbols: Vec<SymbolFace>,
    /// Reel index this strip was generated for
    pub reel_index: u8,
}

impl ReelStrip {
    /// Generate a strip for a reel position: weighted sample, then run smoothing.
    pub fn generate(reel_index: u8, length: usize, rng: &mut impl Rng) -> Self {
        let weights = reel_weights(reel_index);
        let mut symbols = sample_weighted(&weights, length, rng);
        smooth_runs(&mut symbols, rng);
        Self {
            symbols,
            reel_index,
        }
    }

    /// Face at a stop position (wraps around)
    pub fn symbol_at(&self, position: usize) -> SymbolFace {
        self.symbols[position % self.symbols.len()]
    }

    /// All strip indices holding the given face.
    pub fn positions_of(&self, face: SymbolFace) -> Vec<usize> {
        self.symbols
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f == face)
            .map(|(i, _)| i)
            .collect()
    }

    /// Strip length
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pay_clamps_match_count() {
        let face = SymbolFace::Cherry;
        assert_eq!(face.pay(2), 0.0);
        assert_eq!(face.pay(3), 15.0);
        assert_eq!(face.pay(4), 50.0);
        assert_eq!(face.pay(5), 50.0); // 5-of-a-kind clamps to the last entry
    }

    #[test]
    fn test_no_pay_below_three() {
        for face in SymbolFace::ALL {
            assert_eq!(face.pay(0), 0.0);
            assert_eq!(face.pay(1), 0.0);
            assert_eq!(face.pay(2), 0.0);
        }
    }

    #[test]
    fn test_reel_weights_positive() {
        for reel in 0..5 {
            for (_, w) in reel_weights(reel) {
                assert!(w > 0);
            }
        }
    }

    #[test]
    fn test_first_reel_boosted() {
        let base: u32 = SymbolFace::ALL.iter().map(|f| f.weight()).sum();
        let boosted: u32 = reel_weights(0).iter().map(|&(_, w)| w).sum();
        let cut: u32 = reel_weights(4).iter().map(|&(_, w)| w).sum();
        assert!(boosted > base);
        assert!(cut < base);
    }

    #[test]
    fn test_strip_wraps() {
        let strip = ReelStrip {
            symbols: vec![SymbolFace::Cherry, SymbolFace::Lemon, SymbolFace::Star],
            reel_index: 0,
        };
        assert_eq!(strip.symbol_at(0), SymbolFace::Cherry);
        assert_eq!(strip.symbol_at(3), SymbolFace::Cherry);
        assert_eq!(strip.symbol_at(7), SymbolFace::Lemon);
    }

    #[test]
    fn test_smooth_runs_breaks_four() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut symbols = vec![SymbolFace::Seven; 8];
        smooth_runs(&mut symbols, &mut rng);
        for window in symbols.windows(4) {
            assert!(window.iter().any(|&f| f != window[0]));
        }
    }

    #[test]
    fn test_smooth_runs_keeps_three() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut symbols = vec![
            SymbolFace::Bell,
            SymbolFace::Bell,
            SymbolFace::Bell,
            SymbolFace::Cherry,
        ];
        let before = symbols.clone();
        smooth_runs(&mut symbols, &mut rng);
        assert_eq!(symbols, before);
    }

    #[test]
    fn test_generated_strip_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let strip = ReelStrip::generate(0, 128, &mut rng);
        assert_eq!(strip.len(), 128);
    }

    #[test]
    fn test_positions_of() {
        let strip = ReelStrip {
            symbols: vec![
                SymbolFace::Cherry,
                SymbolFace::Lemon,
                SymbolFace::Cherry,
                SymbolFace::Star,
            ],
            reel_index: 0,
        };
        assert_eq!(strip.positions_of(SymbolFace::Cherry), vec![0, 2]);
        assert!(strip.positions_of(SymbolFace::Jackpot).is_empty());
    }
}
