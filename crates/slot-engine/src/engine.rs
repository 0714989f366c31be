//! Slot outcome engine — natural draws plus the outcome bias controller

use log::{debug, trace};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, EngineConfig};
use crate::grid::{Grid, REELS};
use crate::paytable::{EvaluationResult, PayTable, detect_near_miss};
use crate::spin::SpinResult;
use crate::symbols::{ReelStrip, SymbolFace};

/// Forced win/loss decision, bypassing the biased coin flip.
///
/// Goes through the same reconciliation machinery as a random spin, so a
/// forced outcome is still best-effort: the retry budget can exhaust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedOutcome {
    Win,
    Lose,
}

/// Session statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: f64,
    pub total_win: f64,
    pub wins: u64,
    pub losses: u64,
    pub near_misses: u64,
    pub max_win_ratio: f64,
}

impl SessionStats {
    /// Return-to-player percentage
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0.0 {
            (self.total_win / self.total_bet) * 100.0
        } else {
            0.0
        }
    }

    /// Percentage of spins that won something
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Low-tier faces the win promoter steers toward.
const PROMOTION_TARGETS: [SymbolFace; 3] =
    [SymbolFace::Cherry, SymbolFace::Lemon, SymbolFace::Orange];

/// Leading reels adjusted during win promotion.
const PROMOTION_REELS: usize = 3;

/// Slot Outcome Engine
///
/// Owns the reel strips, paytable and RNG. A spin samples a natural draw,
/// decides win/loss via a bet-parameterized coin flip, then nudges reel
/// offsets under a bounded retry budget until the decision is satisfied or
/// the natural draw is kept. The returned grid and payout always agree with
/// what [`PayTable::evaluate`] computes for that grid.
pub struct SlotEngine {
    /// Configuration
    config: EngineConfig,
    /// Payline set and evaluation rules
    paytable: PayTable,
    /// One strip per reel, frozen after construction
    reel_strips: Vec<ReelStrip>,
    /// Random number generator
    rng: StdRng,
    /// Session stats
    stats: SessionStats,
}

impl SlotEngine {
    /// Create with the default config and an OS-seeded RNG.
    pub fn new() -> Self {
        Self::build(EngineConfig::default(), StdRng::from_os_rng())
    }

    /// Create with the default config and a fixed seed.
    ///
    /// Strips are generated from the seeded RNG, so the whole spin sequence
    /// is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(EngineConfig::default(), StdRng::seed_from_u64(seed))
    }

    /// Create with a specific config.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, StdRng::from_os_rng()))
    }

    /// Create with a specific config and a fixed seed.
    pub fn with_config_seeded(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, StdRng::seed_from_u64(seed)))
    }

    fn build(config: EngineConfig, mut rng: StdRng) -> Self {
        let reel_strips = Self::generate_strips(&config, &mut rng);
        Self {
            config,
            paytable: PayTable::standard(),
            reel_strips,
            rng,
            stats: SessionStats::default(),
        }
    }

    fn generate_strips(config: &EngineConfig, rng: &mut StdRng) -> Vec<ReelStrip> {
        (0..REELS)
            .map(|reel| ReelStrip::generate(reel as u8, config.strip_length, rng))
            .collect()
    }

    /// Reseed the RNG and regenerate the strips from it.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.reel_strips = Self::generate_strips(&self.config, &mut self.rng);
    }

    /// Current config
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reel strips (read-only after construction)
    pub fn reel_strips(&self) -> &[ReelStrip] {
        &self.reel_strips
    }

    /// Paytable in use
    pub fn paytable(&self) -> &PayTable {
        &self.paytable
    }

    /// Session stats
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Reset session stats
    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Execute a spin at the given bet.
    pub fn spin(&mut self, bet: f64) -> SpinResult {
        let win_chance = self.config.win_chance(bet);
        let should_win = self.rng.random::<f64>() < win_chance;
        debug!("spin: bet={bet} win_chance={win_chance:.3} should_win={should_win}");
        self.spin_internal(bet, should_win)
    }

    /// Execute a spin with a forced win/loss decision.
    pub fn spin_forced(&mut self, bet: f64, outcome: ForcedOutcome) -> SpinResult {
        self.spin_internal(bet, matches!(outcome, ForcedOutcome::Win))
    }

    fn spin_internal(&mut self, bet: f64, should_win: bool) -> SpinResult {
        let mut offsets = self.random_offsets();
        let mut eval = self.evaluate_offsets(&offsets, bet);

        if !should_win && eval.is_win() {
            (offsets, eval) = self.suppress_win(offsets, eval, bet);
        } else if should_win && !eval.is_win() {
            (offsets, eval) = self.promote_win(offsets, eval, bet);
        }

        let grid = Grid::sample(&self.reel_strips, &offsets);
        let near_miss = !eval.is_win() && detect_near_miss(&grid);
        let mut result = SpinResult::new(grid, bet).with_evaluation(eval);
        result.near_miss = near_miss;

        self.update_stats(&result);
        result
    }

    fn random_offsets(&mut self) -> [usize; REELS] {
        std::array::from_fn(|reel| self.rng.random_range(0..self.reel_strips[reel].len()))
    }

    fn evaluate_offsets(&self, offsets: &[usize; REELS], bet: f64) -> EvaluationResult {
        let grid = Grid::sample(&self.reel_strips, offsets);
        self.paytable.evaluate(&grid, bet)
    }

    /// Suppress a natural win: resample one random reel's offset until the
    /// grid pays nothing. On budget exhaustion the original natural draw is
    /// kept, so the result stays internally consistent.
    fn suppress_win(
        &mut self,
        offsets: [usize; REELS],
        natural: EvaluationResult,
        bet: f64,
    ) -> ([usize; REELS], EvaluationResult) {
        let reel = self.rng.random_range(0..REELS);
        let mut adjusted = offsets;

        for attempt in 0..self.config.loss_retry_budget {
            adjusted[reel] = self.rng.random_range(0..self.reel_strips[reel].len());
            let eval = self.evaluate_offsets(&adjusted, bet);
            if !eval.is_win() {
                trace!("suppressed win via reel {reel} after {attempt} retries");
                return (adjusted, eval);
            }
        }

        debug!("loss retry budget exhausted, keeping natural win");
        (offsets, natural)
    }

    /// Promote a natural loss: steer the leading reels onto a random
    /// low-tier target face and accept the first paying configuration. Reels
    /// whose strip lacks the target are left unchanged. Offsets are the only
    /// thing manipulated; a win is never fabricated by injecting a payout.
    fn promote_win(
        &mut self,
        offsets: [usize; REELS],
        natural: EvaluationResult,
        bet: f64,
    ) -> ([usize; REELS], EvaluationResult) {
        let target = PROMOTION_TARGETS[self.rng.random_range(0..PROMOTION_TARGETS.len())];
        let mut adjusted = offsets;

        for attempt in 0..self.config.win_retry_budget {
            for reel in 0..PROMOTION_REELS {
                let candidates = self.reel_strips[reel].positions_of(target);
                if !candidates.is_empty() {
                    adjusted[reel] = candidates[self.rng.random_range(0..candidates.len())];
                }
            }
            let eval = self.evaluate_offsets(&adjusted, bet);
            if eval.is_win() {
                trace!("promoted win on {} after {attempt} retries", target.name());
                return (adjusted, eval);
            }
        }

        debug!("win retry budget exhausted, keeping natural loss");
        (offsets, natural)
    }

    fn update_stats(&mut self, result: &SpinResult) {
        self.stats.total_spins += 1;
        self.stats.total_bet += result.bet;
        self.stats.total_win += result.total_win;

        if result.is_win() {
            self.stats.wins += 1;
        } else {
            self.stats.losses += 1;
        }
        if result.near_miss {
            self.stats.near_misses += 1;
        }
        if result.win_ratio > self.stats.max_win_ratio {
            self.stats.max_win_ratio = result.win_ratio;
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Export config as JSON
    pub fn export_config(&self) -> String {
        serde_json::to_string_pretty(&self.config).unwrap_or_default()
    }

    /// Import config from JSON and regenerate the strips for it.
    pub fn import_config(&mut self, json: &str) -> Result<(), ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        self.config = config;
        self.reel_strips = Self::generate_strips(&self.config, &mut self.rng);
        Ok(())
    }
}

impl Default for SlotEngine {
    fn default() -> Self {
        Self::new()
    }
}
