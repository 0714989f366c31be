//! # slot-engine — Slot Outcome Engine
//!
//! Library-level slot machine outcome computation for the game front end:
//! weighted reel strips, a 25-line paytable over a 5×3 grid, and an outcome
//! bias controller that nudges natural draws toward a target hit-rate band.
//!
//! ## Guarantees
//!
//! - **Consistency**: the returned payout always equals what the evaluator
//!   computes for the returned grid. Outcomes are steered by manipulating
//!   reel offsets only, never by overwriting payout numbers.
//! - **Bounded work**: a spin is a short, synchronous, CPU-only computation;
//!   every biasing loop has a hard attempt budget with a defined fallback.
//! - **Reproducibility**: engines can be seeded, making spin sequences and
//!   strip generation deterministic for tests and simulations.
//!
//! Not a certified RNG and not server-authoritative; this is a
//! presentation-tier simulation.
//!
//! ## Architecture
//!
//! ```text
//! SlotEngine
//!     │
//!     ├── EngineConfig   (strip length, win chance band, retry budgets)
//!     ├── ReelStrip × 5  (weighted sample + run smoothing, frozen)
//!     └── PayTable       (25 paylines, prefix-match rule, overlap dedup)
//!           │
//!           v
//!     spin(bet) → SpinResult (grid, line wins, total payout, near miss)
//! ```

pub mod config;
pub mod engine;
pub mod grid;
pub mod paytable;
pub mod spin;
pub mod symbols;

pub use config::*;
pub use engine::*;
pub use grid::*;
pub use paytable::*;
pub use spin::*;
pub use symbols::*;
