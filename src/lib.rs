//! Dealers of random permutations under varying memory budgets.
//!
//! Every dealer implements [`Dealer`]: initialize it with a deck size, a
//! borrowed randomness source, and a [`Config`], then [`Dealer::draw`] until
//! the deck runs out. The exact next-draw distribution is available at any
//! point through [`Dealer::peek_distribution`], without touching state.
//!
//! ## Algorithms
//!
//! - [`BitmapDealer`]: rejection sampling against an availability bitmap
//! - [`FisherYatesDealer`]: swap-delete over a materialized identity array
//! - [`AdaptiveDealer`]: adaptive-threshold mini-decks, then swap-delete
//! - [`PerfectDealer`]: rank sampling over an ordered list of bitmask cells
//!
//! Pick one by name through [`Algorithm`], which also accepts aliases.
mod adversary;
mod bits;
mod config;
mod dealer;
mod dealers;
mod error;
mod registry;

pub use adversary::*;
pub use bits::*;
pub use config::*;
pub use dealer::*;
pub use dealers::*;
pub use error::*;
pub use registry::*;


// ============================================================================
// TYPE ALIASES
// ============================================================================
/// A member of the identity space `0..n`.
pub type Identity = usize;
/// Draw probabilities reported by distribution queries.
pub type Probability = f64;

// ============================================================================
// ADAPTIVE THRESHOLD PARAMETERS
// d = min(m_bits / MINIDECK_BITS, max(1, n / 2))
// ============================================================================
/// Bits of memory budget spent per mini-deck.
pub const MINIDECK_BITS: usize = 8;
/// Memory budget used when a caller does not pick one.
pub const DEFAULT_M_BITS: usize = 64;
/// The last RESERVE_FACTOR * d cards are dealt by swap-delete.
pub const RESERVE_FACTOR: usize = 2;

// ============================================================================
// DISTRIBUTION QUERIES
// ============================================================================
/// Allowed deviation of a reported distribution's total mass from 1.
pub const TOLERANCE: Probability = 1e-9;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}
