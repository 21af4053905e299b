use crate::DEFAULT_M_BITS;
use crate::MINIDECK_BITS;
use crate::error::DealError;
use serde::Deserialize;
use serde::Serialize;

/// How the adaptive dealer prices its own state when summarizing.
///
/// This is accounting only. Draw order, output, and rng consumption are the
/// same under either encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// one ⌈log2 n⌉-bit counter per mini-deck
    #[default]
    Naive,
    /// Elias-gamma coded distances from each counter to the threshold
    HolesElias,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Naive => write!(f, "naive"),
            Self::HolesElias => write!(f, "holes_elias"),
        }
    }
}

impl TryFrom<&str> for Encoding {
    type Error = DealError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim() {
            "naive" => Ok(Self::Naive),
            "holes_elias" | "holes_elias_doc" | "elias" => Ok(Self::HolesElias),
            other => Err(DealError::InvalidConfig(format!("encoding {:?}", other))),
        }
    }
}

/// Algorithm-specific options handed to `initialize`.
///
/// Dealers ignore the fields that do not apply to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// memory budget in bits for the adaptive dealer
    pub m_bits: usize,
    /// bit-cost model reported by the adaptive dealer
    pub encoding: Encoding,
    /// positions per cell for the perfect dealer, ⌈log2 n⌉ when unset
    pub cell_width: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            m_bits: DEFAULT_M_BITS,
            encoding: Encoding::default(),
            cell_width: None,
        }
    }
}

impl Config {
    pub fn with_m_bits(self, m_bits: usize) -> Self {
        Self { m_bits, ..self }
    }
    pub fn with_encoding(self, encoding: Encoding) -> Self {
        Self { encoding, ..self }
    }
    pub fn with_cell_width(self, width: usize) -> Self {
        Self {
            cell_width: Some(width),
            ..self
        }
    }

    /// Number of mini-decks the adaptive dealer forms over `n` cards.
    /// One mini-deck per MINIDECK_BITS of budget, at most n / 2 of them.
    pub fn minidecks(&self, n: usize) -> Result<usize, DealError> {
        match self.m_bits / MINIDECK_BITS {
            0 => Err(DealError::InvalidConfig(format!(
                "m_bits = {} cannot fund a single mini-deck ({} bits each)",
                self.m_bits, MINIDECK_BITS
            ))),
            d => Ok(d.min((n / 2).max(1))),
        }
    }

    /// Positions per cell the perfect dealer uses for `n` cards.
    pub fn cell_width(&self, n: usize) -> Result<usize, DealError> {
        match self.cell_width {
            Some(0) => Err(DealError::InvalidConfig("cell_width must be positive".into())),
            Some(w) => Ok(w),
            None => Ok(crate::log2_ceil(n)),
        }
    }
}
