use crate::AdaptiveDealer;
use crate::BitmapDealer;
use crate::Dealer;
use crate::FisherYatesDealer;
use crate::PerfectDealer;
use crate::error::DealError;
use serde::Deserialize;
use serde::Serialize;

/// The four interchangeable dealing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Bitmap,
    FisherYates,
    Adaptive,
    Perfect,
}

/// Accepted names, canonical first.
const REGISTRY: &[(&str, Algorithm)] = &[
    ("bitmap", Algorithm::Bitmap),
    ("rejection", Algorithm::Bitmap),
    ("fisher_yates", Algorithm::FisherYates),
    ("fisher-yates", Algorithm::FisherYates),
    ("knuth", Algorithm::FisherYates),
    ("swap_delete", Algorithm::FisherYates),
    ("adaptive", Algorithm::Adaptive),
    ("adaptive_threshold", Algorithm::Adaptive),
    ("threshold", Algorithm::Adaptive),
    ("perfect", Algorithm::Perfect),
    ("cells", Algorithm::Perfect),
];

impl Algorithm {
    pub const fn all() -> [Self; 4] {
        [Self::Bitmap, Self::FisherYates, Self::Adaptive, Self::Perfect]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bitmap => "bitmap",
            Self::FisherYates => "fisher_yates",
            Self::Adaptive => "adaptive",
            Self::Perfect => "perfect",
        }
    }

    /// Every name that resolves to this algorithm.
    pub fn aliases(&self) -> impl Iterator<Item = &'static str> + '_ {
        REGISTRY
            .iter()
            .filter(move |(_, algorithm)| algorithm == self)
            .map(|(name, _)| *name)
    }

    /// A fresh, uninitialized dealer running this algorithm.
    pub fn dealer<'r>(&self) -> Box<dyn Dealer<'r> + 'r> {
        match self {
            Self::Bitmap => Box::new(BitmapDealer::default()),
            Self::FisherYates => Box::new(FisherYatesDealer::default()),
            Self::Adaptive => Box::new(AdaptiveDealer::default()),
            Self::Perfect => Box::new(PerfectDealer::default()),
        }
    }
}

/// Resolve a name or alias to a fresh dealer.
pub fn dealer<'r>(name: &str) -> Result<Box<dyn Dealer<'r> + 'r>, DealError> {
    Algorithm::try_from(name).map(|algorithm| algorithm.dealer())
}

impl TryFrom<&str> for Algorithm {
    type Error = DealError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let key = s.trim().to_lowercase();
        REGISTRY
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, algorithm)| *algorithm)
            .ok_or_else(|| DealError::UnknownAlgorithm(s.to_string()))
    }
}

impl std::str::FromStr for Algorithm {
    type Err = DealError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
