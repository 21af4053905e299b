/// Errors surfaced by dealer operations.
///
/// Every failing call leaves the dealer exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    /// an operation was attempted before the first `initialize`
    NotInitialized,
    /// `draw` was called with no cards left
    Exhausted { n: usize },
    /// the deck size or an algorithm parameter is out of range
    InvalidConfig(String),
    /// the factory was asked for a name it does not know
    UnknownAlgorithm(String),
}

impl std::fmt::Display for DealError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "dealer not initialized"),
            Self::Exhausted { n } => write!(f, "deck exhausted: all {} cards drawn", n),
            Self::InvalidConfig(s) => write!(f, "invalid config: {}", s),
            Self::UnknownAlgorithm(s) => write!(f, "unknown dealer: {}", s),
        }
    }
}

impl std::error::Error for DealError {}
