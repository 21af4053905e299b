use crate::Algorithm;
use crate::Config;
use crate::Encoding;
use crate::Identity;
use crate::Probability;
use crate::bits::uniform_int;
use crate::error::DealError;
use rand::RngCore;
use serde::Serialize;
use std::collections::BTreeMap;

/// Lifecycle of a dealer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Uninitialized,
    Ready,
    Exhausted,
}

/// The contract every permutation dealer implements.
///
/// A dealer borrows its randomness source for as long as it is dealing, so
/// the caller fully controls determinism: equal algorithm, size, config and
/// source state yield the same draw sequence. `initialize` replaces all
/// previous state wholesale. Failed calls never mutate.
pub trait Dealer<'r> {
    fn algorithm(&self) -> Algorithm;
    /// Start a fresh permutation of `0..n`.
    fn initialize(
        &mut self,
        n: usize,
        rng: &'r mut dyn RngCore,
        config: Config,
    ) -> Result<(), DealError>;
    /// Deal the next identity.
    fn draw(&mut self) -> Result<Identity, DealError>;
    /// Cards left to deal, `n − drawn`.
    fn remaining(&self) -> Result<usize, DealError>;
    /// Counters and memory accounting for the current deal.
    fn summarize(&self) -> Result<Summary, DealError>;
    /// Exact probability of each undrawn identity being dealt next.
    fn peek_distribution(&self) -> Result<Distribution, DealError>;

    fn status(&self) -> Status {
        match self.remaining() {
            Err(_) => Status::Uninitialized,
            Ok(0) => Status::Exhausted,
            Ok(_) => Status::Ready,
        }
    }

    /// Deal every remaining card in order.
    fn drain(&mut self) -> Result<Vec<Identity>, DealError> {
        let mut cards = Vec::with_capacity(self.remaining()?);
        while self.remaining()? > 0 {
            cards.push(self.draw()?);
        }
        Ok(cards)
    }
}

/// Per-initialize bookkeeping shared by every dealer:
/// deck size, cards dealt so far, and the borrowed randomness source.
pub(crate) struct Deal<'r> {
    n: usize,
    drawn: usize,
    rng: &'r mut dyn RngCore,
}

impl<'r> Deal<'r> {
    pub fn new(n: usize, rng: &'r mut dyn RngCore) -> Result<Self, DealError> {
        match n {
            0 => Err(DealError::InvalidConfig("n must be positive".into())),
            n => Ok(Self { n, drawn: 0, rng }),
        }
    }
    pub fn n(&self) -> usize {
        self.n
    }
    pub fn drawn(&self) -> usize {
        self.drawn
    }
    pub fn remaining(&self) -> usize {
        self.n - self.drawn
    }
    /// Fails with Exhausted once every card is out.
    pub fn check(&self) -> Result<(), DealError> {
        match self.remaining() {
            0 => Err(DealError::Exhausted { n: self.n }),
            _ => Ok(()),
        }
    }
    /// One unbiased sample from `lo..hi` off the borrowed source.
    pub fn sample(&mut self, lo: usize, hi: usize) -> usize {
        uniform_int(&mut *self.rng, lo, hi)
    }
    pub fn advance(&mut self) {
        self.drawn += 1;
    }
    pub fn summary(&self, algorithm: Algorithm, bits: usize, detail: Detail) -> Summary {
        Summary {
            algorithm,
            n: self.n,
            drawn: self.drawn,
            remaining: self.remaining(),
            theoretical_bits_used: bits,
            detail,
        }
    }
}

/// Borrow the live deal or fail with NotInitialized.
pub(crate) fn live<'a, 'r>(deal: &'a Option<Deal<'r>>) -> Result<&'a Deal<'r>, DealError> {
    deal.as_ref().ok_or(DealError::NotInitialized)
}

/// State report produced by [`Dealer::summarize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub algorithm: Algorithm,
    pub n: usize,
    pub drawn: usize,
    pub remaining: usize,
    pub theoretical_bits_used: usize,
    pub detail: Detail,
}

/// Which half of the adaptive algorithm is dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Threshold,
    SwapDelete,
}

/// Algorithm-specific part of a [`Summary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Detail {
    Bitmap,
    FisherYates,
    Adaptive {
        phase: Phase,
        m_bits: usize,
        encoding: Encoding,
        /// threshold that applies to the next draw
        threshold: usize,
        /// undrawn cards per mini-deck
        minidecks: Vec<usize>,
        /// cards waiting in the swap-delete buffer
        buffered: usize,
        naive_bits: usize,
        elias_bits: usize,
    },
    Perfect {
        cell_width: usize,
        cells: usize,
        live_cells: usize,
    },
}

/// Next-draw probabilities keyed by undrawn identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution(BTreeMap<Identity, Probability>);

impl Distribution {
    /// Equal mass on every given identity.
    pub fn uniform<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = Identity>,
    {
        let ids = ids.into_iter().collect::<Vec<_>>();
        let p = 1. / ids.len() as Probability;
        Self(ids.into_iter().map(|id| (id, p)).collect())
    }
    /// Equal mass on `support`, zero on every other member of `keys`.
    /// `support` must be a nonempty subset of `keys`.
    pub fn concentrated<I, J>(keys: I, support: J) -> Self
    where
        I: IntoIterator<Item = Identity>,
        J: IntoIterator<Item = Identity>,
    {
        let mut map = keys
            .into_iter()
            .map(|id| (id, 0.))
            .collect::<BTreeMap<Identity, Probability>>();
        let support = support.into_iter().collect::<Vec<_>>();
        let p = 1. / support.len() as Probability;
        for id in support {
            map.insert(id, p);
        }
        Self(map)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, id: Identity) -> Probability {
        self.0.get(&id).copied().unwrap_or_default()
    }
    /// Whether `id` is undrawn, regardless of its mass.
    pub fn contains(&self, id: Identity) -> bool {
        self.0.contains_key(&id)
    }
    pub fn total(&self) -> Probability {
        self.0.values().sum()
    }
    /// Every undrawn identity, ascending.
    pub fn keys(&self) -> impl Iterator<Item = Identity> + '_ {
        self.0.keys().copied()
    }
    /// Identities with nonzero mass, ascending.
    pub fn support(&self) -> impl Iterator<Item = Identity> + '_ {
        self.iter().filter(|&(_, p)| p > 0.).map(|(id, _)| id)
    }
    pub fn iter(&self) -> impl Iterator<Item = (Identity, Probability)> + '_ {
        self.0.iter().map(|(&id, &p)| (id, p))
    }
    /// Total mass per `identity mod types` bucket.
    pub fn marginal(&self, types: usize) -> BTreeMap<Identity, Probability> {
        self.iter().fold(BTreeMap::new(), |mut acc, (id, p)| {
            *acc.entry(id % types).or_default() += p;
            acc
        })
    }
}

impl From<Distribution> for BTreeMap<Identity, Probability> {
    fn from(distribution: Distribution) -> Self {
        distribution.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn deal_rejects_empty_deck() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(Deal::new(0, rng), Err(DealError::InvalidConfig(_))));
    }

    #[test]
    fn deal_counts_down() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut deal = Deal::new(2, rng).expect("n > 0");
        assert_eq!(deal.check(), Ok(()));
        deal.advance();
        deal.advance();
        assert_eq!(deal.remaining(), 0);
        assert_eq!(deal.check(), Err(DealError::Exhausted { n: 2 }));
    }

    #[test]
    fn uniform_distribution_sums_to_one() {
        let distribution = Distribution::uniform(0..7);
        assert_eq!(distribution.len(), 7);
        assert!((distribution.total() - 1.).abs() < crate::TOLERANCE);
        assert_eq!(distribution.get(7), 0.);
    }

    #[test]
    fn concentrated_keeps_zero_mass_keys() {
        let distribution = Distribution::concentrated(0..6, [0, 3]);
        assert_eq!(distribution.len(), 6);
        assert_eq!(distribution.keys().collect::<Vec<_>>(), (0..6).collect::<Vec<_>>());
        assert_eq!(distribution.support().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(distribution.get(3), 0.5);
        assert_eq!(distribution.get(4), 0.);
        assert!(distribution.contains(4));
        assert!((distribution.total() - 1.).abs() < crate::TOLERANCE);
    }

    #[test]
    fn marginal_folds_types() {
        let distribution = Distribution::uniform([1, 53, 2, 104]);
        let marginal = distribution.marginal(52);
        assert_eq!(marginal[&1], 0.5);
        assert_eq!(marginal[&2], 0.25);
        assert_eq!(marginal[&0], 0.25);
    }
}
