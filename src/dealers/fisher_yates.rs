use crate::Algorithm;
use crate::Config;
use crate::Dealer;
use crate::Detail;
use crate::Distribution;
use crate::Identity;
use crate::Summary;
use crate::bits;
use crate::dealer::Deal;
use crate::dealer::live;
use crate::error::DealError;
use rand::RngCore;

/// Materialized cards with a cursor: `cards[..cursor]` are dealt,
/// `cards[cursor..]` are still in the deck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SwapDeck {
    cards: Vec<Identity>,
    cursor: usize,
}

impl From<Vec<Identity>> for SwapDeck {
    fn from(cards: Vec<Identity>) -> Self {
        Self { cards, cursor: 0 }
    }
}

impl SwapDeck {
    pub fn len(&self) -> usize {
        self.cards.len() - self.cursor
    }
    /// Swap a uniformly chosen undrawn card into the cursor slot and deal it.
    /// Exactly one sample per call. Requires `len() > 0`.
    pub fn draw(&mut self, deal: &mut Deal<'_>) -> Identity {
        let j = deal.sample(self.cursor, self.cards.len());
        self.cards.swap(self.cursor, j);
        let card = self.cards[self.cursor];
        self.cursor += 1;
        card
    }
    pub fn undrawn(&self) -> &[Identity] {
        &self.cards[self.cursor..]
    }
}

/// Knuth's swap-delete shuffle dealt one card at a time.
/// O(1) per draw over a full n-entry identity array.
#[derive(Default)]
pub struct FisherYatesDealer<'r> {
    deal: Option<Deal<'r>>,
    deck: SwapDeck,
}

impl<'r> Dealer<'r> for FisherYatesDealer<'r> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::FisherYates
    }

    fn initialize(
        &mut self,
        n: usize,
        rng: &'r mut dyn RngCore,
        _: Config,
    ) -> Result<(), DealError> {
        let deal = Deal::new(n, rng)?;
        log::debug!("fisher-yates dealer over {} cards", n);
        self.deck = SwapDeck::from((0..n).collect::<Vec<_>>());
        self.deal = Some(deal);
        Ok(())
    }

    fn draw(&mut self) -> Result<Identity, DealError> {
        let deal = self.deal.as_mut().ok_or(DealError::NotInitialized)?;
        deal.check()?;
        let card = self.deck.draw(deal);
        deal.advance();
        Ok(card)
    }

    fn remaining(&self) -> Result<usize, DealError> {
        live(&self.deal).map(Deal::remaining)
    }

    fn summarize(&self) -> Result<Summary, DealError> {
        let deal = live(&self.deal)?;
        let bits = deal.n() * bits::log2_ceil(deal.n());
        Ok(deal.summary(Algorithm::FisherYates, bits, Detail::FisherYates))
    }

    fn peek_distribution(&self) -> Result<Distribution, DealError> {
        live(&self.deal)?;
        Ok(Distribution::uniform(self.deck.undrawn().iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn swap_deck_deals_each_card_once() {
        let ref mut rng = SmallRng::seed_from_u64(11);
        let mut deal = Deal::new(5, rng).expect("n > 0");
        let mut deck = SwapDeck::from(vec![10, 20, 30, 40, 50]);
        let mut seen = (0..5).map(|_| deck.draw(&mut deal)).collect::<Vec<_>>();
        seen.sort();
        assert_eq!(seen, vec![10, 20, 30, 40, 50]);
        assert_eq!(deck.len(), 0);
        assert!(deck.undrawn().is_empty());
    }

    #[test]
    fn one_sample_per_draw() {
        let ref mut a = SmallRng::seed_from_u64(5);
        let ref mut b = SmallRng::seed_from_u64(5);
        let mut dealer = FisherYatesDealer::default();
        dealer.initialize(52, a, Config::default()).expect("init");
        let cards = dealer.drain().expect("drain");
        let mut deck = (0..52).collect::<Vec<_>>();
        let expected = (0..52)
            .map(|i| {
                let j = bits::uniform_int(b, i, 52);
                deck.swap(i, j);
                deck[i]
            })
            .collect::<Vec<_>>();
        assert_eq!(cards, expected);
    }

    #[test]
    fn distribution_tracks_undrawn_suffix() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        let mut dealer = FisherYatesDealer::default();
        dealer.initialize(4, rng, Config::default()).expect("init");
        let first = dealer.draw().expect("draw");
        let distribution = dealer.peek_distribution().expect("peek");
        assert_eq!(distribution.len(), 3);
        assert!(!distribution.contains(first));
        assert!(distribution.iter().all(|(_, p)| (p - 1. / 3.).abs() < 1e-12));
    }

    #[test]
    fn summary_counts_identity_array_bits() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        let mut dealer = FisherYatesDealer::default();
        dealer.initialize(52, rng, Config::default()).expect("init");
        assert_eq!(dealer.summarize().expect("summary").theoretical_bits_used, 52 * 6);
    }
}
