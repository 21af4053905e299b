use super::fisher_yates::SwapDeck;
use crate::Algorithm;
use crate::Config;
use crate::Dealer;
use crate::Detail;
use crate::Distribution;
use crate::Encoding;
use crate::Identity;
use crate::Phase;
use crate::RESERVE_FACTOR;
use crate::Summary;
use crate::bits;
use crate::dealer::Deal;
use crate::dealer::live;
use crate::error::DealError;
use rand::RngCore;

/// The identity space cut into d contiguous mini-decks, each dealt strictly
/// top to bottom. `ell[i]` counts cards already dealt from mini-deck i, so
/// its exposed top card is `starts[i] + ell[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Minidecks {
    starts: Vec<usize>,
    sizes: Vec<usize>,
    ell: Vec<usize>,
}

impl Minidecks {
    /// Sizes differ by at most one; the first `n mod d` are the larger ones.
    fn partition(n: usize, d: usize) -> Self {
        let base = n / d;
        let extra = n % d;
        let sizes = (0..d)
            .map(|i| base + usize::from(i < extra))
            .collect::<Vec<_>>();
        let starts = sizes
            .iter()
            .scan(0, |offset, size| {
                let start = *offset;
                *offset += size;
                Some(start)
            })
            .collect::<Vec<_>>();
        Self {
            starts,
            sizes,
            ell: vec![0; d],
        }
    }

    fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Threshold in force for the `step`-th draw (1-based): ⌈step / d⌉ + 1.
    fn threshold(&self, step: usize) -> usize {
        step.div_ceil(self.len()) + 1
    }

    /// Mini-decks below the threshold with cards left, in index order.
    fn active(&self, threshold: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |&i| self.ell[i] < threshold && self.ell[i] < self.sizes[i])
    }

    fn top(&self, i: usize) -> Identity {
        self.starts[i] + self.ell[i]
    }

    /// Threshold and active count for the `step`-th draw,
    /// or None once the threshold phase has nothing safe left to offer.
    fn open(&self, step: usize, horizon: usize) -> Option<(usize, usize)> {
        if step > horizon {
            return None;
        }
        let threshold = self.threshold(step);
        match self.active(threshold).count() {
            0 => None,
            count => Some((threshold, count)),
        }
    }

    /// Deal the top card of a uniformly chosen active mini-deck.
    /// One sample, or None without sampling if the phase is over.
    fn choose(&mut self, deal: &mut Deal<'_>, horizon: usize) -> Option<Identity> {
        let (threshold, count) = self.open(deal.drawn() + 1, horizon)?;
        let k = deal.sample(0, count);
        let i = self.active(threshold).nth(k)?;
        let card = self.top(i);
        self.ell[i] += 1;
        Some(card)
    }

    /// Every undrawn card, mini-deck by mini-deck, top to bottom.
    fn leftover(&self) -> impl Iterator<Item = Identity> + '_ {
        (0..self.len()).flat_map(move |i| self.top(i)..self.starts[i] + self.sizes[i])
    }

    fn flatten(&self) -> SwapDeck {
        SwapDeck::from(self.leftover().collect::<Vec<_>>())
    }

    /// Index of the mini-deck that owns `card`.
    fn owner(&self, card: Identity) -> usize {
        self.starts.partition_point(|&start| start <= card) - 1
    }

    /// Undrawn cards per mini-deck while the threshold phase deals.
    fn counts(&self) -> Vec<usize> {
        self.sizes
            .iter()
            .zip(self.ell.iter())
            .map(|(size, ell)| size - ell)
            .collect()
    }

    /// Bit cost of the counters alone under an encoding. Pure accounting.
    fn cost(&self, encoding: Encoding, n: usize, threshold: usize) -> usize {
        match encoding {
            Encoding::Naive => self.len() * bits::log2_ceil(n),
            Encoding::HolesElias => {
                self.ell
                    .iter()
                    .zip(self.sizes.iter())
                    .filter(|(ell, size)| ell < size)
                    .map(|(ell, _)| bits::elias_gamma(threshold.saturating_sub(*ell)))
                    .sum::<usize>()
                    + 2 * self.len()
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Stage {
    #[default]
    Threshold,
    SwapDelete(SwapDeck),
}

/// Sublinear-memory dealer in two phases.
///
/// Phase one deals the exposed top card of a uniformly chosen active mini-deck,
/// where a mini-deck is active while its dealt count sits below an adaptive
/// threshold. This is deliberately not uniform over the remaining cards. The
/// last `RESERVE_FACTOR * d` cards (or everything left, should no mini-deck be
/// active) are flattened into a swap-delete buffer and dealt exactly uniformly.
#[derive(Default)]
pub struct AdaptiveDealer<'r> {
    deal: Option<Deal<'r>>,
    config: Config,
    minidecks: Minidecks,
    horizon: usize,
    stage: Stage,
}

impl<'r> AdaptiveDealer<'r> {
    fn phase(&self) -> Phase {
        match self.stage {
            Stage::Threshold => Phase::Threshold,
            Stage::SwapDelete(_) => Phase::SwapDelete,
        }
    }
}

impl<'r> Dealer<'r> for AdaptiveDealer<'r> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Adaptive
    }

    fn initialize(
        &mut self,
        n: usize,
        rng: &'r mut dyn RngCore,
        config: Config,
    ) -> Result<(), DealError> {
        let d = config.minidecks(n)?;
        let deal = Deal::new(n, rng)?;
        self.minidecks = Minidecks::partition(n, d);
        self.horizon = n.saturating_sub(RESERVE_FACTOR * d);
        self.stage = Stage::Threshold;
        self.config = config;
        self.deal = Some(deal);
        log::debug!(
            "adaptive dealer over {} cards: {} mini-decks from {} bits, threshold phase for {} draws",
            n,
            d,
            config.m_bits,
            self.horizon
        );
        Ok(())
    }

    fn draw(&mut self) -> Result<Identity, DealError> {
        let deal = self.deal.as_mut().ok_or(DealError::NotInitialized)?;
        deal.check()?;
        let card = match &mut self.stage {
            Stage::SwapDelete(buffer) => buffer.draw(deal),
            Stage::Threshold => match self.minidecks.choose(deal, self.horizon) {
                Some(card) => card,
                None => {
                    let mut buffer = self.minidecks.flatten();
                    log::debug!(
                        "adaptive dealer entering swap-delete with {} cards after {} draws",
                        buffer.len(),
                        deal.drawn()
                    );
                    let card = buffer.draw(deal);
                    self.stage = Stage::SwapDelete(buffer);
                    card
                }
            },
        };
        deal.advance();
        Ok(card)
    }

    fn remaining(&self) -> Result<usize, DealError> {
        live(&self.deal).map(Deal::remaining)
    }

    fn summarize(&self) -> Result<Summary, DealError> {
        let deal = live(&self.deal)?;
        let threshold = self.minidecks.threshold(deal.drawn() + 1);
        let (buffered, minidecks) = match &self.stage {
            Stage::Threshold => (0, self.minidecks.counts()),
            Stage::SwapDelete(buffer) => (
                buffer.len(),
                buffer.undrawn().iter().fold(
                    vec![0; self.minidecks.len()],
                    |mut counts, &card| {
                        counts[self.minidecks.owner(card)] += 1;
                        counts
                    },
                ),
            ),
        };
        let buffer_bits = buffered * bits::log2_ceil(deal.n());
        let naive_bits = buffer_bits + self.minidecks.cost(Encoding::Naive, deal.n(), threshold);
        let elias_bits =
            buffer_bits + self.minidecks.cost(Encoding::HolesElias, deal.n(), threshold);
        let bits = match self.config.encoding {
            Encoding::Naive => naive_bits,
            Encoding::HolesElias => elias_bits,
        };
        let detail = Detail::Adaptive {
            phase: self.phase(),
            m_bits: self.config.m_bits,
            encoding: self.config.encoding,
            threshold,
            minidecks,
            buffered,
            naive_bits,
            elias_bits,
        };
        Ok(deal.summary(Algorithm::Adaptive, bits, detail))
    }

    fn peek_distribution(&self) -> Result<Distribution, DealError> {
        let deal = live(&self.deal)?;
        if deal.remaining() == 0 {
            return Ok(Distribution::default());
        }
        match &self.stage {
            Stage::SwapDelete(buffer) => Ok(Distribution::uniform(buffer.undrawn().iter().copied())),
            Stage::Threshold => match self.minidecks.open(deal.drawn() + 1, self.horizon) {
                Some((threshold, _)) => Ok(Distribution::concentrated(
                    self.minidecks.leftover(),
                    self.minidecks
                        .active(threshold)
                        .map(|i| self.minidecks.top(i)),
                )),
                None => Ok(Distribution::uniform(self.minidecks.leftover())),
            },
        }
    }
}
