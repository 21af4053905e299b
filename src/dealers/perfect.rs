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

/// Positions `start..end` with one availability bit each (1 = undrawn)
/// and a cached count of the set bits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    start: usize,
    end: usize,
    bits: Vec<u64>,
    count: usize,
}

impl Cell {
    fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            bits: bits::filled(end - start),
            count: end - start,
        }
    }

    /// Clear and return the `rank`-th undrawn position. Requires `rank < count`.
    fn take(&mut self, rank: usize) -> usize {
        let offset = bits::bit_select(&self.bits, rank);
        bits::clear(&mut self.bits, offset);
        self.count -= 1;
        self.start + offset
    }

    fn undrawn(&self) -> impl Iterator<Item = usize> + '_ {
        bits::ones(&self.bits).map(|offset| self.start + offset)
    }
}

/// Exactly uniform dealer that samples by rank over an ordered list of cells.
///
/// A draw costs one sample: a rank in `0..remaining`, resolved by a prefix
/// scan over cached cell counts and a `bit_select` inside the hit cell.
/// Emptied cells leave the list, so scans cost live cells only.
/// Positions map to identities one-to-one, position p dealing identity p.
#[derive(Default)]
pub struct PerfectDealer<'r> {
    deal: Option<Deal<'r>>,
    width: usize,
    created: usize,
    cells: Vec<Cell>,
}

/// Live cell holding the `rank`-th undrawn position, and the rank within it.
fn locate(cells: &[Cell], rank: usize) -> (usize, usize) {
    let mut rank = rank;
    for (i, cell) in cells.iter().enumerate() {
        if rank < cell.count {
            return (i, rank);
        }
        rank -= cell.count;
    }
    (cells.len(), rank)
}

impl<'r> Dealer<'r> for PerfectDealer<'r> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Perfect
    }

    fn initialize(
        &mut self,
        n: usize,
        rng: &'r mut dyn RngCore,
        config: Config,
    ) -> Result<(), DealError> {
        let width = config.cell_width(n)?;
        let deal = Deal::new(n, rng)?;
        self.cells = (0..n)
            .step_by(width)
            .map(|start| Cell::new(start, (start + width).min(n)))
            .collect();
        self.created = self.cells.len();
        self.width = width;
        self.deal = Some(deal);
        log::debug!(
            "perfect dealer over {} cards: {} cells of width {}",
            n,
            self.created,
            width
        );
        Ok(())
    }

    fn draw(&mut self) -> Result<Identity, DealError> {
        let deal = self.deal.as_mut().ok_or(DealError::NotInitialized)?;
        deal.check()?;
        let rank = deal.sample(0, deal.remaining());
        let (i, local) = locate(&self.cells, rank);
        let cell = &mut self.cells[i];
        let card = cell.take(local);
        if cell.count == 0 {
            self.cells.remove(i);
            log::trace!("cell dropped, {} live", self.cells.len());
        }
        deal.advance();
        Ok(card)
    }

    fn remaining(&self) -> Result<usize, DealError> {
        live(&self.deal).map(Deal::remaining)
    }

    fn summarize(&self) -> Result<Summary, DealError> {
        let deal = live(&self.deal)?;
        let counter = bits::log2_ceil(self.width + 1);
        let bits = self
            .cells
            .iter()
            .map(|cell| cell.end - cell.start + counter)
            .sum();
        let detail = Detail::Perfect {
            cell_width: self.width,
            cells: self.created,
            live_cells: self.cells.len(),
        };
        Ok(deal.summary(Algorithm::Perfect, bits, detail))
    }

    fn peek_distribution(&self) -> Result<Distribution, DealError> {
        live(&self.deal)?;
        Ok(Distribution::uniform(
            self.cells.iter().flat_map(|cell| cell.undrawn()),
        ))
    }
}
