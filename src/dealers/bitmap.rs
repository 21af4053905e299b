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

/// Rejection sampling against an n-bit availability vector (1 = undrawn).
///
/// Each draw samples positions uniformly from the whole deck until it hits an
/// available one, so expected attempts grow as n / remaining as the deck thins.
#[derive(Default)]
pub struct BitmapDealer<'r> {
    deal: Option<Deal<'r>>,
    available: Vec<u64>,
}

impl<'r> Dealer<'r> for BitmapDealer<'r> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bitmap
    }

    fn initialize(
        &mut self,
        n: usize,
        rng: &'r mut dyn RngCore,
        _: Config,
    ) -> Result<(), DealError> {
        let deal = Deal::new(n, rng)?;
        log::debug!("bitmap dealer over {} cards", n);
        self.available = bits::filled(n);
        self.deal = Some(deal);
        Ok(())
    }

    fn draw(&mut self) -> Result<Identity, DealError> {
        let deal = self.deal.as_mut().ok_or(DealError::NotInitialized)?;
        deal.check()?;
        loop {
            let card = deal.sample(0, deal.n());
            if bits::is_set(&self.available, card) {
                bits::clear(&mut self.available, card);
                deal.advance();
                return Ok(card);
            }
        }
    }

    fn remaining(&self) -> Result<usize, DealError> {
        live(&self.deal).map(Deal::remaining)
    }

    fn summarize(&self) -> Result<Summary, DealError> {
        let deal = live(&self.deal)?;
        Ok(deal.summary(Algorithm::Bitmap, deal.n(), Detail::Bitmap))
    }

    fn peek_distribution(&self) -> Result<Distribution, DealError> {
        live(&self.deal)?;
        Ok(Distribution::uniform(bits::ones(&self.available)))
    }
}
