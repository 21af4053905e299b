use crate::Dealer;
use crate::Distribution;
use crate::Identity;
use crate::Probability;
use crate::bits::uniform_int;
use crate::error::DealError;
use rand::RngCore;
use serde::Serialize;

/// Something that names the next card type before each draw.
///
/// Cards are folded into `types()` buckets by `identity mod types`, so two
/// decks of 52 can be guessed at the level of "ace of spades".
pub trait Guesser {
    fn types(&self) -> usize;
    fn guess(&mut self, distribution: &Distribution) -> Identity;
}

/// Best response to the exposed distribution: always the most probable type.
/// Ties go to the lowest type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Myopic {
    types: usize,
}

impl Myopic {
    pub fn new(types: usize) -> Result<Self, DealError> {
        positive(types).map(|types| Self { types })
    }
}

fn positive(types: usize) -> Result<usize, DealError> {
    match types {
        0 => Err(DealError::InvalidConfig("types must be positive".into())),
        types => Ok(types),
    }
}

impl Guesser for Myopic {
    fn types(&self) -> usize {
        self.types
    }
    fn guess(&mut self, distribution: &Distribution) -> Identity {
        distribution
            .marginal(self.types)
            .into_iter()
            .fold(None, |best: Option<(Identity, Probability)>, (kind, p)| match best {
                Some((_, q)) if q >= p => best,
                _ => Some((kind, p)),
            })
            .map(|(kind, _)| kind)
            .unwrap_or_default()
    }
}

/// Baseline that ignores the distribution and guesses uniformly at random.
pub struct Blind<R> {
    types: usize,
    rng: R,
}

impl<R> Blind<R>
where
    R: RngCore,
{
    pub fn new(types: usize, rng: R) -> Result<Self, DealError> {
        positive(types).map(|types| Self { types, rng })
    }
}

impl<R> Guesser for Blind<R>
where
    R: RngCore,
{
    fn types(&self) -> usize {
        self.types
    }
    fn guess(&mut self, _: &Distribution) -> Identity {
        uniform_int(&mut self.rng, 0, self.types)
    }
}

/// Correct guesses over turns played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub hits: usize,
    pub turns: usize,
}

impl Score {
    pub fn accuracy(&self) -> Probability {
        match self.turns {
            0 => 0.,
            turns => self.hits as Probability / turns as Probability,
        }
    }
}

impl std::ops::Add for Score {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            hits: self.hits + rhs.hits,
            turns: self.turns + rhs.turns,
        }
    }
}

/// Guess every remaining card of an initialized dealer, peeking before each draw.
pub fn play<'r, G>(guesser: &mut G, dealer: &mut dyn Dealer<'r>) -> Result<Score, DealError>
where
    G: Guesser + ?Sized,
{
    let mut score = Score::default();
    while dealer.remaining()? > 0 {
        let guess = guesser.guess(&dealer.peek_distribution()?);
        let card = dealer.draw()?;
        score.turns += 1;
        score.hits += usize::from(card % guesser.types() == guess);
    }
    log::trace!("{} of {} guessed", score.hits, score.turns);
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::FisherYatesDealer;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn myopic_picks_heaviest_type() {
        let distribution = Distribution::uniform([3, 55, 10]);
        assert_eq!(Myopic::new(52).expect("types").guess(&distribution), 3);
    }

    #[test]
    fn myopic_breaks_ties_low() {
        let distribution = Distribution::uniform([9, 4, 30]);
        assert_eq!(Myopic::new(52).expect("types").guess(&distribution), 4);
    }

    #[test]
    fn zero_types_rejected() {
        assert!(matches!(Myopic::new(0), Err(DealError::InvalidConfig(_))));
        assert!(matches!(
            Blind::new(0, SmallRng::seed_from_u64(0)),
            Err(DealError::InvalidConfig(_))
        ));
    }

    #[test]
    fn blind_stays_in_range() {
        let mut blind = Blind::new(52, SmallRng::seed_from_u64(0)).expect("types");
        let distribution = Distribution::default();
        assert!((0..100).all(|_| blind.guess(&distribution) < 52));
    }

    #[test]
    fn play_drains_the_deck() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut dealer = FisherYatesDealer::default();
        dealer.initialize(52, rng, Config::default()).expect("init");
        let score = play(&mut Myopic::new(52).expect("types"), &mut dealer).expect("play");
        assert_eq!(score.turns, 52);
        assert_eq!(dealer.remaining(), Ok(0));
        // the last card is always forced
        assert!(score.hits >= 1);
    }

    #[test]
    fn accuracy_of_empty_score() {
        assert_eq!(Score::default().accuracy(), 0.);
        let score = Score { hits: 1, turns: 4 } + Score { hits: 1, turns: 4 };
        assert_eq!(score.accuracy(), 0.25);
    }
}
