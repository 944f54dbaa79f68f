//! Uniform opponent-hand sampling over the unknown pool.

use crate::error::AnalysisError;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::score::primiera_score;
use crate::model::seen::UnknownPool;
use rand::Rng;
use rand::seq::index;
use std::array;

/// Cards in an opponent's hand.
pub const HAND_SIZE: usize = 3;

/// Trial budget for the stand-alone analyses.
pub const DEFAULT_TRIALS: usize = 10_000;

/// Trial budget per candidate card when advising; it runs once per card in hand.
pub const ADVISORY_TRIALS: usize = 1_000;

/// One simulated opponent hand: three distinct cards from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentHand {
    cards: [Card; HAND_SIZE],
}

impl OpponentHand {
    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_rank(&self, rank: Rank) -> bool {
        self.cards.iter().any(|card| card.rank == rank)
    }

    pub fn primiera_score(&self) -> u32 {
        primiera_score(&self.cards)
    }
}

/// Draws independent uniform 3-card hands from a pool.
///
/// Each draw is without replacement inside the hand; the whole pool is
/// available again for the next draw.
#[derive(Debug, Clone, Copy)]
pub struct HandSampler<'a> {
    pool: &'a [Card],
}

impl<'a> HandSampler<'a> {
    /// Fails with [`AnalysisError::InsufficientPool`] when the pool cannot
    /// fill a hand.
    pub fn new(pool: &'a UnknownPool) -> Result<Self, AnalysisError> {
        pool.require(HAND_SIZE)?;
        Ok(Self { pool: pool.cards() })
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> OpponentHand {
        let picked = index::sample(rng, self.pool.len(), HAND_SIZE);
        OpponentHand {
            cards: array::from_fn(|slot| self.pool[picked.index(slot)]),
        }
    }

    /// Runs `trials` draws, handing each one to `visit` without storing it.
    pub fn run<R, F>(&self, trials: usize, rng: &mut R, mut visit: F) -> Result<(), AnalysisError>
    where
        R: Rng + ?Sized,
        F: FnMut(&OpponentHand),
    {
        if trials == 0 {
            return Err(AnalysisError::ZeroTrials);
        }
        tracing::debug!(
            target: "scopa_core::sampler",
            pool = self.pool.len(),
            trials,
            "sampling opponent hands"
        );
        for _ in 0..trials {
            let hand = self.draw(rng);
            visit(&hand);
        }
        Ok(())
    }

    pub fn draw_samples<R: Rng + ?Sized>(
        &self,
        trials: usize,
        rng: &mut R,
    ) -> Result<Vec<OpponentHand>, AnalysisError> {
        let mut samples = Vec::with_capacity(trials);
        self.run(trials, rng, |hand| samples.push(*hand))?;
        Ok(samples)
    }
}

/// Draws `trials` independent opponent hands from `pool`.
pub fn draw_samples<R: Rng + ?Sized>(
    pool: &UnknownPool,
    trials: usize,
    rng: &mut R,
) -> Result<Vec<OpponentHand>, AnalysisError> {
    HandSampler::new(pool)?.draw_samples(trials, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seen::SeenSet;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashMap;

    fn pool(tokens: &[&str]) -> UnknownPool {
        UnknownPool::from_cards(tokens.iter().map(|t| t.parse::<Card>().unwrap()))
    }

    #[test]
    fn deterministic_with_fixed_seed() {
        let pool = SeenSet::new().unknown_pool();
        let mut rng_a = SmallRng::seed_from_u64(123);
        let mut rng_b = SmallRng::seed_from_u64(123);
        let a = draw_samples(&pool, 50, &mut rng_a).unwrap();
        let b = draw_samples(&pool, 50, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hands_hold_distinct_pool_cards() {
        let pool = SeenSet::with_cards(["7D".parse().unwrap()]).unknown_pool();
        let mut rng = SmallRng::seed_from_u64(9);
        for hand in draw_samples(&pool, 500, &mut rng).unwrap() {
            let [a, b, c] = *hand.cards();
            assert!(a != b && b != c && a != c);
            assert!(hand.cards().iter().all(|card| pool.contains(*card)));
        }
    }

    #[test]
    fn every_subset_is_equally_likely() {
        let pool = pool(&["1B", "2C", "3D", "4S"]);
        let sampler = HandSampler::new(&pool).unwrap();
        let mut rng = SmallRng::seed_from_u64(77);
        let mut counts: HashMap<Vec<Card>, usize> = HashMap::new();
        sampler
            .run(40_000, &mut rng, |hand| {
                let mut key = hand.cards().to_vec();
                key.sort();
                *counts.entry(key).or_default() += 1;
            })
            .unwrap();
        assert_eq!(counts.len(), 4);
        for count in counts.values() {
            assert!((9_000..=11_000).contains(count), "skewed count {count}");
        }
    }

    #[test]
    fn small_pool_is_rejected() {
        let pool = pool(&["1B", "2C"]);
        let mut rng = SmallRng::seed_from_u64(1);
        let err = draw_samples(&pool, 10, &mut rng).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientPool {
                available: 2,
                required: HAND_SIZE
            }
        );
    }

    #[test]
    fn zero_trials_are_rejected() {
        let pool = pool(&["1B", "2C", "3D"]);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            draw_samples(&pool, 0, &mut rng).unwrap_err(),
            AnalysisError::ZeroTrials
        );
    }

    #[test]
    fn opponent_hand_queries() {
        let pool = pool(&["7D", "7C", "1S"]);
        let mut rng = SmallRng::seed_from_u64(5);
        let hand = HandSampler::new(&pool).unwrap().draw(&mut rng);
        assert!(hand.contains(Card::SETTEBELLO));
        assert!(hand.has_rank(Rank::Asso));
        assert!(!hand.has_rank(Rank::Re));
        assert_eq!(hand.primiera_score(), 21 + 21 + 16);
    }
}
