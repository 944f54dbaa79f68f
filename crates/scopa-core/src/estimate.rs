//! Monte Carlo estimators built on [`HandSampler`].
//!
//! Every estimator is stateless: it takes the current pool, a trial budget and
//! the caller's PRNG, and returns raw counts that the caller may turn into
//! probabilities or averages.

use crate::combination::is_reachable;
use crate::error::AnalysisError;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::seen::UnknownPool;
use crate::sampler::HandSampler;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

/// Empirical frequency of an event over a number of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProbabilityEstimate {
    pub hits: usize,
    pub trials: usize,
}

impl ProbabilityEstimate {
    pub const fn new(hits: usize, trials: usize) -> Self {
        Self { hits, trials }
    }

    /// An event ruled out without sampling.
    pub const fn impossible() -> Self {
        Self { hits: 0, trials: 0 }
    }

    pub fn probability(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.hits as f64 / self.trials as f64
        }
    }
}

/// Per-card holding frequencies across a batch of simulated hands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFrequencies {
    counts: BTreeMap<Card, usize>,
    trials: usize,
}

impl CardFrequencies {
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Number of distinct cards that showed up in at least one trial.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn estimate(&self, card: Card) -> ProbabilityEstimate {
        let hits = self.counts.get(&card).copied().unwrap_or(0);
        ProbabilityEstimate::new(hits, self.trials)
    }

    pub fn probability(&self, card: Card) -> f64 {
        self.estimate(card).probability()
    }

    /// Cards that appeared at least once, in (rank, suit) order.
    pub fn iter(&self) -> impl Iterator<Item = (Card, ProbabilityEstimate)> + '_ {
        self.counts
            .iter()
            .map(|(&card, &hits)| (card, ProbabilityEstimate::new(hits, self.trials)))
    }
}

pub fn card_frequencies<R: Rng + ?Sized>(
    pool: &UnknownPool,
    trials: usize,
    rng: &mut R,
) -> Result<CardFrequencies, AnalysisError> {
    let sampler = HandSampler::new(pool)?;
    let mut counts = BTreeMap::new();
    sampler.run(trials, rng, |hand| {
        for &card in hand.cards() {
            *counts.entry(card).or_insert(0) += 1;
        }
    })?;
    Ok(CardFrequencies { counts, trials })
}

/// Frequency of simulated hands holding `target`.
pub fn target_card_probability<R: Rng + ?Sized>(
    pool: &UnknownPool,
    target: Card,
    trials: usize,
    rng: &mut R,
) -> Result<ProbabilityEstimate, AnalysisError> {
    let sampler = HandSampler::new(pool)?;
    let mut hits = 0;
    sampler.run(trials, rng, |hand| {
        if hand.contains(target) {
            hits += 1;
        }
    })?;
    Ok(ProbabilityEstimate::new(hits, trials))
}

pub fn settebello_probability<R: Rng + ?Sized>(
    pool: &UnknownPool,
    trials: usize,
    rng: &mut R,
) -> Result<ProbabilityEstimate, AnalysisError> {
    target_card_probability(pool, Card::SETTEBELLO, trials, rng)
}

/// Risk that the opponent answers a play with a sweep.
///
/// This is an approximation of the capture rules: when the played rank is a
/// reachable sum of the table cards, the risk is the chance that the opponent
/// holds any card of that same rank. Competing captures and the played card
/// landing on the table are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScopaRisk {
    pub play: Rank,
    pub reachable: bool,
    pub estimate: ProbabilityEstimate,
}

impl ScopaRisk {
    pub fn probability(&self) -> f64 {
        self.estimate.probability()
    }
}

/// Zero without sampling when `play` is not a reachable table sum; the pool is
/// only checked when a simulation is actually needed.
pub fn scopa_risk<R: Rng + ?Sized>(
    play: Rank,
    table: &[Card],
    pool: &UnknownPool,
    trials: usize,
    rng: &mut R,
) -> Result<ScopaRisk, AnalysisError> {
    if !is_reachable(u32::from(play.value()), table) {
        return Ok(ScopaRisk {
            play,
            reachable: false,
            estimate: ProbabilityEstimate::impossible(),
        });
    }

    let sampler = HandSampler::new(pool)?;
    let mut hits = 0;
    sampler.run(trials, rng, |hand| {
        if hand.has_rank(play) {
            hits += 1;
        }
    })?;

    Ok(ScopaRisk {
        play,
        reachable: true,
        estimate: ProbabilityEstimate::new(hits, trials),
    })
}

/// Distribution summary of simulated opponent primiera scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrimieraEstimate {
    pub trials: usize,
    pub total_points: u64,
    pub sum_of_squares: u64,
    pub min: u32,
    pub max: u32,
}

impl PrimieraEstimate {
    pub fn mean(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.total_points as f64 / self.trials as f64
    }

    /// Population standard deviation of the per-trial scores.
    pub fn std_dev(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        let n = self.trials as f64;
        let mean = self.mean();
        (self.sum_of_squares as f64 / n - mean * mean).max(0.0).sqrt()
    }
}

pub fn expected_primiera<R: Rng + ?Sized>(
    pool: &UnknownPool,
    trials: usize,
    rng: &mut R,
) -> Result<PrimieraEstimate, AnalysisError> {
    let sampler = HandSampler::new(pool)?;
    let mut estimate = PrimieraEstimate {
        trials,
        total_points: 0,
        sum_of_squares: 0,
        min: u32::MAX,
        max: 0,
    };
    sampler.run(trials, rng, |hand| {
        let score = hand.primiera_score();
        estimate.total_points += u64::from(score);
        estimate.sum_of_squares += u64::from(score) * u64::from(score);
        estimate.min = estimate.min.min(score);
        estimate.max = estimate.max.max(score);
    })?;
    Ok(estimate)
}
