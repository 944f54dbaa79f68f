use crate::params::AdvisorParams;
use rand::Rng;
use scopa_core::AnalysisError;
use scopa_core::estimate::{ScopaRisk, scopa_risk};
use scopa_core::model::card::Card;
use scopa_core::model::seen::UnknownPool;
use serde::Serialize;
use tracing::{Level, event};

/// Sweep risk of playing one card from hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardRisk {
    pub card: Card,
    pub risk: ScopaRisk,
}

impl CardRisk {
    pub fn probability(&self) -> f64 {
        self.risk.probability()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// One entry per considered hand card, in hand order.
    pub risks: Vec<CardRisk>,
    /// First hand card with the lowest risk.
    pub best: Card,
    /// Hand tokens that could not be parsed and were left out.
    pub skipped: Vec<String>,
}

impl Recommendation {
    pub fn risk_for(&self, card: Card) -> Option<f64> {
        self.risks
            .iter()
            .find(|entry| entry.card == card)
            .map(CardRisk::probability)
    }

    pub fn best_risk(&self) -> f64 {
        self.risk_for(self.best).unwrap_or(0.0)
    }
}

/// Ranks the cards in hand by the chance the opponent sweeps the table in reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayAdvisor {
    params: AdvisorParams,
}

impl PlayAdvisor {
    pub const fn new(params: AdvisorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> AdvisorParams {
        self.params
    }

    pub fn recommend<R: Rng + ?Sized>(
        &self,
        hand: &[Card],
        table: &[Card],
        pool: &UnknownPool,
        rng: &mut R,
    ) -> Result<Recommendation, AnalysisError> {
        if hand.is_empty() {
            return Err(AnalysisError::EmptyInput { what: "hand" });
        }
        if table.is_empty() {
            return Err(AnalysisError::EmptyInput { what: "table" });
        }

        let mut risks = Vec::with_capacity(hand.len());
        for &card in hand {
            let risk = scopa_risk(card.rank, table, pool, self.params.trials, rng)?;
            risks.push(CardRisk { card, risk });
        }

        // Strict comparison keeps the earliest card on ties.
        let best = risks
            .iter()
            .copied()
            .reduce(|best, candidate| {
                if candidate.probability() < best.probability() {
                    candidate
                } else {
                    best
                }
            })
            .ok_or(AnalysisError::EmptyInput { what: "hand" })?;

        let recommendation = Recommendation {
            risks,
            best: best.card,
            skipped: Vec::new(),
        };
        log_recommendation(table, pool, &recommendation, self.params);
        Ok(recommendation)
    }

    /// Like [`PlayAdvisor::recommend`], but takes raw hand tokens. Tokens that do
    /// not parse are excluded instead of failing the whole recommendation.
    pub fn recommend_tokens<R, S>(
        &self,
        hand: &[S],
        table: &[Card],
        pool: &UnknownPool,
        rng: &mut R,
    ) -> Result<Recommendation, AnalysisError>
    where
        R: Rng + ?Sized,
        S: AsRef<str>,
    {
        let mut cards = Vec::with_capacity(hand.len());
        let mut skipped = Vec::new();
        for token in hand {
            match token.as_ref().parse::<Card>() {
                Ok(card) => cards.push(card),
                Err(err) => {
                    tracing::warn!(
                        target: "scopa_bot::advice",
                        token = err.token(),
                        message = "skipping unparseable hand card"
                    );
                    skipped.push(err.token().to_string());
                }
            }
        }

        let mut recommendation = self.recommend(&cards, table, pool, rng)?;
        recommendation.skipped = skipped;
        Ok(recommendation)
    }
}

/// [`PlayAdvisor::recommend`] with default parameters.
pub fn recommend<R: Rng + ?Sized>(
    hand: &[Card],
    table: &[Card],
    pool: &UnknownPool,
    rng: &mut R,
) -> Result<Recommendation, AnalysisError> {
    PlayAdvisor::default().recommend(hand, table, pool, rng)
}

fn log_recommendation(
    table: &[Card],
    pool: &UnknownPool,
    recommendation: &Recommendation,
    params: AdvisorParams,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let preview = recommendation
        .risks
        .iter()
        .map(|entry| format!("{}={:.3}", entry.card, entry.probability()))
        .collect::<Vec<_>>()
        .join(",");
    let table_cards = table
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(",");

    event!(
        target: "scopa_bot::advice",
        Level::INFO,
        hand_size = recommendation.risks.len(),
        table = %table_cards,
        pool_size = pool.len(),
        trials = params.trials,
        risks = %preview,
        chosen = %recommendation.best,
        chosen_risk = recommendation.best_risk(),
    );
}
