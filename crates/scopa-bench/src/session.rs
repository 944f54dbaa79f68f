use rand::SeedableRng;
use rand::rngs::StdRng;
use scopa_bot::{AdvisorParams, PlayAdvisor};
use scopa_core::AnalysisError;
use scopa_core::combination::reachable_sums;
use scopa_core::estimate::{card_frequencies, expected_primiera, scopa_risk};
use scopa_core::model::card::{Card, parse_card_list};
use scopa_core::model::seen::SeenSet;

use crate::config::{AnalysisConfig, TrialsConfig};
use crate::report::{
    AdviceReport, FullReport, OddsReport, Outcome, PoolReport, PrimieraReport, RiskReport,
    z_score,
};

/// Optional inputs of a full report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRequest {
    pub play: Option<String>,
    pub hand: Option<String>,
    pub table: Option<String>,
}

/// Owns the seen cards and the PRNG for one interactive session.
///
/// Each analysis derives the unseen pool from the current seen set; nothing is
/// cached between calls.
#[derive(Debug)]
pub struct Session {
    seen: SeenSet,
    rng: StdRng,
    seed: Option<u64>,
    trials: TrialsConfig,
    z: f64,
    advisor: PlayAdvisor,
}

impl Session {
    pub fn new(config: &AnalysisConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            seen: SeenSet::new(),
            rng,
            seed: config.seed,
            trials: config.trials.clone(),
            z: z_score(config.report.confidence),
            advisor: PlayAdvisor::new(AdvisorParams::with_trials(config.trials.advisory)),
        }
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// Adds a comma separated list of cards to the seen set. Returns how many
    /// were new. Nothing is added when any token is malformed.
    pub fn mark_seen(&mut self, tokens: &str) -> Result<usize, AnalysisError> {
        let cards = parse_card_list(tokens)?;
        let added = cards.into_iter().filter(|card| self.seen.insert(*card)).count();
        tracing::debug!(
            target: "scopa_bench::session",
            added,
            seen = self.seen.len(),
            "updated seen cards"
        );
        Ok(added)
    }

    pub fn pool(&self) -> PoolReport {
        PoolReport {
            seen: self.seen.iter().copied().collect(),
            unknown: self.seen.unknown_pool().cards().to_vec(),
        }
    }

    pub fn odds(&mut self) -> Result<OddsReport, AnalysisError> {
        let pool = self.seen.unknown_pool();
        let frequencies = card_frequencies(&pool, self.trials.primary, &mut self.rng)?;
        Ok(OddsReport::new(pool.len(), &frequencies, self.z))
    }

    pub fn risk(&mut self, play: &str, table: &str) -> Result<RiskReport, AnalysisError> {
        let play = parse_play(play)?;
        let table = parse_table(table)?;
        let pool = self.seen.unknown_pool();
        let risk = scopa_risk(play.rank, &table, &pool, self.trials.primary, &mut self.rng)?;
        let sums = reachable_sums(&table).into_iter().collect();
        Ok(RiskReport::new(play, table, sums, risk, self.z))
    }

    pub fn primiera(&mut self) -> Result<PrimieraReport, AnalysisError> {
        let pool = self.seen.unknown_pool();
        let estimate = expected_primiera(&pool, self.trials.primary, &mut self.rng)?;
        Ok(PrimieraReport::new(&estimate, self.z))
    }

    pub fn advise(&mut self, hand: &str, table: &str) -> Result<AdviceReport, AnalysisError> {
        let hand_tokens: Vec<&str> = hand
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();
        let table = parse_table(table)?;
        let pool = self.seen.unknown_pool();
        let recommendation =
            self.advisor
                .recommend_tokens(&hand_tokens, &table, &pool, &mut self.rng)?;
        Ok(AdviceReport::new(table, &recommendation, self.z))
    }

    /// Runs every analysis. A failing analysis is recorded as skipped and the
    /// others still run.
    pub fn report(&mut self, request: &ReportRequest) -> FullReport {
        let table = request.table.as_deref().unwrap_or_default();
        let odds = Outcome::from_result(self.odds());
        let primiera = Outcome::from_result(self.primiera());
        let risk = request
            .play
            .as_deref()
            .map(|play| Outcome::from_result(self.risk(play, table)));
        let advice = request
            .hand
            .as_deref()
            .map(|hand| Outcome::from_result(self.advise(hand, table)));

        FullReport {
            seed: self.seed,
            pool: self.pool(),
            odds,
            primiera,
            risk,
            advice,
        }
    }
}

fn parse_play(token: &str) -> Result<Card, AnalysisError> {
    if token.trim().is_empty() {
        return Err(AnalysisError::EmptyInput { what: "play card" });
    }
    Ok(token.parse::<Card>()?)
}

fn parse_table(tokens: &str) -> Result<Vec<Card>, AnalysisError> {
    let table = parse_card_list(tokens)?;
    if table.is_empty() {
        return Err(AnalysisError::EmptyInput { what: "table" });
    }
    Ok(table)
}
