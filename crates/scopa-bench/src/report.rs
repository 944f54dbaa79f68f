//! Serializable analysis reports and their text rendering.

use std::fmt;

use scopa_bot::Recommendation;
use scopa_core::AnalysisError;
use scopa_core::estimate::{CardFrequencies, PrimieraEstimate, ProbabilityEstimate, ScopaRisk};
use scopa_core::model::card::Card;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

const FALLBACK_Z: f64 = 1.96; // 95% CI

/// Two-sided normal quantile for `confidence` (0.95 gives ~1.96).
pub fn z_score(confidence: f64) -> f64 {
    Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(0.5 + confidence / 2.0))
        .unwrap_or(FALLBACK_Z)
}

/// A probability with its sample size and normal-approximation interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityReport {
    pub probability: f64,
    pub hits: usize,
    pub trials: usize,
    pub ci_low: f64,
    pub ci_high: f64,
}

impl ProbabilityReport {
    pub fn new(estimate: ProbabilityEstimate, z: f64) -> Self {
        let p = estimate.probability();
        let margin = if estimate.trials == 0 {
            0.0
        } else {
            z * (p * (1.0 - p) / estimate.trials as f64).sqrt()
        };
        Self {
            probability: p,
            hits: estimate.hits,
            trials: estimate.trials,
            ci_low: (p - margin).max(0.0),
            ci_high: (p + margin).min(1.0),
        }
    }
}

/// Result of one analysis: either its report or why it did not run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ran(T),
    Skipped { reason: String },
}

impl<T> Outcome<T> {
    pub fn from_result(result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(report) => Outcome::Ran(report),
            Err(err) => {
                tracing::warn!(
                    target: "scopa_bench::report",
                    reason = %err,
                    message = "analysis skipped"
                );
                Outcome::Skipped {
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn ran(&self) -> Option<&T> {
        match self {
            Outcome::Ran(report) => Some(report),
            Outcome::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolReport {
    pub seen: Vec<Card>,
    pub unknown: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardOdds {
    pub card: Card,
    #[serde(flatten)]
    pub estimate: ProbabilityReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsReport {
    pub pool_size: usize,
    pub trials: usize,
    pub cards: Vec<CardOdds>,
    pub settebello: ProbabilityReport,
}

impl OddsReport {
    pub fn new(pool_size: usize, frequencies: &CardFrequencies, z: f64) -> Self {
        let cards = frequencies
            .iter()
            .map(|(card, estimate)| CardOdds {
                card,
                estimate: ProbabilityReport::new(estimate, z),
            })
            .collect();
        Self {
            pool_size,
            trials: frequencies.trials(),
            cards,
            settebello: ProbabilityReport::new(frequencies.estimate(Card::SETTEBELLO), z),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub play: Card,
    pub table: Vec<Card>,
    pub reachable_sums: Vec<u32>,
    pub reachable: bool,
    pub risk: ProbabilityReport,
}

impl RiskReport {
    pub fn new(
        play: Card,
        table: Vec<Card>,
        reachable_sums: Vec<u32>,
        risk: ScopaRisk,
        z: f64,
    ) -> Self {
        Self {
            play,
            table,
            reachable_sums,
            reachable: risk.reachable,
            risk: ProbabilityReport::new(risk.estimate, z),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimieraReport {
    pub trials: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
    pub ci_low: f64,
    pub ci_high: f64,
}

impl PrimieraReport {
    pub fn new(estimate: &PrimieraEstimate, z: f64) -> Self {
        let mean = estimate.mean();
        let margin = if estimate.trials == 0 {
            0.0
        } else {
            z * estimate.std_dev() / (estimate.trials as f64).sqrt()
        };
        Self {
            trials: estimate.trials,
            mean,
            std_dev: estimate.std_dev(),
            min: estimate.min,
            max: estimate.max,
            ci_low: mean - margin,
            ci_high: mean + margin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardAdvice {
    pub card: Card,
    pub reachable: bool,
    #[serde(flatten)]
    pub risk: ProbabilityReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceReport {
    pub table: Vec<Card>,
    pub risks: Vec<CardAdvice>,
    pub best: Card,
    pub best_risk: f64,
    pub skipped: Vec<String>,
}

impl AdviceReport {
    pub fn new(table: Vec<Card>, recommendation: &Recommendation, z: f64) -> Self {
        let risks = recommendation
            .risks
            .iter()
            .map(|entry| CardAdvice {
                card: entry.card,
                reachable: entry.risk.reachable,
                risk: ProbabilityReport::new(entry.risk.estimate, z),
            })
            .collect();
        Self {
            table,
            risks,
            best: recommendation.best,
            best_risk: recommendation.best_risk(),
            skipped: recommendation.skipped.clone(),
        }
    }
}

/// Every analysis for one session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullReport {
    pub seed: Option<u64>,
    pub pool: PoolReport,
    pub odds: Outcome<OddsReport>,
    pub primiera: Outcome<PrimieraReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<Outcome<RiskReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<Outcome<AdviceReport>>,
}

fn join_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

impl fmt::Display for PoolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seen cards ({}): {}", self.seen.len(), join_cards(&self.seen))?;
        write!(
            f,
            "Unseen cards ({}): {}",
            self.unknown.len(),
            join_cards(&self.unknown)
        )
    }
}

impl fmt::Display for OddsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Opponent card probabilities ({} trials, {} unseen cards):",
            self.trials, self.pool_size
        )?;
        for entry in &self.cards {
            writeln!(f, "  {}: {}", entry.card, percent(entry.estimate.probability))?;
        }
        write!(
            f,
            "Probability the opponent holds the settebello ({}): {} (CI {} - {})",
            Card::SETTEBELLO,
            percent(self.settebello.probability),
            percent(self.settebello.ci_low),
            percent(self.settebello.ci_high)
        )
    }
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.reachable {
            return write!(
                f,
                "No combination on the table ({}) lets the opponent sweep after {}.",
                join_cards(&self.table),
                self.play
            );
        }
        write!(
            f,
            "Risk the opponent sweeps after {}: {} (CI {} - {}, {} trials)",
            self.play,
            percent(self.risk.probability),
            percent(self.risk.ci_low),
            percent(self.risk.ci_high),
            self.risk.trials
        )
    }
}

impl fmt::Display for PrimieraReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expected opponent primiera: {:.2} points (CI {:.2} - {:.2}, range {}-{}, {} trials)",
            self.mean, self.ci_low, self.ci_high, self.min, self.max, self.trials
        )
    }
}

impl fmt::Display for AdviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.skipped {
            writeln!(f, "  {token}: not a valid card, ignored")?;
        }
        for entry in &self.risks {
            writeln!(
                f,
                "  {}: opponent sweep risk {}",
                entry.card,
                percent(entry.risk.probability)
            )?;
        }
        write!(f, "Play {} (lowest risk)", self.best)
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ran(report) => fmt::Display::fmt(report, f),
            Outcome::Skipped { reason } => write!(f, "Skipped: {reason}"),
        }
    }
}

impl fmt::Display for FullReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Pool ==\n{}\n", self.pool)?;
        writeln!(f, "== Opponent odds ==\n{}\n", self.odds)?;
        write!(f, "== Primiera ==\n{}", self.primiera)?;
        if let Some(risk) = &self.risk {
            write!(f, "\n\n== Scopa risk ==\n{risk}")?;
        }
        if let Some(advice) = &self.advice {
            write!(f, "\n\n== Advice ==\n{advice}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_score_matches_common_levels() {
        assert!((z_score(0.95) - 1.959964).abs() < 1e-4);
        assert!((z_score(0.90) - 1.644854).abs() < 1e-4);
    }

    #[test]
    fn interval_is_clamped_to_unit_range() {
        let certain = ProbabilityReport::new(ProbabilityEstimate::new(10, 10), 1.96);
        assert_eq!(certain.ci_high, 1.0);
        assert_eq!(certain.ci_low, 1.0);

        let unsampled = ProbabilityReport::new(ProbabilityEstimate::impossible(), 1.96);
        assert_eq!((unsampled.ci_low, unsampled.ci_high), (0.0, 0.0));

        let half = ProbabilityReport::new(ProbabilityEstimate::new(50, 100), 1.96);
        assert!((half.ci_low - 0.402).abs() < 1e-3);
        assert!((half.ci_high - 0.598).abs() < 1e-3);
    }

    #[test]
    fn skipped_outcome_serializes_reason() {
        let outcome: Outcome<PrimieraReport> =
            Outcome::from_result(Err(AnalysisError::EmptyInput { what: "table" }));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "table must contain at least one card");
        assert!(outcome.ran().is_none());
        assert_eq!(outcome.to_string(), "Skipped: table must contain at least one card");
    }

    #[test]
    fn ran_outcome_flattens_report() {
        let report = PoolReport {
            seen: vec![Card::SETTEBELLO],
            unknown: Vec::new(),
        };
        let json = serde_json::to_value(Outcome::Ran(report)).unwrap();
        assert_eq!(json["status"], "ran");
        assert_eq!(json["seen"][0], "7D");
    }

    #[test]
    fn unreachable_risk_renders_safe_message() {
        let play: Card = "5B".parse().unwrap();
        let table = vec!["2C".parse().unwrap(), "4S".parse().unwrap()];
        let risk = ScopaRisk {
            play: play.rank,
            reachable: false,
            estimate: ProbabilityEstimate::impossible(),
        };
        let report = RiskReport::new(play, table, vec![2, 4, 6], risk, 1.96);
        assert_eq!(
            report.to_string(),
            "No combination on the table (2C,4S) lets the opponent sweep after 5B."
        );
    }
}
