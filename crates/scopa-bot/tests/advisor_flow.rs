use rand::SeedableRng;
use rand::rngs::SmallRng;
use scopa_bot::{AdvisorParams, PlayAdvisor};
use scopa_core::AnalysisError;
use scopa_core::model::card::{Card, parse_card_list};
use scopa_core::model::seen::SeenSet;

fn cards(tokens: &str) -> Vec<Card> {
    parse_card_list(tokens).expect("valid cards")
}

#[test]
fn unreachable_ranks_are_always_preferred() {
    let table = cards("2C,4S");
    let mut seen = SeenSet::with_cards(table.iter().copied());
    seen.extend(cards("1C,6D"));
    let pool = seen.unknown_pool();

    let advisor = PlayAdvisor::new(AdvisorParams::with_trials(500));
    let mut rng = SmallRng::seed_from_u64(4);
    let rec = advisor
        .recommend(&cards("6D,1C"), &table, &pool, &mut rng)
        .expect("recommendation");

    assert_eq!(rec.best.to_string(), "1C");
    assert_eq!(rec.best_risk(), 0.0);
    let six = rec.risk_for("6D".parse().unwrap()).expect("6D evaluated");
    assert!(six > 0.0 && six < 1.0);
    assert_eq!(rec.risks.len(), 2);
}

#[test]
fn seen_cards_shrink_the_risk() {
    // All four sixes accounted for: nobody can sweep a table summing to six.
    let table = cards("2C,4S");
    let seen = SeenSet::with_cards(cards("2C,4S,6B,6C,6D,6S"));
    let pool = seen.unknown_pool();

    let mut rng = SmallRng::seed_from_u64(9);
    let rec = scopa_bot::advisor::recommend(&cards("6D"), &table, &pool, &mut rng)
        .expect("recommendation");
    assert_eq!(rec.best_risk(), 0.0);
}

#[test]
fn every_token_invalid_means_empty_hand() {
    let pool = SeenSet::new().unknown_pool();
    let mut rng = SmallRng::seed_from_u64(1);
    let err = PlayAdvisor::default()
        .recommend_tokens(&["zz", "11B"], &cards("3C"), &pool, &mut rng)
        .unwrap_err();
    assert_eq!(err, AnalysisError::EmptyInput { what: "hand" });
}

#[test]
fn small_pool_fails_only_when_sampling_is_needed() {
    let table = cards("3C");
    let seen = SeenSet::with_cards(
        scopa_core::model::deck::Deck::standard()
            .cards()
            .iter()
            .copied()
            .filter(|card| !matches!(card.to_string().as_str(), "3B" | "3D")),
    );
    let pool = seen.unknown_pool();
    assert_eq!(pool.len(), 2);

    let mut rng = SmallRng::seed_from_u64(2);
    let advisor = PlayAdvisor::default();
    let rec = advisor
        .recommend(&cards("5B"), &table, &pool, &mut rng)
        .expect("unreachable rank needs no sampling");
    assert_eq!(rec.best_risk(), 0.0);

    let err = advisor
        .recommend(&cards("3S"), &table, &pool, &mut rng)
        .unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InsufficientPool {
            available: 2,
            required: 3
        }
    );
}
