//! Subset-sum reachability over table cards.
//!
//! A played rank can only sweep the table if some subset of the table cards
//! sums to it. The sum set is built incrementally (each card either joins or
//! skips every previously reachable sum), which yields exactly the sums of the
//! `2^n - 1` non-empty subsets without enumerating them.

use crate::model::card::Card;
use std::collections::BTreeSet;

/// Every distinct rank sum over the non-empty subsets of `cards`.
pub fn reachable_sums(cards: &[Card]) -> BTreeSet<u32> {
    let mut sums = BTreeSet::new();
    for card in cards {
        let value = u32::from(card.rank.value());
        let extended: Vec<u32> = sums.iter().map(|sum| sum + value).collect();
        sums.extend(extended);
        sums.insert(value);
    }
    sums
}

/// Whether some non-empty subset of `cards` sums to `value`.
pub fn is_reachable(value: u32, cards: &[Card]) -> bool {
    reachable_sums(cards).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::{is_reachable, reachable_sums};
    use crate::model::card::Card;
    use std::collections::BTreeSet;

    fn cards(tokens: &[&str]) -> Vec<Card> {
        tokens.iter().map(|t| t.parse().unwrap()).collect()
    }

    fn brute_force(cards: &[Card]) -> BTreeSet<u32> {
        let mut sums = BTreeSet::new();
        for mask in 1u32..(1 << cards.len()) {
            let total = cards
                .iter()
                .enumerate()
                .filter(|(idx, _)| mask & (1 << idx) != 0)
                .map(|(_, card)| u32::from(card.rank.value()))
                .sum();
            sums.insert(total);
        }
        sums
    }

    #[test]
    fn empty_table_reaches_nothing() {
        assert!(reachable_sums(&[]).is_empty());
        assert!(!is_reachable(1, &[]));
    }

    #[test]
    fn two_cards_reach_each_and_their_sum() {
        let sums = reachable_sums(&cards(&["3B", "4C"]));
        assert_eq!(sums, BTreeSet::from([3, 4, 7]));
    }

    #[test]
    fn duplicate_ranks_collapse() {
        let sums = reachable_sums(&cards(&["2C", "2S"]));
        assert_eq!(sums, BTreeSet::from([2, 4]));
    }

    #[test]
    fn matches_subset_enumeration() {
        let table = cards(&["1B", "2C", "4S", "7D", "10B", "3C", "9S"]);
        assert_eq!(reachable_sums(&table), brute_force(&table));
    }

    #[test]
    fn unreachable_rank_is_reported() {
        let table = cards(&["2C", "4S"]);
        assert!(is_reachable(6, &table));
        assert!(!is_reachable(5, &table));
    }
}
