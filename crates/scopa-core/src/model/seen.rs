use crate::error::AnalysisError;
use crate::model::card::Card;
use crate::model::deck::Deck;
use std::collections::BTreeSet;

/// Cards known to be out of circulation: played, captured or on the table.
///
/// The set only grows. Callers own it and pass it into each analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    cards: BTreeSet<Card>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut seen = Self::new();
        seen.extend(cards);
        seen
    }

    /// Marks `card` as seen. Returns `false` if it already was.
    pub fn insert(&mut self, card: Card) -> bool {
        self.cards.insert(card)
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn unknown_pool(&self) -> UnknownPool {
        UnknownPool::from_seen(self)
    }
}

/// Deck minus the seen cards: the universe opponent hands are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPool {
    cards: Vec<Card>,
}

impl UnknownPool {
    pub fn from_seen(seen: &SeenSet) -> Self {
        let cards = Deck::standard()
            .cards()
            .iter()
            .copied()
            .filter(|card| !seen.contains(*card))
            .collect();
        Self { cards }
    }

    /// Builds a pool from an explicit card list, dropping duplicates.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let unique: BTreeSet<Card> = cards.into_iter().collect();
        Self {
            cards: unique.into_iter().collect(),
        }
    }

    /// Cards in canonical (rank, suit) order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    /// Fails with [`AnalysisError::InsufficientPool`] when fewer than `required`
    /// cards remain.
    pub fn require(&self, required: usize) -> Result<(), AnalysisError> {
        if self.cards.len() < required {
            return Err(AnalysisError::InsufficientPool {
                available: self.cards.len(),
                required,
            });
        }
        Ok(())
    }
}

/// Deck minus `seen`.
pub fn unknown_pool(seen: &SeenSet) -> UnknownPool {
    UnknownPool::from_seen(seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::deck::DECK_SIZE;

    fn card(token: &str) -> Card {
        token.parse().expect("valid token")
    }

    #[test]
    fn empty_seen_set_leaves_full_deck() {
        let pool = unknown_pool(&SeenSet::new());
        assert_eq!(pool.len(), DECK_SIZE);
        assert_eq!(pool.cards(), Deck::standard().cards());
    }

    #[test]
    fn seen_cards_are_removed() {
        let seen = SeenSet::with_cards([card("7D"), card("1C"), card("10S")]);
        let pool = seen.unknown_pool();
        assert_eq!(pool.len(), DECK_SIZE - 3);
        assert!(!pool.contains(card("7D")));
        assert!(pool.contains(card("7C")));
    }

    #[test]
    fn seen_set_only_grows() {
        let mut seen = SeenSet::new();
        assert!(seen.insert(card("3B")));
        assert!(!seen.insert(card("3B")));
        seen.extend([card("3B"), card("4B")]);
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn require_reports_pool_size() {
        let pool = UnknownPool::from_cards([card("1B"), card("2B")]);
        let err = pool.require(3).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientPool {
                available: 2,
                required: 3
            }
        );
        assert!(pool.require(2).is_ok());
    }

    #[test]
    fn from_cards_sorts_and_dedups() {
        let pool = UnknownPool::from_cards([card("5S"), card("1B"), card("5S")]);
        assert_eq!(pool.cards(), &[card("1B"), card("5S")]);
    }
}
