use crate::model::card::Card;
use crate::model::suit::Suit;

/// Best primiera card per suit for a set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrimieraBoard {
    best: [Option<Card>; 4],
}

impl PrimieraBoard {
    pub const fn new() -> Self {
        Self { best: [None; 4] }
    }

    pub fn from_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut board = Self::new();
        for &card in cards {
            board.offer(card);
        }
        board
    }

    /// Keeps `card` if it is worth strictly more than the current best of its
    /// suit, so the first card seen wins ties.
    pub fn offer(&mut self, card: Card) {
        let slot = &mut self.best[card.suit.index()];
        let current = slot.map_or(0, Card::primiera_points);
        if card.primiera_points() > current {
            *slot = Some(card);
        }
    }

    pub fn best(&self, suit: Suit) -> Option<Card> {
        self.best[suit.index()]
    }

    /// Sum of the per-suit bests; a missing suit contributes nothing.
    pub fn total(&self) -> u32 {
        self.best
            .iter()
            .flatten()
            .map(|card| card.primiera_points())
            .sum()
    }
}

pub fn primiera_score(cards: &[Card]) -> u32 {
    PrimieraBoard::from_cards(cards).total()
}

#[cfg(test)]
mod tests {
    use super::{PrimieraBoard, primiera_score};
    use crate::model::card::Card;
    use crate::model::suit::Suit;

    fn cards(tokens: &[&str]) -> Vec<Card> {
        tokens.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn best_card_per_suit_is_summed() {
        assert_eq!(primiera_score(&cards(&["7D", "1C", "10S"])), 21 + 16 + 10);
    }

    #[test]
    fn same_suit_keeps_highest_weight() {
        let hand = cards(&["10D", "6D", "1D"]);
        let board = PrimieraBoard::from_cards(&hand);
        assert_eq!(board.best(Suit::Denari), Some(hand[1]));
        assert_eq!(board.total(), 18);
    }

    #[test]
    fn ties_keep_first_seen() {
        let hand = cards(&["8B", "10B", "9B"]);
        let board = PrimieraBoard::from_cards(&hand);
        assert_eq!(board.best(Suit::Bastoni), Some(hand[0]));
        assert_eq!(board.total(), 10);
    }

    #[test]
    fn empty_hand_scores_zero() {
        assert_eq!(primiera_score(&[]), 0);
        assert_eq!(PrimieraBoard::new().best(Suit::Spade), None);
    }
}
