use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

pub const DECK_SIZE: usize = 40;

/// The 40-card Italian deck in canonical (rank, suit) order.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for rank in Rank::ORDERED.iter().copied() {
            for suit in Suit::ALL.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
