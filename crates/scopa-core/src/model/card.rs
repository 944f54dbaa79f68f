use crate::error::CardParseError;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single card. Ordering is by rank, then suit, which is also the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// The 7 of Denari.
    pub const SETTEBELLO: Card = Card::new(Rank::Sette, Suit::Denari);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_settebello(self) -> bool {
        matches!(self.rank, Rank::Sette) && matches!(self.suit, Suit::Denari)
    }

    pub const fn primiera_points(self) -> u32 {
        self.rank.primiera_points()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parses tokens of the form `<1-10><B|C|D|S>`. Surrounding whitespace is
    /// ignored and the suit letter is case-insensitive.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = raw.trim().to_ascii_uppercase();
        let invalid = || CardParseError::new(raw.trim());

        let (split, suit_char) = token.char_indices().next_back().ok_or_else(invalid)?;
        let suit = Suit::from_char(suit_char).ok_or_else(invalid)?;
        let rank = match &token[..split] {
            "10" => Some(Rank::Re),
            digit if digit.len() == 1 => digit
                .parse::<u8>()
                .ok()
                .and_then(Rank::from_value),
            _ => None,
        }
        .ok_or_else(invalid)?;

        Ok(Card::new(rank, suit))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a comma separated card list such as `"1C, 2D,3B"`.
///
/// Blank entries are skipped. The first malformed entry aborts the parse.
pub fn parse_card_list(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::parse)
        .collect()
}
