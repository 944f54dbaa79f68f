use core::fmt;

/// The four Italian suits, ordered by their token letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Bastoni = 0,
    Coppe = 1,
    Denari = 2,
    Spade = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Bastoni, Suit::Coppe, Suit::Denari, Suit::Spade];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Bastoni),
            1 => Some(Suit::Coppe),
            2 => Some(Suit::Denari),
            3 => Some(Suit::Spade),
            _ => None,
        }
    }

    pub const fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            'B' => Some(Suit::Bastoni),
            'C' => Some(Suit::Coppe),
            'D' => Some(Suit::Denari),
            'S' => Some(Suit::Spade),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Bastoni => 'B',
            Suit::Coppe => 'C',
            Suit::Denari => 'D',
            Suit::Spade => 'S',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;

    #[test]
    fn display_returns_token_letters() {
        assert_eq!(Suit::Bastoni.to_string(), "B");
        assert_eq!(Suit::Denari.to_string(), "D");
    }

    #[test]
    fn from_index_maps_valid_values() {
        assert_eq!(Suit::from_index(2), Some(Suit::Denari));
        assert_eq!(Suit::from_index(4), None);
    }

    #[test]
    fn from_char_is_inverse_of_symbol() {
        for suit in Suit::ALL {
            assert_eq!(Suit::from_char(suit.symbol()), Some(suit));
        }
        assert_eq!(Suit::from_char('H'), None);
    }
}
