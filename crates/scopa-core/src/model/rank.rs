use core::fmt;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum Rank {
    Asso = 1,
    Due = 2,
    Tre = 3,
    Quattro = 4,
    Cinque = 5,
    Sei = 6,
    Sette = 7,
    Fante = 8,
    Cavallo = 9,
    Re = 10,
}

impl Rank {
    pub const ORDERED: [Rank; 10] = [
        Rank::Asso,
        Rank::Due,
        Rank::Tre,
        Rank::Quattro,
        Rank::Cinque,
        Rank::Sei,
        Rank::Sette,
        Rank::Fante,
        Rank::Cavallo,
        Rank::Re,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rank::Asso),
            2 => Some(Rank::Due),
            3 => Some(Rank::Tre),
            4 => Some(Rank::Quattro),
            5 => Some(Rank::Cinque),
            6 => Some(Rank::Sei),
            7 => Some(Rank::Sette),
            8 => Some(Rank::Fante),
            9 => Some(Rank::Cavallo),
            10 => Some(Rank::Re),
            _ => None,
        }
    }

    /// Numeric value used when summing table captures.
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Primiera weight of the rank. The table is deliberately non-monotonic:
    /// sevens beat sixes, which beat aces, and the face cards are worth least.
    pub const fn primiera_points(self) -> u32 {
        match self {
            Rank::Sette => 21,
            Rank::Sei => 18,
            Rank::Asso => 16,
            Rank::Cinque => 15,
            Rank::Quattro => 14,
            Rank::Tre => 13,
            Rank::Due => 12,
            Rank::Fante | Rank::Cavallo | Rank::Re => 10,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn from_value_maps() {
        assert_eq!(Rank::from_value(8), Some(Rank::Fante));
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(11), None);
    }

    #[test]
    fn display_is_numeric() {
        assert_eq!(Rank::Asso.to_string(), "1");
        assert_eq!(Rank::Re.to_string(), "10");
    }

    #[test]
    fn primiera_table_matches_scoring_rules() {
        let points: Vec<u32> = Rank::ORDERED.iter().map(|r| r.primiera_points()).collect();
        assert_eq!(points, vec![16, 12, 13, 14, 15, 18, 21, 10, 10, 10]);
    }
}
