pub mod card;
pub mod deck;
pub mod rank;
pub mod score;
pub mod seen;
pub mod suit;
