pub mod card;
pub mod deck;
pub mod rank;
pub mod street;
pub mod suit;

pub use card::Card;
pub use deck::Deck;
pub use rank::Rank;
pub use street::Street;
pub use suit::Suit;
