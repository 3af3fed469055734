//! Decks, decklists, and the deck transformer.
//!
//! ## Key Types
//!
//! - `Deck`: Named card list with repetition
//! - `IdMultiset`: Deck composition as card key -> count
//! - `TransformedDeck`: main/tokens/dfcs multisets for one deck
//! - `transform_decks`: Splits decks and allocates ids in a session

pub mod deck;
pub mod decklist;
pub mod multiset;
pub mod transformer;

pub use deck::Deck;
pub use decklist::{parse_decklist, resolve_deck, DecklistEntry};
pub use multiset::IdMultiset;
pub use transformer::{transform_decks, TransformedDeck};
